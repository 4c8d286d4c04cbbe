use crate::error::{Error, Result};
use crate::utils::{max_abs, Float};

pub type SampleRate = u32;

/* Signal: a mono, peak-normalized sample sequence plus its sample rate.
 *
 * Built once by [Signal::condition] and immutable afterwards. All three
 * spectral products (single spectrum, spectrogram, long-term average)
 * read from the same Signal without mutating it.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    fs: SampleRate,
    samples: Vec<Float>,
}

impl Signal {
    /* Mix the decoded channels down to mono and normalize to [-1, 1].
     *
     * Multi-channel input is averaged per sample index (channels are
     * expected to be equal length; the shortest one bounds the result).
     * The mono mix is then divided by its peak absolute value. A silent
     * or empty input has a zero peak and fails with DegenerateSignal
     * rather than dividing through and producing NaN.
     *
     * The caller's channel buffers are left untouched.
     */
    pub fn condition(channels: &[Vec<Float>], fs: SampleRate) -> Result<Self> {
        let len = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);
        let nch = channels.len() as Float;

        let mono: Vec<Float> = (0..len)
            .map(|i| channels.iter().map(|ch| ch[i]).sum::<Float>() / nch)
            .collect();

        let peak = max_abs(&mono);
        if peak == 0.0 {
            return Err(Error::DegenerateSignal { peak });
        }

        let samples = mono.iter().map(|&x| x / peak).collect();
        Ok(Self { fs, samples })
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.fs
    }

    pub fn samples(&self) -> &[Float] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// signal duration in seconds
    pub fn duration(&self) -> Float {
        self.samples.len() as Float / self.fs as Float
    }

    /// per-sample timestamps in seconds, for waveform plotting
    pub fn time_axis(&self) -> Vec<Float> {
        let dt = (self.fs as Float).recip();
        (0..self.samples.len()).map(|i| i as Float * dt).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn test_mono_mix_is_mean() {
        let left = vec![1.0, 0.0, -1.0, 0.5];
        let right = vec![0.0, 0.0, -1.0, 0.25];
        let sig = Signal::condition(&[left, right], 48000).unwrap();
        // mean then normalized by peak (1.0 at index 2)
        assert_relative_eq!(sig.samples()[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(sig.samples()[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(sig.samples()[2], -1.0, epsilon = 1e-6);
        assert_relative_eq!(sig.samples()[3], 0.375, epsilon = 1e-6);
    }

    #[test]
    fn test_peak_normalization() {
        let ch = vec![0.2, -0.4, 0.1];
        let sig = Signal::condition(&[ch], 44100).unwrap();
        assert_relative_eq!(max_abs(sig.samples()), 1.0, epsilon = 1e-6);
        assert_relative_eq!(sig.samples()[1], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_idempotent_on_conditioned_input() {
        let ch = vec![0.1, -0.7, 0.3, 0.05];
        let once = Signal::condition(&[ch], 48000).unwrap();
        let twice = Signal::condition(&[once.samples().to_vec()], 48000).unwrap();
        for (a, b) in once.samples().iter().zip(twice.samples()) {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_silent_input_rejected() {
        let err = Signal::condition(&[vec![0.0; 1024]], 48000).unwrap_err();
        assert!(matches!(err, Error::DegenerateSignal { .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(Signal::condition(&[], 48000).is_err());
        assert!(Signal::condition(&[vec![]], 48000).is_err());
    }

    #[test]
    fn test_output_bounded() {
        let mut rng = rand::rng();
        let ch: Vec<Float> = (0..4096).map(|_| rng.random_range(-30.0..30.0)).collect();
        let sig = Signal::condition(&[ch.clone(), ch.clone()], 44100).unwrap();
        assert!(sig.samples().iter().all(|x| x.abs() <= 1.0 + 1e-6));
        // input untouched
        assert_eq!(ch.len(), 4096);
    }

    #[test]
    fn test_duration_and_time_axis() {
        let sig = Signal::condition(&[vec![0.5; 480]], 48000).unwrap();
        assert_relative_eq!(sig.duration(), 0.01, epsilon = 1e-6);
        let t = sig.time_axis();
        assert_eq!(t.len(), 480);
        assert_eq!(t[0], 0.0);
        assert_relative_eq!(t[479], 479.0 / 48000.0, epsilon = 1e-9);
    }
}
