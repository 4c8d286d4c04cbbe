use std::sync::Arc;

use log::debug;
use ndarray::Array2;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

use crate::error::{Error, Result};
use crate::segment::segments;
use crate::signal::{SampleRate, Signal};
use crate::utils::{db_from_magnitude, db_from_power, CFloat, Float};
use crate::window::{Window, WindowKind};

/// Amplitude scale of a spectral product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scaling {
    #[default]
    Linear,
    Decibel,
}

/* One-sided magnitude spectrum: floor(fft_size/2) bins covering the
 * non-negative frequencies, bin k at k * fs / fft_size Hz.
 */
#[derive(Debug, Clone)]
pub struct SpectrumFrame {
    pub frequencies: Vec<Float>,
    pub magnitudes: Vec<Float>,
    pub scaling: Scaling,
}

/* Time-frequency power grid. `power` is indexed (bin, time) and holds
 * squared magnitudes (or their dB image when scaling is Decibel).
 */
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub times: Vec<Float>,
    pub frequencies: Vec<Float>,
    pub power: Array2<Float>,
    pub scaling: Scaling,
}

/// Frequency axis shared by every product: fft_size/2 ascending bins.
fn freq_axis(fs: SampleRate, fft_size: usize) -> Vec<Float> {
    let df = fs as Float / fft_size as Float;
    (0..fft_size / 2).map(|k| k as Float * df).collect()
}

/// Reject fft sizes the segment cannot fit into, and windows whose
/// length does not match the segment.
fn validate(fft_size: usize, segment_len: usize, window: Option<&Window>) -> Result<()> {
    if fft_size == 0 || fft_size < segment_len {
        return Err(Error::InvalidFftSize {
            fft_size,
            segment_len,
        });
    }
    if let Some(w) = window {
        if w.len() != segment_len {
            return Err(Error::WindowLengthMismatch {
                window_len: w.len(),
                segment_len,
            });
        }
    }
    Ok(())
}

/* Windowed, zero-padded FFT of one segment, reduced to the one-sided
 * magnitude bins. The validity of (fft_size, segment, window) must have
 * been checked up front; this function itself cannot fail, which is what
 * lets the per-segment loops below run without fallible plumbing.
 */
fn bin_magnitudes(
    fft: &dyn Fft<Float>,
    segment: &[Float],
    window: Option<&Window>,
    fft_size: usize,
) -> Vec<Float> {
    // right-padded complex buffer
    let mut buf = vec![CFloat::new(0.0, 0.0); fft_size];
    match window {
        Some(w) => {
            for (slot, (&x, &c)) in buf.iter_mut().zip(segment.iter().zip(w.coeffs())) {
                *slot = CFloat::new(x * c, 0.0);
            }
        }
        None => {
            for (slot, &x) in buf.iter_mut().zip(segment) {
                *slot = CFloat::new(x, 0.0);
            }
        }
    }

    fft.process(&mut buf);
    buf[..fft_size / 2].iter().map(|z| z.norm()).collect()
}

/// One magnitude spectrum per segment, in segment order. Parallel across
/// segments when the rayon feature is on; ordering is preserved either way.
fn segment_magnitudes(
    fft: &Arc<dyn Fft<Float>>,
    segs: &[&[Float]],
    window: &Window,
    fft_size: usize,
) -> Vec<Vec<Float>> {
    #[cfg(feature = "rayon")]
    {
        segs.par_iter()
            .map(|seg| bin_magnitudes(fft.as_ref(), seg, Some(window), fft_size))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        segs.iter()
            .map(|seg| bin_magnitudes(fft.as_ref(), seg, Some(window), fft_size))
            .collect()
    }
}

/* Discrete Fourier transform frontend.
 *
 * Wraps an FftPlanner so repeated calls at the same size reuse the plan.
 * Apart from that cache every method is a pure function of its inputs.
 */
pub struct Dft {
    planner: FftPlanner<Float>,
}

impl Dft {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    fn plan(&mut self, fft_size: usize) -> Arc<dyn Fft<Float>> {
        self.planner.plan_fft_forward(fft_size)
    }

    /* One-sided magnitude spectrum of a sample slice.
     *
     * fft_size must be >= samples.len(); the tail is zero-padded. A
     * window, when given, must match the sample count and is applied
     * point-wise before the transform.
     */
    pub fn spectrum(
        &mut self,
        samples: &[Float],
        fs: SampleRate,
        fft_size: usize,
        window: Option<&Window>,
        scaling: Scaling,
    ) -> Result<SpectrumFrame> {
        validate(fft_size, samples.len(), window)?;
        let fft = self.plan(fft_size);

        let mut magnitudes = bin_magnitudes(fft.as_ref(), samples, window, fft_size);
        if scaling == Scaling::Decibel {
            for m in magnitudes.iter_mut() {
                *m = db_from_magnitude(*m);
            }
        }

        Ok(SpectrumFrame {
            frequencies: freq_axis(fs, fft_size),
            magnitudes,
            scaling,
        })
    }
}

impl Default for Dft {
    fn default() -> Self {
        Self::new()
    }
}

/* Build an STFT power spectrogram over overlapping windowed segments.
 *
 * Each segment's magnitude spectrum is squared into one time column.
 * times[i] marks the segment center: (i*step + window_length/2) / fs.
 * A signal shorter than one window produces a grid with zero time
 * columns (the frequency axis is still fully populated); that is a
 * valid result, not an error.
 */
pub fn spectrogram(
    signal: &Signal,
    kind: WindowKind,
    window_length: usize,
    overlap: usize,
    fft_size: usize,
    scaling: Scaling,
) -> Result<Spectrogram> {
    let window = Window::new(kind, window_length)?;
    validate(fft_size, window_length, Some(&window))?;

    let iter = segments(signal, window_length, overlap)?;
    let step = iter.step();
    let segs: Vec<&[Float]> = iter.collect();
    let ntimes = segs.len();
    let nbins = fft_size / 2;
    debug!(
        "spectrogram: {} segments of {} samples, step {}, {} bins",
        ntimes, window_length, step, nbins
    );

    let fft = FftPlanner::new().plan_fft_forward(fft_size);
    let cols = segment_magnitudes(&fft, &segs, &window, fft_size);

    // magnitude -> power, laid out (bin, time)
    let mut power = Array2::from_shape_fn((nbins, ntimes), |(b, t)| {
        let m = cols[t][b];
        m * m
    });
    if scaling == Scaling::Decibel {
        power.mapv_inplace(db_from_power);
    }

    let fs = signal.sample_rate() as Float;
    let half_window = window_length as Float / (2.0 * fs);
    let times = (0..ntimes)
        .map(|i| (i * step) as Float / fs + half_window)
        .collect();

    Ok(Spectrogram {
        times,
        frequencies: freq_axis(signal.sample_rate(), fft_size),
        power,
        scaling,
    })
}

/* Long-term average spectrum: mean magnitude (not power) per bin over
 * all segments of the signal.
 *
 * Unlike the spectrogram, zero segments is an error here: an average
 * over no data has no defined value. Averaging happens in the linear
 * magnitude domain; the dB conversion (same 20 log10 form as the single
 * spectrum) is applied once, after the division.
 */
pub fn long_term_spectrum(
    signal: &Signal,
    kind: WindowKind,
    window_length: usize,
    overlap: usize,
    fft_size: usize,
    scaling: Scaling,
) -> Result<SpectrumFrame> {
    let window = Window::new(kind, window_length)?;
    validate(fft_size, window_length, Some(&window))?;

    let segs: Vec<&[Float]> = segments(signal, window_length, overlap)?.collect();
    if segs.is_empty() {
        return Err(Error::InsufficientData {
            signal_len: signal.len(),
            window_length,
        });
    }
    let nseg = segs.len();
    debug!("long-term spectrum: averaging {} segments", nseg);

    let fft = FftPlanner::new().plan_fft_forward(fft_size);
    let frames = segment_magnitudes(&fft, &segs, &window, fft_size);

    // bin-wise running sum, then one division by the segment count
    let mut acc = vec![0.0 as Float; fft_size / 2];
    for frame in &frames {
        for (sum, &m) in acc.iter_mut().zip(frame) {
            *sum += m;
        }
    }
    let scale = (nseg as Float).recip();
    let mut magnitudes: Vec<Float> = acc.iter().map(|&s| s * scale).collect();

    if scaling == Scaling::Decibel {
        for m in magnitudes.iter_mut() {
            *m = db_from_magnitude(*m);
        }
    }

    Ok(SpectrumFrame {
        frequencies: freq_axis(signal.sample_rate(), fft_size),
        magnitudes,
        scaling,
    })
}
