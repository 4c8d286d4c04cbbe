pub mod config;
pub mod error;
pub mod fileio;
pub mod plot;
pub mod segment;
pub mod signal;
pub mod spectral;
pub mod utils;
pub mod window;

use log::debug;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use signal::Signal;
pub use spectral::{long_term_spectrum, spectrogram, Dft, Scaling, Spectrogram, SpectrumFrame};
pub use utils::Float;
pub use window::{Window, WindowKind};

/// The three spectral products derived from one conditioned signal.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub spectrum: SpectrumFrame,
    pub spectrogram: Spectrogram,
    pub long_term: SpectrumFrame,
}

/* Run the full pipeline over one signal.
 *
 * The three products are independent consumers of the same immutable
 * signal; none reads another's output. The whole-signal spectrum
 * transforms at most fft_size samples (a longer signal is truncated,
 * matching the plain n-point FFT of the source material), while the
 * spectrogram and long-term average walk the entire signal in
 * overlapping windows.
 */
pub fn analyze(signal: &Signal, cfg: &AnalysisConfig) -> Result<Analysis> {
    let scaling = cfg.scaling();
    let fs = signal.sample_rate();

    let head = signal.len().min(cfg.fft_size);
    debug!("single spectrum over {} of {} samples", head, signal.len());
    let mut dft = Dft::new();
    let spectrum = dft.spectrum(&signal.samples()[..head], fs, cfg.fft_size, None, scaling)?;

    let sgram = spectrogram(
        signal,
        cfg.window_kind,
        cfg.window_length,
        cfg.window_overlap,
        cfg.fft_size,
        scaling,
    )?;
    let long_term = long_term_spectrum(
        signal,
        cfg.window_kind,
        cfg.window_length,
        cfg.window_overlap,
        cfg.fft_size,
        scaling,
    )?;

    Ok(Analysis {
        spectrum,
        spectrogram: sgram,
        long_term,
    })
}
