use crate::error::Result;
use crate::spectral::Scaling;
use crate::window::{Window, WindowKind};

/* Analysis parameters shared by the three spectral products.
 *
 * Passed explicitly into each call; there is no process-wide state, so
 * independent analyses with different parameters can run against the
 * same signal side by side.
 */
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// FFT length; a power of two keeps the transform fast, but any
    /// size >= window_length is correct
    pub fft_size: usize,
    pub window_kind: WindowKind,
    /// segment length in samples
    pub window_length: usize,
    /// samples shared between consecutive segments, < window_length
    pub window_overlap: usize,
    /// dB (log) output instead of linear
    pub db_scaling: bool,
}

impl AnalysisConfig {
    pub fn scaling(&self) -> Scaling {
        if self.db_scaling {
            Scaling::Decibel
        } else {
            Scaling::Linear
        }
    }

    /// materialize the configured analysis window
    pub fn window(&self) -> Result<Window> {
        Window::new(self.window_kind, self.window_length)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: 16384,
            window_kind: WindowKind::Hann,
            window_length: 4096,
            window_overlap: 4096 / 2,
            db_scaling: true,
        }
    }
}
