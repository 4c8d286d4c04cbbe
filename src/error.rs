use crate::utils::Float;

/// Crate-level error type.
///
/// Everything here is a validation failure detected before (or, for
/// [`Error::InsufficientData`], during) numerical work. None of these are
/// transient; nothing is retried or swallowed inside the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Signal is silent (max |sample| == 0) or empty; peak normalization
    /// would divide by zero.
    #[error("degenerate signal: peak amplitude is {peak}, cannot normalize")]
    DegenerateSignal { peak: Float },

    /// Requested window length is not a positive integer.
    #[error("invalid window length {0}, must be >= 1")]
    InvalidWindowLength(usize),

    /// Window name is not one of the supported kinds.
    #[error("unknown window kind `{0}`")]
    UnknownWindowKind(String),

    /// FFT size is zero or smaller than the segment it should transform.
    #[error("invalid fft size {fft_size} for segment of {segment_len} samples")]
    InvalidFftSize {
        fft_size: usize,
        segment_len: usize,
    },

    /// Window coefficient count does not match the segment length.
    #[error("window length {window_len} does not match segment length {segment_len}")]
    WindowLengthMismatch {
        window_len: usize,
        segment_len: usize,
    },

    /// Segmentation parameters violate 0 <= overlap < window_length.
    #[error("invalid segmentation: window_length={window_length}, overlap={overlap}")]
    InvalidSegmentation {
        window_length: usize,
        overlap: usize,
    },

    /// Signal yields zero full segments; an average over no data is undefined.
    #[error("signal of {signal_len} samples is shorter than one window of {window_length}")]
    InsufficientData {
        signal_len: usize,
        window_length: usize,
    },

    /// WAV decode errors.
    #[error(transparent)]
    Wav(#[from] hound::Error),

    /// File I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
