//!
//! Shared numeric type aliases and small math helpers,
//! mostly decibel conversions.
//!
use rustfft::num_complex::Complex;

pub type Float = f32; // sample type used for internal processing
pub type CFloat = Complex<Float>;

/// Floor added before every logarithm so that an exact-zero
/// magnitude maps to a finite dB value instead of -inf.
pub const DB_FLOOR: Float = 1e-10;

/// Magnitude to dB: 20 log10(m + floor).
/// Used for single spectra and the long-term average.
pub fn db_from_magnitude(mag: Float) -> Float {
    20.0 * (mag + DB_FLOOR).log10()
}

/// Power to dB: 10 log10(p + floor).
/// Used for spectrogram cells, which hold squared magnitudes.
/// Not interchangeable with [`db_from_magnitude`].
pub fn db_from_power(pow: Float) -> Float {
    10.0 * (pow + DB_FLOOR).log10()
}

/// Largest absolute value in a slice (0 for an empty slice)
pub fn max_abs(vals: &[Float]) -> Float {
    vals.iter().fold(0.0, |acc, &x| acc.max(x.abs()))
}
