use std::f32::consts::PI;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::utils::Float;

/* Supported analysis window shapes.
 *
 * All of them use the symmetric form (denominator L-1),
 * so the first and last coefficients mirror each other.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// 0.5 - 0.5 cos(2πn/(L-1))
    Hann,
    /// 0.54 - 0.46 cos(2πn/(L-1))
    Hamming,
    /// 0.42 - 0.5 cos(2πn/(L-1)) + 0.08 cos(4πn/(L-1))
    Blackman,
    /// triangle, zero at both ends
    Bartlett,
    /// all ones (rectangular)
    Boxcar,
}

impl FromStr for WindowKind {
    type Err = Error;

    // scipy-style names, plus the common aliases
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hann" | "hanning" => Ok(WindowKind::Hann),
            "hamming" => Ok(WindowKind::Hamming),
            "blackman" => Ok(WindowKind::Blackman),
            "bartlett" | "triangle" => Ok(WindowKind::Bartlett),
            "boxcar" | "rectangular" => Ok(WindowKind::Boxcar),
            other => Err(Error::UnknownWindowKind(other.into())),
        }
    }
}

/* A materialized window: kind plus coefficient vector.
 * Deterministic given (kind, length); coefficient count == length.
 */
#[derive(Debug, Clone)]
pub struct Window {
    kind: WindowKind,
    coeffs: Vec<Float>,
}

impl Window {
    pub fn new(kind: WindowKind, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(Error::InvalidWindowLength(length));
        }
        // L=1 has no defined denominator; every kind degenerates to [1]
        if length == 1 {
            return Ok(Self { kind, coeffs: vec![1.0] });
        }

        let m = (length - 1) as Float;
        let coeffs = match kind {
            WindowKind::Hann => (0..length)
                .map(|n| 0.5 - 0.5 * (2.0 * PI * n as Float / m).cos())
                .collect(),
            WindowKind::Hamming => (0..length)
                .map(|n| 0.54 - 0.46 * (2.0 * PI * n as Float / m).cos())
                .collect(),
            WindowKind::Blackman => (0..length)
                .map(|n| {
                    let a = 2.0 * PI * n as Float / m;
                    0.42 - 0.5 * a.cos() + 0.08 * (2.0 * a).cos()
                })
                .collect(),
            WindowKind::Bartlett => (0..length)
                .map(|n| 1.0 - ((n as Float - m / 2.0).abs() / (m / 2.0)))
                .collect(),
            WindowKind::Boxcar => vec![1.0; length],
        };

        Ok(Self { kind, coeffs })
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[Float] {
        &self.coeffs
    }
}
