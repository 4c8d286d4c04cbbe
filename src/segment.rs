use crate::error::{Error, Result};
use crate::signal::Signal;
use crate::utils::Float;

/* Walk a signal in fixed-length segments with a fixed overlap.
 *
 * Yields borrowed slices at offsets 0, step, 2*step, ... where
 * step = window_length - overlap. Only full segments are produced; a
 * trailing partial window is dropped, and a signal shorter than one
 * window yields an empty (but valid) sequence.
 *
 * Clone to restart: the same signal always yields the same segments.
 */
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    samples: &'a [Float],
    window_length: usize,
    step: usize,
    offset: usize,
    remaining: usize,
}

impl<'a> Segments<'a> {
    /// step size between consecutive segment starts
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a [Float];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let seg = &self.samples[self.offset..self.offset + self.window_length];
        self.offset += self.step;
        self.remaining -= 1;
        Some(seg)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}

/// Segment a signal into `window_length`-sample slices overlapping by
/// `overlap` samples. Requires `window_length > 0` and
/// `0 <= overlap < window_length`.
pub fn segments(signal: &Signal, window_length: usize, overlap: usize) -> Result<Segments<'_>> {
    if window_length == 0 || overlap >= window_length {
        return Err(Error::InvalidSegmentation {
            window_length,
            overlap,
        });
    }
    let step = window_length - overlap;
    let samples = signal.samples();

    // number of full segments; zero when the signal is too short
    let remaining = if samples.len() >= window_length {
        (samples.len() - window_length) / step + 1
    } else {
        0
    };

    Ok(Segments {
        samples,
        window_length,
        step,
        offset: 0,
        remaining,
    })
}
