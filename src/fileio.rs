use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::info;
use num_traits::AsPrimitive;

use crate::error::Result;
use crate::signal::SampleRate;
use crate::utils::Float;

/* WAV decoding boundary.
 *
 * Produces the file's native sample rate plus one de-interleaved sample
 * vector per channel, as plain floats. No scaling happens here: integer
 * sample values are cast as-is, since conditioning normalizes by the
 * peak anyway. No resampling either; the native rate is the rate the
 * whole analysis runs at.
 */

/// Decode a WAV file into (sample_rate, per-channel samples).
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(SampleRate, Vec<Vec<Float>>)> {
    let reader = WavReader::open(path.as_ref())?;
    let (fs, channels) = decode_samples(reader)?;
    info!(
        "decoded {}: {} Hz, {} channel(s), {} samples/channel",
        path.as_ref().display(),
        fs,
        channels.len(),
        channels.first().map_or(0, |c| c.len())
    );
    Ok((fs, channels))
}

/// Decode from any reader (files, in-memory cursors in tests).
pub fn decode_samples<R: Read>(mut reader: WavReader<R>) -> Result<(SampleRate, Vec<Vec<Float>>)> {
    let spec = reader.spec();
    // hound reads every supported int depth through i32
    let interleaved: Vec<Float> = match spec.sample_format {
        SampleFormat::Float => collect_samples::<R, f32>(&mut reader)?,
        SampleFormat::Int => collect_samples::<R, i32>(&mut reader)?,
    };
    Ok((
        spec.sample_rate,
        deinterleave(&interleaved, spec.channels as usize),
    ))
}

fn collect_samples<R, S>(reader: &mut WavReader<R>) -> Result<Vec<Float>>
where
    R: Read,
    S: hound::Sample + AsPrimitive<Float>,
{
    let mut out = Vec::with_capacity(reader.len() as usize);
    for samp in reader.samples::<S>() {
        out.push(samp?.as_());
    }
    Ok(out)
}

fn deinterleave(interleaved: &[Float], nch: usize) -> Vec<Vec<Float>> {
    let mut channels = vec![Vec::with_capacity(interleaved.len() / nch); nch];
    for frame in interleaved.chunks(nch) {
        for (ch, &samp) in channels.iter_mut().zip(frame) {
            ch.push(samp);
        }
    }
    channels
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::io::Cursor;

    #[test]
    fn test_decode_int_stereo() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut buf, spec).unwrap();
            for &(l, r) in &[(100i16, -100i16), (200, -200), (300, -300)] {
                writer.write_sample(l).unwrap();
                writer.write_sample(r).unwrap();
            }
            writer.finalize().unwrap();
        }
        buf.set_position(0);

        let (fs, channels) = decode_samples(WavReader::new(buf).unwrap()).unwrap();
        assert_eq!(fs, 48000);
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0], vec![100.0, 200.0, 300.0]);
        assert_eq!(channels[1], vec![-100.0, -200.0, -300.0]);
    }

    #[test]
    fn test_decode_float_mono() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut buf, spec).unwrap();
            for &x in &[0.5f32, -0.25, 0.125] {
                writer.write_sample(x).unwrap();
            }
            writer.finalize().unwrap();
        }
        buf.set_position(0);

        let (fs, channels) = decode_samples(WavReader::new(buf).unwrap()).unwrap();
        assert_eq!(fs, 44100);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0], vec![0.5, -0.25, 0.125]);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(read_wav("/nonexistent/file.wav").is_err());
    }
}
