use crate::dsp::effect::Effect;
use crate::dsp::gain::Gain;
use crate::{PcmError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Read, Write};
use std::path::Path;

/// Summary of one processing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    pub samples: usize,
    /// Samples the effect moved onto `i16::MIN` or `i16::MAX`. This includes
    /// products that land exactly on a limit (e.g. `-16384 * 2.0`), not only
    /// clamped ones.
    pub at_limit: usize,
}

/// Read a 16-bit integer PCM WAV. Samples stay interleaved.
pub fn read_wav(path: impl AsRef<Path>) -> Result<(WavSpec, Vec<i16>)> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(PcmError::UnsupportedFormat {
            format: spec.sample_format,
            bits: spec.bits_per_sample,
        });
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    log::debug!(
        "read {} samples ({} Hz, {} ch) from {}",
        samples.len(),
        spec.sample_rate,
        spec.channels,
        path.as_ref().display()
    );
    Ok((spec, samples))
}

pub fn write_wav(path: impl AsRef<Path>, spec: WavSpec, samples: &[i16]) -> Result<()> {
    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Apply `effect` to a whole WAV file, keeping channel count and sample rate.
pub fn process_wav(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    effect: &mut dyn Effect,
) -> Result<ProcessReport> {
    let (spec, mut samples) = read_wav(input)?;
    effect.prepare(spec.sample_rate, spec.channels);

    let before = samples.clone();
    effect.process(&mut samples);
    let report = report(&before, &samples);

    write_wav(output, spec, &samples)?;
    Ok(report)
}

/// Headerless little-endian s16 to samples.
pub fn decode_s16le(bytes: &[u8]) -> Result<Vec<i16>> {
    if bytes.len() % 2 != 0 {
        return Err(PcmError::OddByteCount(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect())
}

pub fn encode_s16le(samples: &[i16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Apply `effect` to headerless s16le PCM read to the end of `reader`.
pub fn process_raw(
    mut reader: impl Read,
    mut writer: impl Write,
    effect: &mut dyn Effect,
) -> Result<ProcessReport> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let mut samples = decode_s16le(&bytes)?;

    let before = samples.clone();
    effect.process(&mut samples);
    let report = report(&before, &samples);

    writer.write_all(&encode_s16le(&samples))?;
    writer.flush()?;
    Ok(report)
}

/// Convenience for the common case of a plain gain.
pub fn gain_wav(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    gain: f32,
) -> Result<ProcessReport> {
    process_wav(input, output, &mut Gain::new(gain))
}

fn report(before: &[i16], after: &[i16]) -> ProcessReport {
    let at_limit = before
        .iter()
        .zip(after)
        .filter(|&(&b, &a)| (a == i16::MAX || a == i16::MIN) && a != b)
        .count();
    if at_limit > 0 {
        log::warn!("{at_limit} of {} samples at the i16 limit", after.len());
    }
    ProcessReport { samples: after.len(), at_limit }
}
