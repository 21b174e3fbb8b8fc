//! Offline export of synthesized waveforms to WAV
//!
//! Writes the waveform as mono 32-bit float at its own sampling rate, so one
//! WAV sample corresponds to one custom train sample. Voltages are written
//! unscaled; a 5 V plateau reads back as 5.0.

use crate::error::Result;
use crate::gen::waveform::Waveform;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

fn wav_spec(waveform: &Waveform) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: waveform.samples_per_second(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    }
}

/// Write `waveform` into any seekable writer.
pub fn write_wav_to<W: Write + Seek>(waveform: &Waveform, writer: W) -> Result<()> {
    let mut wav = hound::WavWriter::new(writer, wav_spec(waveform))?;
    for &sample in waveform {
        wav.write_sample(sample as f32)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Write `waveform` to a WAV file at `path`.
pub fn write_wav<P: AsRef<Path>>(waveform: &Waveform, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(hound::Error::from)?;
    write_wav_to(waveform, BufWriter::new(file))?;
    log::info!(
        "bounced {} samples to {}",
        waveform.len(),
        path.as_ref().display()
    );
    Ok(())
}
