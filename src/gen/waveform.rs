use crate::error::{require_positive, Error, Result};
use std::ops::Index;

/// Sampling rate used when a config does not set one.
pub const DEFAULT_SAMPLES_PER_SECOND: u32 = 1000;

/// Upper bound on samples a single synthesis call will allocate.
const MAX_SYNTH_SAMPLES: f64 = u32::MAX as f64;

/// An immutable, ordered sequence of voltage samples ready for upload into a
/// custom train slot, together with the sampling rate it was built at.
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
    samples_per_second: u32,
}

impl Waveform {
    pub(crate) fn from_samples(samples: Vec<f64>, samples_per_second: u32) -> Self {
        Self {
            samples,
            samples_per_second,
        }
    }

    /// Voltages in playback order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples_per_second(&self) -> u32 {
        self.samples_per_second
    }

    /// Seconds each sample is held; the device's `phase1Duration` for a
    /// channel playing this waveform.
    pub fn sample_width(&self) -> f64 {
        1.0 / self.samples_per_second as f64
    }

    /// Playback length in seconds (`len * sample_width`).
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.samples_per_second as f64
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }
}

impl Index<usize> for Waveform {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a Waveform {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Number of samples covering `duration` seconds: `floor(duration * sps)`.
///
/// Truncates toward zero, so 0.0015 s at 1000 sps is one sample, not two.
pub fn sample_count(duration: f64, samples_per_second: u32) -> Result<usize> {
    require_positive("duration", duration)?;
    if samples_per_second == 0 {
        return Err(Error::invalid("samples_per_second", "must be greater than 0"));
    }
    let exact = duration * samples_per_second as f64;
    if exact > MAX_SYNTH_SAMPLES {
        return Err(Error::invalid(
            "duration",
            format!("{} s at {} sps is too many samples", duration, samples_per_second),
        ));
    }
    Ok(exact as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_truncates() {
        assert_eq!(sample_count(0.0015, 1000).unwrap(), 1);
        assert_eq!(sample_count(3.0, 1000).unwrap(), 3000);
        assert_eq!(sample_count(0.0004, 1000).unwrap(), 0);
    }

    #[test]
    fn test_sample_count_rejects_bad_inputs() {
        assert!(sample_count(0.0, 1000).is_err());
        assert!(sample_count(-1.0, 1000).is_err());
        assert!(sample_count(1.0, 0).is_err());
        assert!(sample_count(1e12, 1000).is_err());
    }

    #[test]
    fn test_sample_width() {
        let wave = Waveform::from_samples(vec![0.0; 4], 1000);
        assert_eq!(wave.sample_width(), 0.001);
        assert_eq!(wave.len(), 4);
        assert!((wave.duration() - 0.004).abs() < 1e-12);
    }
}
