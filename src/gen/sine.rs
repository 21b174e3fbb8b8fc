use crate::error::{require_finite, require_non_negative, Result};
use crate::gen::waveform::{sample_count, Waveform, DEFAULT_SAMPLES_PER_SECOND};
use std::f64::consts::PI;

/// Sampled sine wave starting at zero phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SineConfig {
    pub duration: f64,  // seconds
    pub frequency: f64, // Hz
    pub amplitude: f64, // volts
    pub offset: f64,    // volts
    pub samples_per_second: u32,
}

impl SineConfig {
    pub fn new(duration: f64, frequency: f64, amplitude: f64) -> Self {
        Self {
            duration,
            frequency,
            amplitude,
            offset: 0.0,
            samples_per_second: DEFAULT_SAMPLES_PER_SECOND,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_samples_per_second(mut self, samples_per_second: u32) -> Self {
        self.samples_per_second = samples_per_second;
        self
    }

    pub fn validate(&self) -> Result<()> {
        sample_count(self.duration, self.samples_per_second)?;
        require_non_negative("frequency", self.frequency)?;
        require_finite("amplitude", self.amplitude)?;
        require_finite("offset", self.offset)?;
        Ok(())
    }

    /// True when the frequency is at or above half the sampling rate and the
    /// sampled output will alias.
    pub fn is_undersampled(&self) -> bool {
        self.frequency >= self.samples_per_second as f64 / 2.0
    }

    pub fn synthesize(&self) -> Result<Waveform> {
        self.validate()?;
        let count = sample_count(self.duration, self.samples_per_second)?;
        let sps = self.samples_per_second as f64;

        if self.is_undersampled() {
            log::warn!(
                "sine at {} Hz is at or above Nyquist for {} sps, output will alias",
                self.frequency,
                self.samples_per_second
            );
        }

        let samples = (0..count)
            .map(|i| self.offset + self.amplitude * (2.0 * PI * self.frequency * (i as f64 / sps)).sin())
            .collect::<Vec<f64>>();

        log::debug!(
            "sine: {} samples at {} sps, {} Hz, {} V around {} V",
            count,
            self.samples_per_second,
            self.frequency,
            self.amplitude,
            self.offset
        );
        Ok(Waveform::from_samples(samples, self.samples_per_second))
    }
}

impl Default for SineConfig {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Build `duration` seconds of `offset + amplitude * sin(2π f t)`.
pub fn create_sine_wave(
    duration: f64,
    frequency: f64,
    amplitude: f64,
    offset: f64,
    samples_per_second: u32,
) -> Result<Waveform> {
    SineConfig::new(duration, frequency, amplitude)
        .with_offset(offset)
        .with_samples_per_second(samples_per_second)
        .synthesize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undersampled_threshold() {
        assert!(!SineConfig::new(1.0, 499.0, 1.0).is_undersampled());
        assert!(SineConfig::new(1.0, 500.0, 1.0).is_undersampled());
    }

    #[test]
    fn test_zero_frequency_is_constant_offset() {
        let wave = SineConfig::new(0.1, 0.0, 2.0).with_offset(1.5).synthesize().unwrap();
        assert_eq!(wave.len(), 100);
        assert!(wave.iter().all(|&v| v == 1.5));
    }

    #[test]
    fn test_invalid_frequency() {
        assert!(SineConfig::new(1.0, -1.0, 1.0).validate().is_err());
        assert!(SineConfig::new(1.0, f64::NAN, 1.0).validate().is_err());
        assert!(SineConfig::new(1.0, f64::INFINITY, 1.0).validate().is_err());
    }
}
