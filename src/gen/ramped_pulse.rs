//! Trapezoidal pulse: linear ramp-in, flat plateau, linear ramp-off.

use crate::error::{require_finite, require_non_negative, Error, Result};
use crate::gen::waveform::{sample_count, Waveform, DEFAULT_SAMPLES_PER_SECOND};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RampedPulseConfig {
    pub duration: f64,          // seconds
    pub ramp_in_duration: f64,  // seconds
    pub ramp_off_duration: f64, // seconds
    pub amplitude: f64,         // volts
    pub samples_per_second: u32,
}

impl RampedPulseConfig {
    pub fn new(duration: f64, ramp_in_duration: f64, ramp_off_duration: f64, amplitude: f64) -> Self {
        Self {
            duration,
            ramp_in_duration,
            ramp_off_duration,
            amplitude,
            samples_per_second: DEFAULT_SAMPLES_PER_SECOND,
        }
    }

    pub fn with_samples_per_second(mut self, samples_per_second: u32) -> Self {
        self.samples_per_second = samples_per_second;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let count = sample_count(self.duration, self.samples_per_second)?;
        require_finite("amplitude", self.amplitude)?;
        require_non_negative("ramp_in_duration", self.ramp_in_duration)?;
        require_non_negative("ramp_off_duration", self.ramp_off_duration)?;

        // Checked on the same fractional thresholds the classifier uses, so a
        // truncated sample count cannot leave the ramps overlapping.
        let ramps = RampBounds::new(self, count);
        if ramps.overlap() {
            return Err(Error::invalid(
                "ramp_off_duration",
                format!(
                    "ramps of {} s and {} s overlap in {} samples ({} s at {} sps)",
                    self.ramp_in_duration,
                    self.ramp_off_duration,
                    count,
                    self.duration,
                    self.samples_per_second
                ),
            ));
        }
        Ok(())
    }

    pub fn synthesize(&self) -> Result<Waveform> {
        self.validate()?;
        let count = sample_count(self.duration, self.samples_per_second)?;
        let ramps = RampBounds::new(self, count);

        let samples = (0..count)
            .map(|i| ramps.value_at(i, self.amplitude))
            .collect::<Vec<f64>>();

        log::debug!(
            "ramped pulse: {} samples at {} sps, {} V, ramps {}/{} s",
            count,
            self.samples_per_second,
            self.amplitude,
            self.ramp_in_duration,
            self.ramp_off_duration
        );
        Ok(Waveform::from_samples(samples, self.samples_per_second))
    }
}

impl Default for RampedPulseConfig {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }
}

/// Relative slack allowed when ramp-in end and ramp-off start coincide.
const RAMP_OVERLAP_TOLERANCE: f64 = 1e-9;

/// Which part of the trapezoid a sample index falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RampSegment {
    RampIn,
    Plateau,
    RampOff,
}

/// Ramp thresholds in (fractional) samples. Never truncated to integers.
#[derive(Clone, Copy, Debug)]
struct RampBounds {
    ramp_in_samples: f64,
    ramp_off_samples: f64,
    ramp_off_start: f64,
}

impl RampBounds {
    fn new(config: &RampedPulseConfig, count: usize) -> Self {
        let sps = config.samples_per_second as f64;
        let ramp_off_samples = config.ramp_off_duration * sps;
        Self {
            ramp_in_samples: config.ramp_in_duration * sps,
            ramp_off_samples,
            ramp_off_start: count as f64 - ramp_off_samples,
        }
    }

    // Ramp-in ending after ramp-off starts, beyond float noise in the
    // seconds-to-samples products.
    fn overlap(&self) -> bool {
        let tolerance = RAMP_OVERLAP_TOLERANCE * (self.ramp_in_samples + self.ramp_off_samples).max(1.0);
        self.ramp_in_samples - self.ramp_off_start > tolerance
    }

    // Strict comparisons: the sample sitting exactly on a threshold is plateau.
    // A zero-length ramp can therefore never be selected, which keeps the
    // divisions in value_at away from zero.
    fn segment(&self, index: usize) -> RampSegment {
        let i = index as f64;
        if i < self.ramp_in_samples {
            RampSegment::RampIn
        } else if i > self.ramp_off_start {
            RampSegment::RampOff
        } else {
            RampSegment::Plateau
        }
    }

    fn value_at(&self, index: usize, amplitude: f64) -> f64 {
        let i = index as f64;
        match self.segment(index) {
            RampSegment::RampIn => i * amplitude / self.ramp_in_samples,
            RampSegment::RampOff => {
                amplitude - (i - self.ramp_off_start) * amplitude / self.ramp_off_samples
            }
            RampSegment::Plateau => amplitude,
        }
    }
}

/// Classify every sample index of the pulse described by `config`.
pub fn ramp_segments(config: &RampedPulseConfig) -> Result<Vec<RampSegment>> {
    config.validate()?;
    let count = sample_count(config.duration, config.samples_per_second)?;
    let ramps = RampBounds::new(config, count);
    Ok((0..count).map(|i| ramps.segment(i)).collect())
}

/// Build a trapezoidal pulse of `duration` seconds rising over
/// `ramp_in_duration`, holding `amplitude`, and falling over
/// `ramp_off_duration`.
pub fn create_square_pulse_with_ramps(
    duration: f64,
    ramp_in_duration: f64,
    ramp_off_duration: f64,
    amplitude: f64,
    samples_per_second: u32,
) -> Result<Waveform> {
    RampedPulseConfig::new(duration, ramp_in_duration, ramp_off_duration, amplitude)
        .with_samples_per_second(samples_per_second)
        .synthesize()
}
