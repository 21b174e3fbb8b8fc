use crate::error::Result;
use crate::gen::ramped_pulse::RampedPulseConfig;
use crate::gen::sine::SineConfig;
use crate::gen::waveform::Waveform;

/// Waveform shapes that can be synthesized into a custom train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveformShape {
    RampedPulse(RampedPulseConfig),
    Sine(SineConfig),
}

impl WaveformShape {
    pub fn synthesize(&self) -> Result<Waveform> {
        match self {
            WaveformShape::RampedPulse(config) => config.synthesize(),
            WaveformShape::Sine(config) => config.synthesize(),
        }
    }

    pub fn samples_per_second(&self) -> u32 {
        match self {
            WaveformShape::RampedPulse(config) => config.samples_per_second,
            WaveformShape::Sine(config) => config.samples_per_second,
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            WaveformShape::RampedPulse(config) => config.duration,
            WaveformShape::Sine(config) => config.duration,
        }
    }
}

impl From<RampedPulseConfig> for WaveformShape {
    fn from(config: RampedPulseConfig) -> Self {
        WaveformShape::RampedPulse(config)
    }
}

impl From<SineConfig> for WaveformShape {
    fn from(config: SineConfig) -> Self {
        WaveformShape::Sine(config)
    }
}
