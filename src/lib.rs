//! Custom waveform synthesis for a four-channel stimulation pulse generator.
//!
//! Physical parameters (duration, ramp times, frequency, amplitude, sampling
//! rate) become an ordered sequence of voltage samples that the device stores
//! in one of its two custom train slots and plays back one sample per
//! `sample_width` seconds.
//!
//! ```
//! use stimwave::device::{load_custom_train, CustomTrainSlot, InMemoryDevice, OutputChannel};
//! use stimwave::gen::create_square_pulse_with_ramps;
//!
//! let pulse = create_square_pulse_with_ramps(3.0, 0.1, 0.1, 5.0, 1000)?;
//! assert_eq!(pulse.len(), 3000);
//!
//! let mut device = InMemoryDevice::new();
//! let channels = [OutputChannel::new(3)?, OutputChannel::new(4)?];
//! load_custom_train(&mut device, CustomTrainSlot::One, &channels, &pulse)?;
//! # Ok::<(), stimwave::Error>(())
//! ```

pub mod device;
pub mod error;
pub mod gen;
pub mod utils;

// Offline WAV export (hound)
#[cfg(feature = "bounce")]
pub mod bounce;

// Spectral checks (rustfft)
#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::{Error, Result};
pub use gen::{
    create_sine_wave, create_square_pulse_with_ramps, RampedPulseConfig, SineConfig, Waveform,
    WaveformShape, DEFAULT_SAMPLES_PER_SECOND,
};
