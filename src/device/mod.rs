//! Device abstraction for custom train upload
//! This module describes the parts of the pulse generator's control surface that
//! synthesized waveforms flow into: the two custom train memory slots and the
//! per-channel parameters that make an output channel play one of them.

use crate::error::{require_non_negative, Error, Result};
use crate::gen::waveform::Waveform;
use std::fmt;

pub mod in_memory;

pub use self::in_memory::{CustomTrain, InMemoryDevice};

/// Custom train memory capacity of the device, in samples.
pub const DEFAULT_MAX_CUSTOM_SAMPLES: usize = 10_000;

pub const CUSTOM_TRAIN_SLOTS: usize = 2;
pub const OUTPUT_CHANNELS: u8 = 4;
pub const TRIGGER_CHANNELS: u8 = 2;

/// Trait for a pulse generator that can store and play custom trains
pub trait DeviceControl {
    /// Copy `samples` into the given custom train slot, each held for
    /// `sample_width` seconds
    fn send_custom_waveform(
        &mut self,
        slot: CustomTrainSlot,
        sample_width: f64,
        samples: &[f64],
    ) -> anyhow::Result<()>;

    /// Set a single output channel parameter
    fn program_output_channel_param(
        &mut self,
        param: OutputParam,
        channel: OutputChannel,
        value: f64,
    ) -> anyhow::Result<()>;

    /// Set a single trigger channel parameter
    fn program_trigger_channel_param(
        &mut self,
        param: TriggerParam,
        channel: TriggerChannel,
        value: f64,
    ) -> anyhow::Result<()>;

    /// Enable or disable the ramp-down applied when playback on `channel` stops
    fn set_ramp_enabled(&mut self, channel: OutputChannel, enabled: bool) -> anyhow::Result<()>;

    /// Length in seconds of the ramp-down on `channel`
    fn set_ramp_duration(&mut self, channel: OutputChannel, seconds: f64) -> anyhow::Result<()>;

    /// Largest custom train the device memory holds
    fn max_custom_samples(&self) -> usize {
        DEFAULT_MAX_CUSTOM_SAMPLES
    }
}

/// One of the two custom train memory slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CustomTrainSlot {
    One = 1,
    Two = 2,
}

impl CustomTrainSlot {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for CustomTrainSlot {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            1 => Ok(CustomTrainSlot::One),
            2 => Ok(CustomTrainSlot::Two),
            _ => Err(Error::invalid("slot_id", format!("must be 1 or 2, got {}", id))),
        }
    }
}

impl fmt::Display for CustomTrainSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "custom train {}", self.id())
    }
}

/// Output channel index, 1 through 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputChannel(u8);

impl OutputChannel {
    pub fn new(index: u8) -> Result<Self> {
        if (1..=OUTPUT_CHANNELS).contains(&index) {
            Ok(Self(index))
        } else {
            Err(Error::invalid(
                "channel",
                format!("must be in 1..={}, got {}", OUTPUT_CHANNELS, index),
            ))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = OutputChannel> {
        (1..=OUTPUT_CHANNELS).map(OutputChannel)
    }
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output channel {}", self.0)
    }
}

/// Programmable output channel parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputParam {
    IsBiphasic,
    Phase1Voltage,
    Phase2Voltage,
    Phase1Duration,
    Phase2Duration,
    InterPhaseInterval,
    InterPulseInterval,
    BurstDuration,
    InterBurstInterval,
    PulseTrainDuration,
    PulseTrainDelay,
    CustomTrainId,
    CustomTrainTarget,
    CustomTrainLoop,
    RestingVoltage,
    LinkTriggerChannel1,
    LinkTriggerChannel2,
}

impl OutputParam {
    pub const ALL: [OutputParam; 17] = [
        OutputParam::IsBiphasic,
        OutputParam::Phase1Voltage,
        OutputParam::Phase2Voltage,
        OutputParam::Phase1Duration,
        OutputParam::Phase2Duration,
        OutputParam::InterPhaseInterval,
        OutputParam::InterPulseInterval,
        OutputParam::BurstDuration,
        OutputParam::InterBurstInterval,
        OutputParam::PulseTrainDuration,
        OutputParam::PulseTrainDelay,
        OutputParam::CustomTrainId,
        OutputParam::CustomTrainTarget,
        OutputParam::CustomTrainLoop,
        OutputParam::RestingVoltage,
        OutputParam::LinkTriggerChannel1,
        OutputParam::LinkTriggerChannel2,
    ];

    /// Name the device's control protocol uses for this parameter
    pub fn name(self) -> &'static str {
        match self {
            OutputParam::IsBiphasic => "isBiphasic",
            OutputParam::Phase1Voltage => "phase1Voltage",
            OutputParam::Phase2Voltage => "phase2Voltage",
            OutputParam::Phase1Duration => "phase1Duration",
            OutputParam::Phase2Duration => "phase2Duration",
            OutputParam::InterPhaseInterval => "interPhaseInterval",
            OutputParam::InterPulseInterval => "interPulseInterval",
            OutputParam::BurstDuration => "burstDuration",
            OutputParam::InterBurstInterval => "interBurstInterval",
            OutputParam::PulseTrainDuration => "pulseTrainDuration",
            OutputParam::PulseTrainDelay => "pulseTrainDelay",
            OutputParam::CustomTrainId => "customTrainID",
            OutputParam::CustomTrainTarget => "customTrainTarget",
            OutputParam::CustomTrainLoop => "customTrainLoop",
            OutputParam::RestingVoltage => "restingVoltage",
            OutputParam::LinkTriggerChannel1 => "linkTriggerChannel1",
            OutputParam::LinkTriggerChannel2 => "linkTriggerChannel2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|param| param.name() == name)
    }
}

impl fmt::Display for OutputParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trigger input index, 1 or 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerChannel(u8);

impl TriggerChannel {
    pub fn new(index: u8) -> Result<Self> {
        if (1..=TRIGGER_CHANNELS).contains(&index) {
            Ok(Self(index))
        } else {
            Err(Error::invalid(
                "trigger_channel",
                format!("must be in 1..={}, got {}", TRIGGER_CHANNELS, index),
            ))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = TriggerChannel> {
        (1..=TRIGGER_CHANNELS).map(TriggerChannel)
    }

    /// Output parameter that links an output channel to this trigger
    pub fn link_param(self) -> OutputParam {
        match self.0 {
            1 => OutputParam::LinkTriggerChannel1,
            _ => OutputParam::LinkTriggerChannel2,
        }
    }
}

impl fmt::Display for TriggerChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger channel {}", self.0)
    }
}

/// Programmable trigger channel parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerParam {
    TriggerMode,
}

impl TriggerParam {
    pub fn name(self) -> &'static str {
        match self {
            TriggerParam::TriggerMode => "triggerMode",
        }
    }
}

impl fmt::Display for TriggerParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a trigger input starts and stops playback on its linked channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerMode {
    /// A rising edge starts the trains; further triggers during playback are ignored
    Normal = 0,
    /// A rising edge starts the trains, another one during playback stops them
    Toggle = 1,
    /// Plays while the input is high
    PulseGated = 2,
}

impl TriggerMode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TriggerMode {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(TriggerMode::Normal),
            1 => Ok(TriggerMode::Toggle),
            2 => Ok(TriggerMode::PulseGated),
            _ => Err(Error::invalid("trigger_mode", format!("must be 0, 1 or 2, got {}", code))),
        }
    }
}

/// Store `waveform` in `slot`.
///
/// Oversized waveforms are rejected with [`Error::CapacityExceeded`] before
/// anything is sent; they are never truncated.
pub fn upload_custom_waveform<D: DeviceControl + ?Sized>(
    device: &mut D,
    slot: CustomTrainSlot,
    waveform: &Waveform,
) -> Result<()> {
    let max = device.max_custom_samples();
    if waveform.len() > max {
        log::warn!(
            "rejecting {} sample waveform for {}, device holds {}",
            waveform.len(),
            slot,
            max
        );
        return Err(Error::CapacityExceeded {
            len: waveform.len(),
            max,
        });
    }

    device
        .send_custom_waveform(slot, waveform.sample_width(), waveform.samples())
        .map_err(Error::from_device)?;
    log::info!(
        "uploaded {} samples to {} ({} s per sample)",
        waveform.len(),
        slot,
        waveform.sample_width()
    );
    Ok(())
}

/// Make `channel` play the custom train in `slot`, holding each sample for
/// the waveform's sample width.
pub fn assign_custom_train<D: DeviceControl + ?Sized>(
    device: &mut D,
    slot: CustomTrainSlot,
    channel: OutputChannel,
    waveform: &Waveform,
) -> Result<()> {
    device
        .program_output_channel_param(OutputParam::CustomTrainId, channel, slot.id() as f64)
        .map_err(Error::from_device)?;
    device
        .program_output_channel_param(OutputParam::Phase1Duration, channel, waveform.sample_width())
        .map_err(Error::from_device)?;
    log::info!("{} plays {}", channel, slot);
    Ok(())
}

/// Upload `waveform` to `slot` and assign it to every channel in `channels`.
pub fn load_custom_train<D: DeviceControl + ?Sized>(
    device: &mut D,
    slot: CustomTrainSlot,
    channels: &[OutputChannel],
    waveform: &Waveform,
) -> Result<()> {
    upload_custom_waveform(device, slot, waveform)?;
    for &channel in channels {
        assign_custom_train(device, slot, channel, waveform)?;
    }
    Ok(())
}

/// Set how `trigger` starts and stops playback.
pub fn set_trigger_mode<D: DeviceControl + ?Sized>(
    device: &mut D,
    trigger: TriggerChannel,
    mode: TriggerMode,
) -> Result<()> {
    device
        .program_trigger_channel_param(TriggerParam::TriggerMode, trigger, mode.code() as f64)
        .map_err(Error::from_device)?;
    log::info!("{} in {:?} mode", trigger, mode);
    Ok(())
}

/// Link or unlink `channel` to `trigger`.
pub fn link_trigger<D: DeviceControl + ?Sized>(
    device: &mut D,
    channel: OutputChannel,
    trigger: TriggerChannel,
    linked: bool,
) -> Result<()> {
    let value = if linked { 1.0 } else { 0.0 };
    device
        .program_output_channel_param(trigger.link_param(), channel, value)
        .map_err(Error::from_device)
}

/// Enable a ramp-down of `seconds` on `channel`, or disable it when `seconds`
/// is zero.
pub fn set_ramp_down<D: DeviceControl + ?Sized>(
    device: &mut D,
    channel: OutputChannel,
    seconds: f64,
) -> Result<()> {
    require_non_negative("ramp_duration", seconds)?;
    device
        .set_ramp_enabled(channel, seconds > 0.0)
        .map_err(Error::from_device)?;
    device
        .set_ramp_duration(channel, seconds)
        .map_err(Error::from_device)
}

/// Zero every output parameter and disable ramp-down on all four channels.
///
/// Values left in device memory by an earlier session otherwise persist into
/// the new configuration.
pub fn clear_output_channels<D: DeviceControl + ?Sized>(device: &mut D) -> Result<()> {
    for channel in OutputChannel::all() {
        for param in OutputParam::ALL {
            device
                .program_output_channel_param(param, channel, 0.0)
                .map_err(Error::from_device)?;
        }
        device
            .set_ramp_enabled(channel, false)
            .map_err(Error::from_device)?;
        device
            .set_ramp_duration(channel, 0.0)
            .map_err(Error::from_device)?;
    }
    log::info!("cleared all output channels");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_id() {
        assert_eq!(CustomTrainSlot::try_from(1).unwrap(), CustomTrainSlot::One);
        assert_eq!(CustomTrainSlot::try_from(2).unwrap(), CustomTrainSlot::Two);
        assert!(CustomTrainSlot::try_from(0).is_err());
        assert!(CustomTrainSlot::try_from(3).is_err());
    }

    #[test]
    fn test_channel_range() {
        assert!(OutputChannel::new(0).is_err());
        assert!(OutputChannel::new(5).is_err());
        assert_eq!(OutputChannel::new(4).unwrap().index(), 4);
        assert_eq!(OutputChannel::all().count(), 4);
    }

    #[test]
    fn test_param_names_round_trip() {
        for param in OutputParam::ALL {
            assert_eq!(OutputParam::from_name(param.name()), Some(param));
        }
        assert_eq!(OutputParam::CustomTrainId.name(), "customTrainID");
        assert_eq!(OutputParam::from_name("triggerMode"), None);
    }

    #[test]
    fn test_trigger_channel_range() {
        assert!(TriggerChannel::new(0).is_err());
        assert!(TriggerChannel::new(3).is_err());
        assert_eq!(TriggerChannel::all().count(), 2);
        assert_eq!(TriggerChannel::new(2).unwrap().link_param(), OutputParam::LinkTriggerChannel2);
    }

    #[test]
    fn test_trigger_mode_codes() {
        assert_eq!(TriggerMode::Normal.code(), 0);
        assert_eq!(TriggerMode::Toggle.code(), 1);
        assert_eq!(TriggerMode::PulseGated.code(), 2);
        assert_eq!(TriggerMode::try_from(2).unwrap(), TriggerMode::PulseGated);
        assert!(TriggerMode::try_from(3).is_err());
    }
}
