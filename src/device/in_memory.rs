use super::{
    CustomTrainSlot, DeviceControl, OutputChannel, OutputParam, TriggerChannel, TriggerMode,
    TriggerParam, CUSTOM_TRAIN_SLOTS, DEFAULT_MAX_CUSTOM_SAMPLES,
};
use crate::error::Error;
use std::collections::HashMap;

/// Contents of one custom train slot.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomTrain {
    pub sample_width: f64,
    pub samples: Vec<f64>,
}

/// Device that keeps everything it is sent in memory.
///
/// Useful as a dry run before talking to hardware. Like the real device it
/// refuses custom trains larger than its memory.
#[derive(Debug)]
pub struct InMemoryDevice {
    slots: [Option<CustomTrain>; CUSTOM_TRAIN_SLOTS],
    params: HashMap<(OutputChannel, OutputParam), f64>,
    trigger_params: HashMap<(TriggerChannel, TriggerParam), f64>,
    ramp_enabled: HashMap<OutputChannel, bool>,
    ramp_duration: HashMap<OutputChannel, f64>,
    max_custom_samples: usize,
    uploads: usize,
}

impl InMemoryDevice {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CUSTOM_SAMPLES)
    }

    pub fn with_capacity(max_custom_samples: usize) -> Self {
        Self {
            slots: [None, None],
            params: HashMap::new(),
            trigger_params: HashMap::new(),
            ramp_enabled: HashMap::new(),
            ramp_duration: HashMap::new(),
            max_custom_samples,
            uploads: 0,
        }
    }

    pub fn custom_train(&self, slot: CustomTrainSlot) -> Option<&CustomTrain> {
        self.slots[slot.index()].as_ref()
    }

    pub fn output_param(&self, channel: OutputChannel, param: OutputParam) -> Option<f64> {
        self.params.get(&(channel, param)).copied()
    }

    pub fn trigger_param(&self, channel: TriggerChannel, param: TriggerParam) -> Option<f64> {
        self.trigger_params.get(&(channel, param)).copied()
    }

    pub fn trigger_mode(&self, channel: TriggerChannel) -> Option<TriggerMode> {
        self.trigger_param(channel, TriggerParam::TriggerMode)
            .and_then(|code| TriggerMode::try_from(code as u8).ok())
    }

    pub fn ramp_enabled(&self, channel: OutputChannel) -> Option<bool> {
        self.ramp_enabled.get(&channel).copied()
    }

    pub fn ramp_duration(&self, channel: OutputChannel) -> Option<f64> {
        self.ramp_duration.get(&channel).copied()
    }

    /// Number of successful custom train transfers
    pub fn upload_count(&self) -> usize {
        self.uploads
    }
}

impl Default for InMemoryDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceControl for InMemoryDevice {
    fn send_custom_waveform(
        &mut self,
        slot: CustomTrainSlot,
        sample_width: f64,
        samples: &[f64],
    ) -> anyhow::Result<()> {
        if samples.len() > self.max_custom_samples {
            return Err(Error::CapacityExceeded {
                len: samples.len(),
                max: self.max_custom_samples,
            }
            .into());
        }
        if !(sample_width.is_finite() && sample_width > 0.0) {
            anyhow::bail!("sample width must be a positive number of seconds, got {}", sample_width);
        }

        self.slots[slot.index()] = Some(CustomTrain {
            sample_width,
            samples: samples.to_vec(),
        });
        self.uploads += 1;
        log::debug!("{}: stored {} samples", slot, samples.len());
        Ok(())
    }

    fn program_output_channel_param(
        &mut self,
        param: OutputParam,
        channel: OutputChannel,
        value: f64,
    ) -> anyhow::Result<()> {
        if !value.is_finite() {
            anyhow::bail!("{} on {} must be finite, got {}", param, channel, value);
        }
        self.params.insert((channel, param), value);
        log::debug!("{}: {} = {}", channel, param, value);
        Ok(())
    }

    fn program_trigger_channel_param(
        &mut self,
        param: TriggerParam,
        channel: TriggerChannel,
        value: f64,
    ) -> anyhow::Result<()> {
        match param {
            TriggerParam::TriggerMode => {
                if value.fract() != 0.0 || !(0.0..=2.0).contains(&value) {
                    anyhow::bail!("{} on {} must be 0, 1 or 2, got {}", param, channel, value);
                }
            }
        }
        self.trigger_params.insert((channel, param), value);
        log::debug!("{}: {} = {}", channel, param, value);
        Ok(())
    }

    fn set_ramp_enabled(&mut self, channel: OutputChannel, enabled: bool) -> anyhow::Result<()> {
        self.ramp_enabled.insert(channel, enabled);
        log::debug!("{}: ramp enabled = {}", channel, enabled);
        Ok(())
    }

    fn set_ramp_duration(&mut self, channel: OutputChannel, seconds: f64) -> anyhow::Result<()> {
        if !(seconds.is_finite() && seconds >= 0.0) {
            anyhow::bail!("ramp duration on {} must be a non-negative number of seconds, got {}", channel, seconds);
        }
        self.ramp_duration.insert(channel, seconds);
        log::debug!("{}: ramp duration = {} s", channel, seconds);
        Ok(())
    }

    fn max_custom_samples(&self) -> usize {
        self.max_custom_samples
    }
}
