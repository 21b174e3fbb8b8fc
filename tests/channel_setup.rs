// Integration tests for trigger, ramp-down and channel reset programming

use stimwave::device::{
    clear_output_channels, link_trigger, load_custom_train, set_ramp_down, set_trigger_mode,
    CustomTrainSlot, DeviceControl, InMemoryDevice, OutputChannel, OutputParam, TriggerChannel,
    TriggerMode, TriggerParam,
};
use stimwave::create_square_pulse_with_ramps;

#[test]
fn test_trigger_modes() {
    let mut device = InMemoryDevice::new();
    let trigger1 = TriggerChannel::new(1).unwrap();
    let trigger2 = TriggerChannel::new(2).unwrap();

    set_trigger_mode(&mut device, trigger1, TriggerMode::PulseGated).unwrap();
    set_trigger_mode(&mut device, trigger2, TriggerMode::Normal).unwrap();

    assert_eq!(device.trigger_mode(trigger1), Some(TriggerMode::PulseGated));
    assert_eq!(device.trigger_param(trigger1, TriggerParam::TriggerMode), Some(2.0));
    assert_eq!(device.trigger_mode(trigger2), Some(TriggerMode::Normal));

    set_trigger_mode(&mut device, trigger2, TriggerMode::Toggle).unwrap();
    assert_eq!(device.trigger_mode(trigger2), Some(TriggerMode::Toggle));
}

#[test]
fn test_link_trigger_sets_matching_param() {
    let mut device = InMemoryDevice::new();
    let channel = OutputChannel::new(3).unwrap();

    link_trigger(&mut device, channel, TriggerChannel::new(2).unwrap(), true).unwrap();
    assert_eq!(device.output_param(channel, OutputParam::LinkTriggerChannel2), Some(1.0));
    assert_eq!(device.output_param(channel, OutputParam::LinkTriggerChannel1), None);

    link_trigger(&mut device, channel, TriggerChannel::new(2).unwrap(), false).unwrap();
    assert_eq!(device.output_param(channel, OutputParam::LinkTriggerChannel2), Some(0.0));
}

#[test]
fn test_ramp_down_enable_and_disable() {
    let mut device = InMemoryDevice::new();
    let channel = OutputChannel::new(1).unwrap();

    set_ramp_down(&mut device, channel, 0.1).unwrap();
    assert_eq!(device.ramp_enabled(channel), Some(true));
    assert_eq!(device.ramp_duration(channel), Some(0.1));

    set_ramp_down(&mut device, channel, 0.0).unwrap();
    assert_eq!(device.ramp_enabled(channel), Some(false));
    assert_eq!(device.ramp_duration(channel), Some(0.0));

    let err = set_ramp_down(&mut device, channel, -0.5).unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[test]
fn test_direct_ramp_calls() {
    let mut device = InMemoryDevice::new();
    let channel = OutputChannel::new(4).unwrap();

    device.set_ramp_enabled(channel, true).unwrap();
    device.set_ramp_duration(channel, 0.5).unwrap();

    assert_eq!(device.ramp_enabled(channel), Some(true));
    assert_eq!(device.ramp_duration(channel), Some(0.5));
    assert_eq!(device.ramp_enabled(OutputChannel::new(1).unwrap()), None);
}

#[test]
fn test_clear_resets_every_channel() {
    let mut device = InMemoryDevice::new();
    let pulse = create_square_pulse_with_ramps(1.0, 0.1, 0.1, 5.0, 1000).unwrap();
    let channel = OutputChannel::new(2).unwrap();

    load_custom_train(&mut device, CustomTrainSlot::One, &[channel], &pulse).unwrap();
    set_ramp_down(&mut device, channel, 0.5).unwrap();

    clear_output_channels(&mut device).unwrap();

    for channel in OutputChannel::all() {
        for param in OutputParam::ALL {
            assert_eq!(
                device.output_param(channel, param),
                Some(0.0),
                "{} on {} should be cleared",
                param,
                channel
            );
        }
        assert_eq!(device.ramp_enabled(channel), Some(false));
        assert_eq!(device.ramp_duration(channel), Some(0.0));
    }

    // Stored custom trains are untouched by a channel reset
    assert!(device.custom_train(CustomTrainSlot::One).is_some());
}
