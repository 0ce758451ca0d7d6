use crate::channels::MixerChannel;
use crate::controller::DeviceController;
use crate::device::base::ControlTransport;
use crate::device::libusb::DuetUSB;
use crate::error::{InvalidValueError, Result};
use crate::input::Input;
use crate::output::Output;
use duet_types::{ChannelType, InputType, OutputSource, SoftwareReturnSource, SpeakerOutputType};
use log::info;
use rusb::GlobalContext;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::time::Duration;

pub const INPUT_COUNT: usize = 2;
pub const OUTPUT_COUNT: usize = 2;

/// The mixer strips in index order: both analog inputs, the software return, then the master.
pub const MIXER_LAYOUT: [ChannelType; 4] = [
    ChannelType::Input,
    ChannelType::Input,
    ChannelType::SoftwareReturn,
    ChannelType::Master,
];

/// A copy of every cached value, for handing to something that draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DuetState {
    pub inputs: [Input; INPUT_COUNT],
    pub outputs: [Output; OUTPUT_COUNT],
    pub mixer: [MixerChannel; MIXER_LAYOUT.len()],
}

/// An Apogee Duet with its complete state read out. Every mutator goes to the device first
/// and only touches the cached value once the device has accepted it.
pub struct Duet<T: ControlTransport> {
    device: DeviceController<T>,
    state: DuetState,
}

impl Duet<DuetUSB<GlobalContext>> {
    pub fn open() -> Result<Self> {
        Self::from_transport(DuetUSB::open()?)
    }

    pub fn open_with_timeout(timeout: Duration) -> Result<Self> {
        Self::from_transport(DuetUSB::open_with_timeout(timeout)?)
    }
}

impl<T: ControlTransport> Duet<T> {
    pub fn from_transport(transport: T) -> Result<Self> {
        let mut device = DeviceController::new(transport);
        let state = Self::read_state(&mut device)?;
        Ok(Self { device, state })
    }

    fn read_state(device: &mut DeviceController<T>) -> Result<DuetState> {
        let inputs = [Input::load(device, 0)?, Input::load(device, 1)?];
        let outputs = [Output::load(device, 0)?, Output::load(device, 1)?];
        let mixer = [
            MixerChannel::load(device, 0, MIXER_LAYOUT[0])?,
            MixerChannel::load(device, 1, MIXER_LAYOUT[1])?,
            MixerChannel::load(device, 2, MIXER_LAYOUT[2])?,
            MixerChannel::load(device, 3, MIXER_LAYOUT[3])?,
        ];

        info!(
            "Loaded state of {} inputs, {} outputs and {} mixer channels",
            inputs.len(),
            outputs.len(),
            mixer.len()
        );
        Ok(DuetState {
            inputs,
            outputs,
            mixer,
        })
    }

    /// Re-reads everything from the device. Nothing changed by another application shows up
    /// until this is called.
    pub fn refresh(&mut self) -> Result<()> {
        self.state = Self::read_state(&mut self.device)?;
        Ok(())
    }

    pub fn state(&self) -> &DuetState {
        &self.state
    }

    pub fn inputs(&self) -> &[Input] {
        &self.state.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.state.outputs
    }

    pub fn mixer_channels(&self) -> &[MixerChannel] {
        &self.state.mixer
    }

    pub fn transport(&self) -> &T {
        self.device.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.device.transport_mut()
    }

    // Each helper hands out the entity and the controller as separate borrows, so the entity
    // can drive the device and update its own cache in one go.

    fn with_input<R>(
        &mut self,
        index: usize,
        action: impl FnOnce(&mut Input, &mut DeviceController<T>) -> Result<R>,
    ) -> Result<R> {
        let input = self
            .state
            .inputs
            .get_mut(index)
            .ok_or(InvalidValueError::NoSuchEntity { kind: "input", index })?;
        action(input, &mut self.device)
    }

    fn with_output<R>(
        &mut self,
        index: usize,
        action: impl FnOnce(&mut Output, &mut DeviceController<T>) -> Result<R>,
    ) -> Result<R> {
        let output = self
            .state
            .outputs
            .get_mut(index)
            .ok_or(InvalidValueError::NoSuchEntity { kind: "output", index })?;
        action(output, &mut self.device)
    }

    fn with_channel<R>(
        &mut self,
        index: usize,
        action: impl FnOnce(&mut MixerChannel, &mut DeviceController<T>) -> Result<R>,
    ) -> Result<R> {
        let channel = self.state.mixer.get_mut(index).ok_or(InvalidValueError::NoSuchEntity {
            kind: "mixer channel",
            index,
        })?;
        action(channel, &mut self.device)
    }

    // Inputs

    pub fn set_input_type(&mut self, index: usize, new_type: InputType) -> Result<()> {
        self.device
            .set_input_type(&mut self.state.inputs, index, new_type)
    }

    pub fn toggle_input_group(&mut self, index: usize) -> Result<()> {
        let new_state = !self.with_input(index, |input, _| Ok(input.group()))?;
        self.device
            .set_group_state(&mut self.state.inputs, new_state)
    }

    pub fn set_input_level(&mut self, index: usize, level: u8) -> Result<()> {
        self.with_input(index, |input, device| input.set_level(device, level))
    }

    pub fn toggle_phantom_power(&mut self, index: usize) -> Result<()> {
        self.with_input(index, |input, device| input.toggle_phantom_power(device))
    }

    pub fn toggle_phase(&mut self, index: usize) -> Result<()> {
        self.with_input(index, |input, device| input.toggle_phase(device))
    }

    pub fn toggle_soft_limit(&mut self, index: usize) -> Result<()> {
        self.with_input(index, |input, device| input.toggle_soft_limit(device))
    }

    // Outputs

    pub fn set_output_level(&mut self, index: usize, level: i8) -> Result<()> {
        self.with_output(index, |output, device| output.set_level(device, level))
    }

    pub fn set_output_source(&mut self, index: usize, source: OutputSource) -> Result<()> {
        self.with_output(index, |output, device| output.set_source(device, source))
    }

    pub fn set_speaker_output_type(
        &mut self,
        index: usize,
        new_type: SpeakerOutputType,
    ) -> Result<()> {
        self.with_output(index, |output, device| output.set_speaker_output_type(device, new_type))
    }

    pub fn toggle_output_mute(&mut self, index: usize) -> Result<()> {
        self.with_output(index, |output, device| output.toggle_mute(device))
    }

    pub fn toggle_dim(&mut self, index: usize) -> Result<()> {
        self.with_output(index, |output, device| output.toggle_dim(device))
    }

    pub fn toggle_mono(&mut self, index: usize) -> Result<()> {
        self.with_output(index, |output, device| output.toggle_mono(device))
    }

    // Mixer

    pub fn set_channel_level(&mut self, index: usize, level: i8) -> Result<()> {
        self.with_channel(index, |channel, device| channel.set_level(device, level))
    }

    pub fn set_pan(&mut self, index: usize, pan: i8) -> Result<()> {
        self.with_channel(index, |channel, device| channel.set_pan(device, pan))
    }

    pub fn set_software_return_source(
        &mut self,
        index: usize,
        source: SoftwareReturnSource,
    ) -> Result<()> {
        self.with_channel(index, |channel, device| channel.set_source(device, source))
    }

    pub fn toggle_channel_mute(&mut self, index: usize) -> Result<()> {
        self.with_channel(index, |channel, device| channel.toggle_mute(device))
    }

    pub fn toggle_channel_solo(&mut self, index: usize) -> Result<()> {
        self.with_channel(index, |channel, device| channel.toggle_solo(device))
    }

    pub fn refresh_channel(&mut self, index: usize) -> Result<()> {
        self.with_channel(index, |channel, device| channel.refresh(device))
    }
}
