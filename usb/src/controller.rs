use crate::commands::{GainStage, InputRequest, MixerRequest, OutputRequest, Request};
use crate::device::base::ControlTransport;
use crate::error::{DuetError, InvalidValueError, Result};
use crate::input::Input;
use duet_types::{InputType, OutputSource, SoftwareReturnSource, SpeakerOutputType, State};
use log::{debug, warn};

// Both speaker channels share one line level setting, the device exposes it on two indexes
// which always have to agree. Reads only ever look at the first.
const SPEAKER_TYPE_INDEXES: [u16; 2] = [0, 1];

/// Translates reads and writes of individual features into control transfers. Holds the
/// transport and nothing else, the entities hold the last known values.
pub struct DeviceController<T: ControlTransport> {
    transport: T,
}

impl<T: ControlTransport> DeviceController<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn read(&mut self, request: Request, index: u16) -> Result<u8> {
        self.transport
            .read_byte(request.code(), index)
            .map_err(|source| DuetError::Communication {
                request,
                index,
                source,
            })
    }

    fn write(&mut self, request: Request, index: u16, value: u8) -> Result<()> {
        self.transport
            .write_byte(request.code(), index, value)
            .map_err(|source| DuetError::Communication {
                request,
                index,
                source,
            })
    }

    fn write_value(&mut self, request: Request, index: u16, value: i16) -> Result<()> {
        let wire = request.encoding().encode(value).ok_or(
            InvalidValueError::OutOfRange {
                field: "wire value",
                value,
                min: i16::from(u8::MIN),
                max: i16::from(u8::MAX),
            },
        )?;
        self.write(request, index, wire)
    }

    fn read_enum<E>(
        &mut self,
        request: Request,
        index: u16,
        from_repr: fn(u8) -> Option<E>,
    ) -> Result<E> {
        let value = self.read(request, index)?;
        from_repr(value).ok_or_else(|| {
            InvalidValueError::Undefined {
                request,
                index,
                value,
            }
            .into()
        })
    }

    fn read_state(&mut self, request: Request, index: u16) -> Result<State> {
        self.read_enum(request, index, State::from_repr)
    }

    fn write_state(&mut self, request: Request, index: u16, state: State) -> Result<()> {
        self.write(request, index, state as u8)
    }

    // Inputs

    pub fn get_input_type(&mut self, index: u16) -> Result<InputType> {
        self.read_enum(Request::Input(InputRequest::Type), index, InputType::from_repr)
    }

    /// Changes the type of one input. Grouping is switched off on every input first, as the
    /// device can't hold a group across inputs of different types. If that fails the type is
    /// left alone. The new type's level and phantom power are read before anything is written,
    /// so the input's cache only ever moves to a complete set of values.
    pub fn set_input_type(
        &mut self,
        inputs: &mut [Input],
        target: usize,
        new_type: InputType,
    ) -> Result<()> {
        let index = inputs
            .get(target)
            .map(Input::index)
            .ok_or(InvalidValueError::NoSuchEntity {
                kind: "input",
                index: target,
            })?;

        let (level, phantom_power) = Input::read_type_dependent(self, index, new_type)?;

        if inputs.iter().any(|input| input.group().is_enabled()) {
            warn!(
                "Inputs are grouped, ungrouping before changing type of input {}",
                index + 1
            );
        }
        self.set_group_state(inputs, State::Disabled)?;

        self.write(Request::Input(InputRequest::Type), index, new_type as u8)?;
        debug!("Input {} type is now {}", index + 1, new_type);

        let input = &mut inputs[target];
        input.input_type = new_type;
        input.level = level;
        input.phantom_power = phantom_power;
        Ok(())
    }

    pub fn get_input_level(&mut self, index: u16, stage: GainStage) -> Result<u8> {
        let request = Request::Input(InputRequest::Level(stage));
        self.read(request, index)
    }

    pub fn set_input_level(&mut self, index: u16, stage: GainStage, level: u8) -> Result<()> {
        let request = Request::Input(InputRequest::Level(stage));
        self.write(request, index, level)
    }

    pub fn get_group_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Input(InputRequest::Group), index)
    }

    /// Grouping is a property of the input pair, so the state is written to every input and
    /// every input's cache follows, whichever input asked for it.
    pub fn set_group_state(&mut self, inputs: &mut [Input], state: State) -> Result<()> {
        for input in inputs.iter_mut() {
            self.write_state(Request::Input(InputRequest::Group), input.index(), state)?;
            input.group = state;
        }
        Ok(())
    }

    pub fn get_soft_limit_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Input(InputRequest::SoftLimit), index)
    }

    pub fn set_soft_limit_state(&mut self, index: u16, state: State) -> Result<()> {
        self.write_state(Request::Input(InputRequest::SoftLimit), index, state)
    }

    pub fn get_phase_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Input(InputRequest::Phase), index)
    }

    pub fn set_phase_state(&mut self, index: u16, state: State) -> Result<()> {
        self.write_state(Request::Input(InputRequest::Phase), index, state)
    }

    pub fn get_phantom_power_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Input(InputRequest::PhantomPower), index)
    }

    pub fn set_phantom_power_state(&mut self, index: u16, state: State) -> Result<()> {
        self.write_state(Request::Input(InputRequest::PhantomPower), index, state)
    }

    // Outputs

    pub fn get_output_level(&mut self, index: u16) -> Result<i8> {
        self.read_small_value(Request::Output(OutputRequest::Level), index)
    }

    pub fn set_output_level(&mut self, index: u16, level: i8) -> Result<()> {
        self.write_value(Request::Output(OutputRequest::Level), index, i16::from(level))
    }

    pub fn get_mute_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Output(OutputRequest::Mute), index)
    }

    pub fn set_mute_state(&mut self, index: u16, state: State) -> Result<()> {
        self.write_state(Request::Output(OutputRequest::Mute), index, state)
    }

    pub fn get_dim_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Output(OutputRequest::Dim), index)
    }

    pub fn set_dim_state(&mut self, index: u16, state: State) -> Result<()> {
        self.write_state(Request::Output(OutputRequest::Dim), index, state)
    }

    pub fn get_mono_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Output(OutputRequest::SumToMono), index)
    }

    pub fn set_mono_state(&mut self, index: u16, state: State) -> Result<()> {
        self.write_state(Request::Output(OutputRequest::SumToMono), index, state)
    }

    pub fn get_output_source(&mut self, index: u16) -> Result<OutputSource> {
        self.read_enum(
            Request::Output(OutputRequest::Source),
            index,
            OutputSource::from_repr,
        )
    }

    pub fn set_output_source(&mut self, index: u16, source: OutputSource) -> Result<()> {
        self.write(Request::Output(OutputRequest::Source), index, source as u8)
    }

    pub fn get_speaker_output_type(&mut self) -> Result<SpeakerOutputType> {
        self.read_enum(
            Request::Output(OutputRequest::SpeakerOutputType),
            SPEAKER_TYPE_INDEXES[0],
            SpeakerOutputType::from_repr,
        )
    }

    /// Writes the type to both speaker indexes, stopping at the first failure.
    pub fn set_speaker_output_type(&mut self, new_type: SpeakerOutputType) -> Result<()> {
        for index in SPEAKER_TYPE_INDEXES {
            self.write(
                Request::Output(OutputRequest::SpeakerOutputType),
                index,
                new_type as u8,
            )?;
        }
        Ok(())
    }

    // Mixer

    pub fn get_channel_level(&mut self, index: u16) -> Result<i8> {
        self.read_small_value(Request::Mixer(MixerRequest::Level), index)
    }

    pub fn set_channel_level(&mut self, index: u16, level: i8) -> Result<()> {
        self.write_value(Request::Mixer(MixerRequest::Level), index, i16::from(level))
    }

    pub fn get_pan_value(&mut self, index: u16) -> Result<i8> {
        self.read_small_value(Request::Mixer(MixerRequest::Pan), index)
    }

    pub fn set_pan_value(&mut self, index: u16, pan: i8) -> Result<()> {
        self.write_value(Request::Mixer(MixerRequest::Pan), index, i16::from(pan))
    }

    pub fn get_channel_mute_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Mixer(MixerRequest::Mute), index)
    }

    pub fn set_channel_mute_state(&mut self, index: u16, state: State) -> Result<()> {
        self.write_state(Request::Mixer(MixerRequest::Mute), index, state)
    }

    pub fn get_channel_solo_state(&mut self, index: u16) -> Result<State> {
        self.read_state(Request::Mixer(MixerRequest::Solo), index)
    }

    pub fn set_channel_solo_state(&mut self, index: u16, state: State) -> Result<()> {
        self.write_state(Request::Mixer(MixerRequest::Solo), index, state)
    }

    pub fn get_software_return_source(&mut self, index: u16) -> Result<SoftwareReturnSource> {
        self.read_enum(
            Request::Mixer(MixerRequest::SoftwareReturnSource),
            index,
            SoftwareReturnSource::from_repr,
        )
    }

    pub fn set_software_return_source(
        &mut self,
        index: u16,
        source: SoftwareReturnSource,
    ) -> Result<()> {
        self.write(
            Request::Mixer(MixerRequest::SoftwareReturnSource),
            index,
            source as u8,
        )
    }

    // Decoded levels and pans all fit an i8, anything else means the device went off script.
    fn read_small_value(&mut self, request: Request, index: u16) -> Result<i8> {
        let wire = self.read(request, index)?;
        i8::try_from(request.encoding().decode(wire)).map_err(|_| {
            InvalidValueError::Undefined {
                request,
                index,
                value: wire,
            }
            .into()
        })
    }
}
