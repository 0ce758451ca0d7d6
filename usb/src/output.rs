use crate::controller::DeviceController;
use crate::device::base::ControlTransport;
use crate::error::{check_range, InvalidValueError, Result};
use duet_types::{OutputSource, OutputType, SpeakerOutputType, State};
#[cfg(feature = "serde")]
use serde::Serialize;

pub const OUTPUT_LEVEL_MIN: i8 = -64;
pub const OUTPUT_LEVEL_MAX: i8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Output {
    pub(crate) index: u16,
    pub(crate) output_type: OutputType,
    pub(crate) speaker_output_type: Option<SpeakerOutputType>,
    pub(crate) mute: State,
    pub(crate) dim: State,
    pub(crate) mono: State,
    pub(crate) level: i8,
    pub(crate) source: OutputSource,
}

impl Output {
    pub fn load<T: ControlTransport>(device: &mut DeviceController<T>, index: u16) -> Result<Self> {
        // There's no register for this, the index alone decides what's plugged where.
        let output_type = u8::try_from(index)
            .ok()
            .and_then(OutputType::from_repr)
            .ok_or(InvalidValueError::NoSuchEntity {
                kind: "output",
                index: usize::from(index),
            })?;

        let speaker_output_type = match output_type {
            OutputType::Speakers => Some(device.get_speaker_output_type()?),
            OutputType::Headphones => None,
        };

        let mute = device.get_mute_state(index)?;
        let dim = device.get_dim_state(index)?;
        let mono = device.get_mono_state(index)?;
        let level = device.get_output_level(index)?;
        check_range("output level", level, OUTPUT_LEVEL_MIN, OUTPUT_LEVEL_MAX)?;

        Ok(Self {
            index,
            output_type,
            speaker_output_type,
            mute,
            dim,
            mono,
            level,
            source: device.get_output_source(index)?,
        })
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    /// Only the speakers have a line level setting.
    pub fn speaker_output_type(&self) -> Option<SpeakerOutputType> {
        self.speaker_output_type
    }

    pub fn mute(&self) -> State {
        self.mute
    }

    pub fn dim(&self) -> State {
        self.dim
    }

    pub fn mono(&self) -> State {
        self.mono
    }

    pub fn level(&self) -> i8 {
        self.level
    }

    pub fn source(&self) -> OutputSource {
        self.source
    }

    pub fn set_level<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
        level: i8,
    ) -> Result<()> {
        check_range("output level", level, OUTPUT_LEVEL_MIN, OUTPUT_LEVEL_MAX)?;
        device.set_output_level(self.index, level)?;
        self.level = level;
        Ok(())
    }

    pub fn set_source<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
        source: OutputSource,
    ) -> Result<()> {
        device.set_output_source(self.index, source)?;
        self.source = source;
        Ok(())
    }

    pub fn set_speaker_output_type<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
        new_type: SpeakerOutputType,
    ) -> Result<()> {
        if self.output_type != OutputType::Speakers {
            return Err(InvalidValueError::NotSpeakers(self.output_type).into());
        }

        device.set_speaker_output_type(new_type)?;
        self.speaker_output_type = Some(new_type);
        Ok(())
    }

    pub fn toggle_mute<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
    ) -> Result<()> {
        let new_state = !self.mute;
        device.set_mute_state(self.index, new_state)?;
        self.mute = new_state;
        Ok(())
    }

    pub fn toggle_dim<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
    ) -> Result<()> {
        let new_state = !self.dim;
        device.set_dim_state(self.index, new_state)?;
        self.dim = new_state;
        Ok(())
    }

    pub fn toggle_mono<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
    ) -> Result<()> {
        let new_state = !self.mono;
        device.set_mono_state(self.index, new_state)?;
        self.mono = new_state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::MockTransport;
    use crate::error::DuetError;

    fn speakers() -> (DeviceController<MockTransport>, Output) {
        let transport = MockTransport::new()
            .with_register(182, 0, 1)
            .with_register(51, 0, 20)
            .with_register(83, 0, 2)
            .with_register(64, 0, 1);
        let mut device = DeviceController::new(transport);
        let output = Output::load(&mut device, 0).unwrap();
        (device, output)
    }

    #[test]
    fn loads_speakers() {
        let (_, output) = speakers();
        assert_eq!(output.output_type(), OutputType::Speakers);
        assert_eq!(output.speaker_output_type(), Some(SpeakerOutputType::LineMinus10dBV));
        assert_eq!(output.level(), -20);
        assert_eq!(output.source(), OutputSource::Mixer);
        assert_eq!(output.dim(), State::Enabled);
        assert_eq!(output.mute(), State::Disabled);
    }

    #[test]
    fn headphones_never_read_speaker_type() {
        let mut device = DeviceController::new(MockTransport::new());
        let output = Output::load(&mut device, 1).unwrap();
        assert_eq!(output.output_type(), OutputType::Headphones);
        assert_eq!(output.speaker_output_type(), None);
        assert!(device.transport().reads.iter().all(|(request, _)| *request != 182));
    }

    #[test]
    fn level_is_written_negated() {
        let (mut device, mut output) = speakers();
        output.set_level(&mut device, -5).unwrap();
        assert_eq!(device.transport().writes, vec![(51, 0, 5)]);
        assert_eq!(output.level(), -5);
    }

    #[test]
    fn positive_level_is_rejected() {
        let (mut device, mut output) = speakers();
        assert!(matches!(
            output.set_level(&mut device, 1),
            Err(DuetError::InvalidValue(InvalidValueError::OutOfRange { .. }))
        ));
        assert!(output.set_level(&mut device, -65).is_err());
        assert!(device.transport().writes.is_empty());
        assert_eq!(output.level(), -20);
    }

    #[test]
    fn speaker_type_only_on_speakers() {
        let mut device = DeviceController::new(MockTransport::new());
        let mut headphones = Output::load(&mut device, 1).unwrap();
        assert!(matches!(
            headphones.set_speaker_output_type(&mut device, SpeakerOutputType::LinePlus4dBu),
            Err(DuetError::InvalidValue(InvalidValueError::NotSpeakers(
                OutputType::Headphones
            )))
        ));
        assert!(device.transport().writes.is_empty());
    }

    #[test]
    fn toggles_and_source() {
        let (mut device, mut output) = speakers();
        output.toggle_mute(&mut device).unwrap();
        output.toggle_dim(&mut device).unwrap();
        output.toggle_mono(&mut device).unwrap();
        output.set_source(&mut device, OutputSource::Playback34).unwrap();

        assert_eq!(output.mute(), State::Enabled);
        assert_eq!(output.dim(), State::Disabled);
        assert_eq!(output.mono(), State::Enabled);
        assert_eq!(output.source(), OutputSource::Playback34);
        assert_eq!(
            device.transport().writes,
            vec![(53, 0, 1), (64, 0, 0), (70, 0, 1), (83, 0, 1)]
        );
    }

    #[test]
    fn unknown_source_byte_is_reported() {
        let transport = MockTransport::new().with_register(83, 1, 7);
        let mut device = DeviceController::new(transport);
        assert!(matches!(
            Output::load(&mut device, 1),
            Err(DuetError::InvalidValue(InvalidValueError::Undefined {
                value: 7,
                index: 1,
                ..
            }))
        ));
    }

    #[test]
    fn failed_source_write_keeps_cache() {
        let (mut device, mut output) = speakers();
        device.transport_mut().fail_writes_to(83);
        assert!(output.set_source(&mut device, OutputSource::Playback12).is_err());
        assert_eq!(output.source(), OutputSource::Mixer);
    }
}
