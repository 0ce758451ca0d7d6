use crate::commands::GainStage;
use crate::controller::DeviceController;
use crate::device::base::ControlTransport;
use crate::error::{check_range, InvalidValueError, Result};
use duet_types::{InputType, State};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::ops::RangeInclusive;

pub const MICROPHONE_LEVEL_MAX: u8 = 75;
pub const INSTRUMENT_LEVEL_MAX: u8 = 65;

/// The gain range of an input type, line inputs have no gain control.
pub fn level_range(input_type: InputType) -> Option<RangeInclusive<u8>> {
    match GainStage::for_input(input_type)? {
        GainStage::Microphone => Some(0..=MICROPHONE_LEVEL_MAX),
        GainStage::Instrument => Some(0..=INSTRUMENT_LEVEL_MAX),
    }
}

fn check_level(input_type: InputType, level: u8) -> Result<(), InvalidValueError> {
    let range = level_range(input_type).ok_or(InvalidValueError::NoLevelControl(input_type))?;
    check_range("input level", level, *range.start(), *range.end())
}

/// One of the two analog inputs. Type changes and grouping affect both inputs, so those live
/// on the controller (and the `Duet`), everything else is set here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Input {
    pub(crate) index: u16,
    pub(crate) input_type: InputType,
    pub(crate) level: Option<u8>,
    pub(crate) phantom_power: Option<State>,
    pub(crate) phase: State,
    pub(crate) soft_limit: State,
    pub(crate) group: State,
}

impl Input {
    pub fn load<T: ControlTransport>(device: &mut DeviceController<T>, index: u16) -> Result<Self> {
        let input_type = device.get_input_type(index)?;
        let (level, phantom_power) = Self::read_type_dependent(device, index, input_type)?;
        Ok(Self {
            index,
            input_type,
            level,
            phantom_power,
            phase: device.get_phase_state(index)?,
            soft_limit: device.get_soft_limit_state(index)?,
            group: device.get_group_state(index)?,
        })
    }

    // Level and phantom power registers only mean something for some types. The registers of
    // a type can be read while the input is still set to another one, so a type change reads
    // them ahead of the write.
    pub(crate) fn read_type_dependent<T: ControlTransport>(
        device: &mut DeviceController<T>,
        index: u16,
        input_type: InputType,
    ) -> Result<(Option<u8>, Option<State>)> {
        let level = match GainStage::for_input(input_type) {
            Some(stage) => {
                let level = device.get_input_level(index, stage)?;
                check_level(input_type, level)?;
                Some(level)
            }
            None => None,
        };
        let phantom_power = if input_type.has_phantom_power() {
            Some(device.get_phantom_power_state(index)?)
        } else {
            None
        };
        Ok((level, phantom_power))
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    /// The number printed on the device's front panel.
    pub fn number(&self) -> u16 {
        self.index + 1
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn level(&self) -> Option<u8> {
        self.level
    }

    pub fn level_range(&self) -> Option<RangeInclusive<u8>> {
        level_range(self.input_type)
    }

    pub fn phantom_power(&self) -> Option<State> {
        self.phantom_power
    }

    pub fn phase(&self) -> State {
        self.phase
    }

    pub fn soft_limit(&self) -> State {
        self.soft_limit
    }

    pub fn group(&self) -> State {
        self.group
    }

    pub fn set_level<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
        level: u8,
    ) -> Result<()> {
        let stage = GainStage::for_input(self.input_type)
            .ok_or(InvalidValueError::NoLevelControl(self.input_type))?;
        check_level(self.input_type, level)?;

        device.set_input_level(self.index, stage, level)?;
        self.level = Some(level);
        Ok(())
    }

    pub fn toggle_phantom_power<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
    ) -> Result<()> {
        let current = self
            .phantom_power
            .ok_or(InvalidValueError::PhantomPowerUnavailable(self.input_type))?;

        let new_state = !current;
        device.set_phantom_power_state(self.index, new_state)?;
        self.phantom_power = Some(new_state);
        Ok(())
    }

    pub fn toggle_phase<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
    ) -> Result<()> {
        let new_state = !self.phase;
        device.set_phase_state(self.index, new_state)?;
        self.phase = new_state;
        Ok(())
    }

    pub fn toggle_soft_limit<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
    ) -> Result<()> {
        let new_state = !self.soft_limit;
        device.set_soft_limit_state(self.index, new_state)?;
        self.soft_limit = new_state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::MockTransport;
    use crate::error::DuetError;

    fn microphone_on_input_one() -> DeviceController<MockTransport> {
        let transport = MockTransport::new()
            .with_register(22, 0, 2)
            .with_register(52, 0, 40)
            .with_register(21, 0, 1)
            .with_register(19, 0, 0);
        DeviceController::new(transport)
    }

    #[test]
    fn loads_microphone_input() {
        let mut device = microphone_on_input_one();
        let input = Input::load(&mut device, 0).unwrap();

        assert_eq!(input.input_type(), InputType::Microphone);
        assert_eq!(input.level(), Some(40));
        assert_eq!(input.phantom_power(), Some(State::Enabled));
        assert_eq!(input.phase(), State::Disabled);
        assert_eq!(input.level_range(), Some(0..=75));
        assert_eq!(input.number(), 1);
    }

    #[test]
    fn line_inputs_skip_level_and_phantom_power() {
        let transport = MockTransport::new().with_register(22, 1, 1);
        let mut device = DeviceController::new(transport);
        let input = Input::load(&mut device, 1).unwrap();

        assert_eq!(input.input_type(), InputType::LineMinus10dBV);
        assert_eq!(input.level(), None);
        assert_eq!(input.phantom_power(), None);
        assert_eq!(input.level_range(), None);

        let requested: Vec<u8> = device.transport().reads.iter().map(|(r, _)| *r).collect();
        assert!(!requested.contains(&52));
        assert!(!requested.contains(&62));
        assert!(!requested.contains(&21));
    }

    #[test]
    fn instrument_level_uses_instrument_register() {
        let transport = MockTransport::new()
            .with_register(22, 0, 3)
            .with_register(62, 0, 12);
        let mut device = DeviceController::new(transport);
        let mut input = Input::load(&mut device, 0).unwrap();
        assert_eq!(input.level(), Some(12));
        assert_eq!(input.level_range(), Some(0..=65));

        input.set_level(&mut device, 65).unwrap();
        assert_eq!(device.transport().writes, vec![(62, 0, 65)]);
        assert_eq!(input.level(), Some(65));
    }

    #[test]
    fn level_outside_type_range_is_rejected_before_io() {
        let transport = MockTransport::new().with_register(22, 0, 3);
        let mut device = DeviceController::new(transport);
        let mut input = Input::load(&mut device, 0).unwrap();

        let result = input.set_level(&mut device, 70);
        assert!(matches!(
            result,
            Err(DuetError::InvalidValue(InvalidValueError::OutOfRange { max: 65, .. }))
        ));
        assert!(device.transport().writes.is_empty());
        assert_eq!(input.level(), Some(0));
    }

    #[test]
    fn microphone_gain_above_75_is_refused_on_load() {
        let transport = MockTransport::new()
            .with_register(22, 0, 2)
            .with_register(52, 0, 76);
        let mut device = DeviceController::new(transport);
        assert!(matches!(
            Input::load(&mut device, 0),
            Err(DuetError::InvalidValue(InvalidValueError::OutOfRange { value: 76, max: 75, .. }))
        ));
    }

    #[test]
    fn line_input_level_is_rejected() {
        let mut device = DeviceController::new(MockTransport::new());
        let mut input = Input::load(&mut device, 0).unwrap();

        let result = input.set_level(&mut device, 10);
        assert!(matches!(
            result,
            Err(DuetError::InvalidValue(InvalidValueError::NoLevelControl(
                InputType::LinePlus4dBu
            )))
        ));
        assert!(device.transport().writes.is_empty());
    }

    #[test]
    fn toggles_write_the_negated_state() {
        let mut device = microphone_on_input_one();
        let mut input = Input::load(&mut device, 0).unwrap();

        input.toggle_phantom_power(&mut device).unwrap();
        input.toggle_phase(&mut device).unwrap();
        input.toggle_soft_limit(&mut device).unwrap();

        assert_eq!(input.phantom_power(), Some(State::Disabled));
        assert_eq!(input.phase(), State::Enabled);
        assert_eq!(input.soft_limit(), State::Enabled);
        assert_eq!(
            device.transport().writes,
            vec![(21, 0, 0), (19, 0, 1), (17, 0, 1)]
        );
    }

    #[test]
    fn phantom_power_needs_a_microphone() {
        let transport = MockTransport::new().with_register(22, 0, 3);
        let mut device = DeviceController::new(transport);
        let mut input = Input::load(&mut device, 0).unwrap();

        assert!(matches!(
            input.toggle_phantom_power(&mut device),
            Err(DuetError::InvalidValue(
                InvalidValueError::PhantomPowerUnavailable(InputType::Instrument)
            ))
        ));
    }

    #[test]
    fn failed_write_keeps_cached_value() {
        let mut device = microphone_on_input_one();
        let mut input = Input::load(&mut device, 0).unwrap();
        device.transport_mut().fail_writes_to(52);
        device.transport_mut().fail_writes_to(19);

        assert!(matches!(
            input.set_level(&mut device, 10),
            Err(DuetError::Communication { index: 0, .. })
        ));
        assert!(input.toggle_phase(&mut device).is_err());
        assert_eq!(input.level(), Some(40));
        assert_eq!(input.phase(), State::Disabled);
    }
}
