#[cfg(feature = "clap")]
use clap::ValueEnum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Not;
use strum::{Display, EnumCount, EnumIter, FromRepr};

// Every value below is transferred to the Duet as its single byte ordinal, the discriminants
// here are the values the device itself reports.

#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum State {
    Disabled = 0,
    Enabled = 1,
}

impl State {
    pub fn is_enabled(&self) -> bool {
        *self == State::Enabled
    }
}

impl Not for State {
    type Output = State;

    fn not(self) -> Self::Output {
        match self {
            State::Enabled => State::Disabled,
            State::Disabled => State::Enabled,
        }
    }
}

impl From<bool> for State {
    fn from(value: bool) -> Self {
        match value {
            true => State::Enabled,
            false => State::Disabled,
        }
    }
}

#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum InputType {
    #[strum(to_string = "+4dBu")]
    #[cfg_attr(feature = "clap", value(name = "line-4dbu"))]
    LinePlus4dBu = 0,

    #[strum(to_string = "-10dBV")]
    #[cfg_attr(feature = "clap", value(name = "line-10dbv"))]
    LineMinus10dBV = 1,

    Microphone = 2,
    Instrument = 3,
}

impl InputType {
    pub fn is_line(&self) -> bool {
        matches!(self, InputType::LinePlus4dBu | InputType::LineMinus10dBV)
    }

    pub fn has_phantom_power(&self) -> bool {
        *self == InputType::Microphone
    }
}

/// The physical output an index refers to. This is never read from the device, index 0 is
/// always the speaker pair and index 1 the headphone jack.
#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum OutputType {
    Speakers = 0,
    Headphones = 1,
}

#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SpeakerOutputType {
    #[strum(to_string = "+4dBu")]
    #[cfg_attr(feature = "clap", value(name = "line-4dbu"))]
    LinePlus4dBu = 0,

    #[strum(to_string = "-10dBV")]
    #[cfg_attr(feature = "clap", value(name = "line-10dbv"))]
    LineMinus10dBV = 1,
}

#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum OutputSource {
    #[strum(to_string = "1-2")]
    #[cfg_attr(feature = "clap", value(name = "playback-1-2"))]
    Playback12 = 0,

    #[strum(to_string = "3-4")]
    #[cfg_attr(feature = "clap", value(name = "playback-3-4"))]
    Playback34 = 1,

    Mixer = 2,
}

#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SoftwareReturnSource {
    #[strum(to_string = "1-2")]
    #[cfg_attr(feature = "clap", value(name = "playback-1-2"))]
    Playback12 = 0,

    #[strum(to_string = "3-4")]
    #[cfg_attr(feature = "clap", value(name = "playback-3-4"))]
    Playback34 = 1,
}

#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ChannelType {
    Input = 0,

    #[strum(to_string = "Software Return")]
    SoftwareReturn = 1,

    Master = 2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn state_negation_flips() {
        assert_eq!(!State::Enabled, State::Disabled);
        assert_eq!(!State::Disabled, State::Enabled);
        assert_eq!(State::from(true), State::Enabled);
        assert!(!State::Disabled.is_enabled());
    }

    #[test]
    fn ordinals_match_device_values() {
        assert_eq!(State::from_repr(1), Some(State::Enabled));
        assert_eq!(InputType::from_repr(2), Some(InputType::Microphone));
        assert_eq!(InputType::from_repr(4), None);
        assert_eq!(OutputSource::Mixer as u8, 2);
        assert_eq!(SoftwareReturnSource::from_repr(2), None);
        assert_eq!(OutputType::from_repr(1), Some(OutputType::Headphones));
    }

    #[test]
    fn display_strings() {
        let inputs: Vec<String> = InputType::iter().map(|t| t.to_string()).collect();
        assert_eq!(inputs, ["+4dBu", "-10dBV", "Microphone", "Instrument"]);

        let sources: Vec<String> = OutputSource::iter().map(|s| s.to_string()).collect();
        assert_eq!(sources, ["1-2", "3-4", "Mixer"]);

        assert_eq!(ChannelType::SoftwareReturn.to_string(), "Software Return");
        assert_eq!(SpeakerOutputType::LineMinus10dBV.to_string(), "-10dBV");
    }

    #[test]
    fn only_microphones_have_phantom_power() {
        let powered: Vec<InputType> = InputType::iter()
            .filter(InputType::has_phantom_power)
            .collect();
        assert_eq!(powered, [InputType::Microphone]);
        assert!(InputType::LineMinus10dBV.is_line());
        assert!(!InputType::Instrument.is_line());
    }
}
