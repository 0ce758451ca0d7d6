use crate::channels::{LEVEL_MIN, PAN_MIN};
use crate::codec::Encoding;
use duet_types::InputType;
use std::fmt::{Display, Formatter};

/// A register on the Duet, addressed by a vendor request code and the index of the input,
/// output or mixer channel it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Request {
    Input(InputRequest),
    Output(OutputRequest),
    Mixer(MixerRequest),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputRequest {
    SoftLimit,
    Phase,
    PhantomPower,
    Type,
    Level(GainStage),
    Group,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputRequest {
    Level,
    Mute,
    Dim,
    SumToMono,
    Source,
    SpeakerOutputType,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MixerRequest {
    SoftwareReturnSource,
    Level,
    Pan,
    Solo,
    Mute,
}

/// The input types which have their own gain register. Line inputs have none.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GainStage {
    Microphone,
    Instrument,
}

impl GainStage {
    pub fn for_input(input_type: InputType) -> Option<GainStage> {
        match input_type {
            InputType::Microphone => Some(GainStage::Microphone),
            InputType::Instrument => Some(GainStage::Instrument),
            InputType::LinePlus4dBu | InputType::LineMinus10dBV => None,
        }
    }
}

impl Request {
    pub fn code(&self) -> u8 {
        match self {
            Request::Input(request) => request.code(),
            Request::Output(request) => request.code(),
            Request::Mixer(request) => request.code(),
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Request::Output(OutputRequest::Level) => Encoding::SignInverted,
            Request::Mixer(MixerRequest::Level) => Encoding::Offset(i16::from(LEVEL_MIN)),
            Request::Mixer(MixerRequest::Pan) => Encoding::Offset(i16::from(PAN_MIN)),
            _ => Encoding::Identity,
        }
    }
}

impl InputRequest {
    pub fn code(&self) -> u8 {
        match self {
            InputRequest::SoftLimit => 17,
            InputRequest::Phase => 19,
            InputRequest::PhantomPower => 21,
            InputRequest::Type => 22,
            InputRequest::Level(GainStage::Microphone) => 52,
            InputRequest::Level(GainStage::Instrument) => 62,
            InputRequest::Group => 68,
        }
    }
}

impl OutputRequest {
    pub fn code(&self) -> u8 {
        match self {
            OutputRequest::Level => 51,
            OutputRequest::Mute => 53,
            OutputRequest::Dim => 64,
            OutputRequest::SumToMono => 70,
            OutputRequest::Source => 83,
            OutputRequest::SpeakerOutputType => 182,
        }
    }
}

impl MixerRequest {
    pub fn code(&self) -> u8 {
        match self {
            MixerRequest::SoftwareReturnSource => 54,
            MixerRequest::Level => 76,
            MixerRequest::Pan => 77,
            MixerRequest::Solo => 78,
            MixerRequest::Mute => 79,
        }
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::Input(InputRequest::Level(stage)) => write!(f, "input level ({:?})", stage),
            Request::Input(request) => write!(f, "input {:?}", request),
            Request::Output(request) => write!(f, "output {:?}", request),
            Request::Mixer(request) => write!(f, "mixer {:?}", request),
        }
    }
}
