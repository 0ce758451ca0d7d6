use crate::commands::Request;
use duet_types::{ChannelType, InputType, OutputType};

#[derive(thiserror::Error, Debug)]
pub enum DuetError {
    #[error("No Apogee Duet was found (vendor {vendor_id:#06x}, product {product_id:#06x})")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Unable to transfer {request} for index {index}: {source}")]
    Communication {
        request: Request,
        index: u16,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    InvalidValue(#[from] InvalidValueError),
}

/// Failures of the raw control transfer, before any meaning is attached to the byte.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TransportError {
    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Malformed response from Duet, expected {expected} byte(s), transferred {transferred}")]
    MalformedResponse { expected: usize, transferred: usize },
}

/// Values outside what an entity can hold. Setters raise these before anything is sent, entity
/// construction raises them for bytes the device reports that mean nothing.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InvalidValueError {
    #[error("Device reported {value} for {request} on index {index}, which is not a known value")]
    Undefined {
        request: Request,
        index: u16,
        value: u8,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i16,
        min: i16,
        max: i16,
    },

    #[error("{0} inputs have no adjustable level")]
    NoLevelControl(InputType),

    #[error("Phantom power is only available for microphone inputs, not {0}")]
    PhantomPowerUnavailable(InputType),

    #[error("Speaker output type can only be set on the speakers, not {0}")]
    NotSpeakers(OutputType),

    #[error("{channel_type} mixer channels have no {field}")]
    Unsupported {
        field: &'static str,
        channel_type: ChannelType,
    },

    #[error("There is no {kind} with index {index}")]
    NoSuchEntity { kind: &'static str, index: usize },
}

pub type Result<T, E = DuetError> = std::result::Result<T, E>;

pub(crate) fn check_range<V>(
    field: &'static str,
    value: V,
    min: V,
    max: V,
) -> Result<(), InvalidValueError>
where
    V: Into<i16> + PartialOrd + Copy,
{
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(InvalidValueError::OutOfRange {
        field,
        value: value.into(),
        min: min.into(),
        max: max.into(),
    })
}
