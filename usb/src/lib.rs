pub use rusb;
pub mod channels;
pub mod codec;
pub mod commands;
pub mod controller;
pub mod device;
pub mod duet;
pub mod error;
pub mod input;
pub mod output;

pub use device::base::ControlTransport;
pub use device::libusb::DuetUSB;
pub use duet_types as types;

pub const VID_APOGEE: u16 = 0x0c60;
pub const PID_DUET: u16 = 0x0016;
