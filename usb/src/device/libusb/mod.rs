mod device;

pub use device::{DuetUSB, DEFAULT_TIMEOUT};
