use crate::error::TransportError;

/// The single primitive the Duet understands: a vendor control transfer carrying exactly one
/// byte, addressed by request code and index. `wValue` is always zero.
pub trait ControlTransport {
    fn read_byte(&mut self, request: u8, index: u16) -> Result<u8, TransportError>;
    fn write_byte(&mut self, request: u8, index: u16, value: u8) -> Result<(), TransportError>;
}

