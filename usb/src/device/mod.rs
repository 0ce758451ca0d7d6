// The transport layer knows nothing about inputs, outputs or the mixer, it only moves single
// bytes to and from a request code. Everything above it goes through `ControlTransport`.
pub mod base;
pub mod libusb;

#[doc(hidden)]
pub mod mock;
