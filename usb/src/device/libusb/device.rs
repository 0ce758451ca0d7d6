use crate::device::base::ControlTransport;
use crate::error::{DuetError, TransportError};
use crate::{PID_DUET, VID_APOGEE};
use log::{debug, info};
use rusb::{
    Device, DeviceDescriptor, DeviceHandle, Direction, GlobalContext, Language, Recipient,
    RequestType, UsbContext,
};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

pub struct DuetUSB<T: UsbContext> {
    handle: DeviceHandle<T>,
    device: Device<T>,
    descriptor: DeviceDescriptor,
    timeout: Duration,
}

impl DuetUSB<GlobalContext> {
    pub fn open() -> Result<Self, DuetError> {
        Self::open_with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn open_with_timeout(timeout: Duration) -> Result<Self, DuetError> {
        let handle = rusb::open_device_with_vid_pid(VID_APOGEE, PID_DUET).ok_or(
            DuetError::DeviceNotFound {
                vendor_id: VID_APOGEE,
                product_id: PID_DUET,
            },
        )?;
        Self::from_handle(handle, timeout)
    }
}

impl<T: UsbContext> DuetUSB<T> {
    pub fn from_handle(handle: DeviceHandle<T>, timeout: Duration) -> Result<Self, DuetError> {
        let device = handle.device();
        let descriptor = device.device_descriptor()?;

        info!(
            "Connected to Apogee Duet on bus {} address {}",
            device.bus_number(),
            device.address()
        );

        Ok(Self {
            handle,
            device,
            descriptor,
            timeout,
        })
    }

    pub fn usb_bus_number(&self) -> u8 {
        self.device.bus_number()
    }

    pub fn usb_address(&self) -> u8 {
        self.device.address()
    }

    pub fn usb_device_product_name(&self) -> Result<String, rusb::Error> {
        let language = self.language()?;
        self.handle
            .read_product_string(language, &self.descriptor, self.timeout)
    }

    fn language(&self) -> Result<Language, rusb::Error> {
        let languages = self.handle.read_languages(self.timeout)?;
        languages.first().copied().ok_or(rusb::Error::NotFound)
    }

    fn read_control(
        &mut self,
        request: u8,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize, rusb::Error> {
        self.handle.read_control(
            rusb::request_type(Direction::In, RequestType::Vendor, Recipient::Device),
            request,
            0,
            index,
            buf,
            self.timeout,
        )
    }

    fn write_control(
        &mut self,
        request: u8,
        index: u16,
        data: &[u8],
    ) -> Result<usize, rusb::Error> {
        self.handle.write_control(
            rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Device),
            request,
            0,
            index,
            data,
            self.timeout,
        )
    }
}

impl<T: UsbContext> ControlTransport for DuetUSB<T> {
    fn read_byte(&mut self, request: u8, index: u16) -> Result<u8, TransportError> {
        let mut buf = [0; 1];
        let transferred = self.read_control(request, index, &mut buf)?;
        if transferred != buf.len() {
            return Err(TransportError::MalformedResponse {
                expected: buf.len(),
                transferred,
            });
        }

        debug!("Read request {} index {}: {}", request, index, buf[0]);
        Ok(buf[0])
    }

    fn write_byte(&mut self, request: u8, index: u16, value: u8) -> Result<(), TransportError> {
        debug!("Write request {} index {}: {}", request, index, value);
        let transferred = self.write_control(request, index, &[value])?;
        if transferred != 1 {
            return Err(TransportError::MalformedResponse {
                expected: 1,
                transferred,
            });
        }
        Ok(())
    }
}
