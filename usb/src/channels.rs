use crate::controller::DeviceController;
use crate::device::base::ControlTransport;
use crate::error::{check_range, InvalidValueError, Result};
use duet_types::{ChannelType, SoftwareReturnSource, State};
#[cfg(feature = "serde")]
use serde::Serialize;

pub const LEVEL_MIN: i8 = -48;
pub const LEVEL_MAX: i8 = 6;
pub const PAN_MIN: i8 = -64;
pub const PAN_MAX: i8 = 64;

/// A strip on the internal mixer. Which controls exist depends on the strip's type: input
/// strips can be panned, the software return picks its playback pair, and the master only
/// has a level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MixerChannel {
    pub(crate) index: u16,
    pub(crate) channel_type: ChannelType,
    pub(crate) level: i8,
    pub(crate) pan: Option<i8>,
    pub(crate) mute: Option<State>,
    pub(crate) solo: Option<State>,
    pub(crate) source: Option<SoftwareReturnSource>,
}

impl MixerChannel {
    pub fn load<T: ControlTransport>(
        device: &mut DeviceController<T>,
        index: u16,
        channel_type: ChannelType,
    ) -> Result<Self> {
        let mut channel = Self {
            index,
            channel_type,
            level: LEVEL_MIN,
            pan: None,
            mute: None,
            solo: None,
            source: None,
        };

        if channel_type != ChannelType::Master {
            channel.mute = Some(device.get_channel_mute_state(index)?);
            channel.solo = Some(device.get_channel_solo_state(index)?);
        }
        if channel_type == ChannelType::SoftwareReturn {
            channel.source = Some(device.get_software_return_source(index)?);
        }
        channel.refresh(device)?;
        Ok(channel)
    }

    /// Re-reads the level and pan, these are the values most likely to be moved by something
    /// else talking to the device.
    pub fn refresh<T: ControlTransport>(&mut self, device: &mut DeviceController<T>) -> Result<()> {
        let level = device.get_channel_level(self.index)?;
        check_range("channel level", level, LEVEL_MIN, LEVEL_MAX)?;
        let pan = match self.channel_type {
            ChannelType::Input => Some(device.get_pan_value(self.index)?),
            _ => None,
        };
        if let Some(pan) = pan {
            check_range("pan", pan, PAN_MIN, PAN_MAX)?;
        }

        self.level = level;
        self.pan = pan;
        Ok(())
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn level(&self) -> i8 {
        self.level
    }

    pub fn pan(&self) -> Option<i8> {
        self.pan
    }

    pub fn mute(&self) -> Option<State> {
        self.mute
    }

    pub fn solo(&self) -> Option<State> {
        self.solo
    }

    pub fn source(&self) -> Option<SoftwareReturnSource> {
        self.source
    }

    fn unsupported(&self, field: &'static str) -> InvalidValueError {
        InvalidValueError::Unsupported {
            field,
            channel_type: self.channel_type,
        }
    }

    pub fn set_level<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
        level: i8,
    ) -> Result<()> {
        check_range("channel level", level, LEVEL_MIN, LEVEL_MAX)?;
        device.set_channel_level(self.index, level)?;
        self.level = level;
        Ok(())
    }

    pub fn set_pan<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
        pan: i8,
    ) -> Result<()> {
        if self.channel_type != ChannelType::Input {
            return Err(self.unsupported("pan").into());
        }
        check_range("pan", pan, PAN_MIN, PAN_MAX)?;
        device.set_pan_value(self.index, pan)?;
        self.pan = Some(pan);
        Ok(())
    }

    pub fn set_source<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
        source: SoftwareReturnSource,
    ) -> Result<()> {
        if self.channel_type != ChannelType::SoftwareReturn {
            return Err(self.unsupported("source").into());
        }
        device.set_software_return_source(self.index, source)?;
        self.source = Some(source);
        Ok(())
    }

    pub fn toggle_mute<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
    ) -> Result<()> {
        let current = self.mute.ok_or_else(|| self.unsupported("mute"))?;
        device.set_channel_mute_state(self.index, !current)?;
        self.mute = Some(!current);
        Ok(())
    }

    pub fn toggle_solo<T: ControlTransport>(
        &mut self,
        device: &mut DeviceController<T>,
    ) -> Result<()> {
        let current = self.solo.ok_or_else(|| self.unsupported("solo"))?;
        device.set_channel_solo_state(self.index, !current)?;
        self.solo = Some(!current);
        Ok(())
    }
}
