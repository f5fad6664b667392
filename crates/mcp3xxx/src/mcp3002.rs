use embedded_hal::spi::SpiDevice;

use crate::command::{read_with_mode, Command};
use crate::{Error, Mcp3xxx, DEFAULT_REFERENCE_VOLTAGE};

/// MCP3002 driver
///
/// The MCP3002 clocks a whole conversion in a single 16 bit transfer.
pub struct Mcp3002<SPI> {
    spi: SPI,
    reference_voltage: f32,
}

impl<SPI: SpiDevice> Mcp3002<SPI> {
    /// Creates a new driver from an SPI peripheral, assuming a 3.3V reference.
    /// Please ensure the SPI bus is in SPI mode 0, aka (0, 0).
    pub fn new(spi: SPI) -> Self {
        spi.into()
    }

    /// Creates a new driver from an SPI peripheral. The MCP3002 uses V<sub>DD</sub> as its
    /// reference, so `reference_voltage` is the supply voltage.
    pub fn with_reference_voltage(spi: SPI, reference_voltage: f32) -> Self {
        Self {
            spi,
            reference_voltage,
        }
    }

    /// Read a channel and return the 10 bit value as a [`u16`].
    /// If `single_ended` is `true`, the conversion will be completed in single-ended mode.
    /// If `false`, the conversion will instead use differential mode.
    pub fn read_with_mode(&mut self, ch: Channel, single_ended: bool) -> Result<u16, SPI::Error> {
        read_with_mode(&mut self.spi, Command::Mcp3002, ch as u8, single_ended)
    }

    /// Read a channel and return the 10 bit value as a [`u16`] in single-ended mode.
    pub fn read(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, true)
    }

    /// Read `CH0 - CH1` (for [`Channel::CH0`]) or `CH1 - CH0` (for [`Channel::CH1`]).
    pub fn read_differential(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, false)
    }

    /// Releases the SPI peripheral.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> From<SPI> for Mcp3002<SPI> {
    fn from(spi: SPI) -> Self {
        Self::with_reference_voltage(spi, DEFAULT_REFERENCE_VOLTAGE)
    }
}

impl<SPI: SpiDevice> Mcp3xxx for Mcp3002<SPI> {
    type Error = SPI::Error;

    const BITS: u8 = 10;

    const CHANNELS: u8 = 2;

    const MAX_CLOCK_HZ: u32 = 3_200_000;

    fn reference_voltage(&self) -> f32 {
        self.reference_voltage
    }

    fn read_raw(&mut self, pin: u8, differential: bool) -> Result<u16, Error<Self::Error>> {
        let ch = Channel::try_from(pin).map_err(Error::InvalidChannel)?;

        self.read_with_mode(ch, !differential).map_err(Error::Spi)
    }
}

/// Channel list for MCP3002
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    CH0 = 0,
    CH1 = 1,
}

impl Channel {
    /// Iterate over all channels.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::CH0, Self::CH1].into_iter()
    }
}

impl TryFrom<u8> for Channel {
    type Error = u8;

    fn try_from(pin: u8) -> Result<Self, Self::Error> {
        match pin {
            0 => Ok(Self::CH0),
            1 => Ok(Self::CH1),
            _ => Err(pin),
        }
    }
}
