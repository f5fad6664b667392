use embedded_hal::spi::SpiDevice;

use crate::command::{read_with_mode, Command};
use crate::{Error, Mcp3xxx, DEFAULT_REFERENCE_VOLTAGE};

/// MCP3008 driver
pub struct Mcp3008<SPI> {
    spi: SPI,
    reference_voltage: f32,
}

impl<SPI: SpiDevice> Mcp3008<SPI> {
    /// Creates a new driver from an SPI peripheral, assuming a 3.3V reference.
    /// Please ensure the SPI bus is in SPI mode 0, aka (0, 0).
    pub fn new(spi: SPI) -> Self {
        spi.into()
    }

    /// Creates a new driver from an SPI peripheral with `reference_voltage` on V<sub>REF</sub>.
    pub fn with_reference_voltage(spi: SPI, reference_voltage: f32) -> Self {
        Self {
            spi,
            reference_voltage,
        }
    }

    /// Read a MCP3008 ADC channel and return the 10 bit value as a [`u16`].
    /// If `single_ended` is `true`, the conversion will be completed in single-ended mode.
    /// If `false`, the conversion will instead use differential mode.
    pub fn read_with_mode(&mut self, ch: Channel, single_ended: bool) -> Result<u16, SPI::Error> {
        read_with_mode(&mut self.spi, Command::Mcp300x, ch as u8, single_ended)
    }

    /// Read a MCP3008 ADC channel and return the 10 bit value as a [`u16`] in single-ended mode.
    pub fn read(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, true)
    }

    /// Read a MCP3008 ADC channel pair and return the 10 bit value as a [`u16`] in differential mode.
    ///
    /// `ch` is IN+, and IN- is its neighbour: CH0 and CH1, CH2 and CH3, CH4 and CH5, CH6 and CH7
    /// form the pairs.
    pub fn read_differential(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, false)
    }

    /// Releases the SPI peripheral.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> From<SPI> for Mcp3008<SPI> {
    fn from(spi: SPI) -> Self {
        Self::with_reference_voltage(spi, DEFAULT_REFERENCE_VOLTAGE)
    }
}

impl<SPI: SpiDevice> Mcp3xxx for Mcp3008<SPI> {
    type Error = SPI::Error;

    const BITS: u8 = 10;

    const CHANNELS: u8 = 8;

    const MAX_CLOCK_HZ: u32 = 3_600_000;

    fn reference_voltage(&self) -> f32 {
        self.reference_voltage
    }

    fn read_raw(&mut self, pin: u8, differential: bool) -> Result<u16, Error<Self::Error>> {
        let ch = Channel::try_from(pin).map_err(Error::InvalidChannel)?;

        self.read_with_mode(ch, !differential).map_err(Error::Spi)
    }
}

/// Channel list for MCP3008
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    CH0 = 0,
    CH1 = 1,
    CH2 = 2,
    CH3 = 3,
    CH4 = 4,
    CH5 = 5,
    CH6 = 6,
    CH7 = 7,
}

impl Channel {
    /// Iterate over all channels.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::CH0,
            Self::CH1,
            Self::CH2,
            Self::CH3,
            Self::CH4,
            Self::CH5,
            Self::CH6,
            Self::CH7,
        ]
        .into_iter()
    }
}

impl TryFrom<u8> for Channel {
    type Error = u8;

    fn try_from(pin: u8) -> Result<Self, Self::Error> {
        match pin {
            0 => Ok(Self::CH0),
            1 => Ok(Self::CH1),
            2 => Ok(Self::CH2),
            3 => Ok(Self::CH3),
            4 => Ok(Self::CH4),
            5 => Ok(Self::CH5),
            6 => Ok(Self::CH6),
            7 => Ok(Self::CH7),
            _ => Err(pin),
        }
    }
}
