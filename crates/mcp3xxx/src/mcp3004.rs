use embedded_hal::spi::SpiDevice;

use crate::command::{read_with_mode, Command};
use crate::{Error, Mcp3xxx, DEFAULT_REFERENCE_VOLTAGE};

/// MCP3004 driver
pub struct Mcp3004<SPI> {
    spi: SPI,
    reference_voltage: f32,
}

impl<SPI: SpiDevice> Mcp3004<SPI> {
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

    /// Read a channel and return the 10 bit value as a [`u16`].
    /// If `single_ended` is `true`, the conversion will be completed in single-ended mode.
    /// If `false`, the conversion will instead use differential mode.
    pub fn read_with_mode(&mut self, ch: Channel, single_ended: bool) -> Result<u16, SPI::Error> {
        read_with_mode(&mut self.spi, Command::Mcp300x, ch as u8, single_ended)
    }

    /// Read a channel and return the 10 bit value as a [`u16`] in single-ended mode.
    pub fn read(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, true)
    }

    /// Read a channel and return the 10 bit value as a [`u16`] in differential mode.
    ///
    /// `ch` is IN+, and its neighbour is IN-:
    /// - `CH0`: CH0 - CH1
    /// - `CH1`: CH1 - CH0
    /// - `CH2`: CH2 - CH3
    /// - `CH3`: CH3 - CH2
    pub fn read_differential(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, false)
    }

    /// Releases the SPI peripheral.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> From<SPI> for Mcp3004<SPI> {
    fn from(spi: SPI) -> Self {
        Self::with_reference_voltage(spi, DEFAULT_REFERENCE_VOLTAGE)
    }
}

impl<SPI: SpiDevice> Mcp3xxx for Mcp3004<SPI> {
    type Error = SPI::Error;

    const BITS: u8 = 10;

    const CHANNELS: u8 = 4;

    const MAX_CLOCK_HZ: u32 = 3_600_000;

    fn reference_voltage(&self) -> f32 {
        self.reference_voltage
    }

    fn read_raw(&mut self, pin: u8, differential: bool) -> Result<u16, Error<Self::Error>> {
        let ch = Channel::try_from(pin).map_err(Error::InvalidChannel)?;

        self.read_with_mode(ch, !differential).map_err(Error::Spi)
    }
}

/// Channel list for MCP3004
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    CH0 = 0,
    CH1 = 1,
    CH2 = 2,
    CH3 = 3,
}

impl Channel {
    /// Iterate over all channels.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::CH0, Self::CH1, Self::CH2, Self::CH3].into_iter()
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
            _ => Err(pin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{Error as _, ErrorKind, ErrorType, Operation};

    #[derive(Debug, PartialEq)]
    struct MockError;

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Answers every channel `n` with `100 + n`, or `200 + n` in differential mode.
    struct MockSpi;

    impl ErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            assert_eq!(operations.len(), 1);

            match &mut operations[0] {
                Operation::TransferInPlace(words) => {
                    assert_eq!(words.len(), 3);
                    assert_eq!(words[0], 0b0000_0001, "Missing start flag");

                    let single_ended = words[1] & 0b1000_0000 != 0;
                    let channel = (words[1] >> 4) & 0b0111;
                    assert!(channel < 4, "Channel {channel} doesn't exist on an MCP3004");

                    let base = if single_ended { 100 } else { 200 };

                    // Undefined bits clock out high
                    words[1] = 0b1111_1100;
                    words[2] = base + channel;
                }
                _ => panic!("Not an expected operation"),
            }

            Ok(())
        }
    }

    struct BrokenSpi;

    impl ErrorType for BrokenSpi {
        type Error = MockError;
    }

    impl SpiDevice for BrokenSpi {
        fn transaction(&mut self, _: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            Err(MockError)
        }
    }

    #[test]
    fn mock_spi() {
        let mut mcp = Mcp3004::new(MockSpi);

        assert_eq!(mcp.read(Channel::CH0), Ok(100));
        assert_eq!(mcp.read(Channel::CH1), Ok(101));
        assert_eq!(mcp.read(Channel::CH2), Ok(102));
        assert_eq!(mcp.read(Channel::CH3), Ok(103));
    }

    #[test]
    fn differential() {
        let mut mcp = Mcp3004::new(MockSpi);

        assert_eq!(mcp.read_differential(Channel::CH1), Ok(201));
        assert_eq!(mcp.read_raw(3, true), Ok(203));
    }

    #[test]
    fn rejects_missing_pins() {
        let mut mcp = Mcp3004::new(MockSpi);

        assert_eq!(mcp.read_raw(4, false), Err(Error::InvalidChannel(4)));
        assert_eq!(Mcp3004::<MockSpi>::differential_pin(3, 4), None);
        assert_eq!(Mcp3004::<MockSpi>::differential_pin(3, 2), Some(3));
    }

    #[test]
    fn propagates_spi_errors() {
        let mut mcp = Mcp3004::new(BrokenSpi);

        assert_eq!(mcp.read(Channel::CH0), Err(MockError));

        let err = mcp.read_raw(0, false).unwrap_err();
        assert_eq!(err, Error::Spi(MockError));
        assert!(matches!(err, Error::Spi(ref e) if e.kind() == ErrorKind::Other));
    }

    #[test]
    fn all_channels() {
        assert_eq!(Channel::all().count(), Mcp3004::<MockSpi>::CHANNELS as usize);
        assert_eq!(Mcp3004::<MockSpi>::max_value(), 1023);
    }
}
