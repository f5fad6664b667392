use embedded_hal::spi::SpiDevice;

/// Wire format shared by a group of MCP3xxx chips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    not(all(
        feature = "mcp3002",
        any(feature = "mcp3004", feature = "mcp3008"),
        feature = "mcp3202",
        any(feature = "mcp3204", feature = "mcp3208")
    )),
    allow(dead_code)
)]
pub(crate) enum Command {
    /// MCP3002: 2 byte frame, 10 bit result.
    Mcp3002,
    /// MCP3004 and MCP3008: 3 byte frame, 10 bit result.
    Mcp300x,
    /// MCP3202: 3 byte frame, 12 bit result.
    Mcp3202,
    /// MCP3204 and MCP3208: 3 byte frame, 12 bit result.
    Mcp320x,
}

impl Command {
    /// Number of bytes clocked for a single conversion.
    pub(crate) const fn frame_len(self) -> usize {
        match self {
            Self::Mcp3002 => 2,
            Self::Mcp300x | Self::Mcp3202 | Self::Mcp320x => 3,
        }
    }

    /// Builds the output buffer requesting a conversion of `channel`.
    pub(crate) fn encode(self, channel: u8, single_ended: bool) -> [u8; 3] {
        let single_ended = single_ended as u8;

        match self {
            // 0, start, SGL/DIFF, ODD/SIGN, MSBF
            Self::Mcp3002 => [
                0b0100_1000 | (single_ended << 5) | ((channel & 0b1) << 4),
                0b0000_0000,
                0b0000_0000,
            ],
            // start | SGL/DIFF, D2, D1, D0
            Self::Mcp300x => [
                0b0000_0001,
                (single_ended << 7) | ((channel & 0b111) << 4),
                0b0000_0000,
            ],
            // start | SGL/DIFF, ODD/SIGN, MSBF
            Self::Mcp3202 => [
                0b0000_0001,
                0b0010_0000 | (single_ended << 7) | ((channel & 0b1) << 6),
                0b0000_0000,
            ],
            // start, SGL/DIFF, D2 | D1, D0
            Self::Mcp320x => [
                0b0000_0100 | (single_ended << 1) | ((channel >> 2) & 0b1),
                (channel & 0b11) << 6,
                0b0000_0000,
            ],
        }
    }

    /// Extracts the conversion result from the input buffer, discarding the null bit and any
    /// undefined bits clocked out while the command was still being sent.
    pub(crate) fn decode(self, frame: &[u8; 3]) -> u16 {
        match self {
            Self::Mcp3002 => u16::from_be_bytes([frame[0], frame[1]]) & 0b0000_0011_1111_1111,
            Self::Mcp300x => u16::from_be_bytes([frame[1], frame[2]]) & 0b0000_0011_1111_1111,
            Self::Mcp3202 | Self::Mcp320x => {
                u16::from_be_bytes([frame[1], frame[2]]) & 0b0000_1111_1111_1111
            }
        }
    }
}

/// Internal method for reading/writing to an MCP3xxx class chip. Channel must be valid for the intended chip.
pub(crate) fn read_with_mode<SPI: SpiDevice>(
    spi: &mut SPI,
    command: Command,
    channel: u8,
    single_ended: bool,
) -> Result<u16, SPI::Error> {
    let mut buffer = command.encode(channel, single_ended);

    spi.transfer_in_place(&mut buffer[..command.frame_len()])?;

    #[cfg(feature = "defmt")]
    defmt::trace!("{} channel {}: {:02x}", command, channel, &buffer[..command.frame_len()]);

    Ok(command.decode(&buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mcp300x_single_ended() {
        assert_eq!(Command::Mcp300x.encode(0, true), [0x01, 0x80, 0x00]);
        assert_eq!(Command::Mcp300x.encode(7, true), [0x01, 0xF0, 0x00]);
    }

    #[test]
    fn mcp300x_differential() {
        assert_eq!(Command::Mcp300x.encode(3, false), [0x01, 0x30, 0x00]);
    }

    #[test]
    fn mcp3002_frames() {
        assert_eq!(Command::Mcp3002.encode(0, true), [0x68, 0x00, 0x00]);
        assert_eq!(Command::Mcp3002.encode(1, true), [0x78, 0x00, 0x00]);
        assert_eq!(Command::Mcp3002.encode(1, false), [0x58, 0x00, 0x00]);
        assert_eq!(Command::Mcp3002.frame_len(), 2);
    }

    #[test]
    fn mcp3202_frames() {
        assert_eq!(Command::Mcp3202.encode(0, true), [0x01, 0xA0, 0x00]);
        assert_eq!(Command::Mcp3202.encode(1, false), [0x01, 0x60, 0x00]);
    }

    #[test]
    fn mcp320x_frames() {
        assert_eq!(Command::Mcp320x.encode(0, true), [0x06, 0x00, 0x00]);
        assert_eq!(Command::Mcp320x.encode(5, true), [0x07, 0x40, 0x00]);
        assert_eq!(Command::Mcp320x.encode(2, false), [0x04, 0x80, 0x00]);
    }

    #[test]
    fn decode_discards_undefined_bits() {
        assert_eq!(Command::Mcp3002.decode(&[0xFE, 0x12, 0xFF]), 0x212);
        assert_eq!(Command::Mcp300x.decode(&[0xFF, 0xFD, 0x34]), 0x134);
        assert_eq!(Command::Mcp3202.decode(&[0xFF, 0xEA, 0xBC]), 0xABC);
        assert_eq!(Command::Mcp320x.decode(&[0xFF, 0xFF, 0xFF]), 0xFFF);
    }
}
