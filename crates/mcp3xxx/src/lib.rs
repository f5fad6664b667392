//! Provides drivers for the Microchip MCP3xxx family of SPI ADCs via the `embedded-hal` ecosystem.
//!
//! Supported chips, each behind a Cargo feature of the same name:
//!
//! | Chip    | Channels | Resolution |
//! |---------|----------|------------|
//! | MCP3002 | 2        | 10 bit     |
//! | MCP3004 | 4        | 10 bit     |
//! | MCP3008 | 8        | 10 bit     |
//! | MCP3202 | 2        | 12 bit     |
//! | MCP3204 | 4        | 12 bit     |
//! | MCP3208 | 8        | 12 bit     |
//!
//! Every chip driver implements [`Mcp3xxx`], which [`AnalogIn`] builds on to provide
//! single-ended and differential readings scaled to 16 bits or to volts.
//!
//! # Features
//!
//! - **`defmt`**: [`defmt::Format`] implementations on [`Error`] and tracing of SPI frames.

#![no_std]
#![forbid(unsafe_code)]

mod analog_in;
#[cfg(any(
    feature = "mcp3002",
    feature = "mcp3004",
    feature = "mcp3008",
    feature = "mcp3202",
    feature = "mcp3204",
    feature = "mcp3208"
))]
mod command;
mod error;

pub use analog_in::{AnalogIn, Reading};
pub use error::Error;

#[cfg(feature = "mcp3002")]
pub mod mcp3002;

#[cfg(feature = "mcp3004")]
pub mod mcp3004;

#[cfg(feature = "mcp3008")]
pub mod mcp3008;

#[cfg(feature = "mcp3202")]
pub mod mcp3202;

#[cfg(feature = "mcp3204")]
pub mod mcp3204;

#[cfg(feature = "mcp3208")]
pub mod mcp3208;

/// Reference voltage assumed by the `new` constructors.
pub const DEFAULT_REFERENCE_VOLTAGE: f32 = 3.3;

/// Common interface of the MCP3xxx chip drivers.
pub trait Mcp3xxx {
    /// Error type of the underlying SPI device.
    type Error;

    /// Resolution of a conversion in bits.
    const BITS: u8;

    /// Number of analog input pins.
    const CHANNELS: u8;

    /// Fastest SPI clock the chip supports with V<sub>DD</sub> at 5V. Slower supplies need a slower clock.
    const MAX_CLOCK_HZ: u32;

    /// Voltage on the chip's V<sub>REF</sub> pin.
    fn reference_voltage(&self) -> f32;

    /// Performs a single conversion and returns the raw [`Self::BITS`] bit result.
    ///
    /// In differential mode `pin` is the pin setting of a differential pair, as returned by
    /// [`Mcp3xxx::differential_pin`].
    fn read_raw(&mut self, pin: u8, differential: bool) -> Result<u16, Error<Self::Error>>;

    /// Maps a `(positive, negative)` input pair onto the pin setting used for a differential
    /// read, or `None` when the chip can't compare those two inputs.
    ///
    /// Only neighbouring pins can be compared: `(0, 1)`, `(1, 0)`, `(2, 3)`, `(3, 2)` and so on.
    fn differential_pin(positive: u8, negative: u8) -> Option<u8> {
        if positive < Self::CHANNELS && negative < Self::CHANNELS && positive ^ 1 == negative {
            Some(positive)
        } else {
            None
        }
    }

    /// Largest value a conversion can return.
    fn max_value() -> u16 {
        (1 << Self::BITS) - 1
    }
}
