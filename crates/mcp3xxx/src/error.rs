use core::fmt;

/// Errors returned by the [`Mcp3xxx`](crate::Mcp3xxx) interface and [`AnalogIn`](crate::AnalogIn).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The SPI transaction failed.
    Spi(E),
    /// The pin doesn't exist on this chip.
    InvalidChannel(u8),
    /// The chip can't compare these two inputs.
    UndefinedDifferentialPair {
        /// Pin read as IN+.
        positive: u8,
        /// Pin read as IN-.
        negative: u8,
    },
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spi(err) => write!(f, "SPI transaction failed: {err:?}"),
            Error::InvalidChannel(pin) => write!(f, "pin {pin} doesn't exist on this chip"),
            Error::UndefinedDifferentialPair { positive, negative } => write!(
                f,
                "differential pin mapping ({positive}, {negative}) not defined, only neighbouring pins can be compared"
            ),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
