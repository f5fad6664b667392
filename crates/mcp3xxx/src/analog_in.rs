use core::cell::RefCell;

use crate::{Error, Mcp3xxx};

/// A single-ended input or differential input pair of an MCP3xxx chip.
///
/// Borrows the chip through a [`RefCell`] so several inputs can share one driver:
///
/// ```
/// # use core::cell::RefCell;
/// # use embedded_hal_mock::eh1::spi::{Mock, Transaction};
/// use mcp3xxx::{mcp3008::Mcp3008, AnalogIn};
/// # let mut spi = Mock::<u8>::new(&[
/// #     Transaction::transaction_start(),
/// #     Transaction::transfer_in_place(vec![0x01, 0x80, 0x00], vec![0x00, 0x03, 0xFF]),
/// #     Transaction::transaction_end(),
/// #     Transaction::transaction_start(),
/// #     Transaction::transfer_in_place(vec![0x01, 0x20, 0x00], vec![0x00, 0x00, 0x00]),
/// #     Transaction::transaction_end(),
/// # ]);
///
/// let mcp = RefCell::new(Mcp3008::new(spi.clone()));
///
/// let pot = AnalogIn::single_ended(&mcp, 0).unwrap();
/// let bridge = AnalogIn::differential(&mcp, 2, 3).unwrap();
///
/// assert_eq!(pot.value().unwrap(), 65535);
/// assert_eq!(bridge.voltage().unwrap(), 0.0);
/// # spi.done();
/// ```
///
/// The chips never return negative numbers: a differential read whose IN+ is below IN- reads `0`,
/// and an input above the reference voltage reads full scale.
pub struct AnalogIn<'a, M> {
    mcp: &'a RefCell<M>,
    pin: u8,
    differential: bool,
}

impl<'a, M: Mcp3xxx> AnalogIn<'a, M> {
    /// Creates a single-ended input when `negative` is `None`, otherwise a differential input.
    pub fn new(
        mcp: &'a RefCell<M>,
        positive: u8,
        negative: Option<u8>,
    ) -> Result<Self, Error<M::Error>> {
        match negative {
            Some(negative) => Self::differential(mcp, positive, negative),
            None => Self::single_ended(mcp, positive),
        }
    }

    /// Creates an input measuring `pin` against analog ground.
    pub fn single_ended(mcp: &'a RefCell<M>, pin: u8) -> Result<Self, Error<M::Error>> {
        if pin >= M::CHANNELS {
            return Err(Error::InvalidChannel(pin));
        }

        Ok(Self {
            mcp,
            pin,
            differential: false,
        })
    }

    /// Creates an input measuring `positive` against `negative`.
    /// See [`Mcp3xxx::differential_pin`] for the pairs each chip supports.
    pub fn differential(
        mcp: &'a RefCell<M>,
        positive: u8,
        negative: u8,
    ) -> Result<Self, Error<M::Error>> {
        let pin = M::differential_pin(positive, negative)
            .ok_or(Error::UndefinedDifferentialPair { positive, negative })?;

        Ok(Self {
            mcp,
            pin,
            differential: true,
        })
    }

    /// Whether this input is a differential pair.
    pub fn is_differential(&self) -> bool {
        self.differential
    }

    /// Returns the conversion result at the chip's native resolution.
    ///
    /// # Panics
    ///
    /// Panics if the chip is already mutably borrowed elsewhere.
    pub fn raw_value(&self) -> Result<u16, Error<M::Error>> {
        self.mcp.borrow_mut().read_raw(self.pin, self.differential)
    }

    /// Returns the conversion result stretched to cover the full [`u16`] range.
    pub fn value(&self) -> Result<u16, Error<M::Error>> {
        Ok(self.reading()?.value)
    }

    /// Returns the input voltage, between `0` and the chip's reference voltage.
    pub fn voltage(&self) -> Result<f32, Error<M::Error>> {
        Ok(self.reading()?.voltage)
    }

    /// Performs one conversion and returns it in every representation.
    pub fn reading(&self) -> Result<Reading, Error<M::Error>> {
        let raw = self.raw_value()?;
        let value = stretch(raw, M::BITS);
        let voltage = value as f32 * self.mcp.borrow().reference_voltage() / u16::MAX as f32;

        Ok(Reading {
            raw,
            value,
            voltage,
        })
    }
}

/// A single conversion from an [`AnalogIn`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Result at the chip's native resolution.
    pub raw: u16,
    /// Result stretched to 16 bits.
    pub value: u16,
    /// Input voltage.
    pub voltage: f32,
}

/// Scales a `bits` wide reading to 16 bits, repeating the high bits in the low end so full scale maps to `u16::MAX`.
pub(crate) fn stretch(raw: u16, bits: u8) -> u16 {
    (raw << (16 - bits)) | (raw >> (2 * bits - 16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretch_ten_bits() {
        assert_eq!(stretch(0, 10), 0);
        assert_eq!(stretch(512, 10), 32800);
        assert_eq!(stretch(1023, 10), u16::MAX);
    }

    #[test]
    fn stretch_twelve_bits() {
        assert_eq!(stretch(0, 12), 0);
        assert_eq!(stretch(2048, 12), 32776);
        assert_eq!(stretch(4095, 12), u16::MAX);
    }
}
