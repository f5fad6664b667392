use embedded_hal_mock::eh1::spi::{Mock, Transaction};
use mcp3xxx::{Error, Mcp3xxx};

/// Expectations for a single conversion clocking `write` out while the chip answers with `read`.
fn conversion(write: &[u8], read: &[u8]) -> Vec<Transaction<u8>> {
    vec![
        Transaction::transaction_start(),
        Transaction::transfer_in_place(write.to_vec(), read.to_vec()),
        Transaction::transaction_end(),
    ]
}

fn expect(conversions: &[Vec<Transaction<u8>>]) -> Mock<u8> {
    Mock::new(&conversions.concat())
}

#[test]
fn mcp3002() {
    use mcp3xxx::mcp3002::{Channel, Mcp3002};

    let spi = expect(&[
        conversion(&[0x78, 0x00], &[0xFD, 0xFF]),
        conversion(&[0x48, 0x00], &[0xFC, 0x00]),
    ]);

    let mut mcp = Mcp3002::new(spi);

    assert_eq!(mcp.read(Channel::CH1), Ok(511));
    assert_eq!(mcp.read_differential(Channel::CH0), Ok(0));

    mcp.release().done();
}

#[test]
fn mcp3004() {
    use mcp3xxx::mcp3004::{Channel, Mcp3004};

    let spi = expect(&[conversion(&[0x01, 0xB0, 0x00], &[0x00, 0x01, 0x00])]);

    let mut mcp = Mcp3004::new(spi);

    assert_eq!(mcp.read(Channel::CH3), Ok(256));

    mcp.release().done();
}

#[test]
fn mcp3008() {
    use mcp3xxx::mcp3008::{Channel, Mcp3008};

    let spi = expect(&[
        conversion(&[0x01, 0xD0, 0x00], &[0xFF, 0xFE, 0x9A]),
        conversion(&[0x01, 0x60, 0x00], &[0x00, 0x03, 0xFF]),
    ]);

    let mut mcp = Mcp3008::new(spi);

    assert_eq!(mcp.read(Channel::CH5), Ok(666));
    assert_eq!(mcp.read_differential(Channel::CH6), Ok(1023));

    mcp.release().done();
}

#[test]
fn mcp3202() {
    use mcp3xxx::mcp3202::{Channel, Mcp3202};

    let spi = expect(&[
        conversion(&[0x01, 0xE0, 0x00], &[0x00, 0xEA, 0xBC]),
        conversion(&[0x01, 0x60, 0x00], &[0x00, 0x00, 0x07]),
    ]);

    let mut mcp = Mcp3202::new(spi);

    assert_eq!(mcp.read(Channel::CH1), Ok(0xABC));
    assert_eq!(mcp.read_differential(Channel::CH1), Ok(7));

    mcp.release().done();
}

#[test]
fn mcp3204() {
    use mcp3xxx::mcp3204::{Channel, Mcp3204};

    let spi = expect(&[conversion(&[0x06, 0xC0, 0x00], &[0x00, 0x08, 0x00])]);

    let mut mcp = Mcp3204::new(spi);

    assert_eq!(mcp.read(Channel::CH3), Ok(2048));

    mcp.release().done();
}

#[test]
fn mcp3208() {
    use mcp3xxx::mcp3208::{Channel, Mcp3208};

    let spi = expect(&[
        conversion(&[0x07, 0x80, 0x00], &[0x00, 0x0F, 0xFF]),
        conversion(&[0x04, 0xC0, 0x00], &[0xFF, 0xF1, 0x23]),
    ]);

    let mut mcp = Mcp3208::new(spi);

    assert_eq!(mcp.read(Channel::CH6), Ok(4095));
    assert_eq!(mcp.read_differential(Channel::CH3), Ok(0x123));

    mcp.release().done();
}

#[test]
fn read_raw_checks_pins() {
    use mcp3xxx::mcp3208::Mcp3208;

    let spi = expect(&[conversion(&[0x04, 0x40, 0x00], &[0x00, 0x00, 0x2A])]);

    let mut mcp = Mcp3208::new(spi);

    assert_eq!(mcp.read_raw(8, false), Err(Error::InvalidChannel(8)));
    assert_eq!(mcp.read_raw(1, true), Ok(42));

    mcp.release().done();
}

#[test]
fn differential_pairs() {
    use mcp3xxx::mcp3002::Mcp3002;
    use mcp3xxx::mcp3008::Mcp3008;

    type Two = Mcp3002<Mock<u8>>;
    type Eight = Mcp3008<Mock<u8>>;

    assert_eq!(Two::differential_pin(0, 1), Some(0));
    assert_eq!(Two::differential_pin(1, 0), Some(1));
    assert_eq!(Two::differential_pin(1, 2), None);

    assert_eq!(Eight::differential_pin(6, 7), Some(6));
    assert_eq!(Eight::differential_pin(7, 6), Some(7));
    assert_eq!(Eight::differential_pin(1, 2), None);
    assert_eq!(Eight::differential_pin(0, 0), None);
    assert_eq!(Eight::differential_pin(8, 9), None);
}

#[test]
fn resolution() {
    use mcp3xxx::mcp3004::Mcp3004;
    use mcp3xxx::mcp3204::Mcp3204;

    assert_eq!(Mcp3004::<Mock<u8>>::max_value(), 1023);
    assert_eq!(Mcp3204::<Mock<u8>>::max_value(), 4095);
}

#[test]
fn reference_voltage() {
    use mcp3xxx::mcp3008::Mcp3008;

    let spi = expect(&[]);

    let mcp = Mcp3008::new(spi.clone());
    assert_eq!(mcp.reference_voltage(), mcp3xxx::DEFAULT_REFERENCE_VOLTAGE);

    let mcp = Mcp3008::with_reference_voltage(spi, 5.0);
    assert_eq!(mcp.reference_voltage(), 5.0);

    mcp.release().done();
}
