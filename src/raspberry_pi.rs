use std::cell::RefCell;

use anyhow::{bail, Context};
use embedded_hal_bus::spi::RefCellDevice;
use mcp3xxx::{
    mcp3002::Mcp3002, mcp3004::Mcp3004, mcp3008::Mcp3008, mcp3202::Mcp3202, mcp3204::Mcp3204,
    mcp3208::Mcp3208,
};
use rppal::gpio::Gpio;
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
use tracing::info;

use crate::args::{Args, Chip};
use crate::poll::poll;

/// Opens the SPI bus and chip select described by `args` and hands the ADC to [`poll`].
pub(crate) fn run(args: &Args) -> Result<(), anyhow::Error> {
    let gpio = Gpio::new()?;

    let spi = Spi::new(
        bus(args.bus)?,
        slave_select(args.slave_select)?,
        args.clock_hz,
        Mode::Mode0,
    )
    .with_context(|| format!("opening SPI bus {}", args.bus))?;

    let spi = RefCell::new(spi);

    let cs = gpio
        .get(args.cs_pin)
        .with_context(|| format!("claiming GPIO {} for chip select", args.cs_pin))?
        .into_output_high();

    let device = RefCellDevice::new_no_delay(&spi, cs);

    info!(chip = ?args.chip, bus = args.bus, cs_pin = args.cs_pin, "ADC initialized");

    let out = &mut std::io::stdout().lock();

    match args.chip {
        Chip::Mcp3002 => poll(Mcp3002::with_reference_voltage(device, args.vref), args, out),
        Chip::Mcp3004 => poll(Mcp3004::with_reference_voltage(device, args.vref), args, out),
        Chip::Mcp3008 => poll(Mcp3008::with_reference_voltage(device, args.vref), args, out),
        Chip::Mcp3202 => poll(Mcp3202::with_reference_voltage(device, args.vref), args, out),
        Chip::Mcp3204 => poll(Mcp3204::with_reference_voltage(device, args.vref), args, out),
        Chip::Mcp3208 => poll(Mcp3208::with_reference_voltage(device, args.vref), args, out),
    }
}

fn bus(bus: u8) -> Result<Bus, anyhow::Error> {
    Ok(match bus {
        0 => Bus::Spi0,
        1 => Bus::Spi1,
        2 => Bus::Spi2,
        3 => Bus::Spi3,
        4 => Bus::Spi4,
        5 => Bus::Spi5,
        6 => Bus::Spi6,
        _ => bail!("SPI bus {bus} doesn't exist"),
    })
}

fn slave_select(slave_select: u8) -> Result<SlaveSelect, anyhow::Error> {
    Ok(match slave_select {
        0 => SlaveSelect::Ss0,
        1 => SlaveSelect::Ss1,
        2 => SlaveSelect::Ss2,
        3 => SlaveSelect::Ss3,
        4 => SlaveSelect::Ss4,
        5 => SlaveSelect::Ss5,
        6 => SlaveSelect::Ss6,
        7 => SlaveSelect::Ss7,
        8 => SlaveSelect::Ss8,
        9 => SlaveSelect::Ss9,
        10 => SlaveSelect::Ss10,
        11 => SlaveSelect::Ss11,
        12 => SlaveSelect::Ss12,
        13 => SlaveSelect::Ss13,
        14 => SlaveSelect::Ss14,
        15 => SlaveSelect::Ss15,
        _ => bail!("slave select {slave_select} doesn't exist"),
    })
}
