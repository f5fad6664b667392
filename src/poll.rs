use std::cell::RefCell;
use std::fmt::Debug;
use std::io::Write;
use std::time::Duration;

use anyhow::anyhow;
use mcp3xxx::{AnalogIn, Mcp3xxx};
use tracing::{debug, warn};

use crate::args::{Args, Input};

/// Whether `clock_hz` is faster than the chip can be clocked at.
pub(crate) fn clock_too_fast<M: Mcp3xxx>(clock_hz: u32) -> bool {
    clock_hz > M::MAX_CLOCK_HZ
}

/// Reads every input in `args` once per round, writing one line per input to `out`, until `--count` rounds are done.
pub(crate) fn poll<M, W>(mcp: M, args: &Args, out: &mut W) -> Result<(), anyhow::Error>
where
    M: Mcp3xxx,
    M::Error: Debug,
    W: Write,
{
    if clock_too_fast::<M>(args.clock_hz) {
        warn!(
            clock_hz = args.clock_hz,
            max_clock_hz = M::MAX_CLOCK_HZ,
            "SPI clock is above what the ADC supports, readings may be garbage"
        );
    }

    let mcp = RefCell::new(mcp);

    let inputs = args
        .inputs()
        .into_iter()
        .map(|input| {
            let analog_in = match input {
                Input::SingleEnded(pin) => AnalogIn::single_ended(&mcp, pin),
                Input::Differential(positive, negative) => {
                    AnalogIn::differential(&mcp, positive, negative)
                }
            };

            analog_in
                .map(|analog_in| (input, analog_in))
                .map_err(|err| anyhow!("{input}: {err}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(inputs = inputs.len(), bits = M::BITS, "polling");

    let mut round = 0;

    loop {
        if args.count.is_some_and(|count| round >= count) {
            return Ok(());
        }

        if round > 0 {
            std::thread::sleep(Duration::from_millis(args.interval_ms));
        }

        for (input, analog_in) in &inputs {
            let name = input.to_string();

            match analog_in.reading() {
                Ok(reading) => writeln!(
                    out,
                    "{name:>8}: raw {:>4}  value {:>5}  {:.3}V",
                    reading.raw, reading.value, reading.voltage
                )?,
                Err(err) => {
                    warn!(%input, "read failed: {err}");
                    writeln!(out, "{name:>8}: {err}")?;
                }
            }
        }

        round += 1;
    }
}
