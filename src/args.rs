use std::fmt;

use clap::{Parser, ValueEnum};

/// Supported ADC chips
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Chip {
    Mcp3002,
    Mcp3004,
    Mcp3008,
    Mcp3202,
    Mcp3204,
    Mcp3208,
}

impl Chip {
    pub(crate) fn channels(self) -> u8 {
        match self {
            Chip::Mcp3002 | Chip::Mcp3202 => 2,
            Chip::Mcp3004 | Chip::Mcp3204 => 4,
            Chip::Mcp3008 | Chip::Mcp3208 => 8,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// The ADC wired to the bus
    #[clap(short, long, value_enum, default_value_t = Chip::Mcp3008)]
    pub(crate) chip: Chip,
    /// SPI bus the ADC is connected to
    #[clap(long, default_value_t = 0)]
    pub(crate) bus: u8,
    /// Hardware slave select line of the bus
    #[clap(long, default_value_t = 0)]
    pub(crate) slave_select: u8,
    /// SPI clock speed
    #[clap(long, default_value_t = 1_000_000)]
    pub(crate) clock_hz: u32,
    /// GPIO (BCM numbering) wired to the ADC's chip select
    #[clap(long, default_value_t = 24)]
    pub(crate) cs_pin: u8,
    /// Voltage on the ADC's reference pin
    #[clap(long, default_value_t = mcp3xxx::DEFAULT_REFERENCE_VOLTAGE)]
    pub(crate) vref: f32,
    /// Single-ended channel to read, may be repeated. Reads every channel when no inputs are given
    #[clap(short = 'n', long = "channel")]
    pub(crate) channels: Vec<u8>,
    /// Differential pair to read as `POSITIVE,NEGATIVE`, may be repeated
    #[clap(short, long, value_parser = parse_pair)]
    pub(crate) differential: Vec<(u8, u8)>,
    /// Delay between rounds of readings
    #[clap(short, long, default_value_t = 500)]
    pub(crate) interval_ms: u64,
    /// Stop after this many rounds of readings
    #[clap(long)]
    pub(crate) count: Option<u64>,
    /// Print all log messages and debug information
    #[clap(short, long)]
    pub(crate) verbose: bool,
}

impl Args {
    /// Inputs to sample each round, in the order they were given.
    pub(crate) fn inputs(&self) -> Vec<Input> {
        if self.channels.is_empty() && self.differential.is_empty() {
            return (0..self.chip.channels()).map(Input::SingleEnded).collect();
        }

        self.channels
            .iter()
            .map(|&pin| Input::SingleEnded(pin))
            .chain(
                self.differential
                    .iter()
                    .map(|&(positive, negative)| Input::Differential(positive, negative)),
            )
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    SingleEnded(u8),
    Differential(u8, u8),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::SingleEnded(pin) => write!(f, "CH{pin}"),
            Input::Differential(positive, negative) => write!(f, "CH{positive}-CH{negative}"),
        }
    }
}

fn parse_pair(s: &str) -> Result<(u8, u8), String> {
    let (positive, negative) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `POSITIVE,NEGATIVE`, got `{s}`"))?;

    let pin = |pin: &str| {
        pin.trim()
            .parse::<u8>()
            .map_err(|err| format!("invalid pin `{pin}`: {err}"))
    };

    Ok((pin(positive)?, pin(negative)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(["pi"].iter().chain(args)).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);

        assert_eq!(args.chip, Chip::Mcp3008);
        assert_eq!(args.clock_hz, 1_000_000);
        assert_eq!(args.cs_pin, 24);
        assert_eq!(args.vref, 3.3);
        assert_eq!(args.count, None);
        assert_eq!(args.inputs().len(), 8);
        assert_eq!(args.inputs()[7], Input::SingleEnded(7));
    }

    #[test]
    fn explicit_inputs() {
        let args = parse(&[
            "--chip", "mcp3204", "-n", "3", "-n", "0", "-d", "2,3", "--differential", "1, 0",
        ]);

        assert_eq!(args.chip, Chip::Mcp3204);
        assert_eq!(
            args.inputs(),
            [
                Input::SingleEnded(3),
                Input::SingleEnded(0),
                Input::Differential(2, 3),
                Input::Differential(1, 0),
            ]
        );
    }

    #[test]
    fn bad_pairs() {
        assert!(parse_pair("1").is_err());
        assert!(parse_pair("1,x").is_err());
        assert!(parse_pair("300,1").is_err());
        assert_eq!(parse_pair("7,6"), Ok((7, 6)));
    }

    #[test]
    fn input_names() {
        assert_eq!(Input::SingleEnded(5).to_string(), "CH5");
        assert_eq!(Input::Differential(0, 1).to_string(), "CH0-CH1");
    }

    #[test]
    fn chip_names() {
        let args = parse(&["-c", "mcp3002", "--count", "3"]);

        assert_eq!(args.chip, Chip::Mcp3002);
        assert_eq!(args.count, Some(3));
        assert_eq!(args.inputs(), [Input::SingleEnded(0), Input::SingleEnded(1)]);
    }
}
