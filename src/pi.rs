//! Reads the inputs of an MCP3xxx ADC wired to a Raspberry Pi and prints them.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[cfg_attr(not(feature = "raspberry_pi"), allow(dead_code))]
mod args;

#[cfg_attr(not(feature = "raspberry_pi"), allow(dead_code))]
mod poll;

#[cfg(feature = "raspberry_pi")]
mod raspberry_pi;

fn main() -> Result<(), anyhow::Error> {
    let args = args::Args::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    debug!(?args);

    run(&args)
}

#[cfg(feature = "raspberry_pi")]
fn run(args: &args::Args) -> Result<(), anyhow::Error> {
    raspberry_pi::run(args)
}

#[cfg(not(feature = "raspberry_pi"))]
fn run(_: &args::Args) -> Result<(), anyhow::Error> {
    anyhow::bail!("Raspberry Pi feature must be enabled, rebuild with `--features raspberry_pi`")
}
