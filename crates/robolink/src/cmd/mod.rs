use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod bridge;
pub mod decode;
pub mod encode;
pub mod simulate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Frame a payload for the device link and print it.
    Encode(EncodeArgs),
    /// Parse a received frame and print its contents.
    Decode(DecodeArgs),
    /// Translate a wireless text command into its USB transfer.
    Bridge(BridgeArgs),
    /// Run the quad controller against an input script.
    Simulate(SimulateArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Bridge(args) => bridge::run(args, format),
        Command::Simulate(args) => simulate::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// ASCII command text, framed as a command.
    #[arg(long, conflicts_with = "raw")]
    pub data: Option<String>,
    /// Hex payload bytes, framed as raw data.
    #[arg(long, conflicts_with = "data")]
    pub raw: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DecodeAs {
    /// Command frame carrying ASCII text.
    String,
    /// Data frame carrying big-endian ADC sample pairs.
    Adc,
    /// Command frame carrying a device status report.
    Status,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded frame as received from the device.
    pub frame: String,
    /// How to interpret the payload.
    #[arg(long = "as", value_name = "KIND", default_value = "string")]
    pub decode_as: DecodeAs,
}

#[derive(Args, Debug)]
pub struct BridgeArgs {
    /// Wireless line in `cmd#body` form.
    pub line: String,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Number of control ticks to run.
    #[arg(long, default_value = "10")]
    pub ticks: u32,
    /// JSON tick script (array of {input, accel, gyro} entries).
    #[arg(long, value_name = "FILE", conflicts_with = "input")]
    pub script: Option<PathBuf>,
    /// Constant stick input as `throttle,roll,pitch,yaw`.
    #[arg(long, value_name = "T,R,P,Y", conflicts_with = "script")]
    pub input: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
