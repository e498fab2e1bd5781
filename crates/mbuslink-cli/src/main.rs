use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mbuslink_core::frame::layout::MAX_FRAME_LEN;
use mbuslink_core::{AddressReport, Bcd, DeviceType, HeaderLayout, SecondaryAddress, hex};
use serde::Serialize;

mod input;
mod logging;

use input::ByteSource;
use logging::{LogFormat, LogLevel, init_logging};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("MBUSLINK_BUILD_COMMIT"),
    ", built ",
    env!("MBUSLINK_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "mbuslink")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode wired M-Bus link-layer frames and secondary addresses.",
    long_about = None,
    after_help = "Examples:\n  mbuslink frame decode E5\n  mbuslink frame decode --input response.hex --pretty\n  mbuslink address parse 51 25 73 14 E6 1E 3C 06 --layout long\n  mbuslink address compose --device-id 14732551 --manufacturer GWF --version 60 --device-type 0x06"
)]
struct Cli {
    /// Log level for diagnostics written to stderr
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on link-layer frames.
    Frame {
        #[command(subcommand)]
        command: FrameCommands,
    },
    /// Operations on eight byte secondary addresses.
    Address {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// Print bytes as a 16-per-line hex dump.
    Hexdump {
        #[command(flatten)]
        bytes: BytesArgs,
    },
}

#[derive(Subcommand, Debug)]
enum FrameCommands {
    /// Validate a frame and print a JSON report.
    #[command(alias = "parse")]
    Decode {
        #[command(flatten)]
        bytes: BytesArgs,

        /// Reject frames longer than this many bytes
        #[arg(long, default_value_t = MAX_FRAME_LEN)]
        max_frame_len: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
enum AddressCommands {
    /// Decode eight address bytes and print a JSON report.
    Parse {
        #[command(flatten)]
        bytes: BytesArgs,

        /// Field order of the address bytes
        #[arg(long, value_enum, default_value = "long")]
        layout: LayoutArg,

        /// Offset of the address within the input bytes
        #[arg(long, default_value_t = 0)]
        offset: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a long-header address from its fields.
    Compose {
        /// Device id (up to eight decimal digits)
        #[arg(long)]
        device_id: u32,

        /// Three letter manufacturer id (omit for none)
        #[arg(long, default_value = "")]
        manufacturer: String,

        /// Version byte
        #[arg(long, default_value_t = 0)]
        version: u8,

        /// Device type code, decimal or 0x-prefixed hex
        #[arg(long, value_parser = parse_u8, default_value = "0")]
        device_type: u8,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct BytesArgs {
    /// Hex bytes, e.g. `68 1B 1B 68` or `681b1b68`
    hex: Vec<String>,

    /// Read bytes from a file (hex text unless --binary); glob patterns must match one file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Treat --input as raw bytes
    #[arg(long, requires = "input")]
    binary: bool,
}

impl BytesArgs {
    fn read(self) -> Result<Vec<u8>, CliError> {
        ByteSource {
            hex: self.hex,
            input: self.input,
            binary: self.binary,
        }
        .read()
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write the JSON report to a file instead of stdout
    #[arg(short = 'o', long)]
    report: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LayoutArg {
    /// Device id first (wired long header)
    Long,
    /// Manufacturer first (wireless link-layer header)
    Short,
}

impl From<LayoutArg> for HeaderLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Long => HeaderLayout::Long,
            LayoutArg::Short => HeaderLayout::Short,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let result = match cli.command {
        Commands::Frame { command } => match command {
            FrameCommands::Decode {
                bytes,
                max_frame_len,
                output,
            } => cmd_frame_decode(bytes, max_frame_len, output),
        },
        Commands::Address { command } => match command {
            AddressCommands::Parse {
                bytes,
                layout,
                offset,
                output,
            } => cmd_address_parse(bytes, layout.into(), offset, output),
            AddressCommands::Compose {
                device_id,
                manufacturer,
                version,
                device_type,
                output,
            } => cmd_address_compose(device_id, &manufacturer, version, device_type, output),
        },
        Commands::Hexdump { bytes } => cmd_hexdump(bytes),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    pub(crate) fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_frame_decode(
    bytes: BytesArgs,
    max_frame_len: usize,
    output: OutputArgs,
) -> Result<(), CliError> {
    let frame = bytes.read()?;
    if frame.len() > max_frame_len {
        return Err(CliError::new(
            format!(
                "frame is {} bytes, limit is {}",
                frame.len(),
                max_frame_len
            ),
            Some("raise --max-frame-len to decode oversized frames".to_string()),
        ));
    }
    tracing::info!(len = frame.len(), "decoding frame");

    let report = mbuslink_core::frame_report(&frame).map_err(|err| {
        CliError::new(
            format!("malformed frame: {}", err),
            Some("check the frame bytes; checksum and stop byte belong after the payload".to_string()),
        )
    })?;
    emit(&report, &output)
}

fn cmd_address_parse(
    bytes: BytesArgs,
    layout: HeaderLayout,
    offset: usize,
    output: OutputArgs,
) -> Result<(), CliError> {
    let buffer = bytes.read()?;
    let address = SecondaryAddress::parse(&buffer, offset, layout).map_err(|err| {
        CliError::new(
            format!("malformed address: {}", err),
            Some("a secondary address is exactly 8 bytes from --offset".to_string()),
        )
    })?;
    tracing::info!(%address, "parsed address");
    emit(&AddressReport::new(&address, layout), &output)
}

fn cmd_address_compose(
    device_id: u32,
    manufacturer: &str,
    version: u8,
    device_type: u8,
    output: OutputArgs,
) -> Result<(), CliError> {
    let device_id = Bcd::from_integer(i64::from(device_id)).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("device ids have at most eight decimal digits".to_string()),
        )
    })?;
    let address = SecondaryAddress::compose(
        &device_id,
        manufacturer,
        version,
        DeviceType::from_code(device_type),
    )
    .map_err(|err| CliError::new(err.to_string(), None))?;
    emit(&AddressReport::new(&address, HeaderLayout::Long), &output)
}

fn cmd_hexdump(bytes: BytesArgs) -> Result<(), CliError> {
    let bytes = bytes.read()?;
    println!("{}", hex::dump(&bytes));
    Ok(())
}

fn emit<T: Serialize>(value: &T, output: &OutputArgs) -> Result<(), CliError> {
    let json = serialize_report(value, output.pretty, output.compact)?;
    let Some(report) = output.report.as_ref() else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;
    if !output.quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn serialize_report<T: Serialize>(
    value: &T,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn parse_u8(value: &str) -> Result<u8, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse::<u8>(),
    };
    parsed.map_err(|err| format!("invalid byte '{}': {}", value, err))
}
