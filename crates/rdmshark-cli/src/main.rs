use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use rdmshark_core::{
    Annotation, ByteSample, DisplayFormat, RdmPacket, annotate, decode_packet,
};

#[derive(Parser, Debug)]
#[command(name = "rdmshark")]
#[command(version)]
#[command(
    about = "Offline decoder for RDM (ANSI E1.20) byte-sample captures.",
    long_about = None,
    after_help = "Examples:\n  rdmshark decode capture.json -o report.json\n  rdmshark decode capture.json --stdout --pretty\n  rdmshark decode capture.json --stdout --format dec"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one packet's byte samples and emit a JSON report.
    #[command(
        after_help = "The input is a JSON array of byte samples as produced by an\nupstream DMX512 decoder: [{\"ss\": 0, \"es\": 1, \"value\": 204, \"valid\": true}, ...]"
    )]
    Decode {
        /// Path to a JSON byte-sample capture
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Display format for field values
        #[arg(long, value_enum, default_value_t = FormatArg::Hex)]
        format: FormatArg,

        /// Omit the annotation stream from the report
        #[arg(long)]
        fields_only: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Dec,
    Hex,
    Bin,
}

impl From<FormatArg> for DisplayFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Dec => DisplayFormat::Dec,
            FormatArg::Hex => DisplayFormat::Hex,
            FormatArg::Bin => DisplayFormat::Bin,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            report,
            stdout,
            pretty,
            compact: _,
            format,
            fields_only,
        } => cmd_decode(input, report, stdout, pretty, format.into(), fields_only),
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
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
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
        CliError::new(format!("{err:#}"), None)
    }
}

#[derive(Debug, Serialize)]
struct DecodeReport {
    tool: ToolInfo,
    format: DisplayFormat,
    packet: Option<PacketReport>,
}

#[derive(Debug, Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct PacketReport {
    fields: Vec<FieldReport>,
    message: Vec<FieldReport>,
    checksum_valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<Annotation>,
}

#[derive(Debug, Serialize)]
struct FieldReport {
    field: &'static str,
    ss: u64,
    es: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    value: String,
}

fn cmd_decode(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    format: DisplayFormat,
    fields_only: bool,
) -> Result<(), CliError> {
    let contents = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let samples: Vec<ByteSample> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse byte samples: {}", input.display()))?;

    let packet = decode_packet(&samples).map_err(|err| {
        CliError::new(
            format!("RDM decode failed: {err}"),
            Some("the capture is structurally malformed and was dropped".to_string()),
        )
    })?;

    let report_body = DecodeReport {
        tool: ToolInfo {
            name: "rdmshark".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        format,
        packet: packet
            .as_ref()
            .map(|packet| build_packet_report(packet, format, fields_only)),
    };

    let json = serialize_report(&report_body, pretty)?;

    if stdout {
        print!("{}", json);
        return Ok(());
    }

    let report_path = report.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report or --stdout".to_string()),
        )
    })?;
    fs::write(&report_path, json)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    Ok(())
}

fn build_packet_report(
    packet: &RdmPacket,
    format: DisplayFormat,
    fields_only: bool,
) -> PacketReport {
    PacketReport {
        fields: field_reports(packet.fields(), format),
        message: field_reports(packet.data().fields(), format),
        checksum_valid: packet.is_checksum_valid(),
        annotations: if fields_only {
            Vec::new()
        } else {
            annotate(packet, format)
        },
    }
}

fn field_reports(
    fields: Vec<rdmshark_core::FieldRef<'_>>,
    format: DisplayFormat,
) -> Vec<FieldReport> {
    fields
        .iter()
        .filter_map(|field| {
            let span = field.span()?;
            Some(FieldReport {
                field: field.tag().wire_label(),
                ss: span.ss,
                es: span.es,
                size: field.size(),
                value: field.format(format),
            })
        })
        .collect()
}

fn serialize_report(report: &DecodeReport, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    let mut json = json
        .context("Failed to serialize report")
        .map_err(CliError::from)?;
    json.push('\n');
    Ok(json)
}
