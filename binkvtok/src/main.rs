//! kvtok command-line tool for validating and transcoding key-value strings.
//!
//! Usage: kvtok [OPTIONS] [FILE]
//!
//! The whole input is parsed as one key-value string; newlines count as
//! whitespace. Set `KVTOK_LOG` (e.g. `KVTOK_LOG=debug`) to see parser
//! diagnostics on stderr.

use clap::{Parser as ClapParser, ValueEnum};
use libkvtok::{encode, Format, Parsed, Parser, Whitelist};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

mod transcode;

#[derive(ClapParser, Debug)]
#[command(name = "kvtok", version, about = "Validate and transcode key-value strings")]
struct Cli {
    /// Input file (reads from stdin if omitted or "-")
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    to: OutputFormat,

    /// Accepted key; repeat or separate with commas. Enables strict parsing.
    #[arg(short, long = "key", value_name = "KEY", value_delimiter = ',')]
    keys: Vec<String>,

    /// Compare accepted keys verbatim instead of lower-casing both sides
    #[arg(long, requires = "keys")]
    case_sensitive: bool,

    /// Write output to the specified file
    #[arg(short, long, value_name = "FILE", conflicts_with = "write")]
    output: Option<PathBuf>,

    /// Write output next to the input file with the format's extension
    #[arg(short, long)]
    write: bool,

    /// Only check that the input is valid
    #[arg(long)]
    check: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Kv,
    Json,
    #[value(alias = "yml")]
    Yaml,
    Toml,
    Cbor,
    Diag,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Kv => Format::Kv,
            OutputFormat::Json => Format::Json,
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Toml => Format::Toml,
            OutputFormat::Cbor => Format::Cbor,
            OutputFormat::Diag => Format::CborDiag,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let input_file = cli
        .file
        .as_deref()
        .filter(|p| *p != Path::new("-"))
        .map(|p| p.to_string_lossy().to_string());

    let raw_bytes: Vec<u8> = match &input_file {
        Some(path) => match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    process::exit(process_input(&cli, &raw_bytes, input_file.as_deref()));
}

/// Log to stderr, filtered by `KVTOK_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("KVTOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn report(input_file: Option<&str>, prefix: &str, e: impl std::fmt::Display) {
    match input_file {
        Some(path) => eprintln!("{}: {}", path, e),
        None => eprintln!("{}: {}", prefix, e),
    }
}

fn process_input(cli: &Cli, raw_bytes: &[u8], input_file: Option<&str>) -> i32 {
    let parsed = match parse_input(cli, raw_bytes) {
        Ok(parsed) => parsed,
        Err(e) => {
            report(input_file, "Parse error", e);
            return 1;
        }
    };
    tracing::info!(pairs = parsed.len(), "input parsed");

    if cli.check {
        match input_file {
            Some(path) => println!("{}: ok", path),
            None => println!("ok"),
        }
        return 0;
    }

    let format = Format::from(cli.to);
    let target = OutputTarget {
        output_file: cli.output.as_deref(),
        write_back: cli.write,
        input_file,
        format,
    };
    match format {
        Format::Yaml => match transcode::yaml::encode(&parsed) {
            Ok(output) => target.write_text(&output),
            Err(e) => {
                eprintln!("Error: Cannot convert to YAML: {}", e);
                1
            }
        },
        Format::Toml => match transcode::toml::encode(&parsed) {
            Ok(output) => target.write_text(&output),
            Err(e) => {
                eprintln!("Error: Cannot convert to TOML: {}", e);
                1
            }
        },
        Format::Cbor => match transcode::cbor::encode(&parsed) {
            Ok(bytes) => target.write_binary(&bytes),
            Err(e) => {
                eprintln!("Error: Cannot convert to CBOR: {}", e);
                1
            }
        },
        Format::CborDiag => match transcode::cbor::encode(&parsed)
            .and_then(|bytes| transcode::cbor::diagnostic(&bytes))
        {
            Ok(output) => target.write_text(&output),
            Err(e) => {
                eprintln!("Error: Cannot render CBOR diagnostic notation: {}", e);
                1
            }
        },
        Format::Kv | Format::Json => match encode(&parsed, format) {
            Ok(output) => target.write_text(&output),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    }
}

/// Run the input through the tokenizer, under the whitelist when `--key`
/// was given.
fn parse_input(cli: &Cli, raw_bytes: &[u8]) -> Result<Parsed, String> {
    let input =
        std::str::from_utf8(raw_bytes).map_err(|e| format!("input is not valid UTF-8: {}", e))?;
    let result = if cli.keys.is_empty() {
        Parser::new().parse(input)
    } else {
        let whitelist =
            Whitelist::new(cli.keys.iter().cloned()).case_sensitive(cli.case_sensitive);
        Parser::with_policy(whitelist).parse(input)
    };
    result.map_err(|e| e.to_string())
}

/// Where encoded output goes.
struct OutputTarget<'a> {
    output_file: Option<&'a Path>,
    write_back: bool,
    input_file: Option<&'a str>,
    format: Format,
}

impl OutputTarget<'_> {
    /// Resolve the destination file, if any. `Err` means `--write` was
    /// given without an input file.
    fn path(&self) -> Result<Option<PathBuf>, ()> {
        if let Some(path) = self.output_file {
            return Ok(Some(path.to_path_buf()));
        }
        if !self.write_back {
            return Ok(None);
        }
        match self.input_file {
            Some(input) => Ok(Some(Path::new(input).with_extension(self.format.extension()))),
            None => Err(()),
        }
    }

    fn write_text(&self, output: &str) -> i32 {
        if matches!(self.path(), Ok(None)) {
            print!("{}", output);
            // Ensure output ends with newline
            if !output.ends_with('\n') {
                println!();
            }
            return 0;
        }
        self.write_binary(output.as_bytes())
    }

    fn write_binary(&self, output: &[u8]) -> i32 {
        match self.path() {
            Ok(Some(path)) => {
                if let Err(e) = fs::write(&path, output) {
                    eprintln!("Error writing {}: {}", path.display(), e);
                    return 1;
                }
                tracing::debug!(path = %path.display(), bytes = output.len(), "output written");
                0
            }
            Ok(None) => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                if let Err(e) = handle.write_all(output) {
                    eprintln!("Error writing to stdout: {}", e);
                    return 1;
                }
                0
            }
            Err(()) => {
                eprintln!("Error: --write requires an input file");
                1
            }
        }
    }
}
