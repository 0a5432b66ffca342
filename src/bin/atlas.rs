//! atlas CLI - The Celestial Atlas
//!
//! Look up the Sky Address and constellation of any day on the spiral.
//!
//! Output goes to stdout (JSON by default); logs go to stderr and are
//! controlled with `ATLAS_LOG` or `-v`.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use celestial_atlas::core::sky_address::{LUNAR_MONTHS, PRIME_DAYS, SOLAR_MONTHS};
use celestial_atlas::{parse_date, AtlasConfig, AtlasEngine};

/// ✨ Celestial Atlas: every day has a Sky Address.
#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(version = celestial_atlas::VERSION)]
#[command(about = "✨ Celestial Atlas: map dates onto the 1001-day spiral")]
#[command(after_help = "EXAMPLES:
  # Today's constellation
  atlas show

  # A specific day, human readable
  atlas --format text show --date 2026-01-17

  # Just the Sky Address
  atlas convert --date 2026-01-17

  # Browse by coordinate (S L P)
  atlas coordinate 4 2 7

Stored. Retrievable. Kind.
")]
struct Cli {
    /// Config file path (default: per-user config dir, if present)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Day zero of the spiral (YYYY-MM-DD)
    #[arg(long = "anchor-date", value_name = "DATE", global = true)]
    anchor_date: Option<String>,

    /// Star catalog JSON (default: embedded catalog)
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "json", global = true)]
    format: OutputFormat,

    /// Verbose logging to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full atlas payload for a date (default: today)
    Show {
        /// Date (YYYY-MM-DD)
        #[arg(long = "date", value_name = "DATE")]
        date: Option<String>,
    },
    /// Sky Address of a date, without the constellation
    Convert {
        /// Date (YYYY-MM-DD)
        #[arg(long = "date", value_name = "DATE")]
        date: String,
    },
    /// Payload for a Sky Address
    Coordinate {
        /// Solar Month (1-11)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=SOLAR_MONTHS as i64))]
        s: u8,
        /// Lunar Month (1-13)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=LUNAR_MONTHS as i64))]
        l: u8,
        /// Prime Day (1-7)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=PRIME_DAYS as i64))]
        p: u8,
    },
    /// The seven Spiral Gates and their anchors
    Gates,
    /// The eleven Solar Key Signatures
    Keys,
    /// The thirteen Lunar Pattern Types
    Patterns,
    /// Anchor stars of one gate
    Anchors {
        /// Gate id (1-7)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=PRIME_DAYS as i64))]
        gate: u8,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for piping.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("ATLAS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let engine = AtlasEngine::new(&config).context("failed to start atlas engine")?;
    let format = cli.format;

    match cli.command {
        Command::Show { date } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let payload = engine.generate_payload(date);
            emit(format, &payload, || payload.format_display())
        }
        Command::Convert { date } => {
            let conversion = engine.convert(parse_date(&date)?);
            emit(format, &conversion, || conversion.format_display())
        }
        Command::Coordinate { s, l, p } => {
            let payload = engine.payload_for_coordinate(s, l, p)?;
            emit(format, &payload, || payload.format_display())
        }
        Command::Gates => {
            let listing = engine.gates();
            emit(format, &listing, || listing.format_display())
        }
        Command::Keys => {
            let listing = engine.solar_keys();
            emit(format, &listing, || listing.format_display())
        }
        Command::Patterns => {
            let listing = engine.lunar_patterns();
            emit(format, &listing, || listing.format_display())
        }
        Command::Anchors { gate } => {
            let anchors: Vec<AnchorLine> = engine
                .get_anchor_points(gate)
                .into_iter()
                .map(|(name, point)| AnchorLine {
                    name,
                    ra: point.as_ref().map(|p| p.ra),
                    dec: point.as_ref().map(|p| p.dec),
                    magnitude: point.and_then(|p| p.magnitude),
                })
                .collect();
            emit(format, &anchors, || {
                anchors
                    .iter()
                    .map(|a| match (a.ra, a.dec) {
                        (Some(ra), Some(dec)) => {
                            format!("{:<14} RA {:>7.3}°  Dec {:>7.3}°\n", a.name, ra, dec)
                        }
                        _ => format!("{:<14} (no coordinates)\n", a.name),
                    })
                    .collect()
            })
        }
    }
}

#[derive(Serialize)]
struct AnchorLine {
    name: String,
    ra: Option<f64>,
    dec: Option<f64>,
    magnitude: Option<f64>,
}

/// Defaults → config file → environment → flags.
fn resolve_config(cli: &Cli) -> Result<AtlasConfig> {
    let mut config = AtlasConfig::load(cli.config.as_deref())?;
    config.apply_env()?;
    if let Some(anchor) = &cli.anchor_date {
        config.anchor_date = parse_date(anchor).context("--anchor-date")?;
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog = Some(catalog.clone());
    }
    Ok(config)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
        OutputFormat::Text => write!(stdout, "{}", text())?,
    }
    stdout.flush()?;
    Ok(())
}
