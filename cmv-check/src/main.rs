//! cmv-check - classical album metadata checker
//!
//! Loads an album descriptor (and optionally a reference), runs the standard
//! rule library and prints a report. Logs go to stderr, the report to stdout.
//!
//! Exit codes: 0 passed, 1 gate failure, 2 usage, I/O or parse error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cmv_common::config::CheckConfig;
use cmv_common::{Album, Clock, FixedClock, Severity};
use cmv_rules::{Engine, RuleRegistry};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod report;

use report::{Format, GateFailure};

/// Command-line arguments for cmv-check
#[derive(Parser, Debug)]
#[command(name = "cmv-check")]
#[command(about = "Check classical album metadata against cataloguing rules")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CMV_BUILD_ID"), ")")
)]
struct Args {
    /// Album descriptor (JSON)
    #[arg(required_unless_present = "list_rules")]
    album: Option<PathBuf>,

    /// Trusted reference descriptor (JSON)
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Configuration file (TOML); overrides CMV_CONFIG
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lowest severity to report (info, warning, error)
    #[arg(long)]
    min_severity: Option<Severity>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Pin the current year used by date rules
    #[arg(long)]
    year: Option<i32>,

    /// List installed rules and exit
    #[arg(long)]
    list_rules: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(level: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_album(path: &Path) -> Result<Album> {
    let album = Album::from_json_file(path)
        .with_context(|| format!("Failed to load album descriptor {}", path.display()))?;
    debug!(path = %path.display(), tracks = album.tracks.len(), "Loaded album descriptor");
    Ok(album)
}

fn build_engine(config: &CheckConfig, year: Option<i32>) -> Result<Engine> {
    let standard = RuleRegistry::standard();
    for id in &config.disabled_rules {
        if !standard.contains(id) {
            warn!("Disabled rule '{}' is not installed; ignoring", id);
        }
    }
    let registry = standard.without(config.disabled_rules.as_slice());

    let clock: Box<dyn Clock> = match year {
        Some(year) => Box::new(FixedClock(year)),
        None => config.clock(),
    };
    let engine = Engine::new(registry)
        .context("Rule registry is invalid")?
        .with_clock(clock);
    info!(
        "{} rules installed ({} disabled)",
        engine.registry().len(),
        config.disabled_rules.len()
    );
    Ok(engine)
}

fn run(args: Args) -> Result<ExitCode> {
    let config = CheckConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    info!(
        "Starting cmv-check v{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("CMV_BUILD_ID")
    );

    let engine = build_engine(&config, args.year)?;

    if args.list_rules {
        print!("{}", report::render_rules(&engine.registry().metadata()));
        return Ok(ExitCode::SUCCESS);
    }

    let album_path = args.album.context("An album descriptor is required")?;
    let album = load_album(&album_path)?;
    let reference = args.reference.as_deref().map(load_album).transpose()?;

    let result = engine.check(&album, reference.as_ref());

    let min_severity = args.min_severity.unwrap_or(config.min_severity);
    match args.format {
        Format::Text => print!("{}", report::render_text(&result, min_severity)),
        Format::Json => println!(
            "{}",
            report::render_json(&result, min_severity).context("Failed to serialize report")?
        ),
    }

    let failures = report::gate(&result, config.fail_on, config.min_score);
    for failure in &failures {
        match failure {
            GateFailure::Severity { severity, count } => {
                warn!("{} issue(s) at or above {}", count, severity)
            }
            GateFailure::Score { score, min_score } => {
                warn!("Score {:.2} is below the minimum {:.2}", score, min_score)
            }
        }
    }

    Ok(if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "cmv-check",
            "album.json",
            "--reference",
            "ref.json",
            "--min-severity",
            "warning",
            "--format",
            "json",
            "--year",
            "2024",
        ])
        .unwrap();
        assert_eq!(args.album, Some(PathBuf::from("album.json")));
        assert_eq!(args.min_severity, Some(Severity::Warning));
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.year, Some(2024));

        assert!(Args::try_parse_from(["cmv-check"]).is_err());
        assert!(Args::try_parse_from(["cmv-check", "--list-rules"]).is_ok());
        assert!(Args::try_parse_from(["cmv-check", "a.json", "--min-severity", "loud"]).is_err());
    }

    #[test]
    fn test_build_engine_applies_config() {
        let config = CheckConfig::from_toml_str(
            r#"
            current_year = 2030
            disabled_rules = ["classical.guest", "no.such.rule"]
            "#,
        )
        .unwrap();
        let engine = build_engine(&config, None).unwrap();
        assert_eq!(engine.registry().len(), 27);
        assert!(!engine.registry().contains("classical.guest"));
    }

    #[test]
    fn test_load_album_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_album(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains(&file.path().display().to_string()));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "Goldberg Variations", "tracks": []}}"#).unwrap();
        assert_eq!(load_album(file.path()).unwrap().title, "Goldberg Variations");
    }
}
