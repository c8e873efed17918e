// DayLog - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (CLI flags override file values)
// 3. Diagnostic logging initialisation
// 4. Dispatch to write / read / list against one LogStore

use clap::{Parser, Subcommand};
use daylog::app::history;
use daylog::app::store::{LogStore, StoreConfig};
use daylog::core::model::{LogFormat, LogLevel, LogTarget, RotationPolicy, SourceLocation};
use daylog::platform::config::{self, AppConfig, PlatformPaths};
use daylog::util;
use daylog::util::error::{ConfigError, ExportError, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// DayLog - leveled, day-rotating log store.
///
/// Appends records to `<dir>/<base>-<YYYY-MM-DD>.<txt|csv>` and reads a
/// day's history back.
#[derive(Parser, Debug)]
#[command(name = "daylog", version, about)]
struct Cli {
    /// Directory holding the log files (default: config value or current directory).
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Path to config.toml (default: platform config directory).
    /// An explicit path that cannot be read or parsed is an error.
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Threshold: none, error, warning, debug, info.
    #[arg(long, global = true)]
    level: Option<LogLevel>,

    /// Destination: none, console, file, both.
    #[arg(long, global = true)]
    target: Option<LogTarget>,

    /// File format: txt or csv.
    #[arg(long, global = true)]
    format: Option<LogFormat>,

    /// Rotation: per-write or pinned.
    #[arg(long, global = true)]
    rotation: Option<RotationPolicy>,

    /// File name prefix before the date.
    #[arg(long, global = true)]
    base_name: Option<String>,

    /// Enable debug diagnostics (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append one record.
    Write {
        /// Severity of this record.
        #[arg(short = 's', long, default_value = "info")]
        severity: LogLevel,

        /// Source file recorded with the message.
        #[arg(long, default_value = "daylog")]
        file: String,

        /// Function recorded with the message.
        #[arg(long, default_value = "main")]
        function: String,

        /// Line number recorded with the message.
        #[arg(long, default_value_t = 0)]
        line: u32,

        /// Message text (joined with spaces).
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Print the log for one day.
    Read {
        /// Day to read, as YYYY-MM-DD.
        date: String,

        /// Print parsed records as JSON instead of raw lines.
        #[arg(long, conflicts_with = "csv")]
        json: bool,

        /// Print parsed records as quoted CSV instead of raw lines.
        #[arg(long)]
        csv: bool,
    },

    /// List log files in the directory.
    List,
}

/// Apply CLI overrides on top of the file configuration.
fn merge(cli: &Cli, mut cfg: AppConfig) -> AppConfig {
    if let Some(level) = cli.level {
        cfg.level = level;
    }
    if let Some(target) = cli.target {
        cfg.target = target;
    }
    if let Some(format) = cli.format {
        cfg.format = format;
    }
    if let Some(rotation) = cli.rotation {
        cfg.rotation = rotation;
    }
    if let Some(ref dir) = cli.dir {
        cfg.directory = Some(dir.clone());
    }
    if let Some(ref name) = cli.base_name {
        if config::is_valid_base_name(name) {
            cfg.base_name = name.clone();
        } else {
            tracing::warn!(base_name = %name, "Ignoring invalid --base-name");
        }
    }
    cfg
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (file_config, mut problems) = config::load_config(&config_path);

    util::logging::init(cli.debug, file_config.diagnostic_level.as_deref());

    // A bad value falls back to its default; an unreadable file named on
    // the command line does not.
    if cli.config.is_some() {
        if let Some(pos) = problems
            .iter()
            .position(|p| !matches!(p, ConfigError::InvalidValue { .. }))
        {
            return Err(problems.swap_remove(pos).into());
        }
    }
    for problem in &problems {
        tracing::warn!(error = %problem, "Config problem; using default");
    }

    let cfg = merge(&cli, file_config);
    let store_config = StoreConfig {
        directory: cfg
            .directory
            .clone()
            .unwrap_or_else(|| StoreConfig::default().directory),
        base_name: cfg.base_name.clone(),
        rotation: cfg.rotation,
    };
    tracing::debug!(
        dir = %store_config.directory.display(),
        config = %config_path.display(),
        "Starting"
    );
    let store = LogStore::new(store_config);

    match cli.command {
        Command::Write {
            severity,
            file,
            function,
            line,
            message,
        } => {
            store.init(cfg.level, cfg.target, cfg.format)?;
            let text = message.join(" ");
            let location = SourceLocation::new(&file, &function, line);
            if !store.write(severity, location, &text) {
                eprintln!(
                    "Record not written ({severity} under threshold {}, target {})",
                    cfg.level, cfg.target
                );
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Read { date, json, csv } => {
            // Reading must not create the directory, so no init here.
            store.set_format(cfg.format);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if json || csv {
                let rows = store.read_rows_by_date(&date)?;
                if json {
                    history::export_json(&rows, &mut out)?;
                    writeln!(out).map_err(|e| ExportError::Io { source: e })?;
                } else {
                    history::export_csv(&rows, &mut out)?;
                }
            } else {
                for line in store.read_by_date(&date)? {
                    writeln!(out, "{line}").map_err(|e| ExportError::Io { source: e })?;
                }
            }
        }
        Command::List => {
            for name in store.log_files()? {
                println!("{name}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
