mod export;
mod render;
mod tui;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eascheck_core::{
    AppConfig, ConfigRepository, FileConfigRepository, JsonRecordSource, MonthKey, RawRecord,
    RecordSource, ReportUseCase, SageDetector,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::export::{DirectorySink, ExportFormat};
use crate::render::{render_grid, render_summary};

/// Bytes read from the input for the format check.
const SNIFF_BYTES: u64 = 8 * 1024;

#[derive(Parser)]
#[command(name = "eascheck")]
#[command(about = "EAS RWT/RMT compliance logs from Sage ENDEC exports", long_about = None)]
struct Cli {
    /// Config file (default: ~/.eascheck/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the compliance log for every month (or one, with --month YYYY/MM)
    Report {
        input: PathBuf,
        #[arg(long)]
        month: Option<String>,
    },
    /// Write one file per month under <out>/<year>/<MM>/
    Export {
        input: PathBuf,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Browse the months in the terminal UI
    View { input: PathBuf },
    /// Check whether a file looks like a Sage ENDEC log
    Detect { input: PathBuf },
    /// Show the active configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_repo(path: Option<PathBuf>) -> Result<FileConfigRepository> {
    match path {
        Some(path) => Ok(FileConfigRepository::at(path)),
        None => FileConfigRepository::new(None),
    }
}

fn sniff(path: &Path) -> Result<String> {
    let mut buf = Vec::new();
    File::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .take(SNIFF_BYTES)
        .read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn load_records(config: &AppConfig, input: &Path) -> Result<Vec<RawRecord>> {
    let detector = SageDetector::new(&config.detector);
    if !detector.looks_like_sage(&sniff(input)?) {
        warn!(path = %input.display(), "input does not look like a Sage ENDEC log, continuing anyway");
    }
    let records = JsonRecordSource::new(input, config.fields.direction.as_str()).records()?;
    info!(count = records.len(), "loaded raw records");
    Ok(records)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let repo = config_repo(cli.config)?;

    match cli.command {
        Commands::Report { input, month } => {
            let config = repo.load()?;
            let records = load_records(&config, &input)?;
            let report = ReportUseCase::new(&config).build(&records)?;

            match month {
                Some(m) => {
                    let key = MonthKey::parse(&m)
                        .ok_or_else(|| anyhow!("invalid month '{}', expected YYYY/MM", m))?;
                    let grid = report
                        .grid(key)
                        .ok_or_else(|| anyhow!("no RWT/RMT entries for {}", key))?;
                    println!("{}", grid.sheet_name);
                    println!("{}", render_grid(grid, true));
                }
                None => {
                    for month in report.months.values() {
                        println!("{}", month.grid.sheet_name);
                        println!("{}", render_grid(&month.grid, true));
                        println!();
                    }
                }
            }
            println!("{}", render_summary(&report.months, &report.stats));
        }
        Commands::Export { input, out, format } => {
            let config = repo.load()?;
            let records = load_records(&config, &input)?;
            let mut sink = DirectorySink::new(&out, format);
            let report = ReportUseCase::new(&config).run(&records, &mut sink)?;

            for path in sink.written() {
                println!("Wrote {}", path.display());
            }
            println!("{}", render_summary(&report.months, &report.stats));
        }
        Commands::View { input } => {
            let config = repo.load()?;
            let records = load_records(&config, &input)?;
            let report = ReportUseCase::new(&config).build(&records)?;
            tui::run(report)?;
        }
        Commands::Detect { input } => {
            let config = repo.load()?;
            let snippet = sniff(&input)?;
            let detector = SageDetector::new(&config.detector);
            let hits = detector.hits(&snippet);
            if detector.looks_like_sage(&snippet) {
                println!("Sage ENDEC log ({} markers: {})", hits.len(), hits.join(", "));
            } else {
                println!("Not recognized as a Sage ENDEC log ({} markers)", hits.len());
            }
        }
        Commands::Config { init } => {
            if init {
                if repo.init()? {
                    println!("Wrote default config to {}", repo.path().display());
                } else {
                    println!("Config already exists at {}", repo.path().display());
                }
            }
            let config = repo.load()?;
            println!("# {}", repo.path().display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
