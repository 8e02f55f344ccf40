use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ledgersplit_core::Checkpoint;
use ledgersplit_finance::{ExportedWorkbook, process_export};
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "ledgersplit",
    version,
    about = "Finance Processor: split a transaction export into income and expense sheets"
)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG / config
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter, split and export one CSV to `<Month>-<Year>.xlsx`
    Process {
        /// Transaction export CSV
        #[arg(long)]
        csv: PathBuf,

        /// Output directory (default: config `output.dir`)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.ledgersplit/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    path: String,
    #[serde(flatten)]
    workbook: &'a ExportedWorkbook,
}

fn init_logging(default_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(&cfg.log.level, cli.verbose);
    debug!(?cfg, "loaded config");

    match cli.command {
        Command::Process { csv, out_dir, json } => {
            let out_dir = out_dir.unwrap_or_else(|| cfg.output.dir.clone());
            process(&csv, &out_dir, json)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn process(csv_path: &Path, out_dir: &Path, json: bool) -> Result<()> {
    if !csv_path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv_path.display());
    }
    let file = File::open(csv_path).with_context(|| format!("open {}", csv_path.display()))?;

    let mut progress = |c: Checkpoint| eprintln!("[{:>3}%] {}", c.percent(), c.label());
    let out = process_export(file, &mut progress)?;

    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let path = out_dir.join(&out.filename);
    fs::write(&path, &out.bytes).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = out.bytes.len(), "saved workbook");

    if json {
        let summary = RunSummary {
            path: path.display().to_string(),
            workbook: &out,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Successfully processed data for {}", out.month_year);
    println!("Wrote {} ({})", path.display(), out.mime);
    println!(
        "Income rows: {} | Expense rows: {} | Excluded: {}",
        out.income_rows, out.expense_rows, out.excluded_rows
    );
    println!(
        "Income total: {:.2} | Expense total: {:.2}",
        out.income_total, out.expense_total
    );
    for (rule, count) in out.excluded_by_rule.iter().filter(|(_, n)| *n > 0) {
        println!("  - {rule}: {count}");
    }

    Ok(())
}
