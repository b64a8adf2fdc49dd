mod check;
mod settings;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use settings::Settings;

#[derive(Parser)]
#[command(name = "rulesraker", about = "Magic: The Gathering Comprehensive Rules parser")]
struct Cli {
    /// Directory where the comprehensive rules are stored
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the .txt rules file into a .json file
    #[command(alias = "p")]
    Parse {
        /// Rules text to read (default: <data>/MagicCompRules.txt)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Where to write JSON (default: <data>/MagicCompRules.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse every archived rules file and report which ones fail
    Check {
        /// Directory of YYYY-MM-DD.txt files
        #[arg(short, long)]
        archive: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(data) = cli.data {
        settings.data_dir = data;
    }
    info!(settings = ?settings, "Starting rulesraker");

    let code = match cli.command {
        Commands::Parse { input, output } => {
            let input = input.unwrap_or_else(|| settings.data_dir.join("MagicCompRules.txt"));
            let output = output.unwrap_or_else(|| settings.data_dir.join("MagicCompRules.json"));
            parse_to_json(&input, &output)?
        }
        Commands::Check { archive } => {
            let dir = archive.unwrap_or_else(|| settings.archive_dir.clone());
            let (stats, reports) = check::check_archive(&dir, &settings)?;
            for report in &reports {
                if let check::Outcome::Failed(err) = &report.outcome {
                    println!("FAIL {}\n{}\n", report.path.display(), err);
                }
            }
            stats.print();
            if stats.failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    info!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(code)
}

fn parse_to_json(input: &Path, output: &Path) -> Result<ExitCode> {
    info!("Parsing {}", input.display());
    let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;

    let ruleset = match rulesraker::parse(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let out = File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut writer, &ruleset)?;
    writeln!(writer)?;
    writer.flush()?;

    println!(
        "Wrote {} rules, {} glossary items (effective {}) to {}",
        ruleset.rules.len(),
        ruleset.glossary.len(),
        ruleset.effective_date,
        output.display()
    );
    Ok(ExitCode::SUCCESS)
}
