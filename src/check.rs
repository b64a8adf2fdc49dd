use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::settings::Settings;

pub enum Outcome {
    Passed,
    Skipped(&'static str),
    Failed(String),
}

pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Result counts returned after a check run.
pub struct CheckStats {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl CheckStats {
    pub fn print(&self) {
        println!(
            "{} passed, {} failed, {} skipped.",
            self.passed, self.failed, self.skipped
        );
    }
}

/// Archive files are named after the date they took effect.
fn archive_date(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}

fn list_archive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn skip_reason(path: &Path, settings: &Settings) -> Option<&'static str> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if settings.skip.iter().any(|s| s == stem) {
        return Some("listed in skip");
    }
    match archive_date(path) {
        Some(date) if date < settings.min_archive_date => Some("predates supported format"),
        _ => None,
    }
}

fn check_file(path: &Path) -> Outcome {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => return Outcome::Failed(e.to_string()),
    };
    match rulesraker::parse(file) {
        Ok(ruleset) if ruleset.rules.is_empty() => Outcome::Failed("no rules parsed".into()),
        Ok(ruleset) if ruleset.glossary.is_empty() => {
            Outcome::Failed("no glossary items parsed".into())
        }
        Ok(_) => Outcome::Passed,
        Err(e) => Outcome::Failed(e.to_string()),
    }
}

/// Parse every archived document, in parallel.
pub fn check_archive(dir: &Path, settings: &Settings) -> Result<(CheckStats, Vec<FileReport>)> {
    let paths = list_archive(dir)?;
    info!("Checking {} archived documents in {}", paths.len(), dir.display());

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let reports: Vec<FileReport> = paths
        .into_par_iter()
        .map(|path| {
            let outcome = match skip_reason(&path, settings) {
                Some(reason) => Outcome::Skipped(reason),
                None => check_file(&path),
            };
            pb.inc(1);
            FileReport { path, outcome }
        })
        .collect();
    pb.finish_and_clear();

    let mut stats = CheckStats {
        passed: 0,
        failed: 0,
        skipped: 0,
    };
    for report in &reports {
        match &report.outcome {
            Outcome::Passed => stats.passed += 1,
            Outcome::Failed(_) => stats.failed += 1,
            Outcome::Skipped(reason) => {
                debug!(path = %report.path.display(), reason, "skipped");
                stats.skipped += 1;
            }
        }
    }

    Ok((stats, reports))
}
