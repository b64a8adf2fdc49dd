use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use config::{Config, Environment};
use serde::Deserialize;

/// Archive files older than this use a layout the parser does not handle.
const FORMAT_CHANGE_DATE: &str = "2013-07-11";

/// Archive files known to be UTF-16 encoded.
const UTF16_FILES: &[&str] = &["2016-08-26", "2016-09-30", "2022-11-18"];

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub min_archive_date: NaiveDate,
    pub skip: Vec<String>,
}

impl Settings {
    /// Defaults, overridden by `RULESRAKER_*` environment variables.
    pub fn load() -> Result<Self> {
        Config::builder()
            .set_default("data_dir", "data")?
            .set_default("archive_dir", "archive/txt")?
            .set_default("min_archive_date", FORMAT_CHANGE_DATE)?
            .set_default("skip", UTF16_FILES.to_vec())?
            .add_source(
                Environment::with_prefix("RULESRAKER")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("skip"),
            )
            .build()
            .context("failed to load settings")?
            .try_deserialize()
            .context("invalid settings")
    }
}
