use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{DEFAULT_DATA_PATH, DataSource};

#[derive(Debug, Clone, Parser)]
#[command(name = "telekino-viewer", about = "Browse published Telekino draw results")]
pub struct Config {
    /// Results document: a file path or an http(s) URL.
    #[arg(long, env = "TELEKINO_DATA_SOURCE", default_value = DEFAULT_DATA_PATH)]
    pub source: String,

    /// Delay between the loading placeholder and the selected draw.
    #[arg(long, env = "TELEKINO_SELECT_DELAY_MS", default_value_t = 300)]
    pub select_delay_ms: u64,

    /// Save the final page as an HTML document here.
    #[arg(long, env = "TELEKINO_REPORT_PATH")]
    pub report_path: Option<PathBuf>,

    /// Render the current draw and exit without reading selections.
    #[arg(long, env = "TELEKINO_ONCE")]
    pub once: bool,
}

impl Config {
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source)
    }

    pub fn select_delay(&self) -> Duration {
        Duration::from_millis(self.select_delay_ms)
    }
}

pub fn load() -> Result<Config> {
    Ok(Config::try_parse()?)
}
