use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::LoadError;
use crate::types::ResultsDocument;

pub const DEFAULT_DATA_PATH: &str = "telekino-data/resultados.json";

/// Where the results document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, everything else is a
    /// filesystem path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }

    pub async fn load(&self) -> Result<ResultsDocument, LoadError> {
        self.load_with(&reqwest::Client::new()).await
    }

    /// Same as [`DataSource::load`], fetching URLs through `client`.
    pub async fn load_with(&self, client: &reqwest::Client) -> Result<ResultsDocument, LoadError> {
        match self {
            DataSource::File(path) => read_results(path).await,
            DataSource::Url(url) => fetch_results(client, url).await,
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::File(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

pub async fn read_results(path: &Path) -> Result<ResultsDocument, LoadError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let document = parse_results(&raw)?;
    info!(path = %path.display(), bytes = raw.len(), "read results file");
    Ok(document)
}

pub async fn fetch_results(
    client: &reqwest::Client,
    url: &str,
) -> Result<ResultsDocument, LoadError> {
    info!(url = %url, "fetching results");
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let raw = response.text().await?;
    parse_results(&raw)
}

pub fn parse_results(raw: &str) -> Result<ResultsDocument, LoadError> {
    Ok(serde_json::from_str(raw)?)
}
