use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Dataset;
use crate::error::{HeatmapError, HeatmapResult};

pub const REFERENCE_DATASET_URL: &str = "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Network settings for remote dataset loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Whole-request timeout; `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: concat!("heatmap-rs/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Where a dataset document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Json(String),
    File(PathBuf),
    Url(String),
}

impl DatasetSource {
    #[must_use]
    pub fn reference() -> Self {
        Self::Url(REFERENCE_DATASET_URL.to_owned())
    }
}

/// Loads and validates a dataset in one shot. No retries.
pub fn load_dataset(source: &DatasetSource, config: &LoaderConfig) -> HeatmapResult<Dataset> {
    let raw = match source {
        DatasetSource::Json(raw) => raw.clone(),
        DatasetSource::File(path) => read_file(path)?,
        DatasetSource::Url(url) => fetch_url(url, config)?,
    };
    let dataset = Dataset::from_json_str(&raw).inspect_err(|err| {
        warn!(error = %err, "rejected dataset document");
    })?;
    debug!(records = dataset.len(), "loaded dataset");
    Ok(dataset)
}

fn read_file(path: &Path) -> HeatmapResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| HeatmapError::Load(format!("failed to read `{}`: {e}", path.display())))
}

#[cfg(feature = "fetch")]
fn fetch_url(url: &str, config: &LoaderConfig) -> HeatmapResult<String> {
    let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout_secs) = config.timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(timeout_secs));
    }
    let client = builder
        .build()
        .map_err(|e| HeatmapError::Load(format!("http client error: {e}")))?;

    debug!(url, "fetching dataset");
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| HeatmapError::Load(format!("request to `{url}` failed: {e}")))?
        .text()
        .map_err(|e| HeatmapError::Load(format!("failed to read response body: {e}")))
}

#[cfg(not(feature = "fetch"))]
fn fetch_url(url: &str, _config: &LoaderConfig) -> HeatmapResult<String> {
    Err(HeatmapError::Load(format!(
        "cannot fetch `{url}`: built without feature `fetch`"
    )))
}
