//! Deployment records sidecar.
//!
//! A JSON array of `{ contract_id, type, network, deployed_at }` objects,
//! appended to on every deployment and read back to find "the last deployed
//! contract". The contract never reads this file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub contract_id: String,
    #[serde(rename = "type")]
    pub contract_type: String,
    pub network: String,
    pub deployed_at: DateTime<Utc>,
}

impl DeploymentRecord {
    pub fn new(contract_id: &str, contract_type: &str, network: &str) -> Self {
        Self {
            contract_id: contract_id.to_string(),
            contract_type: contract_type.to_string(),
            network: network.to_string(),
            deployed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("failed to access deployment records at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("deployment records at {path} are not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode deployment records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reads every record. A missing file is an empty history.
pub async fn load(path: &Path) -> Result<Vec<DeploymentRecord>, DeploymentError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(DeploymentError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|source| DeploymentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Appends `record` and returns the new number of records.
pub async fn append(path: &Path, record: DeploymentRecord) -> Result<usize, DeploymentError> {
    let mut records = load(path).await?;
    records.push(record);

    let io_err = |source| DeploymentError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    let content = serde_json::to_string_pretty(&records)?;
    fs::write(path, content).await.map_err(io_err)?;

    Ok(records.len())
}

/// Most recent record matching the optional filters. Records are ordered by
/// append order, not by `deployed_at`.
pub fn last_matching<'a>(
    records: &'a [DeploymentRecord],
    contract_type: Option<&str>,
    network: Option<&str>,
) -> Option<&'a DeploymentRecord> {
    records.iter().rev().find(|record| {
        contract_type.map_or(true, |t| record.contract_type == t)
            && network.map_or(true, |n| record.network == n)
    })
}
