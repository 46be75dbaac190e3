use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use randjson_core::GenerateConfig;

use crate::errors::GenerationError;

/// Options for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// File the document is written to.
    pub output_path: PathBuf,
    /// Shape of the generated document.
    pub config: GenerateConfig,
}

impl GenerateOptions {
    pub fn new(output_path: impl Into<PathBuf>, config: GenerateConfig) -> Self {
        Self {
            output_path: output_path.into(),
            config,
        }
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub started_at: String,
    pub output_path: PathBuf,
    pub seed: u64,
    pub data_count: u64,
    /// Generated values per kind, the root excluded.
    pub values_by_kind: BTreeMap<String, u64>,
    /// Containers in the tree, the root included.
    pub containers: u64,
    pub max_depth: usize,
    pub writes: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    /// Write the report as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<(), GenerationError> {
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}
