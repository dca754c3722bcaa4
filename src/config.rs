use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::model::allowlist::default_keep_columns;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for both steps. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub label: LabelConfig,
    pub merge: MergeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub input: PathBuf,
    pub gene: String,
    pub quantile: f64,
    pub output: PathBuf,
    /// Header columns after the gene column that are not samples.
    pub annotation_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub patient: PathBuf,
    pub sample: PathBuf,
    pub labels: PathBuf,
    pub output: PathBuf,
    pub keep_columns: Vec<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/raw/data_mrna_seq_v2_rsem.txt"),
            gene: "CXCL13".to_string(),
            quantile: 0.75,
            output: PathBuf::from("data/processed/blca_tcga_CXCL13_enrichment.csv"),
            annotation_columns: Vec::new(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            patient: PathBuf::from("data/raw/data_clinical_patient.txt"),
            sample: PathBuf::from("data/raw/data_clinical_sample.txt"),
            labels: PathBuf::from("data/processed/blca_tcga_CXCL13_enrichment.csv"),
            output: PathBuf::from("data/processed/tcga_pancanceratlas_with_CXCL13subgroups.csv"),
            keep_columns: default_keep_columns(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
