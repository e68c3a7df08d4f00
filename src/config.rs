//! Annotation job configuration.
//!
//! A job file is TOML describing where the per-sample inputs live and
//! where the merged output goes. Every field has a default so a job file
//! only needs to name what differs from the conventional layout; CLI
//! flags override the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::annotate::MIN_RELEVANCE;
use crate::signal::{DEFAULT_SAMPLE_RATE, DEFAULT_TOP_K};

/// Errors returned when loading a job file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read job file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse job file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// One annotation run over a directory of samples.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotateJob {
    /// Directory of per-sample signal tables (`{sample_id}.csv`).
    pub signal_dir: PathBuf,
    /// Directory of source media, used when live capabilities are wired in.
    pub media_dir: Option<PathBuf>,
    /// Media file extension, with leading dot.
    pub media_ext: String,
    /// Directory of peak-frame description artifacts (`{sample_id}.csv`).
    pub visual_desc_dir: Option<PathBuf>,
    /// Directory of audio description artifacts (`{sample_id}.txt`).
    pub audio_desc_dir: Option<PathBuf>,
    /// Directory of transcript artifacts (`{sample_id}.txt`).
    pub caption_dir: Option<PathBuf>,
    /// Ground-truth label CSV for late binding; optional.
    pub label_file: Option<PathBuf>,
    /// Merged JSON array output path.
    pub output_file: PathBuf,
    /// Optional intermediate per-sample peak annotations, keyed by id.
    pub intermediate_file: Option<PathBuf>,
    /// Frames per second of the signal tables.
    pub sample_rate: f64,
    /// Number of dominant units combined for peak ranking.
    pub top_k: usize,
    /// Minimum intensity before a unit contributes a phrase.
    pub min_relevance: f64,
}

impl Default for AnnotateJob {
    fn default() -> Self {
        Self {
            signal_dir: PathBuf::from("signal"),
            media_dir: None,
            media_ext: ".mp4".to_string(),
            visual_desc_dir: None,
            audio_desc_dir: None,
            caption_dir: None,
            label_file: None,
            output_file: PathBuf::from("annotations.json"),
            intermediate_file: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            top_k: DEFAULT_TOP_K,
            min_relevance: MIN_RELEVANCE,
        }
    }
}

/// Load a job description from a TOML file.
pub fn load_job(path: &Path) -> Result<AnnotateJob, ConfigError> {
    parse_toml(path)
}

/// Load sampling options from a TOML file with a `[[datasets]]` array.
pub fn load_sampling(path: &Path) -> Result<crate::sampling::SamplingOptions, ConfigError> {
    parse_toml(path)
}

fn parse_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
