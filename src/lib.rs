//! Library exports for the emotion-annotation curation tools.
/// Application directory helpers.
pub mod app_dirs;
/// Annotation phrases, auxiliary artifacts, and record assembly.
pub mod annotate;
/// Annotation job configuration.
pub mod config;
/// Ground-truth label tables.
pub mod labels;
/// Logging setup.
pub mod logging;
/// Per-sample annotation pipeline.
pub mod pipeline;
/// Stratified sampling of labeled datasets.
pub mod sampling;
/// Action-unit signal tables and peak selection.
pub mod signal;
