//! Stratified sampling of labeled datasets with a paired media-copy step.
//!
//! The sampler draws a fixed per-category quota from each source dataset
//! and again from the union of all datasets, writes the subsets as CSV
//! mirrors of the input, and copies the sampled media files aside while
//! counting anything that is missing on disk.

mod copier;
mod driver;
mod stratified;

pub use copier::{CopyReport, copy_media};
pub use driver::{
    DatasetReport, DatasetSpec, SamplingError, SamplingOptions, SamplingSummary, run_sampling,
};
pub use stratified::{DEFAULT_QUOTA, DEFAULT_SEED, sample_by_category};
