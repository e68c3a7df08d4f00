//! Per-sample annotation pipeline.
//!
//! Chains the signal loader, peak selector, enrichment, and record merge
//! for every sample discovered under the job's signal directory. External
//! models sit behind the capability traits; when none are wired in, their
//! outputs are read from artifact directories instead.

mod capabilities;
mod run;

pub use capabilities::{AudioDescriber, Capabilities, CapabilityError, FrameCaptioner, Transcriber};
pub use run::{AnnotateSummary, PipelineError, run_annotate};
