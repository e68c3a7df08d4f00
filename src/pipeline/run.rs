//! The per-sample annotation loop.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::annotate::{
    SampleRecord, attach_labels, build_phrases, merge_record, read_description_csv,
    read_text_artifact,
};
use crate::config::AnnotateJob;
use crate::labels::{LabelError, load_label_table};
use crate::signal::{PeakError, load_signal_table, resolve_peak_index, select_peak};

use super::capabilities::{Capabilities, CapabilityError};

/// Outcome counts for one annotation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotateSummary {
    /// Samples merged into the output.
    pub processed: usize,
    /// Samples skipped after a per-sample failure.
    pub skipped: usize,
}

/// Structural failures that abort a run. Per-sample failures are logged
/// and counted instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("label table {path}: {source}")]
    Label { path: PathBuf, source: LabelError },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-sample peak annotation, written to the intermediate file so
/// external capability stages can run between the two passes.
#[derive(Debug, Clone, Serialize)]
struct PeakAnnotation {
    peak_frame: usize,
    peak_time: f64,
    au_phrases: Vec<String>,
    au_data: BTreeMap<String, f64>,
}

/// Run the annotation pipeline over every sample in the job's signal
/// directory and write the merged JSON array.
pub fn run_annotate(
    job: &AnnotateJob,
    capabilities: &Capabilities<'_>,
) -> Result<AnnotateSummary, PipelineError> {
    let sample_ids = discover_sample_ids(&job.signal_dir)?;
    info!(
        "Annotating {} samples from {}",
        sample_ids.len(),
        job.signal_dir.display()
    );

    let mut summary = AnnotateSummary::default();
    let mut peaks: BTreeMap<String, PeakAnnotation> = BTreeMap::new();
    let mut records: Vec<SampleRecord> = Vec::new();

    for sample_id in &sample_ids {
        let table_path = job.signal_dir.join(format!("{sample_id}.csv"));
        let table = match load_signal_table(&table_path, job.sample_rate) {
            Ok(table) => table,
            Err(err) => {
                warn!("Skipping {sample_id}: signal table failed to load: {err}");
                summary.skipped += 1;
                continue;
            }
        };
        let peak = match select_peak(&table, job.top_k) {
            Ok(peak) => peak,
            Err(PeakError::EmptyInput) => {
                warn!("Skipping {sample_id}: signal table has no frames");
                summary.skipped += 1;
                continue;
            }
        };
        let row_index = resolve_peak_index(table.frame_count(), peak.frame_index);
        let row = table.intensity_row(row_index);
        let phrase_set = build_phrases(&row, job.min_relevance);

        peaks.insert(
            sample_id.clone(),
            PeakAnnotation {
                peak_frame: peak.frame_index,
                peak_time: peak.timestamp,
                au_phrases: phrase_set.phrases.clone(),
                au_data: phrase_set.raw_values.clone(),
            },
        );

        let visual = visual_description(job, capabilities, sample_id, peak.frame_index);
        let audio = audio_description(job, capabilities, sample_id);
        let caption = caption_text(job, capabilities, sample_id);
        records.push(merge_record(sample_id, peak, phrase_set, visual, audio, caption));
        summary.processed += 1;
    }

    if let Some(path) = &job.intermediate_file {
        write_json(path, &peaks)?;
        info!("Wrote peak annotations for {} samples to {}", peaks.len(), path.display());
    }

    if let Some(label_path) = &job.label_file {
        let labels = load_label_table(label_path).map_err(|source| match source {
            LabelError::Io(err) => PipelineError::Io(err),
            other => PipelineError::Label {
                path: label_path.clone(),
                source: other,
            },
        })?;
        attach_labels(&mut records, &labels);
    }

    write_json(&job.output_file, &records)?;
    info!(
        "Wrote {} records to {} ({} skipped)",
        summary.processed,
        job.output_file.display(),
        summary.skipped
    );
    Ok(summary)
}

/// Sample ids are the stems of `.csv` files in the signal directory,
/// sorted for a deterministic processing order.
fn discover_sample_ids(signal_dir: &Path) -> Result<Vec<String>, PipelineError> {
    let mut ids = Vec::new();
    for entry in std::fs::read_dir(signal_dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            ids.push(stem.to_string());
        }
    }
    ids.sort();
    Ok(ids)
}

fn visual_description(
    job: &AnnotateJob,
    capabilities: &Capabilities<'_>,
    sample_id: &str,
    frame_index: usize,
) -> Option<String> {
    if let (Some(captioner), Some(media_dir)) = (capabilities.captioner, &job.media_dir) {
        let video = media_path(media_dir, sample_id, &job.media_ext);
        match captioner.caption_frame(&video, frame_index) {
            Ok(text) => return Some(text),
            Err(err) => log_capability_failure("captioner", sample_id, &err),
        }
    }
    let dir = job.visual_desc_dir.as_ref()?;
    read_description_csv(dir, sample_id)
}

fn audio_description(
    job: &AnnotateJob,
    capabilities: &Capabilities<'_>,
    sample_id: &str,
) -> Option<String> {
    if let (Some(describer), Some(media_dir)) = (capabilities.audio, &job.media_dir) {
        let media = media_path(media_dir, sample_id, &job.media_ext);
        match describer.describe_audio(&media) {
            Ok(text) => return Some(text),
            Err(err) => log_capability_failure("audio describer", sample_id, &err),
        }
    }
    let dir = job.audio_desc_dir.as_ref()?;
    read_text_artifact(dir, sample_id)
}

fn caption_text(
    job: &AnnotateJob,
    capabilities: &Capabilities<'_>,
    sample_id: &str,
) -> Option<String> {
    if let (Some(transcriber), Some(media_dir)) = (capabilities.transcriber, &job.media_dir) {
        let media = media_path(media_dir, sample_id, &job.media_ext);
        match transcriber.transcribe(&media) {
            Ok(text) => return Some(text),
            Err(err) => log_capability_failure("transcriber", sample_id, &err),
        }
    }
    let dir = job.caption_dir.as_ref()?;
    read_text_artifact(dir, sample_id)
}

fn media_path(media_dir: &Path, sample_id: &str, ext: &str) -> PathBuf {
    media_dir.join(format!("{sample_id}{ext}"))
}

fn log_capability_failure(capability: &str, sample_id: &str, err: &CapabilityError) {
    warn!("{capability} failed for {sample_id}, falling back to artifacts: {err}");
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
