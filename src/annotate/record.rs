//! Final per-sample record assembly and ground-truth late binding.

use serde::{Serialize, Serializer};

use crate::labels::LabelTable;
use crate::signal::PeakResult;

use super::phrases::PhraseSet;

/// Extension appended to a sample id to form the label-table join key.
pub const VIDEO_ID_SUFFIX: &str = ".mp4";

/// One merged annotation record, serialized as one element of the output
/// JSON array.
///
/// Free-text fields serialize as `""` when their source artifact was
/// absent; the ground-truth `discrete`/`valence` fields are omitted
/// entirely until [`attach_labels`] finds a matching label row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SampleRecord {
    /// Sample id plus [`VIDEO_ID_SUFFIX`].
    pub video_id: String,
    /// Peak timestamp in seconds.
    pub peak_time: f64,
    /// Action-unit phrases at the peak frame, vocabulary order.
    pub visual_expression_description: Vec<String>,
    /// Externally produced description of the peak frame.
    #[serde(serialize_with = "text_or_empty")]
    pub visual_objective_description: Option<String>,
    /// Raw per-unit intensities at the peak frame.
    #[serde(rename = "raw_AU_values_at_peak")]
    pub raw_au_values_at_peak: std::collections::BTreeMap<String, f64>,
    /// Placeholder filled by a later summarization stage.
    #[serde(rename = "coarse-grained_summary")]
    pub coarse_grained_summary: String,
    /// Placeholder filled by a later summarization stage.
    #[serde(rename = "fine-grained_summary")]
    pub fine_grained_summary: String,
    /// Externally produced description of the audio track.
    #[serde(serialize_with = "text_or_empty")]
    pub audio_description: Option<String>,
    /// Speech transcript.
    #[serde(serialize_with = "text_or_empty")]
    pub caption: Option<String>,
    /// Ground-truth category label, bound late from the label table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discrete: Option<String>,
    /// Ground-truth valence score, bound late from the label table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valence: Option<f64>,
}

fn text_or_empty<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

/// Assemble a record from the per-sample pieces. Pure; never fails.
pub fn merge_record(
    sample_id: &str,
    peak: PeakResult,
    phrase_set: PhraseSet,
    visual_desc: Option<String>,
    audio_desc: Option<String>,
    caption: Option<String>,
) -> SampleRecord {
    SampleRecord {
        video_id: format!("{sample_id}{VIDEO_ID_SUFFIX}"),
        peak_time: peak.timestamp,
        visual_expression_description: phrase_set.phrases,
        visual_objective_description: visual_desc,
        raw_au_values_at_peak: phrase_set.raw_values,
        coarse_grained_summary: String::new(),
        fine_grained_summary: String::new(),
        audio_description: audio_desc,
        caption,
        discrete: None,
        valence: None,
    }
}

/// Bind ground-truth labels onto records by `video_id`.
///
/// Records without a matching label row keep their label fields unset;
/// that is expected for partially labeled collections, not an error.
pub fn attach_labels(records: &mut [SampleRecord], labels: &LabelTable) {
    for record in records {
        if let Some(row) = labels.lookup_video(&record.video_id) {
            record.discrete = Some(row.category.clone());
            record.valence = Some(row.valence);
        }
    }
}
