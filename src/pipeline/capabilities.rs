//! Capability seams for external models.
//!
//! Frame captioning, audio description, and transcription are delegated to
//! pretrained models or remote services. The pipeline only sees these
//! traits; a concrete implementation is constructed once by the caller and
//! passed in by reference, so no model or client state hides in globals.

use std::path::Path;

use thiserror::Error;

/// Failure of one external invocation. Per-sample capability failures are
/// logged and degrade to an absent description; they never abort the batch.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The external process or service reported a failure.
    #[error("external invocation failed: {0}")]
    Invocation(String),
    /// The media input could not be opened or decoded.
    #[error("media error for {path}: {message}")]
    Media { path: std::path::PathBuf, message: String },
}

/// Describes the visual content of one frame of a video.
///
/// Implementations must release any decode handle before returning, even
/// when the read fails.
pub trait FrameCaptioner {
    /// Caption the frame at `frame_index` of `video`.
    fn caption_frame(&self, video: &Path, frame_index: usize) -> Result<String, CapabilityError>;
}

/// Describes the audio track of a media file.
pub trait AudioDescriber {
    /// Describe the audio content of `media`.
    fn describe_audio(&self, media: &Path) -> Result<String, CapabilityError>;
}

/// Transcribes the speech in a media file.
pub trait Transcriber {
    /// Transcribe the speech in `media`.
    fn transcribe(&self, media: &Path) -> Result<String, CapabilityError>;
}

/// The optional set of live capabilities for one run.
///
/// Any capability left unset falls back to the artifact directories named
/// in the job configuration.
#[derive(Default)]
pub struct Capabilities<'a> {
    /// Peak-frame captioner.
    pub captioner: Option<&'a dyn FrameCaptioner>,
    /// Audio describer.
    pub audio: Option<&'a dyn AudioDescriber>,
    /// Speech transcriber.
    pub transcriber: Option<&'a dyn Transcriber>,
}

impl Capabilities<'_> {
    /// A set with no live capabilities; everything comes from artifacts.
    pub fn none() -> Self {
        Self::default()
    }
}
