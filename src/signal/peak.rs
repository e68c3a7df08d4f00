//! Peak-frame selection over a loaded signal table.

use thiserror::Error;
use tracing::warn;

use super::table::SignalTable;

/// Number of dominant units combined when ranking frames.
pub const DEFAULT_TOP_K: usize = 3;

/// Errors returned by peak selection.
#[derive(Debug, Error)]
pub enum PeakError {
    /// The table holds no frames, so no peak exists.
    #[error("signal table has no frames")]
    EmptyInput,
}

/// The frame where the dominant units' combined intensity is maximal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakResult {
    /// Zero-based frame index into the source table.
    pub frame_index: usize,
    /// Frame index converted to seconds via the table's sample rate.
    pub timestamp: f64,
}

/// Select the peak frame of a signal table.
///
/// Units are ranked by how often their presence channel fires across the
/// whole clip; the `top_k` most frequent units' intensities are summed per
/// frame and the first frame with the maximal sum wins. Ties in the
/// frequency ranking keep original column order. Tables with fewer than
/// `top_k` units use all of them.
pub fn select_peak(table: &SignalTable, top_k: usize) -> Result<PeakResult, PeakError> {
    if table.is_empty() {
        return Err(PeakError::EmptyInput);
    }

    let frequencies: Vec<f64> = (0..table.units().len())
        .map(|unit_idx| table.presence_frequency(unit_idx))
        .collect();
    let mut ranked: Vec<usize> = (0..table.units().len()).collect();
    // Stable sort keeps column order for equal frequencies.
    ranked.sort_by(|&a, &b| frequencies[b].total_cmp(&frequencies[a]));
    ranked.truncate(top_k.min(ranked.len()));

    let mut best_frame = 0usize;
    let mut best_sum = f64::NEG_INFINITY;
    for frame in 0..table.frame_count() {
        let sum: f64 = ranked
            .iter()
            .map(|&unit_idx| table.intensity_at(unit_idx, frame))
            .sum();
        // Strict comparison keeps the first occurrence on ties.
        if sum > best_sum {
            best_sum = sum;
            best_frame = frame;
        }
    }

    Ok(PeakResult {
        frame_index: best_frame,
        timestamp: table.timestamp_of(best_frame),
    })
}

/// Clamp a peak index against the length of the table it will be read from.
///
/// Peak selection and the later row lookup can run against tables of
/// differing length (e.g., resampled exports); an out-of-range index falls
/// back to the midpoint. The mismatch is logged so misaligned inputs stay
/// visible rather than being silently masked.
pub fn resolve_peak_index(table_len: usize, peak_index: usize) -> usize {
    if peak_index < table_len {
        return peak_index;
    }
    let fallback = table_len / 2;
    warn!(
        peak_index,
        table_len, fallback, "peak index out of range; falling back to table midpoint"
    );
    fallback
}
