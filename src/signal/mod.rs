//! Action-unit signal tables and peak-frame selection.
//!
//! A signal table is the per-video time series produced by an external facial
//! action-unit extractor: one row per frame, one presence and one intensity
//! channel per named unit. Peak selection reduces the table to the single
//! frame where the dominant units are most intense.

mod peak;
mod table;

pub use peak::{DEFAULT_TOP_K, PeakError, PeakResult, resolve_peak_index, select_peak};
pub use table::{
    DEFAULT_SAMPLE_RATE, INTENSITY_SUFFIX, PRESENCE_SUFFIX, SignalLoadError, SignalTable,
    load_signal_table,
};
