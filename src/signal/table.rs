//! Loader for per-video action-unit tables exported as delimited text.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Header suffix marking a binary presence channel.
pub const PRESENCE_SUFFIX: &str = "_c";
/// Header suffix marking a continuous intensity channel.
pub const INTENSITY_SUFFIX: &str = "_r";
/// Frames per second used to convert a frame index to a timestamp.
pub const DEFAULT_SAMPLE_RATE: f64 = 30.0;

/// Errors returned when loading a signal table.
#[derive(Debug, Error)]
pub enum SignalLoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing header row")]
    MissingHeader,
    #[error("no presence/intensity channel pairs in header")]
    NoChannels,
    #[error("unpaired channel for unit {0}")]
    UnpairedUnit(String),
    #[error("line {line}: malformed numeric cell in column {column}: {value:?}")]
    MalformedCell {
        line: usize,
        column: String,
        value: String,
    },
    #[error("line {line}: row has {got} cells, header has {expected}")]
    RaggedRow {
        line: usize,
        got: usize,
        expected: usize,
    },
}

/// Time-ordered presence/intensity channels for one video, column-major.
#[derive(Debug, Clone)]
pub struct SignalTable {
    units: Vec<String>,
    presence: Vec<Vec<f64>>,
    intensity: Vec<Vec<f64>>,
    frame_count: usize,
    sample_rate: f64,
}

impl SignalTable {
    /// Number of frames (rows) in the table.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// True when the table holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Unit names in original column order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Frames-per-second rate the table was loaded with.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Sum of a unit's presence channel over all frames.
    pub fn presence_frequency(&self, unit_idx: usize) -> f64 {
        self.presence[unit_idx].iter().sum()
    }

    /// Intensity of a unit at one frame.
    pub fn intensity_at(&self, unit_idx: usize, frame: usize) -> f64 {
        self.intensity[unit_idx][frame]
    }

    /// Timestamp of a frame index in seconds.
    pub fn timestamp_of(&self, frame: usize) -> f64 {
        frame as f64 / self.sample_rate
    }

    /// All unit intensities at one frame, keyed by unit name.
    pub fn intensity_row(&self, frame: usize) -> BTreeMap<String, f64> {
        self.units
            .iter()
            .enumerate()
            .map(|(idx, unit)| (unit.clone(), self.intensity[idx][frame]))
            .collect()
    }
}

/// Load a signal table from delimited text with a header row.
///
/// Presence columns end in [`PRESENCE_SUFFIX`], intensity columns in
/// [`INTENSITY_SUFFIX`]; the two sets must pair up by unit name. Other
/// columns (frame counters, confidences) are ignored.
pub fn load_signal_table(path: &Path, sample_rate: f64) -> Result<SignalTable, SignalLoadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines.next().ok_or(SignalLoadError::MissingHeader)??;
    let headers: Vec<String> = header_line
        .split(',')
        .map(|cell| cell.trim().to_string())
        .collect();

    let mut units = Vec::new();
    let mut presence_cols = Vec::new();
    for (col, header) in headers.iter().enumerate() {
        if let Some(unit) = header.strip_suffix(PRESENCE_SUFFIX) {
            units.push(unit.to_string());
            presence_cols.push(col);
        }
    }
    let mut intensity_cols = Vec::with_capacity(units.len());
    for unit in &units {
        let wanted = format!("{unit}{INTENSITY_SUFFIX}");
        let col = headers
            .iter()
            .position(|header| *header == wanted)
            .ok_or_else(|| SignalLoadError::UnpairedUnit(unit.clone()))?;
        intensity_cols.push(col);
    }
    for header in &headers {
        if let Some(unit) = header.strip_suffix(INTENSITY_SUFFIX) {
            if !units.iter().any(|known| known == unit) {
                return Err(SignalLoadError::UnpairedUnit(unit.to_string()));
            }
        }
    }
    if units.is_empty() {
        return Err(SignalLoadError::NoChannels);
    }

    let mut presence: Vec<Vec<f64>> = vec![Vec::new(); units.len()];
    let mut intensity: Vec<Vec<f64>> = vec![Vec::new(); units.len()];
    let mut frame_count = 0usize;
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 2;
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != headers.len() {
            return Err(SignalLoadError::RaggedRow {
                line: line_no,
                got: cells.len(),
                expected: headers.len(),
            });
        }
        for (unit_idx, (&p_col, &i_col)) in
            presence_cols.iter().zip(intensity_cols.iter()).enumerate()
        {
            presence[unit_idx].push(parse_cell(cells[p_col], line_no, &headers[p_col])?);
            intensity[unit_idx].push(parse_cell(cells[i_col], line_no, &headers[i_col])?);
        }
        frame_count += 1;
    }

    Ok(SignalTable {
        units,
        presence,
        intensity,
        frame_count,
        sample_rate,
    })
}

fn parse_cell(cell: &str, line: usize, column: &str) -> Result<f64, SignalLoadError> {
    cell.parse::<f64>()
        .map_err(|_| SignalLoadError::MalformedCell {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        })
}
