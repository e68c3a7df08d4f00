//! Ground-truth label tables.
//!
//! A label table is delimited text with a header row and at least the
//! `name`, `discrete`, and `valence` columns. Any other columns pass
//! through untouched: each row keeps its raw line so sampled subsets can
//! mirror the input byte for byte.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Column holding the sample identifier (no file extension).
pub const NAME_COLUMN: &str = "name";
/// Column holding the discrete category label.
pub const CATEGORY_COLUMN: &str = "discrete";
/// Column holding the continuous valence score.
pub const VALENCE_COLUMN: &str = "valence";

/// Errors returned when loading a label table. All of these are
/// structural and fatal for the run.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing header row")]
    MissingHeader,
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error("line {line}: row has {got} cells, header has {expected}")]
    RaggedRow {
        line: usize,
        got: usize,
        expected: usize,
    },
    #[error("line {line}: malformed valence {value:?}")]
    MalformedValence { line: usize, value: String },
}

/// One ground-truth row plus its raw source line.
#[derive(Debug, Clone)]
pub struct LabeledRow {
    /// Sample identifier without extension.
    pub name: String,
    /// Discrete category label.
    pub category: String,
    /// Continuous valence score.
    pub valence: f64,
    /// The unmodified source line, including passthrough columns.
    pub raw_line: String,
}

/// A loaded label table keyed by `{name}.mp4` for late binding.
#[derive(Debug, Clone)]
pub struct LabelTable {
    header_line: String,
    rows: Vec<LabeledRow>,
    by_video: HashMap<String, usize>,
}

impl LabelTable {
    /// The unmodified header line.
    pub fn header_line(&self) -> &str {
        &self.header_line
    }

    /// All rows in source order.
    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    /// Look up a row by `{name}.mp4` video id.
    pub fn lookup_video(&self, video_id: &str) -> Option<&LabeledRow> {
        self.by_video.get(video_id).map(|&idx| &self.rows[idx])
    }
}

/// Load a label table, validating the required columns.
pub fn load_label_table(path: &Path) -> Result<LabelTable, LabelError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines.next().ok_or(LabelError::MissingHeader)??;
    let header = split_csv_cells(&header_line);
    let name_col = require_column(&header, NAME_COLUMN)?;
    let category_col = require_column(&header, CATEGORY_COLUMN)?;
    let valence_col = require_column(&header, VALENCE_COLUMN)?;

    let mut rows = Vec::new();
    let mut by_video = HashMap::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 2;
        let cells = split_csv_cells(&line);
        if cells.len() != header.len() {
            return Err(LabelError::RaggedRow {
                line: line_no,
                got: cells.len(),
                expected: header.len(),
            });
        }
        let name = cells[name_col].trim().to_string();
        let valence_cell = cells[valence_col].trim();
        let valence =
            valence_cell
                .parse::<f64>()
                .map_err(|_| LabelError::MalformedValence {
                    line: line_no,
                    value: valence_cell.to_string(),
                })?;
        by_video.insert(format!("{name}.mp4"), rows.len());
        rows.push(LabeledRow {
            name,
            category: cells[category_col].trim().to_string(),
            valence,
            raw_line: line,
        });
    }

    Ok(LabelTable {
        header_line,
        rows,
        by_video,
    })
}

fn require_column(header: &[String], name: &'static str) -> Result<usize, LabelError> {
    header
        .iter()
        .position(|cell| cell.trim() == name)
        .ok_or(LabelError::MissingColumn(name))
}

/// Split one delimited line, honoring double-quoted cells with `""` escapes.
pub(crate) fn split_csv_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn load(contents: &str) -> Result<LabelTable, LabelError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.csv");
        std::fs::write(&path, contents).unwrap();
        load_label_table(&path)
    }

    #[test]
    fn parses_required_columns_and_keeps_raw_lines() {
        let table = load(
            "name,discrete,valence,notes\n\
             sample_00001,happy,2.5,\"kept, verbatim\"\n",
        )
        .unwrap();
        assert_eq!(table.rows().len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.name, "sample_00001");
        assert_eq!(row.category, "happy");
        assert_eq!(row.valence, 2.5);
        assert_eq!(row.raw_line, "sample_00001,happy,2.5,\"kept, verbatim\"");
        assert_eq!(table.header_line(), "name,discrete,valence,notes");
    }

    #[test]
    fn lookup_is_keyed_by_video_id() {
        let table = load("name,discrete,valence\nsample_00002,sad,-1.0\n").unwrap();
        assert!(table.lookup_video("sample_00002.mp4").is_some());
        assert!(table.lookup_video("sample_00002").is_none());
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let err = load("name,valence\nsample_00003,1.0\n").unwrap_err();
        assert!(matches!(err, LabelError::MissingColumn("discrete")));
    }

    #[test]
    fn malformed_valence_names_the_line() {
        let err = load("name,discrete,valence\nsample_00004,angry,not-a-number\n").unwrap_err();
        assert!(matches!(err, LabelError::MalformedValence { line: 2, .. }));
    }
}
