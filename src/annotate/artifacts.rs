//! File-existence-gated lookups for auxiliary per-sample text artifacts.
//!
//! External captioners, describers, and transcribers drop one file per
//! sample into their own directory (`{sample_id}.txt`, or `{sample_id}.csv`
//! with a `description` column). A missing file means the stage has not run
//! for that sample; it is never an error.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::labels::split_csv_cells;

/// Read `{sample_id}.txt` from `dir`, trimmed. Absent file yields `None`.
pub fn read_text_artifact(dir: &Path, sample_id: &str) -> Option<String> {
    let path = dir.join(format!("{sample_id}.txt"));
    if !path.is_file() {
        return None;
    }
    match fs::read_to_string(&path) {
        Ok(text) => Some(text.trim().to_string()),
        Err(err) => {
            warn!("Failed to read artifact {}: {err}", path.display());
            None
        }
    }
}

/// Read the `description` column of the first data row of `{sample_id}.csv`.
///
/// Also covers peak-frame description exports whose header is
/// `peak_frame_index,description`. Absent file or column yields `None`.
pub fn read_description_csv(dir: &Path, sample_id: &str) -> Option<String> {
    let path = dir.join(format!("{sample_id}.csv"));
    if !path.is_file() {
        return None;
    }
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("Failed to read artifact {}: {err}", path.display());
            return None;
        }
    };
    let mut lines = contents.lines();
    let header = split_csv_cells(lines.next()?);
    let column = header
        .iter()
        .position(|cell| cell.trim() == "description")?;
    let row = split_csv_cells(lines.next()?);
    row.get(column).map(|cell| cell.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_text_artifact_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(read_text_artifact(dir.path(), "sample_00001"), None);
    }

    #[test]
    fn text_artifact_is_trimmed() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("sample_00001.txt"), "  a calm voice \n").unwrap();
        assert_eq!(
            read_text_artifact(dir.path(), "sample_00001"),
            Some("a calm voice".to_string())
        );
    }

    #[test]
    fn csv_artifact_reads_description_column() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("sample_00002.csv"),
            "peak_frame_index,description\n42,\"a woman, smiling\"\n",
        )
        .unwrap();
        assert_eq!(
            read_description_csv(dir.path(), "sample_00002"),
            Some("a woman, smiling".to_string())
        );
    }

    #[test]
    fn csv_without_description_column_is_none() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("sample_00003.csv"), "frame,value\n1,2\n").unwrap();
        assert_eq!(read_description_csv(dir.path(), "sample_00003"), None);
    }
}
