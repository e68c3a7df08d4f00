//! Media-copy side effect for sampled subsets.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

/// How many missing paths are logged individually before summarizing.
const LOGGED_MISSING_LIMIT: usize = 10;

/// Outcome of one copy pass.
#[derive(Debug, Clone, Default)]
pub struct CopyReport {
    /// Files copied to their destination.
    pub copied: usize,
    /// Source paths that did not exist at copy time.
    pub missing: Vec<PathBuf>,
}

impl CopyReport {
    /// Fold another report into this one.
    pub fn absorb(&mut self, other: CopyReport) {
        self.copied += other.copied;
        self.missing.extend(other.missing);
    }

    /// Log copied/missing counts, listing the first few missing paths.
    pub fn log(&self, context: &str) {
        info!("{context}: copied {} media files", self.copied);
        if self.missing.is_empty() {
            return;
        }
        warn!("{context}: {} media files missing", self.missing.len());
        for path in self.missing.iter().take(LOGGED_MISSING_LIMIT) {
            warn!("{context}: missing {}", path.display());
        }
        if self.missing.len() > LOGGED_MISSING_LIMIT {
            warn!(
                "{context}: ... and {} more",
                self.missing.len() - LOGGED_MISSING_LIMIT
            );
        }
    }
}

/// Copy each `(source, destination)` pair whose source exists.
///
/// Destination directories are created as needed. A missing source is
/// recorded, not raised; any other filesystem failure is structural and
/// propagates.
pub fn copy_media(jobs: &[(PathBuf, PathBuf)]) -> Result<CopyReport, std::io::Error> {
    let mut report = CopyReport::default();
    for (source, destination) in jobs {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        if source.is_file() {
            fs::copy(source, destination)?;
            report.copied += 1;
        } else {
            report.missing.push(source.clone());
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_existing_and_counts_missing() {
        let dir = tempdir().unwrap();
        let src_dir = dir.path().join("src");
        fs::create_dir_all(&src_dir).unwrap();
        fs::write(src_dir.join("a.mp4"), b"video").unwrap();

        let dest_dir = dir.path().join("dest");
        let jobs = vec![
            (src_dir.join("a.mp4"), dest_dir.join("a.mp4")),
            (src_dir.join("b.mp4"), dest_dir.join("b.mp4")),
        ];
        let report = copy_media(&jobs).unwrap();
        assert_eq!(report.copied, 1);
        assert_eq!(report.missing, vec![src_dir.join("b.mp4")]);
        assert!(dest_dir.join("a.mp4").is_file());
    }

    #[test]
    fn absorb_accumulates_counts() {
        let mut total = CopyReport::default();
        total.absorb(CopyReport {
            copied: 2,
            missing: vec![PathBuf::from("x")],
        });
        total.absorb(CopyReport {
            copied: 1,
            missing: Vec::new(),
        });
        assert_eq!(total.copied, 3);
        assert_eq!(total.missing.len(), 1);
    }
}
