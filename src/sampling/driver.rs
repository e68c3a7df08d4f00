//! Multi-dataset sampling driver.
//!
//! Runs the stratified sampler over each source dataset and once more over
//! the union, writes subset CSVs that mirror the source label files, and
//! copies the sampled media aside. The combined pass is an independent
//! draw with the same seed, not a deduplication of the per-dataset draws;
//! media copying is driven by the dataset-level subsets only so nothing is
//! copied twice.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::labels::{LabelError, LabeledRow, load_label_table};

use super::copier::{CopyReport, copy_media};
use super::stratified::{DEFAULT_QUOTA, DEFAULT_SEED, sample_by_category};

/// One source dataset: a label file and where its media lives and goes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetSpec {
    /// Ground-truth label CSV.
    pub label_file: PathBuf,
    /// Directory holding the source media files.
    pub media_dir: PathBuf,
    /// Media file extension, with leading dot (e.g. `.mp4`).
    #[serde(default = "default_media_ext")]
    pub media_ext: String,
    /// Directory the sampled media is copied into.
    pub destination_dir: PathBuf,
    /// Filename of this dataset's subset CSV under the output directory.
    pub output_name: String,
}

fn default_media_ext() -> String {
    ".mp4".to_string()
}

/// Configuration for one sampling run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingOptions {
    /// Source datasets, processed in order.
    pub datasets: Vec<DatasetSpec>,
    /// Directory receiving the subset CSVs.
    pub out_dir: PathBuf,
    /// Per-category quota.
    pub quota: usize,
    /// Sampling seed, shared by every draw.
    pub seed: u64,
    /// Filename of the combined subset CSV.
    pub combined_output_name: String,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            datasets: Vec::new(),
            out_dir: PathBuf::from("sampled_out"),
            quota: DEFAULT_QUOTA,
            seed: DEFAULT_SEED,
            combined_output_name: "random_per_category.csv".to_string(),
        }
    }
}

/// Per-dataset outcome.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    /// Subset CSV filename.
    pub output_name: String,
    /// Rows written to the subset.
    pub sampled: usize,
    /// Media files copied.
    pub copied: usize,
    /// Media files missing at copy time.
    pub missing: usize,
}

/// Outcome of a whole sampling run.
#[derive(Debug, Clone, Default)]
pub struct SamplingSummary {
    /// One report per processed dataset (skipped datasets excluded).
    pub per_dataset: Vec<DatasetReport>,
    /// Rows written to the combined subset.
    pub combined_sampled: usize,
    /// Media copied across all dataset-level subsets.
    pub total_copied: usize,
    /// Media missing across all dataset-level subsets.
    pub total_missing: usize,
}

/// Errors that abort a sampling run. Per-dataset label-file absence is
/// not among them; such datasets are skipped with a warning.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("no readable datasets")]
    NoDatasets,
    #[error("label table {path}: {source}")]
    Label {
        path: PathBuf,
        source: LabelError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run stratified sampling across all configured datasets.
pub fn run_sampling(options: &SamplingOptions) -> Result<SamplingSummary, SamplingError> {
    fs::create_dir_all(&options.out_dir)?;

    let mut summary = SamplingSummary::default();
    let mut union: Vec<LabeledRow> = Vec::new();
    let mut union_header: Option<String> = None;
    let mut total = CopyReport::default();

    for dataset in &options.datasets {
        if !dataset.label_file.is_file() {
            warn!(
                "Label file {} does not exist; skipping dataset",
                dataset.label_file.display()
            );
            continue;
        }
        let table = load_label_table(&dataset.label_file).map_err(|source| match source {
            LabelError::Io(err) => SamplingError::Io(err),
            other => SamplingError::Label {
                path: dataset.label_file.clone(),
                source: other,
            },
        })?;
        log_category_counts(table.rows(), &dataset.output_name);

        let picked = sample_by_category(
            table.rows(),
            |row| row.category.as_str(),
            options.quota,
            options.seed,
        );
        let subset: Vec<&LabeledRow> = picked.iter().map(|&idx| &table.rows()[idx]).collect();
        write_subset_csv(
            &options.out_dir.join(&dataset.output_name),
            table.header_line(),
            &subset,
        )?;
        info!(
            "Wrote {} sampled rows to {}",
            subset.len(),
            options.out_dir.join(&dataset.output_name).display()
        );

        let jobs: Vec<(PathBuf, PathBuf)> = subset
            .iter()
            .map(|row| {
                let file_name = format!("{}{}", row.name, dataset.media_ext);
                (
                    dataset.media_dir.join(&file_name),
                    dataset.destination_dir.join(&file_name),
                )
            })
            .collect();
        let report = copy_media(&jobs)?;
        report.log(&dataset.output_name);

        summary.per_dataset.push(DatasetReport {
            output_name: dataset.output_name.clone(),
            sampled: subset.len(),
            copied: report.copied,
            missing: report.missing.len(),
        });
        total.absorb(report);

        if union_header.is_none() {
            union_header = Some(table.header_line().to_string());
        }
        union.extend(table.rows().iter().cloned());
    }

    let Some(header) = union_header else {
        return Err(SamplingError::NoDatasets);
    };

    log_category_counts(&union, "combined");
    let picked = sample_by_category(
        &union,
        |row| row.category.as_str(),
        options.quota,
        options.seed,
    );
    let subset: Vec<&LabeledRow> = picked.iter().map(|&idx| &union[idx]).collect();
    write_subset_csv(
        &options.out_dir.join(&options.combined_output_name),
        &header,
        &subset,
    )?;
    summary.combined_sampled = subset.len();
    info!(
        "Wrote {} combined sampled rows to {}",
        subset.len(),
        options.out_dir.join(&options.combined_output_name).display()
    );

    summary.total_copied = total.copied;
    summary.total_missing = total.missing.len();
    total.log("total");
    Ok(summary)
}

/// Write a subset CSV mirroring the source header and raw rows. Transient
/// processing metadata never appears here; only the original line survives.
fn write_subset_csv(
    path: &Path,
    header_line: &str,
    rows: &[&LabeledRow],
) -> Result<(), std::io::Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{header_line}")?;
    for row in rows {
        writeln!(writer, "{}", row.raw_line)?;
    }
    writer.flush()
}

fn log_category_counts(rows: &[LabeledRow], context: &str) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.category.as_str()).or_default() += 1;
    }
    info!("{context}: {} categories", counts.len());
    for (category, count) in counts {
        info!("{context}:   {category}: {count}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_dataset(
        root: &std::path::Path,
        name: &str,
        rows: &[(&str, &str, f64)],
        with_media: &[&str],
    ) -> DatasetSpec {
        let label_file = root.join(format!("{name}-label.csv"));
        let mut contents = String::from("name,discrete,valence\n");
        for (sample, category, valence) in rows {
            contents.push_str(&format!("{sample},{category},{valence}\n"));
        }
        fs::write(&label_file, contents).unwrap();

        let media_dir = root.join(format!("{name}-media"));
        fs::create_dir_all(&media_dir).unwrap();
        for sample in with_media {
            fs::write(media_dir.join(format!("{sample}.mp4")), b"x").unwrap();
        }

        DatasetSpec {
            label_file,
            media_dir,
            media_ext: ".mp4".to_string(),
            destination_dir: root.join(format!("{name}-out")),
            output_name: format!("{name}-subset.csv"),
        }
    }

    #[test]
    fn samples_each_dataset_and_the_union() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let first = write_dataset(
            root,
            "one",
            &[("a", "happy", 1.0), ("b", "sad", -1.0)],
            &["a"],
        );
        let second = write_dataset(root, "two", &[("c", "happy", 0.5)], &["c"]);

        let options = SamplingOptions {
            datasets: vec![first, second],
            out_dir: root.join("subsets"),
            ..SamplingOptions::default()
        };
        let summary = run_sampling(&options).unwrap();

        assert_eq!(summary.per_dataset.len(), 2);
        assert_eq!(summary.per_dataset[0].sampled, 2);
        assert_eq!(summary.per_dataset[1].sampled, 1);
        assert_eq!(summary.combined_sampled, 3);
        assert_eq!(summary.total_copied, 2);
        assert_eq!(summary.total_missing, 1);

        let subset = fs::read_to_string(root.join("subsets/one-subset.csv")).unwrap();
        assert_eq!(subset, "name,discrete,valence\na,happy,1\nb,sad,-1\n");
        assert!(root.join("one-out/a.mp4").is_file());
        assert!(root.join("subsets/random_per_category.csv").is_file());
    }

    #[test]
    fn missing_label_file_skips_the_dataset() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let present = write_dataset(root, "one", &[("a", "happy", 1.0)], &[]);
        let absent = DatasetSpec {
            label_file: root.join("nope.csv"),
            media_dir: root.join("nope"),
            media_ext: ".avi".to_string(),
            destination_dir: root.join("nope-out"),
            output_name: "nope-subset.csv".to_string(),
        };

        let options = SamplingOptions {
            datasets: vec![absent, present],
            out_dir: root.join("subsets"),
            ..SamplingOptions::default()
        };
        let summary = run_sampling(&options).unwrap();
        assert_eq!(summary.per_dataset.len(), 1);
    }

    #[test]
    fn all_datasets_missing_is_an_error() {
        let dir = tempdir().unwrap();
        let options = SamplingOptions {
            datasets: vec![DatasetSpec {
                label_file: dir.path().join("nope.csv"),
                media_dir: dir.path().join("nope"),
                media_ext: ".mp4".to_string(),
                destination_dir: dir.path().join("out"),
                output_name: "subset.csv".to_string(),
            }],
            out_dir: dir.path().join("subsets"),
            ..SamplingOptions::default()
        };
        assert!(matches!(
            run_sampling(&options),
            Err(SamplingError::NoDatasets)
        ));
    }
}
