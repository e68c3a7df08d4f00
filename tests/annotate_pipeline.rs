//! End-to-end run of the annotation pipeline against an on-disk fixture.

use std::path::Path;

use emoset::config::AnnotateJob;
use emoset::pipeline::{Capabilities, run_annotate};
use tempfile::tempdir;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

#[test]
fn merges_signals_artifacts_and_labels_into_one_collection() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    // Two samples with AU tables; the second has every auxiliary artifact
    // and a label row, the first has nothing but the signal.
    write(
        &root.join("signal/sample_00001.csv"),
        "frame, AU01_r, AU12_r, AU01_c, AU12_c\n\
         1, 0.0, 0.3, 0, 1\n\
         2, 0.1, 2.8, 0, 1\n\
         3, 0.0, 0.9, 0, 1\n",
    );
    write(
        &root.join("signal/sample_00002.csv"),
        "AU06_r,AU06_c\n0.05,1\n5.5,1\n",
    );
    write(
        &root.join("visual/sample_00002.csv"),
        "peak_frame_index,description\n1,\"a woman laughing, eyes closed\"\n",
    );
    write(&root.join("audio/sample_00002.txt"), "loud sustained laughter\n");
    write(&root.join("captions/sample_00002.txt"), "that is hilarious\n");
    write(
        &root.join("labels.csv"),
        "name,discrete,valence\nsample_00002,happy,2.8\nsample_99999,sad,-2.0\n",
    );

    let job = AnnotateJob {
        signal_dir: root.join("signal"),
        visual_desc_dir: Some(root.join("visual")),
        audio_desc_dir: Some(root.join("audio")),
        caption_dir: Some(root.join("captions")),
        label_file: Some(root.join("labels.csv")),
        output_file: root.join("out/annotations.json"),
        intermediate_file: Some(root.join("out/first_step.json")),
        ..AnnotateJob::default()
    };

    let summary = run_annotate(&job, &Capabilities::none()).unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 0);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&job.output_file).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);

    // Sample ids are processed in sorted order.
    let first = &records[0];
    assert_eq!(first["video_id"], "sample_00001.mp4");
    assert_eq!(first["visual_expression_description"][0], "strongly Lip Corner Puller");
    assert_eq!(first["raw_AU_values_at_peak"]["AU01"], 0.1);
    assert_eq!(first["visual_objective_description"], "");
    assert_eq!(first["audio_description"], "");
    assert_eq!(first["caption"], "");
    assert!(first.get("discrete").is_none());
    assert!(first.get("valence").is_none());

    let second = &records[1];
    assert_eq!(second["video_id"], "sample_00002.mp4");
    assert!((second["peak_time"].as_f64().unwrap() - 1.0 / 30.0).abs() < 1e-12);
    assert_eq!(second["visual_expression_description"][0], "very strongly Cheek Raiser");
    assert_eq!(
        second["visual_objective_description"],
        "a woman laughing, eyes closed"
    );
    assert_eq!(second["audio_description"], "loud sustained laughter");
    assert_eq!(second["caption"], "that is hilarious");
    assert_eq!(second["coarse-grained_summary"], "");
    assert_eq!(second["fine-grained_summary"], "");
    assert_eq!(second["discrete"], "happy");
    assert_eq!(second["valence"], 2.8);

    let first_step: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(job.intermediate_file.as_ref().unwrap()).unwrap(),
    )
    .unwrap();
    assert_eq!(first_step["sample_00001"]["peak_frame"], 1);
    assert_eq!(first_step["sample_00002"]["au_data"]["AU06"], 5.5);
}

#[test]
fn unreadable_samples_are_skipped_and_the_rest_still_merge() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    write(&root.join("signal/good.csv"), "AU06_r,AU06_c\n1.0,1\n");
    // Empty body: zero frames.
    write(&root.join("signal/empty.csv"), "AU06_r,AU06_c\n");
    // Malformed intensity cell.
    write(&root.join("signal/bad.csv"), "AU06_r,AU06_c\noops,1\n");

    let job = AnnotateJob {
        signal_dir: root.join("signal"),
        output_file: root.join("annotations.json"),
        ..AnnotateJob::default()
    };
    let summary = run_annotate(&job, &Capabilities::none()).unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 2);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&job.output_file).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["video_id"], "good.mp4");
}

#[test]
fn missing_label_table_is_fatal() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(&root.join("signal/good.csv"), "AU06_r,AU06_c\n1.0,1\n");

    let job = AnnotateJob {
        signal_dir: root.join("signal"),
        label_file: Some(root.join("does-not-exist.csv")),
        output_file: root.join("annotations.json"),
        ..AnnotateJob::default()
    };
    assert!(run_annotate(&job, &Capabilities::none()).is_err());
}
