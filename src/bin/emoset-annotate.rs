//! Runs the peak-frame annotation pipeline over a directory of samples and
//! writes the merged JSON record collection.

use std::path::PathBuf;

use emoset::config::AnnotateJob;
use emoset::pipeline::Capabilities;

fn main() {
    if let Err(err) = emoset::logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(job) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let summary =
        emoset::pipeline::run_annotate(&job, &Capabilities::none()).map_err(|err| err.to_string())?;
    println!(
        "Merged {} records into {} ({} skipped)",
        summary.processed,
        job.output_file.display(),
        summary.skipped
    );
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Option<AnnotateJob>, String> {
    let mut job = AnnotateJob::default();

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--job" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--job requires a value".to_string())?;
                job = emoset::config::load_job(&PathBuf::from(value))
                    .map_err(|err| err.to_string())?;
            }
            "--signal-dir" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--signal-dir requires a value".to_string())?;
                job.signal_dir = PathBuf::from(value);
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                job.output_file = PathBuf::from(value);
            }
            "--intermediate" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--intermediate requires a value".to_string())?;
                job.intermediate_file = Some(PathBuf::from(value));
            }
            "--labels" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--labels requires a value".to_string())?;
                job.label_file = Some(PathBuf::from(value));
            }
            "--visual-dir" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--visual-dir requires a value".to_string())?;
                job.visual_desc_dir = Some(PathBuf::from(value));
            }
            "--audio-dir" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--audio-dir requires a value".to_string())?;
                job.audio_desc_dir = Some(PathBuf::from(value));
            }
            "--caption-dir" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--caption-dir requires a value".to_string())?;
                job.caption_dir = Some(PathBuf::from(value));
            }
            "--sample-rate" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--sample-rate requires a value".to_string())?;
                job.sample_rate = value
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid --sample-rate value: {value}"))?;
            }
            "--top-k" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--top-k requires a value".to_string())?;
                job.top_k = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --top-k value: {value}"))?;
            }
            "--min-relevance" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--min-relevance requires a value".to_string())?;
                job.min_relevance = value
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid --min-relevance value: {value}"))?;
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        idx += 1;
    }

    Ok(Some(job))
}

fn help_text() -> &'static str {
    "emoset-annotate [options]\n\
     \n\
     Options:\n\
     \x20 --job <file>            Load a TOML job file (flags below override it)\n\
     \x20 --signal-dir <dir>      Directory of per-sample AU tables (default signal)\n\
     \x20 --out <file>            Merged JSON output (default annotations.json)\n\
     \x20 --intermediate <file>   Also write per-sample peak annotations\n\
     \x20 --labels <file>         Ground-truth label CSV for late binding\n\
     \x20 --visual-dir <dir>      Peak-frame description artifacts\n\
     \x20 --audio-dir <dir>       Audio description artifacts\n\
     \x20 --caption-dir <dir>     Transcript artifacts\n\
     \x20 --sample-rate <fps>     Signal table frame rate (default 30)\n\
     \x20 --top-k <n>             Dominant units for peak ranking (default 3)\n\
     \x20 --min-relevance <v>     Phrase intensity floor (default 0.1)\n\
     \x20 -h, --help              Show this help"
}
