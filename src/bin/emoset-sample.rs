//! Draws a per-category random subset from one or more labeled datasets
//! and copies the sampled media files aside.

use std::path::PathBuf;

use emoset::sampling::SamplingOptions;

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
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if options.datasets.is_empty() {
        return Err("No datasets configured; pass --config <file> (see --help)".to_string());
    }
    let summary = emoset::sampling::run_sampling(&options).map_err(|err| err.to_string())?;
    for dataset in &summary.per_dataset {
        println!(
            "{}: {} rows sampled, {} media copied, {} missing",
            dataset.output_name, dataset.sampled, dataset.copied, dataset.missing
        );
    }
    println!(
        "Combined subset: {} rows; total {} media copied, {} missing",
        summary.combined_sampled, summary.total_copied, summary.total_missing
    );
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Option<SamplingOptions>, String> {
    let mut options = SamplingOptions::default();

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--config" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--config requires a value".to_string())?;
                options = emoset::config::load_sampling(&PathBuf::from(value))
                    .map_err(|err| err.to_string())?;
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                options.out_dir = PathBuf::from(value);
            }
            "--quota" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--quota requires a value".to_string())?;
                options.quota = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --quota value: {value}"))?;
            }
            "--seed" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--seed requires a value".to_string())?;
                options.seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid --seed value: {value}"))?;
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        idx += 1;
    }

    Ok(Some(options))
}

fn help_text() -> &'static str {
    "emoset-sample --config <file> [options]\n\
     \n\
     The config file is TOML with one [[datasets]] table per source:\n\
     \x20 label_file, media_dir, destination_dir, output_name,\n\
     \x20 and optionally media_ext (default \".mp4\").\n\
     \n\
     Options:\n\
     \x20 --config <file>   Sampling configuration (give first; flags override)\n\
     \x20 --out <dir>       Output directory for subset CSVs (default sampled_out)\n\
     \x20 --quota <n>       Per-category quota (default 10)\n\
     \x20 --seed <n>        Sampling seed (default 42)\n\
     \x20 -h, --help        Show this help"
}
