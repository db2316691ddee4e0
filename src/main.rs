#![forbid(unsafe_code)]
//! # jsd_alpha CLI
//!
//! Command-line interface for the `jsd_alpha` crate: compares two word-count
//! files (`<token> <count>` per line) with the order-alpha Jensen-Shannon
//! divergence and optionally runs the shuffling null model.
//!
//! ## Example
//! ```bash
//! cargo run --release -- data/PG299_counts.txt data/PG304_counts.txt --alpha 0.5,1,2 --normalized --sampling 100
//! ```
//!
//! See `--help` for all available options.

use clap::Parser;
use jsd_alpha::{Alpha, ExportFormat, JsdOptions, NullModelOptions, compare, save_report};
use log::error;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Words-counts file #1
    filename1: PathBuf,

    /// Words-counts file #2
    filename2: PathBuf,

    /// Order alpha, or a comma-separated list of orders (1.0 is the standard JSD)
    #[arg(short, long, value_delimiter = ',', default_value = "1.0", allow_negative_numbers = true)]
    alpha: Vec<f64>,

    /// Weight each distribution by its number of tokens (default: equal weights)
    #[arg(short, long, default_value_t = false)]
    weights: bool,

    /// Normalize by the maximum possible divergence
    #[arg(short, long, default_value_t = false)]
    normalized: bool,

    /// Number of random realizations of the null model (0 disables it)
    #[arg(short, long, default_value_t = 0)]
    sampling: usize,

    /// Percentiles reported for the null model
    #[arg(long, value_delimiter = ',', default_value = "2.5,97.5")]
    percentiles: Vec<f64>,

    /// Seed for the null model shuffles (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Run null-model realizations in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Also write the report to a file (txt, csv, tsv, json)
    #[arg(long)]
    export_format: Option<ExportFormat>,

    /// Directory for exported reports
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let alpha = match cli.alpha.as_slice() {
        [single] => Alpha::Scalar(*single),
        _ => Alpha::Sequence(cli.alpha.clone()),
    };
    let options = JsdOptions {
        alpha,
        weights: cli.weights,
        normalized: cli.normalized,
    };
    let null = NullModelOptions {
        n_rep: cli.sampling,
        percentiles: cli.percentiles.clone(),
        seed: cli.seed,
        parallel: cli.parallel,
    };

    let report = match compare(&cli.filename1, &cli.filename2, &options, &null) {
        Ok(report) => report,
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    };
    print!("{}", report.to_text());

    if let Some(format) = cli.export_format {
        if let Err(e) = save_report(&report, format, &cli.output_dir) {
            error!("Error exporting report: {}", e);
            process::exit(1);
        }
    }
}
