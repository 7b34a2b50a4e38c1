use crate::reports;
use clap::Args;
use pillarforge::column::LoadVector;
use pillarforge::config::FixedParameters;
use pillarforge::export;
use pillarforge::optimizer::{OptimizationOptions, Optimizer, ProgressCallback};
use pillarforge::oracle::LinearSnapshot;
use std::fs::File;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub load: LoadVector,

    #[command(flatten)]
    pub params: FixedParameters,

    /// Keep only the best K candidates
    #[arg(short = 't', long)]
    pub top: Option<usize>,

    /// Worker threads (defaults to available parallelism)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Time budget in seconds, checked between batches
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Rows printed in the ranking table
    #[arg(long, default_value_t = 20)]
    pub show: usize,

    /// Write the full ranking to a CSV file
    #[arg(long)]
    pub csv: Option<String>,

    /// Print the report as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_batch(&self, evaluated: usize, total: usize, best_cost: Option<f64>) -> bool {
        debug!("{}/{} candidates, best {:?}", evaluated, total, best_cost);
        true
    }
}

pub fn run(args: OptimizeArgs, params: FixedParameters, oracle: Arc<LinearSnapshot>) -> i32 {
    let mut options = OptimizationOptions::builder()
        .batch_size(args.batch_size)
        .build();
    if let Some(t) = args.threads {
        options.num_threads = t;
    }
    options.max_time = args.time.map(Duration::from_secs);
    options.top_k = args.top;

    let fingerprint = oracle.fingerprint().to_string();
    let optimizer = Optimizer::new(oracle, options);

    let report = match optimizer.run(&args.load, &params, LogProgress) {
        Ok(r) => r,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    if let Some(path) = &args.csv {
        let written = File::create(path)
            .map_err(Into::into)
            .and_then(|f| export::write_csv(f, report.candidates()));
        match written {
            Ok(()) => info!("Ranking written to {}", path),
            Err(e) => {
                error!("Failed to write '{}': {}", path, e);
                return 1;
            }
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                error!("{}", e);
                return 1;
            }
        }
    } else {
        reports::print_header(&args.load, &params, &report.oracle_version, &fingerprint);
        reports::print_ranking(report.candidates(), args.show);
        reports::print_stats(&report);
        reports::print_recommendation(&report);
    }

    if report.is_empty() {
        2
    } else {
        0
    }
}
