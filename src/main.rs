use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use pillarforge::config::FixedParameters;
use pillarforge::oracle::LinearSnapshot;
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cost-optimal pre-dimensioning of RC columns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pinned feasibility & sizing model snapshot (JSON)
    #[arg(
        global = true,
        short,
        long,
        default_value = "models/oracle_snapshot.json"
    )]
    oracle: String,

    /// Refuse to run unless the snapshot hashes to this SHA-256
    #[arg(global = true, long)]
    oracle_sha256: Option<String>,

    /// JSON file with fixed parameters; explicit flags take precedence
    #[arg(global = true, long)]
    params: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Grid-search the cheapest feasible section
    Optimize(cmd::optimize::OptimizeArgs),
    /// Diagnose a single section
    Evaluate(cmd::evaluate::EvaluateArgs),
}

fn resolve_params(
    path: &Option<String>,
    cli_params: &FixedParameters,
    sub_matches: &ArgMatches,
) -> FixedParameters {
    match path {
        Some(p) => {
            info!("Loading parameters from: {}", p);
            let mut file_params = FixedParameters::load_from_file(p).unwrap_or_else(|e| {
                error!("Failed to read parameter file '{}': {}", p, e);
                process::exit(1);
            });
            file_params.merge_from_cli(cli_params, sub_matches);
            file_params
        }
        None => cli_params.clone(),
    }
}

fn main() {
    // 1. Parse raw matches so that flags typed by the user can be told apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // 2. Fixed parameters: defaults <- file <- explicit flags
    let (cli_params, sub_matches) = match &cli.command {
        Commands::Optimize(args) => (&args.params, matches.subcommand_matches("optimize")),
        Commands::Evaluate(args) => (&args.params, matches.subcommand_matches("evaluate")),
    };
    let Some(sub_matches) = sub_matches else {
        error!("No subcommand matches found");
        process::exit(1);
    };
    let params = resolve_params(&cli.params, cli_params, sub_matches);

    // 3. Oracle snapshot
    if cli.oracle_sha256.is_none() {
        warn!("No --oracle-sha256 given; results are not pinned to a snapshot");
    }
    let oracle = match LinearSnapshot::load_from_file(&cli.oracle, cli.oracle_sha256.as_deref()) {
        Ok(o) => Arc::new(o),
        Err(e) => {
            error!("FATAL: {}", e);
            process::exit(1);
        }
    };

    // 4. Execute
    let code = match cli.command {
        Commands::Optimize(args) => cmd::optimize::run(args, params, oracle),
        Commands::Evaluate(args) => cmd::evaluate::run(args, params, oracle),
    };
    process::exit(code);
}
