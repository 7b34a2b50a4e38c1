use crate::reports;
use clap::Args;
use pillarforge::column::{CandidateSection, LoadVector};
use pillarforge::config::FixedParameters;
use pillarforge::error::PfResult;
use pillarforge::optimizer::{trace_candidate, CandidateTrace};
use pillarforge::oracle::LinearSnapshot;
use std::sync::Arc;
use tracing::error;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub load: LoadVector,

    #[command(flatten)]
    pub params: FixedParameters,

    /// Section width (cm)
    #[arg(long)]
    pub width: f64,

    /// Section height (cm)
    #[arg(long)]
    pub height: f64,
}

fn evaluate(
    args: &EvaluateArgs,
    params: &FixedParameters,
    oracle: &LinearSnapshot,
) -> PfResult<CandidateTrace> {
    args.load.validate()?;
    params.validate()?;
    let section = CandidateSection::new(args.width, args.height);
    section.validate()?;
    Ok(trace_candidate(&args.load, &section, params, oracle))
}

pub fn run(args: EvaluateArgs, params: FixedParameters, oracle: Arc<LinearSnapshot>) -> i32 {
    match evaluate(&args, &params, &oracle) {
        Ok(trace) => {
            reports::print_trace(&trace);
            0
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
