use clap::Parser;

use crate::app::run_benchmark;
use crate::args::BenchArgs;
use crate::error::AppResult;

pub(crate) fn run() -> AppResult<()> {
    let args = BenchArgs::parse();

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let outcome = runtime.block_on(run_benchmark(&args));
    if let Err(err) = &outcome
        && !err.is_preflight_failure()
    {
        tracing::error!("{}", err);
    }
    outcome
}
