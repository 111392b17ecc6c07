use tracing::{error, info};

use crate::{
    args::BenchArgs,
    error::{AppError, AppResult, ProbeError},
    probe,
};

use super::{progress::ProgressReporter, summary};

const READ_LOAD_NOTICE: [&str; 2] = [
    "NOTE: This benchmark only generates READ load against the status endpoint.",
    "      No transactions are signed or broadcast.",
];

pub(crate) async fn run_benchmark(args: &BenchArgs) -> AppResult<()> {
    let config = args.to_config()?;
    let status_url = config.status_url()?;
    let client = probe::build_client(&config)?;

    println!("Starting benchmark on {}", args.url.trim());
    println!(
        "Target: {} transactions at {} TPS",
        config.request_count, config.target_rate
    );

    let node = match probe::preflight(&client, &status_url).await {
        Ok(node) => node,
        Err(err) => {
            match &err {
                ProbeError::NodeUnreachable { source, .. } => {
                    error!("Failed to connect to node: {}", source);
                }
                ProbeError::UnexpectedStatus { status, .. } => {
                    error!("Status check returned HTTP {}", status);
                }
                ProbeError::CannotBeBase { .. } | ProbeError::BuildClientFailed { .. } => {}
            }
            println!("Node is not reachable.");
            return Err(AppError::probe(err));
        }
    };

    println!(
        "Node connected. Latest Block Height: {}",
        node.latest_block_height.as_deref().unwrap_or("unknown")
    );
    println!();
    for line in READ_LOAD_NOTICE {
        println!("{}", line);
    }

    info!(
        "Probing {} {} times at {} TPS",
        status_url, config.request_count, config.target_rate
    );
    let progress = ProgressReporter::new(args.quiet, config.request_count);
    let result =
        probe::run_probe_loop(&client, &status_url, &config, |sent| progress.report(sent)).await;
    info!(
        "Run finished: {} success, {} fail in {:?}",
        result.success_count, result.failure_count, result.duration
    );

    summary::print_summary(&result, &config, args.output_format)
}
