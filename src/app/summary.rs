use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::probe::{BenchmarkConfig, RunResult};

pub(crate) struct SummaryStats {
    pub(crate) duration_x100: u64,
    pub(crate) actual_tps_x100: u64,
}

pub(crate) fn compute_summary_stats(result: &RunResult) -> SummaryStats {
    let duration_x100 = result
        .duration
        .as_millis()
        .saturating_add(5)
        .checked_div(10)
        .unwrap_or(0);

    SummaryStats {
        duration_x100: u64::try_from(duration_x100).unwrap_or(u64::MAX),
        actual_tps_x100: result.actual_rate_x100(),
    }
}

pub(crate) fn summary_lines(result: &RunResult, stats: &SummaryStats) -> Vec<String> {
    vec![
        "Benchmark Complete!".to_owned(),
        format!(
            "Duration: {}.{:02}s",
            stats.duration_x100 / 100,
            stats.duration_x100 % 100
        ),
        format!(
            "Requests: {} success, {} fail",
            result.success_count, result.failure_count
        ),
        format!(
            "Actual TPS (Read): {}.{:02}",
            stats.actual_tps_x100 / 100,
            stats.actual_tps_x100 % 100
        ),
    ]
}

pub(crate) fn summary_json(
    result: &RunResult,
    stats: &SummaryStats,
    config: &BenchmarkConfig,
) -> serde_json::Value {
    serde_json::json!({
        "url": config.target_url.as_str(),
        "target_tps_x100": config.target_rate.rps_x100(),
        "requests": result.total(),
        "success": result.success_count,
        "fail": result.failure_count,
        "duration_ms": result.duration.as_millis(),
        "actual_tps_x100": stats.actual_tps_x100
    })
}

pub(crate) fn print_summary(
    result: &RunResult,
    config: &BenchmarkConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let stats = compute_summary_stats(result);
    match format {
        OutputFormat::Text => {
            println!();
            for line in summary_lines(result, &stats) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let payload = summary_json(result, &stats, config);
            println!("{}", serde_json::to_string(&payload)?);
        }
    }
    Ok(())
}
