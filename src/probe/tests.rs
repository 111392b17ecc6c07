use super::runner::{FailureKind, ProbeOutcome, probe_once};
use super::status::parse_node_status;
use super::*;
use crate::args::TargetRate;
use crate::error::ProbeError;
use std::future::Future;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener};
use std::thread;
use std::time::Duration;

use reqwest::Url;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn closed_port_url() -> Result<Url, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    drop(listener);
    Url::parse(&format!("http://{}", addr)).map_err(|err| format!("bad url: {}", err))
}

/// Serves `connections` requests, waiting `delay` before each canned reply.
fn spawn_stub_node(
    connections: usize,
    delay: Duration,
    reply: &'static str,
) -> Result<Url, String> {
    let listener =
        TcpListener::bind("127.0.0.1:0").map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;

    thread::spawn(move || {
        for stream in listener.incoming().take(connections) {
            let Ok(mut stream) = stream else {
                break;
            };
            let mut buffer = [0u8; 1024];
            if stream.read(&mut buffer).is_err() {
                continue;
            }
            thread::sleep(delay);
            if stream.write_all(reply.as_bytes()).is_err() {
                continue;
            }
            drop(stream.flush());
            drop(stream.shutdown(Shutdown::Both));
        }
    });

    Url::parse(&format!("http://{}", addr)).map_err(|err| format!("bad url: {}", err))
}

const OK_REPLY: &str = "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK";
const NO_CONTENT_REPLY: &str = "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n";

fn config_for(url: Url, request_count: u64, tps: u64) -> Result<BenchmarkConfig, String> {
    Ok(BenchmarkConfig {
        target_url: url,
        request_count,
        target_rate: TargetRate::try_from(tps).map_err(|err| err.to_string())?,
        request_timeout: Duration::from_millis(500),
    })
}

#[test]
fn parse_node_status_reads_string_height() -> Result<(), String> {
    let body = br#"{"jsonrpc":"2.0","id":-1,"result":{"node_info":{},"sync_info":{"latest_block_height":"12345","catching_up":false}}}"#;
    let node = parse_node_status(body).map_err(|err| err.to_string())?;
    if node.latest_block_height.as_deref() != Some("12345") {
        return Err(format!("Unexpected height: {:?}", node.latest_block_height));
    }
    Ok(())
}

#[test]
fn parse_node_status_accepts_numeric_height() -> Result<(), String> {
    let body = br#"{"result":{"sync_info":{"latest_block_height":42}}}"#;
    let node = parse_node_status(body).map_err(|err| err.to_string())?;
    if node.latest_block_height.as_deref() != Some("42") {
        return Err(format!("Unexpected height: {:?}", node.latest_block_height));
    }
    Ok(())
}

#[test]
fn parse_node_status_missing_field_is_none() -> Result<(), String> {
    for body in [
        &br#"{}"#[..],
        &br#"{"result":{}}"#[..],
        &br#"{"result":{"sync_info":{}}}"#[..],
        &br#"{"result":{"sync_info":{"latest_block_height":null}}}"#[..],
    ] {
        let node = parse_node_status(body).map_err(|err| err.to_string())?;
        if node.latest_block_height.is_some() {
            return Err(format!(
                "Expected no height for {}",
                String::from_utf8_lossy(body)
            ));
        }
    }
    Ok(())
}

#[test]
fn parse_node_status_rejects_non_json() -> Result<(), String> {
    if parse_node_status(b"OK").is_ok() {
        return Err("Expected non-JSON body to fail".to_owned());
    }
    Ok(())
}

#[test]
fn pacer_never_goes_negative() -> Result<(), String> {
    let pacer = Pacer::new(TargetRate::try_from(50).map_err(|err| err.to_string())?);
    if pacer.interval() != Duration::from_millis(20) {
        return Err(format!("Unexpected interval: {:?}", pacer.interval()));
    }
    if pacer.remaining(Duration::from_millis(5)) != Duration::from_millis(15) {
        return Err("Expected 15ms remaining".to_owned());
    }
    if !pacer.remaining(Duration::from_millis(20)).is_zero() {
        return Err("Expected nothing remaining at the interval".to_owned());
    }
    if !pacer.remaining(Duration::from_secs(3)).is_zero() {
        return Err("Expected slow requests to skip the sleep".to_owned());
    }
    Ok(())
}

#[test]
fn run_result_rate_math() -> Result<(), String> {
    let result = RunResult {
        success_count: 100,
        failure_count: 0,
        duration: Duration::from_secs(2),
    };
    if result.actual_rate_x100() != 5_000 {
        return Err(format!("Expected 50.00 tps, got {}", result.actual_rate_x100()));
    }

    let partial = RunResult {
        success_count: 1,
        failure_count: 2,
        duration: Duration::from_secs(3),
    };
    if partial.total() != 3 {
        return Err("Expected total of 3".to_owned());
    }
    if partial.actual_rate_x100() != 33 {
        return Err(format!("Expected 0.33 tps, got {}", partial.actual_rate_x100()));
    }

    if RunResult::default().actual_rate_x100() != 0 {
        return Err("Expected empty run to report 0 tps".to_owned());
    }
    Ok(())
}

#[test]
fn probe_once_counts_refused_connection_as_failure() -> Result<(), String> {
    run_async_test(async {
        let config = config_for(closed_port_url()?, 1, 100)?;
        let client = build_client(&config).map_err(|err| err.to_string())?;
        let status_url = config.status_url().map_err(|err| err.to_string())?;

        let outcome = probe_once(&client, &status_url).await;
        if outcome != ProbeOutcome::Failure(FailureKind::Transport) {
            return Err(format!("Unexpected outcome: {:?}", outcome));
        }
        Ok(())
    })
}

#[test]
fn preflight_reports_unreachable_node() -> Result<(), String> {
    run_async_test(async {
        let config = config_for(closed_port_url()?, 1, 100)?;
        let client = build_client(&config).map_err(|err| err.to_string())?;
        let status_url = config.status_url().map_err(|err| err.to_string())?;

        match preflight(&client, &status_url).await {
            Err(ProbeError::NodeUnreachable { .. }) => Ok(()),
            Err(err) => Err(format!("Unexpected error: {}", err)),
            Ok(node) => Err(format!("Expected failure, got {:?}", node)),
        }
    })
}

#[test]
fn probe_loop_tallies_every_request() -> Result<(), String> {
    run_async_test(async {
        let config = config_for(closed_port_url()?, 250, 10_000)?;
        let client = build_client(&config).map_err(|err| err.to_string())?;
        let status_url = config.status_url().map_err(|err| err.to_string())?;

        let mut progress = Vec::new();
        let result = run_probe_loop(&client, &status_url, &config, |sent| progress.push(sent)).await;

        if result.total() != 250 {
            return Err(format!("Expected 250 requests, got {}", result.total()));
        }
        if result.success_count != 0 || result.failure_count != 250 {
            return Err(format!("Unexpected tally: {:?}", result));
        }
        if progress != [100, 200] {
            return Err(format!("Unexpected progress callbacks: {:?}", progress));
        }
        Ok(())
    })
}

#[test]
fn probe_loop_with_zero_count_sends_nothing() -> Result<(), String> {
    run_async_test(async {
        let config = config_for(closed_port_url()?, 0, 100)?;
        let client = build_client(&config).map_err(|err| err.to_string())?;
        let status_url = config.status_url().map_err(|err| err.to_string())?;

        let result = run_probe_loop(&client, &status_url, &config, |_| {}).await;
        if result.total() != 0 {
            return Err(format!("Expected no requests, got {}", result.total()));
        }
        if result.actual_rate_x100() != 0 {
            return Err("Expected 0 tps for an empty run".to_owned());
        }
        Ok(())
    })
}

#[test]
fn probe_loop_respects_target_rate() -> Result<(), String> {
    run_async_test(async {
        let config = config_for(closed_port_url()?, 10, 50)?;
        let client = build_client(&config).map_err(|err| err.to_string())?;
        let status_url = config.status_url().map_err(|err| err.to_string())?;

        let result = run_probe_loop(&client, &status_url, &config, |_| {}).await;
        if result.duration < Duration::from_millis(200) {
            return Err(format!(
                "10 requests at 50 tps finished in {:?}",
                result.duration
            ));
        }
        Ok(())
    })
}

#[test]
fn stalled_node_counts_as_timeout_failure() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_stub_node(3, Duration::from_millis(1_500), OK_REPLY)?;
        let config = config_for(url, 2, 100)?;
        let client = build_client(&config).map_err(|err| err.to_string())?;
        let status_url = config.status_url().map_err(|err| err.to_string())?;

        let outcome = probe_once(&client, &status_url).await;
        if outcome != ProbeOutcome::Failure(FailureKind::Timeout) {
            return Err(format!("Expected a timeout, got {:?}", outcome));
        }

        let result = run_probe_loop(&client, &status_url, &config, |_| {}).await;
        if result.success_count != 0 || result.failure_count != 2 {
            return Err(format!("Expected 2 timed-out failures: {:?}", result));
        }
        Ok(())
    })
}

#[test]
fn no_content_fails_preflight_but_passes_loop() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_stub_node(2, Duration::ZERO, NO_CONTENT_REPLY)?;
        let config = config_for(url, 1, 100)?;
        let client = build_client(&config).map_err(|err| err.to_string())?;
        let status_url = config.status_url().map_err(|err| err.to_string())?;

        match preflight(&client, &status_url).await {
            Err(ProbeError::UnexpectedStatus { status: 204, .. }) => {}
            Err(err) => return Err(format!("Unexpected error: {}", err)),
            Ok(node) => return Err(format!("Expected 204 to abort, got {:?}", node)),
        }

        let outcome = probe_once(&client, &status_url).await;
        if outcome != ProbeOutcome::Success {
            return Err(format!("Expected 204 to count as success, got {:?}", outcome));
        }
        Ok(())
    })
}

#[test]
fn stub_node_answers_ok() -> Result<(), String> {
    run_async_test(async {
        let url = spawn_stub_node(1, Duration::ZERO, OK_REPLY)?;
        let config = config_for(url, 1, 100)?;
        let client = build_client(&config).map_err(|err| err.to_string())?;
        let status_url = config.status_url().map_err(|err| err.to_string())?;

        let outcome = probe_once(&client, &status_url).await;
        if outcome != ProbeOutcome::Success {
            return Err(format!("Expected success, got {:?}", outcome));
        }
        Ok(())
    })
}
