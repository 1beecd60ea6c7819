//! Send command handler.

use super::OutputFormat;
use layerpace::{
    BuilderError, HttpRequest, LayerpaceResult, ReqwestTransport, RoutingKey,
    ThrottleConfig, ThrottledTransport, Transport,
};
use reqwest::{Method, Url};
use std::time::Instant;
use tracing::{info, instrument};

/// Send `count` sequential requests through a throttled reqwest transport.
///
/// Prints one line per request with its status and how long the call took,
/// waits included, followed by the learned state of the tiers.
#[instrument(skip(config, token))]
pub async fn send_requests(
    url: &str,
    method: &str,
    count: u32,
    format: OutputFormat,
    config: ThrottleConfig,
    token: Option<String>,
) -> LayerpaceResult<()> {
    let url = Url::parse(url).map_err(|e| BuilderError::invalid_field("url", e))?;
    let method = Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|e| BuilderError::invalid_field("method", e))?;

    let mut base = ReqwestTransport::new();
    if let Some(token) = token {
        base = base.with_bearer_token(token);
    }

    let key = RoutingKey::extract(url.path(), &method, config.api_marker());
    let transport = ThrottledTransport::with_config(base, config);
    let request = HttpRequest::new(method, url);

    info!(count, route = ?key.as_ref().map(ToString::to_string), "Sending requests");

    for n in 1..=count {
        let started = Instant::now();
        let response = transport.execute(&request).await?;
        let elapsed = started.elapsed();

        match format {
            OutputFormat::Human => println!(
                "#{:<3} {} in {:.2}s ({} bytes)",
                n,
                response.status(),
                elapsed.as_secs_f64(),
                response.body().len()
            ),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "request": n,
                    "status": response.status().as_u16(),
                    "elapsed_ms": elapsed.as_millis() as u64,
                    "bytes": response.body().len(),
                })
            ),
        }
    }

    let average = transport.average_snapshot().await;
    let burst = match &key {
        Some(key) => transport.burst_snapshot(key).await,
        None => None,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "average: locked={} window={}s pending={}ms",
                average.locked, average.window_secs, average.delay_ms
            );
            match (&key, burst) {
                (Some(key), Some(burst)) => println!(
                    "burst {}: locked={} window={}s pending={}ms",
                    key, burst.locked, burst.window_secs, burst.delay_ms
                ),
                _ => println!("burst: not throttled (no resource type in path)"),
            }
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "route": key.as_ref().map(ToString::to_string),
                "average": average,
                "burst": burst,
            })
        ),
    }

    Ok(())
}
