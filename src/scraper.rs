use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use spider_client::shapes::request::{ReturnFormat, ReturnFormatHandling};
use spider_client::{RequestParams, Spider};
use tracing::{debug, info};

use crate::config::SPIDER_KEY_ENV;
use crate::parser::lines::split_lines;

/// Render `url` through spider.cloud and return its visible text as
/// trimmed, non-empty lines. One request, bounded by `timeout`; no retries.
pub async fn fetch_page_lines(url: &str, timeout: Duration) -> Result<Vec<String>> {
    let api_key = std::env::var(SPIDER_KEY_ENV)
        .map_err(|_| anyhow!("{} environment variable must be set", SPIDER_KEY_ENV))?;
    let spider = Spider::new(Some(api_key))
        .map_err(|e| anyhow!("Failed to create Spider client: {}", e))?;

    let params = RequestParams {
        return_format: Some(ReturnFormatHandling::Single(ReturnFormat::Markdown)),
        ..Default::default()
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    pb.set_message(format!("Rendering {}", url));
    pb.enable_steady_tick(Duration::from_millis(120));

    let start = Instant::now();
    let response = tokio::time::timeout(
        timeout,
        spider.scrape_url(url, Some(params), "application/json"),
    )
    .await;
    pb.finish_and_clear();

    let value = response
        .map_err(|_| anyhow!("Timed out after {}s rendering {}", timeout.as_secs(), url))?
        .map_err(|e| anyhow!("Spider scrape failed: {}", e))?;
    info!("Fetched {} in {}ms", url, start.elapsed().as_millis());

    let content = content_from_response(value).context("No content in spider response")?;
    let lines = split_lines(&content);
    debug!("{} lines of page text", lines.len());
    if lines.is_empty() {
        return Err(anyhow!("Page {} rendered no text", url));
    }
    Ok(lines)
}

/// Pull the first page's `content` out of a spider response. The body may
/// arrive either as JSON or as a JSON-encoded string.
fn content_from_response(value: serde_json::Value) -> Option<String> {
    let parsed: serde_json::Value = match value.as_str() {
        Some(s) => serde_json::from_str(s).unwrap_or(value.clone()),
        None => value,
    };

    parsed
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|obj| obj.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
}
