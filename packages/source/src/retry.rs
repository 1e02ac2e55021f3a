//! HTTP retry helper for transient errors.
//!
//! Fetchers should use [`send_json`] instead of calling
//! `reqwest::RequestBuilder::send()` directly so every request gets
//! automatic retry with exponential backoff on timeouts, connection
//! resets, HTTP 429, and HTTP 5xx.

use std::time::Duration;

use crate::SourceError;

/// Maximum number of retry attempts for transient HTTP errors. With
/// exponential backoff (2s, 4s, 8s) the total wait before giving up is
/// 14 seconds.
const MAX_RETRIES: u32 = 3;

/// Sends an HTTP request and parses the response body as JSON.
///
/// The `build_request` closure is called on each attempt to construct
/// a fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`. Retries transient failures (connection errors, timeouts,
/// HTTP 429, HTTP 5xx) up to [`MAX_RETRIES`] times with exponential
/// backoff. Other 4xx statuses are permanent and fail immediately.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails after all retries, the
/// server returns a non-retryable status, or the body is not valid
/// JSON.
#[allow(clippy::future_not_send)]
pub async fn send_json<F>(build_request: F) -> Result<serde_json::Value, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error: Option<SourceError> = None;

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt); // 2s, 4s, 8s
            log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        let response = match build_request().send().await {
            Ok(response) => response,
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                    last_error = Some(SourceError::Http(e));
                    continue;
                }
                return Err(SourceError::Http(e));
            }
        };

        let status = response.status();

        // 429 and 5xx are worth retrying; other 4xx are permanent.
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            if attempt < MAX_RETRIES {
                log::warn!("  HTTP {status}, retrying");
                last_error = Some(SourceError::UnexpectedResponse {
                    message: format!("HTTP {status}"),
                });
                continue;
            }
            return Err(SourceError::UnexpectedResponse {
                message: format!("HTTP {status} after {MAX_RETRIES} retries"),
            });
        }
        if status.is_client_error() {
            return Err(SourceError::UnexpectedResponse {
                message: format!("HTTP {status}"),
            });
        }

        return Ok(response.json::<serde_json::Value>().await?);
    }

    Err(last_error.unwrap_or_else(|| SourceError::UnexpectedResponse {
        message: "request failed after all retries".to_string(),
    }))
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
