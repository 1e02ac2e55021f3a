//! `OpenFEMA` IPAWS Archived Alerts fetcher.
//!
//! The archive is an OData-style endpoint: a date window is expressed
//! as a `$filter` on the `sent` column, `$top` caps the result size,
//! and `$orderby=sent desc` returns the newest alerts first. Records
//! come back wrapped in an `IpawsArchivedAlerts` envelope.
//!
//! Records are deserialized individually so one malformed archive
//! entry never drops the whole batch — it is skipped with a warning.

use chrono::NaiveDate;
use ipaws_map_alert_models::Alert;
use ipaws_map_geometry::viewport;

use crate::{FetchOptions, SourceError, retry};

/// Base URL of the `OpenFEMA` IPAWS Archived Alerts endpoint.
pub const API_BASE_URL: &str = "https://www.fema.gov/api/open/v1/IpawsArchivedAlerts";

/// Name of the JSON envelope member holding the record array.
const ENVELOPE_KEY: &str = "IpawsArchivedAlerts";

/// Fetches archived alerts for the date window in `options`.
///
/// When `options.bounds` is set, the result is narrowed to alerts with
/// at least one shape inside the viewport before returning (the
/// server-side variant of the viewport filter).
///
/// # Errors
///
/// Returns [`SourceError`] if the HTTP request fails after retries or
/// the response is not the expected envelope shape.
pub async fn fetch_alerts(
    client: &reqwest::Client,
    options: &FetchOptions,
) -> Result<Vec<Alert>, SourceError> {
    let filter = date_filter(options.start, options.end);
    let top = options.limit.to_string();

    log::info!(
        "IPAWS archive: fetching {} to {} (limit {})",
        options.start,
        options.end,
        options.limit
    );

    let body = retry::send_json(|| {
        client.get(API_BASE_URL).query(&[
            ("$filter", filter.as_str()),
            ("$top", top.as_str()),
            ("$orderby", "sent desc"),
        ])
    })
    .await?;

    let mut alerts = parse_envelope(&body)?;
    log::info!("IPAWS archive: {} records", alerts.len());

    if let Some(bounds) = &options.bounds {
        let before = alerts.len();
        alerts.retain(|alert| viewport::alert_matches(alert, bounds));
        log::info!(
            "IPAWS archive: {} of {before} records inside viewport",
            alerts.len()
        );
    }

    Ok(alerts)
}

/// Builds the OData `$filter` expression for an inclusive date window.
#[must_use]
pub fn date_filter(start: NaiveDate, end: NaiveDate) -> String {
    format!("sent ge '{start}' and sent le '{end}'")
}

/// Unwraps the `IpawsArchivedAlerts` envelope and deserializes each
/// record, skipping (with a warning) records that fail.
///
/// # Errors
///
/// Returns [`SourceError::UnexpectedResponse`] when the envelope
/// member is missing or not an array.
pub fn parse_envelope(body: &serde_json::Value) -> Result<Vec<Alert>, SourceError> {
    let records = body
        .get(ENVELOPE_KEY)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| SourceError::UnexpectedResponse {
            message: format!("missing '{ENVELOPE_KEY}' array in response"),
        })?;

    let mut alerts = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Alert>(record.clone()) {
            Ok(alert) => alerts.push(alert),
            Err(e) => {
                log::warn!("skipping malformed archive record: {e}");
            }
        }
    }
    Ok(alerts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_date_filter() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(
            date_filter(start, end),
            "sent ge '2024-06-01' and sent le '2024-06-30'"
        );
    }

    #[test]
    fn unwraps_envelope_and_skips_malformed_records() {
        let body = json!({
            "metadata": { "count": 3 },
            "IpawsArchivedAlerts": [
                { "identifier": "ok-1", "msgType": "Alert" },
                { "identifier": 12345, "info": "not-an-array" },
                { "identifier": "ok-2" }
            ]
        });

        let alerts = parse_envelope(&body).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].identifier, "ok-1");
        assert_eq!(alerts[1].identifier, "ok-2");
    }

    #[test]
    fn rejects_missing_envelope() {
        let body = json!({ "somethingElse": [] });
        assert!(matches!(
            parse_envelope(&body),
            Err(SourceError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn empty_envelope_yields_empty_batch() {
        let body = json!({ "IpawsArchivedAlerts": [] });
        assert!(parse_envelope(&body).unwrap().is_empty());
    }
}
