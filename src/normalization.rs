/// Classification and mapping of upstream responses.
///
/// The upstream payload is treated as untrusted: every field is read through
/// an explicit fallback chain rather than a fixed schema, and the order of each
/// chain decides which message the caller sees.
use crate::errors::LookupError;
use crate::models::{
    IpDetails, LookupOutcome, LookupResult, MISSING_DETAILS_WARNING, NOT_AVAILABLE,
};
use serde_json::{Map, Number, Value};

pub const UNEXPECTED_STATUS_MESSAGE: &str = "API returned an unexpected status or error flag.";
pub const INVALID_DATA_MESSAGE: &str =
    "API returned ok status but data structure is invalid or missing.";

// ============ HTTP Status Classification ============

/// Message for a 404 from the upstream. The body is never consulted: a 404
/// means the endpoint or the subscription is misconfigured.
pub fn not_found_message(url: &str, host: &str) -> String {
    format!(
        "API Error (404): API endpoint not found at {} (Host: {}). Check the configured endpoint URL, \
         and verify that the RapidAPI key is correct, active, and subscribed to the IP Blacklist Lookup API.",
        url, host
    )
}

/// Message for any other non-2xx response.
///
/// Priority: a known JSON error shape, then the raw body text, then the
/// status line reason.
pub fn http_error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| extract_error_detail(&json))
        .or_else(|| non_empty(body))
        .unwrap_or_else(|| reason.unwrap_or("Unknown error").to_string());

    format!("API Error ({}): {}", status, detail)
}

/// Pull a human-readable message out of a JSON error body.
///
/// Checked in order: `message`, `data.message`, `error` (string only),
/// `errors` (non-empty array, joined with ", "), the body itself as a string.
pub fn extract_error_detail(body: &Value) -> Option<String> {
    if let Some(msg) = body.get("message").and_then(text) {
        return Some(msg);
    }
    if let Some(msg) = body.pointer("/data/message").and_then(text) {
        return Some(msg);
    }
    if let Some(msg) = body.get("error").and_then(Value::as_str).and_then(non_empty) {
        return Some(msg);
    }
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(|e| match e {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            return Some(joined);
        }
    }
    body.as_str().and_then(non_empty)
}

// ============ Application Status Classification ============

/// Check the success markers of a 2xx body and return its `data` object.
pub fn classify_body(body: &Value) -> Result<&Map<String, Value>, LookupError> {
    let status_ok = body.get("status").and_then(Value::as_str) == Some("ok");
    let success_flag = body.get("success").and_then(Value::as_bool) == Some(true);

    if !status_ok && !success_flag {
        let message = body
            .get("error")
            .and_then(text)
            .or_else(|| body.get("message").and_then(text))
            .or_else(|| body.pointer("/data/message").and_then(text))
            .unwrap_or_else(|| UNEXPECTED_STATUS_MESSAGE.to_string());

        return Err(LookupError::UpstreamApplication {
            code: body_code(body).unwrap_or(500),
            message,
        });
    }

    body.get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| LookupError::UpstreamData(INVALID_DATA_MESSAGE.to_string()))
}

/// `code` from the body when it is a usable positive status number.
pub fn body_code(body: &Value) -> Option<u16> {
    body.get("code")
        .and_then(Value::as_u64)
        .filter(|code| *code > 0)
        .and_then(|code| u16::try_from(code).ok())
}

// ============ Mapping ============

/// Map a validated `data` object onto a `LookupResult`.
///
/// Returns the missing-details warning alongside the result when `ipDetails`
/// is absent or not an object.
pub fn map_data(data: &Map<String, Value>, fallback_ip: &str) -> (LookupResult, Option<String>) {
    let ip_address = data
        .get("ipAddress")
        .and_then(Value::as_str)
        .and_then(non_empty)
        .unwrap_or_else(|| fallback_ip.to_string());

    let details = data
        .get("ipDetails")
        .and_then(Value::as_object)
        .map(map_details);

    let warning = details
        .is_none()
        .then(|| MISSING_DETAILS_WARNING.to_string());

    let result = LookupResult {
        ip_address,
        is_blacklisted: data
            .get("isIPBlacklisted")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        details,
        parsed: data.get("parsed").and_then(Value::as_bool),
    };

    (result, warning)
}

fn map_details(details: &Map<String, Value>) -> IpDetails {
    IpDetails {
        country: string_or_na(details.get("country")),
        region: string_or_na(details.get("region")),
        timezone: string_or_na(details.get("timezone")),
        latitude: details.get("latitude").and_then(Value::as_f64),
        longitude: details.get("longitude").and_then(Value::as_f64),
        range: details.get("range").and_then(range_bounds),
    }
}

fn range_bounds(value: &Value) -> Option<(Number, Number)> {
    match value.as_array()?.as_slice() {
        [Value::Number(start), Value::Number(end)] => Some((start.clone(), end.clone())),
        _ => None,
    }
}

/// Classify and map a parsed 2xx body in one step.
pub fn normalize_body(body: &Value, fallback_ip: &str) -> Result<LookupOutcome, LookupError> {
    let data = classify_body(body)?;
    let (result, warning) = map_data(data, fallback_ip);

    Ok(LookupOutcome::Success {
        result,
        warning,
        code: body_code(body).unwrap_or(200),
    })
}

fn string_or_na(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .and_then(non_empty)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Scalar JSON values rendered as text; empty strings, null and containers yield `None`.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
