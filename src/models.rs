use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Placeholder used for detail strings the upstream did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Advisory attached to a successful lookup whose detail object was absent.
pub const MISSING_DETAILS_WARNING: &str = "IP Details were missing from the API response.";

// ============ Lookup Models ============

/// Geographic details about an address.
///
/// `country`, `region` and `timezone` are never empty: a value missing upstream
/// is stored as [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpDetails {
    /// Country code (e.g., "US", "BR").
    pub country: String,
    /// Region name or code.
    pub region: String,
    /// IANA timezone (e.g., "America/Sao_Paulo").
    pub timezone: String,
    /// Latitude, when the upstream provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude, when the upstream provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Numeric bounds of the block the address belongs to, passed through as sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(Number, Number)>,
}

/// Normalized result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// Address confirmed by the upstream, or the validated input.
    pub ip_address: String,
    /// Blacklist flag. `false` also covers "upstream did not say".
    pub is_blacklisted: bool,
    /// `None` when the upstream sent no detail object.
    pub details: Option<IpDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<bool>,
}

/// Category of a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Configuration,
    Transport,
    UpstreamHttp,
    UpstreamApplication,
    UpstreamData,
}

/// What a lookup produces: exactly one of a result or an error.
///
/// A lookup that succeeded without detail data is still a `Success`, with
/// `warning` set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Success {
        result: LookupResult,
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
        /// Code from the upstream body, 200 when absent.
        code: u16,
    },
    Failure {
        message: String,
        code: u16,
        kind: FailureKind,
    },
}

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success { .. })
    }

    pub fn result(&self) -> Option<&LookupResult> {
        match self {
            LookupOutcome::Success { result, .. } => Some(result),
            LookupOutcome::Failure { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            LookupOutcome::Success { warning, .. } => warning.as_deref(),
            LookupOutcome::Failure { .. } => None,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            LookupOutcome::Success { code, .. } | LookupOutcome::Failure { code, .. } => *code,
        }
    }
}

// ============ Request Models ============

/// Query parameters for `GET /api/v1/lookup`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupQuery {
    pub ip: Option<String>,
}

/// JSON body for `POST /api/v1/lookup`. `null` and an absent field both mean
/// no address was given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[serde(default)]
    pub ip_address: Option<String>,
}
