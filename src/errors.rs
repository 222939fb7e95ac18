use crate::models::{FailureKind, LookupOutcome};
use std::fmt;

/// Reasons a candidate address is rejected before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The trimmed input is empty.
    EmptyInput,
    /// The input is neither an IPv4 nor an IPv6 address.
    MalformedAddress,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyInput => write!(f, "IP address is required."),
            ValidationError::MalformedAddress => {
                write!(f, "Invalid IP address format (supports IPv4 and IPv6).")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every way a lookup can fail.
///
/// Each variant carries the user-facing message already formatted, so the
/// `Display` output is exactly what ends up in `LookupOutcome::Failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Input rejected by the validator.
    Validation(ValidationError),
    /// Upstream credentials or endpoint are not usable.
    Configuration(String),
    /// DNS, connection, timeout or body read failures.
    Transport(String),
    /// Upstream answered with a non-2xx status.
    UpstreamHttp { status: u16, message: String },
    /// Upstream answered 2xx but the body reports a failure.
    UpstreamApplication { code: u16, message: String },
    /// Upstream claimed success but the payload is unusable.
    UpstreamData(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Validation(e) => write!(f, "{}", e),
            LookupError::Configuration(msg) => write!(f, "{}", msg),
            LookupError::Transport(msg) => write!(f, "{}", msg),
            LookupError::UpstreamHttp { message, .. } => write!(f, "{}", message),
            LookupError::UpstreamApplication { message, .. } => write!(f, "{}", message),
            LookupError::UpstreamData(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

impl LookupError {
    /// Numeric code reported to the caller.
    pub fn code(&self) -> u16 {
        match self {
            LookupError::Validation(_) => 400,
            LookupError::Configuration(_) => 500,
            LookupError::Transport(_) => 500,
            LookupError::UpstreamHttp { status, .. } => *status,
            LookupError::UpstreamApplication { code, .. } => *code,
            LookupError::UpstreamData(_) => 500,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            LookupError::Validation(_) => FailureKind::Validation,
            LookupError::Configuration(_) => FailureKind::Configuration,
            LookupError::Transport(_) => FailureKind::Transport,
            LookupError::UpstreamHttp { .. } => FailureKind::UpstreamHttp,
            LookupError::UpstreamApplication { .. } => FailureKind::UpstreamApplication,
            LookupError::UpstreamData(_) => FailureKind::UpstreamData,
        }
    }
}

impl From<ValidationError> for LookupError {
    fn from(err: ValidationError) -> Self {
        LookupError::Validation(err)
    }
}

impl From<LookupError> for LookupOutcome {
    fn from(err: LookupError) -> Self {
        LookupOutcome::Failure {
            message: err.to_string(),
            code: err.code(),
            kind: err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_400() {
        let err: LookupError = ValidationError::EmptyInput.into();
        assert_eq!(err.code(), 400);
        assert_eq!(err.kind(), FailureKind::Validation);
        assert_eq!(err.to_string(), "IP address is required.");
    }

    #[test]
    fn test_upstream_http_keeps_status() {
        let err = LookupError::UpstreamHttp {
            status: 429,
            message: "API Error (429): slow down".to_string(),
        };
        assert_eq!(err.code(), 429);

        match LookupOutcome::from(err) {
            LookupOutcome::Failure {
                message,
                code,
                kind,
            } => {
                assert_eq!(message, "API Error (429): slow down");
                assert_eq!(code, 429);
                assert_eq!(kind, FailureKind::UpstreamHttp);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_and_data_errors_are_500() {
        assert_eq!(LookupError::Transport("down".into()).code(), 500);
        assert_eq!(LookupError::UpstreamData("bad".into()).code(), 500);
        assert_eq!(LookupError::Configuration("no key".into()).code(), 500);
    }
}
