//! Error handling module for the lobby client.
//!
//! Provides the failure type of the data-service boundary and the classifier
//! that turns a failed submission into the text shown to the user.

use crate::submit::FlowKind;

/// Failure kinds as constants to avoid stringly-typed errors.
pub mod codes {
    pub const ILLEGAL_INPUT: &str = "illegal-input";
    pub const SERVER_ERROR: &str = "server-error";
    pub const UNEXPECTED: &str = "unexpected";
}

/// Status used for failures that never produced an HTTP response.
pub const STATUS_UNKNOWN: u16 = 0;

/// A failed call to the data service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// HTTP status code, `0` when the request never got a response
    pub status: u16,
    pub message: String,
}

impl ServiceError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Error for a response that arrived with a non-success status.
    pub fn from_status(url: &str, status: reqwest::StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Error");
        Self::new(
            status.as_u16(),
            format!(
                "Http failure response for {}: {} {}",
                url,
                status.as_u16(),
                reason
            ),
        )
    }

    /// Error for a request that failed before any response was read.
    pub fn unreachable(url: &str) -> Self {
        Self::new(
            STATUS_UNKNOWN,
            format!("Http failure response for {}: 0 Unknown Error", url),
        )
    }

    /// Error for a success response whose body could not be decoded.
    pub fn parsing(url: &str, status: reqwest::StatusCode) -> Self {
        Self::new(
            status.as_u16(),
            format!("Http failure during parsing for {}", url),
        )
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Bucket a failed submission falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server rejected the submitted data
    IllegalInput,
    /// The server failed while handling the request
    ServerError,
    /// Anything else, including unreachable servers
    Unexpected,
}

impl FailureKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => FailureKind::IllegalInput,
            500 => FailureKind::ServerError,
            _ => FailureKind::Unexpected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::IllegalInput => codes::ILLEGAL_INPUT,
            FailureKind::ServerError => codes::SERVER_ERROR,
            FailureKind::Unexpected => codes::UNEXPECTED,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified submission failure, ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: FailureKind,
    pub text: String,
}

/// Map a failed submission to its kind and display text.
pub fn classify(flow: FlowKind, status: u16, message: &str) -> Classified {
    let kind = FailureKind::from_status(status);
    let text = match kind {
        FailureKind::IllegalInput => format!(
            "Tried to add an illegal new {} – Error Code: {}\nMessage: {}",
            flow.noun(),
            status,
            message
        ),
        FailureKind::ServerError => format!(
            "The server failed to process your request to {}. Is the server up? – Error Code: {}\nMessage: {}",
            flow.verb(),
            status,
            message
        ),
        FailureKind::Unexpected => format!(
            "An unexpected error occurred – Error Code: {}\nMessage: {}",
            status, message
        ),
    };

    Classified { kind, text }
}

impl ServiceError {
    /// Classify this error for the given flow.
    pub fn classify(&self, flow: FlowKind) -> Classified {
        classify(flow, self.status, &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_by_status() {
        assert_eq!(
            classify(FlowKind::AddLobby, 400, "x").kind,
            FailureKind::IllegalInput
        );
        assert_eq!(
            classify(FlowKind::AddLobby, 500, "x").kind,
            FailureKind::ServerError
        );
        assert_eq!(
            classify(FlowKind::AddLobby, 999, "x").kind,
            FailureKind::Unexpected
        );
        assert_eq!(
            classify(FlowKind::Join, STATUS_UNKNOWN, "x").kind,
            FailureKind::Unexpected
        );
    }

    #[test]
    fn test_lobby_templates() {
        assert_eq!(
            classify(FlowKind::AddLobby, 400, "bad name").text,
            "Tried to add an illegal new lobby – Error Code: 400\nMessage: bad name"
        );
        assert_eq!(
            classify(FlowKind::AddLobby, 500, "Server error").text,
            "The server failed to process your request to add a new lobby. Is the server up? – Error Code: 500\nMessage: Server error"
        );
        assert_eq!(
            classify(FlowKind::AddLobby, 404, "gone").text,
            "An unexpected error occurred – Error Code: 404\nMessage: gone"
        );
    }

    #[test]
    fn test_join_templates() {
        assert_eq!(
            classify(FlowKind::Join, 400, "m").text,
            "Tried to add an illegal new user – Error Code: 400\nMessage: m"
        );
        assert_eq!(
            classify(FlowKind::Join, 500, "m").text,
            "The server failed to process your request to join. Is the server up? – Error Code: 500\nMessage: m"
        );
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(FailureKind::IllegalInput.as_str(), "illegal-input");
        assert_eq!(FailureKind::ServerError.to_string(), "server-error");
        assert_eq!(FailureKind::Unexpected.as_str(), "unexpected");
    }

    #[test]
    fn test_http_error_messages() {
        let err = ServiceError::from_status(
            "http://localhost/api/lobbies",
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        );
        assert_eq!(err.status, 500);
        assert_eq!(
            err.message,
            "Http failure response for http://localhost/api/lobbies: 500 Internal Server Error"
        );

        let err = ServiceError::unreachable("http://localhost/api/lobbies");
        assert_eq!(err.status, 0);
        assert_eq!(
            err.to_string(),
            "0: Http failure response for http://localhost/api/lobbies: 0 Unknown Error"
        );
    }
}
