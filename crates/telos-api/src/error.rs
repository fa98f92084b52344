// error.rs — The client-side error taxonomy.
//
// Four user-meaningful classes plus plumbing:
//   Auth        — fatal to the session; the store is cleared before this
//                 surfaces, so "must re-authenticate" is never silent
//   Transient   — timeouts, connect failures, 5xx; retryable by the user,
//                 never touches session state
//   Validation  — 400 with the server's detail, surfaced on the form
//   Permission  — 403; authoritative, overrides the local guard
//   Gate        — the local guard said no; nothing was sent

use thiserror::Error;

/// Session-fatal authentication failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The auth service rejected the credentials.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The refresh token is missing, rejected, or a retried request was
    /// rejected again. The session has been cleared.
    #[error("session expired, please log in again")]
    SessionExpired,
}

/// Errors produced by the REST client and the executing goal gate.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The server rejected the payload (400).
    #[error("the request was rejected: {detail}")]
    Validation { detail: String },

    /// The server denied the action (403). Authoritative — callers should
    /// re-fetch to re-synchronize rather than trust the local guard.
    #[error("permission denied: {detail}")]
    Permission { detail: String },

    /// The resource does not exist (404).
    #[error("not found: {detail}")]
    NotFound { detail: String },

    /// Timeout, connection failure, or 5xx. Retryable by the user; no
    /// state changed.
    #[error("temporary failure, try again: {detail}")]
    Transient { detail: String },

    /// A status the taxonomy has no mapping for.
    #[error("unexpected response status {status}: {detail}")]
    Unexpected { status: u16, detail: String },

    /// Transport or decoding failure inside reqwest.
    #[error("http transport error: {0}")]
    Http(#[source] reqwest::Error),

    /// The local guard table refused the action; nothing was sent.
    #[error("{0}")]
    Gate(#[from] telos_goal::GoalError),

    /// Token persistence failed.
    #[error("session storage error: {0}")]
    Session(#[from] telos_session::SessionError),
}

impl ApiError {
    /// True for failures the user can sensibly retry as-is.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transient { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            ApiError::Transient {
                detail: err.to_string(),
            }
        } else {
            ApiError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let err = ApiError::Transient {
            detail: "connection refused".to_string(),
        };
        assert!(err.is_transient());
        assert!(!ApiError::Auth(AuthError::SessionExpired).is_transient());
        assert!(!ApiError::Permission {
            detail: "nope".to_string()
        }
        .is_transient());
    }

    #[test]
    fn gate_errors_carry_the_guard_message() {
        let err = ApiError::from(telos_goal::GoalError::NotApprover);
        assert!(err.to_string().contains("direct manager"));
    }
}
