use thiserror::Error;

/// Error type for credential encoding and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is structurally invalid")]
    Malformed,

    #[error("Token signature verification failed")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}
