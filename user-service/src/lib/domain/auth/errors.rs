use auth::TokenError;
use thiserror::Error;

/// Error taxonomy for login, verification, and renewal.
///
/// `InvalidCredentials` deliberately covers both "unknown login name" and
/// "wrong password" so callers cannot enumerate accounts. Disabled and locked
/// accounts both collapse to `AccountUnavailable`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account is disabled or locked")]
    AccountUnavailable,

    #[error("Account role is not permitted to sign in")]
    RoleNotPermitted,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Token is not yet eligible for renewal")]
    TooEarly,

    /// Signer failures and user-store transport failures. Logged server-side,
    /// never exposed to the caller with detail.
    #[error("Internal authentication failure: {0}")]
    Internal(String),
}
