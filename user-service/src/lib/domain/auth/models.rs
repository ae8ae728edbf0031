use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::UserRole;

/// Claim set embedded and signed inside an access credential.
///
/// Immutable once encoded: role and group are frozen at issuance and a later
/// change on the account does not retroactively invalidate the credential
/// (stateless bearer model).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub group_id: i64,

    /// Subject (the login name)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Not before (Unix timestamp)
    pub nbf: i64,
    /// Expiration time (Unix timestamp, exclusive)
    pub exp: i64,
}

impl AccessClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }
}

/// A freshly signed credential together with its decoded claim set.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: AccessClaims,
}
