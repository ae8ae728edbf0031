use auth::JwtCodec;
use auth::TokenError;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessClaims;
use crate::domain::auth::models::IssuedToken;
use crate::domain::user::models::User;

/// Owns the signing key, issuer identity, and expiry/renewal policy.
///
/// Stateless given its immutable configuration: concurrent calls need no
/// locking, and issued credentials can only be invalidated by expiry.
///
/// Every operation has an `_at` variant taking an explicit instant; the plain
/// variants use the current time. Freshness is evaluated against the
/// half-open window `[nbf, exp)` with zero leeway.
pub struct TokenService {
    codec: JwtCodec,
    issuer: String,
    lifetime: Duration,
    renewal_window: Duration,
}

impl TokenService {
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        lifetime_hours: i64,
        renewal_window_hours: i64,
    ) -> Self {
        Self {
            codec: JwtCodec::new(secret),
            issuer: issuer.into(),
            lifetime: Duration::hours(lifetime_hours),
            renewal_window: Duration::hours(renewal_window_hours),
        }
    }

    /// Build and sign a claim set for a user.
    ///
    /// Sets `iat = nbf = now` and `exp = now + lifetime`, so the claim
    /// invariant `iat <= nbf <= exp` holds by construction.
    ///
    /// # Errors
    /// * `Signing` - The signer itself failed (internal fault)
    pub fn issue(&self, user: &User) -> Result<IssuedToken, TokenError> {
        self.issue_at(user, Utc::now())
    }

    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let claims = AccessClaims {
            user_id: user.id.0,
            username: user.username.to_string(),
            role: user.role,
            group_id: user.group_id.0,
            sub: user.username.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        self.sign(claims)
    }

    /// Decode a credential, check its signature, and check freshness.
    ///
    /// # Errors
    /// * `Malformed` - Structurally invalid input
    /// * `BadSignature` - Signature does not verify against the signing key
    /// * `Expired` - `now >= exp` (a token presented exactly at `exp` is
    ///   already expired)
    /// * `NotYetValid` - `now < nbf`
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        let claims: AccessClaims = self.codec.decode(token)?;

        let now_ts = now.timestamp();
        if now_ts < claims.nbf {
            return Err(TokenError::NotYetValid);
        }
        if now_ts >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Exchange a still-valid credential for a fresh one.
    ///
    /// Verification errors propagate unchanged. A valid credential is only
    /// renewable once at most `renewal_window` remains before expiry; the
    /// exact boundary (`remaining == renewal_window`) is accepted. Subject
    /// identity fields are preserved, `iat`/`nbf`/`exp` are re-stamped.
    ///
    /// Renewal trusts the signed claims; the secret is not re-presented.
    ///
    /// # Errors
    /// * `Token` - Verification failed (see [`TokenService::verify`])
    /// * `TooEarly` - More than `renewal_window` remains before expiry
    pub fn renew(&self, token: &str) -> Result<IssuedToken, AuthError> {
        self.renew_at(token, Utc::now())
    }

    pub fn renew_at(&self, token: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let claims = self.verify_at(token, now)?;

        let remaining = claims.exp - now.timestamp();
        if remaining > self.renewal_window.num_seconds() {
            tracing::debug!(
                username = %claims.username,
                remaining_secs = remaining,
                "Token not yet eligible for renewal"
            );
            return Err(AuthError::TooEarly);
        }

        let renewed = AccessClaims {
            user_id: claims.user_id,
            username: claims.username.clone(),
            role: claims.role,
            group_id: claims.group_id,
            sub: claims.sub,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        let issued = self.sign(renewed)?;

        tracing::info!(
            username = %issued.claims.username,
            user_id = issued.claims.user_id,
            "Token renewed"
        );

        Ok(issued)
    }

    fn sign(&self, claims: AccessClaims) -> Result<IssuedToken, TokenError> {
        let token = self.codec.encode(&claims)?;
        Ok(IssuedToken { token, claims })
    }
}
