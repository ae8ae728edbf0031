use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessClaims;
use crate::domain::auth::models::IssuedToken;
use crate::domain::auth::token::TokenService;
use crate::domain::user::models::User;
use crate::domain::user::models::UserRole;
use crate::domain::user::models::UserStatus;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Access-control service: decides who may obtain a credential.
///
/// Orchestrates the user-store lookup, account eligibility rules, password
/// verification, and token issuance. Token verification and renewal delegate
/// to [`TokenService`] without touching the store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    tokens: TokenService,
    password_hasher: auth::PasswordHasher,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, tokens: TokenService) -> Self {
        Self {
            users,
            tokens,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Authenticate a login name and password, issuing a credential.
    ///
    /// Existence, status, and role are checked before the expensive password
    /// verification, so the Argon2 cost is only paid for plausible accounts.
    /// This leaks a small timing difference between "ineligible account" and
    /// "wrong password"; do not reorder the checks without re-analyzing the
    /// login flow.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown login name OR wrong password
    ///   (deliberately the same kind, anti-enumeration)
    /// * `AccountUnavailable` - Account is disabled or locked
    /// * `RoleNotPermitted` - Normal-role accounts cannot use this surface
    /// * `Internal` - Store transport failure or signer failure
    pub async fn login(&self, username: &str, password: &str) -> Result<(IssuedToken, User), AuthError> {
        // A name that fails Username validation cannot exist in the store.
        let Ok(username) = Username::new(username.to_string()) else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "Login failed: unknown user");
                AuthError::InvalidCredentials
            })?;

        if user.status != UserStatus::Active {
            tracing::warn!(
                username = %username,
                status = i16::from(user.status),
                "Login failed: account disabled or locked"
            );
            return Err(AuthError::AccountUnavailable);
        }

        if user.role == UserRole::Normal {
            tracing::warn!(username = %username, "Login failed: normal-role account");
            return Err(AuthError::RoleNotPermitted);
        }

        if !self.password_hasher.matches(password, &user.password_hash) {
            tracing::warn!(username = %username, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue(&user)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(
            username = %username,
            user_id = user.id.0,
            role = i16::from(user.role),
            "User logged in"
        );

        Ok((issued, user))
    }

    /// Verify a presented credential. Pure delegation to the token service.
    pub fn verify_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        Ok(self.tokens.verify(token)?)
    }

    /// Exchange a still-valid credential for a fresh one. Pure delegation to
    /// the token service; the secret is not re-presented.
    pub fn refresh(&self, token: &str) -> Result<IssuedToken, AuthError> {
        self.tokens.renew(token)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenError;
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::GroupId;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_group(&self, group_id: &GroupId) -> Result<Vec<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn tokens() -> TokenService {
        TokenService::new(SECRET, "user-service", 24, 1)
    }

    fn account(password: &str, status: UserStatus, role: UserRole) -> User {
        User {
            id: UserId(1),
            username: Username::new("sysadmin".to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            status,
            role,
            group_id: GroupId(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn repo_with(user: User) -> MockTestUserRepository {
        let mut repo = MockTestUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        repo
    }

    #[tokio::test]
    async fn test_login_success_embeds_role() {
        let user = account("admin123", UserStatus::Active, UserRole::System);
        let service = AuthService::new(Arc::new(repo_with(user)), tokens());

        let (issued, user) = service.login("sysadmin", "admin123").await.unwrap();

        assert_eq!(user.username.as_str(), "sysadmin");

        let claims = service.verify_token(&issued.token).unwrap();
        assert_eq!(claims.role, UserRole::System);
        assert_eq!(claims.username, "sysadmin");
        assert_eq!(claims.user_id, 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = account("admin123", UserStatus::Active, UserRole::System);
        let service = AuthService::new(Arc::new(repo_with(user)), tokens());

        let result = service.login("sysadmin", "wrong").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_same_kind_as_wrong_password() {
        let mut repo = MockTestUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        let service = AuthService::new(Arc::new(repo), tokens());

        let result = service.login("nobody", "anything").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_invalid_username_shape_is_same_kind() {
        let repo = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repo), tokens());

        let result = service.login("no such user!", "anything").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_inactive_account_fails_despite_correct_password() {
        for status in [UserStatus::Disabled, UserStatus::Locked] {
            let user = account("admin123", status, UserRole::System);
            let service = AuthService::new(Arc::new(repo_with(user)), tokens());

            let result = service.login("sysadmin", "admin123").await;
            assert_eq!(result.unwrap_err(), AuthError::AccountUnavailable);
        }
    }

    #[tokio::test]
    async fn test_login_normal_role_is_rejected_despite_correct_password() {
        let user = account("admin123", UserStatus::Active, UserRole::Normal);
        let service = AuthService::new(Arc::new(repo_with(user)), tokens());

        let result = service.login("sysadmin", "admin123").await;
        assert_eq!(result.unwrap_err(), AuthError::RoleNotPermitted);
    }

    #[tokio::test]
    async fn test_login_store_transport_failure_is_internal() {
        let mut repo = MockTestUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));
        let service = AuthService::new(Arc::new(repo), tokens());

        let result = service.login("sysadmin", "admin123").await;
        assert!(matches!(result.unwrap_err(), AuthError::Internal(_)));
    }

    #[tokio::test]
    async fn test_refresh_delegates_eligibility() {
        let repo = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repo), tokens());

        // Minted by an identical token service: 30 minutes remaining.
        let minting = TokenService::new(SECRET, "user-service", 24, 1);
        let user = account("admin123", UserStatus::Active, UserRole::Security);
        let nearly_expired = minting
            .issue_at(
                &user,
                Utc::now() - Duration::hours(23) - Duration::minutes(30),
            )
            .unwrap();
        let fresh = minting.issue_at(&user, Utc::now()).unwrap();

        let renewed = service.refresh(&nearly_expired.token).unwrap();
        assert!(renewed.claims.exp > nearly_expired.claims.exp);
        assert_eq!(renewed.claims.role, UserRole::Security);

        assert_eq!(
            service.refresh(&fresh.token).unwrap_err(),
            AuthError::TooEarly
        );
    }

    #[tokio::test]
    async fn test_verify_token_propagates_token_errors() {
        let repo = MockTestUserRepository::new();
        let service = AuthService::new(Arc::new(repo), tokens());

        let result = service.verify_token("not.a.token");
        assert_eq!(result.unwrap_err(), AuthError::Token(TokenError::Malformed));
    }
}
