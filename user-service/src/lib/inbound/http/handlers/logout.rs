use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Tokens are stateless bearers with no server-side session: logout has
/// nothing to invalidate and only acknowledges the request. A denylist would
/// be a separate component.
pub async fn logout(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<LogoutResponseData> {
    tracing::info!(
        username = %user.username,
        user_id = user.user_id,
        "User logged out"
    );

    ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "Logged out".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
