use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange a still-valid token for a fresh one. Fails with 401 when the
/// token is invalid or when too much lifetime remains (too-early renewal is
/// reported with its own message so clients can back off and retry later).
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequestBody>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let issued = state.auth_service.refresh(&body.token)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshTokenResponseData {
            token: issued.token,
            expires_at: issued.claims.expires_at(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
