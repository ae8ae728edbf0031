use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::GroupId;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRole;
use crate::domain::user::models::UserStatus;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<UpdateUserRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let username = body
        .username
        .map(Username::new)
        .transpose()
        .map_err(UserError::from)?;
    let status = body
        .status
        .map(UserStatus::try_from)
        .transpose()
        .map_err(UserError::from)?;
    let role = body
        .role
        .map(UserRole::try_from)
        .transpose()
        .map_err(UserError::from)?;

    let command = UpdateUserCommand {
        username,
        password: body.password,
        status,
        role,
        group_id: body.group_id.map(GroupId),
    };

    let user = state
        .user_service
        .update_user(&UserId(user_id), command)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequestBody {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    status: Option<i16>,
    #[serde(default)]
    role: Option<i16>,
    #[serde(default)]
    group_id: Option<i64>,
}
