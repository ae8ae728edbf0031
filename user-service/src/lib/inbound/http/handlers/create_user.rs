use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::GroupId;
use crate::domain::user::models::UserRole;
use crate::domain::user::models::UserStatus;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let username = Username::new(body.username).map_err(UserError::from)?;
    let role = UserRole::try_from(body.role).map_err(UserError::from)?;
    let status = match body.status {
        Some(code) => UserStatus::try_from(code).map_err(UserError::from)?,
        None => UserStatus::Active,
    };

    let command = CreateUserCommand {
        username,
        password: body.password,
        status,
        role,
        group_id: GroupId(body.group_id),
    };

    let user = state.user_service.create_user(command).await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&user).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequestBody {
    username: String,
    password: String,
    role: i16,
    group_id: i64,
    #[serde(default)]
    status: Option<i16>,
}
