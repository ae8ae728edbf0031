use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::GroupData;
use crate::domain::user::models::NewUserGroup;
use crate::domain::user::ports::UserGroupServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<CreateGroupRequestBody>,
) -> Result<ApiSuccess<GroupData>, ApiError> {
    let group = state
        .group_service
        .create_group(NewUserGroup {
            name: body.name,
            description: body.description.unwrap_or_default(),
            status: body.status.unwrap_or(1),
        })
        .await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&group).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateGroupRequestBody {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<i16>,
}
