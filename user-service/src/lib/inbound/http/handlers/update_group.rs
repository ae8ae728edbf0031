use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::GroupData;
use crate::domain::user::models::GroupId;
use crate::domain::user::models::UpdateUserGroupCommand;
use crate::domain::user::ports::UserGroupServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Json(body): Json<UpdateGroupRequestBody>,
) -> Result<ApiSuccess<GroupData>, ApiError> {
    let command = UpdateUserGroupCommand {
        name: body.name,
        description: body.description,
        status: body.status,
    };

    let group = state
        .group_service
        .update_group(&GroupId(group_id), command)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&group).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateGroupRequestBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<i16>,
}
