use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::GroupId;
use crate::domain::user::ports::UserGroupServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> Result<ApiSuccess<DeletedData>, ApiError> {
    state.group_service.delete_group(&GroupId(group_id)).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeletedData {
            message: "User group deleted".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedData {
    pub message: String,
}
