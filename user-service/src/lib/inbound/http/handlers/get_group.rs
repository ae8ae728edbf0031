use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::GroupData;
use crate::domain::user::models::GroupId;
use crate::domain::user::ports::UserGroupServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> Result<ApiSuccess<GroupData>, ApiError> {
    let group = state.group_service.get_group(&GroupId(group_id)).await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&group).into()))
}
