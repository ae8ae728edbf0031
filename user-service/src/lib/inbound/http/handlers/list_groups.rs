use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::GroupData;
use crate::domain::user::ports::UserGroupServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<GroupData>>, ApiError> {
    let groups = state.group_service.list_groups().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        groups.iter().map(GroupData::from).collect(),
    ))
}
