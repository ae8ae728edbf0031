use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::GroupData;
use super::UserData;
use crate::domain::user::models::GroupId;
use crate::domain::user::ports::UserGroupServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_group_users(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> Result<ApiSuccess<GroupWithUsersData>, ApiError> {
    let (group, users) = state
        .group_service
        .get_group_with_users(&GroupId(group_id))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GroupWithUsersData {
            group: (&group).into(),
            users: users.iter().map(UserData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupWithUsersData {
    pub group: GroupData,
    pub users: Vec<UserData>,
}
