use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::GroupId;
use crate::domain::user::models::NewUserGroup;
use crate::domain::user::models::UserGroup;
use crate::domain::user::ports::UserGroupRepository;

pub struct PostgresUserGroupRepository {
    pool: PgPool,
}

impl PostgresUserGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct GroupRow {
    id: i64,
    name: String,
    description: String,
    status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GroupRow> for UserGroup {
    fn from(row: GroupRow) -> Self {
        UserGroup {
            id: GroupId(row.id),
            name: row.name,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserGroupRepository for PostgresUserGroupRepository {
    async fn create(&self, group: NewUserGroup) -> Result<UserGroup, UserError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            INSERT INTO user_groups (name, description, status)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, status, created_at, updated_at
            "#,
        )
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                return UserError::GroupNameAlreadyExists(group.name.clone());
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<UserGroup>, UserError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, name, description, status, created_at, updated_at
            FROM user_groups
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(UserGroup::from))
    }

    async fn list_all(&self) -> Result<Vec<UserGroup>, UserError> {
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, name, description, status, created_at, updated_at
            FROM user_groups
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(UserGroup::from).collect())
    }

    async fn update(&self, group: UserGroup) -> Result<UserGroup, UserError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            UPDATE user_groups
            SET name = $2,
                description = $3,
                status = $4,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, status, created_at, updated_at
            "#,
        )
        .bind(group.id.0)
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                return UserError::GroupNameAlreadyExists(group.name.clone());
            }
            UserError::DatabaseError(e.to_string())
        })?;

        match row {
            Some(r) => Ok(r.into()),
            None => Err(UserError::GroupNotFound(group.id.to_string())),
        }
    }

    async fn delete(&self, id: &GroupId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM user_groups WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // The service pre-checks membership; the FK constraint is the
                // backstop against concurrent member creation.
                if e.as_database_error()
                    .is_some_and(|db_err| db_err.is_foreign_key_violation())
                {
                    return UserError::GroupNotEmpty(id.to_string());
                }
                UserError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(UserError::GroupNotFound(id.to_string()));
        }

        Ok(())
    }
}
