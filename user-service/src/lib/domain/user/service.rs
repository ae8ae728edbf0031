use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::GroupId;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::NewUserGroup;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UpdateUserGroupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserGroup;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserGroupRepository;
use crate::domain::user::ports::UserGroupServicePort;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Hashes secrets at creation/update time; the group repository is consulted
/// so a user can never reference a missing group.
pub struct UserService<UR, GR>
where
    UR: UserRepository,
    GR: UserGroupRepository,
{
    users: Arc<UR>,
    groups: Arc<GR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, GR> UserService<UR, GR>
where
    UR: UserRepository,
    GR: UserGroupRepository,
{
    pub fn new(users: Arc<UR>, groups: Arc<GR>) -> Self {
        Self {
            users,
            groups,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn require_group(&self, group_id: &GroupId) -> Result<(), UserError> {
        self.groups
            .find_by_id(group_id)
            .await?
            .map(|_| ())
            .ok_or(UserError::GroupNotFound(group_id.to_string()))
    }
}

#[async_trait]
impl<UR, GR> UserServicePort for UserService<UR, GR>
where
    UR: UserRepository,
    GR: UserGroupRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.require_group(&command.group_id).await?;

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let created_user = self
            .users
            .create(NewUser {
                username: command.username,
                password_hash,
                status: command.status,
                role: command.role,
                group_id: command.group_id,
            })
            .await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            role = i16::from(created_user.role),
            "User created"
        );

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.users.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self
                .password_hasher
                .hash(&new_password)
                .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        if let Some(new_status) = command.status {
            user.status = new_status;
        }

        if let Some(new_role) = command.role {
            user.role = new_role;
        }

        if let Some(new_group_id) = command.group_id {
            self.require_group(&new_group_id).await?;
            user.group_id = new_group_id;
        }

        let updated_user = self.users.update(user).await?;

        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.users.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

/// Domain service implementation for user-group operations.
pub struct UserGroupService<GR, UR>
where
    GR: UserGroupRepository,
    UR: UserRepository,
{
    groups: Arc<GR>,
    users: Arc<UR>,
}

impl<GR, UR> UserGroupService<GR, UR>
where
    GR: UserGroupRepository,
    UR: UserRepository,
{
    pub fn new(groups: Arc<GR>, users: Arc<UR>) -> Self {
        Self { groups, users }
    }
}

#[async_trait]
impl<GR, UR> UserGroupServicePort for UserGroupService<GR, UR>
where
    GR: UserGroupRepository,
    UR: UserRepository,
{
    async fn create_group(&self, group: NewUserGroup) -> Result<UserGroup, UserError> {
        let created = self.groups.create(group).await?;
        tracing::info!(group_id = %created.id, name = %created.name, "User group created");
        Ok(created)
    }

    async fn get_group(&self, id: &GroupId) -> Result<UserGroup, UserError> {
        self.groups
            .find_by_id(id)
            .await?
            .ok_or(UserError::GroupNotFound(id.to_string()))
    }

    async fn get_group_with_users(
        &self,
        id: &GroupId,
    ) -> Result<(UserGroup, Vec<User>), UserError> {
        let group = self.get_group(id).await?;
        let members = self.users.find_by_group(id).await?;
        Ok((group, members))
    }

    async fn list_groups(&self) -> Result<Vec<UserGroup>, UserError> {
        self.groups.list_all().await
    }

    async fn update_group(
        &self,
        id: &GroupId,
        command: UpdateUserGroupCommand,
    ) -> Result<UserGroup, UserError> {
        let mut group = self.get_group(id).await?;

        if let Some(name) = command.name {
            group.name = name;
        }
        if let Some(description) = command.description {
            group.description = description;
        }
        if let Some(status) = command.status {
            group.status = status;
        }

        let updated = self.groups.update(group).await?;
        tracing::info!(group_id = %updated.id, "User group updated");
        Ok(updated)
    }

    async fn delete_group(&self, id: &GroupId) -> Result<(), UserError> {
        // A group with members cannot be removed; reassign the users first.
        let members = self.users.find_by_group(id).await?;
        if !members.is_empty() {
            return Err(UserError::GroupNotEmpty(id.to_string()));
        }

        self.groups.delete(id).await?;
        tracing::info!(group_id = %id, "User group deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::UserRole;
    use crate::domain::user::models::UserStatus;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_group(&self, group_id: &GroupId) -> Result<Vec<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestUserGroupRepository {}

        #[async_trait]
        impl UserGroupRepository for TestUserGroupRepository {
            async fn create(&self, group: NewUserGroup) -> Result<UserGroup, UserError>;
            async fn find_by_id(&self, id: &GroupId) -> Result<Option<UserGroup>, UserError>;
            async fn list_all(&self) -> Result<Vec<UserGroup>, UserError>;
            async fn update(&self, group: UserGroup) -> Result<UserGroup, UserError>;
            async fn delete(&self, id: &GroupId) -> Result<(), UserError>;
        }
    }

    fn test_group(id: i64) -> UserGroup {
        UserGroup {
            id: GroupId(id),
            name: "System Administrators".to_string(),
            description: "".to_string(),
            status: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn persisted(new: NewUser) -> User {
        User {
            id: UserId(1),
            username: new.username,
            password_hash: new.password_hash,
            status: new.status,
            role: new.role,
            group_id: new.group_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut users = MockTestUserRepository::new();
        let mut groups = MockTestUserGroupRepository::new();

        groups
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_group(id.0))));

        users
            .expect_create()
            .withf(|new| {
                new.username.as_str() == "sysadmin" && new.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new| Ok(persisted(new)));

        let service = UserService::new(Arc::new(users), Arc::new(groups));

        let command = CreateUserCommand {
            username: Username::new("sysadmin".to_string()).unwrap(),
            password: "admin123".to_string(),
            status: UserStatus::Active,
            role: UserRole::System,
            group_id: GroupId(1),
        };

        let user = service.create_user(command).await.unwrap();
        assert_eq!(user.username.as_str(), "sysadmin");
        assert!(user.password_hash.starts_with("$argon2"));
        assert_ne!(user.password_hash, "admin123");
    }

    #[tokio::test]
    async fn test_create_user_unknown_group() {
        let users = MockTestUserRepository::new();
        let mut groups = MockTestUserGroupRepository::new();

        groups.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = UserService::new(Arc::new(users), Arc::new(groups));

        let command = CreateUserCommand {
            username: Username::new("sysadmin".to_string()).unwrap(),
            password: "admin123".to_string(),
            status: UserStatus::Active,
            role: UserRole::System,
            group_id: GroupId(42),
        };

        let result = service.create_user(command).await;
        assert!(matches!(result.unwrap_err(), UserError::GroupNotFound(_)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut users = MockTestUserRepository::new();
        let groups = MockTestUserGroupRepository::new();

        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = UserService::new(Arc::new(users), Arc::new(groups));

        let result = service.get_user(&UserId(99)).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_rehashes_password() {
        let mut users = MockTestUserRepository::new();
        let groups = MockTestUserGroupRepository::new();

        let existing = User {
            id: UserId(1),
            username: Username::new("sysadmin".to_string()).unwrap(),
            password_hash: "$argon2id$old".to_string(),
            status: UserStatus::Active,
            role: UserRole::System,
            group_id: GroupId(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let returned = existing.clone();
        users
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        users
            .expect_update()
            .withf(|user| {
                user.password_hash.starts_with("$argon2") && user.password_hash != "$argon2id$old"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(users), Arc::new(groups));

        let command = UpdateUserCommand {
            password: Some("new_password".to_string()),
            ..Default::default()
        };

        let updated = service.update_user(&UserId(1), command).await.unwrap();
        assert!(updated.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_delete_group_with_members_is_rejected() {
        let mut users = MockTestUserRepository::new();
        let groups = MockTestUserGroupRepository::new();

        users.expect_find_by_group().times(1).returning(|id| {
            Ok(vec![persisted(NewUser {
                username: Username::new("member".to_string()).unwrap(),
                password_hash: "$argon2id$x".to_string(),
                status: UserStatus::Active,
                role: UserRole::Normal,
                group_id: *id,
            })])
        });

        let service = UserGroupService::new(Arc::new(groups), Arc::new(users));

        let result = service.delete_group(&GroupId(4)).await;
        assert!(matches!(result.unwrap_err(), UserError::GroupNotEmpty(_)));
    }

    #[tokio::test]
    async fn test_delete_empty_group() {
        let mut users = MockTestUserRepository::new();
        let mut groups = MockTestUserGroupRepository::new();

        users
            .expect_find_by_group()
            .times(1)
            .returning(|_| Ok(vec![]));
        groups.expect_delete().times(1).returning(|_| Ok(()));

        let service = UserGroupService::new(Arc::new(groups), Arc::new(users));

        assert!(service.delete_group(&GroupId(5)).await.is_ok());
    }
}
