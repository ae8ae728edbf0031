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

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create a new user with a hashed password.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `GroupNotFound` - Referenced group does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Retrieve all users.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `GroupNotFound` - New group does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Port for user-group domain service operations.
#[async_trait]
pub trait UserGroupServicePort: Send + Sync + 'static {
    /// Create a new user group.
    ///
    /// # Errors
    /// * `GroupNameAlreadyExists` - Group name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create_group(&self, group: NewUserGroup) -> Result<UserGroup, UserError>;

    /// Retrieve group by unique identifier.
    ///
    /// # Errors
    /// * `GroupNotFound` - Group does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_group(&self, id: &GroupId) -> Result<UserGroup, UserError>;

    /// Retrieve a group together with its member users.
    async fn get_group_with_users(&self, id: &GroupId)
        -> Result<(UserGroup, Vec<User>), UserError>;

    /// Retrieve all groups.
    async fn list_groups(&self) -> Result<Vec<UserGroup>, UserError>;

    /// Update existing group with optional fields.
    async fn update_group(
        &self,
        id: &GroupId,
        command: UpdateUserGroupCommand,
    ) -> Result<UserGroup, UserError>;

    /// Delete an empty group.
    ///
    /// # Errors
    /// * `GroupNotFound` - Group does not exist
    /// * `GroupNotEmpty` - Group still has member users
    /// * `DatabaseError` - Database operation failed
    async fn delete_group(&self, id: &GroupId) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage; id and timestamps come from the database.
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier (None if not found).
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username (None if not found).
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve all users belonging to a group.
    async fn find_by_group(&self, group_id: &GroupId) -> Result<Vec<User>, UserError>;

    /// Retrieve all users from storage.
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Update existing user in storage.
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the user-group aggregate.
#[async_trait]
pub trait UserGroupRepository: Send + Sync + 'static {
    /// Persist new group to storage; id and timestamps come from the database.
    async fn create(&self, group: NewUserGroup) -> Result<UserGroup, UserError>;

    /// Retrieve group by identifier (None if not found).
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<UserGroup>, UserError>;

    /// Retrieve all groups from storage.
    async fn list_all(&self) -> Result<Vec<UserGroup>, UserError>;

    /// Update existing group in storage.
    async fn update(&self, group: UserGroup) -> Result<UserGroup, UserError>;

    /// Remove group from storage.
    async fn delete(&self, id: &GroupId) -> Result<(), UserError>;
}
