use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::errors::GroupIdError;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::StatusError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UsernameError;

/// User aggregate entity.
///
/// Read-mostly from the auth core's point of view: login never mutates it,
/// and the password hash is only written through the user service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub group_id: GroupId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User group entity.
#[derive(Debug, Clone)]
pub struct UserGroup {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse::<i64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User group unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub i64);

impl GroupId {
    pub fn from_string(s: &str) -> Result<Self, GroupIdError> {
        s.parse::<i64>()
            .map(GroupId)
            .map_err(|e| GroupIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account status.
///
/// Closed enumeration; the numeric wire/storage coding (0/1/2) is fixed by
/// the existing schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum UserStatus {
    Disabled,
    Active,
    Locked,
}

impl From<UserStatus> for i16 {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Disabled => 0,
            UserStatus::Active => 1,
            UserStatus::Locked => 2,
        }
    }
}

impl TryFrom<i16> for UserStatus {
    type Error = StatusError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(UserStatus::Disabled),
            1 => Ok(UserStatus::Active),
            2 => Ok(UserStatus::Locked),
            other => Err(StatusError::UnknownCode(other)),
        }
    }
}

/// Coarse-grained permission category attached to an account.
///
/// Closed enumeration; the numeric wire/storage coding (1-4) is fixed by the
/// existing schema. `Normal` accounts are provisioned for other access paths
/// and cannot sign in to this backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum UserRole {
    System,
    Security,
    Audit,
    Normal,
}

impl From<UserRole> for i16 {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::System => 1,
            UserRole::Security => 2,
            UserRole::Audit => 3,
            UserRole::Normal => 4,
        }
    }
}

impl TryFrom<i16> for UserRole {
    type Error = RoleError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(UserRole::System),
            2 => Ok(UserRole::Security),
            3 => Ok(UserRole::Audit),
            4 => Ok(UserRole::Normal),
            other => Err(RoleError::UnknownCode(other)),
        }
    }
}

/// Fields of a user that does not exist in storage yet (the id and the
/// timestamps are assigned by the database).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub group_id: GroupId,
}

/// Fields of a user group that does not exist in storage yet.
#[derive(Debug, Clone)]
pub struct NewUserGroup {
    pub name: String,
    pub description: String,
    pub status: i16,
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub password: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub group_id: GroupId,
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub password: Option<String>,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
    pub group_id: Option<GroupId>,
}

/// Command to update an existing user group with optional fields.
#[derive(Debug, Default)]
pub struct UpdateUserGroupCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<i16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("sysadmin".to_string()).is_ok());
        assert!(Username::new("a-b_c1".to_string()).is_ok());

        assert!(matches!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(matches!(
            Username::new("x".repeat(33)),
            Err(UsernameError::TooLong { .. })
        ));
        assert!(matches!(
            Username::new("not valid!".to_string()),
            Err(UsernameError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_role_codes_round_trip() {
        for role in [
            UserRole::System,
            UserRole::Security,
            UserRole::Audit,
            UserRole::Normal,
        ] {
            let code: i16 = role.into();
            assert_eq!(UserRole::try_from(code).unwrap(), role);
        }
        assert!(UserRole::try_from(0).is_err());
        assert!(UserRole::try_from(5).is_err());
    }

    #[test]
    fn test_status_codes_round_trip() {
        for status in [UserStatus::Disabled, UserStatus::Active, UserStatus::Locked] {
            let code: i16 = status.into();
            assert_eq!(UserStatus::try_from(code).unwrap(), status);
        }
        assert!(UserStatus::try_from(3).is_err());
    }
}
