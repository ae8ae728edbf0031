pub mod group;
pub mod user;

pub use group::PostgresUserGroupRepository;
pub use user::PostgresUserRepository;
