//! Authentication primitives library
//!
//! Provides the cryptographic building blocks for token-based authentication:
//! - Password hashing (Argon2id)
//! - Signed credential encoding and decoding (JWT, HS256)
//!
//! Policy (claim shapes, lifetimes, renewal rules, account eligibility) lives
//! in the consuming service; this crate only hashes, signs, and verifies.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.matches("my_password", &hash));
//! assert!(!hasher.matches("not_my_password", &hash));
//! ```
//!
//! ## Signed Credentials
//! ```
//! use auth::JwtCodec;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize, PartialEq)]
//! struct Claims {
//!     sub: String,
//! }
//!
//! let codec = JwtCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.encode(&Claims { sub: "user1".into() }).unwrap();
//! let decoded: Claims = codec.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user1");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::JwtCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
