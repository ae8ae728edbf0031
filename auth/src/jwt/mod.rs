pub mod codec;
pub mod errors;

pub use codec::JwtCodec;
pub use errors::TokenError;
