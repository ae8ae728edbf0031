use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::TokenError;

/// Codec for signed, opaque credential strings.
///
/// Generic over the claims type so the consuming service defines its own
/// payload. Uses HS256 (HMAC with SHA-256).
///
/// Temporal claims (`exp`, `nbf`) are NOT validated here: the caller owns the
/// freshness window so it can apply exact half-open boundary semantics and an
/// injected clock. `decode` only checks structure and signature.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtCodec {
    /// Create a new codec from a signing secret.
    ///
    /// The secret should be at least 256 bits (32 bytes) for HS256 and must
    /// never be mutated for the process lifetime.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode and sign claims into a credential string.
    ///
    /// # Errors
    /// * `Signing` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Decode a credential string, verifying its signature.
    ///
    /// # Errors
    /// * `BadSignature` - Signature does not verify against this codec's key
    /// * `Malformed` - Token structure or payload is invalid
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
    }

    fn codec() -> JwtCodec {
        JwtCodec::new(b"my_secret_key_at_least_32_bytes_long!")
    }

    #[test]
    fn test_encode_and_decode_round_trip() {
        let claims = TestClaims {
            sub: "user123".to_string(),
            role: "system".to_string(),
        };

        let token = codec().encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: TestClaims = codec().decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let result = codec().decode::<TestClaims>("not.a.token");
        assert_eq!(result.unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_decode_with_wrong_secret_is_bad_signature() {
        let other = JwtCodec::new(b"another_secret_32_bytes_long_key!!");

        let claims = TestClaims {
            sub: "user123".to_string(),
            role: "system".to_string(),
        };
        let token = codec().encode(&claims).expect("Failed to encode token");

        let result = other.decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), TokenError::BadSignature);
    }

    #[test]
    fn test_tampered_token_never_decodes() {
        let claims = TestClaims {
            sub: "user123".to_string(),
            role: "system".to_string(),
        };
        let token = codec().encode(&claims).expect("Failed to encode token");

        // Flip one byte in each segment of the token in turn.
        for i in [1, token.len() / 2, token.len() - 2] {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            let result = codec().decode::<TestClaims>(&tampered);
            assert!(matches!(
                result,
                Err(TokenError::BadSignature) | Err(TokenError::Malformed)
            ));
        }
    }
}
