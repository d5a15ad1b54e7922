use crate::error::SylvaError;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signer/verifier sharing one secret. Cheap to clone.
#[derive(Clone)]
pub struct TokenSigner {
    inner: Arc<SignerInner>,
}

struct SignerInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            inner: Arc::new(SignerInner {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
                ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
            }),
        }
    }

    /// Sign a token for `username`, valid for the configured lifetime from now.
    pub fn issue(&self, username: &str) -> Result<String, SylvaError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            username: username.to_string(),
            iat,
            exp: iat.saturating_add(self.inner.ttl_secs),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, SylvaError> {
        Ok(encode(&Header::default(), claims, &self.inner.encoding)?)
    }

    /// Check signature and expiry. Any failure is reported as [`SylvaError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<Claims, SylvaError> {
        decode::<Claims>(token, &self.inner.decoding, &self.inner.validation)
            .map(|data| data.claims)
            .map_err(|_| SylvaError::InvalidToken)
    }
}
