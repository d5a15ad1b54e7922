use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};
use tracing::debug;

use crate::error::SylvaError;
use crate::service::tokens::{Claims, TokenSigner};

/// Decide whether a request may proceed, looking only at its headers.
/// Expects `Authorization: Bearer <token>`; the token is the second space-separated word
/// whatever the scheme:
/// - no header, or nothing after the first space -> [`SylvaError::MissingToken`] (401)
/// - anything else that fails signature or expiry checks -> [`SylvaError::InvalidToken`] (403)
///
/// The account named in the token is not re-checked against storage.
pub fn authenticate(headers: &HeaderMap, signer: &TokenSigner) -> Result<Claims, SylvaError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        debug!("request rejected: missing authorization header");
        return Err(SylvaError::MissingToken);
    };
    let Ok(value) = value.to_str() else {
        debug!("request rejected: unreadable authorization header");
        return Err(SylvaError::InvalidToken);
    };
    let Some(token) = value.split(' ').nth(1).filter(|t| !t.is_empty()) else {
        debug!("request rejected: missing bearer token");
        return Err(SylvaError::MissingToken);
    };
    signer.verify(token).inspect_err(|_| {
        debug!("request rejected: invalid or expired token");
    })
}

/// Extractor guarding owner-only routes. Carries the verified claims.
#[derive(Debug, Clone)]
pub struct RequireOwner(pub Claims);

impl<S> FromRequestParts<S> for RequireOwner
where
    S: Send + Sync,
    TokenSigner: FromRef<S>,
{
    type Rejection = SylvaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let signer = TokenSigner::from_ref(state);
        authenticate(&parts.headers, &signer).map(Self)
    }
}
