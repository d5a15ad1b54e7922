use axum::{
    Router,
    extract::FromRef,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::post,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::SylvaStorage;
use crate::handlers::{enquiries, login};
use crate::service::auth::AuthService;
use crate::service::tokens::TokenSigner;

/// Shared handler state: the storage pool and the auth service (which owns the signing key).
#[derive(Clone)]
pub struct SylvaState {
    pub storage: SylvaStorage,
    pub auth: AuthService,
}

impl SylvaState {
    pub fn new(storage: SylvaStorage, tokens: TokenSigner) -> Self {
        let auth = AuthService::new(storage.clone(), tokens);
        Self { storage, auth }
    }
}

impl FromRef<SylvaState> for TokenSigner {
    fn from_ref(state: &SylvaState) -> Self {
        state.auth.tokens().clone()
    }
}

/// Build the API router. `allowed_origin` enables CORS for that single caller.
pub fn sylva_router(state: SylvaState, allowed_origin: Option<HeaderValue>) -> Router {
    let router = Router::new()
        .route(
            "/api/enquiries",
            post(enquiries::submit_enquiry).get(enquiries::list_enquiries),
        )
        .route("/api/login", post(login::login))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match allowed_origin {
        Some(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE]),
        ),
        None => router,
    }
}
