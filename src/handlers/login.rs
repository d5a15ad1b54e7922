use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{SylvaError, router::SylvaState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login -> `{token}` for a matching account.
pub async fn login(
    State(state): State<SylvaState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, SylvaError> {
    let token = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(LoginResponse { token }))
}
