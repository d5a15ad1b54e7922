use axum::{Json, extract::State};
use tracing::{debug, info};

use crate::db::{Enquiry, NewEnquiry};
use crate::middleware::RequireOwner;
use crate::{SylvaError, router::SylvaState};

/// POST /api/enquiries -> stores the enquiry as submitted, no auth.
pub async fn submit_enquiry(
    State(state): State<SylvaState>,
    Json(enquiry): Json<NewEnquiry>,
) -> Result<&'static str, SylvaError> {
    let stored = state.storage.insert_enquiry(enquiry).await?;
    info!(id = stored.id, "enquiry stored");
    Ok("Enquiry submitted")
}

/// GET /api/enquiries -> every stored enquiry, newest first. Owner only.
pub async fn list_enquiries(
    State(state): State<SylvaState>,
    RequireOwner(claims): RequireOwner,
) -> Result<Json<Vec<Enquiry>>, SylvaError> {
    let enquiries = state.storage.list_enquiries().await?;
    debug!(username = %claims.username, count = enquiries.len(), "listing enquiries");
    Ok(Json(enquiries))
}
