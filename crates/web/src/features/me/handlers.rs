use axum::{Json, extract::State, http::HeaderMap};
use storage::dto::{common::SuccessResponse, me::MeResult};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Tenant and caller identity", body = SuccessResponse<MeResult>),
        (status = 404, description = "Tenant not found")
    ),
    tag = "me"
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse<MeResult>>, WebError> {
    let result = services::me(&state, &headers).await?;

    Ok(Json(SuccessResponse::new(result)))
}
