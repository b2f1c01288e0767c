use axum::{Extension, Json, extract::State};
use storage::{
    dto::{billing::BillingReportList, common::SuccessResponse},
    models::Viewer,
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/organizer/billing",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Billing of every competition, newest first", body = SuccessResponse<BillingReportList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Organizer role required")
    ),
    tag = "organizer"
)]
pub async fn tenant_billing(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<SuccessResponse<BillingReportList>>, WebError> {
    let reports = services::tenant_billing(&state, &viewer).await?;

    Ok(Json(SuccessResponse::new(BillingReportList { reports })))
}
