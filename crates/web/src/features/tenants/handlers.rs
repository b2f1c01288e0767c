use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use storage::dto::{
    common::SuccessResponse,
    tenant::{CreateTenantRequest, TenantBillingList, TenantResult, TenantsBillingQuery},
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/tenants/add",
    request_body = CreateTenantRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Tenant created and provisioned", body = SuccessResponse<TenantResult>),
        (status = 400, description = "Invalid or duplicate tenant name"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Admin API is not served on this host")
    ),
    tag = "admin"
)]
pub async fn add_tenant(
    State(state): State<AppState>,
    req: Result<Json<CreateTenantRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<TenantResult>>, WebError> {
    let Json(req) = req?;
    req.validate()?;

    let tenant = services::create_tenant(&state, &req).await?;

    Ok(Json(SuccessResponse::new(TenantResult { tenant })))
}

#[utoipa::path(
    get,
    path = "/api/admin/tenants/billing",
    params(TenantsBillingQuery),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Tenants by id descending, 10 per page", body = SuccessResponse<TenantBillingList>),
        (status = 400, description = "Invalid cursor"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Admin API is not served on this host")
    ),
    tag = "admin"
)]
pub async fn tenants_billing(
    State(state): State<AppState>,
    query: Result<Query<TenantsBillingQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse<TenantBillingList>>, WebError> {
    let Query(query) = query?;
    query.validate().map_err(WebError::BadRequest)?;

    let tenants = services::tenants_billing(&state, query.cursor()).await?;

    Ok(Json(SuccessResponse::new(TenantBillingList { tenants })))
}
