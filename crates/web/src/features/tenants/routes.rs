use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{add_tenant, tenants_billing};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/tenants/add", post(add_tenant))
        .route("/admin/tenants/billing", get(tenants_billing))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
