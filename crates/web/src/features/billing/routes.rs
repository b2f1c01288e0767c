use axum::{Router, middleware, routing::get};

use super::handlers::tenant_billing;
use crate::middleware::auth::require_organizer;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/organizer/billing", get(tenant_billing))
        .route_layer(middleware::from_fn_with_state(state, require_organizer))
}
