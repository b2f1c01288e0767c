use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{add_players, disqualify_player, list_players};
use crate::middleware::auth::require_organizer;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/organizer/players", get(list_players))
        .route("/organizer/players/add", post(add_players))
        .route(
            "/organizer/player/:player_id/disqualified",
            post(disqualify_player),
        )
        .route_layer(middleware::from_fn_with_state(state, require_organizer))
}
