use axum::{Router, middleware, routing::get};

use super::handlers::{competition_ranking, player_profile};
use crate::middleware::auth::require_player;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/player/competition/:competition_id/ranking",
            get(competition_ranking),
        )
        .route("/player/player/:player_id", get(player_profile))
        .route_layer(middleware::from_fn_with_state(state, require_player))
}
