use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    add_competition, finish_competition, list_competitions, list_player_competitions,
    upload_scores,
};
use crate::middleware::auth::{require_organizer, require_player};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let organizer = Router::new()
        .route("/organizer/competitions", get(list_competitions))
        .route("/organizer/competitions/add", post(add_competition))
        .route(
            "/organizer/competition/:competition_id/finish",
            post(finish_competition),
        )
        .route(
            "/organizer/competition/:competition_id/score",
            post(upload_scores),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_organizer,
        ));

    let player = Router::new()
        .route("/player/competitions", get(list_player_competitions))
        .route_layer(middleware::from_fn_with_state(state, require_player));

    organizer.merge(player)
}
