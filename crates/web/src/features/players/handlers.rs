use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use storage::{
    dto::{
        common::SuccessResponse,
        player::{AddPlayersRequest, PlayerDetail, PlayerList, PlayerResult},
    },
    models::Viewer,
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/organizer/players",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Players of the tenant, newest first", body = SuccessResponse<PlayerList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Organizer role required")
    ),
    tag = "organizer"
)]
pub async fn list_players(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<SuccessResponse<PlayerList>>, WebError> {
    let players = services::list_players(&state, &viewer).await?;

    Ok(Json(SuccessResponse::new(PlayerList {
        players: players.into_iter().map(PlayerDetail::from).collect(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/organizer/players/add",
    request_body = AddPlayersRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Players registered", body = SuccessResponse<PlayerList>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Organizer role required")
    ),
    tag = "organizer"
)]
pub async fn add_players(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    req: Result<Json<AddPlayersRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<PlayerList>>, WebError> {
    let Json(req) = req?;
    req.validate()?;

    let players = services::add_players(&state, &viewer, &req.display_names).await?;

    Ok(Json(SuccessResponse::new(PlayerList {
        players: players.into_iter().map(PlayerDetail::from).collect(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/organizer/player/{player_id}/disqualified",
    params(
        ("player_id" = String, Path, description = "Player id")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Player disqualified", body = SuccessResponse<PlayerResult>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Organizer role required"),
        (status = 404, description = "Player not found")
    ),
    tag = "organizer"
)]
pub async fn disqualify_player(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(player_id): Path<String>,
) -> Result<Json<SuccessResponse<PlayerResult>>, WebError> {
    let player = services::disqualify_player(&state, &viewer, &player_id).await?;

    Ok(Json(SuccessResponse::new(PlayerResult {
        player: player.into(),
    })))
}
