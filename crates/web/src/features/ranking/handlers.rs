use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use storage::{
    dto::{
        common::SuccessResponse,
        player::PlayerProfile,
        ranking::{CompetitionRanking, RankingQuery},
    },
    models::Viewer,
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/player/competition/{competition_id}/ranking",
    params(
        ("competition_id" = String, Path, description = "Competition id"),
        RankingQuery
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Up to 100 ranks after `rank_after`", body = SuccessResponse<CompetitionRanking>),
        (status = 400, description = "Invalid rank_after"),
        (status = 401, description = "Unauthorized or unregistered player"),
        (status = 403, description = "Player role required or player disqualified"),
        (status = 404, description = "Competition not found")
    ),
    tag = "player"
)]
pub async fn competition_ranking(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(competition_id): Path<String>,
    query: Result<Query<RankingQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse<CompetitionRanking>>, WebError> {
    let Query(query) = query?;
    query.validate().map_err(WebError::BadRequest)?;

    let ranking =
        services::competition_ranking(&state, &viewer, &competition_id, query.rank_after())
            .await?;

    Ok(Json(SuccessResponse::new(ranking)))
}

#[utoipa::path(
    get,
    path = "/api/player/player/{player_id}",
    params(
        ("player_id" = String, Path, description = "Player id")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Player with the latest score of each competition", body = SuccessResponse<PlayerProfile>),
        (status = 401, description = "Unauthorized or unregistered player"),
        (status = 403, description = "Player role required or player disqualified"),
        (status = 404, description = "Player not found")
    ),
    tag = "player"
)]
pub async fn player_profile(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(player_id): Path<String>,
) -> Result<Json<SuccessResponse<PlayerProfile>>, WebError> {
    let profile = services::player_profile(&state, &viewer, &player_id).await?;

    Ok(Json(SuccessResponse::new(profile)))
}
