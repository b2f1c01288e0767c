use axum::{
    Extension, Json,
    extract::{
        Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
};
use storage::{
    dto::{
        common::SuccessResponse,
        competition::{
            CompetitionDetail, CompetitionList, CompetitionResult, CreateCompetitionRequest,
            ScoreUploadResult,
        },
    },
    models::Viewer,
    services::IngestOutcome,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

/// Multipart field carrying the score sheet
const SCORES_FIELD: &str = "scores";

/// Upload form of the score endpoint, documentation only
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ScoreSheetForm {
    /// CSV with a `player_id,score` header
    #[schema(value_type = String, format = Binary)]
    scores: Vec<u8>,
}

#[utoipa::path(
    get,
    path = "/api/organizer/competitions",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Competitions of the tenant, newest first", body = SuccessResponse<CompetitionList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Organizer role required")
    ),
    tag = "organizer"
)]
pub async fn list_competitions(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<SuccessResponse<CompetitionList>>, WebError> {
    let competitions = services::list_competitions(&state, &viewer).await?;

    Ok(Json(SuccessResponse::new(CompetitionList {
        competitions: competitions
            .into_iter()
            .map(CompetitionDetail::from)
            .collect(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/player/competitions",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Competitions of the tenant, newest first", body = SuccessResponse<CompetitionList>),
        (status = 401, description = "Unauthorized or unregistered player"),
        (status = 403, description = "Player role required or player disqualified")
    ),
    tag = "player"
)]
pub async fn list_player_competitions(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<SuccessResponse<CompetitionList>>, WebError> {
    let competitions = services::list_competitions_for_player(&state, &viewer).await?;

    Ok(Json(SuccessResponse::new(CompetitionList {
        competitions: competitions
            .into_iter()
            .map(CompetitionDetail::from)
            .collect(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/organizer/competitions/add",
    request_body = CreateCompetitionRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Competition created", body = SuccessResponse<CompetitionResult>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Organizer role required")
    ),
    tag = "organizer"
)]
pub async fn add_competition(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    req: Result<Json<CreateCompetitionRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<CompetitionResult>>, WebError> {
    let Json(req) = req?;
    req.validate()?;

    let competition = services::create_competition(&state, &viewer, &req.title).await?;

    Ok(Json(SuccessResponse::new(CompetitionResult {
        competition: competition.into(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/organizer/competition/{competition_id}/finish",
    params(
        ("competition_id" = String, Path, description = "Competition id")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Competition finished", body = SuccessResponse<CompetitionResult>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Organizer role required"),
        (status = 404, description = "Competition not found")
    ),
    tag = "organizer"
)]
pub async fn finish_competition(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(competition_id): Path<String>,
) -> Result<Json<SuccessResponse<CompetitionResult>>, WebError> {
    let competition = services::finish_competition(&state, &viewer, &competition_id).await?;

    Ok(Json(SuccessResponse::new(CompetitionResult {
        competition: competition.into(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/organizer/competition/{competition_id}/score",
    params(
        ("competition_id" = String, Path, description = "Competition id")
    ),
    request_body(content = ScoreSheetForm, content_type = "multipart/form-data"),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Score generation replaced", body = SuccessResponse<ScoreUploadResult>),
        (status = 400, description = "Invalid sheet, unknown player or competition finished"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Organizer role required"),
        (status = 404, description = "Competition not found")
    ),
    tag = "organizer"
)]
pub async fn upload_scores(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(competition_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SuccessResponse<ScoreUploadResult>>, WebError> {
    let mut multipart = multipart?;
    let mut sheet = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(SCORES_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| WebError::BadRequest(e.to_string()))?;
            sheet = Some(bytes);
            break;
        }
    }
    let sheet = sheet.ok_or_else(|| WebError::BadRequest("scores file required".to_string()))?;

    match services::ingest_scores(&state, &viewer, &competition_id, &sheet).await? {
        IngestOutcome::Ingested { rows } => {
            Ok(Json(SuccessResponse::new(ScoreUploadResult { rows })))
        }
        IngestOutcome::CompetitionFinished => {
            Err(WebError::BadRequest("competition is finished".to_string()))
        }
    }
}
