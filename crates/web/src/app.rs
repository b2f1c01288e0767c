use axum::{
    Json, Router,
    http::{HeaderValue, header},
    routing::get,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::features::{billing, competitions, me, players, ranking, tenants};
use crate::middleware::auth::SESSION_COOKIE;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        tenants::handlers::add_tenant,
        tenants::handlers::tenants_billing,
        players::handlers::list_players,
        players::handlers::add_players,
        players::handlers::disqualify_player,
        competitions::handlers::list_competitions,
        competitions::handlers::list_player_competitions,
        competitions::handlers::add_competition,
        competitions::handlers::finish_competition,
        competitions::handlers::upload_scores,
        billing::handlers::tenant_billing,
        ranking::handlers::competition_ranking,
        ranking::handlers::player_profile,
        me::handlers::me,
    ),
    components(
        schemas(
            storage::dto::tenant::CreateTenantRequest,
            storage::dto::tenant::TenantWithBilling,
            storage::dto::tenant::TenantDetail,
            storage::dto::tenant::TenantResult,
            storage::dto::tenant::TenantBillingList,
            storage::dto::player::AddPlayersRequest,
            storage::dto::player::PlayerDetail,
            storage::dto::player::PlayerList,
            storage::dto::player::PlayerResult,
            storage::dto::player::PlayerScoreDetail,
            storage::dto::player::PlayerProfile,
            storage::dto::competition::CreateCompetitionRequest,
            storage::dto::competition::CompetitionDetail,
            storage::dto::competition::CompetitionList,
            storage::dto::competition::CompetitionResult,
            storage::dto::competition::ScoreUploadResult,
            storage::dto::billing::BillingReport,
            storage::dto::billing::BillingReportList,
            storage::dto::ranking::CompetitionRank,
            storage::dto::ranking::CompetitionRanking,
            storage::dto::me::MeResult,
            storage::models::Role,
        )
    ),
    tags(
        (name = "admin", description = "Platform operator endpoints"),
        (name = "organizer", description = "Tenant organizer endpoints"),
        (name = "player", description = "Player endpoints"),
        (name = "me", description = "Caller identity"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::new(SESSION_COOKIE),
                    ),
                ),
            )
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(tenants::routes::routes(state.clone()))
        .merge(players::routes::routes(state.clone()))
        .merge(competitions::routes::routes(state.clone()))
        .merge(billing::routes::routes(state.clone()))
        .merge(ranking::routes::routes(state.clone()))
        .route("/me", get(me::handlers::me));

    Router::new()
        .nest("/api", api)
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("private"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
