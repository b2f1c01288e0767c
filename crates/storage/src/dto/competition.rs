use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Competition;

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompetitionDetail {
    pub id: String,
    pub title: String,
    pub is_finished: bool,
}

impl From<Competition> for CompetitionDetail {
    fn from(comp: Competition) -> Self {
        Self {
            is_finished: comp.is_finished(),
            id: comp.id,
            title: comp.title,
        }
    }
}

/// Result of a score sheet upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreUploadResult {
    pub rows: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionList {
    pub competitions: Vec<CompetitionDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResult {
    pub competition: CompetitionDetail,
}
