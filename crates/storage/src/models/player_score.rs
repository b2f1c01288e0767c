use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One row of the current score generation of a competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlayerScore {
    pub id: String,
    pub tenant_id: i64,
    pub player_id: String,
    pub competition_id: String,
    pub score: i64,
    /// 1-based position within the uploaded sheet.
    pub row_num: i64,
    pub created_at: i64,
    pub updated_at: i64,
}
