use sqlx::FromRow;

/// First visit of a player to a competition ranking.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VisitSummary {
    pub player_id: String,
    pub min_created_at: i64,
}
