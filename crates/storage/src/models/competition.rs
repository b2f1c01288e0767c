use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: String,
    pub tenant_id: i64,
    pub title: String,
    /// Unix seconds; `None` while the competition is ongoing.
    pub finished_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Competition {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// A first visit counts as in-period attendance unless it happened after the close.
    pub fn visited_in_period(&self, first_visit_at: i64) -> bool {
        match self.finished_at {
            Some(finished_at) => first_visit_at <= finished_at,
            None => true,
        }
    }
}
