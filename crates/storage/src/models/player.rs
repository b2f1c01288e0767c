use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub id: String,
    pub tenant_id: i64,
    pub display_name: String,
    pub is_disqualified: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
