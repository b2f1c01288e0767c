use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A customer organization registered in the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Tenant {
    /// Reserved name of the platform operator pseudo-tenant.
    pub const ADMIN_NAME: &'static str = "admin";

    /// The operator tenant is never persisted and always has id 0.
    pub fn admin() -> Self {
        Self {
            id: 0,
            name: Self::ADMIN_NAME.to_string(),
            display_name: Self::ADMIN_NAME.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.name == Self::ADMIN_NAME
    }
}
