use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::player::PlayerDetail;
use super::tenant::TenantDetail;
use crate::models::Role;

/// Who the caller is on the addressed tenant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResult {
    pub tenant: TenantDetail,
    pub me: Option<PlayerDetail>,
    pub role: Role,
    pub logged_in: bool,
}

impl MeResult {
    pub fn anonymous(tenant: TenantDetail) -> Self {
        Self {
            tenant,
            me: None,
            role: Role::None,
            logged_in: false,
        }
    }
}
