use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::Tenant;

/// Request payload for registering a new tenant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTenantRequest {
    #[validate(custom(function = "validate_tenant_name"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Display name must be between 1 and 255 characters"
    ))]
    pub display_name: String,
}

/// Tenant summary with its accumulated billing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantWithBilling {
    pub id: String,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "billing")]
    pub billing_yen: i64,
}

impl TenantWithBilling {
    pub fn new(tenant: Tenant, billing_yen: i64) -> Self {
        Self {
            id: tenant.id.to_string(),
            name: tenant.name,
            display_name: tenant.display_name,
            billing_yen,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantDetail {
    pub name: String,
    pub display_name: String,
}

impl From<Tenant> for TenantDetail {
    fn from(tenant: Tenant) -> Self {
        Self {
            name: tenant.name,
            display_name: tenant.display_name,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TenantsBillingQuery {
    /// Only tenants with an id lower than this cursor
    pub before: Option<i64>,
}

impl TenantsBillingQuery {
    pub fn validate(&self) -> Result<(), String> {
        match self.before {
            Some(before) if before < 0 => Err("before must be >= 0".to_string()),
            _ => Ok(()),
        }
    }

    /// `before=0` means no cursor.
    pub fn cursor(&self) -> Option<i64> {
        self.before.filter(|before| *before > 0)
    }
}

/// DNS-label-like: lowercase letter first, lowercase letters, digits and hyphens
/// inside, no trailing hyphen, 2 to 63 characters.
pub fn is_valid_tenant_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if !(2..=63).contains(&bytes.len()) {
        return false;
    }

    let first = bytes[0];
    let last = bytes[bytes.len() - 1];

    first.is_ascii_lowercase()
        && (last.is_ascii_lowercase() || last.is_ascii_digit())
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

fn validate_tenant_name(name: &str) -> Result<(), validator::ValidationError> {
    if is_valid_tenant_name(name) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_tenant_name"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantResult {
    pub tenant: TenantWithBilling,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantBillingList {
    pub tenants: Vec<TenantWithBilling>,
}
