use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for successful API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse<T> {
    pub status: bool,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { status: true, data }
    }
}
