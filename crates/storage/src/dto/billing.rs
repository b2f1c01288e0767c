use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Yen charged per player with a score in a finished competition
pub const PLAYER_RATE_YEN: i64 = 100;
/// Yen charged per player who only viewed the ranking
pub const VISITOR_RATE_YEN: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BillingReport {
    pub competition_id: String,
    pub competition_title: String,
    /// Players with a score in the current generation
    pub player_count: i64,
    /// Players who viewed the ranking during the competition without scoring
    pub visitor_count: i64,
    pub billing_player_yen: i64,
    pub billing_visitor_yen: i64,
    pub billing_yen: i64,
}

impl BillingReport {
    pub fn new(
        competition_id: String,
        competition_title: String,
        player_count: i64,
        visitor_count: i64,
    ) -> Self {
        let billing_player_yen = PLAYER_RATE_YEN * player_count;
        let billing_visitor_yen = VISITOR_RATE_YEN * visitor_count;
        Self {
            competition_id,
            competition_title,
            player_count,
            visitor_count,
            billing_player_yen,
            billing_visitor_yen,
            billing_yen: billing_player_yen + billing_visitor_yen,
        }
    }
}

/// Billing of every competition of one tenant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BillingReportList {
    pub reports: Vec<BillingReport>,
}
