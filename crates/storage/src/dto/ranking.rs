use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::competition::CompetitionDetail;

/// Maximum number of ranks returned per page
pub const RANKING_PAGE_SIZE: usize = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RankingQuery {
    /// Number of leading ranks to skip
    pub rank_after: Option<i64>,
}

impl RankingQuery {
    pub fn validate(&self) -> Result<(), String> {
        match self.rank_after {
            Some(rank_after) if rank_after < 0 => Err("rank_after must be >= 0".to_string()),
            _ => Ok(()),
        }
    }

    pub fn rank_after(&self) -> usize {
        self.rank_after.unwrap_or(0).max(0) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompetitionRank {
    /// Position in the full ordering, 1-based
    pub rank: i64,
    pub score: i64,
    pub player_id: String,
    pub player_display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionRanking {
    pub competition: CompetitionDetail,
    pub ranks: Vec<CompetitionRank>,
}
