use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::Player;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlayerDetail {
    pub id: String,
    pub display_name: String,
    pub is_disqualified: bool,
}

impl From<Player> for PlayerDetail {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            display_name: player.display_name,
            is_disqualified: player.is_disqualified,
        }
    }
}

/// A player's authoritative score in one competition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlayerScoreDetail {
    pub competition_title: String,
    pub score: i64,
}

/// Player profile with the latest score of every competition they scored in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerProfile {
    pub player: PlayerDetail,
    pub scores: Vec<PlayerScoreDetail>,
}

/// Request payload for registering players in bulk
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddPlayersRequest {
    #[validate(
        length(min = 1, message = "At least one display name is required"),
        custom(function = "validate_display_names")
    )]
    pub display_names: Vec<String>,
}

fn validate_display_names(names: &[String]) -> Result<(), ValidationError> {
    if names.iter().any(|name| name.is_empty() || name.len() > 255) {
        let mut err = ValidationError::new("invalid_display_name");
        err.message = Some("Display names must be between 1 and 255 characters".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerList {
    pub players: Vec<PlayerDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerResult {
    pub player: PlayerDetail,
}
