mod competition;
mod player;
mod player_score;
mod tenant;
mod viewer;
mod visit_history;

pub use competition::Competition;
pub use player::Player;
pub use player_score::PlayerScore;
pub use tenant::Tenant;
pub use viewer::{Role, Viewer};
pub use visit_history::VisitSummary;
