pub mod competition;
pub mod player;
pub mod player_score;
pub mod tenant;
pub mod visit_history;

/// Stays under SQLite's host-parameter limit on older builds.
const MAX_BINDS_PER_STATEMENT: usize = 900;

pub use competition::CompetitionRepository;
pub use player::PlayerRepository;
pub use player_score::{PlayerScoreRepository, ScoreEntry};
pub use tenant::TenantRepository;
pub use visit_history::VisitHistoryRepository;
