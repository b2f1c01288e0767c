pub mod billing;
pub mod competitions;
pub mod ingestion;
pub mod players;
pub mod provisioning;
pub mod ranking;
pub mod tenant_resolver;

pub use ingestion::IngestOutcome;
