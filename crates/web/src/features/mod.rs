pub mod billing;
pub mod competitions;
pub mod me;
pub mod players;
pub mod ranking;
pub mod tenants;
