pub mod billing;
pub mod common;
pub mod competition;
pub mod me;
pub mod player;
pub mod ranking;
pub mod tenant;
