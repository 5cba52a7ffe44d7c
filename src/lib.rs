pub mod auth;
pub mod config;
pub mod contracts;
pub mod error;
pub mod insights;
pub mod logging;
pub mod meals;
pub mod notifications;
pub mod persist;
pub mod profile;
pub mod roster;
pub mod scouting;
pub mod simulator;
pub mod social;
pub mod state;
pub mod store;
pub mod user_profile;
