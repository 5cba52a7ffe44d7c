use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::persist::app_cache_dir;
use crate::user_profile::Role;

pub const DEFAULT_SPORT: &str = "Football";
pub const DEFAULT_POSITION: &str = "Forward";

const SIM_INTERVAL_DEFAULT_MS: u64 = 4_000;
const SIM_INTERVAL_MIN_MS: u64 = 3_000;
const SIM_INTERVAL_MAX_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimMode {
    Jitter,
    Replay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub role: Role,
    pub sport: String,
    pub position: String,
    pub sim_interval: Duration,
    pub sim_mode: SimMode,
    pub store: StoreKind,
    pub db_path: Option<PathBuf>,
    pub profiles_path: Option<PathBuf>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_photo: Option<String>,
}

impl Config {
    /// Loads `.env.local` / `.env` (if present) and reads the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let opt = |key: &str| {
            lookup(key).and_then(|val| {
                let trimmed = val.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let role = match opt("ATHLETE_ROLE").map(|v| v.to_lowercase()).as_deref() {
            Some("recruiter") => Role::Recruiter,
            _ => Role::Athlete,
        };
        let sim_interval_ms = opt("ATHLETE_SIM_INTERVAL_MS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(SIM_INTERVAL_DEFAULT_MS)
            .clamp(SIM_INTERVAL_MIN_MS, SIM_INTERVAL_MAX_MS);
        let sim_mode = match opt("ATHLETE_SIM_MODE").map(|v| v.to_lowercase()).as_deref() {
            Some("replay") => SimMode::Replay,
            _ => SimMode::Jitter,
        };
        let store = match opt("ATHLETE_STORE").map(|v| v.to_lowercase()).as_deref() {
            Some("sqlite") => StoreKind::Sqlite,
            _ => StoreKind::Memory,
        };

        Self {
            role,
            sport: opt("ATHLETE_SPORT").unwrap_or_else(|| DEFAULT_SPORT.to_string()),
            position: opt("ATHLETE_POSITION").unwrap_or_else(|| DEFAULT_POSITION.to_string()),
            sim_interval: Duration::from_millis(sim_interval_ms),
            sim_mode,
            store,
            db_path: opt("ATHLETE_DB_PATH").map(PathBuf::from),
            profiles_path: opt("ATHLETE_PROFILES_PATH").map(PathBuf::from),
            user_id: opt("ATHLETE_USER_ID"),
            user_name: opt("ATHLETE_USER_NAME"),
            user_email: opt("ATHLETE_USER_EMAIL"),
            user_photo: opt("ATHLETE_USER_PHOTO"),
        }
    }

    pub fn resolved_db_path(&self) -> Option<PathBuf> {
        self.db_path
            .clone()
            .or_else(|| app_cache_dir().map(|dir| dir.join("documents.sqlite")))
    }
}
