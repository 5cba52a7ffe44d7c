use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::state::{AppState, Section};
use crate::user_profile::Role;

const CACHE_DIR: &str = "athlete_terminal";
const PREFS_FILE: &str = "prefs.json";
const PREFS_VERSION: u32 = 1;

/// Dashboard choices restored on the next launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    version: u32,
    pub role: Role,
    pub section: Section,
    pub sport: String,
    pub position: String,
}

impl Prefs {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            version: PREFS_VERSION,
            role: state.role,
            section: state.section,
            sport: state.sport.clone(),
            position: state.position.clone(),
        }
    }

    pub fn apply_to(&self, state: &mut AppState) {
        state.role = self.role;
        state.set_profile_key(&self.sport, &self.position);
        if Section::for_role(self.role).contains(&self.section) {
            state.section = self.section;
        } else {
            state.section = Section::for_role(self.role)[0];
        }
    }
}

pub fn load_prefs() -> Option<Prefs> {
    load_prefs_from(&prefs_path()?)
}

pub fn load_prefs_from(path: &Path) -> Option<Prefs> {
    let raw = fs::read_to_string(path).ok()?;
    let prefs = serde_json::from_str::<Prefs>(&raw).ok()?;
    if prefs.version != PREFS_VERSION {
        return None;
    }
    Some(prefs)
}

pub fn save_prefs(prefs: &Prefs) -> Result<()> {
    let Some(path) = prefs_path() else {
        return Ok(());
    };
    save_prefs_to(&path, prefs)
}

pub fn save_prefs_to(path: &Path, prefs: &Prefs) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("create prefs dir {}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(prefs).context("serialize prefs")?;
    fs::write(&tmp, json).context("write prefs")?;
    fs::rename(&tmp, path).context("swap prefs")?;
    Ok(())
}

fn prefs_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(PREFS_FILE))
}

pub fn app_cache_dir() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR));
        }
    }
    // Fallback to ~/.cache on linux-like systems.
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}
