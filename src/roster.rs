use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::profile::Sport;

const BUILTIN_ROSTERS: &str = include_str!("../data/rosters.json");

static BUILTIN: Lazy<Roster> = Lazy::new(|| match Roster::from_json(BUILTIN_ROSTERS) {
    Ok(roster) => roster,
    Err(err) => {
        tracing::error!(error = %err, "builtin roster asset failed to load");
        Roster::default()
    }
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterAthlete {
    #[serde(default)]
    pub sport: String,
    pub name: String,
    pub age: u8,
    pub position: String,
    pub image_url: String,
    #[serde(default)]
    pub awards: Vec<String>,
}

/// Sample athletes per sport, read-only.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    athletes: Vec<RosterAthlete>,
}

impl Roster {
    pub fn builtin() -> &'static Roster {
        &BUILTIN
    }

    pub fn load(path: &Path) -> Result<Roster> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read roster asset {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Roster> {
        let by_sport: BTreeMap<String, Vec<RosterAthlete>> =
            serde_json::from_str(raw).context("decode roster asset")?;
        let mut athletes = Vec::new();
        for (sport, list) in by_sport {
            let label = Sport::parse(&sport)
                .map(|s| s.label().to_string())
                .unwrap_or(sport);
            for mut athlete in list {
                athlete.sport = label.clone();
                athletes.push(athlete);
            }
        }
        Ok(Roster { athletes })
    }

    pub fn all(&self) -> &[RosterAthlete] {
        &self.athletes
    }

    pub fn athletes_for(&self, sport: &str) -> Vec<&RosterAthlete> {
        self.filter(Some(sport), None)
    }

    pub fn filter(&self, sport: Option<&str>, position: Option<&str>) -> Vec<&RosterAthlete> {
        self.athletes
            .iter()
            .filter(|a| sport.is_none_or(|s| same_sport(&a.sport, s)))
            .filter(|a| position.is_none_or(|p| a.position.eq_ignore_ascii_case(p.trim())))
            .collect()
    }

    /// Case-insensitive match on name, position or any award.
    pub fn search(&self, query: &str) -> Vec<&RosterAthlete> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.athletes.iter().collect();
        }
        self.athletes
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&needle)
                    || a.position.to_lowercase().contains(&needle)
                    || a.awards.iter().any(|w| w.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Scouting board order: most awards first, then younger, then name.
    pub fn ranked(&self, sport: Option<&str>) -> Vec<&RosterAthlete> {
        let mut out = self.filter(sport, None);
        out.sort_by(|a, b| {
            b.awards
                .len()
                .cmp(&a.awards.len())
                .then(a.age.cmp(&b.age))
                .then_with(|| a.name.cmp(&b.name))
        });
        out
    }

    pub fn sports(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for athlete in &self.athletes {
            if !out.iter().any(|s| s == &athlete.sport) {
                out.push(athlete.sport.clone());
            }
        }
        out
    }
}

fn same_sport(a: &str, b: &str) -> bool {
    match (Sport::parse(a), Sport::parse(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}
