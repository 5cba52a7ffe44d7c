use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

const BUILTIN_PROFILES: &str = include_str!("../data/sport_profiles.json");
const DAYS_PER_PLAN: usize = 7;

static BUILTIN: Lazy<ProfileTable> = Lazy::new(|| match ProfileTable::from_json(BUILTIN_PROFILES) {
    Ok(table) => table,
    Err(err) => {
        tracing::error!(error = %err, "builtin sport profile asset failed to load");
        ProfileTable::default()
    }
});

static ACTIVE: OnceCell<ProfileTable> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sport {
    Football,
    Basketball,
    #[serde(rename = "American Football")]
    AmericanFootball,
    Baseball,
    Hockey,
    Tennis,
    Cricket,
    Rugby,
    Volleyball,
    Athletics,
}

impl Sport {
    pub const ALL: [Sport; 10] = [
        Sport::Football,
        Sport::Basketball,
        Sport::AmericanFootball,
        Sport::Baseball,
        Sport::Hockey,
        Sport::Tennis,
        Sport::Cricket,
        Sport::Rugby,
        Sport::Volleyball,
        Sport::Athletics,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Sport::Football => "Football",
            Sport::Basketball => "Basketball",
            Sport::AmericanFootball => "American Football",
            Sport::Baseball => "Baseball",
            Sport::Hockey => "Hockey",
            Sport::Tennis => "Tennis",
            Sport::Cricket => "Cricket",
            Sport::Rugby => "Rugby",
            Sport::Volleyball => "Volleyball",
            Sport::Athletics => "Athletics",
        }
    }

    /// Lenient lookup: case, spacing and a few common aliases are ignored.
    /// Unknown names are `None`, never an error.
    pub fn parse(raw: &str) -> Option<Sport> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let sport = match key.as_str() {
            "football" | "soccer" => Sport::Football,
            "basketball" => Sport::Basketball,
            "americanfootball" | "nfl" | "gridiron" => Sport::AmericanFootball,
            "baseball" => Sport::Baseball,
            "hockey" | "icehockey" => Sport::Hockey,
            "tennis" => Sport::Tennis,
            "cricket" => Sport::Cricket,
            "rugby" | "rugbyunion" => Sport::Rugby,
            "volleyball" => Sport::Volleyball,
            "athletics" | "trackandfield" | "track" => Sport::Athletics,
            _ => return None,
        };
        Some(sport)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentMetric {
    pub category: String,
    pub current: f32,
    pub target: f32,
    pub improvement_rate: f32,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub impact_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInsight {
    pub metric: String,
    pub value: String,
    pub change: f32,
    pub trend: Trend,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMealPlan {
    pub day: String,
    pub meals: [String; 3],
    pub total_calories: u32,
}

impl DayMealPlan {
    /// Sum of the per-meal kcal annotations and the number of meals that had none.
    pub fn annotated_calories(&self) -> (u32, usize) {
        let mut sum = 0;
        let mut missing = 0;
        for meal in &self.meals {
            match meal_calories(meal) {
                Some(kcal) => sum += kcal,
                None => missing += 1,
            }
        }
        (sum, missing)
    }
}

pub type WeeklyMealPlan = Vec<DayMealPlan>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPlan {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub duration: String,
    pub benefits: Vec<String>,
}

/// Everything the dashboard shows for one sport/position pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileBundle {
    pub metrics: Vec<DevelopmentMetric>,
    pub recommendations: Vec<TrainingRecommendation>,
    pub insights: Vec<PerformanceInsight>,
    pub meal_plan: WeeklyMealPlan,
    pub recovery: Vec<RecoveryPlan>,
}

impl ProfileBundle {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
            && self.recommendations.is_empty()
            && self.insights.is_empty()
            && self.meal_plan.is_empty()
            && self.recovery.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalorieDiscrepancy {
    pub plan: String,
    pub day: String,
    pub declared: u32,
    pub summed: u32,
    pub unannotated: usize,
}

impl CalorieDiscrepancy {
    pub fn difference(&self) -> i64 {
        self.declared as i64 - self.summed as i64
    }
}

#[derive(Debug, Deserialize)]
struct ProfileAsset {
    #[serde(default)]
    meal_plans: HashMap<String, WeeklyMealPlan>,
    #[serde(default)]
    recovery_plans: HashMap<String, Vec<RecoveryPlan>>,
    profiles: Vec<ProfileEntry>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    sport: String,
    position: String,
    #[serde(default)]
    metrics: Vec<DevelopmentMetric>,
    #[serde(default)]
    recommendations: Vec<TrainingRecommendation>,
    #[serde(default)]
    insights: Vec<PerformanceInsight>,
    meal_plan: String,
    recovery_plan: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct ProfileKey {
    sport: Sport,
    position: String,
}

impl ProfileKey {
    fn new(sport: Sport, position: &str) -> Self {
        Self {
            sport,
            position: normalize_position(position),
        }
    }
}

/// Keyed (sport, position) -> bundle table, populated from a declarative asset.
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    bundles: HashMap<ProfileKey, ProfileBundle>,
    positions: BTreeMap<Sport, Vec<String>>,
    meal_plans: BTreeMap<String, WeeklyMealPlan>,
}

impl ProfileTable {
    pub fn builtin() -> &'static ProfileTable {
        &BUILTIN
    }

    /// Table installed at startup (e.g. from an on-disk override), else the builtin one.
    pub fn active() -> &'static ProfileTable {
        ACTIVE.get().unwrap_or_else(|| &*BUILTIN)
    }

    /// Installs the process-wide table. Only the first call wins.
    pub fn install(table: ProfileTable) -> bool {
        ACTIVE.set(table).is_ok()
    }

    pub fn load(path: &Path) -> Result<ProfileTable> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read profile asset {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parse profile asset {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<ProfileTable> {
        let asset: ProfileAsset = serde_json::from_str(raw).context("decode profile asset")?;

        for (name, plan) in &asset.meal_plans {
            if plan.len() != DAYS_PER_PLAN {
                bail!(
                    "meal plan {name} has {} days, expected {DAYS_PER_PLAN}",
                    plan.len()
                );
            }
        }

        let mut table = ProfileTable {
            meal_plans: asset.meal_plans.clone().into_iter().collect(),
            ..ProfileTable::default()
        };

        for entry in asset.profiles {
            let sport = Sport::parse(&entry.sport)
                .ok_or_else(|| anyhow!("unknown sport {:?} in profile asset", entry.sport))?;
            let meal_plan = asset
                .meal_plans
                .get(&entry.meal_plan)
                .ok_or_else(|| {
                    anyhow!(
                        "{sport}/{}: unknown meal plan {:?}",
                        entry.position,
                        entry.meal_plan
                    )
                })?
                .clone();
            let recovery = asset
                .recovery_plans
                .get(&entry.recovery_plan)
                .ok_or_else(|| {
                    anyhow!(
                        "{sport}/{}: unknown recovery plan {:?}",
                        entry.position,
                        entry.recovery_plan
                    )
                })?
                .clone();

            let key = ProfileKey::new(sport, &entry.position);
            if table.bundles.contains_key(&key) {
                bail!("duplicate profile {sport}/{}", entry.position);
            }
            table.bundles.insert(
                key,
                ProfileBundle {
                    metrics: entry.metrics,
                    recommendations: entry.recommendations,
                    insights: entry.insights,
                    meal_plan,
                    recovery,
                },
            );
            table
                .positions
                .entry(sport)
                .or_default()
                .push(entry.position.trim().to_string());
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Explicit form of the lookup: unmatched pairs are `NotFound`.
    pub fn try_resolve(&self, sport: &str, position: &str) -> DashResult<&ProfileBundle> {
        Sport::parse(sport)
            .and_then(|sport| self.bundles.get(&ProfileKey::new(sport, position)))
            .ok_or_else(|| DashError::not_found(format!("profile {}/{}", sport.trim(), position.trim())))
    }

    /// Unmatched pairs (unknown sport or position) yield an empty bundle.
    pub fn resolve(&self, sport: &str, position: &str) -> ProfileBundle {
        self.try_resolve(sport, position)
            .cloned()
            .unwrap_or_default()
    }

    pub fn sports(&self) -> Vec<Sport> {
        self.positions.keys().copied().collect()
    }

    pub fn positions_for(&self, sport: &str) -> &[String] {
        Sport::parse(sport)
            .and_then(|sport| self.positions.get(&sport))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every (sport, position) pair in asset order per sport.
    pub fn pairs(&self) -> Vec<(Sport, String)> {
        self.positions
            .iter()
            .flat_map(|(sport, positions)| positions.iter().map(|p| (*sport, p.clone())))
            .collect()
    }

    /// Days whose declared total disagrees with the per-meal annotations by
    /// more than `tolerance` kcal. Reported as authored; nothing is corrected.
    pub fn calorie_discrepancies(&self, tolerance: u32) -> Vec<CalorieDiscrepancy> {
        self.meal_plans
            .iter()
            .flat_map(|(name, plan)| audit_meal_plan(name, plan, tolerance))
            .collect()
    }
}

pub fn resolve(sport: &str, position: &str) -> ProfileBundle {
    ProfileTable::active().resolve(sport, position)
}

pub fn audit_meal_plan(name: &str, plan: &[DayMealPlan], tolerance: u32) -> Vec<CalorieDiscrepancy> {
    plan.iter()
        .filter_map(|day| {
            let (summed, unannotated) = day.annotated_calories();
            let off = (day.total_calories as i64 - summed as i64).unsigned_abs();
            if unannotated > 0 || off > tolerance as u64 {
                Some(CalorieDiscrepancy {
                    plan: name.to_string(),
                    day: day.day.clone(),
                    declared: day.total_calories,
                    summed,
                    unannotated,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Reads the trailing `(NNN kcal)` annotation of a meal line.
pub fn meal_calories(meal: &str) -> Option<u32> {
    let trimmed = meal.trim_end();
    let open = trimmed.rfind('(')?;
    let inner = trimmed[open + 1..].strip_suffix(')')?;
    let digits = inner.trim().strip_suffix("kcal")?.trim();
    digits.parse().ok()
}

fn normalize_position(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
