use crate::profile::{DevelopmentMetric, Priority, ProfileBundle};
use crate::simulator::MetricSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InsightLevel {
    Alert,
    Warning,
    Info,
    Positive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub level: InsightLevel,
    pub title: String,
    pub message: String,
}

impl Insight {
    fn new(level: InsightLevel, title: &str, message: String) -> Self {
        Self {
            level,
            title: title.to_string(),
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalsReading {
    pub heart_rate: f32,
    pub hydration: f32,
    pub fatigue: f32,
    pub sleep_quality: f32,
    pub soreness: f32,
    pub training_load: f32,
}

impl Default for VitalsReading {
    fn default() -> Self {
        Self {
            heart_rate: 72.0,
            hydration: 78.0,
            fatigue: 35.0,
            sleep_quality: 82.0,
            soreness: 20.0,
            training_load: 65.0,
        }
    }
}

impl VitalsReading {
    /// Fields missing from the snapshot keep their resting defaults.
    pub fn from_snapshot(snapshot: &MetricSnapshot) -> Self {
        let d = Self::default();
        Self {
            heart_rate: snapshot.get("Heart Rate").unwrap_or(d.heart_rate),
            hydration: snapshot.get("Hydration").unwrap_or(d.hydration),
            fatigue: snapshot.get("Fatigue").unwrap_or(d.fatigue),
            sleep_quality: snapshot.get("Sleep Quality").unwrap_or(d.sleep_quality),
            soreness: snapshot.get("Soreness").unwrap_or(d.soreness),
            training_load: snapshot.get("Training Load").unwrap_or(d.training_load),
        }
    }
}

pub fn vitals_insights(v: &VitalsReading) -> Vec<Insight> {
    let mut out = Vec::new();
    if v.hydration < 70.0 {
        out.push(Insight::new(
            InsightLevel::Warning,
            "Hydration",
            format!(
                "Hydration at {:.0}%. Drink 500ml of water with electrolytes in the next hour.",
                v.hydration
            ),
        ));
    }
    if v.fatigue > 50.0 {
        out.push(Insight::new(
            InsightLevel::Warning,
            "Fatigue",
            format!(
                "Fatigue at {:.0}%. Swap today's high-intensity block for technical work.",
                v.fatigue
            ),
        ));
    }
    if v.sleep_quality < 70.0 {
        out.push(Insight::new(
            InsightLevel::Info,
            "Sleep",
            format!(
                "Sleep quality {:.0}%. Aim for lights out 30 minutes earlier tonight.",
                v.sleep_quality
            ),
        ));
    }
    if v.heart_rate > 100.0 {
        out.push(Insight::new(
            InsightLevel::Alert,
            "Heart Rate",
            format!(
                "Resting heart rate {:.0} bpm is elevated. Check in with medical staff.",
                v.heart_rate
            ),
        ));
    }
    if v.soreness > 60.0 {
        out.push(Insight::new(
            InsightLevel::Warning,
            "Soreness",
            format!(
                "Soreness at {:.0}%. Add a recovery session before the next heavy day.",
                v.soreness
            ),
        ));
    }
    if v.training_load > 85.0 {
        out.push(Insight::new(
            InsightLevel::Warning,
            "Training Load",
            format!(
                "Training load {:.0}% is near your ceiling. Hold volume this week.",
                v.training_load
            ),
        ));
    }
    if out.is_empty() {
        out.push(Insight::new(
            InsightLevel::Positive,
            "Ready",
            "All vitals in range. Good day for a quality session.".to_string(),
        ));
    }
    out.sort_by_key(|i| i.level);
    out
}

pub fn bundle_insights(bundle: &ProfileBundle) -> Vec<Insight> {
    let mut out = Vec::new();
    for rec in bundle
        .recommendations
        .iter()
        .filter(|r| r.priority == Priority::High)
    {
        out.push(Insight::new(
            InsightLevel::Info,
            &rec.title,
            format!("{} (impact {})", rec.description, rec.impact_score),
        ));
    }
    for metric in &bundle.metrics {
        let progress = metric_progress(metric);
        if progress < 85.0 {
            out.push(Insight::new(
                InsightLevel::Warning,
                &metric.category,
                format!(
                    "Focus area: {:.0}% of target ({} / {}).",
                    progress, metric.current, metric.target
                ),
            ));
        }
    }
    out
}

/// current / target as a percentage, capped at 100.
pub fn metric_progress(metric: &DevelopmentMetric) -> f32 {
    if metric.target <= 0.0 {
        return 100.0;
    }
    (metric.current / metric.target * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InjuryRisk {
    pub score: u8,
    pub level: RiskLevel,
    pub factors: Vec<String>,
}

pub fn injury_risk(v: &VitalsReading) -> InjuryRisk {
    let dehydration = (100.0 - v.hydration).max(0.0);
    let sleep_debt = (100.0 - v.sleep_quality).max(0.0);
    let raw = v.fatigue * 0.35
        + v.soreness * 0.30
        + v.training_load * 0.15
        + dehydration * 0.10
        + sleep_debt * 0.10;
    let score = raw.clamp(0.0, 100.0).round() as u8;

    let mut factors = Vec::new();
    if v.fatigue > 50.0 {
        factors.push("High fatigue".to_string());
    }
    if v.soreness > 60.0 {
        factors.push("Muscle soreness".to_string());
    }
    if v.training_load > 85.0 {
        factors.push("Training load spike".to_string());
    }
    if v.hydration < 70.0 {
        factors.push("Dehydration".to_string());
    }
    if v.sleep_quality < 70.0 {
        factors.push("Poor sleep".to_string());
    }

    let level = if score < 35 {
        RiskLevel::Low
    } else if score < 65 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    };

    InjuryRisk {
        score,
        level,
        factors,
    }
}
