use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};
use crate::profile::Sport;
use crate::store::{Document, DocumentStore, Filter, to_document_data};

pub const MEALS_COLLECTION: &str = "meals";
pub const ADD_MEAL_FAILED: &str = "Failed to add meal";
pub const MAX_MEAL_CALORIES: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeal {
    pub user_id: String,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub name: String,
    pub calories: u32,
    #[serde(default)]
    pub protein: f32,
    #[serde(default)]
    pub carbs: f32,
    #[serde(default)]
    pub fats: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealEntry {
    pub id: String,
    pub meal: NewMeal,
}

impl MealEntry {
    fn from_document(doc: &Document) -> DashResult<Self> {
        Ok(Self {
            id: doc.id.clone(),
            meal: doc.decode()?,
        })
    }
}

pub fn add_meal(store: &mut dyn DocumentStore, meal: NewMeal) -> DashResult<MealEntry> {
    if meal.name.trim().is_empty() {
        return Err(DashError::invalid("meal name is empty"));
    }
    if meal.calories == 0 {
        return Err(DashError::invalid("meal has no calories"));
    }
    if meal.calories > MAX_MEAL_CALORIES {
        return Err(DashError::invalid(format!(
            "meal exceeds {MAX_MEAL_CALORIES} kcal"
        )));
    }
    if [meal.protein, meal.carbs, meal.fats]
        .iter()
        .any(|g| !g.is_finite() || *g < 0.0)
    {
        return Err(DashError::invalid("macros must be non-negative"));
    }
    let id = store.add_document(MEALS_COLLECTION, to_document_data(&meal)?)?;
    tracing::debug!(meal_id = %id, user_id = %meal.user_id, "meal added");
    Ok(MealEntry { id, meal })
}

/// Meals for one user on one date, ordered breakfast..snack then by insertion.
pub fn list_meals(
    store: &dyn DocumentStore,
    user_id: &str,
    date: NaiveDate,
) -> DashResult<Vec<MealEntry>> {
    let filters = [
        Filter::eq("user_id", user_id),
        Filter::eq("date", date_key(date)),
    ];
    let mut out = store
        .query_documents(MEALS_COLLECTION, &filters)?
        .iter()
        .map(MealEntry::from_document)
        .collect::<DashResult<Vec<_>>>()?;
    out.sort_by_key(|entry| entry.meal.meal_type);
    Ok(out)
}

pub fn remove_meal(store: &mut dyn DocumentStore, id: &str) -> DashResult<()> {
    store.delete_document(MEALS_COLLECTION, id)
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroTotals {
    pub calories: u32,
    pub protein: f32,
    pub carbs: f32,
    pub fats: f32,
}

pub fn daily_totals(meals: &[MealEntry]) -> MacroTotals {
    meals.iter().fold(MacroTotals::default(), |acc, entry| MacroTotals {
        calories: acc.calories.saturating_add(entry.meal.calories),
        protein: acc.protein + entry.meal.protein,
        carbs: acc.carbs + entry.meal.carbs,
        fats: acc.fats + entry.meal.fats,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionTargets {
    pub calories: u32,
    pub protein: f32,
    pub carbs: f32,
    pub fats: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroProgress {
    pub calories: f32,
    pub protein: f32,
    pub carbs: f32,
    pub fats: f32,
}

impl NutritionTargets {
    pub fn for_sport(sport: Option<Sport>) -> Self {
        match sport {
            Some(Sport::AmericanFootball | Sport::Rugby) => Self {
                calories: 3500,
                protein: 200.0,
                carbs: 420.0,
                fats: 110.0,
            },
            Some(Sport::Tennis | Sport::Athletics | Sport::Volleyball | Sport::Baseball) => Self {
                calories: 2300,
                protein: 140.0,
                carbs: 290.0,
                fats: 70.0,
            },
            _ => Self {
                calories: 2800,
                protein: 165.0,
                carbs: 350.0,
                fats: 85.0,
            },
        }
    }

    /// Percent of each target reached. Not capped: over-eating shows above 100.
    pub fn progress(&self, totals: &MacroTotals) -> MacroProgress {
        MacroProgress {
            calories: percent(totals.calories as f32, self.calories as f32),
            protein: percent(totals.protein, self.protein),
            carbs: percent(totals.carbs, self.carbs),
            fats: percent(totals.fats, self.fats),
        }
    }
}

fn percent(value: f32, target: f32) -> f32 {
    if target <= 0.0 {
        return 0.0;
    }
    value / target * 100.0
}

/// Quick-add presets the nutrition panel cycles through.
pub fn preset_meal(index: usize, user_id: &str, date: NaiveDate) -> NewMeal {
    const PRESETS: [(&str, MealType, u32, f32, f32, f32); 5] = [
        ("Oatmeal with berries", MealType::Breakfast, 450, 18.0, 72.0, 9.0),
        ("Grilled chicken bowl", MealType::Lunch, 720, 52.0, 80.0, 18.0),
        ("Protein shake", MealType::Snack, 280, 30.0, 25.0, 6.0),
        ("Salmon with rice", MealType::Dinner, 780, 48.0, 85.0, 24.0),
        ("Greek yogurt and honey", MealType::Snack, 240, 20.0, 30.0, 4.0),
    ];
    let (name, meal_type, calories, protein, carbs, fats) = PRESETS[index % PRESETS.len()];
    NewMeal {
        user_id: user_id.to_string(),
        date,
        meal_type,
        name: name.to_string(),
        calories,
        protein,
        carbs,
        fats,
    }
}
