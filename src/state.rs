use std::collections::{HashMap, VecDeque};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::contracts::ContractOffer;
use crate::meals::MealEntry;
use crate::notifications::{NotificationCenter, NotificationKind};
use crate::profile::{ProfileBundle, ProfileTable};
use crate::simulator::{MetricSnapshot, SimChannel};
use crate::social::Feed;
use crate::user_profile::{Role, UserProfile};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Overview,
    Training,
    Nutrition,
    Injury,
    Recruitment,
    Social,
    Settings,
    AiInsights,
    LiveComparison,
    Scouting,
    Contracts,
    Notifications,
    Community,
}

const ATHLETE_SECTIONS: [Section; 9] = [
    Section::Overview,
    Section::Training,
    Section::Nutrition,
    Section::Injury,
    Section::Recruitment,
    Section::Social,
    Section::AiInsights,
    Section::LiveComparison,
    Section::Settings,
];

const RECRUITER_SECTIONS: [Section; 4] = [
    Section::Scouting,
    Section::Contracts,
    Section::Notifications,
    Section::Community,
];

impl Section {
    pub fn for_role(role: Role) -> &'static [Section] {
        match role {
            Role::Athlete => &ATHLETE_SECTIONS,
            Role::Recruiter => &RECRUITER_SECTIONS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Training => "Training Plans",
            Section::Nutrition => "Nutrition",
            Section::Injury => "Injury Prevention",
            Section::Recruitment => "Recruitment",
            Section::Social => "Social",
            Section::Settings => "Settings",
            Section::AiInsights => "AI Insights",
            Section::LiveComparison => "Live Comparison",
            Section::Scouting => "Global Scouting",
            Section::Contracts => "Contracts",
            Section::Notifications => "Notifications",
            Section::Community => "Community",
        }
    }

    /// Simulator feeding this section while it is mounted.
    pub fn sim_channel(self) -> Option<SimChannel> {
        match self {
            Section::Overview | Section::Injury | Section::AiInsights => Some(SimChannel::Vitals),
            Section::Training => Some(SimChannel::Performance),
            Section::LiveComparison => Some(SimChannel::Comparison),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    MetricSnapshot {
        channel: SimChannel,
        snapshot: MetricSnapshot,
    },
    SetUser(Option<User>),
    SetProfile(UserProfile),
    SetMeals(Vec<MealEntry>),
    MealAdded(MealEntry),
    MealRemoved(String),
    MealError(String),
    SetOffers(Vec<ContractOffer>),
    UpsertOffer(ContractOffer),
    Notify {
        kind: NotificationKind,
        title: String,
        body: String,
    },
    Log(String),
}

pub struct AppState {
    pub role: Role,
    pub section: Section,
    pub sport: String,
    pub position: String,
    pub bundle: ProfileBundle,
    pub user: Option<User>,
    pub profile: Option<UserProfile>,
    pub snapshots: HashMap<SimChannel, MetricSnapshot>,
    pub meal_date: NaiveDate,
    pub meals: Vec<MealEntry>,
    pub meal_error: Option<String>,
    pub offers: Vec<ContractOffer>,
    pub notifications: NotificationCenter,
    pub feed: Feed,
    pub selected: usize,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(role: Role, sport: &str, position: &str) -> Self {
        let mut state = Self {
            role,
            section: Section::for_role(role)[0],
            sport: String::new(),
            position: String::new(),
            bundle: ProfileBundle::default(),
            user: None,
            profile: None,
            snapshots: HashMap::new(),
            meal_date: Utc::now().date_naive(),
            meals: Vec::new(),
            meal_error: None,
            offers: Vec::new(),
            notifications: NotificationCenter::default(),
            feed: Feed::default(),
            selected: 0,
            help_overlay: false,
            logs: VecDeque::new(),
        };
        state.set_profile_key(sport, position);
        state
    }

    /// Re-resolves the bundle; an unmatched pair leaves every panel empty.
    pub fn set_profile_key(&mut self, sport: &str, position: &str) {
        self.sport = sport.trim().to_string();
        self.position = position.trim().to_string();
        self.bundle = ProfileTable::active().resolve(&self.sport, &self.position);
        if self.bundle.is_empty() {
            self.push_log(format!(
                "[WARN] No profile data for {}/{}",
                self.sport, self.position
            ));
        }
        self.snapshots.remove(&SimChannel::Performance);
    }

    pub fn sections(&self) -> &'static [Section] {
        Section::for_role(self.role)
    }

    pub fn cycle_section(&mut self, forward: bool) {
        let sections = self.sections();
        let idx = sections
            .iter()
            .position(|s| *s == self.section)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % sections.len()
        } else {
            (idx + sections.len() - 1) % sections.len()
        };
        self.section = sections[next];
        self.selected = 0;
    }

    pub fn toggle_role(&mut self) {
        self.role = self.role.toggle();
        self.section = self.sections()[0];
        self.selected = 0;
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn snapshot(&self, channel: SimChannel) -> Option<&MetricSnapshot> {
        self.snapshots.get(&channel)
    }

    pub fn push_log(&mut self, message: impl Into<String>) {
        self.logs.push_back(message.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::MetricSnapshot { channel, snapshot } => {
            state.snapshots.insert(channel, snapshot);
        }
        Delta::SetUser(user) => {
            if user.is_none() {
                state.profile = None;
                state.meals.clear();
            }
            state.user = user;
        }
        Delta::SetProfile(profile) => {
            if let Some((sport, position)) = profile.sport_position() {
                let (sport, position) = (sport.to_string(), position.to_string());
                state.set_profile_key(&sport, &position);
            }
            state.push_log(format!(
                "[INFO] Profile loaded: {} ({})",
                profile.display_name(),
                profile.role().label()
            ));
            state.profile = Some(profile);
        }
        Delta::SetMeals(meals) => {
            state.meals = meals;
            state.meal_error = None;
            if state.section == Section::Nutrition {
                state.selected = state.selected.min(state.meals.len().saturating_sub(1));
            }
        }
        Delta::MealAdded(entry) => {
            let known = state.meals.iter().any(|m| m.id == entry.id);
            if !known && entry.meal.date == state.meal_date {
                state.meals.push(entry);
                state.meals.sort_by_key(|m| m.meal.meal_type);
            }
            state.meal_error = None;
        }
        Delta::MealRemoved(id) => {
            state.meals.retain(|m| m.id != id);
            state.selected = state.selected.min(state.meals.len().saturating_sub(1));
        }
        Delta::MealError(message) => {
            state.push_log(format!("[WARN] {message}"));
            state.meal_error = Some(message);
        }
        Delta::SetOffers(offers) => {
            state.offers = offers;
        }
        Delta::UpsertOffer(offer) => {
            match state.offers.iter_mut().find(|o| o.id == offer.id) {
                Some(existing) => *existing = offer,
                None => state.offers.push(offer),
            }
        }
        Delta::Notify { kind, title, body } => {
            state.push_log(format!("[ALERT] {title}"));
            state.notifications.push(kind, title, body);
        }
        Delta::Log(line) => state.push_log(line),
    }
}
