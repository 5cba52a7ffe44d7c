use athlete_terminal::auth::User;
use athlete_terminal::contracts::{OfferStatus, Party, sample_offers};
use athlete_terminal::meals::{MealEntry, preset_meal};
use athlete_terminal::notifications::NotificationKind;
use athlete_terminal::simulator::{MetricSnapshot, MetricValue, SimChannel};
use athlete_terminal::state::{AppState, Delta, Section, apply_delta};
use athlete_terminal::user_profile::{AthleteProfile, Role, UserProfile};

fn entry(id: &str, preset: usize, state: &AppState) -> MealEntry {
    MealEntry {
        id: id.to_string(),
        meal: preset_meal(preset, "u1", state.meal_date),
    }
}

fn user() -> User {
    User {
        id: "u1".to_string(),
        display_name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        photo_url: None,
    }
}

#[test]
fn new_state_resolves_the_profile_bundle() {
    let state = AppState::new(Role::Athlete, "Football", "Forward");
    assert_eq!(state.section, Section::Overview);
    assert_eq!(state.bundle.metrics[0].category, "Shooting Accuracy");
    assert!(state.logs.is_empty());
}

#[test]
fn unknown_profile_leaves_panels_empty_and_warns() {
    let state = AppState::new(Role::Athlete, "Curling", "Skip");
    assert!(state.bundle.is_empty());
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN]")));
}

#[test]
fn meal_added_is_not_duplicated_by_a_later_reload() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    let lunch = entry("m1", 1, &state);

    apply_delta(&mut state, Delta::MealAdded(lunch.clone()));
    apply_delta(&mut state, Delta::MealAdded(lunch.clone()));
    assert_eq!(state.meals.len(), 1);

    apply_delta(&mut state, Delta::SetMeals(vec![lunch]));
    assert_eq!(state.meals.len(), 1);
}

#[test]
fn meals_for_other_days_are_ignored() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    let mut other = entry("m2", 0, &state);
    other.meal.date = state.meal_date.pred_opt().expect("yesterday");
    apply_delta(&mut state, Delta::MealAdded(other));
    assert!(state.meals.is_empty());
}

#[test]
fn meals_stay_sorted_and_removal_clamps_selection() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    state.section = Section::Nutrition;
    let e = entry("dinner", 3, &state);
    apply_delta(&mut state, Delta::MealAdded(e));
    let e = entry("breakfast", 0, &state);
    apply_delta(&mut state, Delta::MealAdded(e));
    let ids: Vec<&str> = state.meals.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["breakfast", "dinner"]);

    state.selected = 1;
    apply_delta(&mut state, Delta::MealRemoved("dinner".to_string()));
    assert_eq!(state.meals.len(), 1);
    assert_eq!(state.selected, 0);
}

#[test]
fn meal_error_is_shown_and_cleared_by_success() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    apply_delta(&mut state, Delta::MealError("Failed to add meal".to_string()));
    assert_eq!(state.meal_error.as_deref(), Some("Failed to add meal"));
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] Failed to add meal")
    );

    let snack = entry("m3", 2, &state);
    apply_delta(&mut state, Delta::MealAdded(snack));
    assert!(state.meal_error.is_none());
}

#[test]
fn snapshots_are_kept_per_channel() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    let snapshot = MetricSnapshot::new(vec![MetricValue {
        name: "Heart Rate".to_string(),
        value: 90.0,
    }]);
    apply_delta(
        &mut state,
        Delta::MetricSnapshot {
            channel: SimChannel::Vitals,
            snapshot,
        },
    );
    assert_eq!(
        state
            .snapshot(SimChannel::Vitals)
            .and_then(|s| s.get("Heart Rate")),
        Some(90.0)
    );
    assert!(state.snapshot(SimChannel::Comparison).is_none());
}

#[test]
fn athlete_profile_rekeys_the_bundle() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    let profile = UserProfile::Athlete(AthleteProfile {
        display_name: "Ana".to_string(),
        sport: "Basketball".to_string(),
        position: "Center".to_string(),
        age: None,
        height_cm: None,
        weight_kg: None,
        school: None,
        graduation_year: None,
        gpa: None,
        highlights_url: None,
        awards: Vec::new(),
    });
    apply_delta(&mut state, Delta::SetProfile(profile));
    assert_eq!(state.sport, "Basketball");
    assert_eq!(state.position, "Center");
    assert!(!state.bundle.is_empty());
    assert!(state.profile.is_some());
    assert!(
        state
            .logs
            .back()
            .is_some_and(|l| l.starts_with("[INFO] Profile loaded"))
    );
}

#[test]
fn signing_out_clears_user_data() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    apply_delta(&mut state, Delta::SetUser(Some(user())));
    let e = entry("m1", 0, &state);
    apply_delta(&mut state, Delta::MealAdded(e));
    assert!(state.user.is_some());

    apply_delta(&mut state, Delta::SetUser(None));
    assert!(state.user.is_none());
    assert!(state.meals.is_empty());
    assert!(state.profile.is_none());
}

#[test]
fn offers_are_upserted_by_id() {
    let mut state = AppState::new(Role::Recruiter, "Football", "Forward");
    let offers = sample_offers("rec-1");
    apply_delta(&mut state, Delta::SetOffers(offers.clone()));

    let mut changed = offers[1].clone();
    changed.reject(Party::Athlete).expect("reject");
    apply_delta(&mut state, Delta::UpsertOffer(changed));
    assert_eq!(state.offers.len(), 3);
    assert_eq!(state.offers[1].status, OfferStatus::Rejected);

    let fresh = sample_offers("rec-1").remove(0);
    apply_delta(&mut state, Delta::UpsertOffer(fresh));
    assert_eq!(state.offers.len(), 4);
}

#[test]
fn notify_logs_an_alert_and_queues_a_notification() {
    let mut state = AppState::new(Role::Recruiter, "Football", "Forward");
    apply_delta(
        &mut state,
        Delta::Notify {
            kind: NotificationKind::Offer,
            title: "Offer accepted".to_string(),
            body: "Mateo Alvarez accepted".to_string(),
        },
    );
    assert_eq!(state.notifications.unread_count(), 1);
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[ALERT] Offer accepted")
    );
}

#[test]
fn sections_cycle_within_the_active_role() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    assert_eq!(state.sections().len(), 9);
    state.cycle_section(false);
    assert_eq!(state.section, Section::Settings);
    state.cycle_section(true);
    assert_eq!(state.section, Section::Overview);

    state.toggle_role();
    assert_eq!(state.role, Role::Recruiter);
    assert_eq!(state.section, Section::Scouting);
    for _ in 0..4 {
        state.cycle_section(true);
    }
    assert_eq!(state.section, Section::Scouting);
}

#[test]
fn only_simulated_sections_have_channels() {
    assert_eq!(Section::Overview.sim_channel(), Some(SimChannel::Vitals));
    assert_eq!(Section::Training.sim_channel(), Some(SimChannel::Performance));
    assert_eq!(
        Section::LiveComparison.sim_channel(),
        Some(SimChannel::Comparison)
    );
    assert_eq!(Section::Nutrition.sim_channel(), None);
    assert_eq!(Section::Contracts.sim_channel(), None);
}

#[test]
fn logs_are_bounded() {
    let mut state = AppState::new(Role::Athlete, "Football", "Forward");
    for idx in 0..500 {
        state.push_log(format!("[INFO] line {idx}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 499"));
}
