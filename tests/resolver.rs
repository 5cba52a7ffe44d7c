use athlete_terminal::error::ErrorKind;
use athlete_terminal::profile::{ProfileTable, Sport, Trend, resolve};

#[test]
fn football_forward_leads_with_shooting_accuracy() {
    let bundle = resolve("Football", "Forward");
    let first = bundle.metrics.first().expect("forward metrics");
    assert_eq!(first.category, "Shooting Accuracy");
    assert_eq!(first.current, 85.0);
    assert_eq!(first.target, 95.0);
    assert_eq!(first.trend, Trend::Up);
    assert_eq!(bundle.meal_plan.len(), 7);
    assert!(!bundle.recovery.is_empty());
}

#[test]
fn lookup_ignores_case_and_spacing() {
    let table = ProfileTable::builtin();
    let canonical = table.resolve("Basketball", "Point Guard");
    let sloppy = table.resolve("  basketball ", "point   GUARD");
    assert!(!canonical.is_empty());
    assert_eq!(canonical, sloppy);

    let nfl = table.resolve("american football", "Quarterback");
    assert!(!nfl.is_empty());
}

#[test]
fn unknown_pairs_resolve_to_an_empty_bundle() {
    let table = ProfileTable::builtin();

    let curling = table.resolve("Curling", "Skip");
    assert!(curling.is_empty());
    assert!(curling.metrics.is_empty());
    assert!(curling.meal_plan.is_empty());

    let wrong_position = table.resolve("Football", "Pitcher");
    assert!(wrong_position.is_empty());

    let err = table.try_resolve("Curling", "Skip").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn every_listed_pair_resolves_to_a_full_bundle() {
    let table = ProfileTable::builtin();
    let pairs = table.pairs();
    assert_eq!(pairs.len(), table.len());
    assert!(pairs.len() >= 15);

    for (sport, position) in pairs {
        let bundle = table
            .try_resolve(sport.label(), &position)
            .unwrap_or_else(|err| panic!("{sport}/{position}: {err}"));
        assert!(!bundle.metrics.is_empty(), "{sport}/{position} has no metrics");
        assert!(
            !bundle.recommendations.is_empty(),
            "{sport}/{position} has no recommendations"
        );
        assert_eq!(bundle.meal_plan.len(), 7, "{sport}/{position} meal plan");
        assert!(!bundle.recovery.is_empty(), "{sport}/{position} recovery");
    }
}

#[test]
fn positions_follow_asset_order() {
    let table = ProfileTable::builtin();
    assert_eq!(
        table.positions_for("Football"),
        ["Forward", "Midfielder", "Defender", "Goalkeeper"]
    );
    assert_eq!(table.positions_for("Tennis"), ["Singles"]);
    assert!(table.positions_for("Curling").is_empty());
    assert_eq!(table.sports().len(), Sport::ALL.len());
}

#[test]
fn authored_calorie_mismatches_are_reported_not_fixed() {
    let table = ProfileTable::builtin();
    let mut found: Vec<(String, String, u32, u32)> = table
        .calorie_discrepancies(0)
        .into_iter()
        .map(|d| (d.plan, d.day, d.declared, d.summed))
        .collect();
    found.sort();

    assert_eq!(
        found,
        vec![
            ("high_performance".to_string(), "Wednesday".to_string(), 2900, 2850),
            ("lean_agility".to_string(), "Saturday".to_string(), 2400, 2350),
            ("power".to_string(), "Wednesday".to_string(), 3500, 3600),
        ]
    );

    let forward = table.resolve("Football", "Forward");
    let wednesday = forward
        .meal_plan
        .iter()
        .find(|d| d.day == "Wednesday")
        .expect("wednesday");
    assert_eq!(wednesday.total_calories, 2900);
}

#[test]
fn tolerance_hides_small_mismatches() {
    let table = ProfileTable::builtin();
    assert_eq!(table.calorie_discrepancies(50).len(), 1);
    assert!(table.calorie_discrepancies(100).is_empty());
}

#[test]
fn custom_table_rejects_unknown_plan_reference() {
    let raw = r#"{
        "meal_plans": {},
        "recovery_plans": { "rest": [] },
        "profiles": [
            { "sport": "Tennis", "position": "Singles", "meal_plan": "missing", "recovery_plan": "rest" }
        ]
    }"#;
    let err = ProfileTable::from_json(raw).unwrap_err();
    assert!(err.to_string().contains("unknown meal plan"));
}

#[test]
fn custom_table_rejects_duplicate_pairs() {
    let day = r#"{ "day": "D", "meals": ["a (1 kcal)", "b (1 kcal)", "c (1 kcal)"], "total_calories": 3 }"#;
    let week = vec![day; 7].join(",");
    let raw = format!(
        r#"{{
            "meal_plans": {{ "basic": [{week}] }},
            "recovery_plans": {{ "rest": [] }},
            "profiles": [
                {{ "sport": "Tennis", "position": "Singles", "meal_plan": "basic", "recovery_plan": "rest" }},
                {{ "sport": "tennis", "position": " singles", "meal_plan": "basic", "recovery_plan": "rest" }}
            ]
        }}"#
    );
    let err = ProfileTable::from_json(&raw).unwrap_err();
    assert!(err.to_string().contains("duplicate profile"));
}
