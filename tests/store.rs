use serde_json::json;

use athlete_terminal::error::ErrorKind;
use athlete_terminal::store::{DocumentData, DocumentStore, Filter, MemoryStore, SqliteStore};
use athlete_terminal::user_profile::{
    AthleteProfile, RecruiterProfile, Role, UserProfile, fetch_profile, save_profile,
};

fn doc(value: serde_json::Value) -> DocumentData {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn exercise_store(store: &mut dyn DocumentStore) {
    let a = store
        .add_document("meals", doc(json!({ "user_id": "u1", "calories": 450, "date": "2024-05-01" })))
        .expect("add a");
    let b = store
        .add_document("meals", doc(json!({ "user_id": "u1", "calories": 900, "date": "2024-05-02" })))
        .expect("add b");
    store
        .add_document("meals", doc(json!({ "user_id": "u2", "calories": 300, "date": "2024-05-01" })))
        .expect("add c");
    assert_ne!(a, b);

    let fetched = store.get_document("meals", &a).expect("get").expect("present");
    assert_eq!(fetched.id, a);
    assert_eq!(fetched.data["calories"], json!(450));
    assert!(store.get_document("meals", "missing").expect("get").is_none());
    assert!(store.get_document("other", &a).expect("get").is_none());

    let mine = store
        .query_documents("meals", &[Filter::eq("user_id", "u1")])
        .expect("query");
    assert_eq!(
        mine.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
        vec![a.as_str(), b.as_str()]
    );

    let big = store
        .query_documents(
            "meals",
            &[Filter::eq("user_id", "u1"), Filter::gte("calories", 500)],
        )
        .expect("query");
    assert_eq!(big.len(), 1);
    assert_eq!(big[0].id, b);

    let early = store
        .query_documents("meals", &[Filter::lte("date", "2024-05-01")])
        .expect("query");
    assert_eq!(early.len(), 2);

    store
        .set_document("meals", &a, doc(json!({ "user_id": "u1", "calories": 500, "date": "2024-05-01" })))
        .expect("overwrite");
    let updated = store.get_document("meals", &a).expect("get").expect("present");
    assert_eq!(updated.data["calories"], json!(500));
    assert_eq!(
        store.query_documents("meals", &[]).expect("query").len(),
        3,
        "overwrite must not duplicate"
    );

    store.delete_document("meals", &a).expect("delete");
    assert!(store.get_document("meals", &a).expect("get").is_none());
    let err = store.delete_document("meals", &a).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert!(store.query_documents("empty", &[]).expect("query").is_empty());
}

#[test]
fn memory_store_behaves_like_a_document_store() {
    let mut store = MemoryStore::new();
    exercise_store(&mut store);
}

#[test]
fn sqlite_store_behaves_like_a_document_store() {
    let mut store = SqliteStore::open_in_memory().expect("sqlite");
    exercise_store(&mut store);
}

#[test]
fn sqlite_documents_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("documents.sqlite");

    let id = {
        let mut store = SqliteStore::open(&path).expect("open");
        store
            .add_document("users", doc(json!({ "name": "Ada" })))
            .expect("add")
    };

    let store = SqliteStore::open(&path).expect("reopen");
    let found = store.get_document("users", &id).expect("get").expect("present");
    assert_eq!(found.data["name"], json!("Ada"));
}

#[test]
fn sqlite_open_reports_unusable_parent_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a dir").expect("write");

    let err = SqliteStore::open(&blocker.join("sub").join("documents.sqlite"))
        .err()
        .expect("open must fail");
    assert!(err.to_string().contains("create store dir"), "{err}");
}

fn athlete() -> UserProfile {
    UserProfile::Athlete(AthleteProfile {
        display_name: "Sofia Novak".to_string(),
        sport: "Tennis".to_string(),
        position: "Singles".to_string(),
        age: Some(18),
        height_cm: Some(176),
        weight_kg: None,
        school: Some("Lakeside High".to_string()),
        graduation_year: Some(2025),
        gpa: Some(3.8),
        highlights_url: None,
        awards: vec!["State Champion".to_string()],
    })
}

#[test]
fn profiles_round_trip_with_role_tag() {
    let mut store = MemoryStore::new();
    let profile = athlete();
    save_profile(&mut store, "u-athlete", &profile).expect("save");

    let raw = store
        .get_document("users", "u-athlete")
        .expect("get")
        .expect("present");
    assert_eq!(raw.data["role"], json!("athlete"));

    let loaded = fetch_profile(&store, "u-athlete").expect("fetch");
    assert_eq!(loaded, profile);
    assert_eq!(loaded.role(), Role::Athlete);
    assert_eq!(loaded.sport_position(), Some(("Tennis", "Singles")));
}

#[test]
fn recruiter_profile_has_no_sport_position() {
    let mut store = SqliteStore::open_in_memory().expect("sqlite");
    let profile = UserProfile::Recruiter(RecruiterProfile {
        display_name: "Dana Whitfield".to_string(),
        organization: "Northbridge FC".to_string(),
        title: None,
        sports: vec!["Football".to_string()],
        regions: Vec::new(),
        verified: true,
    });
    save_profile(&mut store, "u-recruiter", &profile).expect("save");

    let loaded = fetch_profile(&store, "u-recruiter").expect("fetch");
    assert_eq!(loaded.role(), Role::Recruiter);
    assert_eq!(loaded.display_name(), "Dana Whitfield");
    assert!(loaded.sport_position().is_none());
}

#[test]
fn missing_profile_is_not_found() {
    let store = MemoryStore::new();
    let err = fetch_profile(&store, "nobody").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
