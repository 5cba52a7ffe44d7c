use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use athlete_terminal::insights::{VitalsReading, injury_risk, vitals_insights};
use athlete_terminal::profile::ProfileTable;
use athlete_terminal::roster::Roster;
use athlete_terminal::simulator::{JitterSource, MetricSource, live_vitals};
use athlete_terminal::store::{DocumentStore, Filter, MemoryStore, to_document_data};

fn bench_profile_resolve(c: &mut Criterion) {
    let table = ProfileTable::builtin();
    c.bench_function("profile_resolve", |b| {
        b.iter(|| {
            let bundle = table.resolve(black_box("football"), black_box(" forward "));
            black_box(bundle.metrics.len());
        })
    });
}

fn bench_profile_table_parse(c: &mut Criterion) {
    c.bench_function("profile_table_parse", |b| {
        b.iter(|| {
            let table = ProfileTable::from_json(black_box(PROFILES_JSON)).unwrap();
            black_box(table.len());
        })
    });
}

fn bench_calorie_audit(c: &mut Criterion) {
    let table = ProfileTable::builtin();
    c.bench_function("calorie_audit", |b| {
        b.iter(|| black_box(table.calorie_discrepancies(black_box(0)).len()))
    });
}

fn bench_jitter_step(c: &mut Criterion) {
    let mut source = JitterSource::seeded(live_vitals(), 7);
    c.bench_function("jitter_snapshot", |b| {
        b.iter(|| {
            let snapshot = source.next_snapshot();
            black_box(snapshot.values.len());
        })
    });
}

fn bench_vitals_rules(c: &mut Criterion) {
    let reading = VitalsReading {
        hydration: 64.0,
        fatigue: 58.0,
        ..VitalsReading::default()
    };
    c.bench_function("vitals_rules", |b| {
        b.iter(|| {
            let insights = vitals_insights(black_box(&reading));
            let risk = injury_risk(black_box(&reading));
            black_box((insights.len(), risk.score));
        })
    });
}

fn bench_memory_query(c: &mut Criterion) {
    let mut store = MemoryStore::new();
    for (idx, athlete) in Roster::builtin().all().iter().cycle().take(500).enumerate() {
        let mut data = to_document_data(athlete).unwrap();
        data.insert("rank".to_string(), (idx as u64).into());
        store.add_document("roster", data).unwrap();
    }
    let filters = [Filter::eq("sport", "Football"), Filter::lte("age", 21)];
    c.bench_function("memory_query", |b| {
        b.iter(|| {
            let docs = store.query_documents("roster", black_box(&filters)).unwrap();
            black_box(docs.len());
        })
    });
}

criterion_group!(
    perf,
    bench_profile_resolve,
    bench_profile_table_parse,
    bench_calorie_audit,
    bench_jitter_step,
    bench_vitals_rules,
    bench_memory_query
);
criterion_main!(perf);

static PROFILES_JSON: &str = include_str!("../data/sport_profiles.json");
