use std::sync::mpsc;
use std::time::Duration;

use athlete_terminal::config::SimMode;
use athlete_terminal::profile::resolve;
use athlete_terminal::simulator::{
    JitterSource, MetricSnapshot, MetricSource, MetricValue, ReplaySource, SimChannel, SimField,
    SimulatorSlot, build_source, live_vitals, performance_fields, spawn_simulator,
};
use athlete_terminal::state::Delta;

const WAIT: Duration = Duration::from_secs(2);

#[test]
fn jitter_never_leaves_field_bounds() {
    for seed in 0..25 {
        let mut fields = live_vitals();
        fields.push(SimField::new("Edge", 99.5, 10.0, 0.0, 100.0));
        let bounds: Vec<(String, (f32, f32))> = fields
            .iter()
            .map(|f| (f.name().to_string(), f.bounds()))
            .collect();

        let mut source = JitterSource::seeded(fields, seed);
        for _ in 0..400 {
            let snapshot = source.next_snapshot();
            for (name, (min, max)) in &bounds {
                let value = snapshot.get(name).expect("field present");
                assert!(
                    (*min..=*max).contains(&value),
                    "seed {seed}: {name}={value} outside [{min}, {max}]"
                );
            }
        }
    }
}

#[test]
fn jitter_moves_by_at_most_delta_per_step() {
    let mut source = JitterSource::seeded(vec![SimField::percent("Hydration", 50.0, 2.0)], 11);
    let mut previous = 50.0_f32;
    for _ in 0..200 {
        let value = source.next_snapshot().get("Hydration").expect("hydration");
        assert!((value - previous).abs() <= 2.0 + f32::EPSILON * 100.0);
        previous = value;
    }
}

#[test]
fn same_seed_same_sequence() {
    let mut a = JitterSource::seeded(live_vitals(), 42);
    let mut b = JitterSource::seeded(live_vitals(), 42);
    for _ in 0..20 {
        assert_eq!(a.next_snapshot().values, b.next_snapshot().values);
    }
}

#[test]
fn field_construction_normalizes_inverted_range() {
    let field = SimField::new("Load", 150.0, -3.0, 100.0, 0.0);
    assert_eq!(field.bounds(), (0.0, 100.0));
    assert_eq!(field.value(), 100.0);
}

#[test]
fn field_construction_opens_non_finite_bounds() {
    let field = SimField::new("Load", 40.0, 1.0, f32::NAN, 100.0);
    assert_eq!(field.bounds(), (f32::MIN, 100.0));
    assert_eq!(field.value(), 40.0);

    let field = SimField::new("Load", 40.0, 1.0, 0.0, f32::NAN);
    assert_eq!(field.bounds(), (0.0, f32::MAX));

    let field = SimField::new("Load", f32::NAN, 1.0, f32::NAN, f32::INFINITY);
    assert_eq!(field.bounds(), (f32::MIN, f32::MAX));
    assert_eq!(field.value(), f32::MIN);

    let mut source = JitterSource::seeded(
        vec![SimField::new("Load", 40.0, 5.0, f32::NAN, 50.0)],
        3,
    );
    for _ in 0..100 {
        let value = source.next_snapshot().get("Load").expect("field present");
        assert!(value.is_finite() && value <= 50.0);
    }
}

#[test]
fn replay_source_cycles_frames() {
    let frame = |v: f32| {
        MetricSnapshot::new(vec![MetricValue {
            name: "Heart Rate".to_string(),
            value: v,
        }])
    };
    let mut source = ReplaySource::new(vec![frame(60.0), frame(70.0)]);
    let seen: Vec<f32> = (0..5)
        .map(|_| source.next_snapshot().get("Heart Rate").expect("value"))
        .collect();
    assert_eq!(seen, vec![60.0, 70.0, 60.0, 70.0, 60.0]);

    let mut empty = ReplaySource::new(Vec::new());
    assert!(empty.next_snapshot().values.is_empty());
}

#[test]
fn performance_fields_follow_the_profile() {
    let bundle = resolve("Football", "Forward");
    let fields = performance_fields(&bundle);
    assert_eq!(fields.len(), bundle.metrics.len());
    assert_eq!(fields[0].name(), "Shooting Accuracy");
    assert_eq!(fields[0].value(), 85.0);

    let empty = resolve("Curling", "Skip");
    let mut source = build_source(SimChannel::Performance, &empty, SimMode::Jitter);
    assert!(source.next_snapshot().values.is_empty());
}

#[test]
fn spawned_simulator_emits_until_stopped() {
    let (tx, rx) = mpsc::channel();
    let source = ReplaySource::from_fields(&live_vitals());
    let mut handle = spawn_simulator(SimChannel::Vitals, source, Duration::from_millis(10), tx);

    let first = rx.recv_timeout(WAIT).expect("first snapshot");
    match first {
        Delta::MetricSnapshot { channel, snapshot } => {
            assert_eq!(channel, SimChannel::Vitals);
            assert_eq!(snapshot.get("Heart Rate"), Some(72.0));
        }
        other => panic!("unexpected delta {other:?}"),
    }

    assert!(handle.is_running());
    handle.stop();
    assert!(!handle.is_running());

    while rx.try_recv().is_ok() {}
    assert!(matches!(
        rx.recv_timeout(Duration::from_millis(100)),
        Err(mpsc::RecvTimeoutError::Disconnected)
    ));
}

#[test]
fn remounting_stops_the_previous_simulator() {
    let (tx, rx) = mpsc::channel();
    let bundle = resolve("Football", "Forward");
    let interval = Duration::from_millis(10);
    let mut slot = SimulatorSlot::default();

    slot.remount(
        Some((
            SimChannel::Vitals,
            build_source(SimChannel::Vitals, &bundle, SimMode::Replay),
        )),
        interval,
        &tx,
    );
    assert_eq!(slot.active_channel(), Some(SimChannel::Vitals));
    rx.recv_timeout(WAIT).expect("vitals snapshot");

    slot.remount(
        Some((
            SimChannel::Comparison,
            build_source(SimChannel::Comparison, &bundle, SimMode::Replay),
        )),
        interval,
        &tx,
    );
    assert_eq!(slot.active_channel(), Some(SimChannel::Comparison));

    // Remount joins the old thread, so only stale vitals can still be queued.
    let mut saw_comparison = false;
    while let Ok(delta) = rx.recv_timeout(WAIT) {
        let Delta::MetricSnapshot { channel, .. } = delta else {
            continue;
        };
        if saw_comparison {
            assert_eq!(channel, SimChannel::Comparison);
            break;
        }
        if channel == SimChannel::Comparison {
            saw_comparison = true;
        }
    }
    assert!(saw_comparison);

    slot.unmount();
    assert_eq!(slot.active_channel(), None);
}
