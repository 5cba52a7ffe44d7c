use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimMode;
use crate::profile::ProfileBundle;
use crate::state::Delta;

/// Which dashboard panel a snapshot feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimChannel {
    Vitals,
    Performance,
    Comparison,
}

/// One simulated numeric field with its per-step bound and clamp range.
#[derive(Debug, Clone, PartialEq)]
pub struct SimField {
    name: String,
    value: f32,
    delta: f32,
    min: f32,
    max: f32,
}

impl SimField {
    /// A non-finite bound leaves that side open at the largest finite `f32`.
    pub fn new(name: impl Into<String>, value: f32, delta: f32, min: f32, max: f32) -> Self {
        let min = if min.is_finite() { min } else { f32::MIN };
        let max = if max.is_finite() { max } else { f32::MAX };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let value = if value.is_finite() { value } else { min };
        Self {
            name: name.into(),
            value: value.clamp(min, max),
            delta: if delta.is_finite() { delta.abs() } else { 0.0 },
            min,
            max,
        }
    }

    pub fn percent(name: impl Into<String>, value: f32, delta: f32) -> Self {
        Self::new(name, value, delta, 0.0, 100.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    fn jitter(&mut self, rng: &mut impl Rng) {
        if self.delta > 0.0 {
            self.value += rng.gen_range(-self.delta..=self.delta);
        }
        self.value = self.value.clamp(self.min, self.max);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue {
    pub name: String,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    pub values: Vec<MetricValue>,
    pub taken_at: DateTime<Utc>,
}

impl MetricSnapshot {
    pub fn new(values: Vec<MetricValue>) -> Self {
        Self {
            values,
            taken_at: Utc::now(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value)
    }
}

/// Anything that can produce a stream of metric snapshots. Rendering only
/// consumes snapshots, so a real feed can replace the jitter source.
pub trait MetricSource: Send {
    fn next_snapshot(&mut self) -> MetricSnapshot;
}

impl<S: MetricSource + ?Sized> MetricSource for Box<S> {
    fn next_snapshot(&mut self) -> MetricSnapshot {
        (**self).next_snapshot()
    }
}

pub struct JitterSource<R: Rng + Send> {
    fields: Vec<SimField>,
    rng: R,
}

impl<R: Rng + Send> JitterSource<R> {
    pub fn new(fields: Vec<SimField>, rng: R) -> Self {
        Self { fields, rng }
    }

    pub fn fields(&self) -> &[SimField] {
        &self.fields
    }

    pub fn step(&mut self) {
        for field in &mut self.fields {
            field.jitter(&mut self.rng);
        }
    }

    fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot::new(
            self.fields
                .iter()
                .map(|f| MetricValue {
                    name: f.name.clone(),
                    value: f.value,
                })
                .collect(),
        )
    }
}

impl JitterSource<StdRng> {
    pub fn seeded(fields: Vec<SimField>, seed: u64) -> Self {
        Self::new(fields, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(fields: Vec<SimField>) -> Self {
        Self::new(fields, StdRng::from_entropy())
    }
}

impl<R: Rng + Send> MetricSource for JitterSource<R> {
    fn next_snapshot(&mut self) -> MetricSnapshot {
        self.step();
        self.snapshot()
    }
}

/// Cycles through a fixed list of snapshots.
pub struct ReplaySource {
    frames: Vec<MetricSnapshot>,
    next: usize,
}

impl ReplaySource {
    pub fn new(frames: Vec<MetricSnapshot>) -> Self {
        Self { frames, next: 0 }
    }

    /// Two frames per field set: the seed values and a flat 5% lower variant.
    pub fn from_fields(fields: &[SimField]) -> Self {
        let base = fields
            .iter()
            .map(|f| MetricValue {
                name: f.name.clone(),
                value: f.value,
            })
            .collect::<Vec<_>>();
        let dipped = fields
            .iter()
            .map(|f| MetricValue {
                name: f.name.clone(),
                value: (f.value * 0.95).clamp(f.min, f.max),
            })
            .collect::<Vec<_>>();
        Self::new(vec![MetricSnapshot::new(base), MetricSnapshot::new(dipped)])
    }
}

impl MetricSource for ReplaySource {
    fn next_snapshot(&mut self) -> MetricSnapshot {
        if self.frames.is_empty() {
            return MetricSnapshot::new(Vec::new());
        }
        let mut frame = self.frames[self.next % self.frames.len()].clone();
        self.next = (self.next + 1) % self.frames.len();
        frame.taken_at = Utc::now();
        frame
    }
}

pub fn live_vitals() -> Vec<SimField> {
    vec![
        SimField::new("Heart Rate", 72.0, 3.0, 40.0, 200.0),
        SimField::percent("Hydration", 78.0, 2.0),
        SimField::percent("Fatigue", 35.0, 3.0),
        SimField::percent("Sleep Quality", 82.0, 1.5),
        SimField::percent("Soreness", 20.0, 2.0),
        SimField::percent("Training Load", 65.0, 2.5),
    ]
}

pub fn performance_fields(bundle: &ProfileBundle) -> Vec<SimField> {
    bundle
        .metrics
        .iter()
        .map(|m| SimField::percent(m.category.clone(), m.current, 1.5))
        .collect()
}

pub fn comparison_fields() -> Vec<SimField> {
    vec![
        SimField::percent("You: Speed", 84.0, 2.0),
        SimField::percent("Peers: Speed", 79.0, 1.0),
        SimField::percent("You: Endurance", 76.0, 2.0),
        SimField::percent("Peers: Endurance", 80.0, 1.0),
        SimField::percent("You: Technique", 81.0, 1.5),
        SimField::percent("Peers: Technique", 77.0, 1.0),
    ]
}

pub fn fields_for(channel: SimChannel, bundle: &ProfileBundle) -> Vec<SimField> {
    match channel {
        SimChannel::Vitals => live_vitals(),
        SimChannel::Performance => performance_fields(bundle),
        SimChannel::Comparison => comparison_fields(),
    }
}

pub fn build_source(
    channel: SimChannel,
    bundle: &ProfileBundle,
    mode: SimMode,
) -> Box<dyn MetricSource> {
    let fields = fields_for(channel, bundle);
    match mode {
        SimMode::Jitter => Box::new(JitterSource::from_entropy(fields)),
        SimMode::Replay => Box::new(ReplaySource::from_fields(&fields)),
    }
}

/// Running simulator thread. Stopping (or dropping) cancels the timer and
/// joins the thread.
pub struct SimulatorHandle {
    channel: SimChannel,
    stop_tx: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl SimulatorHandle {
    pub fn channel(&self) -> SimChannel {
        self.channel
    }

    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                tracing::warn!(channel = ?self.channel, "simulator thread panicked");
            }
        }
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn spawn_simulator<S: MetricSource + 'static>(
    channel: SimChannel,
    mut source: S,
    interval: Duration,
    tx: Sender<Delta>,
) -> SimulatorHandle {
    let (stop_tx, stop_rx): (Sender<()>, Receiver<()>) = mpsc::channel();
    let join = thread::spawn(move || {
        tracing::debug!(?channel, interval_ms = interval.as_millis() as u64, "simulator started");
        loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    let snapshot = source.next_snapshot();
                    if tx.send(Delta::MetricSnapshot { channel, snapshot }).is_err() {
                        break;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!(?channel, "simulator stopped");
    });

    SimulatorHandle {
        channel,
        stop_tx: Some(stop_tx),
        join: Some(join),
    }
}

/// Holds at most one simulator: the one for the currently mounted section.
#[derive(Default)]
pub struct SimulatorSlot {
    current: Option<SimulatorHandle>,
}

impl SimulatorSlot {
    pub fn active_channel(&self) -> Option<SimChannel> {
        self.current.as_ref().map(|h| h.channel())
    }

    /// Stops whatever is running, then starts `source` if one is given.
    pub fn remount(
        &mut self,
        next: Option<(SimChannel, Box<dyn MetricSource>)>,
        interval: Duration,
        tx: &Sender<Delta>,
    ) {
        if let Some(mut old) = self.current.take() {
            old.stop();
        }
        self.current = next.map(|(channel, source)| spawn_simulator(channel, source, interval, tx.clone()));
    }

    pub fn unmount(&mut self) {
        if let Some(mut old) = self.current.take() {
            old.stop();
        }
    }
}
