//! Time and identifier sources injected into the codec.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

/// Source of the current instant, at millisecond precision.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock that never goes backwards within a process.
///
/// If the system clock steps back, the last instant handed out is repeated
/// until wall time catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_ms: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let wall_ms = Utc::now().timestamp_millis();
        let previous = self.last_ms.fetch_max(wall_ms, Ordering::AcqRel);
        millis_to_datetime(previous.max(wall_ms))
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now_ms: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Move the clock forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: i64) {
        self.now_ms.fetch_add(ms, Ordering::AcqRel);
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now_ms.store(instant.timestamp_millis(), Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        millis_to_datetime(self.now_ms.load(Ordering::Acquire))
    }
}

/// Source of fresh record identities.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// 128-bit ULIDs, collision-resistant across threads and processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct UlidSource;

impl IdSource for UlidSource {
    fn next_id(&self) -> String {
        ulid::Ulid::new().to_string()
    }
}

/// Predictable ids: `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::AcqRel);
        format!("{}-{}", self.prefix, n)
    }
}

/// Convert epoch milliseconds to an instant, clamping out-of-range values.
fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
