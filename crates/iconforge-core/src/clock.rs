//! Host clocks, the passive-income accrual clock, and the poll throttle.
//!
//! Nothing in the core reads the system time directly. Every operation that
//! depends on time takes `now` as a parameter; the host obtains it from a
//! [`Clock`]. Tests drive a [`ManualClock`].
//!
//! # Accrual
//!
//! [`AccrualClock::collect`] grants `units_per_interval` for every *whole*
//! interval elapsed since the stored timestamp and advances that timestamp
//! by exactly the whole intervals consumed. The sub-interval remainder stays
//! behind and counts toward the next unit. All arithmetic is checked; a
//! timestamp in the future or a zero interval is a no-op.

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current wall-clock time.
pub trait Clock {
    /// Return the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualClock {
    now: DateTime<Utc>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Move the clock to `now`.
    pub const fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Move the clock forward by `delta`. Saturates at the maximum instant.
    pub fn advance(&mut self, delta: TimeDelta) {
        self.now = self
            .now
            .checked_add_signed(delta)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

// ---------------------------------------------------------------------------
// Accrual
// ---------------------------------------------------------------------------

/// Result of one accrual collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accrual {
    /// Units earned for the whole intervals consumed.
    pub units: u64,
    /// The timestamp to store: the old one advanced by the consumed
    /// intervals, or unchanged if none elapsed.
    pub new_timestamp: i64,
}

/// Grants a fixed number of units per whole elapsed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualClock {
    units_per_interval: u64,
    interval_secs: u64,
}

impl AccrualClock {
    /// Create a clock granting `units_per_interval` every `interval_secs`.
    pub const fn new(units_per_interval: u64, interval_secs: u64) -> Self {
        Self {
            units_per_interval,
            interval_secs,
        }
    }

    /// Return the units granted per interval.
    pub const fn units_per_interval(&self) -> u64 {
        self.units_per_interval
    }

    /// Return the interval length in seconds.
    pub const fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// Collect whatever has accrued between `last_timestamp` and `now`
    /// (both Unix seconds).
    pub fn collect(&self, now: i64, last_timestamp: i64) -> Accrual {
        collect_elapsed(
            now,
            last_timestamp,
            self.units_per_interval,
            self.interval_secs,
        )
    }
}

/// Compute whole-interval accrual between `last_timestamp` and `now`.
///
/// Returns zero units and the unchanged timestamp when less than one
/// interval has elapsed, when `now` precedes `last_timestamp`, or when
/// `interval_secs` is zero.
pub fn collect_elapsed(
    now: i64,
    last_timestamp: i64,
    units_per_interval: u64,
    interval_secs: u64,
) -> Accrual {
    let unchanged = Accrual {
        units: 0,
        new_timestamp: last_timestamp,
    };
    let Ok(interval) = i64::try_from(interval_secs) else {
        return unchanged;
    };
    let Some(elapsed) = now.checked_sub(last_timestamp) else {
        return unchanged;
    };
    if elapsed <= 0 || interval <= 0 {
        return unchanged;
    }
    let Some(whole) = elapsed.checked_div(interval) else {
        return unchanged;
    };
    if whole == 0 {
        return unchanged;
    }
    // whole * interval <= elapsed, so neither step can overflow.
    let Some(new_timestamp) = whole
        .checked_mul(interval)
        .and_then(|consumed| last_timestamp.checked_add(consumed))
    else {
        return unchanged;
    };
    let units = u64::try_from(whole)
        .map_or(u64::MAX, |w| w.saturating_mul(units_per_interval));
    Accrual {
        units,
        new_timestamp,
    }
}

// ---------------------------------------------------------------------------
// PollGate
// ---------------------------------------------------------------------------

/// Throttles a periodic check to at most once per interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollGate {
    interval: TimeDelta,
    last: Option<DateTime<Utc>>,
}

impl PollGate {
    /// Create a gate that opens at most once every `interval`.
    pub const fn new(interval: TimeDelta) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Return whether the check should run at `now`, recording `now` as
    /// the last run if so. The first call always opens, and so does a call
    /// with `now` earlier than the last run (the wall clock stepped back).
    pub fn ready(&mut self, now: DateTime<Utc>) -> bool {
        let open = self.last.is_none_or(|last| {
            let since = now.signed_duration_since(last);
            since < TimeDelta::zero() || since >= self.interval
        });
        if open {
            self.last = Some(now);
        }
        open
    }

    /// Return the instant of the last run.
    pub const fn last(&self) -> Option<DateTime<Utc>> {
        self.last
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    const HOUR: u64 = 3_600;

    #[test]
    fn accrual_preserves_partial_interval() {
        let now = 1_700_000_000_i64;
        let last = now - 12_600; // 3.5 hours
        let accrual = collect_elapsed(now, last, 1, HOUR);
        assert_eq!(accrual.units, 3);
        assert_eq!(accrual.new_timestamp, last + 10_800);
        assert_eq!(now - accrual.new_timestamp, 1_800);
    }

    #[test]
    fn accrual_below_one_interval_is_noop() {
        let accrual = collect_elapsed(1_000 + 3_599, 1_000, 1, HOUR);
        assert_eq!(
            accrual,
            Accrual {
                units: 0,
                new_timestamp: 1_000
            }
        );
    }

    #[test]
    fn accrual_ignores_future_timestamp_and_zero_interval() {
        assert_eq!(collect_elapsed(100, 500, 1, HOUR).new_timestamp, 500);
        assert_eq!(collect_elapsed(100_000, 0, 1, 0).units, 0);
    }

    #[test]
    fn accrual_scales_units_per_interval() {
        let clock = AccrualClock::new(5, 60);
        let accrual = clock.collect(600, 0);
        assert_eq!(accrual.units, 50);
        assert_eq!(accrual.new_timestamp, 600);
    }

    #[test]
    fn accrual_repeated_collection_loses_nothing() {
        let clock = AccrualClock::new(1, HOUR);
        let start = 0_i64;
        let mut stored = start;
        let mut total = 0;
        for now in [1_800, 4_000, 5_400, 7_300, 10_799, 10_800] {
            let accrual = clock.collect(now, stored);
            total += accrual.units;
            stored = accrual.new_timestamp;
        }
        assert_eq!(total, 3);
        assert_eq!(stored, 10_800);
    }

    #[test]
    fn poll_gate_throttles() {
        let t0 = DateTime::<Utc>::UNIX_EPOCH;
        let mut gate = PollGate::new(TimeDelta::milliseconds(500));
        assert!(gate.ready(t0));
        assert!(!gate.ready(t0 + TimeDelta::milliseconds(499)));
        assert!(gate.ready(t0 + TimeDelta::milliseconds(500)));
        assert_eq!(gate.last(), Some(t0 + TimeDelta::milliseconds(500)));
    }

    #[test]
    fn poll_gate_reopens_after_clock_steps_back() {
        let t0 = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        let mut gate = PollGate::new(TimeDelta::milliseconds(500));
        assert!(gate.ready(t0));
        let earlier = t0 - TimeDelta::hours(2);
        assert!(gate.ready(earlier));
        assert_eq!(gate.last(), Some(earlier));
        assert!(!gate.ready(earlier + TimeDelta::milliseconds(100)));
        assert!(gate.ready(earlier + TimeDelta::milliseconds(500)));
    }

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH);
        clock.advance(TimeDelta::seconds(90));
        assert_eq!(clock.now().timestamp(), 90);
        clock.set(DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(clock.now().timestamp(), 0);
    }
}
