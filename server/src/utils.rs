use spacetimedb::{TimeDuration, Timestamp};

/// Seconds elapsed from `last` to `now`, or `None` if `now` is earlier.
pub fn get_variable_delta_time(now: Timestamp, last: Timestamp) -> Option<f32> {
    now.time_duration_since(last)
        .map(|dur| dur.to_micros() as f32 / 1_000_000.0)
}

/// A schedule interval from a millisecond setting, never shorter than one millisecond.
pub fn interval_from_millis(ms: u64) -> TimeDuration {
    let micros = ms.max(1).saturating_mul(1_000);
    TimeDuration::from_micros(i64::try_from(micros).unwrap_or(i64::MAX))
}
