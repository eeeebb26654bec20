//! Stale presence eviction.
//!
//! This file contains:
//! - `PresenceSweepTimer` scheduled table
//! - `init(ctx, settings)` to (re)schedule the sweep
//! - `evict_stale_players` scheduled reducer
//!
//! Clients that vanish without a clean disconnect stop refreshing their row; the sweep
//! removes any row whose server-side `last_updated` is older than the configured window.

use crate::{
    schema::*,
    utils::{get_variable_delta_time, interval_from_millis},
};
use shared::presence::is_stale;
use spacetimedb::{Identity, ReducerContext, ScheduleAt, Table, Timestamp};

/// Scheduled timer for the presence sweep.
///
/// Scheduled tables must include a `scheduled_id: u64` primary key with `#[auto_inc]`.
#[spacetimedb::table(name = presence_sweep_timer, scheduled(evict_stale_players))]
pub struct PresenceSweepTimer {
    /// Primary key for the scheduled job (single row used).
    #[primary_key]
    #[auto_inc]
    pub scheduled_id: u64,

    pub scheduled_at: ScheduleAt,

    /// Timestamp of the previous sweep.
    pub last_tick: Timestamp,
}

/// Schedule the sweep at the configured interval, replacing any previous schedule.
pub fn init(ctx: &ReducerContext, settings: &PresenceSettings) {
    ctx.db.presence_sweep_timer().scheduled_id().delete(1);
    ctx.db.presence_sweep_timer().insert(PresenceSweepTimer {
        scheduled_id: 1,
        scheduled_at: ScheduleAt::Interval(interval_from_millis(settings.sweep_interval_ms)),
        last_tick: ctx.timestamp,
    });
}

#[spacetimedb::reducer]
pub fn evict_stale_players(
    ctx: &ReducerContext,
    mut timer: PresenceSweepTimer,
) -> Result<(), String> {
    // Only the server (module identity) may invoke scheduled reducers.
    if ctx.sender != ctx.identity() {
        return Err("`evict_stale_players` may not be invoked by clients.".into());
    }

    let Some(settings) = ctx.db.presence_settings().id().find(1) else {
        return Err("`evict_stale_players` couldn't find presence settings.".into());
    };

    if let Some(dt) = get_variable_delta_time(ctx.timestamp, timer.last_tick) {
        log::debug!("Presence sweep after {dt:.2}s");
    }

    let now_us = ctx.timestamp.to_micros_since_unix_epoch();
    let threshold = settings.stale_after();

    let stale: Vec<Identity> = ctx
        .db
        .player()
        .iter()
        .filter(|p| is_stale(now_us, p.last_updated.to_micros_since_unix_epoch(), threshold))
        .map(|p| p.identity)
        .collect();

    for identity in &stale {
        ctx.db.player().identity().delete(identity);
    }
    if !stale.is_empty() {
        log::info!("Evicted {} stale player(s)", stale.len());
    }

    timer.last_tick = ctx.timestamp;
    ctx.db.presence_sweep_timer().scheduled_id().update(timer);

    Ok(())
}
