use shared::constants::{
    PRESENCE_HEARTBEAT_INTERVAL, PRESENCE_PUBLISH_INTERVAL, PRESENCE_SWEEP_INTERVAL,
    STALE_PLAYER_AFTER,
};
use spacetimedb::*;
use std::time::Duration;

/// Presence timing shared by the server and every client.
///
/// Single-row table (`id = 1`). The server reads it to schedule and judge the stale
/// sweep; clients subscribe to it to pace their transform writes.
#[table(name = presence_settings, public)]
pub struct PresenceSettings {
    /// Unique id (primary key). Use a single row with `id = 1`.
    #[primary_key]
    pub id: u32,

    /// Rows older than this are evicted (milliseconds).
    pub stale_after_ms: u64,

    /// Period of the eviction sweep (milliseconds).
    pub sweep_interval_ms: u64,

    /// Minimum spacing between two writes from one client (milliseconds).
    pub publish_interval_ms: u64,

    /// An idle client still writes this often (milliseconds).
    pub heartbeat_interval_ms: u64,
}

impl Default for PresenceSettings {
    fn default() -> Self {
        Self {
            id: 1,
            stale_after_ms: millis(STALE_PLAYER_AFTER),
            sweep_interval_ms: millis(PRESENCE_SWEEP_INTERVAL),
            publish_interval_ms: millis(PRESENCE_PUBLISH_INTERVAL),
            heartbeat_interval_ms: millis(PRESENCE_HEARTBEAT_INTERVAL),
        }
    }
}

impl PresenceSettings {
    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}
