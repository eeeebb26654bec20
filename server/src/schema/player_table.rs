use crate::types::{DbQuat, DbVec3};
use spacetimedb::*;

/// Presence row: the last transform a connected client published.
///
/// Rows are created by the first `update_player` call, refreshed by every later one, and
/// removed on disconnect or by the stale sweep. `last_updated` is always the server's
/// timestamp for the write.
#[table(name = player, public)]
pub struct Player {
    #[primary_key]
    pub identity: Identity,

    /// Camera/body position in world space (meters).
    pub translation: DbVec3,
    /// Camera orientation (unit quaternion).
    pub rotation: DbQuat,

    pub last_updated: Timestamp,
}
