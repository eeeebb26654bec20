use std::{f32::consts::FRAC_PI_2, time::Duration};

/// Vertical gravity applied to every dynamic body (m/s²).
pub const GRAVITY_Y_MPS2: f32 = -9.82;

/// Physics steps per second. The world is always advanced by `1 / FIXED_TIMESTEP_HZ`.
pub const FIXED_TIMESTEP_HZ: f64 = 60.0;

/// Radius of the sphere that carries the first-person camera (meters).
pub const PLAYER_BODY_RADIUS_M: f32 = 1.0;

/// Mass of the player body (kilograms).
pub const PLAYER_BODY_MASS_KG: f32 = 5.0;

/// Fraction of linear velocity the player body loses every second.
///
/// Converted to a Rapier damping coefficient by [`crate::rapier_world::damping_coefficient`].
pub const PLAYER_LINEAR_DAMPING: f32 = 0.9;

/// Fraction of angular velocity the player body loses every second.
pub const PLAYER_ANGULAR_DAMPING: f32 = 0.9;

/// Where the player body (and therefore the camera) starts.
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 2.0, 0.0];

/// Movement acceleration per held direction key (m/s²).
///
/// The applied force is `MOVE_SPEED * mass`, so the body accelerates at this rate
/// regardless of its mass.
pub const MOVE_SPEED: f32 = 5.0;

/// Mouse look sensitivity in radians per pixel per second.
pub const LOOK_SPEED: f32 = 0.2;

/// Pitch is clamped to `[-PITCH_LIMIT_RAD, PITCH_LIMIT_RAD]`.
pub const PITCH_LIMIT_RAD: f32 = FRAC_PI_2;

/// Edge length of the rendered floor (meters). Collision uses an infinite half-space.
pub const FLOOR_SIZE_M: f32 = 100.0;

/// Half extents of the static box collider that stands in for every tree.
pub const TREE_HALF_EXTENTS_M: [f32; 3] = [1.0, 2.0, 1.0];

/// Tree placements on the floor, in world space.
pub const TREE_POSITIONS: [[f32; 3]; 4] = [
    [2.0, 0.0, -5.0],
    [5.0, 0.0, -5.0],
    [-5.0, 0.0, -5.0],
    [-5.0, 0.0, 1.0],
];

/// Number of chops it takes to fell a standing tree.
pub const CHOPS_TO_FELL: u8 = 5;

/// How long a felled tree stays a stump before it grows back.
pub const TREE_RESPAWN_DELAY: Duration = Duration::from_secs(15);

/// Longest interaction ray (meters). Matches the camera far plane.
pub const INTERACT_RANGE_M: f32 = 1000.0;

/// Presence rows that have not been refreshed for longer than this are evicted.
pub const STALE_PLAYER_AFTER: Duration = Duration::from_secs(10);

/// How often the server sweeps the presence table for stale rows.
pub const PRESENCE_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Minimum spacing between two transform writes from the same client.
pub const PRESENCE_PUBLISH_INTERVAL: Duration = Duration::from_millis(50);

/// A standing-still client still writes this often so it is not considered stale.
pub const PRESENCE_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(2);

/// Translation change (meters) below which a pose counts as unchanged.
pub const POSE_TRANSLATION_EPS_M: f32 = 1.0e-3;

/// Rotation change (radians) below which a pose counts as unchanged.
pub const POSE_ROTATION_EPS_RAD: f32 = 1.0e-3;

/// Vertical field of view of the first-person camera (degrees).
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR_M: f32 = 0.1;
pub const CAMERA_FAR_M: f32 = 1000.0;

/// Sky blue.
pub const SKY_COLOR: u32 = 0x87_ce_eb;
/// Pale mint floor.
pub const FLOOR_COLOR: u32 = 0x8c_fd_c1;
/// Remote players render as plain red cubes.
pub const REMOTE_PLAYER_COLOR: u32 = 0xff_00_00;
/// Edge length of a remote player cube (meters).
pub const REMOTE_PLAYER_CUBE_M: f32 = 1.0;

/// Splits a packed `0xRRGGBB` color into its byte channels.
#[inline]
pub const fn rgb_bytes(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_bytes_splits_channels() {
        assert_eq!(rgb_bytes(SKY_COLOR), [0x87, 0xce, 0xeb]);
        assert_eq!(rgb_bytes(REMOTE_PLAYER_COLOR), [0xff, 0x00, 0x00]);
    }

    #[test]
    fn presence_timing_is_consistent() {
        // A client that only heartbeats must still refresh well inside the stale window.
        assert!(PRESENCE_HEARTBEAT_INTERVAL < STALE_PLAYER_AFTER);
        assert!(PRESENCE_PUBLISH_INTERVAL < PRESENCE_HEARTBEAT_INTERVAL);
        assert!(PRESENCE_SWEEP_INTERVAL < STALE_PLAYER_AFTER);
    }
}
