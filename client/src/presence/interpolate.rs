use super::{NetworkTransform, RemotePlayer};
use bevy::prelude::*;

const TRANSLATION_DECAY_RATE: f32 = 8.0;
const ROTATION_DECAY_RATE: f32 = 24.0;

/// Farther than this from its last known pose, a cube jumps instead of gliding (meters).
const SNAP_DISTANCE_M: f32 = 10.0;

/// Ease remote cubes toward their latest published pose.
///
/// Poses arrive at most every publish interval, far below the render rate.
pub(super) fn interpolate(
    time: Res<Time>,
    mut transform_q: Query<(&mut Transform, &NetworkTransform), With<RemotePlayer>>,
) {
    let dt = time.delta_secs();
    transform_q.par_iter_mut().for_each(|(mut transform, net)| {
        if transform.translation.distance_squared(net.translation)
            > SNAP_DISTANCE_M * SNAP_DISTANCE_M
        {
            transform.translation = net.translation;
            transform.rotation = net.rotation;
            return;
        }

        transform
            .translation
            .smooth_nudge(&net.translation, TRANSLATION_DECAY_RATE, dt);
        transform.rotation = transform
            .rotation
            .slerp(net.rotation, 1.0 - (-ROTATION_DECAY_RATE * dt).exp());
    });
}
