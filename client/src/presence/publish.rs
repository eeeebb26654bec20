use super::LocalPublishGate;
use crate::{
    module_bindings::update_player_reducer::update_player,
    physics::{to_unit_quaternion, to_vector3},
    player::FirstPersonCamera,
    server::SpacetimeDB,
};
use bevy::prelude::*;
use shared::PlayerPose;

/// Write the camera pose to the `player` table when the gate allows it.
pub(super) fn publish_local_pose(
    time: Res<Time>,
    camera: Single<&Transform, With<FirstPersonCamera>>,
    mut gate: ResMut<LocalPublishGate>,
    stdb: SpacetimeDB,
) {
    let now = time.elapsed();
    let pose = PlayerPose::new(
        to_vector3(camera.translation),
        to_unit_quaternion(camera.rotation),
    );
    if !gate.should_publish(now, &pose) {
        return;
    }

    match stdb
        .reducers()
        .update_player(camera.translation.into(), camera.rotation.into())
    {
        Ok(()) => gate.mark_published(now, pose),
        Err(err) => warn!("Failed to send update_player: {err}"),
    }
}
