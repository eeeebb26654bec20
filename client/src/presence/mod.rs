//! Other players, mirrored from the `player` table, and publishing our own pose into it.

mod interpolate;
mod publish;
mod replication;

use crate::server::is_connected;
use bevy::{platform::collections::HashMap, prelude::*};
use shared::PublishGate;
use spacetimedb_sdk::Identity;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(RemotePlayerEntityMapping::default());
    app.insert_resource(LocalPublishGate::default());
    app.add_systems(Startup, replication::init_remote_player_assets);
    app.add_systems(
        PreUpdate,
        (
            replication::on_player_deleted,
            replication::on_player_inserted,
            replication::on_settings_changed,
        ),
    );
    app.add_systems(
        PostUpdate,
        (replication::sync_transform, interpolate::interpolate).chain(),
    );
    app.add_systems(Update, publish::publish_local_pose.run_if(is_connected));
}

/// Ties a remote identity to the Bevy entity that renders it.
#[derive(Resource, Default)]
pub struct RemotePlayerEntityMapping(pub HashMap<Identity, Entity>);

#[derive(Resource, Default, Deref, DerefMut)]
pub struct LocalPublishGate(pub PublishGate);

/// Latest transform received for a remote player; the rendered `Transform` eases toward it.
#[derive(Component)]
pub struct NetworkTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

#[derive(Component)]
pub struct RemotePlayer(pub Identity);
