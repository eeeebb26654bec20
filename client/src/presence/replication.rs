use super::{LocalPublishGate, NetworkTransform, RemotePlayer, RemotePlayerEntityMapping};
use crate::{
    module_bindings::{Player, PresenceSettings},
    server::ServerSession,
};
use bevy::prelude::*;
use bevy_spacetimedb::{ReadDeleteMessage, ReadInsertMessage, ReadUpdateMessage};
use shared::constants::{REMOTE_PLAYER_COLOR, REMOTE_PLAYER_CUBE_M, rgb_bytes};
use std::time::Duration;

#[derive(Resource)]
pub(super) struct RemotePlayerAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

pub(super) fn init_remote_player_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let [r, g, b] = rgb_bytes(REMOTE_PLAYER_COLOR);
    commands.insert_resource(RemotePlayerAssets {
        mesh: meshes.add(Cuboid::from_length(REMOTE_PLAYER_CUBE_M)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb_u8(r, g, b),
            ..default()
        }),
    });
}

fn is_local(session: &ServerSession, row: &Player) -> bool {
    session.identity == Some(row.identity)
}

pub(super) fn on_player_deleted(
    mut commands: Commands,
    mut msgs: ReadDeleteMessage<Player>,
    mut mapping: ResMut<RemotePlayerEntityMapping>,
) {
    for msg in msgs.read() {
        if let Some(entity) = mapping.0.remove(&msg.row.identity) {
            info!("Player left: {:?}", msg.row.identity);
            commands.entity(entity).despawn();
        }
    }
}

pub(super) fn on_player_inserted(
    mut commands: Commands,
    mut msgs: ReadInsertMessage<Player>,
    session: Res<ServerSession>,
    assets: Res<RemotePlayerAssets>,
    mut mapping: ResMut<RemotePlayerEntityMapping>,
) {
    for msg in msgs.read() {
        let row = &msg.row;
        // Our own row only exists for everyone else.
        if is_local(&session, row) || mapping.0.contains_key(&row.identity) {
            continue;
        }

        let translation: Vec3 = row.translation.clone().into();
        let rotation: Quat = row.rotation.clone().into();

        let entity = commands
            .spawn((
                Name::new(format!("RemotePlayer {}", row.identity)),
                RemotePlayer(row.identity),
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                Transform::from_translation(translation).with_rotation(rotation),
                NetworkTransform {
                    translation,
                    rotation,
                },
            ))
            .id();

        info!("Player joined: {:?}", row.identity);
        mapping.0.insert(row.identity, entity);
    }
}

pub(super) fn sync_transform(
    mut player_q: Query<&mut NetworkTransform, With<RemotePlayer>>,
    mut messages: ReadUpdateMessage<Player>,
    mapping: Res<RemotePlayerEntityMapping>,
) {
    for msg in messages.read() {
        let Some(entity) = mapping.0.get(&msg.new.identity) else {
            continue;
        };
        let Ok(mut network_transform) = player_q.get_mut(*entity) else {
            continue;
        };

        network_transform.translation = msg.new.translation.clone().into();
        network_transform.rotation = msg.new.rotation.clone().into();
    }
}

/// Adopt the server's publish pacing whenever the settings row arrives or changes.
pub(super) fn on_settings_changed(
    mut inserted: ReadInsertMessage<PresenceSettings>,
    mut updated: ReadUpdateMessage<PresenceSettings>,
    mut gate: ResMut<LocalPublishGate>,
) {
    let latest = inserted
        .read()
        .map(|msg| msg.row.clone())
        .chain(updated.read().map(|msg| msg.new.clone()))
        .last();

    if let Some(settings) = latest {
        let min_interval = Duration::from_millis(settings.publish_interval_ms);
        let heartbeat = Duration::from_millis(settings.heartbeat_interval_ms);
        gate.set_intervals(min_interval, heartbeat);
        debug!("Presence pacing: every {min_interval:?}, heartbeat {heartbeat:?}");
    }
}
