//! Static scenery: sky, floor, lights, and one tree (plus its hidden stump) per spawn point.
//!
//! Meshes are placed from the same `SceneLayout` the physics world was built from.

use crate::physics::{WorldLayout, to_vec3};
use bevy::prelude::*;
use shared::{
    TreeId,
    constants::{FLOOR_COLOR, FLOOR_SIZE_M, SKY_COLOR, rgb_bytes},
};

const TREE_SCENE: &str = "objects/tree/tree.glb";
const STUMP_SCENE: &str = "objects/stump/stump.glb";

/// Rendered tree, visible while standing.
#[derive(Component, Debug, Clone, Copy)]
pub struct Tree(pub TreeId);

/// Rendered stump, visible while the tree is felled.
#[derive(Component, Debug, Clone, Copy)]
pub struct Stump(pub TreeId);

pub(super) fn plugin(app: &mut App) {
    let [r, g, b] = rgb_bytes(SKY_COLOR);
    app.insert_resource(ClearColor(Color::srgb_u8(r, g, b)));
    app.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
        ..default()
    });
    app.add_systems(Startup, setup);
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    layout: Res<WorldLayout>,
) {
    let [r, g, b] = rgb_bytes(FLOOR_COLOR);
    commands.spawn((
        Name::new("Floor"),
        Transform::from_translation(to_vec3(&layout.floor.translation)),
        Mesh3d(meshes.add(
            Plane3d::default()
                .mesh()
                .size(FLOOR_SIZE_M, FLOOR_SIZE_M)
                .build(),
        )),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(r, g, b),
            unlit: true,
            ..default()
        })),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: light_consts::lux::OVERCAST_DAY,
            ..default()
        },
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let tree_scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(TREE_SCENE));
    let stump_scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(STUMP_SCENE));

    for spawn in &layout.trees {
        let at = Transform::from_translation(to_vec3(&spawn.position));
        commands.spawn((
            Name::new(format!("Tree {}", spawn.id.0)),
            Tree(spawn.id),
            SceneRoot(tree_scene.clone()),
            at,
            Visibility::Visible,
        ));
        commands.spawn((
            Name::new(format!("Stump {}", spawn.id.0)),
            Stump(spawn.id),
            SceneRoot(stump_scene.clone()),
            at,
            Visibility::Hidden,
        ));
    }
    info!("World setup: {} trees", layout.trees.len());
}
