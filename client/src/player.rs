//! First-person player: a camera riding on the physics sphere.
//!
//! Look is integrated every frame while steering. Movement force is recomputed every fixed
//! step from the held keys and the current yaw, so holding a key gives a steady push.

use crate::{
    input::InputAction,
    physics::{Physics, PhysicsSet, to_quat, to_vec3},
};
use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use nalgebra::Vector2;
use shared::{
    LookController, MovementInput,
    constants::{CAMERA_FAR_M, CAMERA_FOV_DEG, CAMERA_NEAR_M, PLAYER_SPAWN},
    movement_force,
};

#[derive(Component)]
pub struct FirstPersonCamera;

#[derive(Resource, Default, Deref, DerefMut)]
pub struct Look(pub LookController);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Look>();
    app.add_systems(Startup, spawn_camera);
    app.add_systems(
        FixedUpdate,
        apply_movement_force.in_set(PhysicsSet::ApplyForces),
    );
    app.add_systems(Update, (steer_look, follow_body).chain());
}

fn spawn_camera(mut commands: Commands, look: Res<Look>) {
    commands.spawn((
        Name::new("FirstPersonCamera"),
        FirstPersonCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEG.to_radians(),
            near: CAMERA_NEAR_M,
            far: CAMERA_FAR_M,
            ..default()
        }),
        Transform {
            translation: Vec3::from(PLAYER_SPAWN),
            rotation: to_quat(&look.rotation()),
            ..default()
        },
    ));
}

fn movement_input(actions: &ActionState<InputAction>) -> MovementInput {
    MovementInput {
        forward: actions.pressed(&InputAction::MoveForward),
        backward: actions.pressed(&InputAction::MoveBackward),
        left: actions.pressed(&InputAction::StrafeLeft),
        right: actions.pressed(&InputAction::StrafeRight),
    }
}

fn apply_movement_force(
    actions: Res<ActionState<InputAction>>,
    look: Res<Look>,
    mut physics: ResMut<Physics>,
) {
    let mass = physics.player_mass();
    let force = movement_force(movement_input(&actions), &look.0, mass);
    physics.set_player_force(force);
}

fn steer_look(actions: Res<ActionState<InputAction>>, time: Res<Time>, mut look: ResMut<Look>) {
    if !actions.pressed(&InputAction::Steer) {
        return;
    }
    let delta = actions.axis_pair(&InputAction::Look);
    look.apply_mouse(Vector2::new(delta.x, delta.y), time.delta_secs());
}

fn follow_body(
    physics: Res<Physics>,
    look: Res<Look>,
    mut camera: Single<&mut Transform, With<FirstPersonCamera>>,
) {
    camera.translation = to_vec3(&physics.player_translation());
    camera.rotation = to_quat(&look.rotation());
}
