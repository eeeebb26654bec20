//! Local rigid-body simulation, stepped on Bevy's fixed clock.

use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use shared::{
    SceneLayout,
    constants::{FIXED_TIMESTEP_HZ, PLAYER_SPAWN},
    rapier_world::PhysicsWorld,
};

#[derive(Resource, Deref, DerefMut)]
pub struct Physics(pub PhysicsWorld);

/// Layout the physics world was built from; rendering places meshes from the same data.
#[derive(Resource, Deref)]
pub struct WorldLayout(pub SceneLayout);

/// Runs in `FixedUpdate`: forces are set before this, reads happen after.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    ApplyForces,
    Step,
}

pub(super) fn plugin(app: &mut App) {
    let layout = SceneLayout::default();
    app.insert_resource(Physics(PhysicsWorld::new(
        &layout,
        Vector3::from(PLAYER_SPAWN),
    )));
    app.insert_resource(WorldLayout(layout));

    app.insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ));
    app.configure_sets(FixedUpdate, (PhysicsSet::ApplyForces, PhysicsSet::Step).chain());
    app.add_systems(FixedUpdate, step.in_set(PhysicsSet::Step));
}

fn step(mut physics: ResMut<Physics>) {
    physics.step();
}

pub fn to_vec3(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_vector3(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub fn to_quat(q: &UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

pub fn to_unit_quaternion(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::new_normalize(nalgebra::Quaternion::new(q.w, q.x, q.y, q.z))
}
