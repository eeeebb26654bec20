//! Rapier simulation world for the local player.
//!
//! The world holds the immutable scene colliders (floor half-space, one box per tree) and
//! a single dynamic sphere that carries the first-person camera. Both the client and tests
//! drive it the same way: set the movement force, then advance one fixed step.
//!
//! Design notes
//! - Deterministic build: statics are inserted in ascending `id` order.
//! - Forces are replaced every step, never accumulated across steps.
//! - Scene queries go through a borrowed `QueryPipeline` built from the broad phase, so
//!   they always see the state of the last step.

// Re-export Rapier so downstream crates can use its macros/types without depending on
// `rapier3d` directly.
pub use rapier3d;

use crate::{
    constants::{
        FIXED_TIMESTEP_HZ, GRAVITY_Y_MPS2, PLAYER_ANGULAR_DAMPING, PLAYER_BODY_MASS_KG,
        PLAYER_BODY_RADIUS_M, PLAYER_LINEAR_DAMPING,
    },
    harvest::TreeId,
    rapier::static_collider,
    scene::SceneLayout,
};
use rapier3d::prelude::*;
use std::collections::HashMap;

/// The nearest tree under an interaction ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionHit {
    pub tree: TreeId,
    /// Distance along the (normalized) ray to the hit point (meters).
    pub toi: f32,
}

pub struct PhysicsWorld {
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    player: RigidBodyHandle,
    trees: HashMap<ColliderHandle, TreeId>,
}

impl PhysicsWorld {
    /// Build the world from a scene layout and drop the player sphere at `spawn`.
    ///
    /// One step is taken before returning so the broad phase knows every collider and
    /// interaction rays work immediately.
    pub fn new(layout: &SceneLayout, spawn: Vector<f32>) -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut trees = HashMap::new();

        let mut statics = layout.statics();
        statics.sort_by_key(|(def, _)| def.id);
        for (def, tree) in statics {
            let handle = colliders.insert(static_collider(&def));
            if let Some(tree) = tree {
                trees.insert(handle, tree);
            }
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(spawn)
            .linear_damping(damping_coefficient(PLAYER_LINEAR_DAMPING))
            .angular_damping(damping_coefficient(PLAYER_ANGULAR_DAMPING))
            .build();
        let player = bodies.insert(body);
        colliders.insert_with_parent(
            ColliderBuilder::ball(PLAYER_BODY_RADIUS_M)
                .mass(PLAYER_BODY_MASS_KG)
                .build(),
            player,
            &mut bodies,
        );

        let mut world = Self {
            gravity: vector![0.0, GRAVITY_Y_MPS2, 0.0],
            integration_parameters: IntegrationParameters {
                dt: (1.0 / FIXED_TIMESTEP_HZ) as f32,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            player,
            trees,
        };
        world.step();
        world
    }

    /// Fixed step length in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Mass of the player body (kilograms).
    pub fn player_mass(&self) -> f32 {
        self.bodies
            .get(self.player)
            .map(|body| body.mass())
            .unwrap_or(PLAYER_BODY_MASS_KG)
    }

    /// Replace the force acting on the player body's center of mass.
    pub fn set_player_force(&mut self, force: Vector<f32>) {
        if let Some(body) = self.bodies.get_mut(self.player) {
            body.reset_forces(false);
            if force != Vector::zeros() {
                body.add_force(force, true);
            }
        }
    }

    /// Advance the simulation by one fixed step.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// World-space center of the player body.
    pub fn player_translation(&self) -> Vector<f32> {
        self.bodies
            .get(self.player)
            .map(|body| *body.translation())
            .unwrap_or_else(Vector::zeros)
    }

    pub fn player_linear_velocity(&self) -> Vector<f32> {
        self.bodies
            .get(self.player)
            .map(|body| *body.linvel())
            .unwrap_or_else(Vector::zeros)
    }

    /// Cast a ray from `origin` along `direction` and report the tree it hits first.
    ///
    /// The player's own sphere is ignored. Returns `None` when the nearest hit is not a
    /// tree (e.g. the floor), when nothing is hit within `max_toi`, or when `direction`
    /// has no length.
    pub fn cast_interaction_ray(
        &self,
        origin: Vector<f32>,
        direction: Vector<f32>,
        max_toi: f32,
    ) -> Option<InteractionHit> {
        let direction = direction.try_normalize(f32::EPSILON)?;
        let ray = Ray::new(Point::from(origin), direction);

        let filter = QueryFilter::default().exclude_rigid_body(self.player);
        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );

        let (handle, toi) = query_pipeline.cast_ray(&ray, max_toi.max(0.0), true)?;
        self.trees
            .get(&handle)
            .map(|&tree| InteractionHit { tree, toi })
    }
}

/// Rapier damping coefficient that removes `fraction_per_second` of a velocity each second.
///
/// Rapier scales velocity by `1 / (1 + dt * c)` per step, which over one second of small
/// steps approaches `exp(-c)`. Solving `exp(-c) = 1 - fraction` gives `c = -ln(1 - fraction)`.
pub fn damping_coefficient(fraction_per_second: f32) -> f32 {
    let retained = (1.0 - fraction_per_second.clamp(0.0, 1.0)).max(1.0e-6);
    -retained.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PLAYER_SPAWN, TREE_POSITIONS};

    fn spawn() -> Vector<f32> {
        Vector::from(PLAYER_SPAWN)
    }

    fn settled_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::new(&SceneLayout::default(), spawn());
        for _ in 0..180 {
            world.step();
        }
        world
    }

    #[test]
    fn damping_fraction_maps_to_exponential_rate() {
        assert!((damping_coefficient(0.9) - 10.0_f32.ln()).abs() < 1.0e-5);
        assert_eq!(damping_coefficient(0.0), 0.0);
        assert!(damping_coefficient(1.0).is_finite());
    }

    #[test]
    fn player_falls_and_rests_on_the_floor() {
        let world = settled_world();
        let t = world.player_translation();

        assert!((t.y - PLAYER_BODY_RADIUS_M).abs() < 0.05, "resting y = {}", t.y);
        assert!(world.player_linear_velocity().norm() < 0.05);
    }

    #[test]
    fn player_mass_matches_configuration() {
        let world = PhysicsWorld::new(&SceneLayout::default(), spawn());
        assert!((world.player_mass() - PLAYER_BODY_MASS_KG).abs() < 1.0e-3);
    }

    #[test]
    fn forward_force_moves_player_along_the_floor() {
        let mut world = settled_world();
        let start = world.player_translation();

        world.set_player_force(vector![0.0, 0.0, -25.0]);
        for _ in 0..120 {
            world.step();
        }

        let end = world.player_translation();
        assert!(end.z < start.z - 0.5, "moved from {} to {}", start.z, end.z);
        assert!((end.x - start.x).abs() < 1.0e-2);
        assert!((end.y - PLAYER_BODY_RADIUS_M).abs() < 0.05);
    }

    #[test]
    fn setting_force_twice_does_not_accumulate() {
        let mut once = settled_world();
        let mut twice = settled_world();
        let force = vector![10.0, 0.0, 0.0];

        once.set_player_force(force);
        twice.set_player_force(force);
        twice.set_player_force(force);
        once.step();
        twice.step();

        let dv = once.player_linear_velocity() - twice.player_linear_velocity();
        assert!(dv.norm() < 1.0e-6);
    }

    #[test]
    fn clearing_force_lets_damping_stop_the_player() {
        let mut world = settled_world();
        world.set_player_force(vector![25.0, 0.0, 0.0]);
        for _ in 0..60 {
            world.step();
        }
        let moving = world.player_linear_velocity().norm();

        world.set_player_force(Vector::zeros());
        for _ in 0..240 {
            world.step();
        }
        assert!(world.player_linear_velocity().norm() < moving * 0.1);
    }

    #[test]
    fn ray_hits_tree_and_skips_player_sphere() {
        let world = PhysicsWorld::new(&SceneLayout::default(), spawn());
        let [x, _, z] = TREE_POSITIONS[0];

        // Start inside the player sphere, aim at the first tree's trunk.
        let origin = spawn();
        let target = vector![x, 1.0, z];
        let hit = world
            .cast_interaction_ray(origin, target - origin, 1000.0)
            .expect("tree should be hit");

        assert_eq!(hit.tree, TreeId(0));
        assert!(hit.toi > 0.0 && hit.toi < (target - origin).norm());
    }

    #[test]
    fn ray_reports_nothing_for_floor_sky_or_out_of_range() {
        let world = PhysicsWorld::new(&SceneLayout::default(), spawn());
        let origin = spawn();

        assert_eq!(
            world.cast_interaction_ray(origin, vector![0.0, -1.0, 0.0], 1000.0),
            None
        );
        assert_eq!(
            world.cast_interaction_ray(origin, vector![0.0, 1.0, 0.0], 1000.0),
            None
        );

        let [x, _, z] = TREE_POSITIONS[1];
        let toward_tree = vector![x, 1.0, z] - origin;
        assert_eq!(world.cast_interaction_ray(origin, toward_tree, 1.0), None);
    }

    #[test]
    fn zero_length_ray_is_rejected() {
        let world = PhysicsWorld::new(&SceneLayout::default(), spawn());
        assert_eq!(
            world.cast_interaction_ray(spawn(), Vector::zeros(), 1000.0),
            None
        );
    }
}
