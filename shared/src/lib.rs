pub mod constants;
pub mod controls;
pub mod error;
pub mod harvest;
pub mod presence;
pub mod rapier;
pub mod rapier_world;
pub mod scene;

pub use controls::{LookController, MovementInput, movement_force, wrap_angle};
pub use error::PresenceError;
pub use harvest::{ChopOutcome, Grove, TreeId, TreeState};
pub use presence::{PlayerPose, PublishGate, is_stale, validate_pose};
pub use rapier::{ColliderShapeDef, WorldStaticDef, collider_from_def, static_collider};
pub use rapier_world::{InteractionHit, PhysicsWorld, damping_coefficient};
pub use scene::{SceneLayout, TreeSpawn};
