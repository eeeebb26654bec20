use rapier3d::{na::UnitQuaternion, prelude::*};

/// Canonical, renderer-agnostic definition of an immutable world collider.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable id; the physics world inserts statics in ascending id order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
}

/// Supported static collider shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space).
    ///
    /// The plane normal is derived from the pose as `rotation * +Y`. Any X/Z size seen in
    /// the renderer is a mesh concern only; collision is unbounded.
    Plane {
        /// Offset along the plane normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },
}

impl WorldStaticDef {
    /// Pose of the definition as a Rapier isometry.
    pub fn isometry(&self) -> Isometry<f32> {
        Isometry::from_parts(self.translation.into(), self.rotation)
    }
}

/// Build a parentless, world-placed Rapier collider from a `WorldStaticDef`.
///
/// Planes come out of [`collider_from_def`] already placed. Every other shape is built
/// around the origin and moved to the definition's pose here.
pub fn static_collider(def: &WorldStaticDef) -> Collider {
    let mut collider = collider_from_def(def);
    if !matches!(def.shape, ColliderShapeDef::Plane { .. }) {
        collider.set_position(def.isometry());
    }
    collider
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// Shapes other than planes get an identity local transform. A half-space is placed by
/// its own translation along the world normal, so a plane collider must not be parented
/// to a body that also carries the definition's pose.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // n = R * +Y, and the plane is n ⋅ x = dist with dist = n ⋅ t + offset.
            let n = def.rotation * Vector::y();
            let dist = n.dot(&def.translation) + *offset_along_normal;

            // Rotation is already unit, so this normalization is a no-op guard.
            let unit_n = UnitVector::new_normalize(n);

            ColliderBuilder::new(SharedShape::new(HalfSpace::new(unit_n)))
                .translation(unit_n.into_inner() * dist)
                .build()
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }
    }
}
