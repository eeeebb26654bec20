//! Fixed layout of the world: an infinite floor and a handful of trees.
//!
//! The client renders from this layout and builds its physics world from it, so meshes and
//! colliders can never drift apart.

use crate::{
    constants::{TREE_HALF_EXTENTS_M, TREE_POSITIONS},
    harvest::TreeId,
    rapier::{ColliderShapeDef, WorldStaticDef},
};
use rapier3d::{na::UnitQuaternion, prelude::*};

/// A tree placement: which tree, and where its trunk stands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeSpawn {
    pub id: TreeId,
    pub position: Vector<f32>,
}

#[derive(Clone, Debug)]
pub struct SceneLayout {
    pub floor: WorldStaticDef,
    pub trees: Vec<TreeSpawn>,
    pub tree_half_extents: Vector<f32>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            // Ground plane at y = 0, normal +Y.
            floor: WorldStaticDef {
                id: 0,
                translation: Vector::zeros(),
                rotation: UnitQuaternion::identity(),
                shape: ColliderShapeDef::Plane {
                    offset_along_normal: 0.0,
                },
            },
            trees: TREE_POSITIONS
                .iter()
                .enumerate()
                .map(|(i, p)| TreeSpawn {
                    id: TreeId(i as u32),
                    position: Vector::from(*p),
                })
                .collect(),
            tree_half_extents: Vector::from(TREE_HALF_EXTENTS_M),
        }
    }
}

impl SceneLayout {
    /// Ids of every tree, in placement order.
    pub fn tree_ids(&self) -> impl Iterator<Item = TreeId> + '_ {
        self.trees.iter().map(|t| t.id)
    }

    /// Static collider definition for one tree.
    ///
    /// The box is centered on the trunk base, so half of it sits below the floor.
    pub fn tree_def(&self, tree: &TreeSpawn) -> WorldStaticDef {
        WorldStaticDef {
            // Floor takes id 0.
            id: tree.id.0 + 1,
            translation: tree.position,
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: self.tree_half_extents,
            },
        }
    }

    /// Every static collider, tagged with the tree it belongs to (if any).
    pub fn statics(&self) -> Vec<(WorldStaticDef, Option<TreeId>)> {
        std::iter::once((self.floor.clone(), None))
            .chain(self.trees.iter().map(|t| (self.tree_def(t), Some(t.id))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_floor_and_every_tree() {
        let layout = SceneLayout::default();
        let statics = layout.statics();

        assert_eq!(statics.len(), 1 + TREE_POSITIONS.len());
        assert!(matches!(statics[0].0.shape, ColliderShapeDef::Plane { .. }));
        assert_eq!(statics[0].1, None);

        let trees: Vec<_> = statics.iter().filter_map(|(_, t)| *t).collect();
        assert_eq!(trees, layout.tree_ids().collect::<Vec<_>>());
    }

    #[test]
    fn static_ids_are_unique() {
        let layout = SceneLayout::default();
        let mut ids: Vec<u32> = layout.statics().iter().map(|(d, _)| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), layout.statics().len());
    }

    #[test]
    fn tree_defs_sit_at_their_spawn_points() {
        let layout = SceneLayout::default();
        for (tree, expected) in layout.trees.iter().zip(TREE_POSITIONS) {
            let def = layout.tree_def(tree);
            assert_eq!(def.translation, Vector::from(expected));
            assert_eq!(
                def.shape,
                ColliderShapeDef::Cuboid {
                    half_extents: Vector::from(TREE_HALF_EXTENTS_M)
                }
            );
        }
    }
}
