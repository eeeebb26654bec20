//! Chopping trees from the first-person view.
//!
//! Tree state lives only on this client. A felled tree swaps to its stump and swaps back
//! once it regrows.

use crate::{
    input::InputAction,
    physics::{Physics, WorldLayout, to_vector3},
    player::FirstPersonCamera,
    world::{Stump, Tree},
};
use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use shared::{ChopOutcome, Grove, TreeId, constants::INTERACT_RANGE_M};

#[derive(Resource, Deref, DerefMut)]
pub struct GroveState(pub Grove);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, init_grove);
    app.add_systems(
        Update,
        (chop, regrow).chain(),
    );
}

fn init_grove(mut commands: Commands, layout: Res<WorldLayout>) {
    commands.insert_resource(GroveState(Grove::new(layout.tree_ids())));
}

fn chop(
    actions: Res<ActionState<InputAction>>,
    time: Res<Time>,
    physics: Res<Physics>,
    camera: Single<&GlobalTransform, With<FirstPersonCamera>>,
    mut grove: ResMut<GroveState>,
    mut trees: Query<(&Tree, &mut Visibility), Without<Stump>>,
    mut stumps: Query<(&Stump, &mut Visibility), Without<Tree>>,
) {
    if !actions.just_pressed(&InputAction::Chop) {
        return;
    }

    let origin = to_vector3(camera.translation());
    let direction = to_vector3(camera.forward().as_vec3());
    let Some(hit) = physics.cast_interaction_ray(origin, direction, INTERACT_RANGE_M) else {
        return;
    };

    match grove.chop(hit.tree, time.elapsed()) {
        ChopOutcome::Chopped { chops } => {
            info!("Chopped tree {} ({chops} chops)", hit.tree.0);
        }
        ChopOutcome::Felled => {
            info!("Tree {} felled", hit.tree.0);
            show_stump(hit.tree, true, &mut trees, &mut stumps);
        }
        ChopOutcome::AlreadyFelled => {
            debug!("Tree {} is a stump", hit.tree.0);
        }
        ChopOutcome::UnknownTree => {
            warn!("Ray hit unregistered tree {}", hit.tree.0);
        }
    }
}

fn regrow(
    time: Res<Time>,
    mut grove: ResMut<GroveState>,
    mut trees: Query<(&Tree, &mut Visibility), Without<Stump>>,
    mut stumps: Query<(&Stump, &mut Visibility), Without<Tree>>,
) {
    for id in grove.regrow(time.elapsed()) {
        info!("Tree {} grew back", id.0);
        show_stump(id, false, &mut trees, &mut stumps);
    }
}

fn show_stump(
    id: TreeId,
    felled: bool,
    trees: &mut Query<(&Tree, &mut Visibility), Without<Stump>>,
    stumps: &mut Query<(&Stump, &mut Visibility), Without<Tree>>,
) {
    let (tree_vis, stump_vis) = if felled {
        (Visibility::Hidden, Visibility::Visible)
    } else {
        (Visibility::Visible, Visibility::Hidden)
    };

    for (tree, mut visibility) in trees.iter_mut() {
        if tree.0 == id {
            *visibility = tree_vis;
        }
    }
    for (stump, mut visibility) in stumps.iter_mut() {
        if stump.0 == id {
            *visibility = stump_vis;
        }
    }
}
