//! Frame-time and entity diagnostics overlay for native dev builds.

use crate::{physics::Physics, presence::RemotePlayerEntityMapping};
use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use bevy::{prelude::*, time::common_conditions::on_timer};
use iyes_perf_ui::prelude::*;
use std::time::Duration;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, log_physics_body.run_if(on_timer(Duration::from_secs(5))));
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn log_physics_body(physics: Res<Physics>, remotes: Res<RemotePlayerEntityMapping>) {
    let t = physics.player_translation();
    let v = physics.player_linear_velocity();
    debug!(
        "body at ({:.2}, {:.2}, {:.2}) moving {:.2} m/s; {} remote player(s)",
        t.x,
        t.y,
        t.z,
        v.norm(),
        remotes.0.len()
    );
}
