// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

#[cfg(feature = "dev_native")]
mod debug_tools;

mod config;
mod cursor;
mod harvest;
mod input;
mod module_bindings;
mod physics;
mod player;
mod presence;
mod server;
mod world;

use bevy::prelude::*;

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        // Parse arguments first so a bad flag exits before a window opens.
        app.add_plugins(config::plugin);

        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Grove".to_string(),
                fit_canvas_to_parent: true,
                // Right mouse steers; keep the browser context menu out of the way.
                prevent_default_event_handling: true,
                ..default()
            }),
            ..default()
        }));

        app.add_plugins((
            server::plugin,
            input::plugin,
            physics::plugin,
            world::plugin,
            player::plugin,
            cursor::plugin,
            harvest::plugin,
            presence::plugin,
        ));

        #[cfg(feature = "dev_native")]
        app.add_plugins(debug_tools::plugin);
    }
}
