use crate::input::InputAction;
use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused},
};
use leafwing_input_manager::prelude::ActionState;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, (grab_while_steering, release_on_focus_lost));
}

fn set_grabbed(cursor: &mut CursorOptions, grabbed: bool) {
    if grabbed {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// Lock and hide the cursor for as long as the steer button is held.
fn grab_while_steering(
    actions: Res<ActionState<InputAction>>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if actions.just_pressed(&InputAction::Steer) {
        set_grabbed(&mut cursor, true);
    } else if actions.just_released(&InputAction::Steer) {
        set_grabbed(&mut cursor, false);
    }
}

// Alt-tabbing away mid-steer would otherwise leave the OS cursor locked.
fn release_on_focus_lost(
    mut messages: MessageReader<WindowFocused>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    for message in messages.read() {
        if !message.focused {
            set_grabbed(&mut cursor, false);
        }
    }
}
