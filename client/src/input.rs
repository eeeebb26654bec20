use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    /// Held to turn mouse motion into look.
    Steer,
    /// Mouse motion in pixels, accumulated over the frame.
    #[actionlike(DualAxis)]
    Look,
    Chop,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::MoveForward, KeyCode::KeyW);
    input_map.insert(InputAction::MoveBackward, KeyCode::KeyS);
    input_map.insert(InputAction::StrafeLeft, KeyCode::KeyA);
    input_map.insert(InputAction::StrafeRight, KeyCode::KeyD);
    input_map.insert(InputAction::Steer, MouseButton::Right);
    input_map.insert_dual_axis(InputAction::Look, MouseMove::default());
    input_map.insert(InputAction::Chop, MouseButton::Left);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}
