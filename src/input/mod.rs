//! Input domain — the single point where hardware input becomes game
//! actions. Everything downstream reads the `PlayerInput` resource; no
//! gameplay system touches `ButtonInput` directly.

use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<KeyBindings>()
            .init_resource::<InputContext>()
            .add_systems(
                PreUpdate,
                (manage_input_context, read_input).chain(),
            );
    }
}

/// Rebuild `PlayerInput` from the keyboard every frame.
fn read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    if *context != InputContext::Gameplay {
        return;
    }

    let mut axis = Vec2::ZERO;
    // +y is down in grid/world space, so "up" subtracts.
    if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
        axis.y -= 1.0;
    }
    if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
        axis.y += 1.0;
    }
    if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    input.move_axis = axis;

    input.tool_use = keys.just_pressed(bindings.tool_use);
    input.tool_next = keys.just_pressed(bindings.tool_next);
    input.tool_prev = keys.just_pressed(bindings.tool_prev);

    for (slot, key) in [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
    ]
    .iter()
    .enumerate()
    {
        if keys.just_pressed(*key) {
            input.tool_slot = Some(slot as u8);
            break;
        }
    }
}

/// Derives InputContext from GameState. One system, replaces per-domain guards.
fn manage_input_context(game_state: Res<State<GameState>>, mut context: ResMut<InputContext>) {
    *context = match *game_state.get() {
        GameState::Playing => InputContext::Gameplay,
        GameState::Loading => InputContext::Disabled,
    };
}
