//! Player domain — movement, tool dispatch, busy-lock, animation.
//!
//! Frame order is the correctness story here: the lock ticks first, then an
//! action may be dispatched (grid + inventory + lock + animation mutate in
//! one system), then movement, then the animation timer. A render pass can
//! never observe a half-applied action.

pub mod animation;
pub mod movement;
pub mod spawn;
pub mod tools;

pub use tools::{apply_tool, ToolOutcome};

use bevy::prelude::*;
use crate::shared::*;
use animation::{animate_player, AnimationSet};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        let animations = AnimationSet::standard();
        animations.validate();
        app.insert_resource(animations);

        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // Fixed per-frame order: lock → tool dispatch → movement → animation.
        app.add_systems(
            Update,
            (
                tick_action_lock,
                tools::tool_select,
                tools::tool_use,
                movement::player_movement,
                animate_player,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Busy-lock
// ═══════════════════════════════════════════════════════════════════════════

/// Countdown that suspends movement and further tool use while a tool swing
/// plays out. Decremented by each tick's delta time, so tests can drive it
/// without a real clock. There is no cancel: an accepted action always runs
/// its full duration.
#[derive(Component, Debug, Clone, Default)]
pub struct ActionLock {
    remaining: f32,
}

impl ActionLock {
    pub fn engage(&mut self, seconds: f32) {
        self.remaining = seconds;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_busy(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Tick the lock; when a swing finishes, drop back to the idle clip.
pub fn tick_action_lock(
    time: Res<Time>,
    mut query: Query<(&mut ActionLock, &PlayerMovement, &mut animation::AnimationRuntime), With<Player>>,
) {
    for (mut lock, movement, mut anim) in query.iter_mut() {
        if !lock.is_busy() {
            continue;
        }
        lock.tick(time.delta_secs());
        if !lock.is_busy() {
            anim.set_state(ActivityState::Idle, movement.facing);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers shared across sub-modules
// ═══════════════════════════════════════════════════════════════════════════

/// Grid delta for the tile one step ahead of the player. +y is down,
/// matching the grid's row indexing.
pub fn facing_offset(facing: Facing) -> (i32, i32) {
    match facing {
        Facing::Up => (0, -1),
        Facing::Down => (0, 1),
        Facing::Left => (-1, 0),
        Facing::Right => (1, 0),
    }
}

pub fn world_to_grid(wx: f32, wy: f32) -> (i32, i32) {
    (
        (wx / TILE_SIZE).floor() as i32,
        (wy / TILE_SIZE).floor() as i32,
    )
}

/// Centre of a grid cell in world space (pixels, +y down).
pub fn grid_to_world(gx: i32, gy: i32) -> Vec2 {
    Vec2::new(
        (gx as f32 + 0.5) * TILE_SIZE,
        (gy as f32 + 0.5) * TILE_SIZE,
    )
}
