//! Player movement — continuous pixel motion over the discrete grid.

use bevy::prelude::*;
use crate::shared::*;
use crate::world::TileGrid;
use super::{world_to_grid, ActionLock};
use super::animation::AnimationRuntime;

/// Apply movement input: update facing, move at `speed` px/s (diagonals
/// normalized), and keep `GridPosition` in sync. While the action lock is
/// engaged, movement input is ignored entirely — only the tool animation
/// plays.
///
/// Collision is axis-separated so the player slides along the map edge.
/// World space matches the grid: +y points down.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    grid: Res<TileGrid>,
    mut query: Query<
        (
            &mut Transform,
            &mut PlayerMovement,
            &mut GridPosition,
            &ActionLock,
            &mut AnimationRuntime,
        ),
        With<Player>,
    >,
) {
    let Ok((mut transform, mut movement, mut grid_pos, lock, mut anim)) = query.get_single_mut()
    else {
        return;
    };

    if lock.is_busy() {
        movement.is_moving = false;
        return;
    }

    let axis = input.move_axis;
    if axis == Vec2::ZERO {
        movement.is_moving = false;
        anim.set_state(ActivityState::Idle, movement.facing);
        return;
    }

    // Facing follows the dominant axis; ties go vertical, which feels more
    // natural when walking up to a plot.
    if axis.y.abs() >= axis.x.abs() {
        movement.facing = if axis.y < 0.0 { Facing::Up } else { Facing::Down };
    } else {
        movement.facing = if axis.x < 0.0 { Facing::Left } else { Facing::Right };
    }

    let delta = axis.normalize() * movement.speed * time.delta_secs();
    let candidate_x = transform.translation.x + delta.x;
    let candidate_y = transform.translation.y + delta.y;

    let (gx, gy) = world_to_grid(candidate_x, transform.translation.y);
    if grid.is_walkable(gx, gy) {
        transform.translation.x = candidate_x;
    }
    let (gx, gy) = world_to_grid(transform.translation.x, candidate_y);
    if grid.is_walkable(gx, gy) {
        transform.translation.y = candidate_y;
    }

    let (gx, gy) = world_to_grid(transform.translation.x, transform.translation.y);
    grid_pos.x = gx;
    grid_pos.y = gy;

    movement.is_moving = true;
    anim.set_state(ActivityState::Walk, movement.facing);
}
