//! Player spawn — one player entity per game session.

use bevy::prelude::*;
use crate::shared::*;
use super::{grid_to_world, ActionLock};
use super::animation::AnimationRuntime;

/// Starting seed packets, per the new-game loadout.
const STARTING_SEEDS: [(&str, u32); 3] = [
    ("carrot_seeds", 5),
    ("tomato_seeds", 5),
    ("potato_seeds", 5),
];

/// Spawn the player just below the garden plot, facing down, with the
/// starting seeds in the bag.
pub fn spawn_player(
    mut commands: Commands,
    registry: Res<ItemRegistry>,
    mut inventory: ResMut<Inventory>,
) {
    for (seed_id, quantity) in STARTING_SEEDS {
        let max_stack = registry.get(seed_id).map(|d| d.max_stack).unwrap_or(1);
        inventory.add(seed_id, quantity, max_stack);
    }

    let spawn_grid = (GRID_WIDTH / 2, GRID_HEIGHT - 2);
    let spawn = grid_to_world(spawn_grid.0, spawn_grid.1);

    commands.spawn((
        Player,
        PlayerMovement::default(),
        GridPosition::new(spawn_grid.0, spawn_grid.1),
        AnimationRuntime::new(ActivityState::Idle, Facing::Down),
        ActionLock::default(),
        Transform::from_translation(spawn.extend(0.0)),
    ));

    info!(
        "[Player] Spawned at grid ({}, {}) with {} starting stacks",
        spawn_grid.0,
        spawn_grid.1,
        STARTING_SEEDS.len()
    );
}
