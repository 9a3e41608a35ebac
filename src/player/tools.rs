//! Tool selection and dispatch.
//!
//! `tool_use` is the interaction controller: input + selected tool + the
//! tile ahead become world/inventory mutations, a busy-lock, and an
//! animation restart — all inside one system call, so a rejected action
//! leaves no partial effects.

use bevy::prelude::*;
use crate::shared::*;
use crate::world::TileGrid;
use super::{facing_offset, world_to_grid, ActionLock};
use super::animation::AnimationRuntime;

/// What an accepted tool action did to the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Tilled,
    Watered,
    Planted(ItemId),
    Harvested(ItemId),
}

/// Select a tool from the 1-4 hotkeys or cycle with Q/E.
pub fn tool_select(input: Res<PlayerInput>, mut player_state: ResMut<PlayerState>) {
    if let Some(slot) = input.tool_slot {
        if let Some(&tool) = TOOL_ORDER.get(slot as usize) {
            player_state.selected_tool = tool;
        }
    }

    let current = TOOL_ORDER
        .iter()
        .position(|t| *t == player_state.selected_tool)
        .unwrap_or(0);

    if input.tool_next {
        player_state.selected_tool = TOOL_ORDER[(current + 1) % TOOL_ORDER.len()];
    }
    if input.tool_prev {
        let prev = if current == 0 { TOOL_ORDER.len() - 1 } else { current - 1 };
        player_state.selected_tool = TOOL_ORDER[prev];
    }
}

/// Use the selected tool on the tile the player is facing.
///
/// Rejections (busy, no tile ahead, failed precondition) change nothing.
/// An accepted action mutates grid/inventory, engages the busy-lock for
/// `TOOL_USE_SECONDS`, restarts the tool animation from frame 0, and fans
/// out notification events.
pub fn tool_use(
    input: Res<PlayerInput>,
    registry: Res<ItemRegistry>,
    player_state: Res<PlayerState>,
    mut grid: ResMut<TileGrid>,
    mut inventory: ResMut<Inventory>,
    mut query: Query<
        (&Transform, &PlayerMovement, &mut ActionLock, &mut AnimationRuntime),
        With<Player>,
    >,
    mut tool_events: EventWriter<ToolUseEvent>,
    mut planted_events: EventWriter<SeedPlantedEvent>,
    mut harvested_events: EventWriter<CropHarvestedEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    if !input.tool_use {
        return;
    }

    let Ok((transform, movement, mut lock, mut anim)) = query.get_single_mut() else {
        return;
    };

    // At most one action in flight per player.
    if lock.is_busy() {
        return;
    }

    let (px, py) = world_to_grid(transform.translation.x, transform.translation.y);
    let (dx, dy) = facing_offset(movement.facing);
    let (target_x, target_y) = (px + dx, py + dy);

    if grid.get_tile(target_x, target_y).is_none() {
        return; // facing off the map edge
    }

    let tool = player_state.selected_tool;
    let Some(outcome) = apply_tool(tool, target_x, target_y, &mut grid, &mut inventory, &registry)
    else {
        return;
    };

    lock.engage(TOOL_USE_SECONDS);
    anim.set_state(tool.activity(), movement.facing);

    match &outcome {
        ToolOutcome::Tilled | ToolOutcome::Watered => {}
        ToolOutcome::Planted(seed_id) => {
            planted_events.send(SeedPlantedEvent {
                seed_id: seed_id.clone(),
                x: target_x,
                y: target_y,
            });
        }
        ToolOutcome::Harvested(produce_id) => {
            harvested_events.send(CropHarvestedEvent {
                produce_id: produce_id.clone(),
                x: target_x,
                y: target_y,
            });
        }
    }

    tool_events.send(ToolUseEvent {
        tool,
        target_x,
        target_y,
    });
    sfx_events.send(PlaySfxEvent {
        sfx_id: tool.sfx_id().to_string(),
    });

    info!(
        "[Player] {:?} on ({}, {}): {:?}",
        tool, target_x, target_y, outcome
    );
}

/// Per-tool dispatch against the grid and inventory. `None` means the
/// action was rejected with nothing mutated.
pub fn apply_tool(
    tool: ToolKind,
    x: i32,
    y: i32,
    grid: &mut TileGrid,
    inventory: &mut Inventory,
    registry: &ItemRegistry,
) -> Option<ToolOutcome> {
    match tool {
        ToolKind::Hoe => grid.till(x, y).then_some(ToolOutcome::Tilled),
        ToolKind::WateringCan => grid.water(x, y).then_some(ToolOutcome::Watered),
        ToolKind::SeedBag => {
            // First seed stack in inventory order wins; the seed is only
            // consumed once the planting has actually happened.
            let seed_id = inventory.first_seed(registry)?.item_id.clone();
            if !grid.plant(x, y, &seed_id) {
                return None;
            }
            inventory.remove(&seed_id, 1);
            Some(ToolOutcome::Planted(seed_id))
        }
        ToolKind::Basket => {
            let produce_id = grid.harvest(x, y, registry)?;
            let max_stack = registry.get(&produce_id).map(|d| d.max_stack).unwrap_or(1);
            inventory.add(&produce_id, 1, max_stack);
            Some(ToolOutcome::Harvested(produce_id))
        }
    }
}
