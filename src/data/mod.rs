//! Data layer — populates the item catalog at game startup.
//!
//! One system runs in OnEnter(GameState::Loading), fills the ItemRegistry
//! from the hard-coded catalog in `items`, validates the seed → produce
//! mapping (a hole there is a catalog bug and fails loudly), then moves the
//! game into Playing. No other domain seeds these resources.

mod items;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_game_data);
    }
}

fn load_game_data(
    mut item_registry: ResMut<ItemRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Populating registries…");

    items::populate_items(&mut item_registry);
    item_registry.link_seed_produce();
    info!("  Items loaded: {}", item_registry.items.len());

    info!("[Data] All registries populated. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}
