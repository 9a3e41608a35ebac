//! Shared components, resources, events, and states for Plant Daddy.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; FACING_COUNT] =
        [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    pub fn index(self) -> usize {
        match self {
            Facing::Up => 0,
            Facing::Down => 1,
            Facing::Left => 2,
            Facing::Right => 3,
        }
    }
}

/// What the player is visibly doing right now. Paired with [`Facing`] this
/// selects exactly one animation clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivityState {
    #[default]
    Idle,
    Walk,
    Till,
    Water,
    Seed,
    Harvest,
}

impl ActivityState {
    pub const ALL: [ActivityState; ACTIVITY_COUNT] = [
        ActivityState::Idle,
        ActivityState::Walk,
        ActivityState::Till,
        ActivityState::Water,
        ActivityState::Seed,
        ActivityState::Harvest,
    ];

    pub fn index(self) -> usize {
        match self {
            ActivityState::Idle => 0,
            ActivityState::Walk => 1,
            ActivityState::Till => 2,
            ActivityState::Water => 3,
            ActivityState::Seed => 4,
            ActivityState::Harvest => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
    SeedBag,
    Basket,
}

impl ToolKind {
    /// The activity clip played while this tool is in use.
    pub fn activity(self) -> ActivityState {
        match self {
            ToolKind::Hoe => ActivityState::Till,
            ToolKind::WateringCan => ActivityState::Water,
            ToolKind::SeedBag => ActivityState::Seed,
            ToolKind::Basket => ActivityState::Harvest,
        }
    }

    pub fn sfx_id(self) -> &'static str {
        match self {
            ToolKind::Hoe => "sfx_hoe",
            ToolKind::WateringCan => "sfx_water",
            ToolKind::SeedBag => "sfx_plant",
            ToolKind::Basket => "sfx_harvest",
        }
    }
}

/// The ordered list of tools for the 1-4 hotkeys and Q/E cycling.
pub const TOOL_ORDER: [ToolKind; 4] = [
    ToolKind::Hoe,
    ToolKind::WateringCan,
    ToolKind::SeedBag,
    ToolKind::Basket,
];

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub is_moving: bool,
    pub speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            is_moving: false,
            speed: PLAYER_SPEED,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct PlayerState {
    pub selected_tool: ToolKind,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            selected_tool: ToolKind::Hoe,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD
// ═══════════════════════════════════════════════════════════════════════

/// Terrain state of one grid cell. `Path` is cosmetic — farming tools treat
/// it like `Grass`, and every in-range tile is walkable regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Soil,
    Tilled,
    Watered,
    Path,
}

/// A planted crop overlaying one tile. Exists only on `Tilled`/`Watered`
/// cells; harvest removes the overlay but never touches the tile itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropState {
    pub seed_id: ItemId,
    /// 0 = just planted, `MAX_GROWTH_STAGE` = ready to harvest.
    pub growth_stage: u8,
    /// Cleared every growth cycle; the crop must be re-watered to advance.
    pub watered: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
/// Using string IDs for data-driven flexibility.
pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Seed,
    Produce,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub max_stack: u32,
}

/// Item catalog plus the seed → produce mapping, populated once at startup
/// by the data plugin. A seed with no matching produce entry is a catalog
/// authoring bug and fails loudly during load, never during play.
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: HashMap<ItemId, ItemDef>,
    produce_of: HashMap<ItemId, ItemId>,
}

impl ItemRegistry {
    pub fn insert(&mut self, def: ItemDef) {
        self.items.insert(def.id.clone(), def);
    }

    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn is_seed(&self, id: &str) -> bool {
        matches!(
            self.items.get(id).map(|d| d.category),
            Some(ItemCategory::Seed)
        )
    }

    /// The produce item granted when a crop grown from `seed_id` is harvested.
    pub fn produce_for(&self, seed_id: &str) -> Option<&ItemId> {
        self.produce_of.get(seed_id)
    }

    /// Build the seed → produce map from the `"<x>_seeds" ↔ "<x>"` naming
    /// convention. Panics if any seed has no produce counterpart — that is a
    /// catalog bug, not a player-facing condition.
    pub fn link_seed_produce(&mut self) {
        let mut produce_of = HashMap::new();
        for def in self.items.values() {
            if def.category != ItemCategory::Seed {
                continue;
            }
            let Some(base) = def.id.strip_suffix(SEED_SUFFIX) else {
                error!(
                    "[Data] Seed item '{}' does not follow the '*{}' naming convention",
                    def.id, SEED_SUFFIX
                );
                panic!("item catalog is malformed");
            };
            if !self.items.contains_key(base) {
                error!(
                    "[Data] Seed item '{}' has no produce entry '{}' in the catalog",
                    def.id, base
                );
                panic!("item catalog is malformed");
            }
            produce_of.insert(def.id.clone(), base.to_string());
        }
        self.produce_of = produce_of;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Ordered item stacks; insertion order is display order. At most one stack
/// exists per item kind (add searches before inserting), and a stack emptied
/// by `remove` keeps its slot rather than being pruned, so the toolbar/UI
/// ordering stays stable.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Inventory {
    /// Add up to `amount` of an item, clamped at `max_stack`. Returns how
    /// many were actually absorbed; overflow is dropped rather than split
    /// into a second stack.
    pub fn add(&mut self, item_id: &str, amount: u32, max_stack: u32) -> u32 {
        if let Some(stack) = self.stacks.iter_mut().find(|s| s.item_id == item_id) {
            let space = max_stack.saturating_sub(stack.quantity);
            let added = amount.min(space);
            stack.quantity += added;
            added
        } else {
            let added = amount.min(max_stack);
            self.stacks.push(ItemStack {
                item_id: item_id.to_string(),
                quantity: added,
            });
            added
        }
    }

    /// Remove up to `amount` from the first matching stack. Returns how many
    /// were actually removed. Emptied stacks stay in place.
    pub fn remove(&mut self, item_id: &str, amount: u32) -> u32 {
        match self.stacks.iter_mut().find(|s| s.item_id == item_id) {
            Some(stack) => {
                let removed = amount.min(stack.quantity);
                stack.quantity -= removed;
                removed
            }
            None => 0,
        }
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.stacks
            .iter()
            .filter(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .sum()
    }

    /// First non-empty seed stack in insertion order, if any.
    pub fn first_seed<'a>(&'a self, registry: &ItemRegistry) -> Option<&'a ItemStack> {
        self.stacks
            .iter()
            .find(|s| s.quantity > 0 && registry.is_seed(&s.item_id))
    }

    /// Read-only view for the UI layer.
    pub fn snapshot(&self) -> Vec<(ItemId, u32)> {
        self.stacks
            .iter()
            .map(|s| (s.item_id.clone(), s.quantity))
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT — single point where hardware input becomes game actions
// ═══════════════════════════════════════════════════════════════════════

/// Rebuilt every PreUpdate by the input plugin. Gameplay systems only read
/// this resource; headless tests drive the game by writing it directly.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Movement direction in grid space: +y points down (screen rows).
    pub move_axis: Vec2,
    pub tool_use: bool,
    pub tool_next: bool,
    pub tool_prev: bool,
    /// 0-based toolbar slot selected via the number keys.
    pub tool_slot: Option<u8>,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub tool_use: KeyCode,
    pub tool_next: KeyCode,
    pub tool_prev: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            tool_use: KeyCode::Space,
            tool_next: KeyCode::KeyE,
            tool_prev: KeyCode::KeyQ,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Fired once per in-game day by the calendar plugin.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
}

/// Notification that a tool action was accepted this frame. The world and
/// inventory mutations have already happened; listeners react cosmetically.
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tool: ToolKind,
    pub target_x: i32,
    pub target_y: i32,
}

#[derive(Event, Debug, Clone)]
pub struct SeedPlantedEvent {
    pub seed_id: ItemId,
    pub x: i32,
    pub y: i32,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub produce_id: ItemId,
    pub x: i32,
    pub y: i32,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 32.0;
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

pub const GRID_WIDTH: i32 = (SCREEN_WIDTH / TILE_SIZE) as i32;
pub const GRID_HEIGHT: i32 = (SCREEN_HEIGHT / TILE_SIZE) as i32;

pub const PLAYER_SPEED: f32 = 200.0; // px/s

/// Busy-lock duration for every tool action.
pub const TOOL_USE_SECONDS: f32 = 0.6;

/// Growth stage at which a crop becomes harvestable.
pub const MAX_GROWTH_STAGE: u8 = 3;

/// Real seconds per in-game day.
pub const SECONDS_PER_DAY: f32 = 90.0;

pub const FACING_COUNT: usize = 4;
pub const ACTIVITY_COUNT: usize = 6;

/// Item-id suffix that relates a seed kind to its produce kind.
pub const SEED_SUFFIX: &str = "_seeds";
