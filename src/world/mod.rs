//! World domain — the tile grid, its mutation rules, and the crop lifecycle.
//!
//! All farming invariants live here: what tool transition is legal on what
//! tile, and the "growth needs a fresh watering each day" rule. Everything
//! is a plain boolean/Option API — out-of-range access and failed
//! preconditions are ordinary rejections, never errors.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::shared::*;
use std::collections::HashMap;

/// Half-width of the starting soil plot, in tiles.
const GARDEN_HALF: i32 = 5;

// ─────────────────────────────────────────────────────────────────────────────
// TileGrid
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-size 2D terrain grid with an optional crop overlay per cell.
///
/// Grid coordinates are row/column indices with +y pointing down; anything
/// outside `[0,width) × [0,height)` is "no tile" and rejects every mutation.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    crops: HashMap<(i32, i32), CropState>,
}

impl Default for TileGrid {
    /// The fixed starting layout: grass everywhere, a centred soil plot,
    /// and a path column leading down to it.
    fn default() -> Self {
        let mut grid = Self::new(GRID_WIDTH, GRID_HEIGHT);
        let cx = GRID_WIDTH / 2;
        let cy = GRID_HEIGHT / 2;
        for y in (cy - GARDEN_HALF)..(cy + GARDEN_HALF) {
            for x in (cx - GARDEN_HALF)..(cx + GARDEN_HALF) {
                grid.set_tile(x, y, TileKind::Soil);
            }
        }
        for y in (cy + GARDEN_HALF)..GRID_HEIGHT {
            grid.set_tile(cx, y, TileKind::Path);
        }
        grid
    }
}

impl TileGrid {
    /// An all-grass grid of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileKind::Grass; (width * height) as usize],
            crops: HashMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<TileKind> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Overwrite a tile. Rejected out of range, and rejected for
    /// `Grass`/`Soil` targets while a crop is present — a planted crop must
    /// never end up on an untilled cell.
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if self.crops.contains_key(&(x, y))
            && matches!(kind, TileKind::Grass | TileKind::Soil | TileKind::Path)
        {
            return false;
        }
        self.tiles[i] = kind;
        true
    }

    /// Every in-range tile is walkable; terrain affects farming, never
    /// locomotion. Only the map edge blocks movement.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub fn crop(&self, x: i32, y: i32) -> Option<&CropState> {
        self.crops.get(&(x, y))
    }

    // ── Tool transitions ────────────────────────────────────────────────

    /// `Soil → Tilled`. Anything else (grass, already tilled, watered,
    /// out of range) is a no-op.
    pub fn till(&mut self, x: i32, y: i32) -> bool {
        match self.get_tile(x, y) {
            Some(TileKind::Soil) => self.set_tile(x, y, TileKind::Tilled),
            _ => false,
        }
    }

    /// Water the tile: a dry `Tilled` cell becomes `Watered` (wetting any
    /// crop on it too), and an unwatered crop on an already-`Watered` cell
    /// gets its flag set. Watering an already-wet cell with no thirsty crop
    /// is a no-op.
    pub fn water(&mut self, x: i32, y: i32) -> bool {
        match self.get_tile(x, y) {
            Some(TileKind::Tilled) => {
                self.set_tile(x, y, TileKind::Watered);
                if let Some(crop) = self.crops.get_mut(&(x, y)) {
                    crop.watered = true;
                }
                true
            }
            Some(TileKind::Watered) => match self.crops.get_mut(&(x, y)) {
                Some(crop) if !crop.watered => {
                    crop.watered = true;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Plant a seed on an empty `Tilled`/`Watered` cell. A crop planted on
    /// wet soil starts its first cycle already watered.
    pub fn plant(&mut self, x: i32, y: i32, seed_id: &str) -> bool {
        let tile = self.get_tile(x, y);
        if !matches!(tile, Some(TileKind::Tilled) | Some(TileKind::Watered)) {
            return false;
        }
        if self.crops.contains_key(&(x, y)) {
            return false;
        }
        self.crops.insert(
            (x, y),
            CropState {
                seed_id: seed_id.to_string(),
                growth_stage: 0,
                watered: tile == Some(TileKind::Watered),
            },
        );
        true
    }

    /// Harvest a fully grown crop: clears the overlay, leaves the tile, and
    /// returns the produce kind mapped from the seed. A crop below
    /// `MAX_GROWTH_STAGE` is left untouched.
    pub fn harvest(&mut self, x: i32, y: i32, registry: &ItemRegistry) -> Option<ItemId> {
        let crop = self.crops.get(&(x, y))?;
        if crop.growth_stage < MAX_GROWTH_STAGE {
            return None;
        }
        // The catalog is validated at load, so a missing mapping can only
        // mean the registry was swapped out from under a live grid.
        let produce = registry.produce_for(&crop.seed_id)?.clone();
        self.crops.remove(&(x, y));
        Some(produce)
    }

    // ── Growth cycle ────────────────────────────────────────────────────

    /// One growth cycle for the crop at (x, y): advance a watered crop one
    /// stage (capped at `MAX_GROWTH_STAGE`), then clear its watered flag so
    /// the next cycle needs a fresh watering.
    pub fn advance_growth(&mut self, x: i32, y: i32) {
        if let Some(crop) = self.crops.get_mut(&(x, y)) {
            if crop.watered {
                crop.growth_stage = (crop.growth_stage + 1).min(MAX_GROWTH_STAGE);
            }
            crop.watered = false;
        }
    }

    /// Day-end hook: run the growth cycle for every crop, then dry all
    /// `Watered` tiles back to `Tilled` overnight.
    pub fn advance_growth_all(&mut self) {
        let positions: Vec<(i32, i32)> = self.crops.keys().copied().collect();
        for (x, y) in positions {
            self.advance_growth(x, y);
        }
        for tile in &mut self.tiles {
            if *tile == TileKind::Watered {
                *tile = TileKind::Tilled;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileGrid>().add_systems(
            Update,
            on_day_end.run_if(in_state(GameState::Playing)),
        );
    }
}

/// Advance every crop when the calendar rolls a day over.
pub fn on_day_end(mut day_end_events: EventReader<DayEndEvent>, mut grid: ResMut<TileGrid>) {
    for event in day_end_events.read() {
        grid.advance_growth_all();
        info!("[World] Day {} ended — growth cycle applied", event.day);
    }
}
