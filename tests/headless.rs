//! Headless integration tests for Plant Daddy.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register the real
//! domain plugins (skipping rendering/UI/hardware input), and drive the
//! game by writing `PlayerInput` directly.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use plant_daddy::calendar::{CalendarPlugin, DayClock};
use plant_daddy::data::DataPlugin;
use plant_daddy::player::animation::AnimationRuntime;
use plant_daddy::player::{grid_to_world, ActionLock, PlayerPlugin};
use plant_daddy::shared::*;
use plant_daddy::world::{TileGrid, WorldPlugin};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with the real domain plugins but NO rendering,
/// windowing, or hardware input. `PlayerInput` is a plain resource here, so
/// tests write it directly instead of going through the keyboard.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<ItemRegistry>()
        .init_resource::<PlayerInput>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<DayEndEvent>()
        .add_event::<ToolUseEvent>()
        .add_event::<SeedPlantedEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<PlaySfxEvent>();

    // ── Domain plugins under test ────────────────────────────────────────
    app.add_plugins(CalendarPlugin)
        .add_plugins(WorldPlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(DataPlugin);

    app
}

/// Ticks through Loading (data population) into Playing (player spawn).
fn boot(app: &mut App) {
    app.update(); // OnEnter(Loading): registries populate, NextState set
    app.update(); // transition applies, OnEnter(Playing) spawns the player
}

fn player_entity(app: &mut App) -> Entity {
    let mut query = app.world_mut().query_filtered::<Entity, With<Player>>();
    query.single(app.world())
}

/// Teleport the player to a grid cell and point them somewhere.
fn place_player(app: &mut App, x: i32, y: i32, facing: Facing) {
    let entity = player_entity(app);
    let mut entity_mut = app.world_mut().entity_mut(entity);
    entity_mut.get_mut::<Transform>().unwrap().translation = grid_to_world(x, y).extend(0.0);
    entity_mut.get_mut::<PlayerMovement>().unwrap().facing = facing;
}

/// One frame with the tool button held and the given tool selected.
fn press_tool(app: &mut App, tool: ToolKind) {
    app.world_mut().resource_mut::<PlayerState>().selected_tool = tool;
    app.world_mut().resource_mut::<PlayerInput>().tool_use = true;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
}

/// Drain the busy-lock directly so the next action can be issued without
/// waiting out real time. Does not run the return-to-idle transition.
fn expire_swing(app: &mut App) {
    let entity = player_entity(app);
    app.world_mut()
        .get_mut::<ActionLock>(entity)
        .unwrap()
        .tick(TOOL_USE_SECONDS * 2.0);
}

fn anim_state(app: &mut App) -> (ActivityState, Facing, u32) {
    let entity = player_entity(app);
    app.world()
        .entity(entity)
        .get::<AnimationRuntime>()
        .unwrap()
        .frame_descriptor()
}

fn is_busy(app: &mut App) -> bool {
    let entity = player_entity(app);
    app.world()
        .entity(entity)
        .get::<ActionLock>()
        .unwrap()
        .is_busy()
}

fn fired_tool_events(app: &App) -> Vec<(ToolKind, i32, i32)> {
    let events = app.world().resource::<Events<ToolUseEvent>>();
    let mut cursor = events.get_cursor();
    cursor
        .read(events)
        .map(|e| (e.tool, e.target_x, e.target_y))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot smoke
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_smoke_transitions_and_ticks() {
    let mut app = build_test_app();
    boot(&mut app);

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Playing,
        "Expected to reach Playing after loading data"
    );

    let item_count = app.world().resource::<ItemRegistry>().items.len();
    assert_eq!(item_count, 6, "Catalog should hold 3 seeds + 3 produce");

    let inventory = app.world().resource::<Inventory>();
    for seed in ["carrot_seeds", "tomato_seeds", "potato_seeds"] {
        assert_eq!(inventory.count(seed), 5, "Starting loadout: 5 × {seed}");
    }

    let grid = app.world().resource::<TileGrid>();
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);

    // A player exists, idle and facing down.
    assert_eq!(
        anim_state(&mut app),
        (ActivityState::Idle, Facing::Down, 0),
        "Freshly spawned player should be idle"
    );

    // Smoke: run a small frame budget in Playing without panic.
    for _ in 0..60 {
        app.update();
    }
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(state.get(), &GameState::Playing);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool dispatch through the full input → grid pipeline
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hoe_tills_the_faced_tile_and_engages_the_lock() {
    let mut app = build_test_app();
    boot(&mut app);

    // (8, 6) sits inside the starting soil plot; face it from one tile up.
    place_player(&mut app, 8, 5, Facing::Down);
    assert_eq!(
        app.world().resource::<TileGrid>().get_tile(8, 6),
        Some(TileKind::Soil)
    );

    press_tool(&mut app, ToolKind::Hoe);

    assert_eq!(
        app.world().resource::<TileGrid>().get_tile(8, 6),
        Some(TileKind::Tilled),
        "Hoe should till the tile directly ahead"
    );
    assert!(is_busy(&mut app), "Accepted action should engage the lock");
    assert_eq!(
        anim_state(&mut app),
        (ActivityState::Till, Facing::Down, 0),
        "Tool animation should restart from frame 0"
    );
    assert_eq!(
        fired_tool_events(&app),
        vec![(ToolKind::Hoe, 8, 6)],
        "Exactly one ToolUseEvent for the accepted action"
    );
}

#[test]
fn test_second_swing_rejected_while_busy_then_accepted_after() {
    let mut app = build_test_app();
    boot(&mut app);

    place_player(&mut app, 8, 5, Facing::Down);
    press_tool(&mut app, ToolKind::Hoe);
    assert!(is_busy(&mut app));

    // Watering the freshly tilled tile would succeed — but not mid-swing.
    press_tool(&mut app, ToolKind::WateringCan);
    assert_eq!(
        app.world().resource::<TileGrid>().get_tile(8, 6),
        Some(TileKind::Tilled),
        "No mutation while the lock is engaged"
    );
    assert_eq!(
        anim_state(&mut app).0,
        ActivityState::Till,
        "Rejected action must not touch the animation"
    );

    // Let the swing play out in real time; the lock system drops the
    // player back to idle on expiry.
    std::thread::sleep(std::time::Duration::from_millis(700));
    app.update();
    assert!(!is_busy(&mut app), "Lock should expire after TOOL_USE_SECONDS");
    assert_eq!(anim_state(&mut app).0, ActivityState::Idle);

    press_tool(&mut app, ToolKind::WateringCan);
    assert_eq!(
        app.world().resource::<TileGrid>().get_tile(8, 6),
        Some(TileKind::Watered),
        "Same action should succeed once the lock has expired"
    );
}

#[test]
fn test_till_water_plant_harvest_full_loop() {
    let mut app = build_test_app();
    boot(&mut app);
    place_player(&mut app, 8, 5, Facing::Down);

    press_tool(&mut app, ToolKind::Hoe);
    expire_swing(&mut app);
    press_tool(&mut app, ToolKind::WateringCan);
    expire_swing(&mut app);

    // Planting consumes one seed from the first seed stack (carrot).
    press_tool(&mut app, ToolKind::SeedBag);
    {
        let grid = app.world().resource::<TileGrid>();
        let crop = grid.crop(8, 6).expect("crop planted ahead of the player");
        assert_eq!(crop.seed_id, "carrot_seeds");
        assert_eq!(crop.growth_stage, 0);
        assert!(crop.watered, "Planted on wet soil, so already watered");
    }
    assert_eq!(app.world().resource::<Inventory>().count("carrot_seeds"), 4);
    assert_eq!(anim_state(&mut app), (ActivityState::Seed, Facing::Down, 0));
    expire_swing(&mut app);

    // Too early: the basket rejects an unripe crop and engages nothing.
    press_tool(&mut app, ToolKind::Basket);
    assert!(!is_busy(&mut app), "Unripe harvest should be rejected");
    assert!(app.world().resource::<TileGrid>().crop(8, 6).is_some());

    // Ripen the crop through the day cycle, then wet the tile again.
    {
        let mut grid = app.world_mut().resource_mut::<TileGrid>();
        for _ in 0..MAX_GROWTH_STAGE {
            grid.water(8, 6);
            grid.advance_growth(8, 6);
        }
        grid.water(8, 6);
        assert_eq!(grid.crop(8, 6).unwrap().growth_stage, MAX_GROWTH_STAGE);
    }

    press_tool(&mut app, ToolKind::Basket);
    assert_eq!(
        app.world().resource::<Inventory>().count("carrot"),
        1,
        "Harvest should bank one produce item"
    );
    assert!(
        app.world().resource::<TileGrid>().crop(8, 6).is_none(),
        "Harvest removes the crop overlay"
    );
    assert_eq!(
        app.world().resource::<TileGrid>().get_tile(8, 6),
        Some(TileKind::Watered),
        "Harvest leaves the tile itself alone"
    );

    let events = app.world().resource::<Events<CropHarvestedEvent>>();
    let mut cursor = events.get_cursor();
    let harvested: Vec<_> = cursor.read(events).collect();
    assert_eq!(harvested.len(), 1);
    assert_eq!(harvested[0].produce_id, "carrot");
}

#[test]
fn test_seed_bag_rejects_with_an_empty_bag() {
    let mut app = build_test_app();
    boot(&mut app);

    {
        let mut inventory = app.world_mut().resource_mut::<Inventory>();
        for seed in ["carrot_seeds", "tomato_seeds", "potato_seeds"] {
            inventory.remove(seed, 5);
        }
    }

    place_player(&mut app, 8, 5, Facing::Down);
    {
        let mut grid = app.world_mut().resource_mut::<TileGrid>();
        grid.till(8, 6);
        grid.water(8, 6);
    }

    press_tool(&mut app, ToolKind::SeedBag);

    assert!(
        app.world().resource::<TileGrid>().crop(8, 6).is_none(),
        "Nothing to plant with an empty bag"
    );
    assert!(!is_busy(&mut app), "Rejected action must not engage the lock");
    assert_eq!(anim_state(&mut app).0, ActivityState::Idle);
    assert!(fired_tool_events(&app).is_empty());
}

#[test]
fn test_facing_off_the_map_edge_is_rejected() {
    let mut app = build_test_app();
    boot(&mut app);

    place_player(&mut app, 0, 0, Facing::Up); // target (0, -1): no tile
    press_tool(&mut app, ToolKind::Hoe);

    assert!(!is_busy(&mut app));
    assert!(fired_tool_events(&app).is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tool_cycling_and_hotkeys() {
    let mut app = build_test_app();
    boot(&mut app);

    let selected = |app: &App| app.world().resource::<PlayerState>().selected_tool;
    assert_eq!(selected(&app), ToolKind::Hoe);

    // E cycles forward, wrapping at the end of the toolbar.
    for expected in [
        ToolKind::WateringCan,
        ToolKind::SeedBag,
        ToolKind::Basket,
        ToolKind::Hoe,
    ] {
        app.world_mut().resource_mut::<PlayerInput>().tool_next = true;
        app.update();
        *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
        assert_eq!(selected(&app), expected);
    }

    // Q cycles backward, wrapping from the first slot.
    app.world_mut().resource_mut::<PlayerInput>().tool_prev = true;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
    assert_eq!(selected(&app), ToolKind::Basket);

    // Number keys jump straight to a slot.
    app.world_mut().resource_mut::<PlayerInput>().tool_slot = Some(2);
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
    assert_eq!(selected(&app), ToolKind::SeedBag);

    // An out-of-range slot is ignored.
    app.world_mut().resource_mut::<PlayerInput>().tool_slot = Some(9);
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
    assert_eq!(selected(&app), ToolKind::SeedBag);
}

// ─────────────────────────────────────────────────────────────────────────────
// Movement and the busy-lock
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_movement_is_frozen_while_busy() {
    let mut app = build_test_app();
    boot(&mut app);

    place_player(&mut app, 8, 5, Facing::Down);
    press_tool(&mut app, ToolKind::Hoe);
    assert!(is_busy(&mut app));

    let entity = player_entity(&mut app);
    let before = app.world().entity(entity).get::<Transform>().unwrap().translation;

    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::new(1.0, 0.0);
    for _ in 0..5 {
        app.update();
    }

    let after = app.world().entity(entity).get::<Transform>().unwrap().translation;
    assert_eq!(before, after, "Movement input is ignored while busy");

    let movement = app.world().entity(entity).get::<PlayerMovement>().unwrap();
    assert!(!movement.is_moving);
}

#[test]
fn test_movement_walks_faces_and_animates() {
    let mut app = build_test_app();
    boot(&mut app);

    let entity = player_entity(&mut app);
    let start_x = app.world().entity(entity).get::<Transform>().unwrap().translation.x;

    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::new(1.0, 0.0);
    for _ in 0..30 {
        app.update();
    }

    let transform = app.world().entity(entity).get::<Transform>().unwrap();
    assert!(transform.translation.x > start_x, "Player should have moved right");

    let movement = app.world().entity(entity).get::<PlayerMovement>().unwrap();
    assert!(movement.is_moving);
    assert_eq!(movement.facing, Facing::Right);
    assert_eq!(anim_state(&mut app).0, ActivityState::Walk);

    // GridPosition follows the transform.
    let transform = *app.world().entity(entity).get::<Transform>().unwrap();
    let grid_pos = app.world().entity(entity).get::<GridPosition>().unwrap();
    assert_eq!(
        (grid_pos.x, grid_pos.y),
        (
            (transform.translation.x / TILE_SIZE).floor() as i32,
            (transform.translation.y / TILE_SIZE).floor() as i32,
        )
    );

    // Releasing the stick drops back to idle, facing preserved.
    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::ZERO;
    app.update();
    let movement = app.world().entity(entity).get::<PlayerMovement>().unwrap();
    assert!(!movement.is_moving);
    assert_eq!(anim_state(&mut app).0, ActivityState::Idle);
    assert_eq!(anim_state(&mut app).1, Facing::Right);
}

#[test]
fn test_map_edge_blocks_walking_off() {
    let mut app = build_test_app();
    boot(&mut app);

    place_player(&mut app, 0, 5, Facing::Left);
    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::new(-1.0, 0.0);
    for _ in 0..60 {
        app.update();
    }

    let entity = player_entity(&mut app);
    let grid_pos = app.world().entity(entity).get::<GridPosition>().unwrap();
    assert_eq!(grid_pos.x, 0, "Edge collision should pin the player in range");
}

// ─────────────────────────────────────────────────────────────────────────────
// Day cycle → crop growth
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_day_rollover_grows_watered_crops_and_dries_soil() {
    let mut app = build_test_app();
    boot(&mut app);

    {
        let mut grid = app.world_mut().resource_mut::<TileGrid>();
        grid.till(8, 6);
        grid.water(8, 6);
        assert!(grid.plant(8, 6, "carrot_seeds"));
        assert!(grid.crop(8, 6).unwrap().watered);
    }

    // Push the clock to the day boundary; the next tick rolls it over.
    app.world_mut().resource_mut::<DayClock>().elapsed = SECONDS_PER_DAY;
    app.update(); // calendar fires DayEndEvent
    app.update(); // world reacts to it

    assert_eq!(app.world().resource::<DayClock>().day, 2);

    let grid = app.world().resource::<TileGrid>();
    let crop = grid.crop(8, 6).unwrap();
    assert_eq!(crop.growth_stage, 1, "Watered crop advances overnight");
    assert!(!crop.watered, "Growth consumes the watering");
    assert_eq!(
        grid.get_tile(8, 6),
        Some(TileKind::Tilled),
        "Watered soil dries back overnight"
    );
}

#[test]
fn test_dry_crop_does_not_grow_overnight() {
    let mut app = build_test_app();
    boot(&mut app);

    {
        let mut grid = app.world_mut().resource_mut::<TileGrid>();
        grid.till(8, 6);
        assert!(grid.plant(8, 6, "carrot_seeds")); // dry soil, dry crop
    }

    app.world_mut().resource_mut::<DayClock>().elapsed = SECONDS_PER_DAY;
    app.update();
    app.update();

    let grid = app.world().resource::<TileGrid>();
    assert_eq!(grid.crop(8, 6).unwrap().growth_stage, 0);
}
