//! Integration tests for the per-frame pipeline
//!
//! These drive the built-in logic module through `ModuleHost` exactly as a
//! host binary would:
//! - Striking a tree until it drops pinewood
//! - Picking up items near the player
//! - UI mode toggles, tooltips and building placement

use glam::Vec2;

use tilecraft::core::config::CoreConfig;
use tilecraft::core::types::Rect;
use tilecraft::entity::kind::{EntityKind, BUILDING_COUNT, ITEM_COUNT};
use tilecraft::entity::{spawn, EntityHandle};
use tilecraft::game::{logic_module, HostRequests};
use tilecraft::platform::{InputSnapshot, Key, MemoryAssets};
use tilecraft::reload::ModuleHost;
use tilecraft::render::{DrawCommand, DrawList};
use tilecraft::ui::{RowAnchor, RowLayout, UiMode};

const RENDER: Vec2 = Vec2::new(1280.0, 720.0);
const DT: f32 = 1.0 / 60.0;
const SPRITE: f32 = 16.0;

struct Harness {
    host: ModuleHost,
    assets: MemoryAssets,
    draw: DrawList,
}

impl Harness {
    /// Host with the built-in module loaded and one idle frame run, so
    /// the player exists and the camera has settled
    fn new() -> Self {
        let mut assets = MemoryAssets::with_kind_textures(SPRITE, SPRITE);
        let mut host = ModuleHost::new(CoreConfig::default()).unwrap();
        host.load(logic_module(), &mut assets).unwrap();
        let mut harness = Self {
            host,
            assets,
            draw: DrawList::new(),
        };
        harness.step(idle());
        harness
    }

    fn step(&mut self, input: InputSnapshot) -> HostRequests {
        self.host
            .frame(&input, &mut self.assets, &mut self.draw)
            .unwrap()
    }

    /// Screen position of the centre of a (non-item) entity's sprite
    fn screen_centre_of(&self, handle: EntityHandle) -> Vec2 {
        let state = self.host.state();
        let entity = state.entities.get(handle).unwrap();
        let world = state.tile_space().to_world(entity.pos);
        let rect = Rect::from_pos_size(world, Vec2::splat(SPRITE * state.config.entity_scale));
        state.camera.world_to_screen(rect.centre())
    }

    /// Spawn a tree whose sprite is centred under a screen position
    fn tree_under(&mut self, screen: Vec2) -> EntityHandle {
        let state = self.host.state_mut();
        let half = Vec2::splat(SPRITE * state.config.entity_scale * 0.5);
        let world = state.camera.screen_to_world(screen) - half;
        let tile = state.tile_space().to_tile(world);
        spawn::tree(&mut state.entities, tile).unwrap()
    }

    fn texts(&self) -> Vec<String> {
        self.draw
            .texts(&self.host.state().frame_arena)
            .map(str::to_string)
            .collect()
    }
}

fn idle() -> InputSnapshot {
    InputSnapshot::new(RENDER, DT)
}

fn release(key: Key) -> InputSnapshot {
    idle().with_key_released(key)
}

// ============================================================================
// Destruction
// ============================================================================

/// Three clicks on a tree with 3 health: the tree is freed and pinewood
/// appears on its tile
#[test]
fn test_tree_destroyed_after_three_clicks() {
    let mut h = Harness::new();
    let tree = spawn::tree(&mut h.host.state_mut().entities, Vec2::new(5.0, 5.0)).unwrap();
    let cursor = h.screen_centre_of(tree);

    for frame in 1..=3 {
        h.step(idle().with_mouse(cursor).with_click());
        let alive = h.host.state().entities.get(tree).map(|e| e.health);
        match frame {
            1 => assert_eq!(alive, Some(2)),
            2 => assert_eq!(alive, Some(1)),
            _ => assert_eq!(alive, None),
        }
    }

    let state = h.host.state();
    let drops: Vec<_> = state
        .entities
        .iter()
        .filter(|(_, e)| e.kind == EntityKind::ItemPinewood)
        .collect();
    assert_eq!(drops.len(), 1);
    assert_eq!(drops[0].1.pos, Vec2::new(5.0, 5.0));
    assert!(drops[0].1.is_item);
}

#[test]
fn test_hover_without_click_does_nothing() {
    let mut h = Harness::new();
    let tree = spawn::tree(&mut h.host.state_mut().entities, Vec2::new(5.0, 5.0)).unwrap();
    let cursor = h.screen_centre_of(tree);

    h.step(idle().with_mouse(cursor));
    assert_eq!(h.host.state().entities.get(tree).unwrap().health, 3);
    assert!(h
        .draw
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Circle { .. })));
}

#[test]
fn test_clicking_player_is_harmless() {
    let mut h = Harness::new();
    let player = h.host.state().player.unwrap();
    let cursor = h.screen_centre_of(player);
    for _ in 0..5 {
        h.step(idle().with_mouse(cursor).with_click());
    }
    assert!(h.host.state().entities.contains(player));
}

// ============================================================================
// Pickup
// ============================================================================

#[test]
fn test_item_on_player_picked_up_same_frame() {
    let mut h = Harness::new();
    let player_pos = {
        let state = h.host.state();
        state.entities.get(state.player.unwrap()).unwrap().pos
    };
    let near = spawn::item_pinewood(&mut h.host.state_mut().entities, player_pos).unwrap();
    let far = spawn::item_pinewood(&mut h.host.state_mut().entities, player_pos + Vec2::new(6.0, 0.0)).unwrap();

    h.step(idle());

    let state = h.host.state();
    assert!(!state.entities.contains(near));
    assert!(state.entities.contains(far));
    assert_eq!(state.inventory.get(EntityKind::ItemPinewood), 1);
}

#[test]
fn test_dropped_pinewood_collected_by_walking_over_it() {
    let mut h = Harness::new();
    let player_pos = {
        let state = h.host.state();
        state.entities.get(state.player.unwrap()).unwrap().pos
    };
    spawn::item_pinewood(&mut h.host.state_mut().entities, player_pos + Vec2::new(2.0, 0.0)).unwrap();

    // 8 tiles/s: two tiles in a quarter second, in small steps
    for _ in 0..20 {
        h.step(idle().with_key_down(Key::Right));
        if h.host.state().inventory.get(EntityKind::ItemPinewood) > 0 {
            break;
        }
    }
    let state = h.host.state();
    assert_eq!(state.inventory.get(EntityKind::ItemPinewood), 1);
    assert_eq!(state.entities.count_of(EntityKind::ItemPinewood), 0);
}

// ============================================================================
// UI
// ============================================================================

#[test]
fn test_ui_toggle_scenario() {
    let mut h = Harness::new();
    assert_eq!(h.host.state().ui.mode, UiMode::Nil);

    h.step(release(Key::Tab));
    assert_eq!(h.host.state().ui.mode, UiMode::Inventory);

    h.step(release(Key::Tab));
    assert_eq!(h.host.state().ui.mode, UiMode::Nil);

    h.step(release(Key::Tab));
    h.step(release(Key::C));
    assert_eq!(h.host.state().ui.mode, UiMode::Buildings);
}

#[test]
fn test_inventory_tooltip_formats_count() {
    let mut h = Harness::new();
    h.host.state_mut().inventory.add(EntityKind::ItemPinewood, 5);
    h.step(release(Key::Tab));

    h.step(idle().with_mouse(pinewood_box_centre()));
    assert_eq!(h.texts(), vec!["Pinewood (5)".to_string()]);

    // Frame text does not outlive the next frame
    h.step(idle());
    assert!(h.texts().is_empty());
}

/// Cursor over the pinewood box of the inventory row
fn pinewood_box_centre() -> Vec2 {
    RowLayout::new(RENDER, ITEM_COUNT, RowAnchor::Bottom)
        .box_screen(1)
        .centre()
}

#[test]
fn test_open_inventory_shadows_entity_beneath() {
    let mut h = Harness::new();
    h.host.state_mut().inventory.add(EntityKind::ItemPinewood, 5);
    h.step(release(Key::Tab));
    h.step(idle());

    let cursor = pinewood_box_centre();
    let tree = h.tree_under(cursor);
    h.step(idle().with_mouse(cursor).with_click());

    assert_eq!(h.host.state().entities.get(tree).unwrap().health, 3);
    assert_eq!(h.texts(), vec!["Pinewood (5)".to_string()]);
}

#[test]
fn test_closed_inventory_lets_click_through_while_fading() {
    let mut h = Harness::new();
    h.host.state_mut().inventory.add(EntityKind::ItemPinewood, 5);
    h.step(release(Key::Tab));
    for _ in 0..30 {
        h.step(idle());
    }
    h.step(release(Key::Tab));
    assert_eq!(h.host.state().ui.mode, UiMode::Nil);
    assert!(h.host.state().ui.inventory_visible());

    let cursor = pinewood_box_centre();
    let tree = h.tree_under(cursor);
    h.step(idle().with_mouse(cursor).with_click());

    assert_eq!(h.host.state().entities.get(tree).unwrap().health, 2);
    assert!(h.texts().is_empty());
}

#[test]
fn test_select_and_place_building() {
    let mut h = Harness::new();
    h.step(release(Key::C));

    let cell = RowLayout::new(RENDER, BUILDING_COUNT, RowAnchor::Top).box_screen(1);
    h.step(idle().with_mouse(cell.centre()).with_click());
    assert_eq!(h.host.state().ui.placing, Some(EntityKind::BuildingWorkbench));
    assert_eq!(h.host.state().entities.count_of(EntityKind::BuildingWorkbench), 0);

    let target = h.host.state().camera.world_to_screen(Vec2::new(250.0, 370.0));
    h.step(idle().with_mouse(target).with_click());

    let state = h.host.state();
    assert!(state.ui.placing.is_none());
    assert_eq!(state.buildings.get(EntityKind::BuildingWorkbench).placed, 1);
    let (_, placed) = state
        .entities
        .iter()
        .find(|(_, e)| e.kind == EntityKind::BuildingWorkbench)
        .unwrap();
    assert_eq!(placed.pos, Vec2::new(2.0, 3.0));
}

#[test]
fn test_maximise_key_requests_host() {
    let mut h = Harness::new();
    let requests = h.step(idle().with_key_pressed(Key::F));
    assert!(requests.toggle_maximise);
    let requests = h.step(idle());
    assert!(!requests.toggle_maximise);
}
