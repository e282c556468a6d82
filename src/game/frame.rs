//! The per-frame update and the rest of the logic module's entry points
//!
//! Order within one `update`:
//! 1. reset the frame arena and hitbox index, begin the draw list
//! 2. first-time initialisation (once per process)
//! 3. move the player, ease the camera
//! 4. draw tiles, then draw every entity while building its hitbox
//! 5. resolve hover and pickups
//! 6. UI toggles, panels and placement
//! 7. strike the hovered entity if the click is still unclaimed
//! 8. reset the consumption gate

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::{exp_decay_t, Rect};
use crate::entity::kind::EntityKind;
use crate::entity::spawn;
use crate::game::state::GameState;
use crate::interaction::effects;
use crate::platform::assets::{kind_texture_keys, texture_for_kind, AssetSource, UI_FONT_KEY};
use crate::platform::input::{InputSnapshot, Key};
use crate::render::draw::{Color, DrawCommand, DrawList, Layer};
use crate::spatial::hitbox::{entity_rect, Hitbox, Hovered, ProximityQuery, SpriteMetrics};
use crate::ui::panels::{buildings_panel, inventory_panel, UiFrame};
use crate::ui::placement::placement_overlay;
use crate::ui::state::UiMode;

/// Tiles drawn on each side of the camera target
const MAP_RADIUS: i32 = 8;
const SPRITE_TINT: Color = Color::BLACK;
/// Missing textures draw the default texture untinted
const FALLBACK_TINT: Color = Color::WHITE;
const HOVER_COLOR: Color = Color::new(122, 33, 11, 180);
const HITBOX_LINE: f32 = 2.0;

/// Rocks and trees each
const DEBUG_RESOURCES: usize = 10;
const DEBUG_AREA: f32 = 20.0;
const DEBUG_PINEWOOD: u32 = 5;
const DEBUG_FURNACE_TILE: Vec2 = Vec2::new(10.0, 2.0);

/// Requests the module makes of the host for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostRequests {
    pub toggle_maximise: bool,
}

/// Host-provided collaborators for one `update` call
pub struct FrameContext<'a> {
    pub input: &'a InputSnapshot,
    pub assets: &'a mut dyn AssetSource,
    pub draw: &'a mut DrawList,
    pub requests: HostRequests,
}

impl<'a> FrameContext<'a> {
    pub fn new(input: &'a InputSnapshot, assets: &'a mut dyn AssetSource, draw: &'a mut DrawList) -> Self {
        Self {
            input,
            assets,
            draw,
            requests: HostRequests::default(),
        }
    }
}

/// Load every asset the kind table and UI reference. Safe to repeat.
pub fn preload(_state: &mut GameState, assets: &mut dyn AssetSource) {
    let mut keys = kind_texture_keys();
    keys.push(UI_FONT_KEY);
    assets.preload(&keys);
}

/// One-shot fix-up after a module swap
pub fn postload(state: &mut GameState) {
    if let Some(player) = state.player {
        if !state.entities.contains(player) {
            tracing::warn!("Player handle {} stale after reload; dropping it", player);
            state.player = None;
        }
    }
    tracing::info!(
        "Logic module attached at frame {} ({} entities live)",
        state.frame,
        state.entities.active_count()
    );
}

/// Log and clear accumulated frame statistics
pub fn flush_diagnostics(state: &mut GameState) {
    let stats = state.stats;
    tracing::info!(
        "{} frames, avg {:.2} ms, max {:.2} ms, {} entities, frame arena high water {} bytes",
        stats.frames,
        stats.avg_ms(),
        stats.max_ms(),
        state.entities.active_count(),
        state.frame_arena.high_water()
    );
    state.stats.reset();
}

pub fn update(state: &mut GameState, ctx: &mut FrameContext<'_>) {
    state.frame_arena.reset();
    state.hitboxes.clear();
    state.frame += 1;
    let input = ctx.input;

    if !state.is_initialised {
        initialise(state, input);
    }

    if input.is_pressed(Key::F) {
        ctx.requests.toggle_maximise = true;
    }

    move_player(state, input);
    state.camera.set_viewport_size(input.render_size);
    if let Some(player) = state.player.and_then(|p| state.entities.get(p)) {
        let goal = state.tile_space().to_world(player.pos);
        let t = exp_decay_t(state.config.camera_follow_rate, input.dt);
        state.camera.follow(goal, t);
    }
    let cursor_world = state.camera.screen_to_world(input.mouse_screen);

    ctx.draw.begin(state.camera);
    draw_map(state, ctx.draw);
    build_hitboxes(state, ctx.assets, ctx.draw, input.time as f32);

    let player_centre = state
        .player
        .and_then(|p| state.hitboxes.find(p))
        .map(|h| h.rect.centre());
    let query = ProximityQuery {
        cursor_world,
        player_centre,
        pickup_radius: state.config.pickup_radius,
    };
    let resolution = state
        .hitboxes
        .resolve(&query, &mut state.entities, &mut state.inventory);

    state.ui.handle_keys(input);
    state.ui.update_fades(input.dt, state.config.ui_fade_rate);
    run_ui(state, ctx, cursor_world);

    // Anything the UI claimed this frame shadows the world underneath
    if let Some(hovered) = resolution.hovered.filter(|_| !state.gate.hover_consumed()) {
        draw_hover(ctx.draw, &hovered);
        if state.gate.try_consume_click(input.left_released) {
            effects::strike(&mut state.entities, hovered.entity);
        }
    }

    state.gate.reset();
}

fn initialise(state: &mut GameState, input: &InputSnapshot) {
    state.is_initialised = true;
    state.camera.zoom = 1.0;
    let space = state.tile_space();

    match spawn::player(&mut state.entities, space.to_tile(input.render_size * 0.5)) {
        Ok(handle) => {
            state.player = Some(handle);
            state.camera.target = input.render_size * 0.5;
        }
        Err(e) => tracing::warn!("Could not spawn player: {}", e),
    }

    if let Err(e) = state.buildings.intern_labels(&mut state.persistent_arena) {
        tracing::warn!("Building labels not interned: {}", e);
    }

    if state.config.debug_world {
        populate_debug_world(state);
    }

    tracing::info!(
        "Game state initialised with {} entities",
        state.entities.active_count()
    );
}

fn populate_debug_world(state: &mut GameState) {
    let mut rng = ChaCha8Rng::seed_from_u64(state.config.debug_world_seed);
    let mut tile = || Vec2::new(rng.gen_range(0.0..DEBUG_AREA), rng.gen_range(0.0..DEBUG_AREA));

    let mut spawned = Vec::with_capacity(DEBUG_RESOURCES * 2 + 1);
    for _ in 0..DEBUG_RESOURCES {
        spawned.push((EntityKind::Rock, tile()));
        spawned.push((EntityKind::Tree, tile()));
    }
    spawned.push((EntityKind::BuildingFurnace, DEBUG_FURNACE_TILE));

    for (kind, pos) in spawned {
        if let Err(e) = spawn::spawn(&mut state.entities, kind, pos) {
            tracing::warn!("Debug world spawn of {:?} skipped: {}", kind, e);
        }
    }
    state.inventory.add(EntityKind::ItemPinewood, DEBUG_PINEWOOD);
}

fn move_player(state: &mut GameState, input: &InputSnapshot) {
    let Some(handle) = state.player else {
        return;
    };
    let mut speed = state.config.player_speed;
    if input.is_down(Key::LeftShift) {
        speed *= state.config.sprint_multiplier;
    }
    match state.entities.get_mut(handle) {
        Some(player) => player.pos += input.movement_axis() * speed * input.dt,
        None => {
            tracing::warn!("Player {} no longer in the pool", handle);
            state.player = None;
        }
    }
}

/// Checkerboard of tiles around the camera target
fn draw_map(state: &GameState, draw: &mut DrawList) {
    let space = state.tile_space();
    let centre = space.to_tile(state.camera.target).floor();
    let tile = Vec2::splat(state.config.tile_size * state.camera.zoom);

    for y in -MAP_RADIUS..MAP_RADIUS {
        for x in -MAP_RADIUS..MAP_RADIUS {
            let at = centre + Vec2::new(x as f32, y as f32);
            let color = if (at.x as i32 + at.y as i32).rem_euclid(2) == 1 {
                Color::GREEN
            } else {
                Color::BROWN
            };
            let pos = space.to_world(at);
            draw.rect(Rect::from_pos_size(pos, tile), color, Layer::World);
        }
    }
}

/// Draw each active entity and push its hitbox, in slot order
fn build_hitboxes(state: &mut GameState, assets: &mut dyn AssetSource, draw: &mut DrawList, time: f32) {
    let metrics = SpriteMetrics {
        space: state.tile_space(),
        scale: state.config.entity_scale,
        bob_amplitude: state.config.item_bob_amplitude,
        time,
    };

    for (handle, entity) in state.entities.iter() {
        let texture = texture_for_kind(assets, entity.kind);
        let rect = entity_rect(entity, texture.info.size(), &metrics);
        let tint = if texture.is_fallback { FALLBACK_TINT } else { SPRITE_TINT };
        draw.texture(texture.info.handle, rect, tint, Layer::World);
        if state.config.show_hitboxes {
            draw.push(DrawCommand::RectLines {
                rect,
                thickness: HITBOX_LINE,
                color: Color::MAGENTA,
                layer: Layer::World,
            });
        }
        state.hitboxes.push(Hitbox {
            rect,
            entity: handle,
            kind: entity.kind,
            is_item: entity.is_item,
        });
    }
}

fn draw_hover(draw: &mut DrawList, hovered: &Hovered) {
    draw.push(DrawCommand::Circle {
        centre: hovered.centre,
        radius: hovered.radius,
        color: HOVER_COLOR,
        layer: Layer::World,
    });
}

fn run_ui(state: &mut GameState, ctx: &mut FrameContext<'_>, cursor_world: Vec2) {
    let space = state.tile_space();
    let mut frame = UiFrame {
        camera: state.camera,
        render_size: ctx.input.render_size,
        cursor_world,
        click_released: ctx.input.left_released,
        gate: &mut state.gate,
        frame_arena: &mut state.frame_arena,
        assets: &mut *ctx.assets,
        draw: &mut *ctx.draw,
    };

    if state.ui.inventory_visible() {
        let interactive = state.ui.mode == UiMode::Inventory;
        inventory_panel(&mut frame, &state.inventory, state.ui.inventory_alpha, interactive);
    }
    if state.ui.mode == UiMode::Buildings {
        let selected = buildings_panel(
            &mut frame,
            &state.buildings,
            &state.persistent_arena,
            &state.inventory,
            state.ui.buildings_alpha,
        );
        if let Some(kind) = selected {
            state.ui.begin_placement(kind);
        }
    }
    placement_overlay(
        &mut frame,
        &mut state.ui,
        space,
        state.config.entity_scale,
        &mut state.entities,
        &mut state.buildings,
    );
}
