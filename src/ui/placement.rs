//! Building placement overlay

use glam::Vec2;

use crate::city::buildings::BuildingTable;
use crate::core::types::{Rect, TileSpace};
use crate::entity::kind::EntityKind;
use crate::entity::pool::{EntityHandle, EntityPool};
use crate::interaction::effects;
use crate::platform::assets::texture_for_kind;
use crate::render::draw::{Color, Layer};
use crate::ui::panels::UiFrame;
use crate::ui::state::UiState;

const PREVIEW_ALPHA: f32 = 0.6;

/// Draw the snapped preview for the building being placed and spawn it
/// on click.
///
/// The building lands at the snapped cursor converted back to tile space.
/// A successful placement leaves placement mode; a full pool keeps it so
/// the player can retry.
pub fn placement_overlay(
    frame: &mut UiFrame<'_>,
    ui: &mut UiState,
    space: TileSpace,
    scale: f32,
    pool: &mut EntityPool,
    buildings: &mut BuildingTable,
) -> Option<EntityHandle> {
    let kind = ui.placing?;

    let snapped = space.snap_world(frame.cursor_world);
    let resolved = texture_for_kind(frame.assets, kind);
    let dest = Rect::from_pos_size(snapped, resolved.info.size() * scale);
    frame.draw.texture(
        resolved.info.handle,
        dest,
        Color::WHITE.fade(PREVIEW_ALPHA),
        Layer::World,
    );

    if !frame.gate.try_consume_click(frame.click_released) {
        return None;
    }
    place(ui, kind, space.to_tile(snapped), pool, buildings)
}

fn place(
    ui: &mut UiState,
    kind: EntityKind,
    tile: Vec2,
    pool: &mut EntityPool,
    buildings: &mut BuildingTable,
) -> Option<EntityHandle> {
    match effects::place_building(pool, buildings, kind, tile) {
        Ok(handle) => {
            ui.placing = None;
            Some(handle)
        }
        Err(e) => {
            tracing::warn!("Could not place {:?}: {}", kind, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::gate::ConsumptionGate;
    use crate::memory::arena::{Arena, ArenaLifetime};
    use crate::platform::assets::MemoryAssets;
    use crate::render::camera::Camera2D;
    use crate::render::draw::DrawList;

    fn run(ui: &mut UiState, cursor: Vec2, click: bool, pool: &mut EntityPool) -> Option<EntityHandle> {
        let mut gate = ConsumptionGate::new();
        let mut arena = Arena::new(ArenaLifetime::Frame, 256);
        let mut assets = MemoryAssets::with_kind_textures(16.0, 16.0);
        let mut draw = DrawList::new();
        let mut buildings = BuildingTable::new();
        let mut frame = UiFrame {
            camera: Camera2D::default(),
            render_size: Vec2::new(1280.0, 720.0),
            cursor_world: cursor,
            click_released: click,
            gate: &mut gate,
            frame_arena: &mut arena,
            assets: &mut assets,
            draw: &mut draw,
        };
        placement_overlay(&mut frame, ui, TileSpace::new(120.0, 1.0), 8.0, pool, &mut buildings)
    }

    #[test]
    fn test_click_places_at_snapped_tile() {
        let mut ui = UiState::new();
        ui.begin_placement(EntityKind::BuildingWorkbench);
        let mut pool = EntityPool::new(4);

        let handle = run(&mut ui, Vec2::new(250.0, 370.0), true, &mut pool).unwrap();
        let placed = pool.get(handle).unwrap();
        assert_eq!(placed.kind, EntityKind::BuildingWorkbench);
        assert_eq!(placed.pos, Vec2::new(2.0, 3.0));
        assert!(ui.placing.is_none());
    }

    #[test]
    fn test_preview_without_click_keeps_mode() {
        let mut ui = UiState::new();
        ui.begin_placement(EntityKind::BuildingFurnace);
        let mut pool = EntityPool::new(4);
        assert!(run(&mut ui, Vec2::ZERO, false, &mut pool).is_none());
        assert_eq!(ui.placing, Some(EntityKind::BuildingFurnace));
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_full_pool_stays_in_placement() {
        let mut ui = UiState::new();
        ui.begin_placement(EntityKind::BuildingFurnace);
        let mut pool = EntityPool::new(0);
        assert!(run(&mut ui, Vec2::ZERO, true, &mut pool).is_none());
        assert_eq!(ui.placing, Some(EntityKind::BuildingFurnace));
    }

    #[test]
    fn test_idle_when_not_placing() {
        let mut ui = UiState::new();
        let mut pool = EntityPool::new(4);
        assert!(run(&mut ui, Vec2::ZERO, true, &mut pool).is_none());
        assert_eq!(pool.active_count(), 0);
    }
}
