//! Inventory bar and buildings menu
//!
//! Both panels are a horizontally centred row of equal boxes laid out in
//! screen space and converted to world space through the camera, so every
//! hover test runs against the same world-space cursor as the gameplay
//! layer. Boxes claim hover and click through the consumption gate in
//! draw order.

use glam::Vec2;

use crate::city::buildings::BuildingTable;
use crate::city::inventory::Inventory;
use crate::core::types::Rect;
use crate::entity::kind::{EntityKind, BUILDING_COUNT};
use crate::interaction::gate::ConsumptionGate;
use crate::memory::arena::{Arena, ArenaRef};
use crate::platform::assets::{texture_for_kind, AssetSource, UI_FONT_KEY};
use crate::render::camera::Camera2D;
use crate::render::draw::{Color, DrawCommand, DrawList, Layer};

const PANEL_HEIGHT_FRACTION: f32 = 0.15;
const BOX_WIDTH_FRACTION: f32 = 0.1;
const BOX_MARGIN_FRACTION: f32 = 0.3;
const ICON_FILL: f32 = 0.75;
const HOVER_GROWTH: f32 = 0.1;
const TOOLTIP_FONT_SIZE: f32 = 48.0;

const BOX_COLOR: Color = Color::new(0, 0, 0, 125);
const TOOLTIP_COLOR: Color = Color::new(0, 0, 255, 100);

/// Screen edge a row of boxes hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAnchor {
    Top,
    Bottom,
}

/// A centred row of equal boxes in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub origin: Vec2,
    pub box_size: Vec2,
    pub margin: f32,
    pub count: usize,
}

impl RowLayout {
    pub fn new(render_size: Vec2, count: usize, anchor: RowAnchor) -> Self {
        let box_size = Vec2::new(
            render_size.x * BOX_WIDTH_FRACTION,
            render_size.y * PANEL_HEIGHT_FRACTION,
        );
        let margin = box_size.x * BOX_MARGIN_FRACTION;
        let width = (box_size.x + margin) * count as f32 - margin;
        let y = match anchor {
            RowAnchor::Top => 0.0,
            RowAnchor::Bottom => render_size.y - box_size.y,
        };
        Self {
            origin: Vec2::new(render_size.x * 0.5 - width * 0.5, y),
            box_size,
            margin,
            count,
        }
    }

    pub fn width(&self) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        (self.box_size.x + self.margin) * self.count as f32 - self.margin
    }

    pub fn box_screen(&self, index: usize) -> Rect {
        let x = self.origin.x + (self.box_size.x + self.margin) * index as f32;
        Rect::from_pos_size(Vec2::new(x, self.origin.y), self.box_size)
    }

    pub fn box_world(&self, camera: &Camera2D, index: usize) -> Rect {
        camera.screen_rect_to_world(self.box_screen(index))
    }
}

/// Everything a panel needs from the current frame
pub struct UiFrame<'a> {
    pub camera: Camera2D,
    pub render_size: Vec2,
    pub cursor_world: Vec2,
    pub click_released: bool,
    pub gate: &'a mut ConsumptionGate,
    pub frame_arena: &'a mut Arena,
    pub assets: &'a mut dyn AssetSource,
    pub draw: &'a mut DrawList,
}

impl UiFrame<'_> {
    /// Icon for `kind` fitted into `cell`, enlarged when hovered
    fn icon(&mut self, kind: EntityKind, cell: Rect, hovered: bool, alpha: f32) -> Rect {
        let resolved = texture_for_kind(self.assets, kind);
        let size = resolved.info.size();
        let fit = if size.x > size.y {
            cell.width / size.x
        } else {
            cell.height / size.y
        };
        let mut scale = fit * ICON_FILL;
        if hovered {
            scale += scale * HOVER_GROWTH;
        }
        let scaled = size * scale;
        let dest = Rect::from_pos_size(cell.centre() - scaled * 0.5, scaled);
        let tint = if resolved.is_fallback { Color::RED } else { Color::WHITE };
        self.draw.texture(resolved.info.handle, dest, tint.fade(alpha), Layer::Ui);
        dest
    }

    /// Tooltip box hanging from the icon centre, with one centred line per text
    fn tooltip(&mut self, icon: Rect, cell: Rect, lines: &[(ArenaRef, Color)]) {
        let size = Vec2::new(cell.width * 1.5, cell.height * 0.75);
        let anchor = icon.centre();
        let tooltip = Rect::from_pos_size(Vec2::new(anchor.x - size.x * 0.5, anchor.y), size);
        self.draw.rect(tooltip, TOOLTIP_COLOR, Layer::Ui);

        let Some(font) = self.assets.font(UI_FONT_KEY) else {
            return;
        };
        for (row, (text, color)) in lines.iter().enumerate() {
            let Some(s) = self.frame_arena.str(*text) else {
                continue;
            };
            let measured = self.assets.measure_text(font, s, TOOLTIP_FONT_SIZE);
            let pos = Vec2::new(
                tooltip.x + tooltip.width * 0.5 - measured.x * 0.5,
                tooltip.y + row as f32 * TOOLTIP_FONT_SIZE,
            );
            self.draw.push(DrawCommand::Text {
                text: *text,
                pos,
                size: TOOLTIP_FONT_SIZE,
                font,
                color: *color,
            });
        }
    }

    fn format(&mut self, args: std::fmt::Arguments<'_>) -> Option<ArenaRef> {
        match self.frame_arena.alloc_fmt(args) {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::debug!("Tooltip text dropped: {}", e);
                None
            }
        }
    }
}

/// Bottom row with one box per item kind, faded by `alpha`.
///
/// Only items with a non-zero count draw an icon. Hover and tooltips need
/// `interactive`; a panel fading out after closing is drawn only.
pub fn inventory_panel(
    frame: &mut UiFrame<'_>,
    inventory: &Inventory,
    alpha: f32,
    interactive: bool,
) {
    let layout = RowLayout::new(frame.render_size, inventory.slot_count(), RowAnchor::Bottom);

    for (i, (kind, count)) in inventory.iter().enumerate() {
        let cell = layout.box_world(&frame.camera, i);
        frame.draw.rect(cell, BOX_COLOR.fade(alpha), Layer::Ui);
        if count == 0 {
            continue;
        }

        let hovered = interactive && frame.gate.try_consume_hover(cell, frame.cursor_world);
        let icon = frame.icon(kind, cell, hovered, alpha);
        if !hovered {
            continue;
        }
        if let Some(text) = frame.format(format_args!("{} ({})", kind.display_name(), count)) {
            frame.tooltip(icon, cell, &[(text, Color::WHITE)]);
        }
    }
}

/// Top row with one box per building kind.
///
/// Returns the building whose box took this frame's click.
pub fn buildings_panel(
    frame: &mut UiFrame<'_>,
    buildings: &BuildingTable,
    labels: &Arena,
    inventory: &Inventory,
    alpha: f32,
) -> Option<EntityKind> {
    let layout = RowLayout::new(frame.render_size, BUILDING_COUNT, RowAnchor::Top);
    let mut selected = None;

    for (i, (kind, data)) in buildings.iter().enumerate() {
        let cell = layout.box_world(&frame.camera, i);
        frame.draw.rect(cell, BOX_COLOR.fade(alpha), Layer::Ui);

        let hovered = frame.gate.try_consume_hover(cell, frame.cursor_world);
        let icon = frame.icon(kind, cell, hovered, alpha);
        if !hovered {
            continue;
        }

        let mut lines = Vec::with_capacity(2);
        if let Some(name) = frame.format(format_args!("{}", kind.display_name())) {
            lines.push((name, Color::WHITE));
        }
        // Labels live in the persistent arena; copy for this frame's draw list
        let recipe = data.label.and_then(|label| labels.str(label));
        if let Some(recipe) = recipe {
            let affordable = inventory.has_materials(data.recipe);
            if let Some(text) = frame.format(format_args!("{}", recipe)) {
                lines.push((text, if affordable { Color::WHITE } else { Color::RED }));
            }
        }
        frame.tooltip(icon, cell, &lines);

        if frame.gate.try_consume_click(frame.click_released) {
            tracing::debug!("Selected {:?} for placement", kind);
            selected = Some(kind);
        }
    }

    selected
}
