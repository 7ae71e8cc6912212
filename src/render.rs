use crate::components::{TileRole, Vec2};
use crate::draw::{DrawList, PanelCommand, rgb};
use crate::engine::EngineState;
use crate::info_panel::InfoPanel;
use crate::systems::hover::draw_position;

/// Frame outline colour: white.
const FRAME_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const FRAME_BORDER: f32 = 1.5;
const HOVER_BORDER: f32 = 2.0;
/// Rounded corners as a fraction of tile height.
const CORNER_FRACTION: f32 = 0.2;
const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Everything a renderer needs to draw one tile this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest<'a> {
    pub index: usize,
    pub role: TileRole,
    /// Centre of the tile, parallax applied.
    pub position: Vec2,
    pub width: f32,
    pub size: f32,
    pub media_ref: &'a str,
    pub accent_color: [u8; 3],
    pub is_selected: bool,
    pub is_hovered: bool,
}

/// Per-tile draw requests, back to front: unselected tiles in index
/// order, then the selected tile, then the link tile.
///
/// This function is READ-ONLY and does not modify engine state.
pub fn collect_draw_requests(state: &EngineState) -> Vec<DrawRequest<'_>> {
    let selected = state.selection.index();
    let range = state.config.parallax_range;
    let mut out = Vec::with_capacity(state.tiles.len() + 1);

    out.extend(
        (0..state.tiles.len())
            .filter(|&i| Some(i) != selected)
            .map(|i| tile_request(state, i, false)),
    );
    if let Some(i) = selected {
        out.push(tile_request(state, i, true));
    }

    let link = &state.link_tile;
    out.push(DrawRequest {
        index: link.index,
        role: link.role,
        position: draw_position(link, state.pointer, state.canvas, range, false),
        width: link.width,
        size: link.size,
        media_ref: "",
        accent_color: selected.map_or([255, 255, 255], |i| state.records[i].accent_color),
        is_selected: false,
        is_hovered: link.hovered,
    });
    out
}

fn tile_request(state: &EngineState, i: usize, is_selected: bool) -> DrawRequest<'_> {
    let tile = &state.tiles[i];
    let record = &state.records[i];
    DrawRequest {
        index: i,
        role: tile.role,
        position: draw_position(
            tile,
            state.pointer,
            state.canvas,
            state.config.parallax_range,
            is_selected,
        ),
        width: tile.width,
        size: tile.size,
        media_ref: record.media_ref.as_str(),
        accent_color: record.accent_color,
        is_selected,
        is_hovered: tile.hovered,
    }
}

/// Build the panel draw list: frame outline, info panel, then tiles.
pub fn build_draw_list(state: &EngineState, info: &InfoPanel, list: &mut DrawList) {
    list.clear();

    let b = state.frame_box.current;
    list.panels.push(PanelCommand {
        x: b.left.min(b.right),
        y: b.top.min(b.bottom),
        width: b.width().abs(),
        height: b.height().abs(),
        bg_color: TRANSPARENT,
        border_color: FRAME_COLOR,
        border_width: FRAME_BORDER,
        corner_radius: 0.0,
    });

    // The info panel sits under the focused tile.
    if info.alpha > 0.0
        && let Some(payload) = &info.payload
    {
        list.panels.push(PanelCommand {
            x: info.x,
            y: info.y,
            width: info.width,
            height: info.height,
            bg_color: rgb(payload.accent_color, info.alpha),
            border_color: TRANSPARENT,
            border_width: 0.0,
            corner_radius: 0.0,
        });
    }

    for req in collect_draw_requests(state) {
        list.panels.push(PanelCommand {
            x: req.position.x - req.width / 2.0,
            y: req.position.y - req.size / 2.0,
            width: req.width,
            height: req.size,
            bg_color: rgb(req.accent_color, 1.0),
            border_color: FRAME_COLOR,
            border_width: if req.is_hovered { HOVER_BORDER } else { 0.0 },
            corner_radius: req.size * CORNER_FRACTION,
        });
    }
}
