use crate::components::{Canvas, SizeCategory, Tile, Vec2};
use crate::engine::EngineState;
use crate::layout::remap;

/// Pointer-driven lean applied to every unselected tile. The pointer's
/// position across the canvas maps linearly to `[-range, range]` per axis.
pub fn parallax_shift(pointer: Vec2, canvas: Canvas, range: f32) -> Vec2 {
    Vec2::new(
        remap(pointer.x, 0.0, canvas.width, -range, range),
        remap(pointer.y, 0.0, canvas.height, -range, range),
    )
}

/// Where the tile is drawn this frame. Smaller tiles lean less; the
/// selected tile does not lean at all.
pub fn draw_position(tile: &Tile, pointer: Vec2, canvas: Canvas, range: f32, selected: bool) -> Vec2 {
    if selected {
        return tile.position;
    }
    let shift = parallax_shift(pointer, canvas, range);
    let scale = tile.base_size / SizeCategory::LARGEST;
    Vec2::new(
        tile.position.x + shift.x * scale,
        tile.position.y + shift.y * scale,
    )
}

/// Axis-aligned box test against the drawn position. Shared by hover and
/// press handling.
pub fn hit_test(tile: &Tile, pointer: Vec2, canvas: Canvas, range: f32, selected: bool) -> bool {
    let p = draw_position(tile, pointer, canvas, range, selected);
    (pointer.x - p.x).abs() < tile.width / 2.0 && (pointer.y - p.y).abs() < tile.size / 2.0
}

/// First catalog tile (in index order) under the pointer.
pub fn tile_at(state: &EngineState, pointer: Vec2) -> Option<usize> {
    let selected = state.selection.index();
    state
        .tiles
        .iter()
        .find(|t| {
            hit_test(
                t,
                pointer,
                state.canvas,
                state.config.parallax_range,
                selected == Some(t.index),
            )
        })
        .map(|t| t.index)
}

/// Frame phase 2: refresh hover flags from the current pointer.
pub fn run_hover(state: &mut EngineState) {
    let selected = state.selection.index();
    let pointer = state.pointer;
    let canvas = state.canvas;
    let range = state.config.parallax_range;
    for tile in &mut state.tiles {
        let is_selected = selected == Some(tile.index);
        tile.hovered = hit_test(tile, pointer, canvas, range, is_selected);
    }
}
