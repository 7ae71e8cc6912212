use crate::components::{Canvas, Vec2};

/// Linearly remap `value` from `[start1, stop1]` to `[start2, stop2]`.
/// A degenerate source range maps everything to `start2`.
pub fn remap(value: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    let span = stop1 - start1;
    if span == 0.0 {
        return start2;
    }
    start2 + (stop2 - start2) * ((value - start1) / span)
}

/// Row-major resting grid, centred on the canvas.
///
/// Tile `i` sits at column `i % columns`, row `i / columns`. The grid's
/// bounding box (`columns * spacing` by `rows * spacing`) is centred and
/// each position is the centre of its cell.
pub fn compute_resting_grid(count: usize, columns: usize, spacing: f32, canvas: Canvas) -> Vec<Vec2> {
    let columns = columns.max(1);
    let rows = count.div_ceil(columns);
    let offset_x = (canvas.width - columns as f32 * spacing) / 2.0 + spacing / 2.0;
    let offset_y = (canvas.height - rows as f32 * spacing) / 2.0 + spacing / 2.0;

    (0..count)
        .map(|i| {
            let col = i % columns;
            let row = i / columns;
            Vec2::new(
                col as f32 * spacing + offset_x,
                row as f32 * spacing + offset_y,
            )
        })
        .collect()
}

/// Slots around the canvas border, walked clockwise: top (left→right),
/// right (top→bottom), bottom (right→left), left (bottom→top).
///
/// Each edge holds at most `ceil(count / 4)` slots and the walk stops at
/// exactly `count`. The moving coordinate spans the edge minus `corner_inset`
/// at both ends; the fixed coordinate is `margin` from the border.
pub fn compute_perimeter_slots(count: usize, margin: f32, corner_inset: f32, canvas: Canvas) -> Vec<Vec2> {
    let per_edge = count.div_ceil(4);
    let last = per_edge.saturating_sub(1) as f32;
    let (w, h) = (canvas.width, canvas.height);
    let near = margin + corner_inset;
    let far_x = w - margin - corner_inset;
    let far_y = h - margin - corner_inset;

    let edges: [&dyn Fn(f32) -> Vec2; 4] = [
        &|j: f32| Vec2::new(remap(j, 0.0, last, near, far_x), margin),
        &|j: f32| Vec2::new(w - margin, remap(j, 0.0, last, near, far_y)),
        &|j: f32| Vec2::new(remap(j, 0.0, last, far_x, near), h - margin),
        &|j: f32| Vec2::new(margin, remap(j, 0.0, last, far_y, near)),
    ];

    let mut slots = Vec::with_capacity(count);
    for edge in edges {
        for j in 0..per_edge {
            if slots.len() == count {
                return slots;
            }
            slots.push(edge(j as f32));
        }
    }
    slots
}

/// Perimeter slot for a non-selected tile. Tiles after the selected one
/// shift down by one so the `N - 1` slots are filled without gaps.
pub fn slot_for(index: usize, selected: usize) -> usize {
    if index > selected { index - 1 } else { index }
}

/// Where the selected tile comes to rest.
pub fn focal_position(canvas: Canvas, offset: (f32, f32)) -> Vec2 {
    let c = canvas.center();
    Vec2::new(c.x + offset.0, c.y + offset.1)
}
