use crate::components::{Canvas, Vec2};
use crate::config::EngineConfig;
use crate::engine::EngineState;
use crate::systems::motion::approach;

/// Axis-aligned edges of the frame outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Outline around the grid that opens up around the focused tile.
#[derive(Debug, Clone)]
pub struct FrameBox {
    pub rest: Bounds,
    pub current: Bounds,
}

impl FrameBox {
    /// Rest edges run through the centres of the outer grid cells: tile 0,
    /// the last tile of the first row, and the last tile.
    pub fn from_grid(rest_positions: &[Vec2], columns: usize) -> Self {
        let first = rest_positions.first().copied().unwrap_or_default();
        let last = rest_positions.last().copied().unwrap_or_default();
        let row_end = columns.min(rest_positions.len()).saturating_sub(1);
        let right = rest_positions.get(row_end).map_or(first.x, |p| p.x);
        let rest = Bounds {
            left: first.x,
            top: first.y,
            right,
            bottom: last.y,
        };
        Self {
            rest,
            current: rest,
        }
    }

    /// Target edges: the rest edges while idle, otherwise a box centred on
    /// the canvas and wide enough for the focused tile's media.
    pub fn target(&self, focused_multiplier: Option<f32>, canvas: Canvas, config: &EngineConfig) -> Bounds {
        let Some(multiplier) = focused_multiplier else {
            return self.rest;
        };
        let c = canvas.center();
        let half = config.expanded_size * multiplier * 0.5 + config.frame_padding;
        Bounds {
            left: c.x - half,
            top: c.y + config.focal_offset.1,
            right: c.x + half,
            bottom: c.y - config.focal_offset.1,
        }
    }

    pub fn step(&mut self, target: Bounds, factor: f32) {
        self.current = Bounds {
            left: approach(self.current.left, target.left, factor),
            top: approach(self.current.top, target.top, factor),
            right: approach(self.current.right, target.right, factor),
            bottom: approach(self.current.bottom, target.bottom, factor),
        };
    }
}

pub fn run_frame_box(state: &mut EngineState) {
    let multiplier = state
        .selection
        .index()
        .and_then(|i| state.tiles.get(i))
        .map(|t| t.width_multiplier);
    let target = state.frame_box.target(multiplier, state.canvas, &state.config);
    state.frame_box.step(target, state.config.size_factor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_resting_grid;

    const CANVAS: Canvas = Canvas::new(800.0, 600.0);

    #[test]
    fn rest_edges_follow_grid_corners() {
        let grid = compute_resting_grid(9, 4, 60.0, CANVAS);
        let fb = FrameBox::from_grid(&grid, 4);
        assert_eq!(fb.rest.left, 310.0);
        assert_eq!(fb.rest.top, 240.0);
        assert_eq!(fb.rest.right, 490.0);
        assert_eq!(fb.rest.bottom, 360.0);
        assert_eq!(fb.current, fb.rest);
    }

    #[test]
    fn short_catalog_clamps_row_end() {
        let grid = compute_resting_grid(2, 4, 60.0, CANVAS);
        let fb = FrameBox::from_grid(&grid, 4);
        assert_eq!(fb.rest.right, grid[1].x);
        assert_eq!(fb.rest.top, fb.rest.bottom);
    }

    #[test]
    fn focused_target_is_centred() {
        let grid = compute_resting_grid(9, 4, 60.0, CANVAS);
        let fb = FrameBox::from_grid(&grid, 4);
        let cfg = EngineConfig::default();
        let t = fb.target(Some(1.5), CANVAS, &cfg);
        // half = 200 * 1.5 / 2 + 100 = 250
        assert_eq!(t.left, 150.0);
        assert_eq!(t.right, 650.0);
        assert_eq!(t.top, 100.0);
        assert_eq!(t.bottom, 500.0);
        assert_eq!(fb.target(None, CANVAS, &cfg), fb.rest);
    }

    #[test]
    fn step_moves_every_edge() {
        let grid = compute_resting_grid(9, 4, 60.0, CANVAS);
        let mut fb = FrameBox::from_grid(&grid, 4);
        let target = Bounds {
            left: 0.0,
            top: 0.0,
            right: 800.0,
            bottom: 600.0,
        };
        fb.step(target, 0.5);
        assert_eq!(fb.current.left, 155.0);
        assert_eq!(fb.current.top, 120.0);
        assert_eq!(fb.current.right, 645.0);
        assert_eq!(fb.current.bottom, 480.0);
    }
}
