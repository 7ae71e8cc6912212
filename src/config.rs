use serde::Deserialize;

use crate::components::SizeCategory;

/// Tuning constants for layout and motion. Loaded from RON; every field
/// falls back to its default when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Columns of the resting grid.
    pub grid_columns: usize,
    /// Distance between neighbouring grid cells (pixels).
    pub cell_spacing: f32,
    /// Size multiplier applied to a hovered tile.
    pub stretch_factor: f32,
    /// Fraction of the size gap closed per frame.
    pub size_factor: f32,
    /// Fraction of the position gap closed per frame.
    pub position_factor: f32,
    /// Size of the selected tile.
    pub expanded_size: f32,
    /// Distance of the perimeter edges from the canvas border.
    pub margin: f32,
    /// Gap kept free at each perimeter corner.
    pub corner_inset: f32,
    /// Offset of the focal position from the canvas centre.
    pub focal_offset: (f32, f32),
    /// Maximum parallax shift in pixels for the largest tile.
    pub parallax_range: f32,
    /// Horizontal padding between the focused tile and the frame box.
    pub frame_padding: f32,
    /// Info panel slide offsets from the canvas centre.
    pub info_offset: (f32, f32),
    pub info_factor: f32,
    pub info_size: (f32, f32),
    /// Base size class of the link tile.
    pub link_size: SizeCategory,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_columns: 4,
            cell_spacing: 60.0,
            stretch_factor: 1.3,
            size_factor: 0.2,
            position_factor: 0.1,
            expanded_size: 200.0,
            margin: 50.0,
            corner_inset: 30.0,
            focal_offset: (0.0, -200.0),
            parallax_range: 10.0,
            frame_padding: 100.0,
            info_offset: (100.0, 50.0),
            info_factor: 0.075,
            info_size: (500.0, 200.0),
            link_size: SizeCategory::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg: EngineConfig = ron::from_str("(grid_columns: 3, margin: 20.0)").unwrap();
        assert_eq!(cfg.grid_columns, 3);
        assert_eq!(cfg.margin, 20.0);
        assert_eq!(cfg.cell_spacing, 60.0);
        assert_eq!(cfg.focal_offset, (0.0, -200.0));
    }

    #[test]
    fn unknown_link_size_is_rejected() {
        assert!(ron::from_str::<EngineConfig>("(link_size: Huge)").is_err());
    }

    #[test]
    fn link_size_parses() {
        let cfg: EngineConfig = ron::from_str("(link_size: Large)").unwrap();
        assert_eq!(cfg.link_size, SizeCategory::Large);
    }
}
