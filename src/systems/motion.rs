use crate::components::{Tile, Vec2};
use crate::config::EngineConfig;
use crate::engine::EngineState;

/// One exponential smoothing step: close `factor` of the gap to `target`.
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

pub fn approach_vec(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    Vec2::new(
        approach(current.x, target.x, factor),
        approach(current.y, target.y, factor),
    )
}

/// Size the tile is heading for this frame.
///
/// Resting tiles aim for their base size, stretched while hovered. The
/// selected tile aims for the expanded size, stretched while hovered.
pub fn size_target(tile: &Tile, selected: bool, config: &EngineConfig) -> f32 {
    let base = if selected {
        config.expanded_size
    } else {
        tile.base_size
    };
    if tile.hovered {
        base * config.stretch_factor
    } else {
        base
    }
}

/// Width follows the current size; the selected tile widens to its media
/// aspect ratio.
pub fn width_target(tile: &Tile, selected: bool) -> f32 {
    if selected {
        tile.size * tile.width_multiplier
    } else {
        tile.size
    }
}

/// Advance a tile's position toward its target.
pub fn step_position(tile: &mut Tile, factor: f32) {
    tile.position = approach_vec(tile.position, tile.target_position, factor);
}

/// Advance size first, then width against the updated size.
pub fn step_size(tile: &mut Tile, selected: bool, config: &EngineConfig) {
    let target = size_target(tile, selected, config);
    tile.size = approach(tile.size, target, config.size_factor);
    let target = width_target(tile, selected);
    tile.width = approach(tile.width, target, config.size_factor);
}

/// Frame phase 1: every catalog tile moves toward its assigned target.
pub fn run_motion(state: &mut EngineState) {
    let factor = state.config.position_factor;
    for tile in &mut state.tiles {
        step_position(tile, factor);
    }
}

/// Frame phase 3: sizes react to hover and selection. Runs after hover.
pub fn run_sizing(state: &mut EngineState) {
    let selected = state.selection.index();
    for tile in &mut state.tiles {
        step_size(tile, selected == Some(tile.index), &state.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> Tile {
        Tile::new(0, Vec2::new(100.0, 100.0), 40.0, 2.0)
    }

    #[test]
    fn approach_closes_fraction_of_gap() {
        assert_eq!(approach(0.0, 100.0, 0.2), 20.0);
        assert_eq!(approach(100.0, 0.0, 0.5), 50.0);
    }

    #[test]
    fn approach_at_equilibrium_is_identity() {
        for v in [0.0_f32, -3.5, 42.0, 1e6] {
            assert_eq!(approach(v, v, 0.2), v);
            assert_eq!(approach(v, v, 0.1), v);
        }
    }

    #[test]
    fn approach_never_overshoots() {
        let target = 10.0;
        let mut v = -250.0_f32;
        let mut gap = (target - v).abs();
        for _ in 0..40 {
            v = approach(v, target, 0.2);
            let next_gap = (target - v).abs();
            assert!(next_gap < gap);
            assert!(v <= target);
            gap = next_gap;
        }
    }

    #[test]
    fn resting_size_targets() {
        let cfg = EngineConfig::default();
        let mut t = tile();
        assert_eq!(size_target(&t, false, &cfg), 40.0);
        t.hovered = true;
        assert!((size_target(&t, false, &cfg) - 52.0).abs() < 1e-4);
    }

    #[test]
    fn selected_size_targets() {
        let cfg = EngineConfig::default();
        let mut t = tile();
        assert_eq!(size_target(&t, true, &cfg), 200.0);
        t.hovered = true;
        assert!((size_target(&t, true, &cfg) - 260.0).abs() < 1e-3);
    }

    #[test]
    fn width_stretches_only_when_selected() {
        let mut t = tile();
        t.size = 100.0;
        assert_eq!(width_target(&t, false), 100.0);
        assert_eq!(width_target(&t, true), 200.0);
        t.width_multiplier = 1.0;
        assert_eq!(width_target(&t, true), 100.0);
    }

    #[test]
    fn step_size_grows_toward_expanded() {
        let cfg = EngineConfig::default();
        let mut t = tile();
        step_size(&mut t, true, &cfg);
        // 40 + (200 - 40) * 0.2
        assert!((t.size - 72.0).abs() < 1e-4);
        // width aims at 72 * 2 = 144 from 40
        assert!((t.width - (40.0 + (144.0 - 40.0) * 0.2)).abs() < 1e-4);
    }

    #[test]
    fn step_position_moves_toward_target() {
        let mut t = tile();
        t.target_position = Vec2::new(200.0, 0.0);
        step_position(&mut t, 0.1);
        assert!((t.position.x - 110.0).abs() < 1e-4);
        assert!((t.position.y - 90.0).abs() < 1e-4);
    }
}
