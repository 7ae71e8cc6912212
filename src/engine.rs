use std::collections::HashSet;

use crate::components::{Canvas, Frame, Tile, TileRecord, Vec2};
use crate::config::EngineConfig;
use crate::events::EventLog;
use crate::layout::{compute_perimeter_slots, compute_resting_grid, slot_for};
use crate::systems::frame::{FrameBox, run_frame_box};
use crate::systems::hover::run_hover;
use crate::systems::link::run_link_tile;
use crate::systems::motion::{run_motion, run_sizing};
use crate::systems::selection::Selection;

/// All engine state, threaded explicitly through frame steps and press
/// handling. Rest positions and perimeter slots are written once here.
pub struct EngineState {
    pub config: EngineConfig,
    pub canvas: Canvas,
    pub records: Vec<TileRecord>,
    pub tiles: Vec<Tile>,
    pub selection: Selection,
    /// Perimeter slots for `N - 1` tiles, fixed for the session.
    pub slots: Vec<Vec2>,
    pub frame_box: FrameBox,
    pub link_tile: Tile,
    /// Last known pointer position.
    pub pointer: Vec2,
    pub frame: Frame,
    pub events: EventLog,
}

impl EngineState {
    /// Lay out the catalog on `canvas`. Returns `None` for an empty catalog,
    /// a canvas with no area, or a spacing that leaves two tiles on one cell.
    pub fn new(records: Vec<TileRecord>, canvas: Canvas, config: EngineConfig) -> Option<Self> {
        if records.is_empty() || canvas.width <= 0.0 || canvas.height <= 0.0 {
            return None;
        }
        if config.cell_spacing.is_nan() || config.cell_spacing <= 0.0 {
            log::warn!("cell spacing {} must be positive", config.cell_spacing);
            return None;
        }

        let rest = compute_resting_grid(
            records.len(),
            config.grid_columns,
            config.cell_spacing,
            canvas,
        );
        let distinct: HashSet<(u32, u32)> =
            rest.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect();
        if distinct.len() != rest.len() {
            log::warn!(
                "cell spacing {} collapses the {}-tile grid",
                config.cell_spacing,
                rest.len()
            );
            return None;
        }
        let tiles = records
            .iter()
            .zip(&rest)
            .enumerate()
            .map(|(i, (r, &p))| Tile::new(i, p, r.size_category.pixels(), r.width_multiplier))
            .collect();
        let slots = compute_perimeter_slots(
            records.len() - 1,
            config.margin,
            config.corner_inset,
            canvas,
        );
        let frame_box = FrameBox::from_grid(&rest, config.grid_columns.max(1));
        let link_base = config.link_size.pixels();
        let link_tile = Tile::external_link(
            Vec2::new(frame_box.current.right, canvas.height / 2.0),
            link_base,
        );

        log::info!(
            "laid out {} tiles on {}x{} canvas ({} perimeter slots)",
            records.len(),
            canvas.width,
            canvas.height,
            slots.len()
        );

        Some(Self {
            config,
            canvas,
            records,
            tiles,
            selection: Selection::Idle,
            slots,
            frame_box,
            link_tile,
            pointer: canvas.center(),
            frame: Frame(0),
            events: EventLog::default_capacity(),
        })
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selection.index().and_then(|i| self.tiles.get(i))
    }
}

/// Advance one render frame.
///
/// Positions move first, then hover is evaluated against the moved tiles,
/// then sizes react to hover. Every tile is independent of the others.
pub fn run_frame(state: &mut EngineState, pointer: Vec2) {
    state.pointer = pointer;
    run_motion(state);
    run_frame_box(state);
    run_hover(state);
    run_sizing(state);
    run_link_tile(state);
    state.frame = Frame(state.frame.0 + 1);

    #[cfg(debug_assertions)]
    validate_engine(state);
}

/// Assert the structural invariants of the engine. Debug builds run this
/// after every press and frame.
pub fn validate_engine(state: &EngineState) {
    let n = state.tiles.len();
    assert_eq!(n, state.records.len(), "tile/record count mismatch");

    for (i, tile) in state.tiles.iter().enumerate() {
        assert_eq!(tile.index, i, "tile at slot {} has index {}", i, tile.index);
        assert!(
            tile.position.x.is_finite() && tile.position.y.is_finite(),
            "tile {} has non-finite position",
            i
        );
        assert!(
            tile.size.is_finite() && tile.width.is_finite(),
            "tile {} has non-finite size",
            i
        );
    }

    let mut rest = HashSet::new();
    for tile in &state.tiles {
        let key = (tile.rest_position.x.to_bits(), tile.rest_position.y.to_bits());
        assert!(
            rest.insert(key),
            "tile {} shares its rest position",
            tile.index
        );
    }

    if let Selection::Selected(selected) = state.selection {
        assert!(selected < n, "selected index {} out of range", selected);
        let mut targets = HashSet::new();
        for tile in state.tiles.iter().filter(|t| t.index != selected) {
            if let Some(&slot) = state.slots.get(slot_for(tile.index, selected)) {
                assert_eq!(
                    tile.target_position, slot,
                    "tile {} is not targeting its perimeter slot",
                    tile.index
                );
            }
            let key = (
                tile.target_position.x.to_bits(),
                tile.target_position.y.to_bits(),
            );
            assert!(
                targets.insert(key),
                "tile {} shares its perimeter target",
                tile.index
            );
        }
    }
}
