use crate::components::Vec2;
use crate::engine::EngineState;
use crate::events::{EngineEvent, InfoPanelSink, InfoPayload};
use crate::layout::{focal_position, slot_for};
use crate::systems::hover::{hit_test, tile_at};

/// Which tile, if any, is focused. A single optional index, never a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected(usize),
}

impl Selection {
    pub fn index(&self) -> Option<usize> {
        match *self {
            Selection::Idle => None,
            Selection::Selected(i) => Some(i),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }
}

/// Result of a pointer press.
#[derive(Debug, Clone, PartialEq)]
pub enum PressOutcome {
    /// Nothing under the pointer; state untouched.
    Missed,
    Selected(usize),
    Deselected(usize),
    /// The link tile was pressed while a tile was focused.
    OpenLink(String),
}

/// Handle a pointer-down at `pointer`.
///
/// Scans catalog tiles in index order and acts on the first hit. Pressing
/// the focused tile returns everything to rest; pressing any other tile
/// focuses it. If no catalog tile is hit, the link tile is checked. All
/// affected targets are written before returning.
pub fn handle_press(
    state: &mut EngineState,
    pointer: Vec2,
    sink: &mut dyn InfoPanelSink,
) -> PressOutcome {
    let outcome = match tile_at(state, pointer) {
        Some(hit) if state.selection.index() == Some(hit) => {
            deselect(state, sink);
            PressOutcome::Deselected(hit)
        }
        Some(hit) => {
            select(state, hit, sink);
            PressOutcome::Selected(hit)
        }
        None => press_link(state, pointer),
    };

    #[cfg(debug_assertions)]
    crate::engine::validate_engine(state);

    outcome
}

/// Enter `Selected(index)` and point every tile at its new target.
/// An index outside the catalog is ignored.
pub fn select(state: &mut EngineState, index: usize, sink: &mut dyn InfoPanelSink) {
    let Some(record) = state.records.get(index) else {
        log::warn!(
            "select: tile {} out of range ({} tiles)",
            index,
            state.records.len()
        );
        return;
    };
    let payload = InfoPayload::from_record(record);
    log::info!("selected tile {} ({})", index, record.display_name);

    state.selection = Selection::Selected(index);
    assign_targets(state, index);
    state.events.push(EngineEvent::Selected {
        index,
        frame: state.frame,
    });
    sink.show(Some(&payload));
}

/// Return to `Idle`; every tile heads back to its grid cell.
pub fn deselect(state: &mut EngineState, sink: &mut dyn InfoPanelSink) {
    let Some(index) = state.selection.index() else {
        return;
    };
    state.selection = Selection::Idle;
    for tile in &mut state.tiles {
        tile.reset_target();
    }

    log::info!("deselected tile {}", index);
    state.events.push(EngineEvent::Deselected {
        index,
        frame: state.frame,
    });
    sink.show(None);
}

/// Focal position for the selected tile, perimeter slots for the rest.
/// A tile whose slot is missing keeps its current target.
pub fn assign_targets(state: &mut EngineState, selected: usize) {
    let focal = focal_position(state.canvas, state.config.focal_offset);
    for tile in &mut state.tiles {
        if tile.index == selected {
            tile.target_position = focal;
        } else if let Some(&slot) = state.slots.get(slot_for(tile.index, selected)) {
            tile.target_position = slot;
        } else {
            log::debug!("no perimeter slot for tile {}", tile.index);
        }
    }
}

/// Link tile press. Only meaningful while a tile is focused.
fn press_link(state: &mut EngineState, pointer: Vec2) -> PressOutcome {
    let Some(index) = state.selection.index() else {
        return PressOutcome::Missed;
    };
    if !hit_test(
        &state.link_tile,
        pointer,
        state.canvas,
        state.config.parallax_range,
        false,
    ) {
        return PressOutcome::Missed;
    }

    let url = state.records[index].link_url.clone();
    log::info!("opening link for tile {}: {}", index, url);
    state.events.push(EngineEvent::OpenLink {
        index,
        url: url.clone(),
        frame: state.frame,
    });
    PressOutcome::OpenLink(url)
}
