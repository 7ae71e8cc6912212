use crate::components::Vec2;
use crate::engine::EngineState;
use crate::systems::hover::hit_test;
use crate::systems::motion::approach;

/// Size of the link tile while nothing is focused.
pub const COLLAPSED_SIZE: f32 = 1.0;

/// Frame phase 4: the link tile rides the frame's right edge at mid-height,
/// grows on hover and collapses while idle.
pub fn run_link_tile(state: &mut EngineState) {
    let anchor = Vec2::new(state.frame_box.current.right, state.canvas.height / 2.0);
    let idle = state.selection.is_idle();
    let factor = state.config.size_factor;
    let stretch = state.config.stretch_factor;
    let link = &mut state.link_tile;

    link.position = anchor;
    link.target_position = anchor;
    link.hovered = hit_test(
        link,
        state.pointer,
        state.canvas,
        state.config.parallax_range,
        false,
    );

    let target = if link.hovered {
        link.base_size * stretch
    } else {
        link.base_size
    };
    link.size = approach(link.size, target, factor);
    if idle {
        link.size = COLLAPSED_SIZE;
    }
    link.width = approach(link.width, link.size, factor);
}
