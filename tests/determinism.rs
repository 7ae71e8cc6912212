//! Deterministic replay tests.
//!
//! The engine holds no hidden randomness and no wall-clock time: the same
//! catalog, canvas and pointer script must produce bit-identical state.
//! Pointer scripts are generated from a seeded RNG so failures reproduce.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use squares::components::{Canvas, SizeCategory, TileRecord, Vec2};
use squares::config::EngineConfig;
use squares::draw::DrawList;
use squares::engine::{EngineState, run_frame};
use squares::events::InfoPayload;
use squares::info_panel::InfoPanel;
use squares::layout::{compute_perimeter_slots, compute_resting_grid};
use squares::render::build_draw_list;
use squares::systems::selection::{PressOutcome, handle_press};

const CANVAS: Canvas = Canvas::new(1024.0, 768.0);

fn records(n: usize) -> Vec<TileRecord> {
    let sizes = [SizeCategory::Large, SizeCategory::Small, SizeCategory::Medium];
    (0..n)
        .map(|i| {
            let mut r = TileRecord::new(i, &format!("T{i}"), sizes[i % 3]);
            r.accent_color = [(i * 20) as u8, 100, 200];
            r.width_multiplier = 1.0 + (i % 4) as f32 * 0.25;
            r.link_url = format!("https://example.com/t/{i}");
            r
        })
        .collect()
}

/// One scripted step: a pointer position and whether it presses.
#[derive(Debug, Clone, Copy)]
struct Step {
    pointer: Vec2,
    press: bool,
}

fn script(seed: u64, len: usize) -> Vec<Step> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| Step {
            pointer: Vec2::new(
                rng.random_range(0.0..CANVAS.width),
                rng.random_range(0.0..CANVAS.height),
            ),
            press: rng.random_range(0..10) == 0,
        })
        .collect()
}

/// Snapshot of everything that evolves, as raw bits.
fn snapshot(state: &EngineState) -> Vec<u32> {
    let mut out = Vec::new();
    for t in state.tiles.iter().chain(std::iter::once(&state.link_tile)) {
        out.extend([
            t.position.x.to_bits(),
            t.position.y.to_bits(),
            t.target_position.x.to_bits(),
            t.target_position.y.to_bits(),
            t.size.to_bits(),
            t.width.to_bits(),
            t.hovered as u32,
        ]);
    }
    let b = state.frame_box.current;
    out.extend([
        b.left.to_bits(),
        b.top.to_bits(),
        b.right.to_bits(),
        b.bottom.to_bits(),
    ]);
    out.extend([state.pointer.x.to_bits(), state.pointer.y.to_bits()]);
    out.push(state.selection.index().map_or(u32::MAX, |i| i as u32));
    out
}

fn replay(steps: &[Step], n: usize) -> (EngineState, Vec<PressOutcome>) {
    let mut state =
        EngineState::new(records(n), CANVAS, EngineConfig::default()).expect("engine");
    let mut sink: Vec<Option<InfoPayload>> = Vec::new();
    let mut outcomes = Vec::new();
    for step in steps {
        if step.press {
            outcomes.push(handle_press(&mut state, step.pointer, &mut sink));
        }
        run_frame(&mut state, step.pointer);
    }
    (state, outcomes)
}

#[test]
fn same_script_gives_identical_state() {
    let steps = script(12345, 600);
    let (a, out_a) = replay(&steps, 12);
    let (b, out_b) = replay(&steps, 12);
    assert_eq!(snapshot(&a), snapshot(&b));
    assert_eq!(out_a, out_b);
    assert_eq!(a.events.len(), b.events.len());
    assert!(a.events.iter().eq(b.events.iter()));
}

#[test]
fn different_scripts_diverge() {
    let (a, _) = replay(&script(1, 300), 12);
    let (b, _) = replay(&script(2, 300), 12);
    assert_ne!(snapshot(&a), snapshot(&b));
}

#[test]
fn replay_produces_identical_draw_lists() {
    let steps = script(99, 400);
    let lists: Vec<DrawList> = (0..2)
        .map(|_| {
            let mut state =
                EngineState::new(records(7), CANVAS, EngineConfig::default()).expect("engine");
            let mut info = InfoPanel::new(CANVAS, &state.config);
            let mut list = DrawList::new();
            for step in &steps {
                if step.press {
                    handle_press(&mut state, step.pointer, &mut info);
                }
                run_frame(&mut state, step.pointer);
                info.update();
            }
            build_draw_list(&state, &info, &mut list);
            list
        })
        .collect();
    assert_eq!(lists[0].panels, lists[1].panels);
}

#[test]
fn layout_is_a_pure_function_of_its_inputs() {
    for n in [1, 4, 9, 17, 40] {
        assert_eq!(
            compute_resting_grid(n, 4, 60.0, CANVAS),
            compute_resting_grid(n, 4, 60.0, CANVAS)
        );
        assert_eq!(
            compute_perimeter_slots(n, 50.0, 30.0, CANVAS),
            compute_perimeter_slots(n, 50.0, 30.0, CANVAS)
        );
    }
}

#[test]
fn frame_counter_matches_steps() {
    let steps = script(7, 250);
    let (state, _) = replay(&steps, 5);
    assert_eq!(state.frame.0, 250);
}
