//! End-to-end command scripts: full fold sequences driven through the
//! interpreter the way a UI session would drive them.

use origami_command::{Interpreter, State};
use origami_model::Model;

fn run(script: &str) -> (Model, Interpreter) {
    let mut model = Model::new();
    let mut interp = Interpreter::new();
    interp.command(script);
    while interp.step(&mut model, 0.0) {}
    (model, interp)
}

/// Steps an animation from `begin` to `end` in fixed increments, then one
/// past the end to finalize.
fn play(interp: &mut Interpreter, model: &mut Model, end_ms: f64, tick_ms: f64) {
    let mut now = 0.0;
    while now < end_ms {
        interp.step(model, now);
        now += tick_ms;
    }
    interp.step(model, end_ms);
    interp.step(model, end_ms + tick_ms);
}

fn counts(model: &Model) -> (usize, usize, usize) {
    (model.faces.len(), model.points.len(), model.segments.len())
}

#[test]
fn scripted_splits_match_the_structural_laws() {
    let (model, _) = run("d 400 400; by3d 0 2; by3d 1 3");
    assert_eq!(counts(&model), (4, 5, 8));

    let (model, _) = run("d 400 400; c3d 0 1");
    assert_eq!(counts(&model), (2, 6, 7));
}

#[test]
fn valley_fold_script_halves_the_sheet() {
    // Crease the vertical midline, then fold the right half up by 90.
    let (mut model, mut interp) = run("d 400 400; c3d 0 1");
    interp.command("t 800 r 6 90 1 2)");
    play(&mut interp, &mut model, 800.0, 16.0);

    assert_eq!(interp.state(), State::Run);
    // Both right-hand corners now stand perpendicular to the sheet,
    // directly over the crease line x = 0.
    for corner in [1, 2] {
        let p = model.points[corner].pos_3d();
        assert!(p.x.abs() < 1e-6, "corner {corner} at {p}");
        assert!((p.z.abs() - 200.0).abs() < 1e-6, "corner {corner} at {p}");
    }
    // The crease pattern never moves.
    assert_eq!(model.points[1].pos_2d().to_array(), [200.0, -200.0]);
}

#[test]
fn perturb_then_adjust_restores_edge_lengths() {
    // A raw translation of one corner stretches its incident edges; the
    // solver must pull them back under the length-check tolerance.
    let (mut model, mut interp) = run("d 400 400; c3d 0 1; m 30 0 40 1");
    assert!(!model.check_lengths().is_empty());

    interp.command("a");
    while interp.step(&mut model, 0.0) {}

    assert!(model.check_lengths().is_empty());
}

#[test]
fn undo_rewinds_a_whole_fold_sequence() {
    let (mut model, mut interp) = run("d 400 400");
    let fresh = model.serialize().unwrap();

    interp.command("c3d 0 1");
    while interp.step(&mut model, 0.0) {}
    let creased = model.serialize().unwrap();

    interp.command("t 100 r 6 90 1 2)");
    play(&mut interp, &mut model, 100.0, 16.0);
    assert_ne!(model.serialize().unwrap(), creased);

    interp.command("u");
    while interp.step(&mut model, 0.0) {}
    assert_eq!(model.serialize().unwrap(), creased);

    interp.command("u");
    while interp.step(&mut model, 0.0) {}
    assert_eq!(model.serialize().unwrap(), fresh);
}

#[test]
fn history_records_replayable_commands_only() {
    let (mut model, mut interp) = run("d 400 400; c3d 0 1; sp 0 1");
    interp.command("c3d 1 2; u");
    while interp.step(&mut model, 0.0) {}

    // Selections are logged, the undone split is not.
    assert_eq!(interp.history(), ["d 400 400", "c3d 0 1", "sp 0 1"]);

    // Replaying the log on a fresh model reproduces the mesh.
    let replay_script = interp.history().join(";");
    let (replayed, _) = run(&replay_script);
    assert_eq!(
        replayed.serialize().unwrap(),
        model.serialize().unwrap()
    );
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let script = "\
// build the sheet
d 400 400

c3d 0 1 // vertical crease";
    let (model, _) = run(script);
    assert_eq!(counts(&model), (2, 6, 7));
}

#[test]
fn moveon_collapses_points_onto_the_target() {
    let (mut model, mut interp) = run("d 400 400");
    interp.command("t 200 mo 0 2)");
    play(&mut interp, &mut model, 200.0, 16.0);

    let target = model.points[0].pos_3d();
    let moved = model.points[2].pos_3d();
    assert!((moved - target).length() < 1e-9);
}

#[test]
fn offset_survives_a_round_trip_through_undo_of_a_later_command() {
    let (mut model, mut interp) = run("d 400 400; c3d 0 1; o 5 1");
    assert_eq!(model.faces[1].offset, 5.0);

    interp.command("c3d 1 2; u");
    while interp.step(&mut model, 0.0) {}
    assert_eq!(model.faces[1].offset, 5.0);
}

#[test]
fn flat_resets_folded_height() {
    let (mut model, mut interp) = run("d 400 400; c3d 0 1");
    interp.command("t 100 r 6 90 1 2)");
    play(&mut interp, &mut model, 100.0, 16.0);
    assert!(model.points[1].pos_3d().z.abs() > 100.0);

    interp.command("flat");
    while interp.step(&mut model, 0.0) {}
    assert_eq!(model.points[1].pos_3d().z, 0.0);
}
