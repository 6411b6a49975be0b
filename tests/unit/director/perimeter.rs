use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{director::base::Director, scene::host::GradientView};

fn speckles(enabled: &[bool]) -> Vec<Speckle> {
    enabled
        .iter()
        .map(|&on| Speckle {
            enabled: on,
            ..Speckle::default()
        })
        .collect()
}

fn host(enabled: &[bool]) -> Rc<RefCell<GradientView>> {
    let mut view = GradientView::new();
    view.speckles = speckles(enabled);
    Rc::new(RefCell::new(view))
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn forced_refresh_spaces_enabled_speckles_evenly() {
    let mut motion = PerimeterMotion::default();
    let list = speckles(&[true, true, true, true, true]);
    let mut ctx = TickCtx::new(0.0, 1.0);
    motion.refresh_distribution(&list, true, &mut ctx);

    assert!(ctx.render_input_modified());
    assert_eq!(motion.distribution_indices(), &[0, 1, 2, 3, 4]);
    for i in 0..5 {
        assert_close(motion.progress(i).unwrap(), i as f64 / 5.0);
    }
}

#[test]
fn disabled_speckles_are_skipped_in_distribution() {
    let mut motion = PerimeterMotion::default();
    let list = speckles(&[false, true, false, true, true]);
    let mut ctx = TickCtx::new(0.0, 1.0);
    motion.refresh_distribution(&list, true, &mut ctx);

    assert_eq!(motion.distribution_indices(), &[1, 3, 4]);
    assert_close(motion.progress(1).unwrap(), 0.0);
    assert_close(motion.progress(3).unwrap(), 1.0 / 3.0);
    assert_close(motion.progress(4).unwrap(), 2.0 / 3.0);
}

#[test]
fn no_enabled_speckles_distributes_all_slots() {
    let mut motion = PerimeterMotion::default();
    let list = speckles(&[false, false]);
    let mut ctx = TickCtx::new(0.0, 1.0);
    motion.refresh_distribution(&list, true, &mut ctx);
    assert_eq!(motion.distribution_indices(), &[0, 1]);
    assert_close(motion.progress(1).unwrap(), 0.5);
}

#[test]
fn unchanged_distribution_is_not_recomputed() {
    let mut motion = PerimeterMotion::default();
    let list = speckles(&[true, true]);
    let mut ctx = TickCtx::new(0.0, 1.0);
    motion.refresh_distribution(&list, true, &mut ctx);
    motion.progress_state[0] = 0.3;

    let mut ctx = TickCtx::new(0.0, 1.0);
    motion.refresh_distribution(&list, false, &mut ctx);
    assert!(!ctx.render_input_modified());
    assert_close(motion.progress(0).unwrap(), 0.3);

    // Toggling one speckle redistributes everyone.
    let toggled = speckles(&[true, true, true]);
    motion.refresh_distribution(&toggled, false, &mut ctx);
    assert!(ctx.render_input_modified());
    assert_close(motion.progress(0).unwrap(), 0.0);
    assert_close(motion.progress(2).unwrap(), 2.0 / 3.0);
}

#[test]
fn direction_sign_negates_progress_delta() {
    let list = speckles(&[true, true, true]);
    let mut deltas = Vec::new();
    for direction in [Direction::Clockwise, Direction::CounterClockwise] {
        let mut motion = PerimeterMotion::new(PerimeterConfig {
            direction,
            movement_rate: 0.1,
            ..PerimeterConfig::default()
        });
        let mut ctx = TickCtx::new(0.5, 2.0);
        motion.refresh_distribution(&list, true, &mut ctx);
        let before = motion.progress(1).unwrap();
        motion.advance_progress(list.len(), &ctx);
        deltas.push(motion.progress(1).unwrap() - before);
    }
    assert_close(deltas[0], 0.1);
    assert_close(deltas[0], -deltas[1]);
}

#[test]
fn progress_wraps_into_unit_interval() {
    let list = speckles(&[true]);
    let mut motion = PerimeterMotion::new(PerimeterConfig {
        direction: Direction::CounterClockwise,
        movement_rate: 0.25,
        ..PerimeterConfig::default()
    });
    let mut ctx = TickCtx::new(1.0, 1.0);
    motion.refresh_distribution(&list, true, &mut ctx);
    motion.advance_progress(list.len(), &ctx);
    assert_close(motion.progress(0).unwrap(), 0.75);
}

#[test]
fn negligible_delta_is_skipped() {
    let list = speckles(&[true, true]);
    let mut motion = PerimeterMotion::default();
    let mut ctx = TickCtx::new(1e-9, 1.0);
    motion.refresh_distribution(&list, true, &mut ctx);
    motion.advance_progress(list.len(), &ctx);
    assert_eq!(motion.progress(1), Some(0.5));
}

#[test]
fn setters_clamp_and_flag_changes() {
    let mut motion = PerimeterMotion::default();
    assert!(!motion.take_render_input_modified());

    motion.set_corner_radius(0.9);
    assert_eq!(motion.corner_radius(), 0.5);
    assert!(motion.take_render_input_modified());

    motion.set_corner_radius(-1.0);
    assert_eq!(motion.corner_radius(), 0.0);

    motion.set_movement_rate(-3.0);
    assert_eq!(motion.movement_rate(), 0.0);
    motion.set_position_response_rate(-0.1);
    assert_eq!(motion.position_response_rate(), 0.0);

    motion.take_render_input_modified();
    motion.set_direction(Direction::Clockwise);
    assert!(!motion.take_render_input_modified());
    motion.set_direction(Direction::CounterClockwise);
    assert!(motion.take_render_input_modified());
    assert_eq!(motion.direction().sign(), -1.0);
}

#[test]
fn negative_inset_is_kept() {
    let mut motion = PerimeterMotion::default();
    motion.set_inset(-0.2);
    assert_eq!(motion.inset(), -0.2);
    assert_close(motion.path().total_length(), 4.0 * 1.4 - 8.0 * 0.18 + std::f64::consts::TAU * 0.18);
}

#[test]
#[should_panic(expected = "inset must be <= 1")]
fn inset_above_one_panics() {
    let mut motion = PerimeterMotion::default();
    motion.set_inset(1.5);
}

#[test]
#[should_panic(expected = "inset must be <= 1")]
fn nan_inset_panics() {
    PerimeterMotion::new(PerimeterConfig {
        inset: f64::NAN,
        ..PerimeterConfig::default()
    });
}

#[test]
fn try_new_reports_bad_inset() {
    let err = PerimeterMotion::try_new(PerimeterConfig {
        inset: 2.0,
        ..PerimeterConfig::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("inset must be <= 1"));
}

#[test]
fn path_is_rebuilt_lazily() {
    let mut motion = PerimeterMotion::default();
    let first = motion.path().clone();
    assert_eq!(first.segments().len(), 8);

    motion.set_corner_radius(0.0);
    assert!(motion.path_needs_update);
    assert_eq!(motion.path.segments().len(), 8);

    assert_eq!(motion.path().segments().len(), 4);
    assert!(!motion.path_needs_update);
}

#[test]
fn initialize_snaps_to_path_and_clears_refresh() {
    let host = host(&[true, true, true, true]);
    let mut director = Director::new(PerimeterMotion::default());
    director.attach(&host);
    director.initialize();

    let view = host.borrow();
    let mut motion = director.strategy().clone();
    for (i, s) in view.speckles.iter().enumerate() {
        let expected = motion.sample_point(i as f64 / 4.0);
        assert_eq!(s.position.current(), expected);
        assert_eq!(s.position.target(), expected);
    }
    assert!(!director.strategy().needs_position_refresh);
    assert_eq!(view.parameters.points.len(), 4);
}

#[test]
fn geometry_change_snaps_positions_next_frame() {
    let host = host(&[true, true]);
    let mut director = Director::new(PerimeterMotion::default());
    director.attach(&host);
    director.initialize();
    host.borrow_mut().render_input_was_modified = false;

    director.configure(|m| m.set_inset(0.2));
    assert!(host.borrow().render_input_was_modified);

    director.update(0.0);
    let view = host.borrow();
    let mut motion = director.strategy().clone();
    for (i, s) in view.speckles.iter().enumerate() {
        let expected = motion.sample_point(i as f64 / 2.0);
        assert_eq!(s.position.current(), expected);
    }
}

#[test]
fn update_eases_toward_moving_target() {
    let host = host(&[true, true]);
    let mut director = Director::new(PerimeterMotion::default());
    director.attach(&host);
    director.initialize();
    let start = host.borrow().speckles[0].position.current();

    director.update(0.1);

    let view = host.borrow();
    let mut motion = director.strategy().clone();
    let target = motion.sample_point(motion.progress(0).unwrap());
    let pos = view.speckles[0].position;
    assert_eq!(pos.target(), target);
    assert_ne!(pos.current(), start);
    assert_ne!(pos.current(), target);
    assert!(view.render_input_was_modified);
}

#[test]
fn progress_capacity_grows_with_speckle_count() {
    let flags = vec![true; COLOR_SLOT + 2];
    let host = host(&flags);
    let mut director = Director::new(PerimeterMotion::default());
    director.attach(&host);
    director.initialize();

    let motion = director.strategy();
    assert_eq!(motion.progress_state().len(), COLOR_SLOT + 2);
    assert_close(
        motion.progress(COLOR_SLOT + 1).unwrap(),
        (COLOR_SLOT + 1) as f64 / (COLOR_SLOT + 2) as f64,
    );
}

#[test]
fn reattaching_keeps_progress_and_positions() {
    let host = host(&[true, true, true, true]);
    let mut director = Director::new(PerimeterMotion::default());
    director.attach(&host);
    director.initialize();
    director.update(0.5);

    let before = director.strategy().progress_state().to_vec();
    assert_close(before[0], 0.125);
    let positions: Vec<_> = host.borrow().speckles.iter().map(|s| s.position).collect();

    director.detach();
    director.attach(&host);
    director.update(0.0);

    assert_eq!(director.strategy().progress_state(), before.as_slice());
    let after: Vec<_> = host.borrow().speckles.iter().map(|s| s.position).collect();
    assert_eq!(after, positions);
}
