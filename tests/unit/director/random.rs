use super::*;
use crate::animation::kinetic::Kinetic2D;

fn in_unit_square(p: Point) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}

#[test]
fn initialize_places_speckle_at_rest_in_unit_square() {
    let mut walk = RandomWalk::with_seed(42);
    let mut speckle = Speckle::default();
    let mut ctx = TickCtx::new(0.0, 1.0);
    walk.initialize_speckle(&mut speckle, 0, &mut ctx);

    assert!(ctx.render_input_modified());
    assert_eq!(speckle.position.current(), speckle.position.target());
    assert!(in_unit_square(speckle.position.current()));
}

#[test]
fn same_seed_gives_same_walk() {
    let mut a = RandomWalk::with_seed(9);
    let mut b = RandomWalk::from_config(&RandomWalkConfig { seed: Some(9) });
    let mut sa = Speckle::default();
    let mut sb = Speckle::default();
    for _ in 0..20 {
        let mut ctx = TickCtx::new(0.1, 1.0);
        a.update_speckle(&mut sa, 0, &mut ctx);
        b.update_speckle(&mut sb, 0, &mut ctx);
    }
    assert_eq!(sa.position, sb.position);
}

#[test]
fn retargets_when_one_axis_is_close() {
    let mut walk = RandomWalk::with_seed(1);
    let mut speckle = Speckle {
        position: Kinetic2D::new(Point::new(0.0, 0.5)),
        ..Speckle::default()
    };
    // Far on x, aligned on y.
    speckle.position.set_target(Point::new(1.0, 0.5));

    let mut ctx = TickCtx::new(0.0, 1.0);
    walk.update_speckle(&mut speckle, 0, &mut ctx);
    assert!(ctx.render_input_modified());
    assert_ne!(speckle.position.target(), Point::new(1.0, 0.5));
    assert_eq!(speckle.position.current(), Point::new(0.0, 0.5));
}

#[test]
fn keeps_target_while_both_axes_are_far() {
    let mut walk = RandomWalk::with_seed(1);
    let mut speckle = Speckle {
        position: Kinetic2D::new(Point::new(0.0, 0.0)),
        ..Speckle::default()
    };
    speckle.position.set_target(Point::new(1.0, 1.0));

    let mut ctx = TickCtx::new(0.1, 1.0);
    walk.update_speckle(&mut speckle, 0, &mut ctx);
    assert!(!ctx.render_input_modified());
    assert_eq!(speckle.position.target(), Point::new(1.0, 1.0));
    let current = speckle.position.current();
    assert!(current.x > 0.0 && current.x < 1.0);
}

#[test]
fn zero_speed_does_not_move() {
    let mut walk = RandomWalk::with_seed(3);
    let mut speckle = Speckle {
        position: Kinetic2D::new(Point::new(0.0, 0.0)),
        ..Speckle::default()
    };
    speckle.position.set_target(Point::new(1.0, 1.0));
    let mut ctx = TickCtx::new(1.0, 0.0);
    walk.update_speckle(&mut speckle, 0, &mut ctx);
    assert_eq!(speckle.position.current(), Point::new(0.0, 0.0));
}
