use approx::assert_relative_eq;
use impulse2d::collision::{narrow_phase, CollisionPair, ContactManifold};
use impulse2d::{Body, BodyHandle, BodyRole, PhysicsWorld, Shape, Vec2};
use std::cell::RefCell;
use std::rc::Rc;

fn detect_pair(world: &PhysicsWorld, a: BodyHandle, b: BodyHandle) -> Option<ContactManifold> {
    narrow_phase::detect(
        CollisionPair::new(a, b),
        world.get_body(a).unwrap(),
        world.get_body(b).unwrap(),
    )
}

#[test]
fn test_mass_properties() {
    let mut body = Body::new(Shape::circle(5.0), Vec2::zero());

    // Default mass of 1
    assert_eq!(body.get_mass(), 1.0);
    assert_eq!(body.get_inverse_mass(), 1.0);

    body.set_mass(2.0);
    assert_eq!(body.get_inverse_mass(), 0.5);
    assert!(body.get_inertia() > 0.0);
    assert!(body.get_inverse_inertia() > 0.0);

    // Zero mass means immovable
    body.set_mass(0.0);
    assert_eq!(body.get_inverse_mass(), 0.0);
    assert_eq!(body.get_inverse_inertia(), 0.0);

    // Static bodies are immovable regardless of mass
    let static_body = Body::new_static(Shape::rectangle(10.0, 10.0), Vec2::zero());
    assert_eq!(static_body.get_inverse_mass(), 0.0);
    assert_eq!(static_body.get_inverse_inertia(), 0.0);
}

#[test]
fn test_circle_circle_detection() {
    let mut world = PhysicsWorld::new();
    let a = world.add_body(Body::new(Shape::circle(5.0), Vec2::new(0.0, 0.0)));
    let b = world.add_body(Body::new(Shape::circle(5.0), Vec2::new(8.0, 0.0)));

    // Centers 8 apart, radii sum 10: overlapping by 2
    let manifold = detect_pair(&world, a, b).expect("circles should overlap");
    assert_relative_eq!(manifold.depth, 2.0, epsilon = 1.0e-6);
    assert_relative_eq!(manifold.normal.x, 1.0, epsilon = 1.0e-6);
    assert_relative_eq!(manifold.normal.y, 0.0, epsilon = 1.0e-6);
    assert_eq!(manifold.contacts.len(), 1);
    assert_relative_eq!(manifold.contacts[0].x, 5.0, epsilon = 1.0e-6);

    // Centers 12 apart: no contact
    world.get_body_mut(b).unwrap().set_position(Vec2::new(12.0, 0.0));
    assert!(detect_pair(&world, a, b).is_none());
}

#[test]
fn test_circle_circle_normal_points_from_a_to_b() {
    let mut world = PhysicsWorld::new();
    let a = world.add_body(Body::new(Shape::circle(5.0), Vec2::zero()));
    let b = world.add_body(Body::new(Shape::circle(5.0), Vec2::zero()));

    for i in 0..12 {
        let angle = i as f32 * std::f32::consts::TAU / 12.0;
        let offset = Vec2::from_angle(angle, 7.0);
        world.get_body_mut(b).unwrap().set_position(offset);

        let manifold = detect_pair(&world, a, b).expect("circles should overlap");
        assert!(manifold.normal.dot(&offset) >= 0.0);
    }
}

#[test]
fn test_coincident_circles_tie_break() {
    let mut world = PhysicsWorld::new();
    let a = world.add_body(Body::new(Shape::circle(5.0), Vec2::new(3.0, 4.0)));
    let b = world.add_body(Body::new(Shape::circle(5.0), Vec2::new(3.0, 4.0)));

    let manifold = detect_pair(&world, a, b).expect("coincident circles collide");
    assert_eq!(manifold.normal, Vec2::new(1.0, 0.0));
    assert_relative_eq!(manifold.depth, 10.0);
    assert!(manifold.normal.x.is_finite() && manifold.normal.y.is_finite());
}

#[test]
fn test_rect_rect_detection() {
    let mut world = PhysicsWorld::new();
    let a = world.add_body(Body::new(Shape::rectangle(10.0, 10.0), Vec2::new(0.0, 0.0)));
    let b = world.add_body(Body::new(Shape::rectangle(10.0, 10.0), Vec2::new(8.0, 0.0)));

    // Overlapping by 2 along x, 10 along y: x is the minimum axis
    let manifold = detect_pair(&world, a, b).expect("rectangles should overlap");
    assert_relative_eq!(manifold.depth, 2.0, epsilon = 1.0e-5);
    assert_relative_eq!(manifold.normal.x, 1.0, epsilon = 1.0e-5);
    assert_relative_eq!(manifold.normal.y, 0.0, epsilon = 1.0e-5);

    // Separated
    world.get_body_mut(b).unwrap().set_position(Vec2::new(20.5, 0.0));
    assert!(detect_pair(&world, a, b).is_none());

    // A rotated rectangle reaches further along the diagonal
    world.get_body_mut(b).unwrap().set_position(Vec2::new(12.0, 0.0));
    world
        .get_body_mut(b)
        .unwrap()
        .set_angle(std::f32::consts::FRAC_PI_4);
    let manifold = detect_pair(&world, a, b).expect("rotated corner should reach");
    assert!(manifold.depth > 0.0);
    assert!(manifold.normal.dot(&Vec2::new(1.0, 0.0)) > 0.0);
}

#[test]
fn test_circle_rect_detection() {
    let mut world = PhysicsWorld::new();
    let circle = world.add_body(Body::new(Shape::circle(5.0), Vec2::new(0.0, 0.0)));
    let rect = world.add_body(Body::new(Shape::rectangle(10.0, 10.0), Vec2::new(8.0, 0.0)));

    // Circle center 3 from the face, radius 5: depth 2
    let manifold = detect_pair(&world, circle, rect).expect("should overlap");
    assert_relative_eq!(manifold.depth, 2.0, epsilon = 1.0e-5);
    assert_relative_eq!(manifold.normal.x, 1.0, epsilon = 1.0e-5);
    assert_relative_eq!(manifold.contacts[0].x, 3.0, epsilon = 1.0e-5);
    assert_relative_eq!(manifold.contacts[0].y, 0.0, epsilon = 1.0e-5);

    // Same configuration with the rectangle as body A flips the normal
    let manifold = detect_pair(&world, rect, circle).expect("should overlap");
    assert_relative_eq!(manifold.normal.x, -1.0, epsilon = 1.0e-5);

    // Out of reach
    world
        .get_body_mut(circle)
        .unwrap()
        .set_position(Vec2::new(-3.0, 0.0));
    assert!(detect_pair(&world, circle, rect).is_none());
}

#[test]
fn test_circle_inside_rect_degenerate() {
    let mut world = PhysicsWorld::new();
    let circle = world.add_body(Body::new(Shape::circle(3.0), Vec2::new(10.0, 0.0)));
    let rect = world.add_body(Body::new(Shape::rectangle(20.0, 12.0), Vec2::new(8.0, 0.0)));

    // Center inside the box: pushed out through the nearest face, with a
    // depth that covers the full escape
    let manifold = detect_pair(&world, circle, rect).expect("inside counts as collision");
    assert!(manifold.depth >= 3.0);
    assert!(manifold.normal.x.is_finite() && manifold.normal.y.is_finite());
    assert_relative_eq!(manifold.normal.length(), 1.0, epsilon = 1.0e-5);

    // Center exactly on the rectangle's center still resolves
    world
        .get_body_mut(circle)
        .unwrap()
        .set_position(Vec2::new(8.0, 0.0));
    let manifold = detect_pair(&world, circle, rect).expect("dead center still collides");
    assert!(manifold.depth.is_finite());
    assert!(manifold.normal.x.is_finite() && manifold.normal.y.is_finite());
}

#[test]
fn test_body_role_tag() {
    let mut body = Body::new(Shape::circle(5.0), Vec2::zero());
    assert_eq!(body.get_role(), BodyRole::None);

    body.set_role(BodyRole::Projectile);
    assert_eq!(body.get_role(), BodyRole::Projectile);

    // The tag survives the trip through the world untouched
    let mut world = PhysicsWorld::new();
    let handle = world.add_body(body);
    world.step(1.0 / 60.0);
    assert_eq!(world.get_body(handle).unwrap().get_role(), BodyRole::Projectile);
}

#[test]
fn test_static_toggle_resets_motion() {
    let mut body = Body::new(Shape::circle(5.0), Vec2::zero());
    body.set_velocity(Vec2::new(10.0, 0.0));
    body.set_angular_velocity(2.0);

    body.set_static(true);
    assert!(body.is_static());
    assert_eq!(body.get_velocity(), Vec2::zero());
    assert_eq!(body.get_angular_velocity(), 0.0);
    assert_eq!(body.get_inverse_mass(), 0.0);

    body.set_static(false);
    assert!(!body.is_static());
    assert!(!body.is_sleeping());
    assert_eq!(body.get_inverse_mass(), 1.0);
}

#[test]
fn test_static_body_ignores_impulses_and_forces() {
    let mut body = Body::new_static(Shape::circle(5.0), Vec2::zero());

    body.apply_impulse(Vec2::new(100.0, 100.0));
    body.apply_impulse_at(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
    body.apply_force(Vec2::new(1000.0, 0.0));
    body.apply_torque(50.0);

    assert_eq!(body.get_velocity(), Vec2::zero());
    assert_eq!(body.get_angular_velocity(), 0.0);
}

#[test]
fn test_restitution_rebound() {
    let mut world = PhysicsWorld::with_gravity(Vec2::zero());

    let mut mover = Body::new(Shape::circle(5.0), Vec2::new(-8.0, 0.0));
    mover.set_velocity(Vec2::new(100.0, 0.0));
    let mover = world.add_body(mover);
    let wall = world.add_body(Body::new_static(Shape::circle(5.0), Vec2::new(0.0, 0.0)));

    // Overlapping head-on at 100 px/s with restitution 0.5 on both sides
    world.step(1.0 / 60.0);

    // One damping application before the solver: 100 * 0.995 = 99.5
    let velocity = world.get_body(mover).unwrap().get_velocity();
    assert_relative_eq!(velocity.x, -49.75, epsilon = 0.5);
    assert_relative_eq!(velocity.y, 0.0, epsilon = 1.0e-4);

    // The static wall never moves
    let wall_body = world.get_body(wall).unwrap();
    assert_eq!(wall_body.get_velocity(), Vec2::zero());
    assert_eq!(wall_body.get_position(), Vec2::new(0.0, 0.0));
}

#[test]
fn test_degenerate_configurations_stay_finite() {
    let mut world = PhysicsWorld::new();

    // Coincident circles
    world.add_body(Body::new(Shape::circle(5.0), Vec2::new(0.0, 0.0)));
    world.add_body(Body::new(Shape::circle(5.0), Vec2::new(0.0, 0.0)));

    // Circle dead-center inside a rectangle
    world.add_body(Body::new(Shape::circle(4.0), Vec2::new(100.0, 0.0)));
    world.add_body(Body::new(Shape::rectangle(20.0, 20.0), Vec2::new(100.0, 0.0)));

    for _ in 0..10 {
        world.step(1.0 / 60.0);
    }

    for (_, body) in world.bodies() {
        let position = body.get_position();
        let velocity = body.get_velocity();
        assert!(position.x.is_finite() && position.y.is_finite());
        assert!(velocity.x.is_finite() && velocity.y.is_finite());
        assert!(body.get_angle().is_finite());
        assert!(body.get_angular_velocity().is_finite());
    }
}

#[test]
fn test_slow_body_falls_asleep() {
    let mut world = PhysicsWorld::with_gravity(Vec2::zero());

    let mut body = Body::new(Shape::rectangle(10.0, 10.0), Vec2::zero());
    body.set_velocity(Vec2::new(1.5, 0.0));
    let handle = world.add_body(body);

    // Sub-threshold speed for well over the half-second sleep delay
    for _ in 0..60 {
        world.step(1.0 / 60.0);
    }

    let body = world.get_body(handle).unwrap();
    assert!(body.is_sleeping());
    assert_eq!(body.get_velocity(), Vec2::zero());
    assert_eq!(body.get_angular_velocity(), 0.0);

    // A sleeping body stays put
    let resting_position = body.get_position();
    for _ in 0..10 {
        world.step(1.0 / 60.0);
    }
    assert_eq!(world.get_body(handle).unwrap().get_position(), resting_position);
}

#[test]
fn test_contact_wakes_sleeping_body() {
    let mut world = PhysicsWorld::with_gravity(Vec2::zero());

    let sleeper = world.add_body(Body::new(Shape::circle(5.0), Vec2::new(0.0, 0.0)));
    world.get_body_mut(sleeper).unwrap().put_to_sleep();
    assert!(world.get_body(sleeper).unwrap().is_sleeping());

    let mut mover = Body::new(Shape::circle(5.0), Vec2::new(-12.0, 0.0));
    mover.set_velocity(Vec2::new(120.0, 0.0));
    world.add_body(mover);

    for _ in 0..10 {
        world.step(1.0 / 60.0);
    }

    let sleeper = world.get_body(sleeper).unwrap();
    assert!(!sleeper.is_sleeping());
    assert!(sleeper.get_velocity().x > 0.0);
}

#[test]
fn test_add_remove_body() {
    let mut world = PhysicsWorld::new();
    let floor = world.add_body(Body::new_static(Shape::rectangle(100.0, 10.0), Vec2::zero()));
    assert_eq!(world.body_count(), 1);

    let handle = world.add_body(Body::new(Shape::circle(5.0), Vec2::new(0.0, -10.0)));
    assert_eq!(world.body_count(), 2);
    assert_eq!(world.get_body(handle).unwrap().get_id(), handle);

    let removed = world.remove_body(handle).unwrap();
    assert_eq!(world.body_count(), 1);
    assert_eq!(removed.get_id(), handle);
    assert!(world.get_body(handle).is_err());

    // Removing twice fails, and stepping no longer involves the body
    assert!(world.remove_body(handle).is_err());
    world.step(1.0 / 60.0);
    assert_eq!(world.body_count(), 1);
    assert!(world.get_body(floor).is_ok());
}

#[test]
fn test_step_zero_dt_keeps_positions() {
    let mut world = PhysicsWorld::new();

    let mut body = Body::new(Shape::circle(5.0), Vec2::new(3.0, 7.0));
    body.set_velocity(Vec2::new(10.0, -4.0));
    let handle = world.add_body(body);

    world.step(0.0);

    let body = world.get_body(handle).unwrap();
    assert_eq!(body.get_position(), Vec2::new(3.0, 7.0));
}

#[test]
fn test_dropped_circle_impact_and_rebound() {
    let mut world = PhysicsWorld::new();
    // Disable damping so the analytic free-fall speed applies
    world.get_config_mut().linear_damping = 1.0;

    let mut ball = Body::new(Shape::circle(20.0), Vec2::new(0.0, 0.0));
    ball.set_restitution(0.6);
    let ball = world.add_body(ball);

    let mut floor = Body::new_static(Shape::rectangle(400.0, 20.0), Vec2::new(0.0, 230.0));
    floor.set_restitution(0.6);
    world.add_body(floor);

    let impacts: Rc<RefCell<Vec<f32>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&impacts);
    world.on_collision(move |event| {
        sink.borrow_mut().push(event.closing_speed());
    });

    // Fall height: floor top at y 220 minus the radius leaves 200 px
    let gravity = world.get_gravity().y;
    let expected_impact = (2.0 * gravity * 200.0).sqrt();

    let dt = 1.0 / 120.0;
    let mut steps = 0;
    while impacts.borrow().is_empty() && steps < 1000 {
        world.step(dt);
        steps += 1;
    }

    let first_impact = impacts.borrow()[0];
    assert!(first_impact < 0.0, "bodies were approaching at impact");
    assert_relative_eq!(-first_impact, expected_impact, max_relative = 0.05);

    // Restitution 0.6 on both sides: rebound at 0.6x the impact speed
    let rebound = world.get_body(ball).unwrap().get_velocity().y;
    assert_relative_eq!(rebound, 0.6 * first_impact, max_relative = 0.01);
}

#[test]
fn test_collision_event_reports_pre_solve_velocities() {
    let mut world = PhysicsWorld::with_gravity(Vec2::zero());

    let mut mover = Body::new(Shape::circle(5.0), Vec2::new(-8.0, 0.0));
    mover.set_velocity(Vec2::new(100.0, 0.0));
    let mover = world.add_body(mover);
    let wall = world.add_body(Body::new_static(Shape::circle(5.0), Vec2::new(0.0, 0.0)));

    let events: Rc<RefCell<Vec<(BodyHandle, BodyHandle, Vec2)>>> =
        Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    world.on_collision(move |event| {
        sink.borrow_mut()
            .push((event.body_a, event.body_b, event.velocity_a));
    });

    world.step(1.0 / 60.0);

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    let (body_a, body_b, velocity_a) = events[0];
    assert_eq!(body_a, mover);
    assert_eq!(body_b, wall);

    // The snapshot shows the incoming speed, not the post-impulse rebound
    assert_relative_eq!(velocity_a.x, 99.5, epsilon = 1.0e-3);
}
