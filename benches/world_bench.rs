use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use impulse2d::{Body, PhysicsWorld, Shape, Vec2};

fn build_stack_world(num_bodies: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::new();

    // Static floor at the bottom of the scene
    world.add_body(Body::new_static(
        Shape::rectangle(800.0, 20.0),
        Vec2::new(0.0, 400.0),
    ));

    // Circles stacked with a slight gap so they fall and collide
    let radius = 10.0;
    for i in 0..num_bodies {
        world.add_body(Body::new(
            Shape::circle(radius),
            Vec2::new(0.0, 380.0 - i as f32 * (radius * 2.1)),
        ));
    }

    world
}

fn run_steps(world: &mut PhysicsWorld, steps: usize) {
    let dt = 1.0 / 60.0;
    for _ in 0..steps {
        world.step(black_box(dt));
    }
}

fn bench_falling_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("falling_stack");

    for num_bodies in [10, 25, 50] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_bodies),
            &num_bodies,
            |b, &n| {
                b.iter(|| {
                    let mut world = build_stack_world(n);
                    run_steps(&mut world, 30);
                });
            },
        );
    }

    group.finish();
}

fn bench_mixed_shapes(c: &mut Criterion) {
    c.bench_function("mixed_shapes_step", |b| {
        b.iter(|| {
            let mut world = build_stack_world(20);
            for i in 0..10 {
                world.add_body(Body::new(
                    Shape::rectangle(16.0, 16.0),
                    Vec2::new(40.0, 380.0 - i as f32 * 20.0),
                ));
            }
            run_steps(&mut world, 30);
        });
    });
}

criterion_group!(benches, bench_falling_stack, bench_mixed_shapes);
criterion_main!(benches);
