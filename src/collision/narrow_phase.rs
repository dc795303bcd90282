//! Exact contact generation for the closed shape set.
//!
//! Every detector produces a manifold whose normal points from body A to
//! body B and whose depth is non-negative. Degenerate configurations
//! (coincident circle centers, a circle center landing inside a rectangle)
//! resolve to a deterministic tie-break instead of a NaN normal.

use crate::bodies::{Body, Shape};
use crate::collision::{CollisionPair, ContactManifold};
use crate::math::{approx_zero, Vec2};

/// Dispatches to the detector for the pair's shape combination.
pub fn detect(pair: CollisionPair, a: &Body, b: &Body) -> Option<ContactManifold> {
    match (a.get_shape(), b.get_shape()) {
        (Shape::Circle { .. }, Shape::Circle { .. }) => circle_circle(pair, a, b),
        (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => rect_rect(pair, a, b),
        (Shape::Circle { .. }, Shape::Rectangle { .. }) => circle_rect(pair, a, b),
        (Shape::Rectangle { .. }, Shape::Circle { .. }) => {
            // Run the circle-first detector with the roles swapped, then flip
            // the normal back so it still points from A to B.
            let mut manifold = circle_rect(pair, b, a)?;
            manifold.normal = -manifold.normal;
            Some(manifold)
        }
    }
}

/// Circle versus circle.
///
/// Coincident centers fabricate a `(1, 0)` normal with full overlap depth so
/// stacked spawns separate instead of producing NaN.
fn circle_circle(pair: CollisionPair, a: &Body, b: &Body) -> Option<ContactManifold> {
    let radius_a = match a.get_shape() {
        Shape::Circle { radius } => radius,
        _ => return None,
    };
    let radius_b = match b.get_shape() {
        Shape::Circle { radius } => radius,
        _ => return None,
    };

    let offset = b.get_position() - a.get_position();
    let dist_sq = offset.length_squared();
    let radius_sum = radius_a + radius_b;

    if dist_sq >= radius_sum * radius_sum {
        return None;
    }

    if approx_zero(dist_sq) {
        return Some(ContactManifold::new(
            pair,
            Vec2::new(1.0, 0.0),
            radius_sum,
            a.get_position(),
        ));
    }

    let distance = dist_sq.sqrt();
    let normal = offset / distance;
    let depth = radius_sum - distance;
    let contact = a.get_position() + normal * radius_a;

    Some(ContactManifold::new(pair, normal, depth, contact))
}

/// Rectangle versus rectangle via the separating axis theorem.
///
/// The candidate axes are the edge normals of both rotated rectangles. The
/// contact point is a single approximation on the minimum-overlap axis; no
/// polygon clipping is performed.
fn rect_rect(pair: CollisionPair, a: &Body, b: &Body) -> Option<ContactManifold> {
    let vertices_a = a.get_vertices()?;
    let vertices_b = b.get_vertices()?;

    let mut min_overlap = f32::INFINITY;
    let mut smallest_axis = Vec2::zero();

    for axis in edge_normals(&vertices_a)
        .into_iter()
        .chain(edge_normals(&vertices_b))
    {
        let (min_a, max_a) = project(&vertices_a, axis);
        let (min_b, max_b) = project(&vertices_b, axis);

        // Separating axis found
        if !(max_a >= min_b && max_b >= min_a) {
            return None;
        }

        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap < min_overlap {
            min_overlap = overlap;
            smallest_axis = axis;
        }
    }

    // Orient the minimum-overlap axis from A towards B
    let mut normal = smallest_axis;
    if (b.get_position() - a.get_position()).dot(&normal) < 0.0 {
        normal = -normal;
    }

    let half_width_a = match a.get_shape() {
        Shape::Rectangle { width, .. } => width / 2.0,
        _ => return None,
    };
    let contact = a.get_position() + normal * half_width_a;

    Some(ContactManifold::new(pair, normal, min_overlap, contact))
}

/// Circle versus rectangle, computed in the rectangle's local frame.
///
/// The circle center is clamped to the box half-extents to find the nearest
/// boundary point. A center exactly inside the box pushes out along the
/// local axis with the larger penetration, with the sign taken from the
/// center's local position.
fn circle_rect(pair: CollisionPair, circle: &Body, rect: &Body) -> Option<ContactManifold> {
    let radius = match circle.get_shape() {
        Shape::Circle { radius } => radius,
        _ => return None,
    };
    let (half_width, half_height) = match rect.get_shape() {
        Shape::Rectangle { width, height } => (width / 2.0, height / 2.0),
        _ => return None,
    };

    let local_circle =
        (circle.get_position() - rect.get_position()).rotate(-rect.get_angle());

    let mut closest = Vec2::new(
        local_circle.x.clamp(-half_width, half_width),
        local_circle.y.clamp(-half_height, half_height),
    );
    let mut delta = local_circle - closest;
    let mut dist_sq = delta.length_squared();

    let inside = approx_zero(dist_sq);
    if inside {
        if local_circle.x.abs() > local_circle.y.abs() {
            closest.x = if local_circle.x > 0.0 {
                half_width
            } else {
                -half_width
            };
        } else {
            closest.y = if local_circle.y > 0.0 {
                half_height
            } else {
                -half_height
            };
        }
        delta = local_circle - closest;
        dist_sq = delta.length_squared();
    }

    if dist_sq > radius * radius && !inside {
        return None;
    }

    let distance = dist_sq.sqrt();
    let (local_normal, depth) = if inside {
        // Center trapped in the box: the separation direction runs from the
        // escape face back towards the center, so the solver pushes the
        // circle out through the nearest face.
        (delta.normalize(), radius + distance)
    } else {
        ((-delta).normalize(), radius - distance)
    };

    let normal = local_normal.rotate(rect.get_angle());
    let contact = rect.get_position() + closest.rotate(rect.get_angle());

    Some(ContactManifold::new(pair, normal, depth, contact))
}

fn edge_normals(vertices: &[Vec2; 4]) -> [Vec2; 4] {
    let mut axes = [Vec2::zero(); 4];
    for i in 0..4 {
        let edge = vertices[(i + 1) % 4] - vertices[i];
        axes[i] = Vec2::new(-edge.y, edge.x).normalize();
    }
    axes
}

fn project(vertices: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for vertex in vertices {
        let projection = vertex.dot(&axis);
        min = min.min(projection);
        max = max.max(projection);
    }
    (min, max)
}
