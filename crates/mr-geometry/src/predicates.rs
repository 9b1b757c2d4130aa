//! Colinearity and coplanarity tests
//!
//! Both tests are tolerance based. Colinearity compares the sine of the
//! angle between edges against [`COLINEAR_TOLERANCE`]; coplanarity uses the
//! bounding-box volume of the four points, which depends on coordinate scale
//! and on how the plane is oriented relative to the axes.

use glam::DVec3;

use crate::bounds::BoundingBox;

/// Largest sine of the angle between two edges still treated as parallel
pub const COLINEAR_TOLERANCE: f64 = 1e-6;

/// Default bounding-box volume below which four points count as coplanar,
/// in cubed units of the input coordinates
pub const DEFAULT_COPLANAR_EPSILON: f64 = 1e-7;

/// Check whether all points lie on one line
///
/// Every point is tested against the edge from the first to the second
/// point. Fewer than three points are trivially colinear, and coincident
/// points count as colinear.
pub fn is_colinear(points: &[DVec3]) -> bool {
    let [origin, second, rest @ ..] = points else {
        return true;
    };
    let first_edge = *second - *origin;
    rest.iter()
        .all(|&point| edges_parallel(first_edge, point - *origin))
}

fn edges_parallel(u: DVec3, v: DVec3) -> bool {
    match (direction(u), direction(v)) {
        (Some(u), Some(v)) => u.cross(v).length() <= COLINEAR_TOLERANCE,
        _ => true,
    }
}

// Unit direction of an edge, `None` for zero-length or non-finite edges.
// Rescaling by the largest component first keeps the length from overflowing.
fn direction(edge: DVec3) -> Option<DVec3> {
    let largest = edge.abs().max_element();
    if largest == 0.0 || !largest.is_finite() {
        return None;
    }
    (edge / largest).try_normalize()
}

/// Check whether `candidate` lies in the plane of `trio`
///
/// Builds the closed polygon (A, B, C, candidate) and tests whether its
/// axis-aligned bounding box has a volume of at most `epsilon`. Coplanar
/// points whose plane is tilted against every axis still have a non-zero
/// box, and tiny non-coplanar configurations can fall under `epsilon`.
pub fn is_coplanar(trio: &[DVec3; 3], candidate: DVec3, epsilon: f64) -> bool {
    let [a, b, c] = *trio;
    let bbox = BoundingBox::from_points([a, b, c, candidate, a]);
    bbox.volume() <= epsilon
}

/// Keep the candidates that are coplanar with `trio`, in input order
pub fn coplanar_points(
    trio: &[DVec3; 3],
    candidates: impl IntoIterator<Item = DVec3>,
    epsilon: f64,
) -> Vec<DVec3> {
    candidates
        .into_iter()
        .filter(|&candidate| is_coplanar(trio, candidate, epsilon))
        .collect()
}
