//! Circles through three points
//!
//! The circumcenter is computed in closed form from the side lengths:
//! the signed distance from the midpoint of AB to the center is
//! `cos(C) * R`, with `R = abc / (4 * area)` and the area from Heron's
//! formula. The direction is the in-plane perpendicular of AB. As the
//! triangle flattens the area goes to zero, so every entry point refuses
//! colinear input with [`GeometryError::DegenerateTriangle`].

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::point::{distance, midpoint};
use crate::predicates::is_colinear;

/// A circle in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle3D {
    /// Center of the circle
    pub center: DVec3,
    /// Radius of the circle
    pub radius: f64,
    /// Unit normal of the circle's plane
    pub normal: DVec3,
}

/// Center of the circle passing through `a`, `b` and `c`
pub fn circumcenter(a: DVec3, b: DVec3, c: DVec3) -> GeometryResult<DVec3> {
    if is_colinear(&[a, b, c]) {
        return Err(GeometryError::DegenerateTriangle);
    }

    let z = (c - b).cross(a - b);
    let side_a = (a - b).length();
    let side_b = (b - c).length();
    let side_c = (c - a).length();

    let r = ((side_b * side_b + side_c * side_c - side_a * side_a) / (2.0 * side_b * side_c))
        * outer_radius(side_a, side_b, side_c)?;
    let direction = (a - b)
        .cross(z)
        .try_normalize()
        .ok_or(GeometryError::DegenerateTriangle)?;

    let center = midpoint(a, b) + direction * r;
    if center.is_finite() {
        Ok(center)
    } else {
        Err(GeometryError::DegenerateTriangle)
    }
}

/// Radius of the circle passing through `a`, `b` and `c`
pub fn circumradius(a: DVec3, b: DVec3, c: DVec3) -> GeometryResult<f64> {
    Ok(distance(circumcenter(a, b, c)?, a))
}

/// Unit normal of the plane through `a`, `b` and `c`
///
/// Oriented as `(C - B) x (A - B)`.
pub fn triangle_normal(a: DVec3, b: DVec3, c: DVec3) -> GeometryResult<DVec3> {
    if is_colinear(&[a, b, c]) {
        return Err(GeometryError::DegenerateTriangle);
    }
    (c - b)
        .cross(a - b)
        .try_normalize()
        .ok_or(GeometryError::DegenerateTriangle)
}

/// The circle passing through `a`, `b` and `c`
pub fn circle_through(a: DVec3, b: DVec3, c: DVec3) -> GeometryResult<Circle3D> {
    let center = circumcenter(a, b, c)?;
    Ok(Circle3D {
        center,
        radius: distance(center, a),
        normal: triangle_normal(a, b, c)?,
    })
}

// Circumradius from the three side lengths
fn outer_radius(a: f64, b: f64, c: f64) -> GeometryResult<f64> {
    let area = heron_area(a, b, c);
    if !(area.is_finite() && area > 0.0) {
        return Err(GeometryError::DegenerateTriangle);
    }
    Ok((a * b * c) / (4.0 * area))
}

// Triangle area from side lengths via the semiperimeter
fn heron_area(a: f64, b: f64, c: f64) -> f64 {
    let sp = (a + b + c) * 0.5;
    (sp * (sp - a) * (sp - b) * (sp - c)).sqrt()
}
