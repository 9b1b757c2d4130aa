//! Point helpers

use glam::DVec3;

/// Euclidean distance between two points
pub fn distance(p1: DVec3, p2: DVec3) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    let dz = p1.z - p2.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Point halfway between `a` and `b`
pub fn midpoint(a: DVec3, b: DVec3) -> DVec3 {
    DVec3::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_axis_aligned() {
        assert_relative_eq!(distance(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0)), 3.0);
        assert_relative_eq!(
            distance(DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 6.0, 3.0)),
            5.0
        );
    }

    #[test]
    fn test_distance_symmetric() {
        let a = DVec3::new(-1.5, 2.25, 7.0);
        let b = DVec3::new(0.5, -3.0, 1.0);
        assert_eq!(distance(a, b), distance(b, a));
        assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn test_distance_matches_glam() {
        let a = DVec3::new(0.1, 0.2, 0.3);
        let b = DVec3::new(10.0, -20.0, 30.0);
        assert_relative_eq!(distance(a, b), a.distance(b), epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint() {
        let mid = midpoint(DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, -4.0, 6.0));
        assert_eq!(mid, DVec3::new(1.0, -2.0, 3.0));
    }
}
