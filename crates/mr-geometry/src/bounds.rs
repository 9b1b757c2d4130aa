//! Axis-aligned bounding box over point sets.

use glam::DVec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box.
    pub min: DVec3,
    /// Maximum corner of the bounding box.
    pub max: DVec3,
}

impl BoundingBox {
    /// Creates a new bounding box from min and max points.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Creates an empty (inverted) bounding box.
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Creates a bounding box that contains all given points.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bbox, point| bbox.expand_to_include(point))
    }

    /// Returns a new bounding box expanded to include the given point.
    pub fn expand_to_include(&self, point: DVec3) -> BoundingBox {
        BoundingBox {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Returns the side lengths along X, Y and Z.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Returns the product of the three side lengths.
    ///
    /// Zero (or close to it) when the points span fewer than three axes.
    pub fn volume(&self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Returns true if the bounding box is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
