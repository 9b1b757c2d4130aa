//! Mesh Remodel Geometry
//!
//! Pure, stateless 3D geometry used by the remodeling commands:
//! - Distances and midpoints between points
//! - Colinearity and coplanarity tests
//! - Circumcenter, circumradius and the circle through three points
//! - Greedy nearest-neighbor ordering of picked points
//! - Segment pairing for polygons built from point sequences
//!
//! Points are `glam::DVec3`. Nothing here touches a document; callers
//! convert the results into host geometry themselves.

pub mod bounds;
pub mod circle;
pub mod error;
pub mod ordering;
pub mod point;
pub mod predicates;

// Re-exports for convenience
pub use bounds::BoundingBox;
pub use circle::{Circle3D, circle_through, circumcenter, circumradius, triangle_normal};
pub use error::{GeometryError, GeometryResult};
pub use ordering::{build_segments, sort_by_nearest_neighbor};
pub use point::{distance, midpoint};
pub use predicates::{
    COLINEAR_TOLERANCE, DEFAULT_COPLANAR_EPSILON, coplanar_points, is_colinear, is_coplanar,
};

pub use glam::DVec3;
