//! Geometry error types

use thiserror::Error;

/// Errors raised by the geometry functions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The three points of a triangle are colinear (or nearly so)
    #[error("Degenerate triangle: cannot make arc/circle from 3 colinear points")]
    DegenerateTriangle,

    /// An operation that needs at least one point received none
    #[error("Empty input: {0} requires at least one point")]
    EmptyInput(&'static str),
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::DegenerateTriangle;
        assert!(err.to_string().contains("colinear"));

        let err = GeometryError::EmptyInput("sort_by_nearest_neighbor");
        assert!(err.to_string().contains("sort_by_nearest_neighbor"));
    }
}
