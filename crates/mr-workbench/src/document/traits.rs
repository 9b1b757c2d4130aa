//! Document capability definitions
//!
//! These traits define the interface a host document must implement for
//! the remodeling commands to run against it.

use std::fmt;

use glam::DVec3;
use mr_geometry::{Circle3D, distance};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a document object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of object a document entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A triangulated mesh
    Mesh,
    /// A point or a compound of points
    Points,
    /// A sketch
    Sketch,
    /// A wire built from connected edges
    Wire,
    /// Any other shape
    #[default]
    Other,
}

/// Geometry handed to the host for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A single vertex
    Point(DVec3),
    /// A straight edge
    Line {
        /// Start point
        start: DVec3,
        /// End point
        end: DVec3,
    },
    /// A polyline through the points; closed when the last point repeats the first
    Polygon {
        /// Vertices in order
        points: Vec<DVec3>,
    },
    /// A B-spline interpolating the points (the host performs the fit)
    BSpline {
        /// Points to interpolate
        points: Vec<DVec3>,
        /// Whether the curve closes on itself
        periodic: bool,
    },
    /// A full circle
    Circle(Circle3D),
    /// A circular arc from `start` through `through` to `end`
    Arc {
        /// First point on the arc
        start: DVec3,
        /// Intermediate point on the arc
        through: DVec3,
        /// Last point on the arc
        end: DVec3,
        /// Supporting circle
        circle: Circle3D,
    },
    /// A group of shapes
    Compound(Vec<Shape>),
}

impl Shape {
    /// Create a line shape
    pub fn line(start: DVec3, end: DVec3) -> Self {
        Self::Line { start, end }
    }

    /// Create a compound of point shapes
    pub fn points(points: impl IntoIterator<Item = DVec3>) -> Self {
        Self::Compound(points.into_iter().map(Shape::Point).collect())
    }

    /// Length of a line, `None` for other shapes
    pub fn length(&self) -> Option<f64> {
        match self {
            Shape::Line { start, end } => Some(distance(*start, *end)),
            _ => None,
        }
    }

    /// Whether this shape is a point or contains only points
    pub fn is_points(&self) -> bool {
        match self {
            Shape::Point(_) => true,
            Shape::Compound(children) => {
                !children.is_empty() && children.iter().all(Shape::is_points)
            }
            _ => false,
        }
    }

    /// Defining vertices of the shape, in order
    ///
    /// Circles contribute no vertices; arcs contribute their end points.
    pub fn vertices(&self) -> Vec<DVec3> {
        match self {
            Shape::Point(p) => vec![*p],
            Shape::Line { start, end } => vec![*start, *end],
            Shape::Polygon { points } | Shape::BSpline { points, .. } => points.clone(),
            Shape::Circle(_) => Vec::new(),
            Shape::Arc { start, end, .. } => vec![*start, *end],
            Shape::Compound(children) => children.iter().flat_map(Shape::vertices).collect(),
        }
    }
}

/// View properties the commands adjust
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewProperty {
    /// Display size of vertices
    PointSize(f64),
    /// Display width of edges
    LineWidth(f64),
    /// Whether the object is shown
    Visibility(bool),
}

/// Error type for document operations
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    #[error("Transaction already open: {0}")]
    TransactionOpen(String),

    #[error("No transaction is open")]
    NoTransaction,

    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Host operation failed: {0}")]
    HostOperation(String),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// The host document as seen by the remodeling commands
///
/// Implementations wrap the host's object model, transaction system and
/// selection. Commands only ever talk to the host through this trait.
pub trait DocumentContext {
    // ========== Transactions ==========

    /// Open a named undoable transaction
    fn open_transaction(&mut self, name: &str) -> DocumentResult<()>;

    /// Commit the open transaction
    fn commit_transaction(&mut self) -> DocumentResult<()>;

    /// Roll back the open transaction
    fn abort_transaction(&mut self) -> DocumentResult<()>;

    /// Recompute the document after changes
    fn recompute(&mut self);

    // ========== Objects ==========

    /// Add a shape as a new object
    ///
    /// `label` is a base name; the host may suffix it to keep names unique.
    fn add_shape(&mut self, label: &str, shape: Shape) -> DocumentResult<ObjectId>;

    /// Remove an object
    fn remove_object(&mut self, id: ObjectId) -> DocumentResult<()>;

    /// Get the unique name the host gave an object
    fn object_name(&self, id: ObjectId) -> DocumentResult<String>;

    /// Set a view property on an object
    fn set_view_property(&mut self, id: ObjectId, property: ViewProperty) -> DocumentResult<()>;

    // ========== Selection ==========

    /// Clear the host selection
    fn clear_selection(&mut self);

    /// Add an object to the host selection
    fn add_to_selection(&mut self, id: ObjectId) -> DocumentResult<()>;

    // ========== Host Reads ==========

    /// Vertices of a mesh object
    fn mesh_points(&self, id: ObjectId) -> DocumentResult<Vec<DVec3>>;

    /// Vertices of a shape object
    fn shape_vertices(&self, id: ObjectId) -> DocumentResult<Vec<DVec3>>;

    // ========== Host Operations ==========

    /// Split a compound object into one object per child shape
    fn explode_compound(&mut self, id: ObjectId) -> DocumentResult<Vec<ObjectId>>;

    /// Build a sketch from the given objects
    fn make_sketch(&mut self, objects: &[ObjectId], autoconstraints: bool)
    -> DocumentResult<ObjectId>;

    /// Join connected objects into wires
    fn upgrade_to_wire(&mut self, objects: &[ObjectId]) -> DocumentResult<Vec<ObjectId>>;

    /// Merge several sketches into one
    fn merge_sketches(&mut self, sketches: &[ObjectId]) -> DocumentResult<ObjectId>;

    /// Run the host's sketch validation on a sketch
    fn validate_sketch(&mut self, sketch: ObjectId) -> DocumentResult<()>;
}

/// Run `f` inside a named transaction
///
/// Commits when `f` succeeds. On failure the transaction is aborted and
/// the error from `f` is returned.
pub fn with_transaction<T, E>(
    doc: &mut dyn DocumentContext,
    name: &str,
    f: impl FnOnce(&mut dyn DocumentContext) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<DocumentError> + fmt::Display,
{
    doc.open_transaction(name)?;
    match f(&mut *doc) {
        Ok(value) => {
            doc.recompute();
            doc.commit_transaction()?;
            Ok(value)
        }
        Err(e) => {
            tracing::warn!("Transaction '{}' aborted: {}", name, e);
            if let Err(abort_err) = doc.abort_transaction() {
                tracing::warn!("Failed to abort transaction '{}': {}", name, abort_err);
            }
            Err(e)
        }
    }
}
