//! Mesh Remodel Workbench
//!
//! Commands that turn picked mesh points into construction geometry:
//! - Points objects and coplanar point subsets from meshes
//! - Lines, polygons, B-splines, circles and arcs through picked points
//! - Sketches and wires from selected objects
//! - Persistent workbench settings
//!
//! Commands run against any host that implements
//! [`DocumentContext`]; [`MemoryDocument`] is the headless implementation.

pub mod command;
pub mod document;
pub mod selection;
pub mod settings;

// Re-exports for convenience
pub use command::{
    CenterMode, CommandContext, CommandError, CommandId, CommandOutcome, CommandResources,
    CommandResult, LineMode, Modifiers, PathMode, RemodelCommand, dispatch,
};
pub use document::{
    DocumentContext, DocumentError, DocumentObject, DocumentResult, MemoryDocument, ObjectId,
    ObjectKind, Shape, ViewProperty, with_transaction,
};
pub use selection::{Selection, SelectionItem};
pub use settings::{
    MAX_DISPLAY_SIZE, MIN_DISPLAY_SIZE, RemodelSettings, SettingsChange, SettingsError,
};
