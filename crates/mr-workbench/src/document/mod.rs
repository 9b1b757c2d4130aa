//! Host document abstraction
//!
//! Commands reach the host only through [`DocumentContext`]. The
//! [`MemoryDocument`] implementation backs tests and headless use.

mod memory;
mod traits;

pub use memory::{DocumentObject, MemoryDocument};
pub use traits::{
    DocumentContext, DocumentError, DocumentResult, ObjectId, ObjectKind, Shape, ViewProperty,
    with_transaction,
};
