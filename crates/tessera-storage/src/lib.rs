//! Tessera Storage - Read access to the external graph store
//!
//! This crate defines the narrow read interface the engine consumes, an
//! in-memory reference store, graph document loading and the snapshot
//! accessor that materializes per-request graph snapshots.

pub mod document;
pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use document::GraphDocument;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use snapshot::SnapshotAccessor;
pub use traits::{GraphStore, ListOptions};
