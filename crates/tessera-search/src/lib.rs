//! Tessera Search - Entity search engines
//!
//! Provides case-insensitive substring search and fuzzy search (nucleo) over
//! a project's entities, with type and label filters.

pub mod error;
pub mod exact;
pub mod filter;
pub mod fuzzy;
pub mod traits;

pub use error::{SearchError, SearchResult};
pub use exact::ExactSearchEngine;
pub use fuzzy::FuzzySearchEngine;
pub use traits::{engine_for, SearchEngine, SearchHit};
