//! MongoDB connection management and operations.
//!
//! This module provides:
//! - `ConnectionManager`: owns the runtime and opens connections
//! - `ScopedConnection`: one client bound to a database and collection, released on drop
//! - `ops`: collection operations (documents, aggregation, indexes, explain)
//! - `types`: shared option types

pub mod manager;
pub mod ops;
pub mod types;

pub use manager::{ConnectionManager, ScopedConnection};
pub use ops::explain::ExplainFindRequest;
pub use types::FindDocumentsOptions;
