//! Collection operations split into focused modules.

pub mod aggregation;
pub mod documents;
pub mod explain;
pub mod indexes;
