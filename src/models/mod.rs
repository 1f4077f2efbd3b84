// Data structures and types

pub mod book;

pub use book::{Book, DeleteCounts, UpdateCounts};
