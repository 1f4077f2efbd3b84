pub mod config;
pub mod connection;
pub mod error;
pub mod explain;
pub mod models;
pub mod queries;
pub mod report;
pub mod runner;

pub use config::{QueryParams, SessionConfig};
pub use error::{Error, Result};
pub use runner::{OperationGroup, RunSummary, SessionRunner};
