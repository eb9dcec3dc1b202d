//! boxmanip library
//!
//! Batch sort/clear/modify operations over paginated record storage, gated by
//! the capabilities each storage format declares.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod record;
pub mod report;
pub mod types;

pub use config::ManipConfig;
pub use engine::{
    execute, execute_with, list_usable, lookup, usable_kinds, ExecuteOptions, ExecutionResult,
    ManipDescriptor, ManipKind, ManipScope, RangeParam,
};
pub use error::ManipError;
pub use grid::{CellRef, GridProfile, MemoryGrid, StorageGrid};
pub use record::{MetDate, Record, RecordFault};
pub use report::{describe, Report};
pub use types::{Capability, CapabilitySet, ManipCategory};
