//! Manipulation engine: the registry of batch operations and the pipeline that applies them.
//!
//! The engine sits between a caller that picked an operation from a menu and a
//! [`StorageGrid`](crate::grid::StorageGrid) that holds the records. It decides
//! which operations a grid supports, validates the requested page range, and
//! rewrites the affected cells in one atomic pass.
//!
//! | Category | Algorithm |
//! |----------|-----------|
//! | Sort     | collect occupied records → stable sort by key → records first, blanks after |
//! | Clear    | blank every occupied cell matching the rule |
//! | Modify   | transform every occupied record, write back only on change |
//!
//! # Design
//!
//! - **Pure logic**: no I/O; the grid is borrowed for one call
//! - **Closed set**: every operation is a [`ManipKind`] variant with one static descriptor
//! - **Reads before writes**: a write plan is computed from a snapshot, then committed
//! - **Structural errors abort early**: a bad range or unsupported kind writes nothing

pub mod clear;
pub mod descriptor;
pub mod modify;
pub mod pipeline;
pub mod range;
pub mod registry;
pub mod sort;

pub use descriptor::{
    ClearRule, ManipAction, ManipDescriptor, ManipKind, ModifyRule, SortOrder, SortRule,
};
pub use pipeline::{execute, execute_with, ExecuteOptions, ExecutionResult};
pub use range::{resolve_cells, ManipScope, RangeParam};
pub use registry::{list_usable, lookup, usable_kinds};
pub use sort::{KeyPart, SortKey};

use crate::grid::CellRef;
use crate::record::Record;

/// One cell's content captured before any write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub at: CellRef,
    pub record: Record,
}

/// Writes computed by a category algorithm, committed by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritePlan {
    pub writes: Vec<(CellRef, Record)>,
    pub affected: usize,
}

impl WritePlan {
    fn push(&mut self, at: CellRef, record: Record) {
        self.writes.push((at, record));
    }
}
