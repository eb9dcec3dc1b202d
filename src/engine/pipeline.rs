//! Execution pipeline
//!
//! `execute` validates, resolves, plans and commits one manipulation:
//!
//! 1. range checked against the grid's page count (`ManipError::Range`)
//! 2. usability re-checked against the grid's profile (`ManipError::Unsupported`)
//! 3. range resolved to an ordered cell sequence (locked cells dropped)
//! 4. every cell read once; records that cannot be interpreted are set aside
//! 5. the category algorithm plans its writes from that snapshot
//! 6. the plan is committed
//!
//! Steps 1 and 2 fail before anything is read, and nothing is written until the
//! whole plan exists, so a failed call leaves the grid exactly as it was.

use super::descriptor::{ManipAction, ManipKind};
use super::range::{resolve_cells, RangeParam};
use super::{clear, modify, sort, Slot};
use crate::error::{ManipError, Result};
use crate::grid::StorageGrid;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of a successful invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Cells whose content changed (for sorts: records that changed cell)
    pub affected: usize,
    /// Occupied cells left untouched because their record could not be interpreted
    pub skipped: usize,
    /// Cells the operation considered after locked cells were removed
    pub visited: usize,
}

impl ExecutionResult {
    /// Legal invocation that changed nothing
    pub fn is_noop(&self) -> bool {
        self.affected == 0
    }
}

/// Per-invocation switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Leave overwrite-protected cells out of every operation
    pub honor_locked_cells: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            honor_locked_cells: true,
        }
    }
}

/// Apply `kind` to `grid` over `range` with default options.
pub fn execute<G: StorageGrid + ?Sized>(
    grid: &mut G,
    kind: ManipKind,
    range: RangeParam,
) -> Result<ExecutionResult> {
    execute_with(grid, kind, range, &ExecuteOptions::default())
}

/// Apply `kind` to `grid` over `range`.
///
/// # Errors
///
/// - [`ManipError::Range`] if the range is inverted or reaches past the last page
/// - [`ManipError::Unsupported`] if the grid's profile does not allow `kind`
///
/// In both cases the grid is not touched.
pub fn execute_with<G: StorageGrid + ?Sized>(
    grid: &mut G,
    kind: ManipKind,
    range: RangeParam,
    options: &ExecuteOptions,
) -> Result<ExecutionResult> {
    range.validate(grid.page_count())?;

    let descriptor = kind.descriptor();
    if !descriptor.is_usable(grid.profile()) {
        return Err(ManipError::unsupported(kind));
    }

    let cells = resolve_cells(&*grid, &range, options.honor_locked_cells);
    debug!(
        "Resolved {} for {}: {} cells (locks honored: {})",
        range,
        kind,
        cells.len(),
        options.honor_locked_cells
    );

    let profile = grid.profile().clone();
    let blank = grid.blank_record();

    let mut readable = Vec::with_capacity(cells.len());
    let mut skipped = 0;
    for at in &cells {
        let record = grid.get_cell(at.page, at.cell);
        match record.validate(&profile) {
            Ok(()) => readable.push(Slot { at: *at, record }),
            Err(fault) => {
                warn!("Skipping {} during {}: {}", at, kind, fault);
                skipped += 1;
            }
        }
    }

    let plan = match descriptor.action() {
        ManipAction::Sort(rule) => sort::plan(&rule, &readable, &profile, &blank),
        ManipAction::Clear(rule) => clear::plan(&rule, &readable, &profile, &blank),
        ManipAction::Modify(rule) => modify::plan(&rule, &readable, &profile),
    };

    let writes = plan.writes.len();
    for (at, record) in plan.writes {
        grid.set_cell(at.page, at.cell, record);
    }

    let result = ExecutionResult {
        affected: plan.affected,
        skipped,
        visited: cells.len(),
    };
    info!(
        "{} over {}: {} affected, {} skipped, {} writes",
        kind, range, result.affected, result.skipped, writes
    );
    Ok(result)
}
