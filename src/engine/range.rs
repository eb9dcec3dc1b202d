//! Page ranges and their resolution to concrete cells

use crate::error::{ManipError, Result};
use crate::grid::{CellRef, StorageGrid};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive page span an invocation targets.
///
/// `reverse` walks the pages from `stop_page` down to `start_page`. Cells
/// inside a page are always visited in natural order, and sort comparators
/// are unaffected; only the traversal sequence (and therefore which end the
/// sorted records are packed towards) changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeParam {
    pub start_page: usize,
    pub stop_page: usize,
    #[serde(default)]
    pub reverse: bool,
}

impl RangeParam {
    pub const fn new(start_page: usize, stop_page: usize, reverse: bool) -> Self {
        Self {
            start_page,
            stop_page,
            reverse,
        }
    }

    /// A single page
    pub const fn single(page: usize) -> Self {
        Self::new(page, page, false)
    }

    /// Every page of a grid with `page_count` pages.
    ///
    /// For an empty grid this yields `0..=0`, which validation rejects.
    pub const fn all(page_count: usize) -> Self {
        Self::new(0, page_count.saturating_sub(1), false)
    }

    pub const fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Reject inverted or out-of-bounds spans. Never clamps.
    pub fn validate(&self, page_count: usize) -> Result<()> {
        if self.start_page > self.stop_page || self.stop_page >= page_count {
            return Err(ManipError::range(self.start_page, self.stop_page, page_count));
        }
        Ok(())
    }

    /// Number of pages covered
    pub fn page_span(&self) -> usize {
        self.stop_page.saturating_sub(self.start_page) + 1
    }

    /// Page indices in traversal order
    pub fn pages(&self) -> Vec<usize> {
        let pages = self.start_page..=self.stop_page;
        if self.reverse {
            pages.rev().collect()
        } else {
            pages.collect()
        }
    }
}

impl fmt::Display for RangeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pages {}..={}", self.start_page, self.stop_page)?;
        if self.reverse {
            write!(f, " (reversed)")?;
        }
        Ok(())
    }
}

/// Which pages the user asked for: everything, or the page currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManipScope {
    AllPages,
    Page(usize),
}

impl ManipScope {
    pub fn from_page(page: Option<usize>) -> Self {
        page.map_or(Self::AllPages, Self::Page)
    }

    pub const fn is_all(&self) -> bool {
        matches!(self, Self::AllPages)
    }

    /// Turn the scope into a range for a grid with `page_count` pages
    pub const fn to_range(&self, page_count: usize, reverse: bool) -> RangeParam {
        match *self {
            Self::AllPages => RangeParam::all(page_count).reversed(reverse),
            Self::Page(page) => RangeParam::single(page).reversed(reverse),
        }
    }
}

/// Resolve a validated range to the ordered cells an operation may touch.
///
/// Locked cells are dropped when `honor_locks` is set.
pub fn resolve_cells<G: StorageGrid + ?Sized>(
    grid: &G,
    range: &RangeParam,
    honor_locks: bool,
) -> Vec<CellRef> {
    let per_page = grid.cells_per_page();
    let mut cells = Vec::with_capacity(range.page_span() * per_page);
    for page in range.pages() {
        for cell in 0..per_page {
            if honor_locks && grid.is_locked(page, cell) {
                continue;
            }
            cells.push(CellRef::new(page, cell));
        }
    }
    cells
}
