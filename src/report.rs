//! User-facing result messages
//!
//! The engine only returns counts and errors; this module turns them into the
//! text a front end shows after a manipulation runs.

use crate::engine::{ExecutionResult, ManipKind, ManipScope};
use crate::error::ManipError;
use crate::types::ManipCategory;
use std::fmt;

/// Rendered outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// True only when at least one cell changed
    pub success: bool,
    pub message: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Success text for a category, plural when the whole grid was targeted
pub fn success_message(category: ManipCategory, all: bool) -> &'static str {
    match (category, all) {
        (ManipCategory::Sort, true) => "Boxes sorted!",
        (ManipCategory::Sort, false) => "Box sorted!",
        (ManipCategory::Clear, true) => "Boxes cleared!",
        (ManipCategory::Clear, false) => "Box cleared!",
        (ManipCategory::Modify, true) => "Modified all boxes!",
        (ManipCategory::Modify, false) => "Modified box!",
    }
}

/// Text shown when a legal invocation changed nothing
pub fn failure_message(category: ManipCategory, all: bool) -> &'static str {
    match (category, all) {
        (ManipCategory::Sort, true) => "Boxes are already sorted.",
        (ManipCategory::Sort, false) => "Box is already sorted.",
        (ManipCategory::Clear, true) => "Nothing to clear in any box.",
        (ManipCategory::Clear, false) => "Nothing to clear in this box.",
        (ManipCategory::Modify, true) => "No slots in any box needed modifying.",
        (ManipCategory::Modify, false) => "No slots in this box needed modifying.",
    }
}

/// Render the outcome of running `kind` over `scope`
pub fn describe(
    kind: ManipKind,
    scope: ManipScope,
    outcome: &Result<ExecutionResult, ManipError>,
) -> Report {
    let category = kind.category();
    let all = scope.is_all();

    match outcome {
        Ok(result) if result.affected > 0 => {
            let mut message = format!(
                "{} ({} slots affected)",
                success_message(category, all),
                result.affected
            );
            if result.skipped > 0 {
                message.push_str(&format!(" ({} slots skipped)", result.skipped));
            }
            Report {
                success: true,
                message,
            }
        }
        Ok(result) => {
            let mut message = failure_message(category, all).to_string();
            if result.skipped > 0 {
                message.push_str(&format!(" ({} slots skipped)", result.skipped));
            }
            Report {
                success: false,
                message,
            }
        }
        Err(err) => Report {
            success: false,
            message: format!("{} failed: {}", kind.label(), err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(affected: usize, skipped: usize) -> Result<ExecutionResult, ManipError> {
        Ok(ExecutionResult {
            affected,
            skipped,
            visited: 30,
        })
    }

    #[test]
    fn test_success_includes_count() {
        let report = describe(ManipKind::SortSpecies, ManipScope::AllPages, &result(4, 0));
        assert!(report.success);
        assert_eq!(report.message, "Boxes sorted! (4 slots affected)");
    }

    #[test]
    fn test_noop_uses_failure_text() {
        let report = describe(ManipKind::DeleteAll, ManipScope::Page(2), &result(0, 0));
        assert!(!report.success);
        assert_eq!(report.message, "Nothing to clear in this box.");
    }

    #[test]
    fn test_skipped_cells_reported() {
        let report = describe(ManipKind::ModifyHeal, ManipScope::Page(0), &result(2, 1));
        assert_eq!(report.message, "Modified box! (2 slots affected) (1 slots skipped)");
    }

    #[test]
    fn test_error_report() {
        let outcome = Err(ManipError::range(0, 40, 32));
        let report = describe(ManipKind::DeleteEggs, ManipScope::AllPages, &outcome);
        assert!(!report.success);
        assert_eq!(
            report.message,
            "Eggs failed: Page range 0..=40 is invalid for a grid with 32 pages"
        );
    }
}
