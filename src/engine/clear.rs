//! Clear rules and the clear algorithm

use super::descriptor::ClearRule;
use super::{Slot, WritePlan};
use crate::grid::GridProfile;
use crate::record::Record;
use std::collections::HashSet;

/// Plan a clear over the occupied, readable `slots` in traversal order.
///
/// Blank cells are never rewritten, so clearing an already empty range
/// affects nothing.
pub(crate) fn plan(
    rule: &ClearRule,
    slots: &[Slot],
    profile: &GridProfile,
    blank: &Record,
) -> WritePlan {
    let mut plan = WritePlan::default();
    let mut seen = HashSet::new();

    for slot in slots.iter().filter(|slot| !slot.record.is_empty()) {
        let clear = match rule {
            ClearRule::Matching(matches) => matches(&slot.record, profile),
            ClearRule::Duplicates => match slot.record.identity() {
                Some(identity) => !seen.insert(identity),
                None => false,
            },
        };

        if clear {
            plan.push(slot.at, blank.clone());
            plan.affected += 1;
        }
    }
    plan
}

// ============================================================================
// Predicates
// ============================================================================

pub fn any(_: &Record, _: &GridProfile) -> bool {
    true
}

pub fn is_egg(rec: &Record, _: &GridProfile) -> bool {
    rec.is_egg
}

/// Origin generation older than the storage's; unknown origin (0) is kept
pub fn is_past_generation(rec: &Record, profile: &GridProfile) -> bool {
    rec.generation != 0 && rec.generation < profile.generation
}

pub fn is_foreign(rec: &Record, profile: &GridProfile) -> bool {
    rec.owner != profile.owner
}

pub fn is_untrained(rec: &Record, _: &GridProfile) -> bool {
    rec.effort_total == 0
}

pub fn is_itemless(rec: &Record, _: &GridProfile) -> bool {
    rec.held_item == 0
}

/// Only records the backend flagged illegal; unknown legality is kept
pub fn is_illegal(rec: &Record, _: &GridProfile) -> bool {
    rec.legal == Some(false)
}
