//! Sort keys and the sort algorithm
//!
//! Occupied records in the resolved cells are stable-sorted by a key and
//! packed to the front of the cell sequence; remaining cells that held a record
//! become blank.
//! Records with equal keys keep their original relative order, so sorting an
//! already sorted range moves nothing.

use super::descriptor::{SortOrder, SortRule};
use super::{Slot, WritePlan};
use crate::grid::GridProfile;
use crate::record::Record;
use std::cmp::Ordering;

/// One component of a composite sort key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    Num(i64),
    Text(String),
}

/// Composite key compared component by component
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SortKey(Vec<KeyPart>);

impl SortKey {
    pub fn num(value: impl Into<i64>) -> Self {
        Self(vec![KeyPart::Num(value.into())])
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self(vec![KeyPart::Text(value.into())])
    }

    pub fn then_num(mut self, value: impl Into<i64>) -> Self {
        self.0.push(KeyPart::Num(value.into()));
        self
    }

    pub fn then_text(mut self, value: impl Into<String>) -> Self {
        self.0.push(KeyPart::Text(value.into()));
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }
}

/// Plan a sort over `slots` (the resolved cells, already stripped of cells the
/// engine must not touch).
///
/// `affected` counts cells that receive a record different from the one they held.
/// Empty cells past the packed records are only rewritten if they held a record.
pub(crate) fn plan(
    rule: &SortRule,
    slots: &[Slot],
    profile: &GridProfile,
    blank: &Record,
) -> WritePlan {
    let mut keyed: Vec<(SortKey, &Record)> = slots
        .iter()
        .filter(|slot| !slot.record.is_empty())
        .map(|slot| ((rule.key)(&slot.record, profile), &slot.record))
        .collect();

    // `sort_by` is stable: equal keys keep traversal order in both directions.
    keyed.sort_by(|(a, _), (b, _)| compare(a, b, rule.order));

    let mut plan = WritePlan::default();
    for (position, slot) in slots.iter().enumerate() {
        match keyed.get(position) {
            Some((_, record)) if slot.record != **record => {
                plan.push(slot.at, (**record).clone());
                plan.affected += 1;
            }
            Some(_) => {}
            None if !slot.record.is_empty() => plan.push(slot.at, blank.clone()),
            None => {}
        }
    }
    plan
}

fn compare(a: &SortKey, b: &SortKey, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => a.cmp(b),
        SortOrder::Descending => b.cmp(a),
    }
}

// ============================================================================
// Key functions
// ============================================================================

pub fn by_species(rec: &Record, _: &GridProfile) -> SortKey {
    SortKey::num(rec.species).then_num(rec.form)
}

pub fn by_level(rec: &Record, _: &GridProfile) -> SortKey {
    SortKey::num(rec.level)
}

/// Dated records first, oldest first
pub fn by_met_date(rec: &Record, _: &GridProfile) -> SortKey {
    match rec.met_date {
        Some(date) => SortKey::num(0)
            .then_num(date.year)
            .then_num(date.month)
            .then_num(date.day),
        None => SortKey::num(1),
    }
}

/// Default-named records first (ordered by species), then nicknames alphabetically
pub fn by_name(rec: &Record, _: &GridProfile) -> SortKey {
    match &rec.nickname {
        None => SortKey::num(0).then_num(rec.species),
        Some(name) => SortKey::num(1).then_text(name.to_lowercase()),
    }
}

pub fn favorites_first(rec: &Record, _: &GridProfile) -> SortKey {
    SortKey::num(!rec.favorite as u8)
}

pub fn shiny_first(rec: &Record, _: &GridProfile) -> SortKey {
    SortKey::num(!rec.shiny as u8)
}

/// The save owner's own records first, then grouped by trainer
pub fn by_owner(rec: &Record, profile: &GridProfile) -> SortKey {
    SortKey::num((rec.owner != profile.owner) as u8).then_num(rec.owner)
}

pub fn by_type(rec: &Record, _: &GridProfile) -> SortKey {
    SortKey::num(rec.types[0]).then_num(rec.types[1])
}

pub fn by_version(rec: &Record, _: &GridProfile) -> SortKey {
    SortKey::num(rec.generation).then_num(rec.version)
}

pub fn by_training(rec: &Record, _: &GridProfile) -> SortKey {
    SortKey::num(rec.effort_total)
}

pub fn by_potential(rec: &Record, _: &GridProfile) -> SortKey {
    SortKey::num(rec.potential_total)
}

/// Legal first, unknown next, illegal last
pub fn legal_first(rec: &Record, _: &GridProfile) -> SortKey {
    let rank: u8 = match rec.legal {
        Some(true) => 0,
        None => 1,
        Some(false) => 2,
    };
    SortKey::num(rank)
}
