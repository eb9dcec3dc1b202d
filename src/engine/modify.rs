//! Modify rules and the modify algorithm
//!
//! Transformations are total over any readable occupied record. A cell is
//! rewritten only when the transformed record differs from the original.

use super::descriptor::ModifyRule;
use super::{Slot, WritePlan};
use crate::grid::GridProfile;
use crate::record::Record;

pub(crate) fn plan(rule: &ModifyRule, slots: &[Slot], profile: &GridProfile) -> WritePlan {
    let mut plan = WritePlan::default();

    for slot in slots.iter().filter(|slot| !slot.record.is_empty()) {
        let mut next = slot.record.clone();
        (rule.apply)(&mut next, profile);

        if next != slot.record {
            plan.push(slot.at, next);
            plan.affected += 1;
        }
    }
    plan
}

// ============================================================================
// Transformations
// ============================================================================

pub fn hatch_egg(rec: &mut Record, _: &GridProfile) {
    if rec.is_egg {
        rec.is_egg = false;
        rec.nickname = None;
    }
}

pub fn max_friendship(rec: &mut Record, profile: &GridProfile) {
    if !rec.is_egg {
        rec.friendship = profile.max_friendship;
    }
}

pub fn max_level(rec: &mut Record, profile: &GridProfile) {
    if !rec.is_egg {
        rec.level = profile.max_level;
    }
}

pub fn remove_nickname(rec: &mut Record, _: &GridProfile) {
    if !rec.is_egg {
        rec.nickname = None;
    }
}

pub fn remove_item(rec: &mut Record, _: &GridProfile) {
    rec.held_item = 0;
}

pub fn heal(rec: &mut Record, _: &GridProfile) {
    rec.current_hp = rec.stat_hp;
    rec.status = 0;
}

/// Hyper training is only available once a record reaches the level cap
pub fn hyper_train(rec: &mut Record, profile: &GridProfile) {
    if !rec.is_egg && rec.level >= profile.max_level {
        rec.hyper_trained = true;
    }
}

pub fn clear_favorite(rec: &mut Record, _: &GridProfile) {
    rec.favorite = false;
}
