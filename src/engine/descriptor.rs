//! Manipulation kinds and their immutable descriptors
//!
//! Every batch operation is a [`ManipKind`] variant. Its behavior lives in a
//! [`ManipDescriptor`]: the category, the capabilities a grid must declare for
//! the operation to be offered, and the rule the category algorithm runs.

use crate::grid::GridProfile;
use crate::record::Record;
use crate::engine::sort::SortKey;
use crate::types::{CapabilitySet, ManipCategory};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr, VariantArray};

/// Every registered batch operation.
///
/// Declaration order is menu order within each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter, EnumCount, IntoStaticStr, VariantArray)]
pub enum ManipKind {
    // Sort
    SortSpecies,
    SortSpeciesReverse,
    SortLevelHigh,
    SortLevelLow,
    SortDate,
    SortName,
    SortFavorite,
    SortShiny,
    SortOwner,
    SortType,
    SortVersion,
    SortTraining,
    SortPotential,
    SortLegal,

    // Clear
    DeleteAll,
    DeleteEggs,
    DeletePastGen,
    DeleteForeign,
    DeleteUntrained,
    DeleteItemless,
    DeleteIllegal,
    DeleteClones,

    // Modify
    ModifyHatchEggs,
    ModifyMaxFriendship,
    ModifyMaxLevel,
    ModifyRemoveNicknames,
    ModifyRemoveItem,
    ModifyHeal,
    ModifyHyperTrain,
    ModifyClearFavorite,
}

impl ManipKind {
    /// Menu label: the variant name without its category prefix
    pub fn label(self) -> &'static str {
        let name: &'static str = self.into();
        ["Sort", "Delete", "Modify"]
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix))
            .unwrap_or(name)
    }

    pub fn category(self) -> ManipCategory {
        self.descriptor().category()
    }
}

/// Direction a sort key is applied in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Computes a record's sort key
#[derive(Debug, Clone, Copy)]
pub struct SortRule {
    pub key: fn(&Record, &GridProfile) -> SortKey,
    pub order: SortOrder,
}

/// Decides which occupied cells a clear operation blanks
#[derive(Debug, Clone, Copy)]
pub enum ClearRule {
    /// Clear every record the predicate accepts
    Matching(fn(&Record, &GridProfile) -> bool),
    /// Clear every record whose identity already appeared earlier in the range
    Duplicates,
}

/// In-place transformation of one occupied record
#[derive(Debug, Clone, Copy)]
pub struct ModifyRule {
    pub apply: fn(&mut Record, &GridProfile),
}

/// Category-specific behavior of a descriptor
#[derive(Debug, Clone, Copy)]
pub enum ManipAction {
    Sort(SortRule),
    Clear(ClearRule),
    Modify(ModifyRule),
}

/// Immutable definition of one batch operation
#[derive(Debug, Clone, Copy)]
pub struct ManipDescriptor {
    pub kind: ManipKind,
    requires: CapabilitySet,
    min_generation: u8,
    action: ManipAction,
}

impl ManipDescriptor {
    pub const fn new(kind: ManipKind, action: ManipAction) -> Self {
        Self {
            kind,
            requires: CapabilitySet::empty(),
            min_generation: 0,
            action,
        }
    }

    /// Require capabilities of the grid
    pub const fn requires(mut self, caps: CapabilitySet) -> Self {
        self.requires = caps;
        self
    }

    /// Require a minimum storage generation
    pub const fn min_generation(mut self, generation: u8) -> Self {
        self.min_generation = generation;
        self
    }

    pub const fn category(&self) -> ManipCategory {
        match self.action {
            ManipAction::Sort(_) => ManipCategory::Sort,
            ManipAction::Clear(_) => ManipCategory::Clear,
            ManipAction::Modify(_) => ManipCategory::Modify,
        }
    }

    pub const fn action(&self) -> ManipAction {
        self.action
    }

    pub const fn requirements(&self) -> CapabilitySet {
        self.requires
    }

    /// Whether this operation may be offered for a grid with the given profile.
    ///
    /// Reads only declared flags; never inspects records.
    pub fn is_usable(&self, profile: &GridProfile) -> bool {
        profile.generation >= self.min_generation
            && profile.capabilities.contains_all(self.requires)
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Capability;
    use std::str::FromStr;

    #[test]
    fn test_labels_strip_category_prefix() {
        assert_eq!(ManipKind::SortSpecies.label(), "Species");
        assert_eq!(ManipKind::SortSpeciesReverse.label(), "SpeciesReverse");
        assert_eq!(ManipKind::DeleteAll.label(), "All");
        assert_eq!(ManipKind::ModifyHeal.label(), "Heal");
    }

    #[test]
    fn test_kind_parses_from_name() {
        assert_eq!(ManipKind::from_str("DeleteClones").unwrap(), ManipKind::DeleteClones);
        assert_eq!(ManipKind::SortLegal.to_string(), "SortLegal");
        assert!(ManipKind::from_str("SortRandom").is_err());
    }

    #[test]
    fn test_usability_checks_flags_and_generation() {
        let desc = ManipKind::ModifyHyperTrain.descriptor();

        let old = GridProfile::new(6, CapabilitySet::all());
        assert!(!desc.is_usable(&old));

        let new_without =
            GridProfile::new(8, CapabilitySet::all().without(Capability::HyperTraining));
        assert!(!desc.is_usable(&new_without));

        let new_with = GridProfile::new(8, CapabilitySet::of(&[Capability::HyperTraining]));
        assert!(desc.is_usable(&new_with));
    }

    #[test]
    fn test_category_follows_action() {
        assert_eq!(ManipKind::SortDate.category(), ManipCategory::Sort);
        assert_eq!(ManipKind::DeleteEggs.category(), ManipCategory::Clear);
        assert_eq!(ManipKind::ModifyRemoveItem.category(), ManipCategory::Modify);
    }
}
