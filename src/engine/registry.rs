//! Static catalogue of every manipulation descriptor
//!
//! The table is built at compile time from [`define`], whose `match` over
//! [`ManipKind`] is exhaustive: adding a kind without a definition does not
//! compile. Queries never mutate anything and never read grid cells.

use super::descriptor::{
    ClearRule, ManipAction, ManipDescriptor, ManipKind, ModifyRule, SortOrder, SortRule,
};
use super::{clear, modify, sort};
use crate::error::{ManipError, Result};
use crate::grid::{GridProfile, StorageGrid};
use crate::record::Record;
use crate::types::{Capability, CapabilitySet, ManipCategory};
use std::str::FromStr;
use strum::{EnumCount, VariantArray};

static DESCRIPTORS: [ManipDescriptor; ManipKind::COUNT] = {
    let mut table = [define(ManipKind::SortSpecies); ManipKind::COUNT];
    let mut i = 0;
    while i < ManipKind::COUNT {
        table[i] = define(ManipKind::VARIANTS[i]);
        i += 1;
    }
    table
};

const fn ascending(key: fn(&Record, &GridProfile) -> sort::SortKey) -> ManipAction {
    ManipAction::Sort(SortRule {
        key,
        order: SortOrder::Ascending,
    })
}

const fn descending(key: fn(&Record, &GridProfile) -> sort::SortKey) -> ManipAction {
    ManipAction::Sort(SortRule {
        key,
        order: SortOrder::Descending,
    })
}

const fn clear_if(matches: fn(&Record, &GridProfile) -> bool) -> ManipAction {
    ManipAction::Clear(ClearRule::Matching(matches))
}

const fn rewrite(apply: fn(&mut Record, &GridProfile)) -> ManipAction {
    ManipAction::Modify(ModifyRule { apply })
}

const fn caps(list: &[Capability]) -> CapabilitySet {
    CapabilitySet::of(list)
}

const fn define(kind: ManipKind) -> ManipDescriptor {
    use Capability::*;
    use ManipKind::*;

    match kind {
        // Sort
        SortSpecies => ManipDescriptor::new(kind, ascending(sort::by_species)),
        SortSpeciesReverse => ManipDescriptor::new(kind, descending(sort::by_species)),
        SortLevelHigh => ManipDescriptor::new(kind, descending(sort::by_level)),
        SortLevelLow => ManipDescriptor::new(kind, ascending(sort::by_level)),
        SortDate => {
            ManipDescriptor::new(kind, ascending(sort::by_met_date)).requires(caps(&[MetDates]))
        }
        SortName => {
            ManipDescriptor::new(kind, ascending(sort::by_name)).requires(caps(&[Nicknames]))
        }
        SortFavorite => {
            ManipDescriptor::new(kind, ascending(sort::favorites_first))
                .requires(caps(&[Favorites]))
        }
        SortShiny => {
            ManipDescriptor::new(kind, ascending(sort::shiny_first)).requires(caps(&[Shiny]))
        }
        SortOwner => {
            ManipDescriptor::new(kind, ascending(sort::by_owner)).requires(caps(&[OwnerTracking]))
        }
        SortType => ManipDescriptor::new(kind, ascending(sort::by_type)).requires(caps(&[Types])),
        SortVersion => ManipDescriptor::new(kind, ascending(sort::by_version)).min_generation(3),
        SortTraining => {
            ManipDescriptor::new(kind, descending(sort::by_training))
                .requires(caps(&[EffortValues]))
        }
        SortPotential => {
            ManipDescriptor::new(kind, descending(sort::by_potential)).requires(caps(&[Potential]))
        }
        SortLegal => {
            ManipDescriptor::new(kind, ascending(sort::legal_first)).requires(caps(&[Legality]))
        }

        // Clear
        DeleteAll => ManipDescriptor::new(kind, clear_if(clear::any)),
        DeleteEggs => ManipDescriptor::new(kind, clear_if(clear::is_egg)).requires(caps(&[Eggs])),
        DeletePastGen => {
            ManipDescriptor::new(kind, clear_if(clear::is_past_generation)).min_generation(2)
        }
        DeleteForeign => {
            ManipDescriptor::new(kind, clear_if(clear::is_foreign)).requires(caps(&[OwnerTracking]))
        }
        DeleteUntrained => {
            ManipDescriptor::new(kind, clear_if(clear::is_untrained))
                .requires(caps(&[EffortValues]))
        }
        DeleteItemless => {
            ManipDescriptor::new(kind, clear_if(clear::is_itemless)).requires(caps(&[HeldItems]))
        }
        DeleteIllegal => {
            ManipDescriptor::new(kind, clear_if(clear::is_illegal)).requires(caps(&[Legality]))
        }
        DeleteClones => ManipDescriptor::new(kind, ManipAction::Clear(ClearRule::Duplicates)),

        // Modify
        ModifyHatchEggs => {
            ManipDescriptor::new(kind, rewrite(modify::hatch_egg)).requires(caps(&[Eggs]))
        }
        ModifyMaxFriendship => {
            ManipDescriptor::new(kind, rewrite(modify::max_friendship))
                .requires(caps(&[Friendship]))
        }
        ModifyMaxLevel => ManipDescriptor::new(kind, rewrite(modify::max_level)),
        ModifyRemoveNicknames => {
            ManipDescriptor::new(kind, rewrite(modify::remove_nickname))
                .requires(caps(&[Nicknames]))
        }
        ModifyRemoveItem => {
            ManipDescriptor::new(kind, rewrite(modify::remove_item)).requires(caps(&[HeldItems]))
        }
        ModifyHeal => {
            ManipDescriptor::new(kind, rewrite(modify::heal)).requires(caps(&[StoredStats]))
        }
        ModifyHyperTrain => {
            ManipDescriptor::new(kind, rewrite(modify::hyper_train))
                .requires(caps(&[HyperTraining]))
                .min_generation(7)
        }
        ModifyClearFavorite => {
            ManipDescriptor::new(kind, rewrite(modify::clear_favorite)).requires(caps(&[Favorites]))
        }
    }
}

impl ManipKind {
    /// The static descriptor for this kind
    pub fn descriptor(self) -> &'static ManipDescriptor {
        &DESCRIPTORS[self as usize]
    }
}

/// Every descriptor in registration order
pub fn all() -> &'static [ManipDescriptor] {
    &DESCRIPTORS
}

/// Descriptors of one category in registration order
pub fn by_category(category: ManipCategory) -> impl Iterator<Item = &'static ManipDescriptor> {
    DESCRIPTORS.iter().filter(move |d| d.category() == category)
}

/// Descriptors of `category` usable against `grid`, in menu order
pub fn list_usable<G: StorageGrid + ?Sized>(
    category: ManipCategory,
    grid: &G,
) -> Vec<&'static ManipDescriptor> {
    list_usable_for(category, grid.profile())
}

/// [`list_usable`] against a bare profile
pub fn list_usable_for(
    category: ManipCategory,
    profile: &GridProfile,
) -> Vec<&'static ManipDescriptor> {
    by_category(category).filter(|d| d.is_usable(profile)).collect()
}

/// Every usable kind across all categories, in registration order
pub fn usable_kinds(profile: &GridProfile) -> Vec<ManipKind> {
    DESCRIPTORS
        .iter()
        .filter(|d| d.is_usable(profile))
        .map(|d| d.kind)
        .collect()
}

/// Look up a descriptor by its kind name (e.g. `"SortSpecies"`)
pub fn lookup(name: &str) -> Result<&'static ManipDescriptor> {
    ManipKind::from_str(name.trim())
        .map(ManipKind::descriptor)
        .map_err(|_| ManipError::unknown(name))
}
