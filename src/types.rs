//! Capability flags and category enums shared by the grid and the engine
//!
//! Storage backends declare what their record format supports up front, as a
//! [`CapabilitySet`]. Usability checks consult only these flags, never the
//! concrete storage type or its records.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A feature a storage format may or may not carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Capability {
    /// Records can hold an item
    HeldItems = 0,
    /// Records can be eggs
    Eggs = 1,
    /// Records carry a custom nickname
    Nicknames = 2,
    /// Records carry a friendship value
    Friendship = 3,
    /// Records carry a met/acquired date
    MetDates = 4,
    /// Backend supplies a legality flag per record
    Legality = 5,
    /// Records can be marked as favorite
    Favorites = 6,
    /// Records carry a shiny flag
    Shiny = 7,
    /// Records carry elemental types
    Types = 8,
    /// Records carry effort-value totals
    EffortValues = 9,
    /// Records carry individual-value totals
    Potential = 10,
    /// Records support hyper training
    HyperTraining = 11,
    /// Stored records keep current HP and status
    StoredStats = 12,
    /// Records remember their original trainer
    OwnerTracking = 13,
}

impl Capability {
    #[inline]
    const fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// Set of declared [`Capability`] flags, stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Capability>", into = "Vec<Capability>")]
pub struct CapabilitySet(u32);

impl CapabilitySet {
    /// No capabilities
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every capability
    pub fn all() -> Self {
        Capability::iter().collect()
    }

    /// Add a capability (usable in `const` tables)
    pub const fn with(self, cap: Capability) -> Self {
        Self(self.0 | cap.bit())
    }

    /// Remove a capability
    pub const fn without(self, cap: Capability) -> Self {
        Self(self.0 & !cap.bit())
    }

    /// Build a set from a slice (usable in `const` tables)
    pub const fn of(caps: &[Capability]) -> Self {
        let mut set = Self::empty();
        let mut i = 0;
        while i < caps.len() {
            set = set.with(caps[i]);
            i += 1;
        }
        set
    }

    #[inline]
    pub const fn contains(self, cap: Capability) -> bool {
        self.0 & cap.bit() != 0
    }

    /// True if every flag in `other` is also in `self`
    #[inline]
    pub const fn contains_all(self, other: CapabilitySet) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained capabilities in declaration order
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::iter().filter(move |cap| self.contains(*cap))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl From<Vec<Capability>> for CapabilitySet {
    fn from(caps: Vec<Capability>) -> Self {
        caps.into_iter().collect()
    }
}

impl From<CapabilitySet> for Vec<Capability> {
    fn from(set: CapabilitySet) -> Self {
        set.iter().collect()
    }
}

/// Manipulation category (defines which menu an operation appears in)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ManipCategory {
    Sort,
    Clear,
    Modify,
}
