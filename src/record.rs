//! Stored record view
//!
//! A [`Record`] is the slice of a save-format entity that the manipulation
//! engine is allowed to see: the keys it sorts and filters on and the handful
//! of fields bulk modifications rewrite. Everything else stays with the
//! storage backend. A record with `species == 0` is an empty cell.

use crate::grid::GridProfile;
use crate::types::Capability;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Calendar date a record was met/acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl MetDate {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// True if this names a real day of the Gregorian calendar
    pub fn is_valid(&self) -> bool {
        if self.month == 0 || self.month > 12 || self.day == 0 {
            return false;
        }
        self.day <= days_in_month(self.year, self.month)
    }
}

impl fmt::Display for MetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Why a non-empty record could not be interpreted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordFault {
    #[error("species {species} exceeds the storage maximum of {max}")]
    SpeciesOutOfRange { species: u16, max: u16 },

    #[error("level {level} is outside 1..={max}")]
    LevelOutOfRange { level: u8, max: u8 },

    #[error("met date {0} is not a calendar date")]
    InvalidMetDate(MetDate),

    #[error("current HP {current} exceeds maximum HP {max}")]
    HpExceedsMax { current: u16, max: u16 },
}

/// One cell's content as seen by the engine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Species identifier, 0 = empty cell
    pub species: u16,
    pub form: u8,
    pub level: u8,
    pub is_egg: bool,
    /// Custom nickname, `None` when the default name is shown
    pub nickname: Option<String>,
    /// Held item identifier, 0 = nothing held
    pub held_item: u16,
    pub friendship: u8,
    pub met_date: Option<MetDate>,
    /// Legality flag supplied by the backend, `None` when unknown
    pub legal: Option<bool>,
    /// Origin game identifier
    pub version: u8,
    /// Origin generation
    pub generation: u8,
    /// Original trainer identifier
    pub owner: u32,
    pub types: [u8; 2],
    pub shiny: bool,
    pub favorite: bool,
    pub effort_total: u16,
    pub potential_total: u16,
    pub hyper_trained: bool,
    pub stat_hp: u16,
    pub current_hp: u16,
    pub status: u8,
    /// Identity value, used with species to detect clones
    pub pid: u32,
}

impl Record {
    /// The empty-cell sentinel
    pub fn blank() -> Self {
        Self::default()
    }

    /// A minimal occupied record
    pub fn new(species: u16, level: u8) -> Self {
        Self {
            species,
            level,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.species == 0
    }

    /// Identity used for clone detection.
    ///
    /// `None` for empty records and for `pid == 0`, which backends use when the
    /// format has no identity value; such records are never treated as clones.
    pub fn identity(&self) -> Option<(u16, u8, u32, u16)> {
        if self.is_empty() || self.pid == 0 {
            return None;
        }
        Some((self.species, self.form, self.pid, self.potential_total))
    }

    /// Check that this record can be interpreted under the grid's declared limits.
    ///
    /// Empty records are always valid.
    pub fn validate(&self, profile: &GridProfile) -> Result<(), RecordFault> {
        if self.is_empty() {
            return Ok(());
        }

        if self.species > profile.max_species {
            return Err(RecordFault::SpeciesOutOfRange {
                species: self.species,
                max: profile.max_species,
            });
        }

        if self.level == 0 || self.level > profile.max_level {
            return Err(RecordFault::LevelOutOfRange {
                level: self.level,
                max: profile.max_level,
            });
        }

        if let Some(date) = self.met_date {
            if !date.is_valid() {
                return Err(RecordFault::InvalidMetDate(date));
            }
        }

        if profile.supports(Capability::StoredStats) && self.current_hp > self.stat_hp {
            return Err(RecordFault::HpExceedsMax {
                current: self.current_hp,
                max: self.stat_hp,
            });
        }

        Ok(())
    }
}
