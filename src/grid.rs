//! Storage grid abstraction
//!
//! A storage grid is a fixed number of pages ("boxes"), each a fixed number of
//! cells, each cell holding one [`Record`] (possibly the blank sentinel). The
//! engine only ever talks to a grid through the [`StorageGrid`] trait; the
//! concrete save-format backend lives elsewhere.
//!
//! [`MemoryGrid`] is a plain in-memory implementation used by the fixture CLI
//! and the tests. It round-trips through JSON.

use crate::record::Record;
use crate::types::{Capability, CapabilitySet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Address of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub page: usize,
    pub cell: usize,
}

impl CellRef {
    pub const fn new(page: usize, cell: usize) -> Self {
        Self { page, cell }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} cell {}", self.page, self.cell)
    }
}

fn default_max_species() -> u16 {
    1025
}

fn default_max_level() -> u8 {
    100
}

fn default_max_friendship() -> u8 {
    255
}

/// Declared capabilities and limits of a storage format.
///
/// Attached to a grid at construction; usability checks read nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridProfile {
    /// Format generation
    pub generation: u8,

    #[serde(default)]
    pub capabilities: CapabilitySet,

    #[serde(default = "default_max_species")]
    pub max_species: u16,

    #[serde(default = "default_max_level")]
    pub max_level: u8,

    #[serde(default = "default_max_friendship")]
    pub max_friendship: u8,

    /// Trainer identifier of the save's owner
    #[serde(default)]
    pub owner: u32,
}

impl GridProfile {
    /// Profile with default limits
    pub fn new(generation: u8, capabilities: CapabilitySet) -> Self {
        Self {
            generation,
            capabilities,
            max_species: default_max_species(),
            max_level: default_max_level(),
            max_friendship: default_max_friendship(),
            owner: 0,
        }
    }

    pub fn with_owner(mut self, owner: u32) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_max_species(mut self, max_species: u16) -> Self {
        self.max_species = max_species;
        self
    }

    pub fn with_max_level(mut self, max_level: u8) -> Self {
        self.max_level = max_level;
        self
    }

    #[inline]
    pub fn supports(&self, cap: Capability) -> bool {
        self.capabilities.contains(cap)
    }
}

/// A paginated container of records.
///
/// # Contract
///
/// - `page_count()` and `cells_per_page()` never change for the life of the grid.
/// - `(page, cell)` addresses are stable across operations.
/// - `set_cell` replaces the cell's content entirely.
/// - The engine only calls `get_cell`/`set_cell` with in-bounds addresses.
pub trait StorageGrid {
    fn page_count(&self) -> usize;

    fn cells_per_page(&self) -> usize;

    /// Declared capability flags and limits
    fn profile(&self) -> &GridProfile;

    fn get_cell(&self, page: usize, cell: usize) -> Record;

    fn set_cell(&mut self, page: usize, cell: usize, record: Record);

    /// Record written to a cell to clear it
    fn blank_record(&self) -> Record {
        Record::blank()
    }

    /// Overwrite-protected cells are never moved or rewritten while locks are honored
    fn is_locked(&self, _page: usize, _cell: usize) -> bool {
        false
    }
}

/// Errors building a [`MemoryGrid`] from raw pages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridShapeError {
    #[error("page {page} has {len} cells, expected {expected}")]
    RaggedPage {
        page: usize,
        len: usize,
        expected: usize,
    },

    #[error("locked {cell} is outside the grid")]
    LockOutOfBounds { cell: CellRef },
}

/// Serialized form, validated into a [`MemoryGrid`]
#[derive(Deserialize)]
struct MemoryGridData {
    profile: GridProfile,
    cells_per_page: usize,
    pages: Vec<Vec<Record>>,
    #[serde(default)]
    locked: BTreeSet<CellRef>,
}

impl TryFrom<MemoryGridData> for MemoryGrid {
    type Error = GridShapeError;

    fn try_from(data: MemoryGridData) -> std::result::Result<Self, Self::Error> {
        let mut grid = MemoryGrid::from_pages(data.profile, data.cells_per_page, data.pages)?;
        for cell in data.locked {
            grid.lock(cell)?;
        }
        Ok(grid)
    }
}

/// In-memory storage grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MemoryGridData")]
pub struct MemoryGrid {
    profile: GridProfile,
    cells_per_page: usize,
    pages: Vec<Vec<Record>>,
    locked: BTreeSet<CellRef>,
}

impl MemoryGrid {
    /// Create a grid of blank cells
    pub fn new(profile: GridProfile, page_count: usize, cells_per_page: usize) -> Self {
        Self {
            profile,
            cells_per_page,
            pages: vec![vec![Record::blank(); cells_per_page]; page_count],
            locked: BTreeSet::new(),
        }
    }

    /// Create a grid from explicit pages; every page must hold `cells_per_page` records
    pub fn from_pages(
        profile: GridProfile,
        cells_per_page: usize,
        pages: Vec<Vec<Record>>,
    ) -> std::result::Result<Self, GridShapeError> {
        if let Some((page, cells)) = pages
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != cells_per_page)
        {
            return Err(GridShapeError::RaggedPage {
                page,
                len: cells.len(),
                expected: cells_per_page,
            });
        }

        Ok(Self {
            profile,
            cells_per_page,
            pages,
            locked: BTreeSet::new(),
        })
    }

    /// Build a grid whose records carry only the given species (0 = blank), laid out row-major
    pub fn from_species(
        profile: GridProfile,
        cells_per_page: usize,
        species: &[u16],
    ) -> std::result::Result<Self, GridShapeError> {
        let pages = species
            .chunks(cells_per_page.max(1))
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|&s| if s == 0 { Record::blank() } else { Record::new(s, 1) })
                    .collect()
            })
            .collect();
        Self::from_pages(profile, cells_per_page, pages)
    }

    /// Mark a cell as overwrite-protected
    pub fn lock(&mut self, cell: CellRef) -> std::result::Result<(), GridShapeError> {
        if cell.page >= self.pages.len() || cell.cell >= self.cells_per_page {
            return Err(GridShapeError::LockOutOfBounds { cell });
        }
        self.locked.insert(cell);
        Ok(())
    }

    pub fn unlock(&mut self, cell: CellRef) {
        self.locked.remove(&cell);
    }

    pub fn get(&self, page: usize, cell: usize) -> Option<&Record> {
        self.pages.get(page).and_then(|cells| cells.get(cell))
    }

    pub fn get_mut(&mut self, page: usize, cell: usize) -> Option<&mut Record> {
        self.pages.get_mut(page).and_then(|cells| cells.get_mut(cell))
    }

    /// All cells in page-major order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.pages.iter().flatten()
    }

    /// Species of every cell in page-major order (0 for blank cells)
    pub fn species_layout(&self) -> Vec<u16> {
        self.records().map(|r| r.species).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.records().filter(|r| !r.is_empty()).count()
    }

    /// Load a grid from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read grid from {:?}", path.as_ref()))?;

        let grid: Self = serde_json::from_str(&content).context("Failed to parse grid JSON")?;

        Ok(grid)
    }

    /// Save the grid to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize grid to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write grid to {:?}", path.as_ref()))?;

        Ok(())
    }
}

impl StorageGrid for MemoryGrid {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn cells_per_page(&self) -> usize {
        self.cells_per_page
    }

    fn profile(&self) -> &GridProfile {
        &self.profile
    }

    fn get_cell(&self, page: usize, cell: usize) -> Record {
        self.get(page, cell).cloned().unwrap_or_else(Record::blank)
    }

    fn set_cell(&mut self, page: usize, cell: usize, record: Record) {
        debug_assert!(page < self.pages.len() && cell < self.cells_per_page);
        if let Some(slot) = self.get_mut(page, cell) {
            *slot = record;
        }
    }

    fn is_locked(&self, page: usize, cell: usize) -> bool {
        self.locked.contains(&CellRef::new(page, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> GridProfile {
        GridProfile::new(8, CapabilitySet::of(&[Capability::HeldItems]))
    }

    #[test]
    fn test_new_grid_is_blank() {
        let grid = MemoryGrid::new(profile(), 4, 30);
        assert_eq!(grid.page_count(), 4);
        assert_eq!(grid.cells_per_page(), 30);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_from_species_layout() {
        let grid = MemoryGrid::from_species(profile(), 2, &[5, 0, 3, 0, 1, 0]).unwrap();
        assert_eq!(grid.page_count(), 3);
        assert_eq!(grid.species_layout(), vec![5, 0, 3, 0, 1, 0]);
        assert_eq!(grid.get_cell(1, 0).species, 3);
    }

    #[test]
    fn test_ragged_pages_rejected() {
        let pages = vec![vec![Record::blank(); 2], vec![Record::blank(); 3]];
        let err = MemoryGrid::from_pages(profile(), 2, pages).unwrap_err();
        assert_eq!(
            err,
            GridShapeError::RaggedPage {
                page: 1,
                len: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn test_set_cell_replaces_content() {
        let mut grid = MemoryGrid::new(profile(), 1, 2);
        let mut rec = Record::new(7, 20);
        rec.held_item = 4;
        grid.set_cell(0, 1, rec.clone());
        assert_eq!(grid.get_cell(0, 1), rec);

        grid.set_cell(0, 1, Record::new(9, 1));
        assert_eq!(grid.get_cell(0, 1).held_item, 0);
    }

    #[test]
    fn test_locking() {
        let mut grid = MemoryGrid::new(profile(), 2, 2);
        grid.lock(CellRef::new(1, 1)).unwrap();
        assert!(grid.is_locked(1, 1));
        assert!(!grid.is_locked(0, 0));
        assert!(grid.lock(CellRef::new(2, 0)).is_err());

        grid.unlock(CellRef::new(1, 1));
        assert!(!grid.is_locked(1, 1));
    }

    #[test]
    fn test_json_roundtrip_preserves_locks() {
        let mut grid = MemoryGrid::from_species(profile(), 2, &[1, 2, 3, 0]).unwrap();
        grid.lock(CellRef::new(0, 1)).unwrap();

        let json = serde_json::to_string(&grid).unwrap();
        let parsed: MemoryGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, grid);
        assert!(parsed.is_locked(0, 1));
    }

    #[test]
    fn test_json_rejects_ragged_pages() {
        let json = r#"{
            "profile": {"generation": 3},
            "cells_per_page": 2,
            "pages": [[{"species": 1, "level": 5}]]
        }"#;
        assert!(serde_json::from_str::<MemoryGrid>(json).is_err());
    }

    #[test]
    fn test_profile_defaults_from_json() {
        let profile: GridProfile = serde_json::from_str(r#"{"generation": 4}"#).unwrap();
        assert_eq!(profile.max_level, 100);
        assert_eq!(profile.max_species, 1025);
        assert!(profile.capabilities.is_empty());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        let grid = MemoryGrid::from_species(profile(), 3, &[4, 0, 6]).unwrap();

        grid.save_to_file(&path).unwrap();
        let loaded = MemoryGrid::load_from_file(&path).unwrap();
        assert_eq!(loaded, grid);
    }
}
