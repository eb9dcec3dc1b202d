//! Property-Based Tests for boxmanip
//!
//! Uses proptest for testing invariants over randomly generated grids
//!
//! These tests verify:
//! - Enum string round-trips (to_string → parse)
//! - Idempotence of every sort, clear and modify kind
//! - Range failures never write
//! - Sorts permute records without losing or inventing any
//! - Cells outside the range are never touched

use boxmanip::{
    execute, CapabilitySet, GridProfile, ManipCategory, ManipError, ManipKind, MemoryGrid,
    MetDate, RangeParam, Record, StorageGrid,
};
use proptest::prelude::*;
use strum::{IntoEnumIterator, VariantArray};

fn full_profile() -> GridProfile {
    GridProfile::new(9, CapabilitySet::all()).with_owner(1)
}

// =============================================================================
// Strategies
// =============================================================================

fn met_date_strategy() -> impl Strategy<Value = Option<MetDate>> {
    let date = (2000u16..2030, 1u8..=12, 1u8..=28).prop_map(|(y, m, d)| MetDate::new(y, m, d));
    prop::option::of(date)
}

/// Records that pass validation under [`full_profile`]
fn record_strategy() -> impl Strategy<Value = Record> {
    let species = prop_oneof![1 => Just(0u16), 3 => 1u16..=12];
    (
        (species, 0u8..2, 1u8..=100, any::<bool>()),
        (prop::option::of("[a-z]{1,4}"), 0u16..3, any::<u8>(), met_date_strategy()),
        (prop::option::of(any::<bool>()), 0u8..=9, 0u32..3, any::<[bool; 3]>()),
        (0u16..3, 0u16..3, 0u16..50, 0u8..3),
    )
        .prop_map(
            |(
                (species, form, level, is_egg),
                (nickname, held_item, friendship, met_date),
                (legal, generation, owner, [shiny, favorite, hyper_trained]),
                (effort_total, potential_total, stat_hp, status),
            )| {
                if species == 0 {
                    // Empty cells may carry leftover bytes the engine must not count on.
                    let level = if is_egg { level } else { 0 };
                    return Record { level, ..Record::blank() };
                }
                Record {
                    species,
                    form,
                    level,
                    is_egg,
                    nickname,
                    held_item,
                    friendship,
                    met_date,
                    legal,
                    version: generation,
                    generation,
                    owner,
                    types: [species as u8 % 4, form],
                    shiny,
                    favorite,
                    effort_total,
                    potential_total,
                    hyper_trained,
                    stat_hp,
                    current_hp: stat_hp / 2,
                    status,
                    pid: 0,
                }
            },
        )
}

/// Grids of 1..4 pages with 1..6 cells each.
///
/// With `unique_pids` every occupied record gets a distinct pid in page-major
/// order; otherwise pids collide freely so clones appear.
fn grid_strategy(unique_pids: bool) -> impl Strategy<Value = MemoryGrid> {
    (1usize..4, 1usize..6).prop_flat_map(move |(pages, cells)| {
        (
            prop::collection::vec(record_strategy(), pages * cells),
            prop::collection::vec(0u32..3, pages * cells),
        )
            .prop_map(move |(mut records, pids)| {
                for (index, (record, pid)) in records.iter_mut().zip(pids).enumerate() {
                    if !record.is_empty() {
                        record.pid = if unique_pids { index as u32 + 1 } else { pid };
                    }
                }
                let pages = records.chunks(cells).map(<[Record]>::to_vec).collect();
                MemoryGrid::from_pages(full_profile(), cells, pages).unwrap()
            })
    })
}

fn kinds_of(category: ManipCategory) -> Vec<ManipKind> {
    ManipKind::iter().filter(|k| k.category() == category).collect()
}

fn kind_strategy() -> impl Strategy<Value = ManipKind> {
    prop::sample::select(ManipKind::VARIANTS)
}

fn page_records(grid: &MemoryGrid, page: usize) -> Vec<Record> {
    (0..grid.cells_per_page()).map(|cell| grid.get_cell(page, cell)).collect()
}

fn sorted_debug(records: impl Iterator<Item = Record>) -> Vec<String> {
    let mut out: Vec<String> = records
        .filter(|r| !r.is_empty())
        .map(|r| format!("{:?}", r))
        .collect();
    out.sort();
    out
}

// =============================================================================
// Enum Round-Trips
// =============================================================================

proptest! {
    /// ManipKind: to_string → parse round-trip is identity
    #[test]
    fn manip_kind_roundtrip(kind in kind_strategy()) {
        let s = kind.to_string();
        let parsed: ManipKind = s.parse().expect("Should parse");
        prop_assert_eq!(kind, parsed);
        prop_assert_eq!(boxmanip::lookup(&s).unwrap().kind, kind);
    }

    /// ManipKind: label is the kind name without its category prefix
    #[test]
    fn manip_kind_label_is_suffix(kind in kind_strategy()) {
        let name = kind.to_string();
        prop_assert!(!kind.label().is_empty());
        prop_assert!(name.ends_with(kind.label()));
    }
}

#[test]
fn manip_category_roundtrip() {
    for category in ManipCategory::iter() {
        let parsed: ManipCategory = category.to_string().parse().unwrap();
        assert_eq!(parsed, category);
    }
}

// =============================================================================
// Idempotence
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every sort, forward or reversed, leaves nothing to do on a second pass
    #[test]
    fn sort_is_idempotent(grid in grid_strategy(true), reverse in any::<bool>()) {
        for kind in kinds_of(ManipCategory::Sort) {
            let mut grid = grid.clone();
            let range = RangeParam::all(grid.page_count()).reversed(reverse);
            execute(&mut grid, kind, range).unwrap();

            let after_first = grid.clone();
            let second = execute(&mut grid, kind, range).unwrap();
            prop_assert_eq!(second.affected, 0, "{} not idempotent", kind);
            prop_assert_eq!(&grid, &after_first);
        }
    }

    /// Every clear leaves nothing to do on a second pass
    #[test]
    fn clear_is_idempotent(grid in grid_strategy(false), reverse in any::<bool>()) {
        for kind in kinds_of(ManipCategory::Clear) {
            let mut grid = grid.clone();
            let range = RangeParam::all(grid.page_count()).reversed(reverse);
            execute(&mut grid, kind, range).unwrap();

            let second = execute(&mut grid, kind, range).unwrap();
            prop_assert_eq!(second.affected, 0, "{} not idempotent", kind);
        }
    }

    /// Every modify leaves nothing to do on a second pass
    #[test]
    fn modify_is_idempotent(grid in grid_strategy(true)) {
        for kind in kinds_of(ManipCategory::Modify) {
            let mut grid = grid.clone();
            let range = RangeParam::all(grid.page_count());
            execute(&mut grid, kind, range).unwrap();

            let second = execute(&mut grid, kind, range).unwrap();
            prop_assert_eq!(second.affected, 0, "{} not idempotent", kind);
        }
    }
}

// =============================================================================
// Structural Invariants
// =============================================================================

proptest! {
    /// Inverted or out-of-bounds ranges fail and never write
    #[test]
    fn invalid_range_never_writes(
        grid in grid_strategy(true),
        kind in kind_strategy(),
        start in 0usize..6,
        stop in 0usize..6,
    ) {
        prop_assume!(start > stop || stop >= grid.page_count());

        let mut target = grid.clone();
        let err = execute(&mut target, kind, RangeParam::new(start, stop, false)).unwrap_err();
        prop_assert_eq!(err, ManipError::range(start, stop, grid.page_count()));
        prop_assert_eq!(target, grid);
    }

    /// Sorting permutes records: same multiset, occupied cells packed first
    #[test]
    fn sort_preserves_records(grid in grid_strategy(false), kind_index in 0usize..14) {
        let sorts = kinds_of(ManipCategory::Sort);
        let kind = sorts[kind_index % sorts.len()];

        let mut target = grid.clone();
        let result = execute(&mut target, kind, RangeParam::all(grid.page_count())).unwrap();

        prop_assert_eq!(
            sorted_debug(target.records().cloned()),
            sorted_debug(grid.records().cloned())
        );
        prop_assert!(result.affected <= grid.occupied_count());

        let occupied = target.occupied_count();
        let layout = target.species_layout();
        prop_assert!(layout[..occupied].iter().all(|&s| s != 0));
        prop_assert!(layout[occupied..].iter().all(|&s| s == 0));
    }

    /// Records with equal keys keep their traversal order
    #[test]
    fn species_sort_is_stable(grid in grid_strategy(true)) {
        let mut target = grid.clone();
        execute(&mut target, ManipKind::SortSpecies, RangeParam::all(grid.page_count())).unwrap();

        let occupied: Vec<&Record> = target.records().filter(|r| !r.is_empty()).collect();
        for pair in occupied.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!((a.species, a.form) <= (b.species, b.form));
            if (a.species, a.form) == (b.species, b.form) {
                prop_assert!(a.pid < b.pid);
            }
        }
    }

    /// Clear and modify report exactly the number of cells they changed
    #[test]
    fn affected_counts_changed_cells(grid in grid_strategy(false), kind in kind_strategy()) {
        prop_assume!(kind.category() != ManipCategory::Sort);

        let mut target = grid.clone();
        let result = execute(&mut target, kind, RangeParam::all(grid.page_count())).unwrap();

        let changed = grid
            .records()
            .zip(target.records())
            .filter(|(before, after)| before != after)
            .count();
        prop_assert_eq!(result.affected, changed);
    }

    /// Sorts report exactly the packed cells whose content changed
    #[test]
    fn sort_affected_counts_changed_cells(grid in grid_strategy(false), kind_index in 0usize..14) {
        let sorts = kinds_of(ManipCategory::Sort);
        let kind = sorts[kind_index % sorts.len()];

        let mut target = grid.clone();
        let result = execute(&mut target, kind, RangeParam::all(grid.page_count())).unwrap();

        let changed = grid
            .records()
            .zip(target.records())
            .take(grid.occupied_count())
            .filter(|(before, after)| before != after)
            .count();
        prop_assert_eq!(result.affected, changed);
        prop_assert_eq!(result.is_noop(), target == grid);
    }

    /// Clones never survive DeleteClones
    #[test]
    fn delete_clones_leaves_unique_identities(grid in grid_strategy(false)) {
        let mut target = grid.clone();
        execute(&mut target, ManipKind::DeleteClones, RangeParam::all(grid.page_count())).unwrap();

        let mut identities: Vec<_> = target.records().filter_map(Record::identity).collect();
        let total = identities.len();
        identities.sort();
        identities.dedup();
        prop_assert_eq!(identities.len(), total);
    }

    /// A single-page invocation never touches any other page
    #[test]
    fn other_pages_untouched(
        grid in grid_strategy(false),
        kind in kind_strategy(),
        page in 0usize..4,
    ) {
        let page = page % grid.page_count();
        let mut target = grid.clone();
        execute(&mut target, kind, RangeParam::single(page)).unwrap();

        for other in (0..grid.page_count()).filter(|&p| p != page) {
            prop_assert_eq!(page_records(&target, other), page_records(&grid, other));
        }
    }
}
