//! # View Derivation
//!
//! Stateless functions over a snapshot of the collection.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  &[Equipment] ──┬──► filter(items, mode) ──► Vec<&Equipment>            │
//! │                 │                                                       │
//! │                 └──► counts(items) ──► StatusCounts ──► progress_percent│
//! │                                        {all, packed,       0..=100      │
//! │                                         unpacked}                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Progress uses round-half-up in integer arithmetic:
//! `(200 * packed + all) / (2 * all)`. 1 packed of 8 is 12.5% and shows as
//! 13; 1 of 3 is 33.33% and shows as 33.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Equipment, FilterMode};

/// Number of records per status.
///
/// `packed + unpacked == all` for every value built by [`counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusCounts {
    pub all: usize,
    pub packed: usize,
    pub unpacked: usize,
}

impl StatusCounts {
    /// Count for a given filter mode (the number shown on its button).
    pub fn for_mode(&self, mode: FilterMode) -> usize {
        match mode {
            FilterMode::All => self.all,
            FilterMode::Packed => self.packed,
            FilterMode::Unpacked => self.unpacked,
        }
    }
}

/// Returns the records matching `mode`, in their original relative order.
pub fn filter(items: &[Equipment], mode: FilterMode) -> Vec<&Equipment> {
    items.iter().filter(|item| mode.matches(item)).collect()
}

/// Counts records by packed status.
pub fn counts(items: &[Equipment]) -> StatusCounts {
    let packed = items.iter().filter(|item| item.is_packed).count();

    StatusCounts {
        all: items.len(),
        packed,
        unpacked: items.len() - packed,
    }
}

/// Percentage of packed records, rounded half-up.
///
/// Returns 0 for an empty collection.
pub fn progress_percent(counts: &StatusCounts) -> u8 {
    if counts.all == 0 {
        return 0;
    }

    let packed = counts.packed.min(counts.all) as u64;
    let all = counts.all as u64;

    ((200 * packed + all) / (2 * all)) as u8
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EquipmentDraft;

    fn item(name: &str, is_packed: bool) -> Equipment {
        Equipment::create(EquipmentDraft::new(name), "https://img.example/x.jpg")
            .unwrap()
            .with_packed(is_packed)
    }

    fn sample() -> Vec<Equipment> {
        vec![item("A", false), item("B", true), item("C", false)]
    }

    #[test]
    fn test_counts_example() {
        let counts = counts(&sample());
        assert_eq!(
            counts,
            StatusCounts {
                all: 3,
                packed: 1,
                unpacked: 2
            }
        );
        assert_eq!(progress_percent(&counts), 33);
    }

    #[test]
    fn test_filter_packed_returns_only_packed() {
        let items = sample();
        let packed = filter(&items, FilterMode::Packed);

        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0].name, "B");
    }

    #[test]
    fn test_filter_all_preserves_order() {
        let items = sample();
        let names: Vec<&str> = filter(&items, FilterMode::All)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);

        let unpacked: Vec<&str> = filter(&items, FilterMode::Unpacked)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(unpacked, ["A", "C"]);
    }

    #[test]
    fn test_filter_is_stable_across_calls() {
        let items = sample();
        assert_eq!(
            filter(&items, FilterMode::Unpacked),
            filter(&items, FilterMode::Unpacked)
        );
    }

    #[test]
    fn test_counts_partition_for_many_shapes() {
        for total in 0..20 {
            let items: Vec<Equipment> = (0..total)
                .map(|i| item(&format!("item-{i}"), i % 3 == 0))
                .collect();
            let c = counts(&items);

            assert_eq!(c.all, items.len());
            assert_eq!(c.packed + c.unpacked, c.all);
            assert_eq!(c.for_mode(FilterMode::Packed), filter(&items, FilterMode::Packed).len());

            let pct = progress_percent(&c);
            assert!(pct <= 100);
        }
    }

    #[test]
    fn test_progress_edges() {
        assert_eq!(progress_percent(&StatusCounts::default()), 0);
        assert_eq!(progress_percent(&counts(&[item("A", true), item("B", true)])), 100);
        assert_eq!(progress_percent(&counts(&[item("A", false)])), 0);
    }

    #[test]
    fn test_progress_rounds_half_up() {
        // 12.5% -> 13
        let eighth = StatusCounts {
            all: 8,
            packed: 1,
            unpacked: 7,
        };
        assert_eq!(progress_percent(&eighth), 13);

        // 0.5% -> 1
        let tiny = StatusCounts {
            all: 200,
            packed: 1,
            unpacked: 199,
        };
        assert_eq!(progress_percent(&tiny), 1);

        // 66.67% -> 67
        let two_thirds = StatusCounts {
            all: 3,
            packed: 2,
            unpacked: 1,
        };
        assert_eq!(progress_percent(&two_thirds), 67);
    }
}
