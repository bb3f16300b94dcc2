//! Interference table: frequency separation → minimum reuse distance.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Tolerance applied uniformly to every distance comparison so that an
/// exact boundary distance is never misclassified by rounding.
pub const EPSILON: f64 = 1e-8;

/// Maps a numeric frequency separation to the minimum geographic distance
/// required to reuse frequencies at that separation.
///
/// Separations absent from the table carry no constraint. The table is
/// expected to be non-increasing in required distance as separation grows;
/// this is not validated, and [`min_separation_for`](Self::min_separation_for)
/// simply reports what its increasing-order scan finds.
///
/// # Examples
///
/// ```
/// use u_fap::model::InterferenceTable;
///
/// let mut table = InterferenceTable::new();
/// table.insert(0, 10.0);
/// table.insert(1, 5.0);
/// table.insert(2, 0.0);
///
/// assert_eq!(table.min_distance_for(1), 5.0);
/// assert_eq!(table.min_distance_for(7), 0.0);
/// assert_eq!(table.min_separation_for(6.0), Some(1));
/// assert_eq!(table.same_emitter_separation(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterferenceTable {
    entries: BTreeMap<u32, f64>,
}

impl InterferenceTable {
    /// Creates an empty table (no constraints).
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry. Returns the previous distance, if any.
    pub fn insert(&mut self, separation: u32, distance: f64) -> Option<f64> {
        self.entries.insert(separation, distance)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in increasing separation order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.entries.iter().map(|(&s, &d)| (s, d))
    }

    /// Required distance for an exact separation, or `0.0` if absent.
    pub fn min_distance_for(&self, separation: u32) -> f64 {
        self.entries.get(&separation).copied().unwrap_or(0.0)
    }

    /// Smallest separation whose required distance is within `distance`.
    ///
    /// Returns `None` when no entry qualifies (unbounded).
    pub fn min_separation_for(&self, distance: f64) -> Option<u32> {
        self.entries
            .iter()
            .find(|(_, &required)| required <= distance + EPSILON)
            .map(|(&s, _)| s)
    }

    /// Minimum separation between two frequencies of the same emitter.
    pub fn same_emitter_separation(&self) -> Option<u32> {
        self.min_separation_for(0.0)
    }

    /// Whether frequencies `f1` and `f2` may coexist at `distance`.
    pub fn check_separation(&self, f1: i64, f2: i64, distance: f64) -> bool {
        let separation = f1.abs_diff(f2);
        if separation > u64::from(u32::MAX) {
            return true;
        }
        distance + EPSILON >= self.min_distance_for(separation as u32)
    }

    /// Largest separation key, if any.
    pub fn max_separation(&self) -> Option<u32> {
        self.entries.keys().next_back().copied()
    }

    /// Distinct required-distance values, ascending, NaN last.
    ///
    /// A NaN entry is never satisfied by [`check_separation`](Self::check_separation),
    /// so it ranks above every finite or infinite distance.
    pub fn thresholds(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.entries.values().copied().collect();
        values.sort_by(threshold_cmp);
        values.dedup_by(|a, b| threshold_cmp(a, b) == Ordering::Equal);
        values
    }
}

/// Total order on thresholds with every NaN collapsed and placed last.
pub(crate) fn threshold_cmp(a: &f64, b: &f64) -> Ordering {
    a.is_nan()
        .cmp(&b.is_nan())
        .then_with(|| if a.is_nan() { Ordering::Equal } else { a.total_cmp(b) })
}

impl FromIterator<(u32, f64)> for InterferenceTable {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
