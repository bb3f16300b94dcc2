//! Frequency assignments: emitter id → set of frequencies.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A mapping from emitter id to its set of assigned frequencies.
///
/// Ids and frequencies are kept ordered, so iteration and
/// [`Display`](fmt::Display) output are deterministic.
///
/// # Examples
///
/// ```
/// use u_fap::Assignment;
///
/// let mut a = Assignment::new();
/// a.insert("B", [3, 7]);
/// a.insert("A", [5]);
///
/// assert_eq!(a.frequency_span(), Some(4));
/// assert_eq!(a.to_string(), "A: 5\nB: 3 7\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    frequencies: BTreeMap<String, BTreeSet<i64>>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frequencies of an emitter, replacing any previous set.
    pub fn insert(&mut self, id: impl Into<String>, freqs: impl IntoIterator<Item = i64>) {
        self.frequencies.insert(id.into(), freqs.into_iter().collect());
    }

    /// Adds one frequency to an emitter. Returns `false` if already present.
    pub fn add(&mut self, id: &str, frequency: i64) -> bool {
        self.frequencies
            .entry(id.to_string())
            .or_default()
            .insert(frequency)
    }

    /// Frequencies of an emitter, if it has an entry.
    pub fn get(&self, id: &str) -> Option<&BTreeSet<i64>> {
        self.frequencies.get(id)
    }

    /// Number of frequencies assigned to an emitter (0 if absent).
    pub fn count(&self, id: &str) -> usize {
        self.frequencies.get(id).map_or(0, BTreeSet::len)
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<i64>)> {
        self.frequencies.iter().map(|(id, f)| (id.as_str(), f))
    }

    /// Number of emitter entries.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether there are no emitter entries.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Total number of frequencies over all emitters.
    pub fn total_assigned(&self) -> usize {
        self.frequencies.values().map(BTreeSet::len).sum()
    }

    /// `max − min` over every frequency used; `None` if nothing is assigned.
    pub fn frequency_span(&self) -> Option<i64> {
        let mut used = self.frequencies.values().flatten();
        let first = *used.next()?;
        let (lo, hi) = used.fold((first, first), |(lo, hi), &f| (lo.min(f), hi.max(f)));
        Some(hi - lo)
    }

    /// Number of distinct frequency values used.
    pub fn number_of_frequencies(&self) -> usize {
        self.frequencies
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl<S: Into<String>, F: IntoIterator<Item = i64>> FromIterator<(S, F)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, F)>>(iter: I) -> Self {
        let mut a = Assignment::new();
        for (id, freqs) in iter {
            a.insert(id, freqs);
        }
        a
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, freqs) in &self.frequencies {
            write!(f, "{id}:")?;
            for freq in freqs {
                write!(f, " {freq}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
