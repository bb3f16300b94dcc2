//! Frozen problem instance with precomputed caches.

use super::builder::ProblemBuilder;
use super::emitter::Emitter;
use super::interference::{threshold_cmp, InterferenceTable, EPSILON};
use crate::error::{FapError, Result};
use crate::feasibility::FeasibilityChecker;
use std::collections::HashMap;
use std::fmt;

/// Neighbor lists for one distance threshold: `lists[i]` holds the indices
/// `j != i` with `distance(i, j) <= threshold + EPSILON`, closest first.
/// A NaN threshold is never met, so its lists hold every other emitter.
#[derive(Debug, Clone)]
struct NeighborCache {
    threshold: f64,
    lists: Vec<Vec<usize>>,
}

/// An immutable Frequency Assignment Problem instance.
///
/// Built once through [`ProblemBuilder::build`] and shared read-only for a
/// whole search run. All caches are computed in the builder's finalize step;
/// nothing here mutates afterwards, so `&ProblemModel` can be handed to any
/// number of worker threads.
///
/// Emitters are addressed either by id or by their dense index in the
/// stable (lexicographically sorted) id order. The distance matrix, demand
/// array and neighbor lists are all aligned to that order.
#[derive(Debug, Clone)]
pub struct ProblemModel {
    emitters: Vec<Emitter>,
    ids: Vec<String>,
    index: HashMap<String, usize>,
    interference: InterferenceTable,
    demands: Vec<u32>,
    /// Row-major `n × n`.
    distances: Vec<f64>,
    neighbors: Vec<NeighborCache>,
    total_demand: usize,
    frequency_cap: i64,
}

impl ProblemModel {
    /// Computes every cache. Only called by [`ProblemBuilder::build`].
    pub(crate) fn finalize(mut emitters: Vec<Emitter>, interference: InterferenceTable) -> Self {
        emitters.sort_by(|a, b| a.id.cmp(&b.id));
        let n = emitters.len();

        let ids: Vec<String> = emitters.iter().map(|e| e.id.clone()).collect();
        let index: HashMap<String, usize> =
            ids.iter().enumerate().map(|(i, id)| (id.clone(), i)).collect();
        let demands: Vec<u32> = emitters.iter().map(|e| e.demand).collect();
        let total_demand: usize = demands.iter().map(|&d| d as usize).sum();

        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = emitters[i].distance(&emitters[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        let neighbors = interference
            .thresholds()
            .into_iter()
            .map(|threshold| {
                let lists = (0..n)
                    .map(|i| {
                        let row = &distances[i * n..(i + 1) * n];
                        let mut near: Vec<usize> = (0..n)
                            .filter(|&j| j != i && (threshold.is_nan() || row[j] <= threshold + EPSILON))
                            .collect();
                        near.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
                        near
                    })
                    .collect();
                NeighborCache { threshold, lists }
            })
            .collect();

        let max_sep = i64::from(interference.max_separation().unwrap_or(0));
        let frequency_cap = (total_demand as i64).saturating_mul(2 * max_sep + 1);

        let model = Self {
            emitters,
            ids,
            index,
            interference,
            demands,
            distances,
            neighbors,
            total_demand,
            frequency_cap,
        };

        tracing::debug!(
            emitters = n,
            total_demand,
            thresholds = model.neighbors.len(),
            frequency_cap,
            "finalized FAP model"
        );

        model
    }

    /// Number of emitters.
    pub fn num_emitters(&self) -> usize {
        self.emitters.len()
    }

    /// Emitter ids in stable order.
    pub fn emitter_ids(&self) -> &[String] {
        &self.ids
    }

    /// Emitters in stable order.
    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    /// Emitter at a dense index.
    ///
    /// # Panics
    /// Panics if `i >= num_emitters()`.
    pub fn emitter_at(&self, i: usize) -> &Emitter {
        &self.emitters[i]
    }

    /// Looks up an emitter by id.
    pub fn emitter(&self, id: &str) -> Result<&Emitter> {
        self.index_of(id).map(|i| &self.emitters[i])
    }

    /// Dense index of an emitter id.
    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| FapError::NotFound(id.to_string()))
    }

    /// Demand per emitter, aligned with [`emitter_ids`](Self::emitter_ids).
    pub fn demands(&self) -> &[u32] {
        &self.demands
    }

    /// Sum of all demands. Also the number of frequencies needed if
    /// nothing could be reused.
    pub fn total_demand(&self) -> usize {
        self.total_demand
    }

    /// The interference table.
    pub fn interference(&self) -> &InterferenceTable {
        &self.interference
    }

    /// Distance between emitters at dense indices `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.emitters.len() + j]
    }

    /// Distance between two emitters by id.
    pub fn distance_between(&self, id1: &str, id2: &str) -> Result<f64> {
        Ok(self.distance(self.index_of(id1)?, self.index_of(id2)?))
    }

    /// Distinct threshold values for which neighbor lists exist, ascending.
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.neighbors.iter().map(|c| c.threshold)
    }

    /// Neighbor lists for an exact threshold value from the table.
    ///
    /// `result[i]` lists the emitters within `threshold` of `i`, closest first.
    pub fn neighbors_within(&self, threshold: f64) -> Option<&[Vec<usize>]> {
        self.neighbors
            .binary_search_by(|c| threshold_cmp(&c.threshold, &threshold))
            .ok()
            .map(|k| self.neighbors[k].lists.as_slice())
    }

    /// Emitters close enough to `i` that some separation could conflict,
    /// closest first.
    ///
    /// These are the neighbors within the largest threshold. Any emitter
    /// further away satisfies every table entry at any separation.
    pub fn conflict_neighbors(&self, i: usize) -> &[usize] {
        match self.neighbors.last() {
            Some(cache) => &cache.lists[i],
            None => &[],
        }
    }

    /// Upper bound on the frequency values a greedy decoder needs to try.
    ///
    /// `total_demand × (2K + 1)` with `K` the largest separation in the
    /// table: every placed frequency blocks at most `2K + 1` values, so a
    /// free value always exists below the cap.
    pub fn frequency_cap(&self) -> i64 {
        self.frequency_cap
    }

    /// A feasibility checker bound to this model.
    pub fn checker(&self) -> FeasibilityChecker<'_> {
        FeasibilityChecker::new(self)
    }

    /// Returns a builder seeded with this model's data.
    ///
    /// Edits go through the builder and produce a new frozen model.
    pub fn to_builder(&self) -> ProblemBuilder {
        let mut builder = ProblemBuilder::new();
        for e in &self.emitters {
            builder.add_emitter(e.clone());
        }
        for (s, d) in self.interference.iter() {
            builder.add_interference(s, d);
        }
        builder
    }
}

impl fmt::Display for ProblemModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Emitters:")?;
        for e in &self.emitters {
            writeln!(f, "\t{e}")?;
        }
        writeln!(f, "Interferences:")?;
        for (s, d) in self.interference.iter() {
            writeln!(f, "\t{s} -> {d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line_model() -> ProblemModel {
        ProblemBuilder::new()
            .with_emitter(Emitter::new("C", 3.0, 0.0, 0.0, 1))
            .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 2))
            .with_emitter(Emitter::new("B", 1.0, 0.0, 0.0, 3))
            .with_emitter(Emitter::new("D", 10.0, 0.0, 0.0, 0))
            .with_interference(0, 2.0)
            .with_interference(1, 1.0)
            .with_interference(2, 0.0)
            .build()
    }

    #[test]
    fn test_stable_order_and_demands() {
        let model = line_model();
        assert_eq!(model.emitter_ids(), &["A", "B", "C", "D"]);
        assert_eq!(model.demands(), &[2, 3, 1, 0]);
        assert_eq!(model.total_demand(), 6);
        assert_eq!(model.index_of("C").unwrap(), 2);
    }

    #[test]
    fn test_emitter_at_follows_stable_order() {
        let model = line_model();
        assert_eq!(model.emitter_at(0).id, "A");
        assert_eq!(model.emitter_at(2).x, 3.0);
        assert_eq!(model.emitter_at(3).demand, 0);
    }

    #[test]
    fn test_unknown_id() {
        let model = line_model();
        assert!(matches!(model.index_of("Z"), Err(FapError::NotFound(id)) if id == "Z"));
        assert!(model.emitter("Z").is_err());
        assert!(model.distance_between("A", "Z").is_err());
    }

    #[test]
    fn test_distance_matrix() {
        let model = line_model();
        assert_eq!(model.distance(0, 0), 0.0);
        assert_eq!(model.distance(0, 2), 3.0);
        assert_eq!(model.distance(2, 0), 3.0);
        assert_eq!(model.distance_between("B", "D").unwrap(), 9.0);
    }

    #[test]
    fn test_neighbor_lists_sorted_by_distance() {
        let model = line_model();
        assert_eq!(model.thresholds().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);

        let within_two = model.neighbors_within(2.0).unwrap();
        // From C (x=3): B at 2, A at 3 (excluded).
        assert_eq!(within_two[2], vec![1]);
        // From B (x=1): A at 1, C at 2.
        assert_eq!(within_two[1], vec![0, 2]);

        let within_zero = model.neighbors_within(0.0).unwrap();
        assert!(within_zero.iter().all(|l| l.is_empty()));

        assert!(model.neighbors_within(5.0).is_none());
        assert_eq!(model.conflict_neighbors(1), &[0, 2]);
        assert!(model.conflict_neighbors(3).is_empty());
    }

    #[test]
    fn test_neighbor_epsilon_tolerance() {
        let model = ProblemBuilder::new()
            .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 1))
            .with_emitter(Emitter::new("B", 5.0 + 5e-9, 0.0, 0.0, 1))
            .with_interference(0, 5.0)
            .build();
        assert_eq!(model.neighbors_within(5.0).unwrap()[0], vec![1]);
    }

    #[test]
    fn test_nan_threshold_neighbors_everyone() {
        let model = line_model()
            .to_builder()
            .with_interference(3, f64::NAN)
            .build();
        assert!(model.thresholds().last().is_some_and(f64::is_nan));
        assert_eq!(model.neighbors_within(f64::NAN).unwrap()[3], vec![2, 1, 0]);
        assert_eq!(model.conflict_neighbors(3), &[2, 1, 0]);
        assert_eq!(model.neighbors_within(2.0).unwrap()[1], vec![0, 2]);
    }

    #[test]
    fn test_frequency_cap() {
        let model = line_model();
        // total demand 6, largest separation 2 -> 6 * 5
        assert_eq!(model.frequency_cap(), 30);

        let unconstrained = ProblemBuilder::new()
            .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 4))
            .build();
        assert_eq!(unconstrained.frequency_cap(), 4);
        assert!(unconstrained.conflict_neighbors(0).is_empty());
    }

    #[test]
    fn test_to_builder_rebuilds_caches() {
        let model = line_model();
        let extended = model
            .to_builder()
            .with_emitter(Emitter::new("E", 0.5, 0.0, 0.0, 1))
            .build();
        assert_eq!(model.num_emitters(), 4);
        assert_eq!(extended.num_emitters(), 5);
        assert_eq!(extended.total_demand(), 7);
        // E (index 4) sits between A and B.
        assert_eq!(extended.conflict_neighbors(4), &[0, 1]);
    }

    #[test]
    fn test_display() {
        let model = ProblemBuilder::new()
            .with_emitter(Emitter::new("A", 0.0, 1.0, 2.0, 1))
            .with_interference(0, 3.5)
            .build();
        assert_eq!(
            model.to_string(),
            "Emitters:\n\tA(0, 1, 2): 1\nInterferences:\n\t0 -> 3.5\n"
        );
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric_zero_diagonal(
            coords in proptest::collection::vec((-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0), 1..12)
        ) {
            let mut builder = ProblemBuilder::new();
            for (k, (x, y, z)) in coords.iter().enumerate() {
                builder.add_emitter(Emitter::new(format!("e{k}"), *x, *y, *z, 1));
            }
            let model = builder.build();
            let n = model.num_emitters();
            for i in 0..n {
                prop_assert_eq!(model.distance(i, i), 0.0);
                for j in 0..n {
                    prop_assert_eq!(model.distance(i, j), model.distance(j, i));
                }
            }
        }
    }
}
