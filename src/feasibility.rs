//! Separation and feasibility queries over a [`ProblemModel`].
//!
//! Every decoder and the full-assignment validation go through the same
//! [`FeasibilityChecker`], so they share one definition of a legal
//! assignment:
//!
//! 1. each emitter receives exactly `demand` frequencies;
//! 2. two frequencies of the same emitter satisfy the distance-0 entry;
//! 3. two frequencies of different emitters satisfy the entry for their
//!    separation at the emitters' mutual distance.
//!
//! Assignments are checked either keyed by id ([`Assignment`]) or in the
//! dense form used inside decoders: a slice of frequency lists aligned with
//! [`ProblemModel::emitter_ids`].

use crate::assignment::Assignment;
use crate::model::ProblemModel;
use std::fmt;

/// The first constraint found violated in an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// An emitter received the wrong number of frequencies.
    DemandMismatch {
        emitter: String,
        assigned: usize,
        demand: u32,
    },
    /// Two frequencies of one emitter are too close.
    SameEmitter { emitter: String, f1: i64, f2: i64 },
    /// Frequencies of two emitters are too close for their distance.
    Interference {
        emitter1: String,
        emitter2: String,
        f1: i64,
        f2: i64,
        distance: f64,
    },
    /// The assignment names an emitter the model does not contain.
    UnknownEmitter(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DemandMismatch {
                emitter,
                assigned,
                demand,
            } => write!(f, "emitter {emitter} has {assigned} frequencies instead of {demand}"),
            Violation::SameEmitter { emitter, f1, f2 } => {
                write!(f, "separation violated in {emitter} ({f1} and {f2})")
            }
            Violation::Interference {
                emitter1,
                emitter2,
                f1,
                f2,
                distance,
            } => write!(
                f,
                "separation violated between {emitter1} and {emitter2} ({f1} and {f2}) at distance {distance}"
            ),
            Violation::UnknownEmitter(id) => write!(f, "unknown emitter {id}"),
        }
    }
}

/// Pure feasibility queries bound to one model.
///
/// Cheap to construct and `Copy`; holds only a reference.
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityChecker<'a> {
    model: &'a ProblemModel,
}

impl<'a> FeasibilityChecker<'a> {
    /// Creates a checker for `model`.
    pub fn new(model: &'a ProblemModel) -> Self {
        Self { model }
    }

    /// Required distance for an exact separation, `0.0` if unconstrained.
    pub fn min_distance_for(&self, separation: u32) -> f64 {
        self.model.interference().min_distance_for(separation)
    }

    /// Smallest allowable separation at `distance`; `None` if unbounded.
    pub fn min_separation_for(&self, distance: f64) -> Option<u32> {
        self.model.interference().min_separation_for(distance)
    }

    /// Whether `f1` and `f2` may coexist on emitters `distance` apart.
    #[inline]
    pub fn check_separation(&self, f1: i64, f2: i64, distance: f64) -> bool {
        self.model.interference().check_separation(f1, f2, distance)
    }

    /// Whether `assignment` is legal. Fails fast; never mutates the input.
    pub fn is_feasible(&self, assignment: &Assignment) -> bool {
        self.first_violation(assignment).is_none()
    }

    /// The first violated constraint in `assignment`, if any.
    pub fn first_violation(&self, assignment: &Assignment) -> Option<Violation> {
        if let Some((id, _)) = assignment
            .iter()
            .find(|(id, _)| self.model.index_of(id).is_err())
        {
            return Some(Violation::UnknownEmitter(id.to_string()));
        }

        let placed: Vec<Vec<i64>> = self
            .model
            .emitter_ids()
            .iter()
            .map(|id| {
                assignment
                    .get(id)
                    .map(|freqs| freqs.iter().copied().collect())
                    .unwrap_or_default()
            })
            .collect();

        let violation = self.first_violation_dense(&placed);
        if let Some(ref v) = violation {
            tracing::debug!(violation = %v, "assignment infeasible");
        }
        violation
    }

    /// Dense form of [`is_feasible`](Self::is_feasible).
    ///
    /// `placed[i]` holds the distinct frequencies of emitter `i` in stable
    /// order.
    pub fn is_feasible_dense(&self, placed: &[Vec<i64>]) -> bool {
        self.first_violation_dense(placed).is_none()
    }

    /// Dense form of [`first_violation`](Self::first_violation).
    pub fn first_violation_dense(&self, placed: &[Vec<i64>]) -> Option<Violation> {
        let model = self.model;
        let ids = model.emitter_ids();

        for (i, freqs) in placed.iter().enumerate() {
            let demand = model.demands()[i];
            if freqs.len() != demand as usize {
                return Some(Violation::DemandMismatch {
                    emitter: ids[i].clone(),
                    assigned: freqs.len(),
                    demand,
                });
            }
        }

        for (i, freqs) in placed.iter().enumerate() {
            for (a, &f1) in freqs.iter().enumerate() {
                for &f2 in &freqs[a + 1..] {
                    if !self.check_separation(f1, f2, 0.0) {
                        return Some(Violation::SameEmitter {
                            emitter: ids[i].clone(),
                            f1,
                            f2,
                        });
                    }
                }
            }
        }

        // Pairs outside each other's largest-threshold neighborhood satisfy
        // every entry, so only conflict neighbors are scanned.
        for (i, freqs) in placed.iter().enumerate() {
            for &j in model.conflict_neighbors(i) {
                if j <= i {
                    continue;
                }
                let d = model.distance(i, j);
                for &f1 in freqs {
                    for &f2 in &placed[j] {
                        if !self.check_separation(f1, f2, d) {
                            return Some(Violation::Interference {
                                emitter1: ids[i].clone(),
                                emitter2: ids[j].clone(),
                                f1,
                                f2,
                                distance: d,
                            });
                        }
                    }
                }
            }
        }

        None
    }

    /// Whether frequency `f` can be added to emitter `i` in a partial
    /// dense assignment without breaking any separation.
    ///
    /// Only the emitter's own frequencies and its conflict neighbors'
    /// frequencies are examined, closest neighbors first. Demand is not
    /// considered.
    pub fn can_place(&self, placed: &[Vec<i64>], i: usize, f: i64) -> bool {
        let own = &placed[i];
        if own.contains(&f) || !own.iter().all(|&g| self.check_separation(f, g, 0.0)) {
            return false;
        }
        self.model.conflict_neighbors(i).iter().all(|&j| {
            let d = self.model.distance(i, j);
            placed[j].iter().all(|&g| self.check_separation(f, g, d))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Emitter, ProblemBuilder};
    use proptest::prelude::*;

    fn pair_at(distance: f64) -> ProblemModel {
        ProblemBuilder::new()
            .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 1))
            .with_emitter(Emitter::new("B", distance, 0.0, 0.0, 1))
            .with_interference(0, 10.0)
            .build()
    }

    #[test]
    fn test_scenario_a_boundary_distance() {
        let assignment: Assignment = [("A", vec![5]), ("B", vec![5])].into_iter().collect();

        let at_threshold = pair_at(10.0);
        assert!(at_threshold.checker().is_feasible(&assignment));

        let just_inside = pair_at(9.999_999);
        let checker = just_inside.checker();
        assert!(!checker.is_feasible(&assignment));
        assert!(matches!(
            checker.first_violation(&assignment),
            Some(Violation::Interference { f1: 5, f2: 5, .. })
        ));
    }

    fn single(demand: u32, same_emitter_sep: u32) -> ProblemModel {
        let mut builder =
            ProblemBuilder::new().with_emitter(Emitter::new("E", 0.0, 0.0, 0.0, demand));
        for s in 0..same_emitter_sep {
            builder.add_interference(s, 1.0);
        }
        builder.add_interference(same_emitter_sep, 0.0);
        builder.build()
    }

    #[test]
    fn test_scenario_b_same_emitter_gap() {
        let model = single(3, 2);
        let checker = model.checker();
        assert_eq!(checker.min_separation_for(0.0), Some(2));

        let ok: Assignment = [("E", vec![0, 2, 4])].into_iter().collect();
        assert!(checker.is_feasible(&ok));

        let bad: Assignment = [("E", vec![0, 1, 4])].into_iter().collect();
        assert_eq!(
            checker.first_violation(&bad),
            Some(Violation::SameEmitter {
                emitter: "E".into(),
                f1: 0,
                f2: 1
            })
        );
    }

    #[test]
    fn test_demand_mismatch() {
        let model = single(2, 1);
        let checker = model.checker();

        let short: Assignment = [("E", vec![0])].into_iter().collect();
        assert!(matches!(
            checker.first_violation(&short),
            Some(Violation::DemandMismatch { assigned: 1, demand: 2, .. })
        ));

        // Missing entry counts as zero frequencies.
        assert!(!checker.is_feasible(&Assignment::new()));
    }

    #[test]
    fn test_zero_demand_missing_entry_ok() {
        let model = single(0, 1);
        assert!(model.checker().is_feasible(&Assignment::new()));
    }

    #[test]
    fn test_unknown_emitter() {
        let model = single(1, 1);
        let a: Assignment = [("E", vec![0]), ("ghost", vec![3])].into_iter().collect();
        assert_eq!(
            model.checker().first_violation(&a),
            Some(Violation::UnknownEmitter("ghost".into()))
        );
    }

    #[test]
    fn test_nan_distance_never_satisfied() {
        let model = ProblemBuilder::new()
            .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 1))
            .with_emitter(Emitter::new("B", 1.0, 0.0, 0.0, 1))
            .with_interference(0, f64::NAN)
            .build();
        let checker = model.checker();
        let shared: Assignment = [("A", vec![0]), ("B", vec![0])].into_iter().collect();

        assert!(!checker.check_separation(0, 0, 1.0));
        assert!(!checker.is_feasible(&shared));
        assert!(matches!(
            checker.first_violation(&shared),
            Some(Violation::Interference { f1: 0, f2: 0, .. })
        ));
        assert!(!checker.can_place(&[vec![0], vec![]], 1, 0));
        assert!(checker.can_place(&[vec![0], vec![]], 1, 1));
    }

    #[test]
    fn test_violation_display() {
        let model = pair_at(3.0);
        let a: Assignment = [("A", vec![7]), ("B", vec![7])].into_iter().collect();
        let v = model.checker().first_violation(&a).unwrap();
        assert_eq!(
            v.to_string(),
            "separation violated between A and B (7 and 7) at distance 3"
        );
        assert_eq!(
            Violation::UnknownEmitter("X".into()).to_string(),
            "unknown emitter X"
        );
    }

    #[test]
    fn test_can_place() {
        // A and B are 4 apart; separation 0 needs 5, separation 1 needs 3.
        let model = ProblemBuilder::new()
            .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 2))
            .with_emitter(Emitter::new("B", 4.0, 0.0, 0.0, 2))
            .with_interference(0, 5.0)
            .with_interference(1, 3.0)
            .with_interference(2, 0.0)
            .build();
        let checker = model.checker();
        let placed = vec![vec![0], vec![]];

        assert!(!checker.can_place(&placed, 0, 0), "duplicate");
        assert!(!checker.can_place(&placed, 0, 1), "same-emitter gap 1");
        assert!(checker.can_place(&placed, 0, 2));
        assert!(!checker.can_place(&placed, 1, 0), "co-channel at 4 < 5");
        assert!(checker.can_place(&placed, 1, 1), "adjacent at 4 >= 3");
    }

    #[test]
    fn test_can_place_without_zero_entry_rejects_duplicates() {
        let model = ProblemBuilder::new()
            .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 2))
            .build();
        let checker = model.checker();
        assert!(!checker.can_place(&[vec![3]], 0, 3));
        assert!(checker.can_place(&[vec![3]], 0, 4));
    }

    /// Reference check over every unordered pair, by id.
    fn brute_force(model: &ProblemModel, a: &Assignment) -> bool {
        let ids = model.emitter_ids();
        let table = model.interference();
        for id in ids {
            let freqs: Vec<i64> = a.get(id).map(|s| s.iter().copied().collect()).unwrap_or_default();
            if freqs.len() != model.emitter(id).unwrap().demand as usize {
                return false;
            }
            for &f1 in &freqs {
                for &f2 in &freqs {
                    if f1 != f2 && !table.check_separation(f1, f2, 0.0) {
                        return false;
                    }
                }
            }
        }
        for x in 0..ids.len() {
            for y in (x + 1)..ids.len() {
                let d = model.distance(x, y);
                for &f1 in a.get(&ids[x]).into_iter().flatten() {
                    for &f2 in a.get(&ids[y]).into_iter().flatten() {
                        if !table.check_separation(f1, f2, d) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    fn arb_instance() -> impl Strategy<Value = (Vec<(f64, f64, Vec<i64>)>, Vec<f64>)> {
        let emitter = (0.0f64..20.0, 0.0f64..20.0, proptest::collection::btree_set(0i64..12, 0..3))
            .prop_map(|(x, y, f)| (x, y, f.into_iter().collect::<Vec<_>>()));
        (
            proptest::collection::vec(emitter, 1..6),
            proptest::collection::vec(0.0f64..15.0, 1..4),
        )
    }

    fn build(emitters: &[(f64, f64, Vec<i64>)], table: &[f64], prefix: &str) -> (ProblemModel, Assignment) {
        let mut builder = ProblemBuilder::new();
        let mut assignment = Assignment::new();
        for (k, (x, y, freqs)) in emitters.iter().enumerate() {
            let id = format!("{prefix}{k}");
            builder.add_emitter(Emitter::new(id.clone(), *x, *y, 0.0, freqs.len() as u32));
            assignment.insert(id, freqs.iter().copied());
        }
        let mut sorted = table.to_vec();
        sorted.sort_by(|a, b| b.total_cmp(a));
        for (s, d) in sorted.into_iter().enumerate() {
            builder.add_interference(s as u32, d);
        }
        (builder.build(), assignment)
    }

    proptest! {
        #[test]
        fn prop_matches_pairwise_reference((emitters, table) in arb_instance()) {
            let (model, assignment) = build(&emitters, &table, "e");
            prop_assert_eq!(model.checker().is_feasible(&assignment), brute_force(&model, &assignment));
        }

        #[test]
        fn prop_invariant_under_relabeling((emitters, table) in arb_instance()) {
            // Reversed prefixes change the stable order of ids.
            let (m1, a1) = build(&emitters, &table, "a");
            let relabeled: Vec<_> = emitters.iter().rev().cloned().collect();
            let (m2, a2) = build(&relabeled, &table, "b");
            prop_assert_eq!(m1.checker().is_feasible(&a1), m2.checker().is_feasible(&a2));
        }

        #[test]
        fn prop_feasible_span_properties((emitters, table) in arb_instance()) {
            let (model, assignment) = build(&emitters, &table, "e");
            if model.checker().is_feasible(&assignment) {
                if let Some(span) = assignment.frequency_span() {
                    prop_assert!(span >= 0);
                    prop_assert_eq!(span == 0, assignment.number_of_frequencies() == 1);
                }
            }
        }
    }
}
