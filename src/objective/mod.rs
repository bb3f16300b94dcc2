//! Objective function for frequency assignment search.
//!
//! An [`ObjectiveEvaluator`] is the only thing a search driver needs to see:
//! it takes a genotype, decodes it with the configured
//! [`Decoder`](crate::decoder::Decoder), and returns a scalar fitness to be
//! minimized.
//!
//! - legal assignment: the frequency span (`max − min`, 0 if unused)
//! - incomplete assignment: a large penalty plus a term proportional to the
//!   unmet and surplus demand
//! - complete but infeasible assignment: the large penalty alone
//!
//! See [`PenaltyPolicy`] for the exact values.
//!
//! # References
//!
//! - Coello Coello (2002), "Theoretical and numerical constraint-handling
//!   techniques used with evolutionary algorithms: a survey of the state of
//!   the art"

mod evaluator;
mod penalty;

pub use evaluator::{Evaluation, EvaluationStatus, ObjectiveEvaluator, OptimizationSense};
pub use penalty::PenaltyPolicy;
