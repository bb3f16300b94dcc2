//! Genotype → assignment → fitness.

use super::penalty::PenaltyPolicy;
use crate::assignment::Assignment;
use crate::decoder::{DecodeScratch, Decoder};
use crate::error::{FapError, Result};
use crate::genotype::Genotype;
use crate::model::ProblemModel;

/// Direction in which fitness improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationSense {
    /// Lower is better.
    Minimization,
    /// Higher is better.
    Maximization,
}

impl OptimizationSense {
    /// Whether fitness `a` is strictly better than `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            OptimizationSense::Minimization => a < b,
            OptimizationSense::Maximization => a > b,
        }
    }
}

/// Outcome class of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStatus {
    /// Legal assignment; fitness is its span.
    Feasible { span: i64 },
    /// Demand unmet by `missing` units and/or `excess` surplus bitmap genes.
    Incomplete { missing: usize, excess: usize },
    /// Every demand met but some separation violated.
    Infeasible,
}

/// Decoded assignment together with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The (possibly incomplete) decoded assignment.
    pub assignment: Assignment,
    /// Scalar fitness, to be minimized.
    pub fitness: f64,
    /// How the fitness was obtained.
    pub status: EvaluationStatus,
}

impl Evaluation {
    /// Whether the assignment is legal.
    pub fn is_feasible(&self) -> bool {
        matches!(self.status, EvaluationStatus::Feasible { .. })
    }
}

/// Scores genotypes for an external search driver.
///
/// Holds only a shared reference to the model, a [`Decoder`] and a
/// [`PenaltyPolicy`], so one evaluator can serve any number of threads.
/// Each call either allocates its own [`DecodeScratch`] or uses the one the
/// caller passes in.
///
/// # Examples
///
/// ```
/// use u_fap::decoder::{Decoder, SweepOrder};
/// use u_fap::model::{Emitter, ProblemBuilder};
/// use u_fap::objective::{EvaluationStatus, ObjectiveEvaluator};
///
/// let model = ProblemBuilder::new()
///     .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 1))
///     .with_emitter(Emitter::new("B", 1.0, 0.0, 0.0, 1))
///     .with_interference(0, 5.0)
///     .with_interference(1, 0.0)
///     .build();
///
/// let evaluator = ObjectiveEvaluator::new(
///     &model,
///     Decoder::PriorityGreedy { sweep: SweepOrder::FrequencyMajor },
/// );
/// let eval = evaluator.evaluate(&[0.3f64, 0.7]).unwrap();
/// assert_eq!(eval.status, EvaluationStatus::Feasible { span: 1 });
/// assert_eq!(eval.fitness, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ObjectiveEvaluator<'m> {
    model: &'m ProblemModel,
    decoder: Decoder,
    penalty: PenaltyPolicy,
}

impl<'m> ObjectiveEvaluator<'m> {
    /// Fitness is minimized.
    pub const SENSE: OptimizationSense = OptimizationSense::Minimization;

    /// Creates an evaluator with the default penalty policy, raised if the
    /// decoder could produce spans above the default base penalty.
    pub fn new(model: &'m ProblemModel, decoder: Decoder) -> Self {
        let penalty = PenaltyPolicy::for_bound(decoder.frequency_bound(model));
        Self {
            model,
            decoder,
            penalty,
        }
    }

    /// Replaces the penalty policy.
    ///
    /// # Errors
    /// [`FapError::InvalidConfig`] if the base penalty does not exceed every
    /// span the decoder can produce, or the scale is negative.
    pub fn with_penalty(mut self, penalty: PenaltyPolicy) -> Result<Self> {
        penalty
            .validate(self.decoder.frequency_bound(self.model))
            .map_err(FapError::InvalidConfig)?;
        self.penalty = penalty;
        Ok(self)
    }

    /// The problem instance.
    pub fn model(&self) -> &'m ProblemModel {
        self.model
    }

    /// The configured decoder.
    pub fn decoder(&self) -> Decoder {
        self.decoder
    }

    /// The penalty policy in use.
    pub fn penalty(&self) -> PenaltyPolicy {
        self.penalty
    }

    /// Genotype length expected by [`evaluate`](Self::evaluate).
    pub fn genotype_length(&self) -> usize {
        self.decoder.genotype_length(self.model)
    }

    /// Optimization sense of the returned fitness.
    pub fn sense(&self) -> OptimizationSense {
        Self::SENSE
    }

    /// Decodes and scores `genotype`, returning the assignment as well.
    pub fn evaluate<G: Genotype + ?Sized>(&self, genotype: &G) -> Result<Evaluation> {
        let mut scratch = DecodeScratch::for_model(self.model);
        self.evaluate_with(genotype, &mut scratch)
    }

    /// [`evaluate`](Self::evaluate) using caller-owned buffers.
    pub fn evaluate_with<G: Genotype + ?Sized>(
        &self,
        genotype: &G,
        scratch: &mut DecodeScratch,
    ) -> Result<Evaluation> {
        self.decoder.decode_into(self.model, genotype, scratch)?;
        let (fitness, status) = self.score(scratch);
        Ok(Evaluation {
            assignment: scratch.to_assignment(self.model),
            fitness,
            status,
        })
    }

    /// Fitness only; skips building the id-keyed assignment.
    pub fn fitness<G: Genotype + ?Sized>(&self, genotype: &G) -> Result<f64> {
        let mut scratch = DecodeScratch::for_model(self.model);
        self.fitness_with(genotype, &mut scratch)
    }

    /// [`fitness`](Self::fitness) using caller-owned buffers.
    pub fn fitness_with<G: Genotype + ?Sized>(
        &self,
        genotype: &G,
        scratch: &mut DecodeScratch,
    ) -> Result<f64> {
        self.decoder.decode_into(self.model, genotype, scratch)?;
        Ok(self.score(scratch).0)
    }

    fn score(&self, scratch: &DecodeScratch) -> (f64, EvaluationStatus) {
        let missing = scratch.missing(self.model);
        let excess = scratch.excess();
        if missing + excess > 0 {
            return (
                self.penalty.incomplete(missing + excess),
                EvaluationStatus::Incomplete { missing, excess },
            );
        }

        let placed = scratch.placed();
        if !self.model.checker().is_feasible_dense(placed) {
            return (self.penalty.infeasible(), EvaluationStatus::Infeasible);
        }

        let span = span_of(placed);
        (span as f64, EvaluationStatus::Feasible { span })
    }
}

/// `max − min` over all placed frequencies, 0 when nothing is placed.
fn span_of(placed: &[Vec<i64>]) -> i64 {
    let mut used = placed.iter().flatten().copied();
    match used.next() {
        None => 0,
        Some(first) => {
            let (lo, hi) = used.fold((first, first), |(lo, hi), f| (lo.min(f), hi.max(f)));
            hi - lo
        }
    }
}
