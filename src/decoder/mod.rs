//! Genotype decoders.
//!
//! A [`Decoder`] turns an opaque [`Genotype`] into a frequency assignment.
//! The set of strategies is closed:
//!
//! - [`Decoder::Bitmap`]: one gene per (emitter, frequency) pair
//! - [`Decoder::PriorityGreedy`]: a priority order over emitters, placed
//!   greedily in one of two [`SweepOrder`]s
//! - [`Decoder::PermutationSlot`]: a priority order over `total_demand`
//!   candidate frequencies
//!
//! Decoding is deterministic and pure apart from the caller-owned
//! [`DecodeScratch`]. It never overfills an emitter. Running out of
//! candidates is not an error: the result is simply incomplete and the
//! evaluator penalizes the missing demand.
//!
//! # References
//!
//! - Bean (1994), "Genetic algorithms and random keys for sequencing and optimization"
//! - Aardal et al. (2007), "Models and solution techniques for frequency
//!   assignment problems", *Annals of Operations Research* 153, 79–129

mod bitmap;
mod permutation;
mod priority;
mod scratch;

pub use scratch::DecodeScratch;

use crate::assignment::Assignment;
use crate::error::{FapError, Result};
use crate::genotype::Genotype;
use crate::model::ProblemModel;

/// Visiting order of the priority-greedy decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepOrder {
    /// First available emitter: for each frequency `f = 0, 1, ...`, offer
    /// `f` to every emitter in priority order.
    FrequencyMajor,

    /// First available frequency: for each emitter in priority order, take
    /// the lowest frequencies that fit until its demand is met.
    EmitterMajor,
}

/// Strategy for decoding a genotype into an assignment.
///
/// # Examples
///
/// ```
/// use u_fap::decoder::{Decoder, SweepOrder};
/// use u_fap::model::{Emitter, ProblemBuilder};
///
/// let model = ProblemBuilder::new()
///     .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 1))
///     .with_emitter(Emitter::new("B", 1.0, 0.0, 0.0, 1))
///     .with_interference(0, 5.0)
///     .with_interference(1, 0.0)
///     .build();
///
/// let decoder = Decoder::PriorityGreedy { sweep: SweepOrder::EmitterMajor };
/// assert_eq!(decoder.genotype_length(&model), 2);
///
/// // B first, then A.
/// let assignment = decoder.decode(&model, &[1usize, 0]).unwrap();
/// assert_eq!(assignment.to_string(), "A: 1\nB: 0\n");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decoder {
    /// Gene `e * domain_size + f` is set iff emitter `e` uses frequency `f`.
    Bitmap {
        /// Number of candidate frequencies `0..domain_size` per emitter.
        domain_size: usize,
    },

    /// Genes rank the emitters; frequencies are placed greedily.
    PriorityGreedy {
        /// Visiting order.
        sweep: SweepOrder,
    },

    /// Genes rank the frequencies `0..total_demand`; emitters in stable
    /// order take the highest-ranked frequencies that fit.
    PermutationSlot,
}

impl Decoder {
    /// Bitmap decoder whose domain covers `0..model.frequency_cap()`.
    pub fn bitmap_for(model: &ProblemModel) -> Self {
        Decoder::Bitmap {
            domain_size: usize::try_from(model.frequency_cap()).unwrap_or(0),
        }
    }

    /// Short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Decoder::Bitmap { .. } => "bitmap",
            Decoder::PriorityGreedy {
                sweep: SweepOrder::FrequencyMajor,
            } => "priority-frequency-major",
            Decoder::PriorityGreedy {
                sweep: SweepOrder::EmitterMajor,
            } => "priority-emitter-major",
            Decoder::PermutationSlot => "permutation-slot",
        }
    }

    /// Genotype length this decoder expects for `model`.
    pub fn genotype_length(&self, model: &ProblemModel) -> usize {
        match self {
            Decoder::Bitmap { domain_size } => model.num_emitters() * domain_size,
            Decoder::PriorityGreedy { .. } => model.num_emitters(),
            Decoder::PermutationSlot => model.total_demand(),
        }
    }

    /// Exclusive upper bound on the frequency values this decoder emits.
    ///
    /// Any decoded span is strictly below it.
    pub fn frequency_bound(&self, model: &ProblemModel) -> i64 {
        match self {
            Decoder::Bitmap { domain_size } => i64::try_from(*domain_size).unwrap_or(i64::MAX),
            Decoder::PriorityGreedy { .. } => model.frequency_cap(),
            Decoder::PermutationSlot => model.total_demand() as i64,
        }
    }

    /// Decodes `genotype` into a fresh [`Assignment`].
    ///
    /// # Errors
    /// [`FapError::InvalidGenotype`] if the genotype length does not match
    /// [`genotype_length`](Self::genotype_length).
    pub fn decode<G: Genotype + ?Sized>(
        &self,
        model: &ProblemModel,
        genotype: &G,
    ) -> Result<Assignment> {
        let mut scratch = DecodeScratch::for_model(model);
        self.decode_into(model, genotype, &mut scratch)?;
        Ok(scratch.to_assignment(model))
    }

    /// Decodes `genotype` into the dense buffers of `scratch`.
    ///
    /// The scratch is reset first; on return
    /// [`placed`](DecodeScratch::placed) holds the (possibly incomplete)
    /// assignment and [`excess`](DecodeScratch::excess) the ignored
    /// bitmap genes.
    pub fn decode_into<G: Genotype + ?Sized>(
        &self,
        model: &ProblemModel,
        genotype: &G,
        scratch: &mut DecodeScratch,
    ) -> Result<()> {
        let expected = self.genotype_length(model);
        if genotype.len() != expected {
            return Err(FapError::InvalidGenotype {
                expected,
                actual: genotype.len(),
            });
        }

        scratch.reset(model);
        match *self {
            Decoder::Bitmap { domain_size } => {
                bitmap::decode(model, genotype, domain_size, scratch)
            }
            Decoder::PriorityGreedy {
                sweep: SweepOrder::FrequencyMajor,
            } => priority::decode_frequency_major(model, genotype, scratch),
            Decoder::PriorityGreedy {
                sweep: SweepOrder::EmitterMajor,
            } => priority::decode_emitter_major(model, genotype, scratch),
            Decoder::PermutationSlot => permutation::decode(model, genotype, scratch),
        }
        Ok(())
    }
}
