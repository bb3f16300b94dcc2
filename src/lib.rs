//! Frequency Assignment Problem (FAP) core for evolutionary search.
//!
//! Emitters at fixed 3D positions each need a number of distinct integer
//! frequencies. Two frequencies may be reused only if the emitters are far
//! enough apart for the numeric separation between them, as given by an
//! interference table. The goal is a legal assignment with minimum span.
//!
//! The crate turns an opaque candidate encoding into an assignment and a
//! scalar fitness:
//!
//! - **Model** ([`model`]): emitters, interference table, and a frozen
//!   [`ProblemModel`] with precomputed distance and neighbor caches. Built
//!   with [`ProblemBuilder`] or parsed from the problem-definition format.
//! - **Feasibility** ([`feasibility`]): separation queries, full
//!   validation with violation diagnostics, incremental placement checks.
//! - **Decoders** ([`decoder`]): bitmap, priority-greedy (two sweep
//!   orders) and permutation-slot decoding of any [`Genotype`].
//! - **Objective** ([`objective`]): decoder + feasibility + penalty policy,
//!   yielding a minimization fitness. Safe to call from many threads.
//!
//! # Example
//!
//! ```
//! use u_fap::decoder::{DecodeScratch, Decoder};
//! use u_fap::objective::ObjectiveEvaluator;
//!
//! let model: u_fap::ProblemModel = "
//!     3
//!     A 0 0 0 2
//!     B 1 0 0 1
//!     C 2 0 0 1
//!     0 3.0
//!     1 1.5
//!     2 0.0
//! ".parse().unwrap();
//!
//! let evaluator = ObjectiveEvaluator::new(&model, Decoder::PermutationSlot);
//! let mut scratch = DecodeScratch::for_model(&model);
//! let fitness = evaluator
//!     .fitness_with(&[0.4f64, 0.1, 0.9, 0.3], &mut scratch)
//!     .unwrap();
//! assert!(fitness >= 0.0);
//! ```

pub mod assignment;
pub mod decoder;
pub mod error;
pub mod feasibility;
pub mod genotype;
pub mod model;
pub mod objective;

pub use assignment::Assignment;
pub use error::{FapError, Result};
pub use feasibility::{FeasibilityChecker, Violation};
pub use genotype::{Allele, Genotype};
pub use model::{Emitter, ProblemBuilder, ProblemModel};
