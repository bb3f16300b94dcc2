//! Problem model: emitters, interference table, and the frozen instance.
//!
//! # Key Types
//!
//! - [`Emitter`]: a transmitter with a 3D position and a demand
//! - [`InterferenceTable`]: separation → minimum reuse distance
//! - [`ProblemBuilder`]: accumulates data, finalizes once
//! - [`ProblemModel`]: immutable instance with distance matrix, demand
//!   array and per-threshold neighbor lists
//!
//! Problem files are read with [`parse_problem`] / [`load_problem`].

mod builder;
mod emitter;
mod interference;
mod parser;
mod problem;

pub use builder::ProblemBuilder;
pub use emitter::Emitter;
pub use interference::{InterferenceTable, EPSILON};
pub use parser::{load_problem, parse_problem};
pub use problem::ProblemModel;
