//! Accumulates emitters and interference entries into a frozen model.

use super::emitter::Emitter;
use super::interference::InterferenceTable;
use super::problem::ProblemModel;

/// Builder for [`ProblemModel`].
///
/// Emitters and interference entries may be added in any order. Adding an
/// emitter whose id already exists, or a separation already in the table,
/// replaces the earlier value. [`build`](Self::build) computes every cache
/// exactly once and returns a model that can no longer be modified.
///
/// # Examples
///
/// ```
/// use u_fap::model::{Emitter, ProblemBuilder};
///
/// let model = ProblemBuilder::new()
///     .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 1))
///     .with_emitter(Emitter::new("B", 10.0, 0.0, 0.0, 1))
///     .with_interference(0, 10.0)
///     .build();
///
/// assert_eq!(model.num_emitters(), 2);
/// assert_eq!(model.distance(0, 1), 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    emitters: Vec<Emitter>,
    interference: InterferenceTable,
}

impl ProblemBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an emitter, replacing any emitter with the same id.
    pub fn add_emitter(&mut self, emitter: Emitter) {
        if let Some(existing) = self.emitters.iter_mut().find(|e| e.id == emitter.id) {
            tracing::warn!(id = %emitter.id, "replacing duplicate emitter");
            *existing = emitter;
        } else {
            self.emitters.push(emitter);
        }
    }

    /// Adds an interference entry, replacing any entry for the same separation.
    pub fn add_interference(&mut self, separation: u32, distance: f64) {
        if let Some(previous) = self.interference.insert(separation, distance) {
            tracing::warn!(separation, previous, distance, "replacing interference entry");
        }
    }

    /// Chainable form of [`add_emitter`](Self::add_emitter).
    pub fn with_emitter(mut self, emitter: Emitter) -> Self {
        self.add_emitter(emitter);
        self
    }

    /// Chainable form of [`add_interference`](Self::add_interference).
    pub fn with_interference(mut self, separation: u32, distance: f64) -> Self {
        self.add_interference(separation, distance);
        self
    }

    /// Number of emitters added so far.
    pub fn num_emitters(&self) -> usize {
        self.emitters.len()
    }

    /// Freezes the builder into a [`ProblemModel`].
    pub fn build(self) -> ProblemModel {
        ProblemModel::finalize(self.emitters, self.interference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_emitter_replaced() {
        let model = ProblemBuilder::new()
            .with_emitter(Emitter::new("A", 0.0, 0.0, 0.0, 1))
            .with_emitter(Emitter::new("A", 5.0, 0.0, 0.0, 4))
            .build();
        assert_eq!(model.num_emitters(), 1);
        assert_eq!(model.emitter("A").unwrap().demand, 4);
        assert_eq!(model.emitter("A").unwrap().x, 5.0);
    }

    #[test]
    fn test_duplicate_separation_replaced() {
        let model = ProblemBuilder::new()
            .with_interference(1, 4.0)
            .with_interference(1, 2.5)
            .build();
        assert_eq!(model.interference().len(), 1);
        assert_eq!(model.interference().min_distance_for(1), 2.5);
    }

    #[test]
    fn test_empty_build() {
        let model = ProblemBuilder::new().build();
        assert_eq!(model.num_emitters(), 0);
        assert_eq!(model.total_demand(), 0);
        assert_eq!(model.frequency_cap(), 0);
    }
}
