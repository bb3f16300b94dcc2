//! Per-call decode buffers.

use crate::assignment::Assignment;
use crate::model::ProblemModel;

/// Mutable buffers a decoder fills for one genotype.
///
/// A scratch is owned by whoever calls the decoder (typically one per
/// worker thread) and is reset at the start of every decode, so it can be
/// reused across calls on the same thread without leaking state between
/// candidates. It is never shared between concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct DecodeScratch {
    pub(crate) placed: Vec<Vec<i64>>,
    pub(crate) order: Vec<usize>,
    pub(crate) excess: usize,
}

impl DecodeScratch {
    /// Creates an empty scratch; buffers grow on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scratch pre-sized for `model`.
    pub fn for_model(model: &ProblemModel) -> Self {
        Self {
            placed: model
                .demands()
                .iter()
                .map(|&d| Vec::with_capacity(d as usize))
                .collect(),
            order: Vec::with_capacity(model.num_emitters().max(model.total_demand())),
            excess: 0,
        }
    }

    pub(crate) fn reset(&mut self, model: &ProblemModel) {
        let n = model.num_emitters();
        self.placed.truncate(n);
        for freqs in &mut self.placed {
            freqs.clear();
        }
        self.placed.resize_with(n, Vec::new);
        self.order.clear();
        self.excess = 0;
    }

    /// Frequencies placed per emitter, aligned with the model's stable order,
    /// in placement order.
    pub fn placed(&self) -> &[Vec<i64>] {
        &self.placed
    }

    /// Set bitmap genes ignored because their emitter's demand was already met.
    ///
    /// Always zero for the priority-based decoders.
    pub fn excess(&self) -> usize {
        self.excess
    }

    /// Total demand left unmet by the last decode.
    pub fn missing(&self, model: &ProblemModel) -> usize {
        self.placed
            .iter()
            .zip(model.demands())
            .map(|(freqs, &d)| (d as usize).saturating_sub(freqs.len()))
            .sum()
    }

    /// Converts the last decode into an id-keyed [`Assignment`].
    pub fn to_assignment(&self, model: &ProblemModel) -> Assignment {
        model
            .emitter_ids()
            .iter()
            .zip(&self.placed)
            .map(|(id, freqs)| (id.as_str(), freqs.iter().copied()))
            .collect()
    }
}
