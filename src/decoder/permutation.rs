//! Permutation-driven slot assignment.

use super::scratch::DecodeScratch;
use crate::genotype::{priority_order, Genotype};
use crate::model::ProblemModel;

/// Genes rank the universe of `total_demand` slots; slot `k` stands for
/// frequency `k`. Emitters are served in stable order, each scanning the
/// ranked slots and keeping every frequency that fits until its demand is
/// met. An emitter still short after the whole ranking stays incomplete.
pub(super) fn decode<G: Genotype + ?Sized>(
    model: &ProblemModel,
    genotype: &G,
    scratch: &mut DecodeScratch,
) {
    let DecodeScratch { placed, order, .. } = scratch;
    priority_order(genotype, order);

    let checker = model.checker();
    for (e, &demand) in model.demands().iter().enumerate() {
        let need = demand as usize;
        for &slot in order.iter() {
            if placed[e].len() >= need {
                break;
            }
            let f = slot as i64;
            if checker.can_place(placed, e, f) {
                placed[e].push(f);
            }
        }
    }
}
