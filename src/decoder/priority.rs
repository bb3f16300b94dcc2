//! Priority-driven greedy placement over emitters.
//!
//! Genes rank the emitters (see [`priority_order`]). Placement is greedy
//! and irrevocable, bounded by [`ProblemModel::frequency_cap`].

use super::scratch::DecodeScratch;
use crate::genotype::{priority_order, Genotype};
use crate::model::ProblemModel;

/// First available emitter.
///
/// Candidate frequencies are swept upward from 0. Each one is offered to
/// every emitter in priority order, and every emitter that still has demand
/// and can take it without a conflict receives it.
pub(super) fn decode_frequency_major<G: Genotype + ?Sized>(
    model: &ProblemModel,
    genotype: &G,
    scratch: &mut DecodeScratch,
) {
    let DecodeScratch { placed, order, .. } = scratch;
    priority_order(genotype, order);

    let checker = model.checker();
    let demands = model.demands();
    let cap = model.frequency_cap();
    let mut remaining = model.total_demand();

    let mut f = 0;
    while remaining > 0 && f < cap {
        for &e in order.iter() {
            if placed[e].len() < demands[e] as usize && checker.can_place(placed, e, f) {
                placed[e].push(f);
                remaining -= 1;
            }
        }
        f += 1;
    }
}

/// First available frequency.
///
/// Emitters are served in priority order; each takes the lowest frequencies
/// that fit until its demand is met or the cap is reached.
pub(super) fn decode_emitter_major<G: Genotype + ?Sized>(
    model: &ProblemModel,
    genotype: &G,
    scratch: &mut DecodeScratch,
) {
    let DecodeScratch { placed, order, .. } = scratch;
    priority_order(genotype, order);

    let checker = model.checker();
    let cap = model.frequency_cap();

    for &e in order.iter() {
        let need = model.demands()[e] as usize;
        let mut f = 0;
        while placed[e].len() < need && f < cap {
            if checker.can_place(placed, e, f) {
                placed[e].push(f);
            }
            f += 1;
        }
    }
}
