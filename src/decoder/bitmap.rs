//! Direct 0/1 matrix decoding.

use super::scratch::DecodeScratch;
use crate::genotype::{Allele, Genotype};
use crate::model::ProblemModel;

/// Row `e` of the bitmap (genes `e * domain .. (e + 1) * domain`) lists the
/// frequencies of emitter `e`. The first `demand` set genes win, lowest
/// frequency first; later set genes are only counted in `scratch.excess`.
///
/// No separation is checked here. Legality is left to the evaluator.
pub(super) fn decode<G: Genotype + ?Sized>(
    model: &ProblemModel,
    genotype: &G,
    domain: usize,
    scratch: &mut DecodeScratch,
) {
    for (e, &demand) in model.demands().iter().enumerate() {
        let base = e * domain;
        let freqs = &mut scratch.placed[e];
        for f in 0..domain {
            if !genotype.gene(base + f).is_set() {
                continue;
            }
            if freqs.len() < demand as usize {
                freqs.push(f as i64);
            } else {
                scratch.excess += 1;
            }
        }
    }
}
