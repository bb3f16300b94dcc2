//! Opaque candidate encodings supplied by a search driver.
//!
//! The core reads a genotype only through indexed access. What a gene
//! means is up to each decoder:
//!
//! - bitmap decoding asks whether a gene [is set](Allele::is_set);
//! - priority decoding sorts positions by each gene's
//!   [sort key](Allele::sort_key).
//!
//! [`Allele`] is implemented for the primitive types drivers commonly use:
//! `bool`, the integer types (permutations, bit strings) and `f32`/`f64`
//! (random keys in `[0, 1)`).

/// A single gene value.
pub trait Allele: Copy {
    /// Numeric key used to derive a priority order.
    fn sort_key(self) -> f64;

    /// Truth value used by bitmap encodings.
    ///
    /// Integers are set when non-zero; floating-point random keys are set
    /// when above `0.5`.
    fn is_set(self) -> bool;
}

impl Allele for bool {
    fn sort_key(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    fn is_set(self) -> bool {
        self
    }
}

macro_rules! impl_int_allele {
    ($($t:ty),*) => {
        $(
            impl Allele for $t {
                fn sort_key(self) -> f64 {
                    self as f64
                }

                fn is_set(self) -> bool {
                    self != 0
                }
            }
        )*
    };
}

impl_int_allele!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Allele for f64 {
    fn sort_key(self) -> f64 {
        self
    }

    fn is_set(self) -> bool {
        self > 0.5
    }
}

impl Allele for f32 {
    fn sort_key(self) -> f64 {
        f64::from(self)
    }

    fn is_set(self) -> bool {
        self > 0.5
    }
}

/// An indexable sequence of genes with a fixed length.
pub trait Genotype {
    /// Gene type.
    type Allele: Allele;

    /// Number of genes.
    fn len(&self) -> usize;

    /// Gene at position `i`.
    ///
    /// # Panics
    /// May panic if `i >= len()`.
    fn gene(&self, i: usize) -> Self::Allele;

    /// Whether the genotype has no genes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: Allele> Genotype for [A] {
    type Allele = A;

    fn len(&self) -> usize {
        <[A]>::len(self)
    }

    fn gene(&self, i: usize) -> A {
        self[i]
    }
}

impl<A: Allele> Genotype for Vec<A> {
    type Allele = A;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn gene(&self, i: usize) -> A {
        self[i]
    }
}

impl<A: Allele, const N: usize> Genotype for [A; N] {
    type Allele = A;

    fn len(&self) -> usize {
        N
    }

    fn gene(&self, i: usize) -> A {
        self[i]
    }
}

/// Writes into `order` the positions of `genotype` sorted by ascending
/// gene key, ties broken by position.
///
/// For a permutation genotype this yields the inverse permutation; for
/// random keys it is the usual random-key decoding. `NaN` keys sort after
/// every number.
pub fn priority_order<G: Genotype + ?Sized>(genotype: &G, order: &mut Vec<usize>) {
    let n = genotype.len();
    order.clear();
    order.extend(0..n);
    order.sort_by(|&a, &b| {
        let ka = genotype.gene(a).sort_key();
        let kb = genotype.gene(b).sort_key();
        nan_last(ka, kb).then(a.cmp(&b))
    });
}

fn nan_last(a: f64, b: f64) -> std::cmp::Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_of<G: Genotype + ?Sized>(g: &G) -> Vec<usize> {
        let mut order = Vec::new();
        priority_order(g, &mut order);
        order
    }

    #[test]
    fn test_random_keys() {
        assert_eq!(order_of(&[0.7f64, 0.1, 0.4]), vec![1, 2, 0]);
    }

    #[test]
    fn test_permutation_gives_inverse() {
        // Gene i is the rank of position i.
        assert_eq!(order_of(&vec![2usize, 0, 1]), vec![1, 2, 0]);
    }

    #[test]
    fn test_stable_ties() {
        assert_eq!(order_of(&[3i32, 1, 3, 1]), vec![1, 3, 0, 2]);
        assert_eq!(order_of(&[true, false, true]), vec![1, 0, 2]);
    }

    #[test]
    fn test_nan_last() {
        assert_eq!(order_of(&[f64::NAN, 0.5, f64::NAN, 0.1]), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_negative_zero_sorts_before_zero() {
        // -0.0 sorts before 0.0 under total ordering; both precede positives.
        assert_eq!(order_of(&[0.2f64, 0.0, -0.0]), vec![2, 1, 0]);
    }

    #[test]
    fn test_is_set() {
        assert!(1u8.is_set());
        assert!(!0i64.is_set());
        assert!(0.75f64.is_set());
        assert!(!0.5f64.is_set());
        assert!(0.9f32.is_set());
        assert!(!false.is_set());
    }

    #[test]
    fn test_slice_and_array_impls() {
        let v = vec![1u8, 0, 1];
        let s: &[u8] = &v;
        assert_eq!(Genotype::len(s), 3);
        assert_eq!([0.1f64; 4].len(), 4);
        assert!(Genotype::is_empty(&Vec::<u8>::new()));
    }
}
