use alloc::vec::Vec;

use ffe_field::Field;
use ffe_poly::Polynomial;
use ffe_util::{ceil_div_usize, isqrt};
use tracing::{debug_span, instrument};

use crate::transposed::{inner_product, transposed_mulmod};

/// Power projection: `[<a, 1>, <a, h>, ..., <a, h^(l-1)>]`, all powers taken modulo `modulus`.
///
/// `h` must be reduced, and `rev_inv = 1 / rev(modulus)` correct modulo `x^(deg modulus)`. A
/// functional `a` shorter than `deg modulus` is padded with zeros.
///
/// Baby-step/giant-step: with `k = floor(sqrt(l))`, the powers `h^0, ..., h^k` are tabulated,
/// each block of `k` outputs is a batch of dot products, and between blocks `a` is replaced by
/// `y -> <a, h^k y>` using a transposed modular product.
#[instrument(level = "debug", skip_all, fields(l = l, degree = modulus.num_coeffs() - 1))]
pub fn project_powers<F: Field>(
    a: &[F],
    l: usize,
    h: &Polynomial<F>,
    modulus: &Polynomial<F>,
    rev_inv: &Polynomial<F>,
) -> Vec<F> {
    if l == 0 {
        return Vec::new();
    }
    let n = modulus.num_coeffs() - 1;
    debug_assert!(h.num_coeffs() <= n, "h must be reduced");

    let k = isqrt(l);
    let baby_steps = debug_span!("baby steps", k).in_scope(|| {
        let mut powers = Vec::with_capacity(k + 1);
        powers.push(Polynomial::one().rem_preinv(modulus, rev_inv));
        for j in 1..=k {
            let next = powers[j - 1].mulmod_preinv(h, modulus, rev_inv);
            powers.push(next);
        }
        powers
    });
    let giant_step = &baby_steps[k];

    let mut functional = a[..n.min(a.len())].to_vec();
    functional.resize(n, F::ZERO);

    let num_blocks = ceil_div_usize(l, k);
    let mut result = Vec::with_capacity(l);
    for block in 0..num_blocks {
        let block_len = k.min(l - result.len());
        result.extend(
            baby_steps[..block_len]
                .iter()
                .map(|power| inner_product(&functional, power)),
        );
        if block + 1 < num_blocks {
            functional = transposed_mulmod(&functional, giant_step, modulus, rev_inv);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use ffe_field::Fp;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    type F = Fp<101>;

    #[test]
    fn test_matches_naive_powers() {
        let mut rng = SmallRng::seed_from_u64(1);
        for degree in [1, 2, 5, 8] {
            let modulus: Polynomial<F> = Polynomial::random_monic(&mut rng, degree);
            let rev_inv = modulus.reverse_inverse(degree + 1).unwrap();
            let h = Polynomial::random(&mut rng, degree);
            let a: Vec<F> = (0..degree).map(|_| rng.random()).collect();

            for l in 0..=20 {
                let projected = project_powers(&a, l, &h, &modulus, &rev_inv);
                assert_eq!(projected.len(), l);

                let mut power = Polynomial::one().rem(&modulus);
                for &value in &projected {
                    assert_eq!(value, inner_product(&a, &power));
                    power = power.mulmod(&h, &modulus);
                }
            }
        }
    }

    #[test]
    fn test_short_functional_is_padded() {
        let mut rng = SmallRng::seed_from_u64(2);
        let modulus: Polynomial<F> = Polynomial::random_monic(&mut rng, 6);
        let rev_inv = modulus.reverse_inverse(7).unwrap();
        let h = Polynomial::random(&mut rng, 6);
        let a = [F::new(3), F::new(7)];
        let padded = [a[0], a[1], F::ZERO, F::ZERO, F::ZERO, F::ZERO];
        assert_eq!(
            project_powers(&a, 11, &h, &modulus, &rev_inv),
            project_powers(&padded, 11, &h, &modulus, &rev_inv)
        );
    }

    #[test]
    fn test_zero_element() {
        let mut rng = SmallRng::seed_from_u64(3);
        let modulus: Polynomial<F> = Polynomial::random_monic(&mut rng, 4);
        let rev_inv = modulus.reverse_inverse(5).unwrap();
        let a = [F::new(5), F::ONE, F::ZERO, F::TWO];
        // <a, 0^0> = <a, 1> and every later power vanishes.
        let projected = project_powers(&a, 6, &Polynomial::zero(), &modulus, &rev_inv);
        assert_eq!(projected[0], F::new(5));
        assert!(projected[1..].iter().all(F::is_zero));
    }
}
