//! Conversions between the monomial basis and the dual basis under the trace pairing.
//!
//! The dual representation of `a` in `k[x] / (P)` is the vector `(Tr(a), Tr(a x), ...,
//! Tr(a x^(m-1)))`. Both directions reduce to a multiplication modulo `P` and a power series
//! product against `1 / rev(P)`.

use alloc::vec::Vec;

use ffe_field::Field;
use ffe_poly::Polynomial;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::transposed::inner_product;
use crate::{EmbedError, EmbedResult, ExtensionContext};

/// The coordinates of a linear functional on an extension, in the basis dual to
/// `1, x, ..., x^(m-1)` under the trace pairing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct DualVector<F: Field> {
    coords: Vec<F>,
}

impl<F: Field> DualVector<F> {
    pub const fn new(coords: Vec<F>) -> Self {
        Self { coords }
    }

    pub fn zero(len: usize) -> Self {
        Self::new(F::zero_vec(len))
    }

    /// A uniformly random functional with `len` coordinates.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Self
    where
        StandardUniform: Distribution<F>,
    {
        Self::new((0..len).map(|_| rng.random()).collect())
    }

    pub fn coords(&self) -> &[F] {
        &self.coords
    }

    pub fn into_coords(self) -> Vec<F> {
        self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coords.iter().all(F::is_zero)
    }

    /// Evaluates the functional on a reduced element.
    pub fn apply(&self, a: &Polynomial<F>) -> F {
        inner_product(&self.coords, a)
    }
}

/// `(Tr(a), Tr(a x), ..., Tr(a x^(m-1)))` for a reduced `a`.
///
/// Computed as `rev_m(P' a mod P) / rev(P) mod x^m`.
#[instrument(level = "debug", skip_all, fields(degree = ctx.degree()))]
pub fn monomial_to_dual<F: Field>(
    a: &Polynomial<F>,
    ctx: &ExtensionContext<F>,
) -> EmbedResult<DualVector<F>> {
    ctx.check_reduced(a)?;
    let m = ctx.degree();

    let numerator = ctx.mul(a, &ctx.modulus().derivative());
    let series = numerator.reverse(m).mul_low(ctx.rev_inv(), m);
    Ok(DualVector::new((0..m).map(|i| series.coeff(i)).collect()))
}

/// Inverse of [`monomial_to_dual`].
pub fn dual_to_monomial<F: Field>(
    dual: &DualVector<F>,
    ctx: &ExtensionContext<F>,
) -> EmbedResult<Polynomial<F>> {
    let deriv_inv = ctx.derivative_inverse()?;
    dual_to_monomial_precomp(dual, ctx, &deriv_inv)
}

/// [`dual_to_monomial`] with `deriv_inv = 1 / P' mod P` supplied by the caller, see
/// [`ExtensionContext::derivative_inverse`]. `deriv_inv` must be reduced.
pub fn dual_to_monomial_precomp<F: Field>(
    dual: &DualVector<F>,
    ctx: &ExtensionContext<F>,
    deriv_inv: &Polynomial<F>,
) -> EmbedResult<Polynomial<F>> {
    ctx.check_reduced(deriv_inv)?;
    let m = ctx.degree();
    if dual.len() != m {
        return Err(EmbedError::DualLengthMismatch {
            expected: m,
            actual: dual.len(),
        });
    }

    let series = Polynomial::from_coeffs(dual.coords().to_vec());
    let rev_modulus = ctx.modulus().reverse(m + 1);
    let numerator = series.mul_low(&rev_modulus, m).reverse(m);
    Ok(ctx.mul(&numerator, deriv_inv))
}

#[cfg(test)]
mod tests {
    use ffe_field::{Fp, PrimeField64};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    type F = Fp<31>;

    /// Tr(a) as the sum of the conjugates a, a^p, ..., a^(p^(m-1)).
    fn naive_trace<K: PrimeField64>(a: &Polynomial<K>, ctx: &ExtensionContext<K>) -> K {
        let mut sum = Polynomial::zero();
        let mut conjugate = a.clone();
        for _ in 0..ctx.degree() {
            sum += &conjugate;
            conjugate = ctx.frobenius(&conjugate);
        }
        assert!(sum.is_constant());
        sum.constant_term()
    }

    #[test]
    fn test_coordinates_are_traces() {
        let mut rng = SmallRng::seed_from_u64(1);
        let ctx = ExtensionContext::<F>::random(&mut rng, 5).unwrap();
        let a = ctx.random_element(&mut rng);
        let dual = monomial_to_dual(&a, &ctx).unwrap();
        assert_eq!(dual.len(), 5);

        let mut x_i = Polynomial::one();
        for &d in dual.coords() {
            assert_eq!(d, naive_trace(&ctx.mul(&a, &x_i), &ctx));
            x_i = ctx.mul(&x_i, &Polynomial::x());
        }
    }

    #[test]
    fn test_round_trip() {
        let mut rng = SmallRng::seed_from_u64(2);
        for degree in 1..8 {
            let ctx = ExtensionContext::<F>::random(&mut rng, degree).unwrap();
            for _ in 0..5 {
                let a = ctx.random_element(&mut rng);
                let dual = monomial_to_dual(&a, &ctx).unwrap();
                assert_eq!(dual_to_monomial(&dual, &ctx).unwrap(), a);
            }
            let zero = monomial_to_dual(&Polynomial::zero(), &ctx).unwrap();
            assert!(zero.is_zero());
        }
    }

    #[test]
    fn test_round_trip_from_dual_side() {
        let mut rng = SmallRng::seed_from_u64(3);
        let ctx = ExtensionContext::<Fp<2>>::random(&mut rng, 9).unwrap();
        let deriv_inv = ctx.derivative_inverse().unwrap();
        for _ in 0..5 {
            let dual = DualVector::random(&mut rng, 9);
            let a = dual_to_monomial_precomp(&dual, &ctx, &deriv_inv).unwrap();
            assert_eq!(monomial_to_dual(&a, &ctx).unwrap(), dual);
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let mut rng = SmallRng::seed_from_u64(4);
        let ctx = ExtensionContext::<F>::random(&mut rng, 3).unwrap();
        assert_eq!(
            dual_to_monomial(&DualVector::zero(4), &ctx),
            Err(EmbedError::DualLengthMismatch {
                expected: 3,
                actual: 4
            })
        );
        let unreduced = Polynomial::monomial(F::ONE, 3);
        assert_eq!(
            monomial_to_dual(&unreduced, &ctx),
            Err(EmbedError::NotReduced {
                len: 4,
                modulus_degree: 3
            })
        );
        assert_eq!(
            dual_to_monomial_precomp(&DualVector::zero(3), &ctx, &unreduced),
            Err(EmbedError::NotReduced {
                len: 4,
                modulus_degree: 3
            })
        );
    }

    #[test]
    fn test_apply_is_trace_pairing() {
        let mut rng = SmallRng::seed_from_u64(5);
        let ctx = ExtensionContext::<F>::random(&mut rng, 4).unwrap();
        let a = ctx.random_element(&mut rng);
        let y = ctx.random_element(&mut rng);
        let dual = monomial_to_dual(&a, &ctx).unwrap();
        assert_eq!(dual.apply(&y), naive_trace(&ctx.mul(&a, &y), &ctx));
    }
}
