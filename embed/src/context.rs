use ffe_field::{Field, PrimeField64};
use ffe_poly::Polynomial;
use num_bigint::BigUint;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};

use crate::{EmbedError, EmbedResult, ProbeConfig};

/// An extension `k[x] / (P)` of the prime field `k`, described by a monic modulus `P` of degree
/// `m >= 1`.
///
/// Elements are plain [`Polynomial`]s of degree `< m` owned by the caller. The context caches
/// `1 / rev(P) mod x^(m+1)`, which every reduction against `P` reuses.
///
/// Only the modulus is serialized; the cached reciprocal is rebuilt (and the modulus revalidated)
/// on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Polynomial<F>", into = "Polynomial<F>", bound = "")]
pub struct ExtensionContext<F: Field> {
    modulus: Polynomial<F>,
    rev_inv: Polynomial<F>,
}

impl<F: Field> TryFrom<Polynomial<F>> for ExtensionContext<F> {
    type Error = EmbedError;

    fn try_from(modulus: Polynomial<F>) -> EmbedResult<Self> {
        Self::new_unchecked(modulus)
    }
}

impl<F: Field> From<ExtensionContext<F>> for Polynomial<F> {
    fn from(ctx: ExtensionContext<F>) -> Self {
        ctx.modulus
    }
}

impl<F: Field> ExtensionContext<F> {
    /// Builds a context without testing irreducibility. The modulus must still be monic of
    /// positive degree.
    ///
    /// Use this when irreducibility is known by construction, e.g. for a minimal polynomial.
    pub fn new_unchecked(modulus: Polynomial<F>) -> EmbedResult<Self> {
        match modulus.degree() {
            None | Some(0) => return Err(EmbedError::ConstantModulus),
            Some(_) if !modulus.is_monic() => return Err(EmbedError::NotMonic),
            Some(_) => {}
        }
        let m = modulus.num_coeffs() - 1;
        let rev_inv = modulus
            .reverse_inverse(m + 1)
            .ok_or(EmbedError::ConstantModulus)?;
        Ok(Self { modulus, rev_inv })
    }

    /// The extension degree `m`.
    pub fn degree(&self) -> usize {
        self.modulus.num_coeffs() - 1
    }

    pub const fn modulus(&self) -> &Polynomial<F> {
        &self.modulus
    }

    /// `1 / rev(P) mod x^(m+1)`.
    pub const fn rev_inv(&self) -> &Polynomial<F> {
        &self.rev_inv
    }

    pub fn is_reduced(&self, a: &Polynomial<F>) -> bool {
        a.num_coeffs() <= self.degree()
    }

    /// Errors with [`EmbedError::NotReduced`] unless `deg a < m`.
    pub fn check_reduced(&self, a: &Polynomial<F>) -> EmbedResult<()> {
        if self.is_reduced(a) {
            Ok(())
        } else {
            Err(EmbedError::NotReduced {
                len: a.num_coeffs(),
                modulus_degree: self.degree(),
            })
        }
    }

    /// `a mod P` for an arbitrary polynomial `a`.
    pub fn reduce(&self, a: &Polynomial<F>) -> Polynomial<F> {
        // The cached reciprocal has precision m + 1, enough for quotients of inputs up to 2m + 1
        // coefficients.
        if a.num_coeffs() <= 2 * self.degree() + 1 {
            a.rem_preinv(&self.modulus, &self.rev_inv)
        } else {
            a.rem(&self.modulus)
        }
    }

    /// `a b mod P`. Inputs need not be reduced.
    pub fn mul(&self, a: &Polynomial<F>, b: &Polynomial<F>) -> Polynomial<F> {
        self.reduce(&(a * b))
    }

    pub fn square(&self, a: &Polynomial<F>) -> Polynomial<F> {
        self.mul(a, a)
    }

    /// The multiplicative inverse, or `None` for zero.
    pub fn inverse(&self, a: &Polynomial<F>) -> Option<Polynomial<F>> {
        a.inverse_mod(&self.modulus)
    }

    /// `a / b`, or `None` when `b` is zero.
    pub fn div(&self, a: &Polynomial<F>, b: &Polynomial<F>) -> Option<Polynomial<F>> {
        self.inverse(b).map(|b_inv| self.mul(a, &b_inv))
    }

    pub fn pow(&self, a: &Polynomial<F>, exp: u64) -> Polynomial<F> {
        a.pow_mod_preinv(exp, &self.modulus, &self.rev_inv)
    }

    pub fn pow_biguint(&self, a: &Polynomial<F>, exp: &BigUint) -> Polynomial<F> {
        a.pow_mod_biguint_preinv(exp, &self.modulus, &self.rev_inv)
    }

    /// `f(g) mod P`.
    pub fn compose(&self, f: &Polynomial<F>, g: &Polynomial<F>) -> Polynomial<F> {
        f.compose_mod_preinv(g, &self.modulus, &self.rev_inv)
    }

    /// The class of `x`, i.e. the canonical generator of the extension.
    pub fn generator(&self) -> Polynomial<F> {
        self.reduce(&Polynomial::x())
    }

    /// `1 / P' mod P`, used to leave the dual basis.
    ///
    /// Fails with [`EmbedError::Reducible`] when `P'` shares a factor with `P`, which never
    /// happens for an irreducible modulus over a finite field.
    pub fn derivative_inverse(&self) -> EmbedResult<Polynomial<F>> {
        self.modulus
            .derivative()
            .inverse_mod(&self.modulus)
            .ok_or(EmbedError::Reducible)
    }

    /// A uniformly random element.
    pub fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> Polynomial<F>
    where
        StandardUniform: Distribution<F>,
    {
        Polynomial::random(rng, self.degree())
    }
}

impl<F: PrimeField64> ExtensionContext<F> {
    /// Builds a context from a monic irreducible modulus of positive degree.
    pub fn new(modulus: Polynomial<F>) -> EmbedResult<Self> {
        let ctx = Self::new_unchecked(modulus)?;
        if !ctx.modulus.is_irreducible() {
            return Err(EmbedError::Reducible);
        }
        Ok(ctx)
    }

    /// A context with a uniformly random monic irreducible modulus of the given degree.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, degree: usize) -> EmbedResult<Self>
    where
        StandardUniform: Distribution<F>,
    {
        if degree == 0 {
            return Err(EmbedError::ConstantModulus);
        }
        Self::new_unchecked(Polynomial::random_irreducible(rng, degree))
    }

    /// [`Self::random`] with at most `config.max_attempts * degree` candidate moduli, failing
    /// with [`EmbedError::DidNotConverge`] past that.
    pub fn random_with_config<R: Rng + ?Sized>(
        rng: &mut R,
        degree: usize,
        config: &ProbeConfig,
    ) -> EmbedResult<Self>
    where
        StandardUniform: Distribution<F>,
    {
        if degree == 0 {
            return Err(EmbedError::ConstantModulus);
        }
        let max_draws = config.max_attempts.saturating_mul(degree);
        let modulus = Polynomial::try_random_irreducible(rng, degree, max_draws)
            .ok_or(EmbedError::DidNotConverge {
                attempts: max_draws,
            })?;
        Self::new_unchecked(modulus)
    }

    /// The number of elements, `p^m`.
    pub fn order(&self) -> BigUint {
        F::order().pow(self.degree() as u32)
    }

    /// The Frobenius automorphism `a -> a^p`.
    pub fn frobenius(&self, a: &Polynomial<F>) -> Polynomial<F> {
        self.pow(a, F::ORDER_U64)
    }
}

#[cfg(test)]
mod tests {
    use ffe_field::Fp;
    use ffe_poly::test_utils::poly_from_i64;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    type F = Fp<31>;

    #[test]
    fn test_rejects_bad_moduli() {
        assert_eq!(
            ExtensionContext::<F>::new(Polynomial::zero()),
            Err(EmbedError::ConstantModulus)
        );
        assert_eq!(
            ExtensionContext::new(poly_from_i64::<F>(&[3])),
            Err(EmbedError::ConstantModulus)
        );
        assert_eq!(
            ExtensionContext::new(poly_from_i64::<F>(&[1, 0, 2])),
            Err(EmbedError::NotMonic)
        );
        // x^2 - 1 = (x - 1)(x + 1)
        assert_eq!(
            ExtensionContext::new(poly_from_i64::<F>(&[-1, 0, 1])),
            Err(EmbedError::Reducible)
        );
        assert!(ExtensionContext::new_unchecked(poly_from_i64::<F>(&[-1, 0, 1])).is_ok());
    }

    #[test]
    fn test_field_arithmetic() {
        let mut rng = SmallRng::seed_from_u64(1);
        let ctx = ExtensionContext::<F>::random(&mut rng, 5).unwrap();
        assert_eq!(ctx.degree(), 5);
        assert_eq!(ctx.order(), BigUint::from(31u32).pow(5));

        for _ in 0..10 {
            let a = ctx.random_element(&mut rng);
            let b = ctx.random_element(&mut rng);
            assert!(ctx.is_reduced(&a));
            assert_eq!(ctx.mul(&a, &b), a.mulmod(&b, ctx.modulus()));
            assert_eq!(ctx.square(&a), ctx.mul(&a, &a));
            if !b.is_zero() {
                let q = ctx.div(&a, &b).unwrap();
                assert_eq!(ctx.mul(&q, &b), a);
            }
            // a^(p^m) = a
            assert_eq!(ctx.pow_biguint(&a, &ctx.order()), a);
            // Frobenius is additive.
            assert_eq!(
                ctx.frobenius(&(&a + &b)),
                &ctx.frobenius(&a) + &ctx.frobenius(&b)
            );
        }
        assert!(ctx.inverse(&Polynomial::zero()).is_none());
    }

    #[test]
    fn test_reduce_long_inputs() {
        let mut rng = SmallRng::seed_from_u64(2);
        let ctx = ExtensionContext::<F>::random(&mut rng, 4).unwrap();
        for len in [0, 3, 9, 10, 25] {
            let a = Polynomial::random(&mut rng, len);
            assert_eq!(ctx.reduce(&a), a.rem(ctx.modulus()));
        }
    }

    #[test]
    fn test_random_with_config() {
        let mut rng = SmallRng::seed_from_u64(6);
        let ctx =
            ExtensionContext::<F>::random_with_config(&mut rng, 5, &ProbeConfig::default()).unwrap();
        assert_eq!(ctx.degree(), 5);
        assert!(ctx.modulus().is_irreducible());

        assert_eq!(
            ExtensionContext::<F>::random_with_config(&mut rng, 5, &ProbeConfig::new(0)),
            Err(EmbedError::DidNotConverge { attempts: 0 })
        );
        assert_eq!(
            ExtensionContext::<F>::random_with_config(&mut rng, 0, &ProbeConfig::default()),
            Err(EmbedError::ConstantModulus)
        );
    }

    #[test]
    fn test_mul_accepts_unreduced_inputs() {
        let mut rng = SmallRng::seed_from_u64(5);
        let ctx = ExtensionContext::<F>::random(&mut rng, 4).unwrap();
        for (len_a, len_b) in [(9, 9), (12, 3), (30, 17), (0, 40)] {
            let a = Polynomial::random(&mut rng, len_a);
            let b = Polynomial::random(&mut rng, len_b);
            assert_eq!(ctx.mul(&a, &b), a.mulmod(&b, ctx.modulus()));
            assert_eq!(ctx.mul(&a, &b), ctx.mul(&ctx.reduce(&a), &ctx.reduce(&b)));
        }
        let a = Polynomial::random(&mut rng, 11);
        assert_eq!(ctx.pow(&a, 7), a.pow_mod(7, ctx.modulus()));
        let g = Polynomial::random(&mut rng, 9);
        assert_eq!(ctx.compose(&a, &g), a.compose_mod(&g, ctx.modulus()));
    }

    #[test]
    fn test_generator_and_derivative_inverse() {
        // x - 5 over F_31: the generator is the constant 5.
        let ctx = ExtensionContext::new(poly_from_i64::<F>(&[-5, 1])).unwrap();
        assert_eq!(ctx.generator(), Polynomial::constant(F::new(5)));

        let mut rng = SmallRng::seed_from_u64(3);
        let ctx = ExtensionContext::<F>::random(&mut rng, 6).unwrap();
        assert_eq!(ctx.generator(), Polynomial::x());
        let d_inv = ctx.derivative_inverse().unwrap();
        assert!(ctx.mul(&d_inv, &ctx.modulus().derivative()).is_one());
    }

    #[test]
    fn test_serde_revalidates() {
        let mut rng = SmallRng::seed_from_u64(4);
        let ctx = ExtensionContext::<F>::random(&mut rng, 3).unwrap();
        let json = serde_json::to_string(&ctx).unwrap();
        let back: ExtensionContext<F> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);

        assert!(serde_json::from_str::<ExtensionContext<F>>("[1, 2]").is_err());
    }
}
