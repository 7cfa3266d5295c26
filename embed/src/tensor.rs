//! The algebra `L ⊗ k[Z] / (R)` used by the Hilbert 90 solver.

use alloc::vec::Vec;

use ffe_field::PrimeField64;
use ffe_poly::Polynomial;
use ffe_util::{multiplicative_order, prime_divisors_u64};
use itertools::Itertools;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{EmbedError, EmbedResult, ExtensionContext, ProbeConfig, minpoly};

/// A cyclic descent datum: an extension `L` of degree `n` together with a factor `R` of
/// `Z^n - 1` of degree `ord(p mod n)`.
///
/// The Frobenius `σ` of `L` has order `n`, so `σ ⊗ 1` and multiplication by `1 ⊗ Z` are two
/// commuting automorphisms of the tensor algebra annihilated by `R`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tensor<F: PrimeField64> {
    left: ExtensionContext<F>,
    right: ExtensionContext<F>,
    /// `(Z^n - 1) / R`.
    cycle: Polynomial<F>,
}

impl<F: PrimeField64> Tensor<F> {
    pub fn new(left: ExtensionContext<F>, right: ExtensionContext<F>) -> EmbedResult<Self> {
        let n = left.degree();
        let k = multiplicative_order(F::ORDER_U64, n as u64).ok_or(EmbedError::InvalidTensor {
            reason: "the characteristic divides the degree of the left factor",
        })?;
        if right.degree() as u64 != k {
            return Err(EmbedError::InvalidTensor {
                reason: "the right factor must have degree ord(p mod n)",
            });
        }

        let z_n_minus_one = &Polynomial::monomial(F::ONE, n) - &F::ONE;
        let (cycle, rem) = z_n_minus_one.div_rem(right.modulus());
        if !rem.is_zero() {
            return Err(EmbedError::InvalidTensor {
                reason: "the right modulus does not divide Z^n - 1",
            });
        }
        Ok(Self { left, right, cycle })
    }

    /// A descriptor over `left` whose right factor is the minimal polynomial of a primitive
    /// `n`-th root of unity, `n = deg(left)`.
    ///
    /// The root is found as `h^((p^k - 1) / n)` for random `h` in a fresh degree-`k` extension.
    /// Both the modulus of that extension and the choice of `h` are bounded by `config`.
    #[instrument(level = "debug", skip_all, fields(n = left.degree()))]
    pub fn with_cyclotomic_factor<R>(
        left: ExtensionContext<F>,
        rng: &mut R,
        config: &ProbeConfig,
    ) -> EmbedResult<Self>
    where
        R: Rng + ?Sized,
        StandardUniform: Distribution<F>,
    {
        let n = left.degree() as u64;
        let k = multiplicative_order(F::ORDER_U64, n).ok_or(EmbedError::InvalidTensor {
            reason: "the characteristic divides the degree of the left factor",
        })?;
        let ambient = ExtensionContext::random_with_config(rng, k as usize, config)?;
        let cofactor = (ambient.order() - 1u32) / n;
        let primes = prime_divisors_u64(n);

        for attempt in 1..=config.max_attempts {
            let h = ambient.random_element(rng);
            let zeta = ambient.pow_biguint(&h, &cofactor);
            if zeta.is_zero() || primes.iter().any(|&q| ambient.pow(&zeta, n / q).is_one()) {
                continue;
            }
            let right = minpoly(&zeta, &ambient, rng, config)?;
            debug!(attempt, k, "found primitive root of unity");
            return Self::new(left, ExtensionContext::new_unchecked(right)?);
        }

        Err(EmbedError::DidNotConverge {
            attempts: config.max_attempts,
        })
    }

    /// The extension `L` acted on by the Frobenius.
    pub const fn left(&self) -> &ExtensionContext<F> {
        &self.left
    }

    /// The context of `R`.
    pub const fn right(&self) -> &ExtensionContext<F> {
        &self.right
    }

    /// `(Z^n - 1) / R`.
    pub const fn cycle_polynomial(&self) -> &Polynomial<F> {
        &self.cycle
    }

    /// Errors with [`EmbedError::InvalidTensor`] unless `x` has `deg R` coefficients, each
    /// reduced in `L`.
    pub fn check_element(&self, x: &TensorElement<F>) -> EmbedResult<()> {
        if x.len() != self.right.degree() {
            return Err(EmbedError::InvalidTensor {
                reason: "element has the wrong number of coefficients",
            });
        }
        x.coeffs()
            .iter()
            .try_for_each(|c| self.left.check_reduced(c))
    }
}

/// An element `Σ x_i ⊗ Z^i` of the tensor algebra, stored as its `deg R` coefficients in `L`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct TensorElement<F: PrimeField64> {
    coeffs: Vec<Polynomial<F>>,
}

impl<F: PrimeField64> TensorElement<F> {
    pub const fn new(coeffs: Vec<Polynomial<F>>) -> Self {
        Self { coeffs }
    }

    pub fn zero(tensor: &Tensor<F>) -> Self {
        Self::new(
            (0..tensor.right().degree())
                .map(|_| Polynomial::zero())
                .collect(),
        )
    }

    /// `1 ⊗ z` for a reduced element `z` of the right factor.
    pub fn from_right(z: &Polynomial<F>, tensor: &Tensor<F>) -> EmbedResult<Self> {
        tensor.right().check_reduced(z)?;
        Ok(Self::new(
            (0..tensor.right().degree())
                .map(|i| Polynomial::constant(z.coeff(i)))
                .collect(),
        ))
    }

    pub fn coeffs(&self) -> &[Polynomial<F>] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<Polynomial<F>> {
        self.coeffs
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(Polynomial::is_zero)
    }

    /// `(σ ⊗ 1)(self)`: the Frobenius of `L` applied to every coefficient.
    #[must_use]
    pub fn frobenius_left(&self, tensor: &Tensor<F>) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .map(|c| tensor.left().frobenius(c))
                .collect(),
        )
    }
}

/// The product of two tensor elements: a convolution of coefficients in `L`, reduced by the
/// monic `R`.
pub fn tensor_mul<F: PrimeField64>(
    a: &TensorElement<F>,
    b: &TensorElement<F>,
    tensor: &Tensor<F>,
) -> EmbedResult<TensorElement<F>> {
    tensor.check_element(a)?;
    tensor.check_element(b)?;
    let k = tensor.right().degree();
    let left = tensor.left();

    let mut prod = (0..2 * k - 1).map(|_| Polynomial::zero()).collect_vec();
    for (i, a_i) in a.coeffs().iter().enumerate() {
        if a_i.is_zero() {
            continue;
        }
        for (j, b_j) in b.coeffs().iter().enumerate() {
            prod[i + j] += &left.mul(a_i, b_j);
        }
    }

    // Z^k = -(R_0 + R_1 Z + ... + R_(k-1) Z^(k-1)).
    let r_low = &tensor.right().modulus().coeffs()[..k];
    for t in (k..2 * k - 1).rev() {
        let top = core::mem::take(&mut prod[t]);
        for (c, r_i) in prod[t - k..t].iter_mut().zip_eq(r_low) {
            *c -= &(&top * r_i);
        }
    }
    prod.truncate(k);
    Ok(TensorElement::new(prod))
}

#[cfg(test)]
mod tests {
    use ffe_field::{Field, Fp};
    use ffe_poly::test_utils::poly_from_i64;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn random_tensor_element<F: PrimeField64>(
        tensor: &Tensor<F>,
        rng: &mut SmallRng,
    ) -> TensorElement<F>
    where
        StandardUniform: Distribution<F>,
    {
        TensorElement::new(
            (0..tensor.right().degree())
                .map(|_| tensor.left().random_element(rng))
                .collect(),
        )
    }

    #[test]
    fn test_validation() {
        type F = Fp<11>;
        let mut rng = SmallRng::seed_from_u64(1);
        let left = ExtensionContext::<F>::random(&mut rng, 3).unwrap();
        let cyclotomic = ExtensionContext::new(poly_from_i64::<F>(&[1, 1, 1])).unwrap();
        let tensor = Tensor::new(left.clone(), cyclotomic).unwrap();
        assert_eq!(tensor.cycle_polynomial(), &poly_from_i64(&[-1, 1]));

        // ord(11 mod 3) = 2, so a linear factor is rejected.
        let linear = ExtensionContext::new(poly_from_i64::<F>(&[-1, 1])).unwrap();
        assert!(matches!(
            Tensor::new(left.clone(), linear),
            Err(EmbedError::InvalidTensor { .. })
        ));

        // X^2 + 1 is irreducible over F_11 but does not divide X^3 - 1.
        let wrong = ExtensionContext::new(poly_from_i64::<F>(&[1, 0, 1])).unwrap();
        assert!(matches!(
            Tensor::new(left, wrong),
            Err(EmbedError::InvalidTensor { .. })
        ));

        // The characteristic must not divide n.
        let left = ExtensionContext::<F>::random(&mut rng, 11).unwrap();
        let right = ExtensionContext::new(poly_from_i64::<F>(&[-1, 1])).unwrap();
        assert!(matches!(
            Tensor::new(left, right),
            Err(EmbedError::InvalidTensor { .. })
        ));
    }

    #[test]
    fn test_cyclotomic_factor() {
        let mut rng = SmallRng::seed_from_u64(2);
        let config = ProbeConfig::default();

        // ord(3 mod 4) = 2 and the primitive fourth roots of unity are the roots of X^2 + 1.
        let left = ExtensionContext::<Fp<3>>::random(&mut rng, 4).unwrap();
        let tensor = Tensor::with_cyclotomic_factor(left, &mut rng, &config).unwrap();
        assert_eq!(tensor.right().modulus(), &poly_from_i64(&[1, 0, 1]));

        // ord(31 mod 5) = 1 and 2 has order 5 in F_31, as do 4, 8 and 16.
        let left = ExtensionContext::<Fp<31>>::random(&mut rng, 5).unwrap();
        let tensor = Tensor::with_cyclotomic_factor(left, &mut rng, &config).unwrap();
        let root = -tensor.right().modulus().constant_term();
        assert_eq!(root.exp_u64(5), Fp::ONE);
        assert_ne!(root, Fp::ONE);
    }

    #[test]
    fn test_mul_matches_polynomial_product() {
        type F = Fp<11>;
        let mut rng = SmallRng::seed_from_u64(3);
        let left = ExtensionContext::<F>::random(&mut rng, 3).unwrap();
        let right = ExtensionContext::new(poly_from_i64::<F>(&[1, 1, 1])).unwrap();
        let tensor = Tensor::new(left, right).unwrap();

        // On the image of the right factor the product is the product in k[Z] / (R).
        for _ in 0..5 {
            let u = tensor.right().random_element(&mut rng);
            let v = tensor.right().random_element(&mut rng);
            let product = tensor_mul(
                &TensorElement::from_right(&u, &tensor).unwrap(),
                &TensorElement::from_right(&v, &tensor).unwrap(),
                &tensor,
            )
            .unwrap();
            let expected = TensorElement::from_right(&tensor.right().mul(&u, &v), &tensor).unwrap();
            assert_eq!(product, expected);
        }

        // Multiplication by 1 ⊗ 1 is the identity, and the product commutes.
        let one = TensorElement::from_right(&Polynomial::one(), &tensor).unwrap();
        let x = random_tensor_element(&tensor, &mut rng);
        let y = random_tensor_element(&tensor, &mut rng);
        assert_eq!(tensor_mul(&one, &x, &tensor).unwrap(), x);
        assert_eq!(
            tensor_mul(&x, &y, &tensor).unwrap(),
            tensor_mul(&y, &x, &tensor).unwrap()
        );
    }

    #[test]
    fn test_frobenius_is_multiplicative() {
        type F = Fp<3>;
        let mut rng = SmallRng::seed_from_u64(4);
        let left = ExtensionContext::<F>::random(&mut rng, 4).unwrap();
        let right = ExtensionContext::new(poly_from_i64::<F>(&[1, 0, 1])).unwrap();
        let tensor = Tensor::new(left, right).unwrap();

        let x = random_tensor_element(&tensor, &mut rng);
        let y = random_tensor_element(&tensor, &mut rng);
        let xy = tensor_mul(&x, &y, &tensor).unwrap();
        assert_eq!(
            xy.frobenius_left(&tensor),
            tensor_mul(
                &x.frobenius_left(&tensor),
                &y.frobenius_left(&tensor),
                &tensor
            )
            .unwrap()
        );
        assert!(TensorElement::zero(&tensor).frobenius_left(&tensor).is_zero());
    }

    #[test]
    fn test_rejects_malformed_elements() {
        type F = Fp<11>;
        let mut rng = SmallRng::seed_from_u64(5);
        let left = ExtensionContext::<F>::random(&mut rng, 3).unwrap();
        let right = ExtensionContext::new(poly_from_i64::<F>(&[1, 1, 1])).unwrap();
        let tensor = Tensor::new(left, right).unwrap();

        let short = TensorElement::new(alloc::vec![Polynomial::one()]);
        let zero = TensorElement::zero(&tensor);
        assert!(matches!(
            tensor_mul(&short, &zero, &tensor),
            Err(EmbedError::InvalidTensor { .. })
        ));
        let unreduced = TensorElement::new(alloc::vec![
            Polynomial::monomial(F::ONE, 3),
            Polynomial::zero()
        ]);
        assert!(matches!(
            tensor_mul(&zero, &unreduced, &tensor),
            Err(EmbedError::NotReduced { .. })
        ));
        assert!(matches!(
            TensorElement::from_right(&Polynomial::monomial(F::ONE, 2), &tensor),
            Err(EmbedError::NotReduced { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        type F = Fp<11>;
        let mut rng = SmallRng::seed_from_u64(6);
        let left = ExtensionContext::<F>::random(&mut rng, 3).unwrap();
        let right = ExtensionContext::new(poly_from_i64::<F>(&[1, 1, 1])).unwrap();
        let tensor = Tensor::new(left, right).unwrap();
        let x = random_tensor_element(&tensor, &mut rng);
        let json = serde_json::to_string(&x).unwrap();
        assert_eq!(serde_json::from_str::<TensorElement<F>>(&json).unwrap(), x);
    }
}
