//! Hilbert 90 over a [`Tensor`]: nonzero `x` in `L ⊗ k[Z] / (R)` with `(σ ⊗ 1)(x) = (1 ⊗ Z) x`.
//!
//! Writing `x = Σ x_i ⊗ Z^i`, the equation reads `σ(x_i) = x_(i-1) - R_i x_(k-1)` with
//! `x_(-1) = 0`. Every coefficient is determined by the top one, and a top coefficient of the
//! form `φ(σ)(a)`, `φ = (Z^n - 1) / R`, always extends to a solution.

use alloc::vec::Vec;

use ffe_field::PrimeField64;
use ffe_poly::Polynomial;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use tracing::{instrument, trace};

use crate::{EmbedError, EmbedResult, ProbeConfig, Tensor, TensorElement};

/// The tensor element with top coefficient `a` and the others given by
/// `x_i = σ(x_(i+1)) + R_(i+1) a`.
///
/// This solves every equation except the one at `i = 0`, which holds exactly when `a` lies in
/// the image of `φ(σ)`. A zero `a` lifts to the zero element.
pub fn lift_h90<F: PrimeField64>(
    a: &Polynomial<F>,
    tensor: &Tensor<F>,
) -> EmbedResult<TensorElement<F>> {
    tensor.left().check_reduced(a)?;
    let k = tensor.right().degree();
    let r = tensor.right().modulus();

    let mut coeffs = Vec::with_capacity(k);
    let mut current = a.clone();
    for i in (0..k - 1).rev() {
        let next = &tensor.left().frobenius(&current) + &(a * &r.coeff(i + 1));
        coeffs.push(core::mem::replace(&mut current, next));
    }
    coeffs.push(current);
    coeffs.reverse();
    Ok(TensorElement::new(coeffs))
}

/// `lift_h90(φ(σ)(a))` for `φ = phi_div_r`, normally [`Tensor::cycle_polynomial`].
pub fn eval_cycle<F: PrimeField64>(
    a: &Polynomial<F>,
    tensor: &Tensor<F>,
    phi_div_r: &Polynomial<F>,
) -> EmbedResult<TensorElement<F>> {
    let left = tensor.left();
    left.check_reduced(a)?;

    let mut top = Polynomial::zero();
    let mut conjugate = a.clone();
    for (i, phi_i) in phi_div_r.coeffs().iter().enumerate() {
        if i > 0 {
            conjugate = left.frobenius(&conjugate);
        }
        top += &(&conjugate * phi_i);
    }
    lift_h90(&top, tensor)
}

/// A nonzero solution of Hilbert 90, from `eval_cycle` on random elements of `L`.
///
/// `φ(σ)` has rank `deg R`, so each draw succeeds with probability at least `1 - 1/p`.
#[instrument(level = "debug", skip_all, fields(n = tensor.left().degree(), k = tensor.right().degree()))]
pub fn solve_h90<F, R>(
    tensor: &Tensor<F>,
    rng: &mut R,
    config: &ProbeConfig,
) -> EmbedResult<TensorElement<F>>
where
    F: PrimeField64,
    R: Rng + ?Sized,
    StandardUniform: Distribution<F>,
{
    for attempt in 1..=config.max_attempts {
        let a = tensor.left().random_element(rng);
        let x = eval_cycle(&a, tensor, tensor.cycle_polynomial())?;
        if !x.is_zero() {
            return Ok(x);
        }
        trace!(attempt, "cycle image vanished, resampling");
    }
    Err(EmbedError::DidNotConverge {
        attempts: config.max_attempts,
    })
}

/// Whether `x` satisfies `σ(x_i) = x_(i-1) - R_i x_(k-1)` for every `i`. Malformed elements are
/// never solutions; the zero element always is.
pub fn is_h90<F: PrimeField64>(x: &TensorElement<F>, tensor: &Tensor<F>) -> bool {
    if tensor.check_element(x).is_err() {
        return false;
    }
    let coeffs = x.coeffs();
    let top = &coeffs[coeffs.len() - 1];
    let r = tensor.right().modulus();

    coeffs.iter().enumerate().all(|(i, x_i)| {
        let below = if i == 0 {
            Polynomial::zero()
        } else {
            coeffs[i - 1].clone()
        };
        tensor.left().frobenius(x_i) == &below - &(top * &r.coeff(i))
    })
}

#[cfg(test)]
mod tests {
    use ffe_field::{Field, Fp};
    use ffe_poly::test_utils::poly_from_i64;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::{ExtensionContext, tensor_mul};

    fn tensor<F: PrimeField64>(rng: &mut SmallRng, n: usize, r: &[i64]) -> Tensor<F>
    where
        StandardUniform: Distribution<F>,
    {
        let left = ExtensionContext::random(rng, n).unwrap();
        let right = ExtensionContext::new(poly_from_i64(r)).unwrap();
        Tensor::new(left, right).unwrap()
    }

    fn check_solutions<F: PrimeField64>(tensor: &Tensor<F>, rng: &mut SmallRng, trials: usize)
    where
        StandardUniform: Distribution<F>,
    {
        let config = ProbeConfig::default();
        let z = TensorElement::from_right(&tensor.right().generator(), tensor).unwrap();
        for _ in 0..trials {
            let x = solve_h90(tensor, rng, &config).unwrap();
            assert!(!x.is_zero());
            assert!(is_h90(&x, tensor));
            assert_eq!(tensor_mul(&z, &x, tensor).unwrap(), x.frobenius_left(tensor));
        }
    }

    #[test]
    fn test_linear_factor() {
        let mut rng = SmallRng::seed_from_u64(1);
        // 2 has order 5 modulo 31.
        let t = tensor::<Fp<31>>(&mut rng, 5, &[-2, 1]);
        check_solutions(&t, &mut rng, 10);
        // 2 has order 3 modulo 7.
        let t = tensor::<Fp<7>>(&mut rng, 3, &[-2, 1]);
        check_solutions(&t, &mut rng, 10);
    }

    #[test]
    fn test_quadratic_factor() {
        let mut rng = SmallRng::seed_from_u64(2);
        let t = tensor::<Fp<11>>(&mut rng, 3, &[1, 1, 1]);
        check_solutions(&t, &mut rng, 10);
        let t = tensor::<Fp<3>>(&mut rng, 4, &[1, 0, 1]);
        check_solutions(&t, &mut rng, 10);
    }

    #[test]
    fn test_trivial_twist_gives_fixed_points() {
        // With R = Z - 1 the solutions are the elements fixed by σ, i.e. the prime field.
        let mut rng = SmallRng::seed_from_u64(3);
        let t = tensor::<Fp<31>>(&mut rng, 5, &[-1, 1]);
        let x = solve_h90(&t, &mut rng, &ProbeConfig::default()).unwrap();
        assert_eq!(x.len(), 1);
        assert!(x.coeffs()[0].is_constant());
        assert!(!x.coeffs()[0].is_zero());
    }

    #[test]
    fn test_lift_alone_is_not_a_solution() {
        let mut rng = SmallRng::seed_from_u64(4);
        let t = tensor::<Fp<11>>(&mut rng, 3, &[1, 1, 1]);

        assert!(lift_h90(&Polynomial::zero(), &t).unwrap().is_zero());
        assert!(is_h90(&TensorElement::zero(&t), &t));

        // The generator of L is not in the image of φ(σ) = σ - 1, since its trace is nonzero
        // for a modulus with nonzero x^2 coefficient.
        let a = t.left().generator();
        let lifted = lift_h90(&a, &t).unwrap();
        let trace_nonzero = !t.left().modulus().coeff(2).is_zero();
        assert_eq!(is_h90(&lifted, &t), !trace_nonzero);

        assert!(!is_h90(&TensorElement::new(alloc::vec![a]), &t));
    }

    #[test]
    fn test_eval_cycle_is_linear() {
        let mut rng = SmallRng::seed_from_u64(5);
        let t = tensor::<Fp<3>>(&mut rng, 4, &[1, 0, 1]);
        let phi = t.cycle_polynomial();
        let a = t.left().random_element(&mut rng);
        let b = t.left().random_element(&mut rng);
        let sum = eval_cycle(&(&a + &b), &t, phi).unwrap();
        let xa = eval_cycle(&a, &t, phi).unwrap();
        let xb = eval_cycle(&b, &t, phi).unwrap();
        let expected = xa
            .coeffs()
            .iter()
            .zip(xb.coeffs())
            .map(|(u, v)| u + v)
            .collect();
        assert_eq!(sum, TensorElement::new(expected));
        assert!(is_h90(&sum, &t));
    }

    #[test]
    fn test_attempt_ceiling() {
        let mut rng = SmallRng::seed_from_u64(6);
        let t = tensor::<Fp<7>>(&mut rng, 3, &[-2, 1]);
        assert_eq!(
            solve_h90(&t, &mut rng, &ProbeConfig::new(0)),
            Err(EmbedError::DidNotConverge { attempts: 0 })
        );
    }
}
