use alloc::vec::Vec;

use ffe_field::Field;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};

use crate::Polynomial;

// In order to use this auxiliary functionality, activate the `test-utils`
// feature

/// Returns a random polynomial of the exact given degree.
pub fn rand_poly<F: Field, R: Rng>(rng: &mut R, degree: usize) -> Polynomial<F>
where
    StandardUniform: Distribution<F>,
{
    let mut coeffs: Vec<F> = (0..degree).map(|_| rng.random()).collect();

    let mut leading_coeff = F::ZERO;

    while leading_coeff == F::ZERO {
        leading_coeff = rng.random();
    }

    coeffs.push(leading_coeff);

    Polynomial::from_coeffs(coeffs)
}

/// Builds a polynomial from small signed integer coefficients, lowest degree first.
pub fn poly_from_i64<F: Field>(coeffs: &[i64]) -> Polynomial<F> {
    Polynomial::from_coeffs(
        coeffs
            .iter()
            .map(|&c| {
                let value = F::from_u64(c.unsigned_abs());
                if c < 0 { -value } else { value }
            })
            .collect(),
    )
}
