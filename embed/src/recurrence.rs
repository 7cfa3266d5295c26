use ffe_field::Field;
use ffe_poly::{HalfGcd, Polynomial};

/// The monic minimal polynomial, of degree at most `d`, of a linear recurrent sequence given by
/// its first `2d` terms.
///
/// The generator is read off the half extended GCD of `x^(2d)` and `sum s_i x^i`: the top-left
/// entry of the quotient matrix, reversed by its own length and made monic. An all-zero prefix
/// yields the polynomial `1`.
///
/// # Panics
/// Panics if `seq` has fewer than `2d` terms.
pub fn minpoly_seq<F: Field>(seq: &[F], d: usize) -> Polynomial<F> {
    let len = 2 * d;
    assert!(seq.len() >= len, "need 2d terms to recover a degree-d recurrence");

    let series = Polynomial::from_coeffs(seq[..len].to_vec());
    if series.is_zero() {
        return Polynomial::one();
    }

    let HalfGcd { matrix, .. } = Polynomial::monomial(F::ONE, len).hgcd(&series);
    let [[continuant, _], _] = matrix;
    continuant.reverse(continuant.num_coeffs()).make_monic()
}
