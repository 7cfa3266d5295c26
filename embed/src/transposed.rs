//! Transposed polynomial products.
//!
//! A linear functional on `k[x] / (P)` is stored as the vector of its values on the monomials
//! `1, x, ..., x^(n-1)`. The routines here are the transposes of multiplication and of reduction
//! modulo `P`, acting on such vectors.

use alloc::vec::Vec;

use ffe_field::{Field, dot_product};
use ffe_poly::Polynomial;

/// `<a, f>`: the functional `a` evaluated on `f`. Missing entries of `a` count as zero.
pub fn inner_product<F: Field>(a: &[F], f: &Polynomial<F>) -> F {
    dot_product(a.iter().copied(), f.coeffs().iter().copied())
}

/// The middle product: `result[i] = sum_t b_t * a[i + t]` for `i` in `0..=m`, reading `a` as
/// zero past its end.
///
/// This is the transpose of multiplication by `b`.
pub fn transposed_mul<F: Field>(a: &[F], b: &Polynomial<F>, m: usize) -> Vec<F> {
    let Some(n) = b.degree() else {
        return F::zero_vec(m + 1);
    };

    let a = Polynomial::from_slice_padded(a, m + n + 1);
    let product = a.mul_low(&b.reverse(n + 1), m + n + 1);
    (0..=m).map(|i| product.coeff(i + n)).collect()
}

/// Extends the functional `a` (length `n = deg modulus`) to the first `m + 1` terms of the linear
/// recurrent sequence defined by the monic `modulus`, i.e. the values of `y -> <a, y mod modulus>`
/// on `1, x, ..., x^m`.
///
/// `rev_inv = 1 / rev(modulus)` must be correct modulo `x^(m - n + 1)`.
pub fn transposed_rem<F: Field>(
    a: &[F],
    modulus: &Polynomial<F>,
    rev_inv: &Polynomial<F>,
    m: usize,
) -> Vec<F> {
    let n = modulus.num_coeffs() - 1;
    let mut seq = F::zero_vec(m + 1);
    for (s, &a_i) in seq.iter_mut().zip(a).take(n) {
        *s = a_i;
    }
    if m < n {
        return seq;
    }

    // The unknown tail u = (s_n, ..., s_m) solves rev(P) * u = -c mod x^(m-n+1), where c holds
    // the contributions of the known head to each recurrence relation.
    let head = &seq[..n];
    let c = Polynomial::from_coeffs(transposed_mul(head, modulus, m - n));
    let tail = -&c.mul_low(rev_inv, m - n + 1);
    for (i, s) in seq[n..].iter_mut().enumerate() {
        *s = tail.coeff(i);
    }
    seq
}

/// The functional `y -> <a, b * y mod modulus>` for a reduced `b`, as a vector of length
/// `deg modulus`. A zero `b` gives the zero functional.
///
/// `rev_inv = 1 / rev(modulus)` must be correct modulo `x^(deg b)`.
pub fn transposed_mulmod<F: Field>(
    a: &[F],
    b: &Polynomial<F>,
    modulus: &Polynomial<F>,
    rev_inv: &Polynomial<F>,
) -> Vec<F> {
    let n = modulus.num_coeffs() - 1;
    let Some(deg_b) = b.degree() else {
        return F::zero_vec(n);
    };
    debug_assert!(deg_b < n, "b must be reduced");

    // b * y has degree at most deg b + n - 1.
    let extended = transposed_rem(a, modulus, rev_inv, deg_b + n - 1);
    transposed_mul(&extended, b, n - 1)
}
