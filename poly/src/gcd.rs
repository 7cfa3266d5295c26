use core::mem;

use ffe_field::Field;

use crate::Polynomial;

/// Output of [`Polynomial::hgcd`].
///
/// `matrix` is the product of the quotient matrices `[[q_i, 1], [1, 0]]` of the Euclidean steps
/// taken, so that `(a, b)^T = matrix * (A, B)^T` where `(a, b)` are the inputs and `(A, B)` the
/// remainders returned here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HalfGcd<F: Field> {
    pub matrix: [[Polynomial<F>; 2]; 2],
    pub a: Polynomial<F>,
    pub b: Polynomial<F>,
}

impl<F: Field> Polynomial<F> {
    /// Extended Euclid. Returns `(g, s, t)` with `g = s * self + t * other` and `g` the monic gcd,
    /// or all zeros when both inputs vanish.
    pub fn xgcd(&self, other: &Self) -> (Self, Self, Self) {
        let (mut r0, mut r1) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (Self::one(), Self::zero());
        let (mut t0, mut t1) = (Self::zero(), Self::one());

        while !r1.is_zero() {
            let (q, r) = r0.div_rem(&r1);
            r0 = mem::replace(&mut r1, r);
            let s = &s0 - &(&q * &s1);
            s0 = mem::replace(&mut s1, s);
            let t = &t0 - &(&q * &t1);
            t0 = mem::replace(&mut t1, t);
        }

        if r0.is_zero() {
            return (Self::zero(), Self::zero(), Self::zero());
        }
        let lead_inv = r0.leading_coeff().inverse();
        (&r0 * &lead_inv, &s0 * &lead_inv, &t0 * &lead_inv)
    }

    /// The monic greatest common divisor; zero when both inputs are zero.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let r = a.rem(&b);
            a = mem::replace(&mut b, r);
        }
        a.make_monic()
    }

    /// The inverse of `self` modulo `modulus`, if `self` is a unit there.
    pub fn inverse_mod(&self, modulus: &Self) -> Option<Self> {
        let (g, s, _) = self.rem(modulus).xgcd(modulus);
        g.is_one().then(|| s.rem(modulus))
    }

    /// Half extended GCD: runs Euclidean steps on `(self, other)` until the second remainder has
    /// fewer than `ceil(len(self) / 2)` coefficients, so that the returned remainders satisfy
    /// `len(A) >= ceil(len(self) / 2) > len(B)`.
    ///
    /// Each step is a schoolbook division, so the cost is quadratic in the input length.
    ///
    /// # Panics
    /// Panics unless `len(self) > len(other)`.
    pub fn hgcd(&self, other: &Self) -> HalfGcd<F> {
        assert!(
            self.num_coeffs() > other.num_coeffs(),
            "hgcd expects len(a) > len(b)"
        );

        let half = self.num_coeffs().div_ceil(2);
        let (mut a, mut b) = (self.clone(), other.clone());
        let [[mut m00, mut m01], [mut m10, mut m11]] =
            [[Self::one(), Self::zero()], [Self::zero(), Self::one()]];

        while b.num_coeffs() >= half {
            let (q, r) = a.div_rem(&b);
            a = mem::replace(&mut b, r);

            let new_m00 = &(&m00 * &q) + &m01;
            m01 = mem::replace(&mut m00, new_m00);
            let new_m10 = &(&m10 * &q) + &m11;
            m11 = mem::replace(&mut m10, new_m10);
        }

        HalfGcd {
            matrix: [[m00, m01], [m10, m11]],
            a,
            b,
        }
    }
}
