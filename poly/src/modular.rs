//! Arithmetic modulo a fixed polynomial, with and without a precomputed reversed inverse.

use alloc::vec::Vec;

use ffe_field::Field;
use ffe_util::isqrt;
use num_bigint::BigUint;
use tracing::instrument;

use crate::Polynomial;

impl<F: Field> Polynomial<F> {
    /// Newton iteration for `1 / self mod x^n`.
    ///
    /// Returns `None` when the constant term is zero.
    pub fn inv_series(&self, n: usize) -> Option<Self> {
        let c0_inv = self.constant_term().try_inverse()?;
        if n == 0 {
            return Some(Self::zero());
        }

        let two = Self::constant(F::TWO);
        let mut inv = Self::constant(c0_inv);
        let mut precision = 1;
        while precision < n {
            precision = (2 * precision).min(n);
            // inv <- inv * (2 - self * inv), correct to twice the previous precision.
            let err = &two - &self.mul_low(&inv, precision);
            inv = inv.mul_low(&err, precision);
        }
        Some(inv)
    }

    /// `1 / rev(self) mod x^n`, the reciprocal used by the `_preinv` family.
    ///
    /// Returns `None` for the zero polynomial.
    pub fn reverse_inverse(&self, n: usize) -> Option<Self> {
        self.reverse(self.num_coeffs()).inv_series(n)
    }

    /// Euclidean division using a precomputed `rev_inv = 1 / rev(divisor)`, which must be correct
    /// modulo `x^(deg self - deg divisor + 1)`.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn div_rem_preinv(&self, divisor: &Self, rev_inv: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "Divisor is zero");

        let len = self.num_coeffs();
        let n = divisor.num_coeffs();
        if len < n {
            return (Self::zero(), self.clone());
        }

        let q_len = len - n + 1;
        let q = self.reverse(len).mul_low(rev_inv, q_len).reverse(q_len);
        let r = (self - &q.mul_low(divisor, n - 1)).truncate(n - 1);
        (q, r)
    }

    /// Remainder counterpart of [`Self::div_rem_preinv`].
    #[must_use]
    pub fn rem_preinv(&self, divisor: &Self, rev_inv: &Self) -> Self {
        if self.num_coeffs() < divisor.num_coeffs() {
            return self.clone();
        }
        self.div_rem_preinv(divisor, rev_inv).1
    }

    /// `self * other mod modulus`.
    #[must_use]
    pub fn mulmod(&self, other: &Self, modulus: &Self) -> Self {
        (self * other).rem(modulus)
    }

    /// `self * other mod modulus` for reduced inputs, with `rev_inv = 1 / rev(modulus)` correct
    /// modulo `x^(deg modulus - 1)`.
    #[must_use]
    pub fn mulmod_preinv(&self, other: &Self, modulus: &Self, rev_inv: &Self) -> Self {
        (self * other).rem_preinv(modulus, rev_inv)
    }

    /// `self^exp mod modulus` by square-and-multiply.
    #[must_use]
    pub fn pow_mod(&self, exp: u64, modulus: &Self) -> Self {
        self.pow_mod_preinv(exp, modulus, &modulus.full_reverse_inverse())
    }

    /// [`Self::pow_mod`] with `rev_inv = 1 / rev(modulus)` correct modulo `x^(deg modulus)`.
    #[must_use]
    pub fn pow_mod_preinv(&self, exp: u64, modulus: &Self, rev_inv: &Self) -> Self {
        let bits = (64 - exp.leading_zeros()) as u64;
        self.pow_mod_bits(bits, |j| (exp >> j) & 1 == 1, modulus, rev_inv)
    }

    /// `self^exp mod modulus` for exponents such as `p^k` that overflow a machine word.
    #[must_use]
    pub fn pow_mod_biguint(&self, exp: &BigUint, modulus: &Self) -> Self {
        self.pow_mod_biguint_preinv(exp, modulus, &modulus.full_reverse_inverse())
    }

    /// [`Self::pow_mod_biguint`] with a precomputed `rev_inv`, as in [`Self::pow_mod_preinv`].
    #[must_use]
    pub fn pow_mod_biguint_preinv(&self, exp: &BigUint, modulus: &Self, rev_inv: &Self) -> Self {
        self.pow_mod_bits(exp.bits(), |j| exp.bit(j), modulus, rev_inv)
    }

    fn pow_mod_bits(
        &self,
        bits: u64,
        bit: impl Fn(u64) -> bool,
        modulus: &Self,
        rev_inv: &Self,
    ) -> Self {
        let mut result = Self::one().rem(modulus);
        let mut base = self.rem(modulus);
        for j in 0..bits {
            if bit(j) {
                result = result.mulmod_preinv(&base, modulus, rev_inv);
            }
            if j + 1 < bits {
                base = base.mulmod_preinv(&base, modulus, rev_inv);
            }
        }
        result
    }

    /// `self(g) mod modulus` by Paterson-Stockmeyer baby-step/giant-step evaluation: the powers
    /// `g^0, ..., g^k` with `k ~ sqrt(deg self)` are tabulated once, and the blocks of `k`
    /// coefficients are combined by Horner's rule in `g^k`.
    ///
    /// # Panics
    /// Panics if `modulus` is zero.
    #[must_use]
    pub fn compose_mod(&self, g: &Self, modulus: &Self) -> Self {
        assert!(!modulus.is_zero(), "Modulus is zero");
        self.compose_mod_preinv(g, modulus, &modulus.full_reverse_inverse())
    }

    /// [`Self::compose_mod`] with `rev_inv = 1 / rev(modulus)` correct modulo `x^(deg modulus)`.
    ///
    /// # Panics
    /// Panics if `modulus` is zero.
    #[instrument(level = "debug", skip_all, fields(len = self.num_coeffs()))]
    #[must_use]
    pub fn compose_mod_preinv(&self, g: &Self, modulus: &Self, rev_inv: &Self) -> Self {
        assert!(!modulus.is_zero(), "Modulus is zero");
        if self.is_zero() {
            return Self::zero();
        }

        let g = g.rem(modulus);
        let len = self.num_coeffs();
        let k = isqrt(len - 1) + 1;

        // Baby steps: g^0, ..., g^k.
        let mut baby: Vec<Self> = Vec::with_capacity(k + 1);
        baby.push(Self::one().rem(modulus));
        for j in 1..=k {
            baby.push(baby[j - 1].mulmod_preinv(&g, modulus, rev_inv));
        }
        let giant = baby[k].clone();

        let mut result = Self::zero();
        for block in self.coeffs.chunks(k).rev() {
            let mut acc = result.mulmod_preinv(&giant, modulus, rev_inv);
            for (c, power) in block.iter().zip(&baby) {
                acc += &(power * c);
            }
            result = acc;
        }
        result
    }

    /// `1 / rev(self) mod x^(deg self + 1)`, or zero for the zero polynomial.
    fn full_reverse_inverse(&self) -> Self {
        self.reverse_inverse(self.num_coeffs()).unwrap_or_default()
    }
}
