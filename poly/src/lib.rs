//! Dense univariate polynomials over a finite field.

#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use ffe_field::Field;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};

mod gcd;
mod irreducible;
mod modular;
mod ops;

pub use gcd::*;


#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Polynomial stored as a list of coefficients.
///
/// The representation is normalized: the last stored coefficient is never zero, and the zero
/// polynomial has no coefficients at all. Deserialization normalizes as well.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(from = "Vec<F>", into = "Vec<F>", bound = "")]
pub struct Polynomial<F: Field> {
    // The coefficient of `x^i` is stored at location `i` in `self.coeffs`.
    coeffs: Vec<F>,
}

impl<F: Field> From<Vec<F>> for Polynomial<F> {
    fn from(coeffs: Vec<F>) -> Self {
        Self::from_coeffs(coeffs)
    }
}

impl<F: Field> From<Polynomial<F>> for Vec<F> {
    fn from(poly: Polynomial<F>) -> Self {
        poly.coeffs
    }
}

impl<F: Field> Polynomial<F> {
    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<F> {
        self.coeffs
    }

    /// Returns the zero polynomial
    pub const fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    /// Returns the constant polynomial 1
    pub fn one() -> Self {
        Self::constant(F::ONE)
    }

    /// Returns the constant polynomial with the given constant term
    pub fn constant(constant: F) -> Self {
        Self::from_coeffs(vec![constant])
    }

    /// Returns the monic polynomial of degree 1 with no constant term
    pub fn x() -> Self {
        Self {
            coeffs: vec![F::ZERO, F::ONE],
        }
    }

    /// Returns `c * x^n`.
    pub fn monomial(c: F, n: usize) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        let mut coeffs = F::zero_vec(n + 1);
        coeffs[n] = c;
        Self { coeffs }
    }

    pub fn from_coeffs(coeffs: Vec<F>) -> Self {
        Self { coeffs }.truncate_leading_zeros()
    }

    /// Builds a polynomial from the first `len` entries of `coeffs`, padding with zeros when the
    /// slice is shorter.
    pub fn from_slice_padded(coeffs: &[F], len: usize) -> Self {
        let mut coeffs = coeffs[..len.min(coeffs.len())].to_vec();
        coeffs.resize(len, F::ZERO);
        Self::from_coeffs(coeffs)
    }

    pub fn constant_term(&self) -> F {
        self.coeff(0)
    }

    /// The coefficient of `x^i`, which is zero past the degree.
    pub fn coeff(&self, i: usize) -> F {
        self.coeffs.get(i).copied().unwrap_or(F::ZERO)
    }

    /// The leading coefficient, or zero for the zero polynomial.
    pub fn leading_coeff(&self) -> F {
        self.coeffs.last().copied().unwrap_or(F::ZERO)
    }

    fn truncate_leading_zeros(mut self) -> Self {
        while self.coeffs.last().is_some_and(|c| c.is_zero()) {
            self.coeffs.pop();
        }
        self
    }

    // Horner's method for polynomial evaluation
    fn horner_evaluate(poly_coeffs: &[F], point: &F) -> F {
        poly_coeffs
            .iter()
            .rfold(F::ZERO, move |result, coeff| result * *point + *coeff)
    }

    pub fn evaluate(&self, point: &F) -> F {
        Self::horner_evaluate(&self.coeffs, point)
    }

    pub fn degree(&self) -> Option<usize> {
        if self.is_zero() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    /// Number of stored coefficients, i.e. `degree + 1`, or `0` for the zero polynomial.
    pub fn num_coeffs(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    pub fn is_monic(&self) -> bool {
        self.coeffs.last().is_some_and(|c| c.is_one())
    }

    /// Divides by the leading coefficient. The zero polynomial is returned unchanged.
    #[must_use]
    pub fn make_monic(&self) -> Self {
        match self.coeffs.last() {
            None => Self::zero(),
            Some(lead) if lead.is_one() => self.clone(),
            Some(lead) => self * &lead.inverse(),
        }
    }

    /// `self mod x^n`.
    #[must_use]
    pub fn truncate(&self, n: usize) -> Self {
        Self::from_coeffs(self.coeffs[..n.min(self.coeffs.len())].to_vec())
    }

    /// `x^(n-1) * self(1/x)` for the first `n` coefficients of `self`: coefficient `i` of the
    /// result is coefficient `n - 1 - i` of `self`.
    #[must_use]
    pub fn reverse(&self, n: usize) -> Self {
        Self::from_coeffs((0..n).map(|i| self.coeff(n - 1 - i)).collect())
    }

    /// `self * x^k`.
    #[must_use]
    pub fn shift_left(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = F::zero_vec(k);
        coeffs.extend_from_slice(&self.coeffs);
        Self { coeffs }
    }

    /// `self div x^k`.
    #[must_use]
    pub fn shift_right(&self, k: usize) -> Self {
        Self {
            coeffs: self.coeffs.get(k..).map(<[F]>::to_vec).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn derivative(&self) -> Self {
        Self::from_coeffs(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, &c)| F::from_u64(i as u64) * c)
                .collect(),
        )
    }

    /// `(self * other) mod x^n`, computing only the low coefficients.
    #[must_use]
    pub fn mul_low(&self, other: &Self, n: usize) -> Self {
        if self.is_zero() || other.is_zero() || n == 0 {
            return Self::zero();
        }
        let len = n.min(self.coeffs.len() + other.coeffs.len() - 1);
        let mut coeffs = F::zero_vec(len);
        for (i, &a) in self.coeffs.iter().take(len).enumerate() {
            for (j, &b) in other.coeffs.iter().take(len - i).enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Self::from_coeffs(coeffs)
    }

    /// Euclidean division. Returns `(q, r)` with `self = q * divisor + r` and
    /// `deg r < deg divisor`.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "Divisor is zero");

        let d_deg = divisor.coeffs.len() - 1;

        if self.coeffs.len() < divisor.coeffs.len() {
            return (Self::zero(), self.clone());
        }

        let mut quotient_coeffs = F::zero_vec(self.coeffs.len() - d_deg);
        let mut remainder = self.coeffs.clone();

        let divisor_leading_coeff_inv = divisor.leading_coeff().inverse();

        for cur_q_degree in (0..quotient_coeffs.len()).rev() {
            let cur_q_coeff = remainder[cur_q_degree + d_deg] * divisor_leading_coeff_inv;
            quotient_coeffs[cur_q_degree] = cur_q_coeff;
            if cur_q_coeff.is_zero() {
                continue;
            }
            for (i, &div_coeff) in divisor.coeffs.iter().enumerate() {
                remainder[cur_q_degree + i] -= cur_q_coeff * div_coeff;
            }
        }
        remainder.truncate(d_deg);

        (Self::from_coeffs(quotient_coeffs), Self::from_coeffs(remainder))
    }

    /// Remainder of the Euclidean division by `divisor`.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    #[must_use]
    pub fn rem(&self, divisor: &Self) -> Self {
        if self.coeffs.len() < divisor.coeffs.len() {
            return self.clone();
        }
        self.div_rem(divisor).1
    }

    /// A uniformly random polynomial of degree `< len`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Self
    where
        StandardUniform: Distribution<F>,
    {
        Self::from_coeffs((0..len).map(|_| rng.random()).collect())
    }

    /// A uniformly random monic polynomial of exact degree `degree`.
    pub fn random_monic<R: Rng + ?Sized>(rng: &mut R, degree: usize) -> Self
    where
        StandardUniform: Distribution<F>,
    {
        let mut coeffs: Vec<F> = (0..degree).map(|_| rng.random()).collect();
        coeffs.push(F::ONE);
        Self { coeffs }
    }
}
