use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::BigUint;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::exponentiation::{exp_biguint_by_squaring, exp_u64_by_squaring};

/// A finite field.
///
/// Every implementor is a plain `Copy` value; all elements are kept in canonical form so that
/// the derived equality and hashing are the field equality.
pub trait Field:
    'static
    + Copy
    + Default
    + Eq
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Neg<Output = Self>
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + Sum
    + Product
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const NEG_ONE: Self;

    /// Embed an integer, reducing it modulo the characteristic.
    fn from_u64(n: u64) -> Self;

    /// The multiplicative inverse of `self`, or `None` for zero.
    fn try_inverse(&self) -> Option<Self>;

    /// The number of elements of the field.
    fn order() -> BigUint;

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    #[must_use]
    #[inline]
    fn square(&self) -> Self {
        *self * *self
    }

    #[must_use]
    #[inline]
    fn double(&self) -> Self {
        *self + *self
    }

    #[must_use]
    #[inline]
    fn exp_u64(&self, power: u64) -> Self {
        exp_u64_by_squaring(*self, power)
    }

    #[must_use]
    fn exp_biguint(&self, power: &BigUint) -> Self {
        exp_biguint_by_squaring(*self, power)
    }

    /// The multiplicative inverse of `self`.
    ///
    /// # Panics
    /// Panics if `self` is zero.
    #[must_use]
    fn inverse(&self) -> Self {
        self.try_inverse().expect("Tried to invert zero")
    }

    /// Allocate a vector of zero elements of length `len`.
    #[must_use]
    #[inline]
    fn zero_vec(len: usize) -> Vec<Self> {
        vec![Self::ZERO; len]
    }

    /// `1, x, x^2, ...` as an endless iterator.
    fn powers(&self) -> Powers<Self> {
        Powers {
            base: *self,
            current: Self::ONE,
        }
    }
}

/// A prime field whose order fits in a `u64`.
pub trait PrimeField64: Field + Ord {
    const ORDER_U64: u64;

    /// Return the representative of `self` in `[0, ORDER_U64)`.
    fn as_canonical_u64(&self) -> u64;
}

/// An iterator over the powers of a field element.
#[derive(Clone, Debug)]
pub struct Powers<F> {
    pub base: F,
    pub current: F,
}

impl<F: Field> Iterator for Powers<F> {
    type Item = F;

    fn next(&mut self) -> Option<F> {
        let result = self.current;
        self.current *= self.base;
        Some(result)
    }
}
