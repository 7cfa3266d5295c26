use core::fmt;
use core::fmt::{Debug, Display, Formatter};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ffe_util::inverse_mod_u64;
use num_bigint::BigUint;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};

use crate::{Field, PrimeField64};

/// The prime field `F_p` for a prime `p = P < 2^63`, chosen at compile time.
///
/// Primality of `P` is the caller's responsibility; the range is checked when an element is
/// first constructed.
///
/// Deserialization reduces the incoming integer, so every value stays canonical.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
#[repr(transparent)]
pub struct Fp<const P: u64> {
    /// Always in `[0, P)`.
    value: u64,
}

impl<const P: u64> Fp<P> {
    /// Reduce `value` modulo `P`.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        const { assert!(P > 1 && P < 1 << 63, "the modulus must lie in [2, 2^63)") };
        Self { value: value % P }
    }

    /// Convert a constant u64 array into a constant `Fp` array.
    #[must_use]
    pub const fn new_array<const N: usize>(input: [u64; N]) -> [Self; N] {
        let mut output = [Self { value: 0 }; N];
        let mut i = 0;
        while i < N {
            output[i] = Self::new(input[i]);
            i += 1;
        }
        output
    }
}

impl<const P: u64> From<u64> for Fp<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const P: u64> From<Fp<P>> for u64 {
    fn from(x: Fp<P>) -> Self {
        x.value
    }
}

impl<const P: u64> Display for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl<const P: u64> Debug for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.value, f)
    }
}

impl<const P: u64> Distribution<Fp<P>> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp<P> {
        Fp::new(rng.random_range(0..P))
    }
}

impl<const P: u64> Field for Fp<P> {
    const ZERO: Self = Self::new(0);
    const ONE: Self = Self::new(1);
    const TWO: Self = Self::new(2);
    const NEG_ONE: Self = Self::new(P - 1);

    #[inline]
    fn from_u64(n: u64) -> Self {
        Self::new(n)
    }

    fn try_inverse(&self) -> Option<Self> {
        inverse_mod_u64(self.value, P).map(|value| Self { value })
    }

    fn order() -> BigUint {
        P.into()
    }
}

impl<const P: u64> PrimeField64 for Fp<P> {
    const ORDER_U64: u64 = P;

    #[inline]
    fn as_canonical_u64(&self) -> u64 {
        self.value
    }
}

impl<const P: u64> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // Both summands are below 2^63, so the sum cannot overflow.
        let sum = self.value + rhs.value;
        Self {
            value: if sum >= P { sum - P } else { sum },
        }
    }
}

impl<const P: u64> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let value = if self.value >= rhs.value {
            self.value - rhs.value
        } else {
            self.value + (P - rhs.value)
        };
        Self { value }
    }
}

impl<const P: u64> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl<const P: u64> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let prod = self.value as u128 * rhs.value as u128;
        Self {
            value: (prod % P as u128) as u64,
        }
    }
}

impl<const P: u64> Div for Fp<P> {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse()
    }
}

impl<const P: u64> AddAssign for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const P: u64> SubAssign for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const P: u64> MulAssign for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const P: u64> DivAssign for Fp<P> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<const P: u64> Sum for Fp<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<const P: u64> Product for Fp<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}
