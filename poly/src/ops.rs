use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Sub, SubAssign};

use ffe_field::Field;
use itertools::{EitherOrBoth, Itertools};

use crate::Polynomial;

impl<F: Field> Add<&Polynomial<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: &Polynomial<F>) -> Polynomial<F> {
        if self.is_zero() {
            return other.clone();
        } else if other.is_zero() {
            return self.clone();
        };

        let coeffs = self
            .coeffs
            .iter()
            .zip_longest(&other.coeffs)
            .map(|pair| match pair {
                EitherOrBoth::Both(&a, &b) => a + b,
                EitherOrBoth::Left(&a) | EitherOrBoth::Right(&a) => a,
            })
            .collect();

        Polynomial::from_coeffs(coeffs)
    }
}

impl<F: Field> AddAssign<&Polynomial<F>> for Polynomial<F> {
    fn add_assign(&mut self, other: &Polynomial<F>) {
        *self = &*self + other;
    }
}

impl<F: Field> Neg for &Polynomial<F> {
    type Output = Polynomial<F>;

    #[inline]
    fn neg(self) -> Polynomial<F> {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| -*c).collect(),
        }
    }
}

impl<F: Field> Sub<&Polynomial<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, other: &Polynomial<F>) -> Polynomial<F> {
        self + &(-other)
    }
}

impl<F: Field> SubAssign<&Polynomial<F>> for Polynomial<F> {
    fn sub_assign(&mut self, other: &Polynomial<F>) {
        *self = &*self - other;
    }
}

impl<F: Field> Mul<&Polynomial<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, other: &Polynomial<F>) -> Polynomial<F> {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }
        self.mul_low(other, self.coeffs.len() + other.coeffs.len() - 1)
    }
}

impl<F: Field> MulAssign<&Polynomial<F>> for Polynomial<F> {
    fn mul_assign(&mut self, other: &Polynomial<F>) {
        *self = &*self * other;
    }
}

impl<F: Field> Div<&Polynomial<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    /// Exact division.
    ///
    /// # Panics
    /// Panics if `other` is zero or does not divide `self`.
    fn div(self, other: &Polynomial<F>) -> Polynomial<F> {
        let (q, r) = self.div_rem(other);
        assert!(
            r.is_zero(),
            "Polynomial division failed, remainder is not zero"
        );
        q
    }
}

impl<F: Field> Rem<&Polynomial<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn rem(self, other: &Polynomial<F>) -> Polynomial<F> {
        Polynomial::rem(self, other)
    }
}

impl<F: Field> Sum<Polynomial<F>> for Polynomial<F> {
    fn sum<I: Iterator<Item = Polynomial<F>>>(iter: I) -> Self {
        iter.fold(Polynomial::zero(), |acc, p| &acc + &p)
    }
}

impl<F: Field> Product<Polynomial<F>> for Polynomial<F> {
    fn product<I: Iterator<Item = Polynomial<F>>>(iter: I) -> Self {
        iter.fold(Polynomial::one(), |acc, p| &acc * &p)
    }
}

impl<F: Field> Add<&F> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: &F) -> Polynomial<F> {
        self + &Polynomial::constant(*other)
    }
}

impl<F: Field> Sub<&F> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, other: &F) -> Polynomial<F> {
        self - &Polynomial::constant(*other)
    }
}

impl<F: Field> Mul<&F> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, other: &F) -> Polynomial<F> {
        if other.is_zero() {
            return Polynomial::zero();
        }
        Polynomial {
            coeffs: self.coeffs.iter().map(|&c| c * *other).collect(),
        }
    }
}
