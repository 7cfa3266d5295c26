//! Utilities for testing field implementations.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use ffe_field::{Field, PrimeField64, dot_product};
use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub fn test_inverse<F: Field>()
where
    StandardUniform: Distribution<F>,
{
    assert_eq!(None, F::ZERO.try_inverse());
    assert_eq!(Some(F::ONE), F::ONE.try_inverse());

    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..100 {
        let x: F = rng.random();
        if !x.is_zero() {
            assert_eq!(F::ONE, x.try_inverse().unwrap() * x);
            assert_eq!(x.inverse().inverse(), x);
        }
    }
}

pub fn test_ring_with_eq<F: Field>(zeros: &[F], ones: &[F])
where
    StandardUniform: Distribution<F>,
{
    let mut rng = SmallRng::seed_from_u64(1);
    let x: F = rng.random();
    let y: F = rng.random();
    let z: F = rng.random();

    for &zero in zeros {
        assert_eq!(zero, F::ZERO);
        assert_eq!(x + zero, x);
        assert_eq!(x * zero, F::ZERO);
    }
    for &one in ones {
        assert_eq!(one, F::ONE);
        assert_eq!(x * one, x);
    }

    assert_eq!(x + (-x), F::ZERO);
    assert_eq!(x - y, x + (-y));
    assert_eq!(x + y, y + x);
    assert_eq!(x * y, y * x);
    assert_eq!((x + y) + z, x + (y + z));
    assert_eq!((x * y) * z, x * (y * z));
    assert_eq!(x * (y + z), x * y + x * z);
    assert_eq!(x.double(), x + x);
    assert_eq!(x.square(), x * x);
    assert_eq!(F::TWO, F::ONE + F::ONE);
    assert_eq!(F::NEG_ONE, -F::ONE);

    let mut acc = x;
    acc += y;
    acc -= z;
    acc *= y;
    assert_eq!(acc, (x + y - z) * y);
}

pub fn test_sums_and_products<F: Field>()
where
    StandardUniform: Distribution<F>,
{
    let mut rng = SmallRng::seed_from_u64(1);
    let xs: Vec<F> = (0..16).map(|_| rng.random()).collect();
    let ys: Vec<F> = (0..16).map(|_| rng.random()).collect();

    let sum: F = xs.iter().copied().sum();
    assert_eq!(sum, xs.iter().fold(F::ZERO, |acc, &x| acc + x));
    let product: F = xs.iter().copied().product();
    assert_eq!(product, xs.iter().fold(F::ONE, |acc, &x| acc * x));

    let dot: F = dot_product(xs.iter().copied(), ys.iter().copied());
    let naive = xs.iter().zip(&ys).fold(F::ZERO, |acc, (&x, &y)| acc + x * y);
    assert_eq!(dot, naive);
}

pub fn test_exponentiation<F: Field>()
where
    StandardUniform: Distribution<F>,
{
    let mut rng = SmallRng::seed_from_u64(1);
    let x: F = rng.random();

    assert_eq!(x.exp_u64(0), F::ONE);
    assert_eq!(x.exp_u64(1), x);
    assert_eq!(x.exp_u64(5), x * x * x * x * x);
    assert_eq!(x.exp_biguint(&BigUint::from(5u8)), x.exp_u64(5));

    // x^|F| = x in every finite field.
    assert_eq!(x.exp_biguint(&F::order()), x);

    let powers: Vec<F> = x.powers().take(4).collect();
    assert_eq!(powers, [F::ONE, x, x * x, x * x * x]);
}

pub fn test_from_u64<F: PrimeField64>() {
    let p = F::ORDER_U64;
    assert_eq!(F::from_u64(0), F::ZERO);
    assert_eq!(F::from_u64(1), F::ONE);
    assert_eq!(F::from_u64(p), F::ZERO);
    assert_eq!(F::from_u64(p + 1), F::ONE);
    assert_eq!(F::from_u64(p - 1), F::NEG_ONE);
    assert_eq!(F::from_u64(u64::MAX).as_canonical_u64(), u64::MAX % p);
    assert_eq!(F::order(), BigUint::from(p));
}

pub fn test_serde_canonical<F: PrimeField64>()
where
    StandardUniform: Distribution<F>,
{
    let mut rng = SmallRng::seed_from_u64(1);
    let x: F = rng.random();
    let serialized = serde_json::to_string(&x).expect("serialization");
    let deserialized: F = serde_json::from_str(&serialized).expect("deserialization");
    assert_eq!(deserialized, x);

    // Out-of-range inputs are reduced on the way in.
    let raw = serde_json::to_string(&(F::ORDER_U64 + 2)).expect("serialization");
    let reduced: F = serde_json::from_str(&raw).expect("deserialization");
    assert_eq!(reduced, F::TWO);
}

#[macro_export]
macro_rules! test_field {
    ($field:ty) => {
        mod field_tests {
            #[test]
            fn test_ring_with_eq() {
                let zeros = [<$field as ffe_field::Field>::ZERO, <$field>::new(0)];
                let ones = [<$field as ffe_field::Field>::ONE, <$field>::new(1)];
                $crate::test_ring_with_eq::<$field>(&zeros, &ones);
            }

            #[test]
            fn test_inverse() {
                $crate::test_inverse::<$field>();
            }

            #[test]
            fn test_sums_and_products() {
                $crate::test_sums_and_products::<$field>();
            }

            #[test]
            fn test_exponentiation() {
                $crate::test_exponentiation::<$field>();
            }
        }
    };
}

#[macro_export]
macro_rules! test_prime_field_64 {
    ($field:ty) => {
        mod from_integer_tests {
            #[test]
            fn test_from_u64() {
                $crate::test_from_u64::<$field>();
            }

            #[test]
            fn test_serde_canonical() {
                $crate::test_serde_canonical::<$field>();
            }
        }
    };
}
