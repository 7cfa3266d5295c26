//! Various simple integer utilities.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Computes `ceil(a / b)`. Assumes `a + b` does not overflow.
#[must_use]
pub const fn ceil_div_usize(a: usize, b: usize) -> usize {
    a.div_ceil(b)
}

/// Integer square root: the largest `r` with `r * r <= n`.
#[must_use]
pub const fn isqrt(n: usize) -> usize {
    n.isqrt()
}

#[inline(always)]
pub const fn relatively_prime_u64(mut u: u64, mut v: u64) -> bool {
    // Check that neither input is 0.
    if u == 0 || v == 0 {
        return false;
    }

    // Check divisibility by 2.
    if (u | v) & 1 == 0 {
        return false;
    }

    // Remove factors of 2 from `u` and `v`
    u >>= u.trailing_zeros();
    if u == 1 {
        return true;
    }

    while v != 0 {
        v >>= v.trailing_zeros();
        if v == 1 {
            return true;
        }

        // Ensure u <= v
        if u > v {
            core::mem::swap(&mut u, &mut v);
        }

        v -= u
    }
    // If we made it through the loop, at no point is u or v equal to 1 and so the gcd
    // must be greater than 1.
    false
}

/// Computes `a^{-1} mod n` with the extended Euclidean algorithm.
///
/// Returns `None` when `gcd(a, n) != 1` or `n < 2`.
#[must_use]
pub const fn inverse_mod_u64(a: u64, n: u64) -> Option<u64> {
    if n < 2 {
        return None;
    }
    let (mut old_r, mut r) = ((a % n) as i128, n as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(n as i128) as u64)
}

/// Returns the distinct prime divisors of `n`, in increasing order.
#[must_use]
pub fn prime_divisors_u64(mut n: u64) -> Vec<u64> {
    let mut primes = Vec::new();
    let mut d = 2;

    while d <= n / d {
        if n.is_multiple_of(d) {
            primes.push(d);
            while n.is_multiple_of(d) {
                n /= d;
            }
        }
        d += 1;
    }

    if n > 1 {
        primes.push(n);
    }

    primes
}

/// Multiplicative order of `p` modulo `n`: the least `k >= 1` with `p^k = 1 mod n`.
///
/// Returns `None` if `n == 0` or `p` is not invertible modulo `n`.
#[must_use]
pub fn multiplicative_order(p: u64, n: u64) -> Option<u64> {
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(1);
    }
    if !relatively_prime_u64(p % n, n) {
        return None;
    }

    let base = (p % n) as u128;
    let modulus = n as u128;
    let mut acc = base;
    let mut k = 1;
    while acc != 1 {
        acc = acc * base % modulus;
        k += 1;
    }
    Some(k)
}
