use num_bigint::BigUint;

use crate::Field;

pub fn exp_u64_by_squaring<F: Field>(val: F, power: u64) -> F {
    let mut current = val;
    let mut product = F::ONE;

    for j in 0..bits_u64(power) {
        if (power >> j) & 1 != 0 {
            product *= current;
        }
        current = current.square();
    }
    product
}

/// Square-and-multiply for exponents that do not fit in a machine word, such as `p^k - 1`.
pub fn exp_biguint_by_squaring<F: Field>(val: F, power: &BigUint) -> F {
    let mut current = val;
    let mut product = F::ONE;

    for j in 0..power.bits() {
        if power.bit(j) {
            product *= current;
        }
        current = current.square();
    }
    product
}

const fn bits_u64(n: u64) -> usize {
    (64 - n.leading_zeros()) as usize
}
