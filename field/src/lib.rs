//! Finite field traits and a const-generic prime field.

#![no_std]

extern crate alloc;

mod exponentiation;
mod field;
mod helpers;
mod prime_field;

pub use exponentiation::*;
pub use field::*;
pub use helpers::*;
pub use prime_field::*;
