//! Embeddings between extensions of a prime field.
//!
//! Elements of `k[x] / (P)` are [`ffe_poly::Polynomial`]s reduced modulo `P`; an
//! [`ExtensionContext`] holds the modulus and the precomputation shared by every reduction. On
//! top of it this crate provides minimal polynomials of elements, power projection, conversion
//! to and from the dual basis of the trace pairing, the change of basis between a field and one
//! of its subfields, and a Hilbert 90 solver over a cyclic [`Tensor`].

#![no_std]

extern crate alloc;

mod basis_change;
mod config;
mod context;
mod dual;
mod error;
mod h90;
mod minpoly;
mod projection;
mod recurrence;
mod tensor;
mod trace;
mod transposed;

pub use basis_change::*;
pub use config::*;
pub use context::*;
pub use dual::*;
pub use error::*;
pub use h90::*;
pub use minpoly::*;
pub use projection::*;
pub use recurrence::*;
pub use tensor::*;
pub use trace::*;
pub use transposed::*;
