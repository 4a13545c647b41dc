#![cfg_attr(not(feature = "std"), no_std)]
#![allow(non_snake_case)]
#![deny(missing_docs)]
//! Constant-time secp256k1 arithmetic.
//!
//! This crate implements the two prime fields of secp256k1 (the base
//! field and the scalar field), affine and projective curve points,
//! and constant-time scalar multiplication. It is the arithmetic layer
//! a signature scheme would be built on, not a signing library itself:
//! there is no hashing, no encoding beyond big-endian byte strings and
//! no key management.
//!
//! ```
//! use secp256k1_arith::{ProjectivePoint, Scalar, scalar_mul_basepoint};
//!
//! let mut rng = rand::thread_rng();
//! let secret = Scalar::random(&mut rng);
//! let public = scalar_mul_basepoint(&secret);
//! let (x, y) = public.affine_coordinates().unwrap();
//! println!("public key: ({}, {})", x, y);
//! # let _ = (x, y);
//! ```

use core::fmt;

mod affine;
mod field;
mod hex;
pub mod mul;
mod projective;
mod scalar;
mod util;

pub use affine::AffinePoint;
pub use field::FieldElement;
pub use mul::{scalar_mul, scalar_mul_basepoint};
pub use projective::ProjectivePoint;
pub use scalar::Scalar;

/// Re-export of the `rand_core` traits the random constructors take.
pub use rand_core;

/// A 32-byte big-endian serialization of a field or scalar element.
pub type FieldBytes = [u8; 32];

/// b = 7 as a bare limb, for formulas that multiply by the curve
/// constant directly.
pub(crate) const CURVE_EQUATION_B_SINGLE: u64 = 7;

/// The constant term of the curve equation y² = x³ + 7.
pub(crate) const CURVE_EQUATION_B: FieldElement = FieldElement::from_bytes_unchecked(&[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    7,
]);

/// The secp256k1 base point as a projective point.
pub static G: &ProjectivePoint = &ProjectivePoint::GENERATOR;

/// Things that can go wrong when building or unpacking curve points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The coordinate pair does not satisfy the curve equation.
    InvalidPoint,
    /// The point at infinity has no affine coordinates.
    PointAtInfinity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidPoint => write!(f, "coordinates do not satisfy the curve equation"),
            Error::PointAtInfinity => write!(f, "the point at infinity has no affine coordinates"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
