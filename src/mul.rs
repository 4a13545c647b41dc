//! Scalar multiplication

use crate::{AffinePoint, ProjectivePoint, Scalar};
use core::ops::{Mul, MulAssign};
use subtle::ConditionallySelectable;

/// Multiplies `point` by `scalar` in constant time.
///
/// The ladder walks the 256 scalar bits from the most significant end.
/// Each step doubles the accumulator, computes the sum with `point`,
/// and keeps one of the two via a constant-time select, so the sequence
/// of field operations does not depend on the scalar value.
pub fn scalar_mul(scalar: &Scalar, point: &ProjectivePoint) -> ProjectivePoint {
    let mut acc = ProjectivePoint::IDENTITY;

    for i in (0..256).rev() {
        acc = acc.double();
        let sum = acc + point;
        acc = ProjectivePoint::conditional_select(&acc, &sum, scalar.bit(i));
    }

    acc
}

/// Multiplies the secp256k1 base point by `scalar` in constant time.
///
/// Same ladder as [`scalar_mul`] but uses mixed addition against the
/// affine generator, saving a few field multiplications per step.
pub fn scalar_mul_basepoint(scalar: &Scalar) -> ProjectivePoint {
    let mut acc = ProjectivePoint::IDENTITY;

    for i in (0..256).rev() {
        acc = acc.double();
        let sum = acc + AffinePoint::GENERATOR;
        acc = ProjectivePoint::conditional_select(&acc, &sum, scalar.bit(i));
    }

    acc
}

impl Mul<Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: Scalar) -> ProjectivePoint {
        scalar_mul(&other, &self)
    }
}

impl Mul<&Scalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        scalar_mul(other, self)
    }
}

impl Mul<&Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        scalar_mul(other, &self)
    }
}

impl MulAssign<Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = scalar_mul(&rhs, self);
    }
}

impl MulAssign<&Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = scalar_mul(rhs, self);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_times_generator_is_identity() {
        assert_eq!(
            scalar_mul(&Scalar::ZERO, &ProjectivePoint::GENERATOR),
            ProjectivePoint::IDENTITY
        );
        assert_eq!(scalar_mul_basepoint(&Scalar::ZERO), ProjectivePoint::IDENTITY);
    }

    #[test]
    fn one_times_generator_is_generator() {
        assert_eq!(
            scalar_mul(&Scalar::ONE, &ProjectivePoint::GENERATOR),
            ProjectivePoint::GENERATOR
        );
        assert_eq!(scalar_mul_basepoint(&Scalar::ONE), ProjectivePoint::GENERATOR);
    }

    #[test]
    fn two_times_generator_is_double() {
        let two = Scalar::from(2u64);
        assert_eq!(scalar_mul_basepoint(&two), ProjectivePoint::GENERATOR.double());
    }

    #[test]
    fn anything_times_identity_is_identity() {
        let k = Scalar::from(0xDEAD_BEEFu64);
        assert_eq!(
            scalar_mul(&k, &ProjectivePoint::IDENTITY),
            ProjectivePoint::IDENTITY
        );
    }
}
