//! Field arithmetic modulo p = 2^256 - 2^32 - 977
mod field_4x64;
use field_4x64::FieldElement4x64;

use crate::FieldBytes;
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// An element in the finite field used for curve coordinates.
///
/// Values are always canonical: any `FieldElement` you can observe is in
/// the range `[0, p)`.
#[derive(Clone, Copy)]
pub struct FieldElement(FieldElement4x64);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self(FieldElement4x64::zero());

    /// Multiplicative identity.
    pub const ONE: Self = Self(FieldElement4x64::one());

    /// Determine if this `FieldElement` is zero.
    ///
    /// # Returns
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_zero(&self) -> Choice {
        self.0.is_zero()
    }

    /// Determine if this `FieldElement` is odd: `self mod 2 == 1`.
    ///
    /// # Returns
    ///
    /// If odd, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_odd(&self) -> Choice {
        self.0.is_odd()
    }

    /// Parses the given byte array as a big-endian field element.
    /// Does not check the result for being in the correct range.
    pub(crate) const fn from_bytes_unchecked(bytes: &[u8; 32]) -> Self {
        Self(FieldElement4x64::from_bytes_unchecked(bytes))
    }

    /// Attempts to parse the given byte array as a big-endian field element.
    ///
    /// Returns `None` if the byte array does not contain an integer in the
    /// range `[0, p)`.
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        FieldElement4x64::from_bytes(bytes).map(Self)
    }

    /// Parses the given byte array as a big-endian integer and reduces it
    /// mod p.
    ///
    /// This is the preferred constructor for values of unknown range:
    /// out-of-range integers are reduced rather than rejected.
    pub fn from_bytes_reduced(bytes: &FieldBytes) -> Self {
        Self(FieldElement4x64::from_bytes_reduced(bytes))
    }

    /// Returns the canonical big-endian encoding of this field element.
    pub fn to_bytes(self) -> FieldBytes {
        self.0.to_bytes()
    }

    /// Generates a uniformly-ish distributed field element from the
    /// provided RNG by reducing 32 random bytes mod p.
    pub fn random(rng: &mut impl RngCore) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self::from_bytes_reduced(&bytes)
    }

    /// Returns -self mod p.
    pub fn negate(&self) -> Self {
        Self(self.0.negate())
    }

    /// Multiplies by a single-limb integer.
    pub fn mul_single(&self, rhs: u64) -> Self {
        Self(self.0.mul_single(rhs))
    }

    /// Returns 2*self.
    pub fn double(&self) -> Self {
        Self(self.0.double())
    }

    /// Returns self * rhs mod p.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self(self.0.mul(&rhs.0))
    }

    /// Returns self * self mod p.
    pub fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Raises the element to the power `2^k`.
    fn pow2k(&self, k: usize) -> Self {
        let mut x = *self;
        for _j in 0..k {
            x = x.square();
        }
        x
    }

    /// Returns the multiplicative inverse of self, if self is non-zero.
    pub fn invert(&self) -> CtOption<Self> {
        // The binary representation of (p - 2) has 5 blocks of 1s, with lengths in
        // { 1, 2, 22, 223 }. Use an addition chain to calculate 2^n - 1 for each block:
        // [1], [2], 3, 6, 9, 11, [22], 44, 88, 176, 220, [223]

        let x2 = self.pow2k(1).mul(self);
        let x3 = x2.pow2k(1).mul(self);
        let x6 = x3.pow2k(3).mul(&x3);
        let x9 = x6.pow2k(3).mul(&x3);
        let x11 = x9.pow2k(2).mul(&x2);
        let x22 = x11.pow2k(11).mul(&x11);
        let x44 = x22.pow2k(22).mul(&x22);
        let x88 = x44.pow2k(44).mul(&x44);
        let x176 = x88.pow2k(88).mul(&x88);
        let x220 = x176.pow2k(44).mul(&x44);
        let x223 = x220.pow2k(3).mul(&x3);

        // The final result is then assembled using a sliding window over the blocks.
        let res = x223
            .pow2k(23)
            .mul(&x22)
            .pow2k(5)
            .mul(self)
            .pow2k(3)
            .mul(&x2)
            .pow2k(2)
            .mul(self);

        CtOption::new(res, !self.is_zero())
    }
}

impl From<u64> for FieldElement {
    fn from(w: u64) -> Self {
        Self(FieldElement4x64::from_u64(w))
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(FieldElement4x64::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        crate::hex::fmt_bytes(f, &self.to_bytes())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FieldElement({})", self)
    }
}

impl Add<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, other: FieldElement) -> FieldElement {
        FieldElement(self.0.add(&other.0))
    }
}

impl Add<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.add(&other.0))
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.add(&other.0))
    }
}

impl AddAssign<FieldElement> for FieldElement {
    fn add_assign(&mut self, other: FieldElement) {
        *self = *self + &other;
    }
}

impl AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, other: &FieldElement) {
        *self = *self + other;
    }
}

impl Sub<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn sub(self, other: FieldElement) -> FieldElement {
        FieldElement(self.0.sub(&other.0))
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.sub(&other.0))
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.sub(&other.0))
    }
}

impl SubAssign<FieldElement> for FieldElement {
    fn sub_assign(&mut self, other: FieldElement) {
        *self = *self - &other;
    }
}

impl SubAssign<&FieldElement> for FieldElement {
    fn sub_assign(&mut self, other: &FieldElement) {
        *self = *self - other;
    }
}

impl Mul<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn mul(self, other: FieldElement) -> FieldElement {
        FieldElement(self.0.mul(&other.0))
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.mul(&other.0))
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.mul(&other.0))
    }
}

impl MulAssign<FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: FieldElement) {
        *self = *self * &rhs;
    }
}

impl MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &FieldElement) {
        *self = *self * rhs;
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invert_two() {
        let two = FieldElement::from(2u64);
        let half = two.invert().unwrap();
        assert_eq!(half * two, FieldElement::ONE);
    }

    #[test]
    fn invert_zero_is_none() {
        assert!(bool::from(FieldElement::ZERO.invert().is_none()));
    }

    #[test]
    fn negate_zero_is_zero() {
        assert_eq!(-FieldElement::ZERO, FieldElement::ZERO);
    }

    #[test]
    fn double_is_add() {
        let x = FieldElement::from(0xdeadbeefu64);
        assert_eq!(x.double(), x + x);
    }
}
