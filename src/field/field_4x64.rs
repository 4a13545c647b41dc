//! 64-bit limb implementation of arithmetic modulo the curve prime.

use crate::util::{adc64, mac64, sbb64};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// The field modulus p = 2^256 - 2^32 - 977 in little-endian limbs.
const MODULUS: [u64; 4] = [
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// 2^256 - p = 2^32 + 977. The high half of a wide product folds through
/// this constant instead of going through a full division.
const C: u64 = 0x1_0000_03D1;

const fn load_be(bytes: &[u8; 32], i: usize) -> u64 {
    (bytes[i] as u64) << 56
        | (bytes[i + 1] as u64) << 48
        | (bytes[i + 2] as u64) << 40
        | (bytes[i + 3] as u64) << 32
        | (bytes[i + 4] as u64) << 24
        | (bytes[i + 5] as u64) << 16
        | (bytes[i + 6] as u64) << 8
        | (bytes[i + 7] as u64)
}

/// An integer modulo p stored as four little-endian `u64` limbs.
///
/// The value is kept canonical (fully reduced) at all times. Operations
/// re-canonicalize with a single branchless conditional subtraction or
/// addition of the modulus.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldElement4x64([u64; 4]);

impl FieldElement4x64 {
    pub const fn zero() -> Self {
        Self([0, 0, 0, 0])
    }

    pub const fn one() -> Self {
        Self([1, 0, 0, 0])
    }

    pub const fn from_u64(w: u64) -> Self {
        Self([w, 0, 0, 0])
    }

    /// Parses a big-endian byte array without checking the range.
    ///
    /// Must only be called with values known to be below the modulus.
    pub const fn from_bytes_unchecked(bytes: &[u8; 32]) -> Self {
        Self([
            load_be(bytes, 24),
            load_be(bytes, 16),
            load_be(bytes, 8),
            load_be(bytes, 0),
        ])
    }

    /// Parses a big-endian byte array, returning `None` if the value is
    /// not in the range `[0, p)`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let w = Self::from_bytes_unchecked(bytes);
        let (_, borrow) = w.sub_modulus();
        // A borrow means the value was below the modulus.
        CtOption::new(w, Choice::from((borrow as u8) & 1))
    }

    /// Parses a big-endian byte array, reducing the value mod p.
    pub fn from_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self::sub_with_carry(&Self::from_bytes_unchecked(bytes).0, 0)
    }

    /// Returns the canonical big-endian encoding.
    pub fn to_bytes(self) -> [u8; 32] {
        let mut ret = [0u8; 32];
        ret[0..8].copy_from_slice(&self.0[3].to_be_bytes());
        ret[8..16].copy_from_slice(&self.0[2].to_be_bytes());
        ret[16..24].copy_from_slice(&self.0[1].to_be_bytes());
        ret[24..32].copy_from_slice(&self.0[0].to_be_bytes());
        ret
    }

    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::zero())
    }

    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Subtracts the modulus, returning the raw limbs and final borrow.
    fn sub_modulus(&self) -> ([u64; 4], u64) {
        let (r0, borrow) = sbb64(self.0[0], MODULUS[0], 0);
        let (r1, borrow) = sbb64(self.0[1], MODULUS[1], borrow);
        let (r2, borrow) = sbb64(self.0[2], MODULUS[2], borrow);
        let (r3, borrow) = sbb64(self.0[3], MODULUS[3], borrow);
        ([r0, r1, r2, r3], borrow)
    }

    /// Canonicalizes `w + carry * 2^256`, which must be below 2p.
    fn sub_with_carry(w: &[u64; 4], carry: u64) -> Self {
        let (r0, borrow) = sbb64(w[0], MODULUS[0], 0);
        let (r1, borrow) = sbb64(w[1], MODULUS[1], borrow);
        let (r2, borrow) = sbb64(w[2], MODULUS[2], borrow);
        let (r3, borrow) = sbb64(w[3], MODULUS[3], borrow);
        let (_, borrow) = sbb64(carry, 0, borrow);
        // A final borrow means the value was already below the modulus.
        let underflow = Choice::from((borrow as u8) & 1);
        Self::conditional_select(&Self([r0, r1, r2, r3]), &Self(*w), underflow)
    }

    pub fn add(&self, rhs: &Self) -> Self {
        let (w0, carry) = adc64(self.0[0], rhs.0[0], 0);
        let (w1, carry) = adc64(self.0[1], rhs.0[1], carry);
        let (w2, carry) = adc64(self.0[2], rhs.0[2], carry);
        let (w3, carry) = adc64(self.0[3], rhs.0[3], carry);
        Self::sub_with_carry(&[w0, w1, w2, w3], carry)
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        let (r0, borrow) = sbb64(self.0[0], rhs.0[0], 0);
        let (r1, borrow) = sbb64(self.0[1], rhs.0[1], borrow);
        let (r2, borrow) = sbb64(self.0[2], rhs.0[2], borrow);
        let (r3, borrow) = sbb64(self.0[3], rhs.0[3], borrow);
        // Add the modulus back when the subtraction wrapped.
        let underflow = Choice::from((borrow as u8) & 1);
        let addend = Self::conditional_select(&Self::zero(), &Self(MODULUS), underflow);
        let (w0, carry) = adc64(r0, addend.0[0], 0);
        let (w1, carry) = adc64(r1, addend.0[1], carry);
        let (w2, carry) = adc64(r2, addend.0[2], carry);
        let (w3, _) = adc64(r3, addend.0[3], carry);
        Self([w0, w1, w2, w3])
    }

    pub fn negate(&self) -> Self {
        Self::zero().sub(self)
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        Self::reduce_wide(&self.mul_wide(rhs))
    }

    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Multiplies by a single limb.
    pub fn mul_single(&self, rhs: u64) -> Self {
        let (w0, carry) = mac64(0, self.0[0], rhs, 0);
        let (w1, carry) = mac64(0, self.0[1], rhs, carry);
        let (w2, carry) = mac64(0, self.0[2], rhs, carry);
        let (w3, w4) = mac64(0, self.0[3], rhs, carry);
        Self::reduce_wide(&[w0, w1, w2, w3, w4, 0, 0, 0])
    }

    /// Schoolbook 256x256 -> 512 bit multiplication.
    fn mul_wide(&self, rhs: &Self) -> [u64; 8] {
        let a = &self.0;
        let b = &rhs.0;

        let (w0, carry) = mac64(0, a[0], b[0], 0);
        let (w1, carry) = mac64(0, a[0], b[1], carry);
        let (w2, carry) = mac64(0, a[0], b[2], carry);
        let (w3, w4) = mac64(0, a[0], b[3], carry);

        let (w1, carry) = mac64(w1, a[1], b[0], 0);
        let (w2, carry) = mac64(w2, a[1], b[1], carry);
        let (w3, carry) = mac64(w3, a[1], b[2], carry);
        let (w4, w5) = mac64(w4, a[1], b[3], carry);

        let (w2, carry) = mac64(w2, a[2], b[0], 0);
        let (w3, carry) = mac64(w3, a[2], b[1], carry);
        let (w4, carry) = mac64(w4, a[2], b[2], carry);
        let (w5, w6) = mac64(w5, a[2], b[3], carry);

        let (w3, carry) = mac64(w3, a[3], b[0], 0);
        let (w4, carry) = mac64(w4, a[3], b[1], carry);
        let (w5, carry) = mac64(w5, a[3], b[2], carry);
        let (w6, w7) = mac64(w6, a[3], b[3], carry);

        [w0, w1, w2, w3, w4, w5, w6, w7]
    }

    /// Reduces a 512-bit product mod p by folding the high half through
    /// 2^256 ≡ 2^32 + 977. Every fold is executed unconditionally so the
    /// reduction takes the same time for every input.
    fn reduce_wide(w: &[u64; 8]) -> Self {
        // hi * C is at most 289 bits, so a single extra limb catches it.
        let (m0, carry) = mac64(0, w[4], C, 0);
        let (m1, carry) = mac64(0, w[5], C, carry);
        let (m2, carry) = mac64(0, w[6], C, carry);
        let (m3, m4) = mac64(0, w[7], C, carry);

        let (r0, carry) = adc64(w[0], m0, 0);
        let (r1, carry) = adc64(w[1], m1, carry);
        let (r2, carry) = adc64(w[2], m2, carry);
        let (r3, carry) = adc64(w[3], m3, carry);
        // m4 < 2^33 so the overflow limb cannot itself overflow.
        let t = m4 + carry;

        // Second fold: t * C spans at most two limbs.
        let tc = (t as u128) * (C as u128);
        let (r0, carry) = adc64(r0, tc as u64, 0);
        let (r1, carry) = adc64(r1, (tc >> 64) as u64, carry);
        let (r2, carry) = adc64(r2, 0, carry);
        let (r3, carry) = adc64(r3, 0, carry);

        // Third fold: the carry is 0 or 1 and cannot produce another one,
        // since a wrapped second fold leaves the low limbs tiny.
        let cc = carry * C;
        let (r0, carry) = adc64(r0, cc, 0);
        let (r1, carry) = adc64(r1, 0, carry);
        let (r2, carry) = adc64(r2, 0, carry);
        let (r3, _) = adc64(r3, 0, carry);

        Self::sub_with_carry(&[r0, r1, r2, r3], 0)
    }
}

impl ConditionallySelectable for FieldElement4x64 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement4x64 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const P_MINUS_ONE: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff,
        0xfc, 0x2e,
    ];

    const P: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff,
        0xfc, 0x2f,
    ];

    #[test]
    fn modulus_rejected_by_strict_parse() {
        assert!(bool::from(FieldElement4x64::from_bytes(&P).is_none()));
        assert!(bool::from(
            FieldElement4x64::from_bytes(&P_MINUS_ONE).is_some()
        ));
    }

    #[test]
    fn modulus_reduces_to_zero() {
        let reduced = FieldElement4x64::from_bytes_reduced(&P);
        assert!(bool::from(reduced.is_zero()));
    }

    #[test]
    fn add_wraps_at_modulus() {
        let minus_one = FieldElement4x64::from_bytes_unchecked(&P_MINUS_ONE);
        let sum = minus_one.add(&FieldElement4x64::one());
        assert!(bool::from(sum.is_zero()));
    }

    #[test]
    fn sub_wraps_at_zero() {
        let minus_one = FieldElement4x64::from_bytes_unchecked(&P_MINUS_ONE);
        let diff = FieldElement4x64::zero().sub(&FieldElement4x64::one());
        assert!(bool::from(diff.ct_eq(&minus_one)));
    }

    #[test]
    fn minus_one_squared_is_one() {
        let minus_one = FieldElement4x64::from_bytes_unchecked(&P_MINUS_ONE);
        assert!(bool::from(
            minus_one.square().ct_eq(&FieldElement4x64::one())
        ));
    }

    #[test]
    fn mul_single_matches_mul() {
        let minus_one = FieldElement4x64::from_bytes_unchecked(&P_MINUS_ONE);
        let a = minus_one.mul_single(977);
        let b = minus_one.mul(&FieldElement4x64::from_u64(977));
        assert!(bool::from(a.ct_eq(&b)));
    }

    #[test]
    fn bytes_round_trip() {
        let minus_one = FieldElement4x64::from_bytes_unchecked(&P_MINUS_ONE);
        assert_eq!(minus_one.to_bytes(), P_MINUS_ONE);
    }
}
