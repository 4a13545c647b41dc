//! 64-bit limb implementation of arithmetic modulo the curve order.

use crate::util::{adc64, mac64, sbb64};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// The curve order n in little-endian limbs.
const MODULUS: [u64; 4] = [
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// 2^256 - n = 0x14551231950B75FC4402DA1732FC9BEBF, three limbs.
const C: [u64; 3] = [0x402D_A173_2FC9_BEBF, 0x4551_2319_50B7_5FC4, 0x1];

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

/// An integer modulo n stored as four little-endian `u64` limbs, always
/// canonical.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar4x64([u64; 4]);

impl Scalar4x64 {
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
    /// not in the range `[0, n)`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let w = Self::from_bytes_unchecked(bytes);
        let (_, borrow) = sbb_modulus(&w.0, 0);
        CtOption::new(w, Choice::from((borrow as u8) & 1))
    }

    /// Parses a big-endian byte array, reducing the value mod n.
    pub fn from_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self::sub_with_carry(&Self::from_bytes_unchecked(bytes).0, 0)
    }

    /// Returns the canonical big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
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

    /// Returns bit `i` of the scalar. The bit index is public; only the
    /// scalar value is secret.
    ///
    /// Panics if `i >= 256`.
    pub fn bit(&self, i: usize) -> Choice {
        Choice::from(((self.0[i >> 6] >> (i & 63)) & 1) as u8)
    }

    /// Canonicalizes `w + carry * 2^256`, which must be below 2n.
    fn sub_with_carry(w: &[u64; 4], carry: u64) -> Self {
        let (r, borrow) = sbb_modulus(w, carry);
        let underflow = Choice::from((borrow as u8) & 1);
        Self::conditional_select(&Self(r), &Self(*w), underflow)
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

    pub fn mul(&self, rhs: &Self) -> Self {
        Self::reduce_wide(&self.mul_wide(rhs))
    }

    pub fn square(&self) -> Self {
        self.mul(self)
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

    /// Reduces a 512-bit product mod n by repeatedly folding the high
    /// half through 2^256 ≡ 2^256 - n. Four unconditional folds bring
    /// the high half to zero for every input.
    fn reduce_wide(w: &[u64; 8]) -> Self {
        let (lo, hi) = fold(&[w[0], w[1], w[2], w[3]], &[w[4], w[5], w[6], w[7]]);
        let (lo, hi) = fold(&lo, &hi);
        let (lo, hi) = fold(&lo, &hi);
        let (lo, hi) = fold(&lo, &hi);
        debug_assert_eq!(hi, [0, 0, 0, 0]);
        Self::sub_with_carry(&lo, 0)
    }
}

/// Subtracts the modulus from a five-limb value, returning the low limbs
/// and the final borrow.
fn sbb_modulus(w: &[u64; 4], carry: u64) -> ([u64; 4], u64) {
    let (r0, borrow) = sbb64(w[0], MODULUS[0], 0);
    let (r1, borrow) = sbb64(w[1], MODULUS[1], borrow);
    let (r2, borrow) = sbb64(w[2], MODULUS[2], borrow);
    let (r3, borrow) = sbb64(w[3], MODULUS[3], borrow);
    let (_, borrow) = sbb64(carry, 0, borrow);
    ([r0, r1, r2, r3], borrow)
}

/// One folding step: `lo + hi * (2^256 - n)`, split back into low and
/// high halves. The high half shrinks by at least 127 bits per step.
fn fold(lo: &[u64; 4], hi: &[u64; 4]) -> ([u64; 4], [u64; 4]) {
    let (p0, carry) = mac64(0, hi[0], C[0], 0);
    let (p1, carry) = mac64(0, hi[0], C[1], carry);
    let (p2, p3) = mac64(0, hi[0], C[2], carry);

    let (p1, carry) = mac64(p1, hi[1], C[0], 0);
    let (p2, carry) = mac64(p2, hi[1], C[1], carry);
    let (p3, p4) = mac64(p3, hi[1], C[2], carry);

    let (p2, carry) = mac64(p2, hi[2], C[0], 0);
    let (p3, carry) = mac64(p3, hi[2], C[1], carry);
    let (p4, p5) = mac64(p4, hi[2], C[2], carry);

    let (p3, carry) = mac64(p3, hi[3], C[0], 0);
    let (p4, carry) = mac64(p4, hi[3], C[1], carry);
    let (p5, p6) = mac64(p5, hi[3], C[2], carry);

    let (r0, carry) = adc64(lo[0], p0, 0);
    let (r1, carry) = adc64(lo[1], p1, carry);
    let (r2, carry) = adc64(lo[2], p2, carry);
    let (r3, carry) = adc64(lo[3], p3, carry);

    let (h0, carry) = adc64(p4, 0, carry);
    let (h1, carry) = adc64(p5, 0, carry);
    let (h2, _) = adc64(p6, 0, carry);

    ([r0, r1, r2, r3], [h0, h1, h2, 0])
}

impl ConditionallySelectable for Scalar4x64 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for Scalar4x64 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}
