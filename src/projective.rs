//! Projective points

use crate::{AffinePoint, CURVE_EQUATION_B_SINGLE, Error, FieldElement, Scalar, mul};
use core::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A point on the secp256k1 curve in homogeneous projective coordinates.
///
/// `(X : Y : Z)` represents the affine point `(X/Z, Y/Z)`; the identity
/// is `(0 : 1 : 0)`. Addition and doubling use complete formulas, so
/// every input (including identity operands and the doubling-degenerate
/// case) takes the same code path, and no field inversion happens until
/// [`ProjectivePoint::to_affine`] is called.
#[derive(Clone, Copy)]
pub struct ProjectivePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl ProjectivePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Base point of secp256k1.
    pub const GENERATOR: Self = Self {
        x: AffinePoint::GENERATOR.x,
        y: AffinePoint::GENERATOR.y,
        z: FieldElement::ONE,
    };

    /// Creates a point from raw affine coordinates, checking that they
    /// satisfy the curve equation.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPoint`] when the pair is not on the curve.
    pub fn from_affine(x: FieldElement, y: FieldElement) -> Result<Self, Error> {
        AffinePoint::from_coordinates(x, y).map(Self::from)
    }

    /// Returns the affine representation of this point, or
    /// [`AffinePoint::IDENTITY`] if it is the identity.
    ///
    /// This performs the single field inversion deferred by the
    /// projective representation.
    pub fn to_affine(&self) -> AffinePoint {
        self.z
            .invert()
            .map(|zinv| AffinePoint::new(self.x * zinv, self.y * zinv))
            .unwrap_or_else(|| AffinePoint::IDENTITY)
    }

    /// Returns the affine `(x, y)` coordinate pair.
    ///
    /// # Errors
    ///
    /// [`Error::PointAtInfinity`] when called on the identity element.
    pub fn affine_coordinates(&self) -> Result<(FieldElement, FieldElement), Error> {
        self.to_affine().coordinates()
    }

    /// Is this point the identity point?
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Generates a random point by multiplying the generator by a
    /// random scalar.
    pub fn random(rng: &mut impl RngCore) -> Self {
        mul::scalar_mul_basepoint(&Scalar::random(rng))
    }

    /// Returns `-self`.
    fn neg(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: self.y.negate(),
            z: self.z,
        }
    }

    /// Returns `self + other`.
    fn add(&self, other: &ProjectivePoint) -> ProjectivePoint {
        // We implement the complete addition formula from Renes-Costello-Batina 2015
        // (https://eprint.iacr.org/2015/1060 Algorithm 7).

        let xx = self.x * other.x;
        let yy = self.y * other.y;
        let zz = self.z * other.z;

        let xy_pairs = ((self.x + self.y) * (other.x + other.y)) - (xx + yy);
        let yz_pairs = ((self.y + self.z) * (other.y + other.z)) - (yy + zz);
        let xz_pairs = ((self.x + self.z) * (other.x + other.z)) - (xx + zz);

        let bzz = zz.mul_single(CURVE_EQUATION_B_SINGLE);
        let bzz3 = bzz.double() + bzz;

        let yy_m_bzz3 = yy - bzz3;
        let yy_p_bzz3 = yy + bzz3;

        let byz = yz_pairs.mul_single(CURVE_EQUATION_B_SINGLE);
        let byz3 = byz.double() + byz;

        let xx3 = xx.double() + xx;
        let bxx9 = (xx3.double() + xx3).mul_single(CURVE_EQUATION_B_SINGLE);

        ProjectivePoint {
            x: (xy_pairs * yy_m_bzz3) - (byz3 * xz_pairs),
            y: (yy_p_bzz3 * yy_m_bzz3) + (bxx9 * xz_pairs),
            z: (yz_pairs * yy_p_bzz3) + (xx3 * xy_pairs),
        }
    }

    /// Returns `self + other`.
    pub(crate) fn add_mixed(&self, other: &AffinePoint) -> ProjectivePoint {
        // We implement the complete addition formula from Renes-Costello-Batina 2015
        // (https://eprint.iacr.org/2015/1060 Algorithm 8).

        let xx = self.x * other.x;
        let yy = self.y * other.y;
        let xy_pairs = ((self.x + self.y) * (other.x + other.y)) - (xx + yy);
        let yz_pairs = (other.y * self.z) + self.y;
        let xz_pairs = (other.x * self.z) + self.x;

        let bzz = self.z.mul_single(CURVE_EQUATION_B_SINGLE);
        let bzz3 = bzz.double() + bzz;

        let yy_m_bzz3 = yy - bzz3;
        let yy_p_bzz3 = yy + bzz3;

        let byz = yz_pairs.mul_single(CURVE_EQUATION_B_SINGLE);
        let byz3 = byz.double() + byz;

        let xx3 = xx.double() + xx;
        let bxx9 = (xx3.double() + xx3).mul_single(CURVE_EQUATION_B_SINGLE);

        let mut ret = ProjectivePoint {
            x: (xy_pairs * yy_m_bzz3) - (byz3 * xz_pairs),
            y: (yy_p_bzz3 * yy_m_bzz3) + (bxx9 * xz_pairs),
            z: (yz_pairs * yy_p_bzz3) + (xx3 * xy_pairs),
        };
        ret.conditional_assign(self, other.is_identity());
        ret
    }

    /// Doubles this point.
    #[inline]
    pub fn double(&self) -> ProjectivePoint {
        // We implement the complete doubling formula from Renes-Costello-Batina 2015
        // (https://eprint.iacr.org/2015/1060 Algorithm 9).

        let yy = self.y.square();
        let zz = self.z.square();
        let xy2 = (self.x * self.y).double();

        let bzz = zz.mul_single(CURVE_EQUATION_B_SINGLE);
        let bzz3 = bzz.double() + bzz;
        let bzz9 = bzz3.double() + bzz3;

        let yy_m_bzz9 = yy - bzz9;
        let yy_p_bzz3 = yy + bzz3;

        let yy_zz = yy * zz;
        let yy_zz8 = yy_zz.double().double().double();
        let t = (yy_zz8.double() + yy_zz8).mul_single(CURVE_EQUATION_B_SINGLE);

        ProjectivePoint {
            x: xy2 * yy_m_bzz9,
            y: (yy_m_bzz9 * yy_p_bzz3) + t,
            z: ((yy * self.y) * self.z).double().double().double(),
        }
    }

    /// Returns `self - other`.
    fn sub(&self, other: &ProjectivePoint) -> ProjectivePoint {
        self.add(&other.neg())
    }

    /// Returns `self - other`.
    fn sub_mixed(&self, other: &AffinePoint) -> ProjectivePoint {
        self.add_mixed(&-*other)
    }
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(p: AffinePoint) -> Self {
        let projective = ProjectivePoint {
            x: p.x,
            y: p.y,
            z: FieldElement::ONE,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        Self::from(*p)
    }
}

impl From<ProjectivePoint> for AffinePoint {
    fn from(p: ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl From<&ProjectivePoint> for AffinePoint {
    fn from(p: &ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ConstantTimeEq for ProjectivePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // If both points are not equal to infinity then they are in the form:
        //
        // lhs: (x₁z₁, y₁z₁, z₁), rhs: (x₂z₂, y₂z₂, z₂) where z₁ ≠ 0 and z₂ ≠ 0.
        // We want to know if x₁ == x₂ and y₁ == y₂, so we multiply the x and y
        // by the opposing z to get:
        // lhs: (x₁z₁z₂, y₁z₁z₂) rhs: (x₂z₁z₂, y₂z₁z₂)
        // and check lhs == rhs, which implies x₁ == x₂ and y₁ == y₂.
        //
        // If the first point is infinity it has the form (0, y₁, 0), so the
        // pairs evaluate to (0, y₁z₂) and (0, 0). y₁z₂ is nonzero whenever
        // the second point is not infinity, so the points compare unequal,
        // and two infinity points compare equal.
        let lhs_x = self.x * other.z;
        let rhs_x = other.x * self.z;
        let x_eq = lhs_x.ct_eq(&rhs_x);

        let lhs_y = self.y * other.z;
        let rhs_y = other.y * self.z;
        let y_eq = lhs_y.ct_eq(&rhs_y);

        x_eq & y_eq
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl PartialEq<AffinePoint> for ProjectivePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.ct_eq(&ProjectivePoint::from(other)).into()
    }
}

impl PartialEq<ProjectivePoint> for AffinePoint {
    fn eq(&self, other: &ProjectivePoint) -> bool {
        other.ct_eq(&ProjectivePoint::from(self)).into()
    }
}

impl Eq for ProjectivePoint {}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Debug for ProjectivePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ProjectivePoint({:?})", self.to_affine())
    }
}

impl Add<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(self, other)
    }
}

impl Add<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, &other)
    }
}

impl Add<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, other)
    }
}

impl AddAssign<ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl AddAssign<&ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::add(self, rhs);
    }
}

impl Add<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, &other)
    }
}

impl Add<&AffinePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(self, other)
    }
}

impl Add<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, other)
    }
}

impl AddAssign<AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, &rhs);
    }
}

impl AddAssign<&AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, rhs);
    }
}

impl Sum for ProjectivePoint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ProjectivePoint::IDENTITY, |a, b| a + b)
    }
}

impl<'a> Sum<&'a ProjectivePoint> for ProjectivePoint {
    fn sum<I: Iterator<Item = &'a ProjectivePoint>>(iter: I) -> Self {
        iter.cloned().sum()
    }
}

impl Sub<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, &other)
    }
}

impl Sub<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(self, other)
    }
}

impl Sub<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, other)
    }
}

impl SubAssign<ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::sub(self, &rhs);
    }
}

impl SubAssign<&ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::sub(self, rhs);
    }
}

impl Sub<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, &other)
    }
}

impl Sub<&AffinePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(self, other)
    }
}

impl Sub<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, other)
    }
}

impl SubAssign<AffinePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: AffinePoint) {
        *self = ProjectivePoint::sub_mixed(self, &rhs);
    }
}

impl SubAssign<&AffinePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: &AffinePoint) {
        *self = ProjectivePoint::sub_mixed(self, rhs);
    }
}

impl Neg for ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(&self)
    }
}

impl Neg for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_plus_identity() {
        let i = ProjectivePoint::IDENTITY;
        assert_eq!(i + i, i);
        assert_eq!(i.double(), i);
    }

    #[test]
    fn generator_plus_identity() {
        let g = ProjectivePoint::GENERATOR;
        assert_eq!(g + ProjectivePoint::IDENTITY, g);
        assert_eq!(ProjectivePoint::IDENTITY + g, g);
    }

    #[test]
    fn generator_minus_generator() {
        let g = ProjectivePoint::GENERATOR;
        assert_eq!(g - g, ProjectivePoint::IDENTITY);
    }

    #[test]
    fn add_matches_double() {
        let g = ProjectivePoint::GENERATOR;
        assert_eq!(g + g, g.double());
    }

    #[test]
    fn mixed_addition_matches_projective() {
        let g = ProjectivePoint::GENERATOR;
        let two_g = g.double();
        assert_eq!(two_g + AffinePoint::GENERATOR, two_g + g);
        assert_eq!(two_g + AffinePoint::IDENTITY, two_g);
    }

    #[test]
    fn double_round_trips_through_affine() {
        let two_g = ProjectivePoint::GENERATOR.double().to_affine();
        let (x, y) = two_g.coordinates().unwrap();
        assert_eq!(
            ProjectivePoint::from_affine(x, y).unwrap(),
            ProjectivePoint::GENERATOR.double()
        );
    }
}
