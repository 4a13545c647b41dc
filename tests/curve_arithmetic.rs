use proptest::prelude::*;
use secp256k1_arith::{
    Error, FieldElement, ProjectivePoint, Scalar, scalar_mul, scalar_mul_basepoint,
};
use subtle::ConditionallySelectable;

fn hex32(s: &str) -> [u8; 32] {
    assert_eq!(s.len(), 64);
    let mut bytes = [0u8; 32];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16).unwrap();
    }
    bytes
}

fn field(s: &str) -> FieldElement {
    FieldElement::from_bytes(&hex32(s)).unwrap()
}

/// Variable-time double-and-add, as a reference for the constant-time ladder.
fn naive_mul(scalar: &Scalar, point: &ProjectivePoint) -> ProjectivePoint {
    let mut acc = ProjectivePoint::IDENTITY;
    for i in (0..256).rev() {
        acc = acc.double();
        if scalar.bit(i).into() {
            acc += point;
        }
    }
    acc
}

#[test]
fn generator_matches_sec2() {
    let (x, y) = ProjectivePoint::GENERATOR.affine_coordinates().unwrap();
    assert_eq!(
        x,
        field("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
    );
    assert_eq!(
        y,
        field("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8")
    );
}

#[test]
fn two_g_known_answer() {
    let (x, y) = ProjectivePoint::GENERATOR
        .double()
        .affine_coordinates()
        .unwrap();
    assert_eq!(
        x,
        field("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5")
    );
    assert_eq!(
        y,
        field("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a")
    );
}

#[test]
fn three_g_known_answer() {
    let three = Scalar::from(3u64);
    let (x, y) = scalar_mul_basepoint(&three).affine_coordinates().unwrap();
    assert_eq!(
        x,
        field("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9")
    );
    assert_eq!(
        y,
        field("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7b7da6afd9")
    );
}

#[test]
fn group_order_kills_the_generator() {
    // n itself reduces to the zero scalar, so n·G must be the identity.
    let n = Scalar::from_bytes_reduced(&hex32(
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    ));
    assert!(bool::from(n.is_zero()));
    assert_eq!(scalar_mul_basepoint(&n), ProjectivePoint::IDENTITY);
}

#[test]
fn order_minus_one_negates_the_generator() {
    let n_minus_1 = Scalar::from_bytes(&hex32(
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140",
    ))
    .unwrap();
    let p = scalar_mul_basepoint(&n_minus_1);
    assert_eq!(p, -ProjectivePoint::GENERATOR);
    assert_eq!(p + ProjectivePoint::GENERATOR, ProjectivePoint::IDENTITY);
}

#[test]
fn identity_round_trips_through_affine() {
    let affine = ProjectivePoint::IDENTITY.to_affine();
    assert!(bool::from(affine.is_identity()));
    assert_eq!(affine.coordinates(), Err(Error::PointAtInfinity));
    assert_eq!(ProjectivePoint::from(affine), ProjectivePoint::IDENTITY);
}

#[test]
fn off_curve_pair_is_rejected() {
    assert_eq!(
        ProjectivePoint::from_affine(FieldElement::ONE, FieldElement::ONE),
        Err(Error::InvalidPoint)
    );
}

#[test]
fn on_curve_pair_round_trips() {
    let (x, y) = ProjectivePoint::GENERATOR
        .double()
        .affine_coordinates()
        .unwrap();
    let p = ProjectivePoint::from_affine(x, y).unwrap();
    assert_eq!(p, ProjectivePoint::GENERATOR.double());
}

prop_compose! {
    fn field_element()(bytes in any::<[u8; 32]>()) -> FieldElement {
        FieldElement::from_bytes_reduced(&bytes)
    }
}

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> Scalar {
        Scalar::from_bytes_reduced(&bytes)
    }
}

prop_compose! {
    fn point()(k in scalar()) -> ProjectivePoint {
        scalar_mul_basepoint(&k)
    }
}

proptest! {
    #[test]
    fn field_add_sub_round_trip(a in field_element(), b in field_element()) {
        prop_assert_eq!(a + b - b, a);
    }

    #[test]
    fn field_mul_invert_round_trip(a in field_element()) {
        if bool::from(a.is_zero()) {
            prop_assert!(bool::from(a.invert().is_none()));
        } else {
            prop_assert_eq!(a * a.invert().unwrap(), FieldElement::ONE);
        }
    }

    #[test]
    fn field_bytes_round_trip(a in field_element()) {
        prop_assert_eq!(FieldElement::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn scalar_add_sub_round_trip(a in scalar(), b in scalar()) {
        prop_assert_eq!(a + b - b, a);
    }

    #[test]
    fn scalar_mul_invert_round_trip(a in scalar()) {
        if bool::from(a.is_zero()) {
            prop_assert!(bool::from(a.invert().is_none()));
        } else {
            prop_assert_eq!(a * a.invert().unwrap(), Scalar::ONE);
        }
    }

    #[test]
    fn scalar_bytes_round_trip(a in scalar()) {
        prop_assert_eq!(Scalar::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn point_addition_is_commutative(p in point(), q in point()) {
        prop_assert_eq!(p + q, q + p);
    }

    #[test]
    fn point_plus_itself_is_double(p in point()) {
        prop_assert_eq!(p + p, p.double());
    }

    #[test]
    fn point_plus_identity_is_point(p in point()) {
        prop_assert_eq!(p + ProjectivePoint::IDENTITY, p);
    }

    #[test]
    fn point_minus_itself_is_identity(p in point()) {
        prop_assert_eq!(p - p, ProjectivePoint::IDENTITY);
    }

    #[test]
    fn mixed_addition_matches_projective(p in point(), q in point()) {
        prop_assert_eq!(p + q.to_affine(), p + q);
    }

    #[test]
    fn ladder_matches_naive_double_and_add(k in scalar(), p in point()) {
        prop_assert_eq!(scalar_mul(&k, &p), naive_mul(&k, &p));
    }

    #[test]
    fn basepoint_ladder_matches_general_ladder(k in scalar()) {
        prop_assert_eq!(
            scalar_mul_basepoint(&k),
            scalar_mul(&k, &ProjectivePoint::GENERATOR)
        );
    }

    #[test]
    fn zero_scalar_gives_identity(p in point()) {
        prop_assert_eq!(scalar_mul(&Scalar::ZERO, &p), ProjectivePoint::IDENTITY);
    }

    #[test]
    fn identity_absorbs_any_scalar(k in scalar()) {
        prop_assert_eq!(
            scalar_mul(&k, &ProjectivePoint::IDENTITY),
            ProjectivePoint::IDENTITY
        );
    }

    #[test]
    fn scalar_mul_distributes_over_scalar_addition(a in scalar(), b in scalar()) {
        prop_assert_eq!(
            scalar_mul_basepoint(&(a + b)),
            scalar_mul_basepoint(&a) + scalar_mul_basepoint(&b)
        );
    }

    #[test]
    fn conditional_select_picks_one_side(p in point(), q in point()) {
        prop_assert_eq!(
            ProjectivePoint::conditional_select(&p, &q, 0u8.into()),
            p
        );
        prop_assert_eq!(
            ProjectivePoint::conditional_select(&p, &q, 1u8.into()),
            q
        );
    }

    #[test]
    fn nonidentity_points_round_trip_through_coordinates(p in point()) {
        prop_assume!(!bool::from(p.is_identity()));
        let (x, y) = p.affine_coordinates().unwrap();
        prop_assert_eq!(ProjectivePoint::from_affine(x, y).unwrap(), p);
    }
}
