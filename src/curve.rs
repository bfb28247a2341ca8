//! Short Weierstrass curve parameters and the named-curve registry

use crate::error::{Error, Result};
use crate::primality::is_probable_prime;
use num_bigint::BigUint;
use num_traits::{Num, Zero};
use serde::Serialize;

const CONSTRUCTION_ROUNDS: u32 = 20;

/// secp256k1 field prime and group order.
const SECP256K1_P_HEX: &str =
    "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";
const SECP256K1_N_HEX: &str =
    "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";

/// NIST P-256 parameters.
const P256_P_HEX: &str = "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF";
const P256_A_HEX: &str = "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFC";
const P256_B_HEX: &str = "5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B";
const P256_N_HEX: &str = "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551";

/// Parameters of `y^2 = x^3 + a*x + b (mod p)`.
///
/// `order` is the group order where known; the weak demonstration
/// curves carry theirs so the ECDLP solver can be pointed at them
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Curve {
    pub name: String,
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    pub order: Option<BigUint>,
}

impl Curve {
    /// Validates and constructs a curve. The modulus must be an odd
    /// prime above 3 and the curve non-singular
    /// (`4a^3 + 27b^2 != 0 mod p`); weak curves are welcome here,
    /// singular ones are not a group at all.
    pub fn new(
        name: impl Into<String>,
        p: BigUint,
        a: BigUint,
        b: BigUint,
        order: Option<BigUint>,
    ) -> Result<Curve> {
        let name = name.into();
        if p < BigUint::from(5u32) || !is_probable_prime(&p, CONSTRUCTION_ROUNDS) {
            return Err(Error::InvalidParameters(format!(
                "curve modulus must be a prime greater than 3, got {p}"
            )));
        }
        let a = a % &p;
        let b = b % &p;
        let curve = Curve {
            name,
            p,
            a,
            b,
            order,
        };
        if curve.discriminant_term().is_zero() {
            return Err(Error::InvalidParameters(format!(
                "curve {} is singular: 4a^3 + 27b^2 = 0 (mod p)",
                curve.name
            )));
        }
        Ok(curve)
    }

    /// `4a^3 + 27b^2 mod p`, zero exactly for singular curves.
    pub fn discriminant_term(&self) -> BigUint {
        let a3 = self.a.modpow(&BigUint::from(3u32), &self.p);
        let b2 = self.b.modpow(&BigUint::from(2u32), &self.p);
        (a3 * 4u32 + b2 * 27u32) % &self.p
    }

    /// Looks up a curve from the built-in registry by name.
    pub fn by_name(name: &str) -> Option<Curve> {
        Self::registry().into_iter().find(|c| c.name == name)
    }

    /// The built-in catalogue: two standard curves and two
    /// intentionally weak toy curves with fully known group structure.
    pub fn registry() -> Vec<Curve> {
        let hex = |s: &str| BigUint::from_str_radix(s, 16).unwrap();
        vec![
            Curve {
                name: "secp256k1".into(),
                p: hex(SECP256K1_P_HEX),
                a: BigUint::zero(),
                b: BigUint::from(7u32),
                order: Some(hex(SECP256K1_N_HEX)),
            },
            Curve {
                name: "nist-p256".into(),
                p: hex(P256_P_HEX),
                a: hex(P256_A_HEX),
                b: hex(P256_B_HEX),
                order: Some(hex(P256_N_HEX)),
            },
            // Toy curves small enough to break by hand, for the ECDLP
            // demonstrations.
            Curve {
                name: "toy-97".into(),
                p: BigUint::from(97u32),
                a: BigUint::from(2u32),
                b: BigUint::from(3u32),
                order: Some(BigUint::from(100u32)),
            },
            Curve {
                name: "toy-9739".into(),
                p: BigUint::from(9739u32),
                a: BigUint::from(497u32),
                b: BigUint::from(1768u32),
                order: Some(BigUint::from(9735u32)),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_registry_curves_validate() {
        for curve in Curve::registry() {
            let rebuilt = Curve::new(
                curve.name.clone(),
                curve.p.clone(),
                curve.a.clone(),
                curve.b.clone(),
                curve.order.clone(),
            )
            .unwrap();
            assert_eq!(rebuilt, curve);
        }
    }

    #[test]
    fn test_by_name() {
        let curve = Curve::by_name("toy-97").unwrap();
        assert_eq!(curve.p, big(97));
        assert_eq!(curve.order, Some(big(100)));
        assert!(Curve::by_name("no-such-curve").is_none());
    }

    #[test]
    fn test_singular_curve_rejected() {
        // 4*1 + 27*25 = 679 = 7 * 97
        let err = Curve::new("singular", big(97), big(1), big(5), None).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_composite_modulus_rejected() {
        let err = Curve::new("composite", big(91), big(2), big(3), None).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_tiny_modulus_rejected() {
        for p in [2u64, 3] {
            assert!(Curve::new("tiny", big(p), big(1), big(1), None).is_err());
        }
    }

    #[test]
    fn test_coefficients_reduced() {
        let curve = Curve::new("reduced", big(97), big(99), big(100), None).unwrap();
        assert_eq!(curve.a, big(2));
        assert_eq!(curve.b, big(3));
    }
}
