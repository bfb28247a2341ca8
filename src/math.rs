//! Modular arithmetic utilities shared by the attack modules

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Computes `(a - b) mod p` without leaving the non-negative range.
///
/// Both operands must already be reduced mod `p`.
pub fn mod_sub(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        p - b + a
    }
}

/// Modular inverse of `a` mod `m` via the extended Euclidean
/// algorithm. `None` when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() || m.is_one() {
        return None;
    }
    let a = BigInt::from_biguint(Sign::Plus, a.mod_floor(m));
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    let ext = a.extended_gcd(&m_int);
    if !ext.gcd.is_one() {
        return None;
    }
    let inv = ext.x.mod_floor(&m_int);
    Some(inv.to_biguint().expect("mod_floor result is non-negative"))
}

/// Floor of the integer square root.
pub fn isqrt(n: &BigUint) -> BigUint {
    n.sqrt()
}

/// Exact integer square root: `Some(r)` with `r * r == n`, else `None`.
///
/// Floating-point square roots lose precision far below the sizes
/// handled here, so the check is done entirely in integers.
pub fn perfect_sqrt(n: &BigUint) -> Option<BigUint> {
    let r = n.sqrt();
    if &r * &r == *n {
        Some(r)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_mod_sub_wraps() {
        assert_eq!(mod_sub(&big(3), &big(5), &big(7)), big(5));
        assert_eq!(mod_sub(&big(5), &big(3), &big(7)), big(2));
        assert_eq!(mod_sub(&big(4), &big(4), &big(7)), big(0));
    }

    #[test]
    fn test_mod_inverse_roundtrip() {
        let p = big(97);
        for a in 1u64..97 {
            let inv = mod_inverse(&big(a), &p).unwrap();
            assert_eq!((big(a) * inv) % &p, big(1), "a = {a}");
        }
    }

    #[test]
    fn test_mod_inverse_non_coprime() {
        assert_eq!(mod_inverse(&big(6), &big(9)), None);
        assert_eq!(mod_inverse(&big(0), &big(9)), None);
    }

    #[test]
    fn test_mod_inverse_large_modulus() {
        let m: BigUint =
            "115792089237316195423570985008687907852837564279074904382605163141518161494337"
                .parse()
                .unwrap();
        let a = big(123456789);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!((a * inv) % &m, big(1));
    }

    #[test]
    fn test_perfect_sqrt() {
        assert_eq!(perfect_sqrt(&big(0)), Some(big(0)));
        assert_eq!(perfect_sqrt(&big(1)), Some(big(1)));
        assert_eq!(perfect_sqrt(&big(144)), Some(big(12)));
        assert_eq!(perfect_sqrt(&big(143)), None);
        assert_eq!(perfect_sqrt(&big(2)), None);
    }

    #[test]
    fn test_isqrt_floor() {
        assert_eq!(isqrt(&big(143)), big(11));
        assert_eq!(isqrt(&big(144)), big(12));
        assert_eq!(isqrt(&big(145)), big(12));
    }
}
