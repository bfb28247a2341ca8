//! Elliptic-curve point arithmetic over a prime field

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::math::{mod_inverse, mod_sub};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use serde::Serialize;

/// A point on a curve: the identity, or an affine coordinate pair
/// reduced mod p. Points are immutable values with structural
/// equality; operations always produce new points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn affine(x: impl Into<BigUint>, y: impl Into<BigUint>) -> Point {
        Point::Affine {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }
}

impl Curve {
    /// Whether the point satisfies `y^2 = x^3 + a*x + b (mod p)`.
    /// The identity is on every curve.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                if x >= &self.p || y >= &self.p {
                    return false;
                }
                let lhs = (y * y) % &self.p;
                let rhs = (x * x * x + &self.a * x + &self.b) % &self.p;
                lhs == rhs
            }
        }
    }

    /// Reflection across the x axis: `(x, y) -> (x, -y mod p)`.
    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => {
                let neg_y = if y.is_zero() {
                    BigUint::zero()
                } else {
                    &self.p - y
                };
                Point::Affine {
                    x: x.clone(),
                    y: neg_y,
                }
            }
        }
    }

    /// Chord-and-tangent addition. Operands off the curve are a fatal
    /// precondition failure, reported as `InvalidParameters` rather
    /// than silently producing a wrong answer.
    pub fn add(&self, p: &Point, q: &Point) -> Result<Point> {
        self.require_on_curve(p)?;
        self.require_on_curve(q)?;
        Ok(self.add_unchecked(p, q))
    }

    /// Tangent doubling; `y = 0` (vertical tangent) gives infinity.
    pub fn double(&self, p: &Point) -> Result<Point> {
        self.require_on_curve(p)?;
        Ok(self.add_unchecked(p, p))
    }

    /// Binary double-and-add scalar multiplication, MSB first.
    /// Negative `k` multiplies by `|k|` and negates the result;
    /// `k = 0` yields infinity. O(log k) group operations.
    pub fn scalar_mul(&self, k: &BigInt, p: &Point) -> Result<Point> {
        self.require_on_curve(p)?;
        let magnitude = k.magnitude();
        let mut acc = Point::Infinity;
        for i in (0..magnitude.bits()).rev() {
            acc = self.add_unchecked(&acc, &acc);
            if magnitude.bit(i) {
                acc = self.add_unchecked(&acc, p);
            }
        }
        if k.sign() == Sign::Minus {
            acc = self.negate(&acc);
        }
        Ok(acc)
    }

    fn require_on_curve(&self, point: &Point) -> Result<()> {
        if self.is_on_curve(point) {
            Ok(())
        } else {
            Err(Error::InvalidParameters(format!(
                "point {point:?} is not on curve {}",
                self.name
            )))
        }
    }

    /// Addition core. Callers guarantee both operands are on the
    /// curve, which also guarantees every slope denominator below is
    /// either invertible or caught by a vertical case.
    pub(crate) fn add_unchecked(&self, p: &Point, q: &Point) -> Point {
        let (x1, y1) = match p {
            Point::Infinity => return q.clone(),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match q {
            Point::Infinity => return p.clone(),
            Point::Affine { x, y } => (x, y),
        };

        let slope = if x1 == x2 {
            if y1 != y2 || y1.is_zero() {
                // Vertical chord (y2 = -y1) or vertical tangent.
                return Point::Infinity;
            }
            // lambda = (3*x1^2 + a) / (2*y1)
            let numer = (x1 * x1 * 3u32 + &self.a) % &self.p;
            let denom = (y1 * 2u32) % &self.p;
            let inv = mod_inverse(&denom, &self.p)
                .expect("2y is nonzero mod an odd prime for an on-curve point");
            (numer * inv) % &self.p
        } else {
            // lambda = (y2 - y1) / (x2 - x1)
            let numer = mod_sub(y2, y1, &self.p);
            let denom = mod_sub(x2, x1, &self.p);
            let inv = mod_inverse(&denom, &self.p)
                .expect("distinct x coordinates differ by a unit mod p");
            (numer * inv) % &self.p
        };

        let x3 = mod_sub(&((&slope * &slope) % &self.p), &((x1 + x2) % &self.p), &self.p);
        let y3 = mod_sub(&((slope * mod_sub(x1, &x3, &self.p)) % &self.p), y1, &self.p);
        Point::Affine { x: x3, y: y3 }
    }
}
