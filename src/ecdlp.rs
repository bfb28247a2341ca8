//! Pollard's rho for the elliptic-curve discrete logarithm problem

use crate::budget::Budget;
use crate::curve::Curve;
use crate::ec::Point;
use crate::error::{Error, Result};
use crate::math::mod_inverse;
use log::debug;
use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// A solved instance: `k * base == target` with `k` in `[0, order)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscreteLog {
    pub k: BigUint,
    /// Walk iterations spent across all restarts, for instrumentation.
    pub iterations: u64,
}

/// Pollard's rho cycle-finding walk over the curve group.
///
/// The group is partitioned into `partitions` buckets by the current
/// point's x coordinate; each bucket applies a step that is fixed for
/// the duration of one walk (add a multiple of the base, double, add a
/// multiple of the target) while tracking exponents `(a, b)` with
/// `X = a*base + b*target`. Tortoise and hare walk at 1x/2x speed
/// until they land on the same point, and the two exponent pairs give
/// the logarithm. Restarts redraw both the starting exponents and the
/// step multiples, so each attempt explores an independent cycle. The
/// exact partition function is an implementation choice; any
/// deterministic, well-mixing function works.
#[derive(Debug, Clone)]
pub struct RhoSolver {
    pub budget: Budget,
    /// Walks restarted from fresh random exponents after a degenerate
    /// collision before giving up.
    pub restarts: u32,
    /// Number of partition buckets (at least 3).
    pub partitions: u32,
    /// Fixed seed for reproducible walks; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RhoSolver {
    fn default() -> Self {
        Self {
            budget: Budget::new(10_000_000),
            restarts: 20,
            partitions: 3,
            seed: None,
        }
    }
}

/// One walker: the current point and its exponents mod the group
/// order.
#[derive(Clone)]
struct Walker {
    point: Point,
    a: BigUint,
    b: BigUint,
}

/// A randomized walk instance: the starting walker plus the two
/// precomputed step points `base_mult * P` and `target_mult * Q`.
struct Walk {
    start: Walker,
    base_step: Point,
    target_step: Point,
    base_mult: BigUint,
    target_mult: BigUint,
}

impl RhoSolver {
    /// Recovers `k` with `k * base == target`, or `NotFound` after all
    /// restarts collapse, or `ResourceExceeded` on budget exhaustion.
    /// A candidate is verified against the curve before it is
    /// returned; an unverified logarithm is never reported.
    pub fn solve(
        &self,
        curve: &Curve,
        base: &Point,
        target: &Point,
        order: &BigUint,
    ) -> Result<DiscreteLog> {
        if !curve.is_on_curve(base) || base.is_infinity() {
            return Err(Error::InvalidParameters(
                "base point must be a finite point on the curve".into(),
            ));
        }
        if !curve.is_on_curve(target) {
            return Err(Error::InvalidParameters(
                "target point must be on the curve".into(),
            ));
        }
        if order < &BigUint::from(2u32) {
            return Err(Error::InvalidParameters(format!(
                "group order must be at least 2, got {order}"
            )));
        }
        if self.partitions < 3 {
            return Err(Error::InvalidParameters(format!(
                "need at least 3 partition buckets, got {}",
                self.partitions
            )));
        }
        if target.is_infinity() {
            return Ok(DiscreteLog {
                k: BigUint::zero(),
                iterations: 0,
            });
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut meter = self.budget.start();

        for attempt in 0..self.restarts.max(1) {
            let walk = match self.spawn_walk(curve, base, target, order, &mut rng)? {
                Some(walk) => walk,
                // A step point collapsed to the identity; the drawn
                // multiples are useless, try fresh ones.
                None => continue,
            };
            debug!(
                "rho-ecdlp attempt {attempt}: start ({}, {}), steps ({}, {})",
                walk.start.a, walk.start.b, walk.base_mult, walk.target_mult
            );
            if walk.start.point.is_infinity() {
                // a0*P + b0*Q collapsed immediately.
                continue;
            }
            let mut tortoise = walk.start.clone();
            let mut hare = walk.start.clone();

            let collision = loop {
                meter.tick()?;
                self.advance(curve, &walk, order, &mut tortoise);
                self.advance(curve, &walk, order, &mut hare);
                self.advance(curve, &walk, order, &mut hare);
                if tortoise.point == hare.point {
                    break (tortoise, hare);
                }
            };

            let mut verified = None;
            for k in candidate_logs(&collision.0, &collision.1, order) {
                let k_signed = BigInt::from_biguint(Sign::Plus, k.clone());
                if curve.scalar_mul(&k_signed, base)? == *target {
                    verified = Some(k);
                    break;
                }
                debug!("rho-ecdlp attempt {attempt}: candidate {k} failed verification");
            }
            match verified {
                Some(k) => {
                    return Ok(DiscreteLog {
                        k,
                        iterations: meter.iterations(),
                    })
                }
                None => debug!("rho-ecdlp attempt {attempt}: collision yielded no logarithm"),
            }
        }
        Err(Error::NotFound)
    }

    /// Draws a fresh random walk: starting exponents plus the two step
    /// multiples. Rerandomizing the step points on every restart gives
    /// each attempt an independent cycle, so a collision whose
    /// exponent difference is stuck on a factor of a composite order
    /// does not repeat forever. Returns `None` when a drawn step point
    /// degenerates to the identity.
    fn spawn_walk(
        &self,
        curve: &Curve,
        base: &Point,
        target: &Point,
        order: &BigUint,
        rng: &mut StdRng,
    ) -> Result<Option<Walk>> {
        let one = BigUint::from(1u32);
        let a0 = rng.gen_biguint_below(order);
        let b0 = rng.gen_biguint_below(order);
        let base_mult = rng.gen_biguint_range(&one, order);
        let target_mult = rng.gen_biguint_range(&one, order);

        let base_step = self.multiple(curve, base, &base_mult)?;
        let target_step = self.multiple(curve, target, &target_mult)?;
        if base_step.is_infinity() || target_step.is_infinity() {
            // Happens when the true point order divides the drawn
            // multiple (points living in a smaller subgroup than the
            // caller's `order` claims); a stalled step would spin in
            // one bucket forever.
            return Ok(None);
        }

        let ap = self.multiple(curve, base, &a0)?;
        let bq = self.multiple(curve, target, &b0)?;
        let point = curve.add(&ap, &bq)?;
        Ok(Some(Walk {
            start: Walker { point, a: a0, b: b0 },
            base_step,
            target_step,
            base_mult,
            target_mult,
        }))
    }

    fn multiple(&self, curve: &Curve, point: &Point, k: &BigUint) -> Result<Point> {
        let k_signed = BigInt::from_biguint(Sign::Plus, k.clone());
        curve.scalar_mul(&k_signed, point)
    }

    /// One pseudo-random step. Bucket 0 adds the walk's base multiple,
    /// bucket 1 doubles, every other bucket adds the target multiple;
    /// the identity lands in bucket 0 so the walk can leave it again.
    fn advance(&self, curve: &Curve, walk: &Walk, order: &BigUint, walker: &mut Walker) {
        let bucket = match &walker.point {
            Point::Infinity => 0u32,
            Point::Affine { x, .. } => (x % self.partitions).to_u32().unwrap_or(0),
        };
        match bucket {
            0 => {
                walker.point = curve.add_unchecked(&walker.point, &walk.base_step);
                walker.a = (&walker.a + &walk.base_mult) % order;
            }
            1 => {
                walker.point = curve.add_unchecked(&walker.point, &walker.point);
                walker.a = (&walker.a * 2u32) % order;
                walker.b = (&walker.b * 2u32) % order;
            }
            _ => {
                walker.point = curve.add_unchecked(&walker.point, &walk.target_step);
                walker.b = (&walker.b + &walk.target_mult) % order;
            }
        }
    }
}

/// Candidate logarithm count above which a collision is treated as
/// degenerate instead of enumerated.
const MAX_COLLISION_CANDIDATES: u32 = 4096;

/// Derives candidate logarithms from a collision with exponent pairs
/// `(a1, b1)` and `(a2, b2)`: every k satisfying
/// `a1 - a2 = k * (b2 - b1) (mod order)`.
///
/// With a composite order the difference `b2 - b1` is often not
/// invertible; writing `g = gcd(b2 - b1, order)`, solutions exist (and
/// the true logarithm is among them) exactly when `g` divides
/// `a1 - a2`, as the residue class mod `order / g` lifted `g` ways.
/// Every candidate is verified by the caller before being trusted.
fn candidate_logs(tortoise: &Walker, hare: &Walker, order: &BigUint) -> Vec<BigUint> {
    let db = sub_mod(&hare.b, &tortoise.b, order);
    if db.is_zero() {
        return Vec::new();
    }
    let da = sub_mod(&tortoise.a, &hare.a, order);
    let g = db.gcd(order);
    if !(&da % &g).is_zero() {
        return Vec::new();
    }
    let Some(lifts) = g.to_u32().filter(|&g| g <= MAX_COLLISION_CANDIDATES) else {
        return Vec::new();
    };
    let reduced_order = order / &g;
    let Some(inv) = mod_inverse(&(&db / &g), &reduced_order) else {
        return Vec::new();
    };
    let base_k = ((&da / &g) * inv).mod_floor(&reduced_order);
    (0..lifts)
        .map(|i| (&base_k + &reduced_order * i).mod_floor(order))
        .collect()
}

fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    crate::math::mod_sub(&(a % m), &(b % m), m)
}
