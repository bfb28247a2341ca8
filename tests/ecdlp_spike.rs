//! Deeper exercises of the rho ECDLP solver on the weak registry curves

use attacksim::{Budget, Curve, Error, Point, RhoSolver};
use num_bigint::{BigInt, BigUint, Sign};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn toy_9739() -> (Curve, Point, BigUint) {
    let curve = Curve::by_name("toy-9739").unwrap();
    // (2, 1927) has order 3245 = 5 * 11 * 59, a proper subgroup of the
    // full group of order 9735.
    let base = Point::affine(BigUint::from(2u32), BigUint::from(1927u32));
    (curve, base, BigUint::from(3245u32))
}

fn solve_and_verify(solver: &RhoSolver, curve: &Curve, base: &Point, k: u64, order: &BigUint) {
    let target = curve.scalar_mul(&BigInt::from(k), base).unwrap();
    let log = solver.solve(curve, base, &target, order).unwrap();
    assert!(log.k < *order);
    let recovered = BigInt::from_biguint(Sign::Plus, log.k.clone());
    assert_eq!(
        curve.scalar_mul(&recovered, base).unwrap(),
        target,
        "k = {k} recovered as {}",
        log.k
    );
}

#[test]
fn recovers_logs_in_composite_order_subgroup() {
    init_logging();
    let (curve, base, order) = toy_9739();
    let solver = RhoSolver {
        seed: Some(17),
        ..RhoSolver::default()
    };
    // Composite order means many collision inverses fail mod 3245; the
    // restart path has to carry these.
    for k in [1u64, 2, 59, 100, 1234, 1622, 3000, 3244] {
        solve_and_verify(&solver, &curve, &base, k, &order);
    }
}

#[test]
fn recovers_log_in_full_group() {
    init_logging();
    let curve = Curve::by_name("toy-9739").unwrap();
    let base = Point::affine(BigUint::from(1804u32), BigUint::from(5368u32));
    let order = curve.order.clone().unwrap();
    let solver = RhoSolver {
        seed: Some(23),
        ..RhoSolver::default()
    };
    for k in [17u64, 4000, 9734] {
        solve_and_verify(&solver, &curve, &base, k, &order);
    }
}

#[test]
fn wider_partition_function_still_solves() {
    init_logging();
    let (curve, base, order) = toy_9739();
    let solver = RhoSolver {
        seed: Some(5),
        partitions: 16,
        ..RhoSolver::default()
    };
    for k in [7u64, 501, 2718] {
        solve_and_verify(&solver, &curve, &base, k, &order);
    }
}

#[test]
fn too_few_partitions_rejected() {
    let (curve, base, order) = toy_9739();
    let solver = RhoSolver {
        partitions: 2,
        ..RhoSolver::default()
    };
    let target = curve.scalar_mul(&BigInt::from(5), &base).unwrap();
    assert!(matches!(
        solver.solve(&curve, &base, &target, &order),
        Err(Error::InvalidParameters(_))
    ));
}

#[test]
fn seeded_runs_are_reproducible() {
    init_logging();
    let (curve, base, order) = toy_9739();
    let target = curve.scalar_mul(&BigInt::from(1234), &base).unwrap();
    assert_eq!(
        target,
        Point::affine(BigUint::from(5869u32), BigUint::from(7354u32))
    );
    let solver = RhoSolver {
        seed: Some(41),
        ..RhoSolver::default()
    };
    let a = solver.solve(&curve, &base, &target, &order).unwrap();
    let b = solver.solve(&curve, &base, &target, &order).unwrap();
    assert_eq!(a, b);
}

#[test]
fn starved_budget_reports_resource_exhaustion() {
    let (curve, base, order) = toy_9739();
    let target = curve.scalar_mul(&BigInt::from(1234), &base).unwrap();
    let solver = RhoSolver {
        budget: Budget::new(2),
        restarts: 3,
        seed: Some(1),
        ..RhoSolver::default()
    };
    // 2 iterations cannot complete a walk on a subgroup this size.
    assert_eq!(
        solver.solve(&curve, &base, &target, &order),
        Err(Error::ResourceExceeded)
    );
}

#[test]
fn wrong_subgroup_order_never_returns_unverified_answer() {
    init_logging();
    let (curve, base, _) = toy_9739();
    // Lying about the order: the solver may fail, but any success it
    // does report must still verify.
    let target = curve.scalar_mul(&BigInt::from(77), &base).unwrap();
    let solver = RhoSolver {
        budget: Budget::new(200_000),
        seed: Some(13),
        ..RhoSolver::default()
    };
    match solver.solve(&curve, &base, &target, &BigUint::from(9735u32)) {
        Ok(log) => {
            let k = BigInt::from_biguint(Sign::Plus, log.k);
            assert_eq!(curve.scalar_mul(&k, &base).unwrap(), target);
        }
        Err(err) => assert!(err.is_retryable()),
    }
}
