//! Checks the tester against ground truth across both lookup paths, and
//! from several threads at once.

use std::sync::Arc;
use std::thread;

use primality::testing::is_prime_reference;
use primality::PrimalityTester;
use primality::SieveOracle;
use primality::CEILING;
use primality::MAX_QUERYABLE;

/// Both paths, exhaustively, on a ceiling small enough to cover the whole
/// queryable range.
#[test]
fn every_queryable_value_matches_ground_truth() {
    let tester = PrimalityTester::new(SieveOracle::with_ceiling(1 << 9).unwrap());

    for x in 0..=tester.max_queryable() {
        assert_eq!(
            tester.is_prime(x).unwrap(),
            is_prime_reference(x),
            "x = {x}"
        );
    }
}

#[test]
fn values_near_the_reference_limits() {
    let tester = PrimalityTester::new(SieveOracle::new());

    let near_ceiling = CEILING - 500..=CEILING + 500;
    let near_maximum = MAX_QUERYABLE - 200..=MAX_QUERYABLE;
    for x in near_ceiling.chain(near_maximum) {
        assert_eq!(
            tester.is_prime(x).unwrap(),
            is_prime_reference(x),
            "x = {x}"
        );
    }
    assert!(tester.is_prime(MAX_QUERYABLE + 1).is_err());
}

#[test]
fn tester_is_shared_across_threads() {
    let tester = PrimalityTester::new(SieveOracle::new());
    let oracle_addr = tester.oracle() as *const SieveOracle as usize;

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let tester = tester.clone();
            thread::spawn(move || {
                assert_eq!(tester.oracle() as *const SieveOracle as usize, oracle_addr);
                let start = CEILING + worker * 5_000;
                (start..start + 5_000)
                    .filter(|x| tester.is_prime(*x).unwrap())
                    .count()
            })
        })
        .collect();

    let from_threads: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let sequential = (CEILING..CEILING + 20_000)
        .filter(|x| is_prime_reference(*x))
        .count();
    assert_eq!(from_threads, sequential);
}

#[test]
fn oracle_tables_can_be_shared_behind_an_arc() {
    let oracle = Arc::new(SieveOracle::new());
    let reader = Arc::clone(&oracle);

    let count = thread::spawn(move || reader.primes().len()).join().unwrap();
    assert_eq!(count, oracle.primes().len());
}
