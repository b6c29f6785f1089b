//! Property tests over randomly generated alphabets.

use huffcode_core::{
    build_tree, compute_statistics, decode, encode, generate_codes, ProbabilityMap, Symbol,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn alphabet(weights: &[f64]) -> ProbabilityMap {
    let symbols = (0..weights.len()).map(|i| Symbol::new(format!("s{i}")));
    ProbabilityMap::from_parallel(symbols, weights.iter().copied()).unwrap()
}

proptest! {
    #[test]
    fn proptest_round_trip(
        weights in proptest::collection::vec(0.001f64..10.0, 1..40),
        picks in proptest::collection::vec(any::<usize>(), 0..200),
    ) {
        let map = alphabet(&weights);
        let (root, _) = build_tree(&map).unwrap();
        let table = generate_codes(&root).unwrap();

        let message: Vec<Symbol> = picks
            .iter()
            .map(|i| map.entries()[i % map.len()].symbol.clone())
            .collect();

        let encoded = encode(&message, &table).unwrap();
        prop_assert_eq!(decode(&encoded, &root).unwrap(), message);
    }

    #[test]
    fn proptest_codes_prefix_free_and_complete(
        weights in proptest::collection::vec(0.001f64..10.0, 1..64),
    ) {
        let map = alphabet(&weights);
        let (root, steps) = build_tree(&map).unwrap();
        let table = generate_codes(&root).unwrap();

        prop_assert_eq!(steps.len(), map.len() - 1);
        prop_assert_eq!(table.len(), map.len());
        prop_assert!(table.is_prefix_free());
        prop_assert!(table.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn proptest_average_length_bounds(
        weights in proptest::collection::vec(0.001f64..10.0, 1..64),
    ) {
        let map = alphabet(&weights);
        let (root, _) = build_tree(&map).unwrap();
        let table = generate_codes(&root).unwrap();
        let stats = compute_statistics(&map, &table).unwrap();

        prop_assert!(stats.average_length + 1e-9 >= stats.entropy);
        prop_assert!(stats.average_length <= stats.entropy + 1.0 + 1e-9);
    }

    #[test]
    fn proptest_build_is_deterministic(
        weights in proptest::collection::vec(prop_oneof![Just(0.25f64), Just(0.5), Just(1.0)], 1..32),
    ) {
        let map = alphabet(&weights);
        let first = build_tree(&map).unwrap();
        let second = build_tree(&map.clone()).unwrap();
        prop_assert_eq!(first, second);
    }
}

/// Seeded random alphabets, including one-symbol cases, in bulk.
#[test]
fn test_seeded_random_alphabets() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let n = rng.gen_range(1..=30);
        let weights: Vec<f64> = (0..n).map(|_| rng.gen_range(0.01..1.0)).collect();
        let map = alphabet(&weights);
        let (root, _) = build_tree(&map).unwrap();
        let table = generate_codes(&root).unwrap();

        let message: Vec<Symbol> = (0..50)
            .map(|_| map.entries()[rng.gen_range(0..n)].symbol.clone())
            .collect();
        let encoded = encode(&message, &table).unwrap();
        assert_eq!(decode(&encoded, &root).unwrap(), message);
    }
}
