//! Integration tests for segment chaining and loop checks.
//!
//! Covers ordering, orientation and tolerance behavior through the public
//! `chain_segments` / `LoopChecker` API.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use floorloop_lib::fixtures;
use floorloop_lib::validation::ChainValidator;
use floorloop_lib::{chain_segments, ChainConfig, ChainError, LoopChecker, LoopOutcome};
use shared::Segment;

/// Vertex cycle of a chain as rounded integer pairs, rotated so the smallest
/// vertex comes first and read in the direction of its smaller neighbour.
fn canonical_cycle(chain: &[Segment]) -> Vec<(i64, i64)> {
    let mut cycle: Vec<(i64, i64)> = chain
        .iter()
        .map(|s| ((s.start.x * 1e6).round() as i64, (s.start.y * 1e6).round() as i64))
        .collect();
    let n = cycle.len();
    let min_pos = (0..n).min_by_key(|&i| cycle[i]).unwrap();
    cycle.rotate_left(min_pos);
    if n > 2 && cycle[n - 1] < cycle[1] {
        cycle[1..].reverse();
    }
    cycle
}

fn flip_some(segments: &[Segment], rng: &mut StdRng) -> Vec<Segment> {
    segments
        .iter()
        .map(|s| if rng.random_bool(0.5) { s.reversed() } else { *s })
        .collect()
}

// --- Concrete scenarios ---

#[test]
fn test_mixed_orientation_square_forms_loop() {
    let checker = LoopChecker::default();
    let report = checker.check(&fixtures::square_mixed_orientation());

    assert!(report.is_closed());
    assert_eq!(report.message(), "Successfully formed a loop.");
    assert_eq!(report.chain.len(), 4);
    assert_eq!(report.chain, fixtures::square(10.0));
}

#[test]
fn test_disjoint_segments_raise_non_contiguous() {
    let err = chain_segments(fixtures::disjoint_three(), &ChainConfig::default()).unwrap_err();
    assert!(matches!(err, ChainError::NonContiguous { index: 0, .. }));

    let report = LoopChecker::default().check(&fixtures::disjoint_three());
    assert!(matches!(report.outcome, LoopOutcome::ChainFailed { .. }));
    assert!(!report.is_closed());
}

#[test]
fn test_two_segments_short_circuit() {
    let report = LoopChecker::default().check(&fixtures::square(10.0)[..2]);
    assert_eq!(
        report.outcome,
        LoopOutcome::InsufficientSegments { found: 2, required: 3 }
    );
    assert!(report.chain.is_empty());
}

// --- Properties ---

#[test]
fn test_ordered_loop_is_identity() {
    for chain in [fixtures::square(4.0), fixtures::l_shape(), fixtures::regular_polygon(9, 3.0)] {
        let sorted = chain_segments(chain.clone(), &ChainConfig::default()).unwrap();
        assert_eq!(sorted, chain);
        assert!(LoopChecker::default().check(&chain).is_closed());
    }
}

#[test]
fn test_orientation_invariance() {
    let mut rng = StdRng::seed_from_u64(7);
    let reference = canonical_cycle(&fixtures::l_shape());

    for _ in 0..50 {
        let flipped = flip_some(&fixtures::l_shape(), &mut rng);
        let report = LoopChecker::default().check(&flipped);
        assert!(report.is_closed(), "{}", report.message());
        assert_eq!(canonical_cycle(&report.chain), reference);
    }
}

#[test]
fn test_order_invariance() {
    let mut rng = StdRng::seed_from_u64(42);
    let polygon = fixtures::regular_polygon(8, 10.0);
    let reference = canonical_cycle(&polygon);

    for _ in 0..50 {
        let mut shuffled = flip_some(&polygon, &mut rng);
        shuffled.shuffle(&mut rng);
        let report = LoopChecker::default().check(&shuffled);
        assert!(report.is_closed(), "{}", report.message());
        assert_eq!(canonical_cycle(&report.chain), reference);

        let v = ChainValidator::new(&report.chain, ChainConfig::default().tolerance);
        assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
    }
}

#[test]
fn test_open_path_shuffled_keeps_not_closed() {
    let mut rng = StdRng::seed_from_u64(3);
    let segments = fixtures::open_u();
    for _ in 0..10 {
        // anchor on an end piece so chaining can walk the whole path
        let mut tail = segments[1..].to_vec();
        tail.shuffle(&mut rng);
        let mut input = vec![segments[0]];
        input.extend(tail);

        let report = LoopChecker::default().check(&input);
        match report.outcome {
            LoopOutcome::NotClosed { gap } => assert_abs_diff_eq!(gap, 10.0, epsilon = 1e-9),
            ref other => panic!("Expected NotClosed, got {:?}", other),
        }
    }
}

#[test]
fn test_isolated_segment_always_fails() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut segments = fixtures::square(10.0);
    segments.push(Segment::from_coords(100.0, 100.0, 110.0, 100.0));

    for _ in 0..20 {
        segments.shuffle(&mut rng);
        let err = chain_segments(segments.clone(), &ChainConfig::default()).unwrap_err();
        assert!(matches!(err, ChainError::NonContiguous { .. }));
    }
}

#[test]
fn test_tolerance_boundary() {
    // joints are off by exactly 0.25
    let jittered = fixtures::square_with_jitter(0.25);

    let at_threshold = LoopChecker::new(ChainConfig::with_tolerance(0.25), 3);
    assert!(!at_threshold.check(&jittered).is_closed());

    let just_above = LoopChecker::new(ChainConfig::with_tolerance(0.25 + 1e-9), 3);
    let report = just_above.check(&jittered);
    assert!(report.is_closed(), "{}", report.message());
}

#[test]
fn test_default_tolerance_absorbs_small_gaps() {
    let report = LoopChecker::default().check(&fixtures::square_with_jitter(0.05));
    assert!(report.is_closed());

    let report = LoopChecker::default().check(&fixtures::square_with_jitter(0.07));
    assert!(!report.is_closed());
}

#[test]
fn test_reversed_segments_keep_coordinates() {
    let input = fixtures::square_mixed_orientation();
    let report = LoopChecker::default().check(&input);
    for out in &report.chain {
        assert!(
            input.iter().any(|s| s == out || s.reversed() == *out),
            "segment {:?} not in input",
            out
        );
    }
}
