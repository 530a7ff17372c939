//! End-to-end routing scenarios.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use u_routeplan::codec::RouteCodec;
use u_routeplan::distance::{haversine_km, DistanceMatrix, RoutingProvider};
use u_routeplan::error::{MatrixError, RouteError};
use u_routeplan::hybrid::{HybridConfig, HybridRunner, Method, Phase, RunState, StopReason};
use u_routeplan::local_search::is_two_opt_optimal;
use u_routeplan::models::Location;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

struct Unreachable;

impl RoutingProvider for Unreachable {
    fn matrix(&self, _locations: &[Location]) -> Result<DistanceMatrix, MatrixError> {
        Err(MatrixError::Unavailable("HTTP 503".into()))
    }
}

fn square(corners: &[(f64, f64)]) -> (Vec<Location>, DistanceMatrix) {
    let locations = corners
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Location::new(format!("c{i}"), y, x, format!("Corner {i}")))
        .collect();
    (locations, DistanceMatrix::from_euclidean(corners))
}

#[test]
fn square_route_avoids_the_diagonal() {
    // A(0,0) → B(0,1) → C(1,1) → D(1,0): three unit sides, no diagonal
    let (locations, matrix) = square(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    let result = HybridRunner::optimize(&locations, &matrix, &HybridConfig::default().with_seed(1)).unwrap();
    assert_eq!(result.order, vec![0, 1, 2, 3]);
    assert!((result.total_distance_km - 3.0).abs() < 1e-12);
    assert_eq!(result.method, Method::Hybrid);
}

#[test]
fn square_with_opposite_corners_as_endpoints() {
    // A(0,0) start, C(1,1) end: both interior orders use one diagonal
    let (locations, matrix) = square(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
    let result = HybridRunner::optimize(&locations, &matrix, &HybridConfig::default().with_seed(2)).unwrap();
    assert!(result.order == vec![0, 1, 2, 3] || result.order == vec![0, 2, 1, 3]);
    assert!((result.total_distance_km - (2.0 + SQRT_2)).abs() < 1e-12);
}

#[test]
fn provider_failure_uses_great_circle_distances() {
    let locations = vec![
        Location::new("start", 37.5665, 126.9780, "City Hall"),
        Location::new("a", 37.5796, 126.9770, "Palace"),
        Location::new("b", 37.5512, 126.9882, "Tower"),
        Location::new("c", 37.5704, 126.9997, "Market"),
        Location::new("end", 37.5547, 126.9707, "Station"),
    ];
    let config = HybridConfig::default().with_seed(3);
    let result = HybridRunner::optimize(&locations, &Unreachable, &config).unwrap();

    assert!(result.degraded);
    assert_eq!(result.method, Method::FallbackGeometric);
    assert_eq!(result.states[..2], [RunState::Init, RunState::Fallback]);
    for seg in &result.segments {
        let expected = haversine_km(&locations[seg.from], &locations[seg.to]) * 1.3;
        assert!((seg.distance_km - expected).abs() < 1e-9);
        assert!((seg.duration_min - expected / 60.0 * 60.0).abs() < 1e-9);
    }
}

#[test]
fn zero_deadline_still_returns_valid_route() {
    let xs: [f64; 12] = [0.0, 8.0, 3.0, 10.0, 1.0, 6.0, 9.0, 2.0, 7.0, 4.0, 5.0, 11.0];
    let points: Vec<(f64, f64)> = xs.iter().map(|&x| (x, (x * 0.7).sin())).collect();
    let locations: Vec<Location> = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Location::new(format!("w{i}"), y, x, format!("W{i}")))
        .collect();
    let matrix = DistanceMatrix::from_euclidean(&points);
    let config = HybridConfig::default()
        .with_seed(4)
        .with_deadline(Duration::ZERO);

    let result = HybridRunner::optimize(&locations, &matrix, &config).unwrap();
    assert_eq!(result.method, Method::BudgetLimited);
    assert!(result.budget_limited);
    assert!(!result.degraded);

    let mut sorted = result.order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..12).collect::<Vec<_>>());
    assert_eq!(result.order[0], 0);
    assert_eq!(result.order[11], 11);
    assert!(result.total_distance_km <= result.initial_distance_km + 1e-9);

    let quantum = result.phase(Phase::Quantum).unwrap();
    assert_eq!(quantum.stop, StopReason::BudgetExhausted);
    assert_eq!(result.phase(Phase::Whale).unwrap().stop, StopReason::Skipped);

    let codec = RouteCodec::new(&matrix);
    assert!(is_two_opt_optimal(&codec, &result.order[1..11], 1e-10));
}

#[test]
fn cancellation_before_search_still_refines() {
    let points: Vec<(f64, f64)> = (0..15).map(|i| ((i * 11 % 15) as f64, (i % 4) as f64)).collect();
    let locations: Vec<Location> = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Location::new(format!("w{i}"), y, x, format!("W{i}")))
        .collect();
    let matrix = DistanceMatrix::from_euclidean(&points);
    let cancel = Arc::new(AtomicBool::new(true));

    let result = HybridRunner::optimize_with_cancel(
        &locations,
        &matrix,
        &HybridConfig::default().with_seed(5),
        Some(Arc::clone(&cancel)),
    )
    .unwrap();
    assert!(cancel.load(Ordering::Relaxed));
    assert_eq!(result.method, Method::BudgetLimited);
    assert_eq!(result.states.last(), Some(&RunState::Done));
    assert!(result.states.contains(&RunState::Refining));
}

#[test]
fn invalid_input_is_rejected() {
    let matrix = DistanceMatrix::new(1);
    let one = vec![Location::new("only", 0.0, 0.0, "Only")];
    assert_eq!(
        HybridRunner::optimize(&one, &matrix, &HybridConfig::default()).unwrap_err(),
        RouteError::InvalidInput { count: 1 }
    );
}

#[test]
fn two_locations_are_trivial() {
    let (locations, matrix) = square(&[(0.0, 0.0), (3.0, 4.0)]);
    let result = HybridRunner::optimize(&locations, &matrix, &HybridConfig::default()).unwrap();
    assert_eq!(result.method, Method::Trivial);
    assert_eq!(result.order, vec![0, 1]);
    assert!((result.total_distance_km - 5.0).abs() < 1e-12);
    assert_eq!(result.quantum_iterations + result.whale_iterations + result.two_opt_passes, 0);
    assert!(result.phases.is_empty());
}

#[test]
fn missing_entries_are_penalized_not_fatal() {
    let (locations, mut matrix) = square(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
    matrix.set(1, 2, f64::NAN, f64::NAN);
    matrix.set(3, 2, -1.0, 5.0);
    let result = HybridRunner::optimize(&locations, &matrix, &HybridConfig::default().with_seed(6)).unwrap();
    assert_eq!(result.penalized_entries, 2);
    assert!(result.total_distance_km.is_finite());
    assert!(result.total_distance_km < 1.0e6);
}

#[test]
fn small_instances_match_enumeration() {
    let points = [(0.0, 0.0), (5.0, 5.0), (1.0, 4.0), (4.0, 1.0), (2.0, 2.0), (6.0, 0.0)];
    let (locations, matrix) = square(&points);
    let config = HybridConfig::default().with_seed(7).with_max_alternatives(30);
    let result = HybridRunner::optimize(&locations, &matrix, &config).unwrap();

    let codec = RouteCodec::new(&matrix);
    let best = result
        .alternatives
        .iter()
        .map(|a| a.distance_km)
        .fold(f64::INFINITY, f64::min);
    assert!((result.total_distance_km - best).abs() < 1e-9);
    assert_eq!(result.alternatives.len(), 24);
    assert!(result.alternatives.iter().any(|a| a.label == "exhaustive"));
    assert!(is_two_opt_optimal(&codec, &result.order[1..5], 1e-10));
}

#[cfg(feature = "serde")]
#[test]
fn result_serializes_to_json() {
    let (locations, matrix) = square(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    let result = HybridRunner::optimize(&locations, &matrix, &HybridConfig::default().with_seed(8)).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"method\":\"hybrid\""));
    assert!(json.contains("\"order\":[0,1,2,3]"));

    let back: u_routeplan::hybrid::OptimizationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.order, result.order);
}
