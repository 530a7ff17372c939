//! Hybrid orchestrator: matrix acquisition, exploration, exploitation,
//! refinement and result assembly.

use super::alternatives;
use super::config::HybridConfig;
use super::result::{Method, OptimizationResult, Phase, PhaseSummary, Segment, StopReason};
use super::state::{RunState, Trace};
use crate::budget::Budget;
use crate::codec::{RouteCodec, Tour};
use crate::construct;
use crate::distance::{DistanceMatrix, GeometricProvider, RoutingProvider};
use crate::error::RouteError;
use crate::local_search::two_opt_refine;
use crate::models::Location;
use crate::quantum::QuantumRunner;
use crate::random::{create_rng, resolve_seed};
use crate::whale::WhaleRunner;
use rand::rngs::StdRng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

const COST_EPSILON: f64 = 1e-10;

/// Everything the search phases hand over to result assembly.
struct SearchOutcome {
    tour: Tour,
    phases: Vec<PhaseSummary>,
    quantum_iterations: usize,
    whale_iterations: usize,
    two_opt_passes: usize,
    budget_limited: bool,
    labeled: Vec<(&'static str, Tour)>,
}

/// Runs the full route optimization pipeline.
///
/// # Examples
///
/// ```
/// use u_routeplan::distance::DistanceMatrix;
/// use u_routeplan::hybrid::{HybridConfig, HybridRunner, Method};
/// use u_routeplan::models::Location;
///
/// let locations = vec![
///     Location::new("a", 0.0, 0.0, "Depot"),
///     Location::new("b", 0.0, 2.0, "B"),
///     Location::new("c", 0.0, 1.0, "C"),
///     Location::new("d", 0.0, 3.0, "Hotel"),
/// ];
/// let matrix = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
///
/// let config = HybridConfig::default().with_seed(7);
/// let result = HybridRunner::optimize(&locations, &matrix, &config).unwrap();
/// assert_eq!(result.order, vec![0, 2, 1, 3]);
/// assert_eq!(result.method, Method::Hybrid);
/// assert!((result.total_distance_km - 3.0).abs() < 1e-10);
/// ```
pub struct HybridRunner;

impl HybridRunner {
    /// Optimizes the visiting order of `locations`.
    ///
    /// The first and last locations are the fixed start and end. Provider
    /// failures are recovered with great-circle distances; only invalid
    /// input or configuration produce an error.
    pub fn optimize(
        locations: &[Location],
        provider: &dyn RoutingProvider,
        config: &HybridConfig,
    ) -> Result<OptimizationResult, RouteError> {
        Self::optimize_with_cancel(locations, provider, config, None)
    }

    /// Like [`optimize`](Self::optimize), but stops searching once `cancel`
    /// is set. The route found so far is still refined and returned.
    pub fn optimize_with_cancel(
        locations: &[Location],
        provider: &dyn RoutingProvider,
        config: &HybridConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizationResult, RouteError> {
        let started = Instant::now();
        if locations.len() < 2 {
            return Err(RouteError::InvalidInput {
                count: locations.len(),
            });
        }
        config.validate()?;

        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);
        let mut budget = Budget::unlimited();
        if let Some(limit) = config.deadline {
            budget = budget.with_time_limit(started, limit);
        }
        if let Some(flag) = cancel {
            budget = budget.with_cancel(flag);
        }

        log::info!(
            "optimizing route over {} locations (seed {})",
            locations.len(),
            seed
        );

        let mut trace = Trace::new();
        let (mut matrix, degraded) = acquire_matrix(locations, provider, config, &mut trace);
        let penalized_entries = matrix.sanitize();
        if penalized_entries > 0 {
            log::warn!(
                "{} matrix entries were missing or invalid and are penalized",
                penalized_entries
            );
        }
        trace.advance(RunState::MatrixReady);

        let codec = RouteCodec::new(&matrix);
        let initial = construct::input_order(&codec);
        let initial_distance_km = codec.fitness(&initial);

        let trivial = codec.dimension() <= 1;
        let outcome = if trivial {
            trivial_outcome(&initial)
        } else {
            search(&codec, config, &budget, &mut rng, &mut trace)
        };
        trace.advance(RunState::Done);

        let method = if trivial {
            Method::Trivial
        } else if outcome.budget_limited {
            Method::BudgetLimited
        } else if degraded {
            Method::FallbackGeometric
        } else {
            Method::Hybrid
        };

        let order = codec.full_path(&outcome.tour);
        let segments = build_segments(&matrix, locations, &order);
        let alternatives =
            alternatives::collect(&codec, outcome.labeled, config.max_alternatives.max(1));

        let result = OptimizationResult {
            locations: order.iter().map(|&i| locations[i].clone()).collect(),
            total_distance_km: codec.fitness(&outcome.tour),
            total_duration_min: codec.duration(&outcome.tour),
            order,
            segments,
            method,
            quantum_iterations: outcome.quantum_iterations,
            whale_iterations: outcome.whale_iterations,
            two_opt_passes: outcome.two_opt_passes,
            compute_time: started.elapsed(),
            degraded,
            budget_limited: outcome.budget_limited,
            penalized_entries,
            seed,
            initial_distance_km,
            phases: outcome.phases,
            alternatives,
            states: trace.into_states(),
        };

        log::info!(
            "route optimized: method={}, distance={:.3} km (initial {:.3} km), time={:?}",
            result.method,
            result.total_distance_km,
            result.initial_distance_km,
            result.compute_time
        );
        Ok(result)
    }
}

/// Fetches the provider matrix, falling back to great-circle distances on
/// any failure. Returns the matrix and whether the fallback was used.
fn acquire_matrix(
    locations: &[Location],
    provider: &dyn RoutingProvider,
    config: &HybridConfig,
    trace: &mut Trace,
) -> (DistanceMatrix, bool) {
    let fetched = provider
        .matrix(locations)
        .and_then(|m| m.check_size(locations.len()).map(|()| m));
    match fetched {
        Ok(matrix) => (matrix, false),
        Err(e) => {
            log::warn!("{}; falling back to great-circle distances", e);
            trace.advance(RunState::Fallback);
            let fallback = GeometricProvider::new(config.road_factor, config.average_speed_kmh);
            (fallback.build(locations), true)
        }
    }
}

fn trivial_outcome(initial: &[usize]) -> SearchOutcome {
    SearchOutcome {
        tour: initial.to_vec(),
        phases: Vec::new(),
        quantum_iterations: 0,
        whale_iterations: 0,
        two_opt_passes: 0,
        budget_limited: false,
        labeled: vec![("input_order", initial.to_vec())],
    }
}

fn search(
    codec: &RouteCodec<'_>,
    config: &HybridConfig,
    budget: &Budget,
    rng: &mut StdRng,
    trace: &mut Trace,
) -> SearchOutcome {
    let input = construct::input_order(codec);
    let nearest = construct::nearest_neighbor(codec);
    let farthest = construct::farthest_insertion(codec);
    let seeds = vec![input.clone(), nearest.clone(), farthest.clone()];

    let quantum_config = config
        .quantum
        .clone()
        .with_parallel(config.parallel && config.quantum.parallel);
    let whale_config = config
        .whale
        .clone()
        .with_parallel(config.parallel && config.whale.parallel);

    let mut phases = Vec::with_capacity(3);

    // Exploration
    trace.advance(RunState::Exploring);
    let explored = QuantumRunner::run_with_budget(codec, &seeds, &quantum_config, budget, rng);
    let quantum_tour = codec.decode(&explored.best().keys);
    phases.push(summarize(
        codec,
        Phase::Quantum,
        &quantum_tour,
        explored.iterations,
        stop_reason(explored.stagnated, explored.budget_exhausted),
        explored.cost_history.clone(),
    ));
    let quantum_iterations = explored.iterations;
    let mut budget_limited = explored.budget_exhausted;
    let mut population = explored.population;

    // Exploitation
    let (elite_tour, whale_iterations) = if budget_limited {
        phases.push(summarize(
            codec,
            Phase::Whale,
            &quantum_tour,
            0,
            StopReason::Skipped,
            Vec::new(),
        ));
        (quantum_tour.clone(), 0)
    } else {
        trace.advance(RunState::Exploiting);
        let exploited =
            WhaleRunner::run_with_budget(codec, &mut population, &whale_config, budget, rng);
        budget_limited = exploited.budget_exhausted;
        let whale_tour = codec.decode(&exploited.best.keys);
        phases.push(summarize(
            codec,
            Phase::Whale,
            &whale_tour,
            exploited.iterations,
            stop_reason(exploited.stagnated, exploited.budget_exhausted),
            exploited.cost_history,
        ));
        (whale_tour, exploited.iterations)
    };
    if budget_limited {
        log::warn!("search budget exhausted; refining the best route found so far");
    }

    // Refinement starts from the best of the elite and the construction
    // seeds, so it never starts above the input order.
    trace.advance(RunState::Refining);
    let starts = [elite_tour.clone(), input.clone(), nearest.clone(), farthest.clone()];
    let (start, start_cost) =
        alternatives::shortest(codec, &starts).unwrap_or_else(|| (input.clone(), codec.fitness(&input)));
    let mut refined = two_opt_refine(codec, &start, &config.two_opt);
    let initial_cost = codec.fitness(&input);
    if refined.cost > initial_cost + COST_EPSILON {
        log::warn!(
            "refined route ({:.3}) is longer than the input order ({:.3}); refining the input order instead",
            refined.cost,
            initial_cost
        );
        refined = two_opt_refine(codec, &input, &config.two_opt);
    }
    log::debug!(
        "2-opt: {} passes, {} moves, {:.3} -> {:.3}",
        refined.passes,
        refined.moves,
        start_cost,
        refined.cost
    );
    phases.push(summarize(
        codec,
        Phase::TwoOpt,
        &refined.tour,
        refined.passes,
        StopReason::Completed,
        vec![start_cost, refined.cost],
    ));

    let mut tour = refined.tour;
    let mut labeled: Vec<(&'static str, Tour)> = Vec::new();

    // Small instances are also solved exactly
    let exhaustive = if codec.dimension() <= config.exhaustive_limit {
        let perms = alternatives::permutations(codec.interior());
        if let Some((best, cost)) = alternatives::shortest(codec, &perms) {
            if cost < refined.cost - COST_EPSILON {
                log::debug!("enumeration found a shorter route: {:.3} < {:.3}", cost, refined.cost);
                tour = best;
            }
        }
        perms
    } else {
        Vec::new()
    };

    labeled.push(("optimized", tour.clone()));
    labeled.push(("quantum", quantum_tour));
    labeled.push(("whale", elite_tour));
    labeled.push(("input_order", input));
    labeled.push(("nearest_neighbor", nearest));
    labeled.push(("farthest_insertion", farthest));
    labeled.extend(exhaustive.into_iter().map(|t| ("exhaustive", t)));

    SearchOutcome {
        tour,
        phases,
        quantum_iterations,
        whale_iterations,
        two_opt_passes: refined.passes,
        budget_limited,
        labeled,
    }
}

fn stop_reason(stagnated: bool, budget_exhausted: bool) -> StopReason {
    if budget_exhausted {
        StopReason::BudgetExhausted
    } else if stagnated {
        StopReason::Stagnated
    } else {
        StopReason::Completed
    }
}

fn summarize(
    codec: &RouteCodec<'_>,
    phase: Phase,
    tour: &[usize],
    iterations: usize,
    stop: StopReason,
    cost_history: Vec<f64>,
) -> PhaseSummary {
    PhaseSummary {
        phase,
        order: codec.full_path(tour),
        distance_km: codec.fitness(tour),
        iterations,
        stop,
        cost_history,
    }
}

fn build_segments(matrix: &DistanceMatrix, locations: &[Location], order: &[usize]) -> Vec<Segment> {
    order
        .windows(2)
        .map(|w| Segment {
            from: w[0],
            to: w[1],
            from_label: locations[w[0]].label.clone(),
            to_label: locations[w[1]].label.clone(),
            distance_km: matrix.distance(w[0], w[1]),
            duration_min: matrix.duration(w[0], w[1]),
        })
        .collect()
}
