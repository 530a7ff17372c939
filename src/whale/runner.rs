//! Whale optimization loop.
//!
//! # Algorithm (per iteration `t`)
//!
//! `a` decreases linearly from 2 toward 0 over T2. For each whale `X`,
//! with `A = 2a·r1 - a`, `C = 2·r2` and branch draw `p`:
//!
//! - `p < 0.5`, `|A| < 1` (**encircling**): `X' = L - A·|C·L - X|`
//! - `p < 0.5`, `|A| ≥ 1` (**search**): `X' = R - A·|C·R - X|`, `R` a random whale
//! - `p ≥ 0.5` (**spiral**): `X' = |L - X|·e^{b·l}·cos(2πl) + L`, `l ~ U(-1, 1)`
//!
//! `X'` is clipped to `[0, 1]` and replaces `X` only if it is cheaper.
//! All moves of an iteration read the leader `L` and the population as
//! they stood when the iteration began; the leader is updated once every
//! whale has been evaluated.

use super::config::WhaleConfig;
use crate::budget::Budget;
use crate::codec::{Candidate, Population, RouteCodec};
use rand::Rng;
use std::f64::consts::PI;

/// Outcome of the exploitation phase.
#[derive(Debug, Clone)]
pub struct WhaleResult {
    /// The global best candidate (the population's elite).
    pub best: Candidate,

    /// Completed iterations.
    pub iterations: usize,

    /// Whether terminated by the patience rule.
    pub stagnated: bool,

    /// Whether the deadline or cancellation stopped the phase.
    pub budget_exhausted: bool,

    /// Moves drawn per branch.
    pub encircling_moves: usize,
    pub search_moves: usize,
    pub spiral_moves: usize,

    /// Proposals that replaced their whale.
    pub improving_moves: usize,

    /// Leader cost after seeding and after each iteration.
    pub cost_history: Vec<f64>,
}

/// Bubble-net move chosen for one whale.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Move {
    Encircle,
    Search,
    Spiral,
}

/// Executes the whale optimization phase.
pub struct WhaleRunner;

impl WhaleRunner {
    /// Runs exploitation without a deadline.
    pub fn run<R: Rng>(
        codec: &RouteCodec<'_>,
        population: &mut Population,
        config: &WhaleConfig,
        rng: &mut R,
    ) -> WhaleResult {
        Self::run_with_budget(codec, population, config, &Budget::unlimited(), rng)
    }

    /// Runs exploitation on `population` in place, polling `budget`
    /// between iterations.
    ///
    /// Incoming keys are first re-encoded canonically (evenly spaced per
    /// decoded tour), then the population is resized to
    /// `config.population_size`.
    pub fn run_with_budget<R: Rng>(
        codec: &RouteCodec<'_>,
        population: &mut Population,
        config: &WhaleConfig,
        budget: &Budget,
        rng: &mut R,
    ) -> WhaleResult {
        let dim = codec.dimension();
        let size = config.population_size.max(1);

        population.map_keys(|keys| codec.encode(&codec.decode(keys)));
        if population.len() > size {
            population.retain_best(size);
        } else if population.len() < size {
            let fresh: Vec<Vec<f64>> = (population.len()..size)
                .map(|_| (0..dim).map(|_| rng.random_range(0.0..1.0)).collect())
                .collect();
            let costs = codec.evaluate_batch(&fresh, config.parallel);
            for (keys, cost) in fresh.into_iter().zip(costs) {
                population.push(Candidate::new(keys, cost));
            }
        }

        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(population.elite().cost);

        let b = config.spiral_constant;
        let mut iterations = 0usize;
        let mut counts = [0usize; 3];
        let mut improving_moves = 0usize;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut budget_exhausted = false;

        for t in 0..config.max_iterations {
            if budget.exhausted() {
                budget_exhausted = true;
                break;
            }

            let a = 2.0 - 2.0 * t as f64 / config.max_iterations as f64;
            let leader = population.elite().keys.clone();
            let members = population.members();
            let n = members.len();

            let proposals: Vec<Vec<f64>> = members
                .iter()
                .map(|whale| {
                    let r1: f64 = rng.random_range(0.0..1.0);
                    let r2: f64 = rng.random_range(0.0..1.0);
                    let p: f64 = rng.random_range(0.0..1.0);
                    let big_a = 2.0 * a * r1 - a;
                    let c = 2.0 * r2;

                    let (mv, next) = if p < 0.5 {
                        if big_a.abs() < 1.0 {
                            (Move::Encircle, encircle(&whale.keys, &leader, big_a, c))
                        } else {
                            let target = &members[rng.random_range(0..n)].keys;
                            (Move::Search, encircle(&whale.keys, target, big_a, c))
                        }
                    } else {
                        let l: f64 = rng.random_range(-1.0..=1.0);
                        (Move::Spiral, spiral(&whale.keys, &leader, b, l))
                    };
                    counts[mv as usize] += 1;
                    next
                })
                .collect();

            let costs = codec.evaluate_batch(&proposals, config.parallel);

            // Greedy acceptance
            for ((whale, keys), cost) in population
                .members_mut()
                .iter_mut()
                .zip(proposals)
                .zip(costs)
            {
                if cost < whale.cost {
                    whale.keys = keys;
                    whale.cost = cost;
                    improving_moves += 1;
                }
            }

            // Generation barrier: refresh the leader
            let round_best = population
                .members()
                .iter()
                .min_by(|x, y| x.cost.total_cmp(&y.cost))
                .cloned();
            let improved = round_best.is_some_and(|c| population.offer(&c));

            iterations = t + 1;
            cost_history.push(population.elite().cost);

            if improved {
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }
            if config.patience > 0 && stagnation_counter >= config.patience {
                stagnated = true;
                break;
            }
        }

        log::debug!(
            "whale phase: {} iterations, best {:.4}, moves encircle/search/spiral {}/{}/{}",
            iterations,
            population.elite().cost,
            counts[Move::Encircle as usize],
            counts[Move::Search as usize],
            counts[Move::Spiral as usize]
        );

        WhaleResult {
            best: population.elite().clone(),
            iterations,
            stagnated,
            budget_exhausted,
            encircling_moves: counts[Move::Encircle as usize],
            search_moves: counts[Move::Search as usize],
            spiral_moves: counts[Move::Spiral as usize],
            improving_moves,
            cost_history,
        }
    }
}

/// `X' = T - A·|C·T - X|`, clipped to `[0, 1]`.
fn encircle(x: &[f64], target: &[f64], big_a: f64, c: f64) -> Vec<f64> {
    x.iter()
        .zip(target)
        .map(|(&xi, &ti)| (ti - big_a * (c * ti - xi).abs()).clamp(0.0, 1.0))
        .collect()
}

/// `X' = |L - X|·e^{b·l}·cos(2πl) + L`, clipped to `[0, 1]`.
///
/// A coordinate that is not finite (`0 · ∞` when `e^{b·l}` overflows)
/// takes the leader's key.
fn spiral(x: &[f64], leader: &[f64], b: f64, l: f64) -> Vec<f64> {
    let factor = (b * l).exp() * (2.0 * PI * l).cos();
    x.iter()
        .zip(leader)
        .map(|(&xi, &li)| {
            let next = (li - xi).abs() * factor + li;
            if next.is_finite() {
                next.clamp(0.0, 1.0)
            } else {
                li
            }
        })
        .collect()
}
