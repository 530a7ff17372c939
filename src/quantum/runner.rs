//! Quantum exploration loop.
//!
//! # Algorithm
//!
//! Each candidate carries an [`Amplitudes`] register. At iteration
//! `t = 1..=T1`, with leader `L` (the elite as of the end of `t - 1`):
//!
//! 1. **Rotate** every dimension of every register toward α (the leader)
//!    by `Δθ_t = max_rotation · (1 - t/T1)`. A NOT gate fires per
//!    dimension with probability `mutation_rate`.
//! 2. **Collapse**: `key[d] = α² · L[d] + β² · U(0, 1)`.
//! 3. **Evaluate** all proposals (parallel when enabled).
//! 4. **Accept** (Metropolis): improvements always, otherwise with
//!    probability `exp(-Δ / T)`. Then `T ← cooling_factor · T`.
//!
//! The leader is refreshed only after every proposal of the iteration
//! has been evaluated.

use super::config::QuantumConfig;
use super::types::Amplitudes;
use crate::budget::Budget;
use crate::codec::{Candidate, Population, RouteCodec, Tour};
use rand::Rng;

/// Outcome of the exploration phase.
#[derive(Debug, Clone)]
pub struct QuantumResult {
    /// The evolved population, elite included. Seeds the whale phase.
    pub population: Population,

    /// Completed iterations.
    pub iterations: usize,

    /// Whether terminated by the patience rule.
    pub stagnated: bool,

    /// Whether the deadline or cancellation stopped the phase.
    pub budget_exhausted: bool,

    /// Temperature when the phase stopped.
    pub final_temperature: f64,

    /// Accepted proposals (including improvements).
    pub accepted_moves: usize,

    /// Strictly improving proposals.
    pub improving_moves: usize,

    /// Elite cost after initialization and after each iteration.
    pub cost_history: Vec<f64>,
}

impl QuantumResult {
    /// The best candidate found.
    pub fn best(&self) -> &Candidate {
        self.population.elite()
    }
}

/// Executes the quantum-inspired exploration phase.
pub struct QuantumRunner;

impl QuantumRunner {
    /// Runs exploration without a deadline.
    pub fn run<R: Rng>(
        codec: &RouteCodec<'_>,
        seeds: &[Tour],
        config: &QuantumConfig,
        rng: &mut R,
    ) -> QuantumResult {
        Self::run_with_budget(codec, seeds, config, &Budget::unlimited(), rng)
    }

    /// Runs exploration, polling `budget` between iterations.
    ///
    /// `seeds` are tours placed into the initial population ahead of
    /// random members; at most `population_size` are used.
    pub fn run_with_budget<R: Rng>(
        codec: &RouteCodec<'_>,
        seeds: &[Tour],
        config: &QuantumConfig,
        budget: &Budget,
        rng: &mut R,
    ) -> QuantumResult {
        let dim = codec.dimension();
        let pop_size = config.population_size.max(1);

        // Initialize: seeded tours first, then uniform random keys
        let mut batch: Vec<Vec<f64>> = seeds
            .iter()
            .take(pop_size)
            .map(|tour| codec.encode(tour))
            .collect();
        while batch.len() < pop_size {
            batch.push((0..dim).map(|_| rng.random_range(0.0..1.0)).collect());
        }
        let costs = codec.evaluate_batch(&batch, config.parallel);
        let members: Vec<Candidate> = batch
            .into_iter()
            .zip(costs)
            .map(|(keys, cost)| Candidate::new(keys, cost))
            .collect();
        let mut population = Population::new(members);

        let mut registers: Vec<Amplitudes> =
            (0..pop_size).map(|_| Amplitudes::superposition(dim)).collect();

        let mut temperature = (config.initial_temperature * population.elite().cost).max(1e-9);
        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(population.elite().cost);

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut budget_exhausted = false;

        for t in 1..=config.max_iterations {
            if budget.exhausted() {
                budget_exhausted = true;
                break;
            }

            let leader = population.elite().clone();
            let progress = t as f64 / config.max_iterations as f64;
            let delta_theta = config.max_rotation * (1.0 - progress);

            // Rotate and collapse (sequential: consumes the RNG)
            let proposals: Vec<Vec<f64>> = registers
                .iter_mut()
                .map(|reg| {
                    steer(reg, delta_theta, config.mutation_rate, rng);
                    reg.collapse(&leader.keys, rng)
                })
                .collect();

            let costs = codec.evaluate_batch(&proposals, config.parallel);

            // Metropolis acceptance
            for ((member, keys), cost) in population
                .members_mut()
                .iter_mut()
                .zip(proposals)
                .zip(costs)
            {
                let delta = cost - member.cost;
                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else {
                    rng.random_range(0.0..1.0) < (-delta / temperature).exp()
                };
                if accept {
                    accepted_moves += 1;
                    member.keys = keys;
                    member.cost = cost;
                }
            }

            // Generation barrier: refresh the leader
            let round_best = population
                .members()
                .iter()
                .min_by(|a, b| a.cost.total_cmp(&b.cost))
                .cloned();
            let improved = round_best.is_some_and(|c| population.offer(&c));

            temperature *= config.cooling_factor;
            iterations = t;
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
            "quantum phase: {} iterations, best {:.4}, accepted {}/{}",
            iterations,
            population.elite().cost,
            accepted_moves,
            iterations * pop_size
        );

        QuantumResult {
            population,
            iterations,
            stagnated,
            budget_exhausted,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cost_history,
        }
    }
}

/// Rotates every dimension toward the leader by `delta_theta`, then
/// applies a NOT gate per dimension with probability `mutation_rate`.
fn steer<R: Rng>(reg: &mut Amplitudes, delta_theta: f64, mutation_rate: f64, rng: &mut R) {
    for d in 0..reg.dimension() {
        reg.rotate(d, delta_theta);
        if rng.random_range(0.0..1.0) < mutation_rate {
            reg.not_gate(d);
        }
    }
}
