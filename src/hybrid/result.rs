//! Optimization result types.

use super::state::RunState;
use crate::models::Location;
use std::fmt;
use std::time::Duration;

/// How the returned route was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Method {
    /// Full pipeline on the provider's matrix.
    Hybrid,
    /// Full pipeline on the great-circle fallback matrix.
    FallbackGeometric,
    /// At most one interior waypoint; input order returned directly.
    Trivial,
    /// Deadline or cancellation cut the search short.
    BudgetLimited,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Hybrid => "hybrid",
            Method::FallbackGeometric => "fallback_geometric",
            Method::Trivial => "trivial",
            Method::BudgetLimited => "budget_limited",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimizer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Quantum,
    Whale,
    TwoOpt,
}

/// Why a phase stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Iteration (or pass) budget used up, or local optimum reached.
    Completed,
    /// Patience ran out without a new best.
    Stagnated,
    /// Deadline passed or cancellation requested.
    BudgetExhausted,
    /// Phase never ran.
    Skipped,
}

/// One leg of the returned route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Index of the departure location in the caller's input.
    pub from: usize,
    /// Index of the arrival location in the caller's input.
    pub to: usize,
    pub from_label: String,
    pub to_label: String,
    pub distance_km: f64,
    pub duration_min: f64,
}

/// What a single phase achieved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseSummary {
    pub phase: Phase,
    /// Best full order (endpoints included) at the end of the phase.
    pub order: Vec<usize>,
    pub distance_km: f64,
    /// Iterations, or scans for 2-opt.
    pub iterations: usize,
    pub stop: StopReason,
    /// Best cost after initialization and after each iteration.
    pub cost_history: Vec<f64>,
}

/// A distinct candidate route, for presenting options to the user.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlternativeRoute {
    /// Where the route came from, e.g. `"whale"` or `"nearest_neighbor"`.
    pub label: String,
    /// Full order, endpoints included.
    pub order: Vec<usize>,
    pub distance_km: f64,
    pub duration_min: f64,
}

/// Final outcome of [`HybridRunner::optimize`](super::HybridRunner::optimize).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    /// Visiting order over input indices, first and last fixed.
    pub order: Vec<usize>,
    /// Locations in visiting order.
    pub locations: Vec<Location>,
    pub total_distance_km: f64,
    pub total_duration_min: f64,
    pub segments: Vec<Segment>,
    pub method: Method,
    pub quantum_iterations: usize,
    pub whale_iterations: usize,
    pub two_opt_passes: usize,
    /// Wall-clock time of the whole call.
    pub compute_time: Duration,
    /// The great-circle fallback replaced the routing provider.
    pub degraded: bool,
    /// The deadline or cancellation cut the search short.
    pub budget_limited: bool,
    /// Matrix entries replaced by the non-finite penalty.
    pub penalized_entries: usize,
    /// Seed that reproduces this run.
    pub seed: u64,
    /// Distance of the caller's input order.
    pub initial_distance_km: f64,
    pub phases: Vec<PhaseSummary>,
    /// Distinct routes sorted by distance; the first matches `order`.
    pub alternatives: Vec<AlternativeRoute>,
    /// Orchestrator states visited, in order.
    pub states: Vec<RunState>,
}

impl OptimizationResult {
    /// Summary of `phase`, if it is recorded.
    pub fn phase(&self, phase: Phase) -> Option<&PhaseSummary> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    /// Distance saved relative to the input order, in km.
    pub fn improvement_km(&self) -> f64 {
        self.initial_distance_km - self.total_distance_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tags() {
        assert_eq!(Method::Hybrid.to_string(), "hybrid");
        assert_eq!(Method::FallbackGeometric.as_str(), "fallback_geometric");
        assert_eq!(Method::Trivial.as_str(), "trivial");
        assert_eq!(Method::BudgetLimited.as_str(), "budget_limited");
    }
}
