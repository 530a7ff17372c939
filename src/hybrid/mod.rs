//! Hybrid route optimizer.
//!
//! Chains the phases into one run:
//!
//! 1. Fetch the distance matrix from a [`RoutingProvider`](crate::distance::RoutingProvider),
//!    falling back to great-circle distances when it fails.
//! 2. Explore with the quantum-inspired population, seeded by the input
//!    order and the construction heuristics.
//! 3. Exploit the surviving population with the whale optimizer.
//! 4. Refine the best tour with 2-opt.
//!
//! A deadline or cancellation skips straight to refinement, so a valid,
//! locally optimal route is always returned.

mod alternatives;
mod config;
mod result;
mod runner;
mod state;

pub use crate::budget::Budget;
pub use config::HybridConfig;
pub use result::{
    AlternativeRoute, Method, OptimizationResult, Phase, PhaseSummary, Segment, StopReason,
};
pub use runner::HybridRunner;
pub use state::RunState;
