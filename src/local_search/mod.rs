//! Deterministic local search.

mod two_opt;

pub use two_opt::{is_two_opt_optimal, two_opt_delta, two_opt_refine, TwoOptConfig, TwoOptResult};
