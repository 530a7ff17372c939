//! Candidate encoding and fitness.
//!
//! A tour over the interior waypoints is represented in the continuous
//! phases as a **key vector** in `[0, 1]^m` (random-key encoding): sorting
//! the interior waypoints by key yields the visiting order. This lets the
//! annealing and whale phases move through a real-valued space while
//! every point of that space still decodes to a valid permutation.
//!
//! # References
//!
//! - Bean (1994), "Genetic algorithms and random keys for sequencing and optimization"

mod population;
mod route;

pub use population::{Candidate, Population};
pub(crate) use route::path_distance;
pub use route::{RouteCodec, Tour};
