//! Route order optimization for trips with a fixed start and end.
//!
//! Given a start, an end and the waypoints between them, finds a short
//! visiting order with a hybrid pipeline:
//!
//! - **Quantum-inspired exploration**: a population of random-key vectors
//!   sampled from per-dimension amplitude registers, with Metropolis
//!   acceptance under a cooling temperature.
//! - **Whale Optimization (WOA)**: encircling, search and spiral moves on
//!   the surviving population.
//! - **2-opt refinement**: deterministic segment reversal until no single
//!   move shortens the path.
//!
//! Distances come from a [`distance::RoutingProvider`]; when it fails the
//! optimizer falls back to great-circle distances scaled by a road factor.
//! A deadline or cancellation flag bounds the search without ever
//! producing an invalid route.
//!
//! # Example
//!
//! ```
//! use u_routeplan::distance::GeometricProvider;
//! use u_routeplan::hybrid::{HybridConfig, HybridRunner};
//! use u_routeplan::models::Location;
//!
//! let locations = vec![
//!     Location::new("home", 37.5665, 126.9780, "Home"),
//!     Location::new("museum", 37.5796, 126.9770, "Museum"),
//!     Location::new("market", 37.5704, 126.9997, "Market"),
//!     Location::new("tower", 37.5512, 126.9882, "Tower"),
//!     Location::new("hotel", 37.5547, 126.9707, "Hotel"),
//! ];
//!
//! let config = HybridConfig::default().with_seed(42);
//! let result = HybridRunner::optimize(&locations, &GeometricProvider::default(), &config).unwrap();
//! assert_eq!(result.order.first(), Some(&0));
//! assert_eq!(result.order.last(), Some(&4));
//! assert!(result.total_distance_km <= result.initial_distance_km + 1e-9);
//! ```

pub mod budget;
pub mod codec;
pub mod construct;
pub mod distance;
pub mod error;
pub mod hybrid;
pub mod local_search;
pub mod models;
pub mod quantum;
pub mod random;
pub mod whale;

