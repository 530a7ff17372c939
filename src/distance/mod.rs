//! Pairwise distance and duration data.
//!
//! The optimizer never performs network I/O. A [`RoutingProvider`] hands it
//! a precomputed [`DistanceMatrix`]; when the provider fails, the
//! [`GeometricProvider`] builds an approximate one from great-circle
//! distances.

mod geo;
mod matrix;
mod provider;

pub use geo::{haversine_km, EARTH_RADIUS_KM};
pub use matrix::{DistanceMatrix, NON_FINITE_PENALTY_KM, NON_FINITE_PENALTY_MIN};
pub use provider::{GeometricProvider, RoutingProvider};
