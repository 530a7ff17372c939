//! Distance matrix sources.

use super::geo::haversine_km;
use super::matrix::DistanceMatrix;
use crate::error::MatrixError;
use crate::models::Location;

/// Source of road distances and durations for a set of locations.
///
/// Implementations typically wrap an external routing service. The
/// optimizer calls [`matrix`](Self::matrix) once per request and treats
/// every error as recoverable.
///
/// # Examples
///
/// ```
/// use u_routeplan::distance::{DistanceMatrix, RoutingProvider};
/// use u_routeplan::error::MatrixError;
/// use u_routeplan::models::Location;
///
/// struct Offline;
///
/// impl RoutingProvider for Offline {
///     fn matrix(&self, _locations: &[Location]) -> Result<DistanceMatrix, MatrixError> {
///         Err(MatrixError::Unavailable("no network".into()))
///     }
/// }
/// ```
pub trait RoutingProvider: Send + Sync {
    /// Returns the pairwise matrix for `locations`, in the given order.
    fn matrix(&self, locations: &[Location]) -> Result<DistanceMatrix, MatrixError>;
}

/// A precomputed matrix serves as its own provider.
impl RoutingProvider for DistanceMatrix {
    fn matrix(&self, locations: &[Location]) -> Result<DistanceMatrix, MatrixError> {
        self.check_size(locations.len())?;
        Ok(self.clone())
    }
}

/// Great-circle approximation of road distances.
///
/// Road length is estimated as `haversine × road_factor`, and duration
/// assumes a constant average speed.
#[derive(Debug, Clone, Copy)]
pub struct GeometricProvider {
    /// Ratio of road length to straight-line length.
    pub road_factor: f64,
    /// Average travel speed in km/h.
    pub average_speed_kmh: f64,
}

impl Default for GeometricProvider {
    fn default() -> Self {
        Self {
            road_factor: 1.3,
            average_speed_kmh: 60.0,
        }
    }
}

impl GeometricProvider {
    pub fn new(road_factor: f64, average_speed_kmh: f64) -> Self {
        Self {
            road_factor,
            average_speed_kmh,
        }
    }

    /// Builds the approximate matrix. Never fails.
    pub fn build(&self, locations: &[Location]) -> DistanceMatrix {
        let n = locations.len();
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_km(&locations[i], &locations[j]) * self.road_factor;
                let t = d / self.average_speed_kmh * 60.0;
                dm.set(i, j, d, t);
                dm.set(j, i, d, t);
            }
        }
        dm
    }
}

impl RoutingProvider for GeometricProvider {
    fn matrix(&self, locations: &[Location]) -> Result<DistanceMatrix, MatrixError> {
        Ok(self.build(locations))
    }
}
