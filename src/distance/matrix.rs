//! Dense distance/duration matrix.

use crate::error::MatrixError;

/// Distance substituted for non-finite or negative entries, in km.
pub const NON_FINITE_PENALTY_KM: f64 = 1.0e6;

/// Duration substituted for non-finite or negative entries, in minutes.
pub const NON_FINITE_PENALTY_MIN: f64 = 1.0e6;

/// A dense n×n table of `(distance_km, duration_min)` stored in row-major order.
///
/// Entries are directional: `distance(i, j)` need not equal `distance(j, i)`
/// (one-way roads), and the triangle inequality is not assumed.
///
/// # Examples
///
/// ```
/// use u_routeplan::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (3.0, 4.0)]);
/// assert!((dm.distance(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    distances: Vec<f64>,
    durations: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            distances: vec![0.0; size * size],
            durations: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from explicit row-major distance and duration grids.
    ///
    /// Returns `None` if either grid length doesn't match `size * size`.
    pub fn from_data(size: usize, distances: Vec<f64>, durations: Vec<f64>) -> Option<Self> {
        if distances.len() != size * size || durations.len() != size * size {
            return None;
        }
        Some(Self {
            distances,
            durations,
            size,
        })
    }

    /// Euclidean distances between planar points. Durations mirror distances.
    pub fn from_euclidean(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = (points[i].0 - points[j].0).hypot(points[i].1 - points[j].1);
                dm.set(i, j, d, d);
                dm.set(j, i, d, d);
            }
        }
        dm
    }

    /// Distance from `from` to `to`, in km.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.size + to]
    }

    /// Travel time from `from` to `to`, in minutes.
    #[inline]
    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.durations[from * self.size + to]
    }

    /// Sets both the distance and duration for the ordered pair.
    pub fn set(&mut self, from: usize, to: usize, distance_km: f64, duration_min: f64) {
        let k = from * self.size + to;
        self.distances[k] = distance_km;
        self.durations[k] = duration_min;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks that this matrix covers exactly `expected` locations.
    pub fn check_size(&self, expected: usize) -> Result<(), MatrixError> {
        if self.size != expected {
            return Err(MatrixError::DimensionMismatch {
                expected,
                actual: self.size,
            });
        }
        Ok(())
    }

    /// Returns `true` if distances are symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.distance(i, j) - self.distance(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Replaces non-finite or negative entries with the penalty constants
    /// and forces the diagonal to zero.
    ///
    /// Returns the number of off-diagonal entries that were substituted.
    pub fn sanitize(&mut self) -> usize {
        let mut replaced = 0;
        for i in 0..self.size {
            for j in 0..self.size {
                let k = i * self.size + j;
                if i == j {
                    self.distances[k] = 0.0;
                    self.durations[k] = 0.0;
                    continue;
                }
                let mut bad = false;
                if !is_valid_entry(self.distances[k]) {
                    self.distances[k] = NON_FINITE_PENALTY_KM;
                    bad = true;
                }
                if !is_valid_entry(self.durations[k]) {
                    self.durations[k] = NON_FINITE_PENALTY_MIN;
                    bad = true;
                }
                if bad {
                    replaced += 1;
                }
            }
        }
        replaced
    }

    /// Returns the nearest of `candidates` when leaving `from`.
    ///
    /// Ties go to the earlier candidate. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.distance(from, a).total_cmp(&self.distance(from, b)))
    }
}

fn is_valid_entry(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistanceMatrix {
        DistanceMatrix::from_euclidean(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)])
    }

    #[test]
    fn test_from_euclidean() {
        let dm = triangle();
        assert_eq!(dm.size(), 3);
        assert!((dm.distance(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.distance(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.duration(0, 2) - 8.0).abs() < 1e-10);
        assert!(dm.distance(1, 1).abs() < 1e-10);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0; 4], vec![0.0; 3]).is_none());
        assert!(DistanceMatrix::from_data(2, vec![0.0; 4], vec![0.0; 4]).is_some());
    }

    #[test]
    fn test_asymmetric() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0, 12.0);
        dm.set(1, 0, 15.0, 18.0);
        assert!(!dm.is_symmetric(1e-10));
        assert_eq!(dm.duration(1, 0), 18.0);
    }

    #[test]
    fn test_sanitize_replaces_bad_entries() {
        let mut dm = triangle();
        dm.set(0, 1, f64::NAN, 5.0);
        dm.set(1, 2, f64::INFINITY, f64::NEG_INFINITY);
        dm.set(2, 0, -1.0, 3.0);
        dm.set(1, 1, 7.0, 7.0);

        let replaced = dm.sanitize();

        assert_eq!(replaced, 3);
        assert_eq!(dm.distance(0, 1), NON_FINITE_PENALTY_KM);
        assert_eq!(dm.duration(0, 1), 5.0);
        assert_eq!(dm.distance(1, 2), NON_FINITE_PENALTY_KM);
        assert_eq!(dm.duration(1, 2), NON_FINITE_PENALTY_MIN);
        assert_eq!(dm.distance(2, 0), NON_FINITE_PENALTY_KM);
        assert_eq!(dm.distance(1, 1), 0.0);
    }

    #[test]
    fn test_sanitize_clean_matrix_untouched() {
        let mut dm = triangle();
        let before = dm.clone();
        assert_eq!(dm.sanitize(), 0);
        assert_eq!(dm, before);
    }

    #[test]
    fn test_check_size() {
        let dm = triangle();
        assert!(dm.check_size(3).is_ok());
        assert_eq!(
            dm.check_size(4),
            Err(MatrixError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_nearest_neighbor() {
        let dm = triangle();
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }
}
