//! 2-opt refinement for open paths with fixed endpoints.
//!
//! # Algorithm
//!
//! On the full path `start, t_1, ..., t_m, end`, a move picks edges
//! `(i, i+1)` and `(j, j+1)` with `i + 2 <= j` and reverses `path[i+1..=j]`.
//! Position 0 and the last position are never inside the reversed range,
//! so the endpoints stay put, while the edges touching them can still be
//! exchanged.
//!
//! Because the matrix may be asymmetric, the delta includes the change of
//! direction of every edge inside the reversed segment:
//!
//! ```text
//! delta = d(p[i], p[j]) + d(p[i+1], p[j+1]) - d(p[i], p[i+1]) - d(p[j], p[j+1])
//!       + Σ (d(p[k+1], p[k]) - d(p[k], p[k+1]))   for k in i+1..j
//! ```
//!
//! First-improvement strategy: scan `i` then `j` ascending, apply the first
//! move with `delta < -epsilon`, restart the scan. Stops at a local optimum
//! or after `max_passes` scans. No randomness.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::codec::{path_distance, RouteCodec, Tour};
use crate::distance::DistanceMatrix;

/// Configuration for the 2-opt refiner.
#[derive(Debug, Clone)]
pub struct TwoOptConfig {
    /// Maximum number of scans (each applied move starts a new scan).
    pub max_passes: usize,

    /// A move must shorten the path by more than this to count.
    pub epsilon: f64,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            max_passes: 1000,
            epsilon: 1e-10,
        }
    }
}

impl TwoOptConfig {
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_passes == 0 {
            return Err("two_opt max_passes must be at least 1".into());
        }
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(format!(
                "two_opt epsilon must be non-negative, got {}",
                self.epsilon
            ));
        }
        Ok(())
    }
}

/// Outcome of a 2-opt refinement.
#[derive(Debug, Clone)]
pub struct TwoOptResult {
    /// Refined interior order.
    pub tour: Tour,

    /// Total path distance of `tour`.
    pub cost: f64,

    /// Scans performed.
    pub passes: usize,

    /// Improving moves applied.
    pub moves: usize,

    /// `true` if the last scan found no improving move.
    pub converged: bool,
}

/// Applies first-improvement 2-opt to an interior tour.
///
/// # Examples
///
/// ```
/// use u_routeplan::codec::RouteCodec;
/// use u_routeplan::distance::DistanceMatrix;
/// use u_routeplan::local_search::{two_opt_refine, TwoOptConfig};
///
/// // start (0,0), end (3,0); interior at x = 2 and x = 1
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
/// let codec = RouteCodec::new(&dm);
///
/// let result = two_opt_refine(&codec, &[1, 2], &TwoOptConfig::default());
/// assert_eq!(result.tour, vec![2, 1]);
/// assert!((result.cost - 3.0).abs() < 1e-10);
/// ```
pub fn two_opt_refine(codec: &RouteCodec<'_>, tour: &[usize], config: &TwoOptConfig) -> TwoOptResult {
    let matrix = codec.matrix();
    let mut path = codec.full_path(tour);
    let len = path.len();
    let mut passes = 0usize;
    let mut moves = 0usize;
    let mut converged = false;

    while passes < config.max_passes {
        passes += 1;
        match first_improvement(matrix, &path, config.epsilon) {
            Some((i, j)) => {
                path[i + 1..=j].reverse();
                moves += 1;
            }
            None => {
                converged = true;
                break;
            }
        }
    }

    let cost = path_distance(matrix, &path);
    TwoOptResult {
        tour: path[1..len - 1].to_vec(),
        cost,
        passes,
        moves,
        converged,
    }
}

/// Distance change from reversing `path[i+1..=j]`.
///
/// Requires `i + 2 <= j` and `j + 1 < path.len()`.
pub fn two_opt_delta(matrix: &DistanceMatrix, path: &[usize], i: usize, j: usize) -> f64 {
    let (a, b) = (path[i], path[i + 1]);
    let (c, d) = (path[j], path[j + 1]);
    let mut delta =
        matrix.distance(a, c) + matrix.distance(b, d) - matrix.distance(a, b) - matrix.distance(c, d);
    for k in (i + 1)..j {
        let (u, v) = (path[k], path[k + 1]);
        delta += matrix.distance(v, u) - matrix.distance(u, v);
    }
    delta
}

/// Returns `true` if no 2-opt move shortens `start → tour → end` by more
/// than `epsilon`.
pub fn is_two_opt_optimal(codec: &RouteCodec<'_>, tour: &[usize], epsilon: f64) -> bool {
    let path = codec.full_path(tour);
    first_improvement(codec.matrix(), &path, epsilon).is_none()
}

fn first_improvement(matrix: &DistanceMatrix, path: &[usize], epsilon: f64) -> Option<(usize, usize)> {
    let len = path.len();
    if len < 4 {
        return None;
    }
    for i in 0..len - 3 {
        for j in (i + 2)..len - 1 {
            if two_opt_delta(matrix, path, i, j) < -epsilon {
                return Some((i, j));
            }
        }
    }
    None
}
