//! Tour codec over a distance matrix.

use crate::distance::DistanceMatrix;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A visiting order of the interior waypoints, as input location indices.
///
/// The fixed start and end are implicit and never part of a `Tour`.
pub type Tour = Vec<usize>;

/// Converts between key vectors and tours, and prices tours.
///
/// Location `0` is the fixed start, location `n - 1` the fixed end, and
/// locations `1..n-1` are the interior waypoints. Key dimension `d`
/// belongs to interior location `d + 1`.
///
/// # Examples
///
/// ```
/// use u_routeplan::codec::RouteCodec;
/// use u_routeplan::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
/// let codec = RouteCodec::new(&dm);
///
/// let tour = codec.decode(&[0.9, 0.1]);
/// assert_eq!(tour, vec![2, 1]);
/// assert!((codec.fitness(&tour) - 3.0).abs() < 1e-10);
/// assert_eq!(codec.decode(&codec.encode(&tour)), tour);
/// ```
#[derive(Debug, Clone)]
pub struct RouteCodec<'a> {
    matrix: &'a DistanceMatrix,
    start: usize,
    end: usize,
    interior: Vec<usize>,
}

impl<'a> RouteCodec<'a> {
    /// Creates a codec for a matrix with at least two locations.
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        let n = matrix.size();
        let end = n.saturating_sub(1);
        Self {
            matrix,
            start: 0,
            end,
            interior: (1..end).collect(),
        }
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        self.matrix
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Interior waypoints in input order (the identity tour).
    pub fn interior(&self) -> &[usize] {
        &self.interior
    }

    /// Key vector length (number of interior waypoints).
    pub fn dimension(&self) -> usize {
        self.interior.len()
    }

    /// Decodes a key vector into a tour.
    ///
    /// Interior waypoints are sorted by key ascending; equal keys keep
    /// input order, so decoding is a deterministic total order.
    pub fn decode(&self, keys: &[f64]) -> Tour {
        debug_assert_eq!(keys.len(), self.dimension());
        let mut dims: Vec<usize> = (0..keys.len()).collect();
        dims.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]).then(a.cmp(&b)));
        dims.into_iter().map(|d| self.interior[d]).collect()
    }

    /// Encodes a tour as evenly spaced keys in `(0, 1)`.
    ///
    /// The waypoint visited at rank `r` gets key `(r + 1) / (m + 1)`.
    pub fn encode(&self, tour: &[usize]) -> Vec<f64> {
        let m = self.dimension();
        let mut keys = vec![0.0; m];
        let step = 1.0 / (m + 1) as f64;
        for (rank, &loc) in tour.iter().enumerate() {
            keys[loc - self.start - 1] = (rank + 1) as f64 * step;
        }
        keys
    }

    /// Full path including the fixed endpoints.
    pub fn full_path(&self, tour: &[usize]) -> Vec<usize> {
        let mut path = Vec::with_capacity(tour.len() + 2);
        path.push(self.start);
        path.extend_from_slice(tour);
        path.push(self.end);
        path
    }

    /// Total distance of `start → tour → end`, in km.
    pub fn fitness(&self, tour: &[usize]) -> f64 {
        self.walk(tour, |a, b| self.matrix.distance(a, b))
    }

    /// Total duration of `start → tour → end`, in minutes. Reporting only.
    pub fn duration(&self, tour: &[usize]) -> f64 {
        self.walk(tour, |a, b| self.matrix.duration(a, b))
    }

    /// Decodes and prices a key vector.
    pub fn cost(&self, keys: &[f64]) -> f64 {
        self.fitness(&self.decode(keys))
    }

    /// Prices a batch of key vectors. Results are in input order.
    ///
    /// Evaluation is pure, so the parallel path yields identical values.
    pub fn evaluate_batch(&self, batch: &[Vec<f64>], parallel: bool) -> Vec<f64> {
        #[cfg(feature = "parallel")]
        if parallel {
            return batch.par_iter().map(|keys| self.cost(keys)).collect();
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        batch.iter().map(|keys| self.cost(keys)).collect()
    }

    fn walk(&self, tour: &[usize], edge: impl Fn(usize, usize) -> f64) -> f64 {
        let mut prev = self.start;
        let mut total = 0.0;
        for &loc in tour {
            total += edge(prev, loc);
            prev = loc;
        }
        total + edge(prev, self.end)
    }
}

/// Sum of consecutive edge distances along an explicit path.
pub(crate) fn path_distance(matrix: &DistanceMatrix, path: &[usize]) -> f64 {
    path.windows(2).map(|w| matrix.distance(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 ── 2 ── 1 ── 3 on a line, so the best interior order is [2, 1]
    fn line() -> DistanceMatrix {
        DistanceMatrix::from_euclidean(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (3.0, 0.0)])
    }

    #[test]
    fn test_decode_sorts_by_key() {
        let dm = line();
        let codec = RouteCodec::new(&dm);
        assert_eq!(codec.decode(&[0.2, 0.7]), vec![1, 2]);
        assert_eq!(codec.decode(&[0.7, 0.2]), vec![2, 1]);
    }

    #[test]
    fn test_decode_ties_by_index() {
        let dm = DistanceMatrix::new(5);
        let codec = RouteCodec::new(&dm);
        assert_eq!(codec.decode(&[0.5, 0.5, 0.1]), vec![3, 1, 2]);
    }

    #[test]
    fn test_encode_evenly_spaced() {
        let dm = DistanceMatrix::new(5);
        let codec = RouteCodec::new(&dm);
        let keys = codec.encode(&[3, 1, 2]);
        assert!((keys[2] - 0.25).abs() < 1e-12);
        assert!((keys[0] - 0.50).abs() < 1e-12);
        assert!((keys[1] - 0.75).abs() < 1e-12);
        assert_eq!(codec.decode(&keys), vec![3, 1, 2]);
    }

    #[test]
    fn test_fitness_and_duration() {
        let dm = line();
        let codec = RouteCodec::new(&dm);
        // 0→1→2→3: 2 + 1 + 2
        assert!((codec.fitness(&[1, 2]) - 5.0).abs() < 1e-10);
        assert!((codec.fitness(&[2, 1]) - 3.0).abs() < 1e-10);
        assert!((codec.duration(&[2, 1]) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_fitness_direct_path() {
        let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (0.0, 4.0)]);
        let codec = RouteCodec::new(&dm);
        assert_eq!(codec.dimension(), 0);
        assert!(codec.decode(&[]).is_empty());
        assert!((codec.fitness(&[]) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_full_path() {
        let dm = line();
        let codec = RouteCodec::new(&dm);
        assert_eq!(codec.full_path(&[2, 1]), vec![0, 2, 1, 3]);
        assert!((path_distance(&dm, &[0, 2, 1, 3]) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_evaluate_batch_matches_sequential() {
        let dm = line();
        let codec = RouteCodec::new(&dm);
        let batch = vec![vec![0.1, 0.9], vec![0.9, 0.1], vec![0.5, 0.5]];
        let seq = codec.evaluate_batch(&batch, false);
        let par = codec.evaluate_batch(&batch, true);
        assert_eq!(seq, par);
        assert!((seq[0] - 5.0).abs() < 1e-10);
        assert!((seq[1] - 3.0).abs() < 1e-10);
    }
}
