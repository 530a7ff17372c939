//! Amplitude register for quantum-inspired search.

use rand::Rng;
use std::f64::consts::FRAC_PI_2;

/// Smallest angle kept between a qubit and either basis axis.
///
/// Prevents a dimension from collapsing deterministically onto the
/// leader (α² = 1) or onto pure noise (β² = 1).
pub const THETA_FLOOR: f64 = 0.05;

/// Per-dimension amplitude pairs `(α, β)` with `α² + β² = 1`.
///
/// Each dimension is a qubit-like state parameterized by its angle
/// `θ = atan2(β, α)` in `[THETA_FLOOR, π/2 - THETA_FLOOR]`. Measuring a
/// dimension blends the leader's key (weight `α²`) with a uniform draw
/// (weight `β²`), so rotating toward α exploits and rotating toward β
/// explores.
///
/// # Examples
///
/// ```
/// use u_routeplan::quantum::Amplitudes;
///
/// let mut amp = Amplitudes::superposition(3);
/// assert!((amp.alpha(0).powi(2) - 0.5).abs() < 1e-12);
/// amp.rotate(0, 0.3);
/// assert!(amp.alpha(0) > amp.beta(0));
/// assert!((amp.norm(0) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Amplitudes {
    alpha: Vec<f64>,
    beta: Vec<f64>,
}

impl Amplitudes {
    /// Equal superposition in every dimension: `α = β = 1/√2`.
    pub fn superposition(dimension: usize) -> Self {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        Self {
            alpha: vec![h; dimension],
            beta: vec![h; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.alpha.len()
    }

    pub fn alpha(&self, d: usize) -> f64 {
        self.alpha[d]
    }

    pub fn beta(&self, d: usize) -> f64 {
        self.beta[d]
    }

    /// `α² + β²` for dimension `d`.
    pub fn norm(&self, d: usize) -> f64 {
        self.alpha[d].powi(2) + self.beta[d].powi(2)
    }

    /// Rotates dimension `d` by `angle` radians toward α (negative: toward β).
    pub fn rotate(&mut self, d: usize, angle: f64) {
        let theta = self.beta[d].atan2(self.alpha[d]) - angle;
        self.set_angle(d, theta);
    }

    /// Quantum NOT gate: swaps α and β of dimension `d`.
    pub fn not_gate(&mut self, d: usize) {
        std::mem::swap(&mut self.alpha[d], &mut self.beta[d]);
    }

    /// Measures every dimension into a key vector.
    ///
    /// `key[d] = α² · leader[d] + β² · U(0, 1)`; the result stays in `[0, 1]`
    /// whenever `leader` does.
    pub fn collapse<R: Rng>(&self, leader: &[f64], rng: &mut R) -> Vec<f64> {
        leader
            .iter()
            .enumerate()
            .map(|(d, &lk)| {
                let a2 = self.alpha[d] * self.alpha[d];
                let b2 = self.beta[d] * self.beta[d];
                let u: f64 = rng.random_range(0.0..1.0);
                (a2 * lk + b2 * u).clamp(0.0, 1.0)
            })
            .collect()
    }

    fn set_angle(&mut self, d: usize, theta: f64) {
        let theta = theta.clamp(THETA_FLOOR, FRAC_PI_2 - THETA_FLOOR);
        self.alpha[d] = theta.cos();
        self.beta[d] = theta.sin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_norm_preserved_under_rotation() {
        let mut amp = Amplitudes::superposition(4);
        for step in 0..50 {
            let angle = if step % 3 == 0 { -0.2 } else { 0.13 };
            for d in 0..4 {
                amp.rotate(d, angle);
                assert!((amp.norm(d) - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_rotation_clamped_to_floor() {
        let mut amp = Amplitudes::superposition(1);
        amp.rotate(0, 10.0);
        assert!((amp.beta(0) - THETA_FLOOR.sin()).abs() < 1e-12);
        amp.rotate(0, -10.0);
        assert!((amp.alpha(0) - THETA_FLOOR.sin()).abs() < 1e-12);
    }

    #[test]
    fn test_not_gate_swaps() {
        let mut amp = Amplitudes::superposition(1);
        amp.rotate(0, 0.4);
        let (a, b) = (amp.alpha(0), amp.beta(0));
        amp.not_gate(0);
        assert_eq!((amp.alpha(0), amp.beta(0)), (b, a));
    }

    #[test]
    fn test_collapse_in_unit_interval() {
        let amp = Amplitudes::superposition(5);
        let mut rng = create_rng(42);
        let leader = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        for _ in 0..100 {
            let keys = amp.collapse(&leader, &mut rng);
            assert_eq!(keys.len(), 5);
            assert!(keys.iter().all(|k| (0.0..=1.0).contains(k)));
        }
    }

    #[test]
    fn test_collapse_tracks_leader_when_exploiting() {
        let mut amp = Amplitudes::superposition(3);
        for d in 0..3 {
            amp.rotate(d, 10.0);
        }
        let mut rng = create_rng(7);
        let leader = vec![0.1, 0.5, 0.9];
        let keys = amp.collapse(&leader, &mut rng);
        let noise = THETA_FLOOR.sin().powi(2);
        for (k, l) in keys.iter().zip(&leader) {
            assert!((k - l).abs() <= noise + 1e-12, "key {k} too far from {l}");
        }
    }
}
