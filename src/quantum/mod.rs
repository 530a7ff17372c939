//! Quantum-inspired exploration.
//!
//! A classical annealing search over key vectors in which each candidate
//! holds qubit-like amplitude pairs. Measuring a candidate blends the
//! current leader with uniform noise according to those amplitudes, and a
//! Metropolis rule with geometric cooling decides acceptance. No quantum
//! hardware or circuit simulation is involved.
//!
//! The phase produces a diverse, reasonably good population plus the
//! running best, both handed to the whale phase.
//!
//! # References
//!
//! - Han & Kim (2002), "Quantum-inspired evolutionary algorithm for a class
//!   of combinatorial optimization", *IEEE Trans. Evol. Comput.* 6(6)
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;
mod types;

pub use config::QuantumConfig;
pub use runner::{QuantumResult, QuantumRunner};
pub use types::{Amplitudes, THETA_FLOOR};
