//! Whale Optimization Algorithm (WOA).
//!
//! Population-based continuous search modeled on humpback whale
//! bubble-net feeding: whales encircle the leader, spiral in toward it,
//! or search around a random peer while `|A| ≥ 1`. Here it works on
//! random-key vectors, so every whale always decodes to a valid tour.
//!
//! # References
//!
//! - Mirjalili & Lewis (2016), "The Whale Optimization Algorithm",
//!   *Advances in Engineering Software* 95, 51-67

mod config;
mod runner;

pub use config::{WhaleConfig, MAX_SPIRAL_CONSTANT};
pub use runner::{WhaleResult, WhaleRunner};
