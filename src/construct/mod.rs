//! Construction heuristics for open paths with fixed endpoints.
//!
//! These produce deterministic starting tours that seed the exploration
//! population and populate the alternative-route list.

use crate::codec::{RouteCodec, Tour};

/// Interior waypoints in the caller's input order.
pub fn input_order(codec: &RouteCodec<'_>) -> Tour {
    codec.interior().to_vec()
}

/// Greedy nearest neighbor walk from the fixed start.
///
/// Ties go to the lower location index.
pub fn nearest_neighbor(codec: &RouteCodec<'_>) -> Tour {
    let matrix = codec.matrix();
    let mut unvisited: Vec<usize> = codec.interior().to_vec();
    let mut tour = Vec::with_capacity(unvisited.len());
    let mut current = codec.start();

    while let Some(next) = matrix.nearest_neighbor(current, &unvisited) {
        unvisited.retain(|&c| c != next);
        tour.push(next);
        current = next;
    }
    tour
}

/// Farthest insertion.
///
/// Starts from the direct `start → end` path, then repeatedly takes the
/// unvisited waypoint whose nearest path member is farthest away and
/// inserts it at the position of least added distance. Neither endpoint
/// ever moves.
pub fn farthest_insertion(codec: &RouteCodec<'_>) -> Tour {
    let matrix = codec.matrix();
    let mut path = vec![codec.start(), codec.end()];
    let mut unvisited: Vec<usize> = codec.interior().to_vec();

    while !unvisited.is_empty() {
        let mut pick = 0;
        let mut pick_dist = f64::NEG_INFINITY;
        for (k, &c) in unvisited.iter().enumerate() {
            let nearest = path
                .iter()
                .map(|&p| matrix.distance(p, c).min(matrix.distance(c, p)))
                .fold(f64::INFINITY, f64::min);
            if nearest > pick_dist {
                pick_dist = nearest;
                pick = k;
            }
        }
        let city = unvisited.remove(pick);

        let mut best_pos = 1;
        let mut best_cost = f64::INFINITY;
        for pos in 1..path.len() {
            let (a, b) = (path[pos - 1], path[pos]);
            let added = matrix.distance(a, city) + matrix.distance(city, b) - matrix.distance(a, b);
            if added < best_cost {
                best_cost = added;
                best_pos = pos;
            }
        }
        path.insert(best_pos, city);
    }

    path[1..path.len() - 1].to_vec()
}
