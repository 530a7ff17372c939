//! Alternative route collection and small-instance enumeration.

use super::result::AlternativeRoute;
use crate::codec::{RouteCodec, Tour};

/// All orderings of `items`, in lexicographic order of positions.
pub(crate) fn permutations(items: &[usize]) -> Vec<Tour> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(items.len());
    let mut used = vec![false; items.len()];
    permute(items, &mut used, &mut current, &mut out);
    out
}

fn permute(items: &[usize], used: &mut [bool], current: &mut Vec<usize>, out: &mut Vec<Tour>) {
    if current.len() == items.len() {
        out.push(current.clone());
        return;
    }
    for i in 0..items.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(items[i]);
        permute(items, used, current, out);
        current.pop();
        used[i] = false;
    }
}

/// Shortest tour among `tours`; ties keep the earliest.
pub(crate) fn shortest(codec: &RouteCodec<'_>, tours: &[Tour]) -> Option<(Tour, f64)> {
    tours
        .iter()
        .map(|t| (t, codec.fitness(t)))
        .fold(None, |best: Option<(&Tour, f64)>, (t, c)| match best {
            Some((_, bc)) if bc <= c => best,
            _ => Some((t, c)),
        })
        .map(|(t, c)| (t.clone(), c))
}

/// Deduplicates labeled tours by order, sorts by distance and keeps the
/// first `max`.
///
/// Earlier entries win both label conflicts and distance ties, so the
/// caller lists its chosen route first.
pub(crate) fn collect(
    codec: &RouteCodec<'_>,
    labeled: Vec<(&str, Tour)>,
    max: usize,
) -> Vec<AlternativeRoute> {
    let mut seen: Vec<Tour> = Vec::with_capacity(labeled.len());
    let mut routes: Vec<AlternativeRoute> = Vec::with_capacity(labeled.len());

    for (label, tour) in labeled {
        if seen.contains(&tour) {
            continue;
        }
        routes.push(AlternativeRoute {
            label: label.to_string(),
            order: codec.full_path(&tour),
            distance_km: codec.fitness(&tour),
            duration_min: codec.duration(&tour),
        });
        seen.push(tour);
    }

    routes.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    routes.truncate(max);
    routes
}
