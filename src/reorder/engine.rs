//! Greedy nearest-neighbour ordering

use crate::geometry::{Features, Point};

use super::Strategy;

/// One step of a visiting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Original position of the visited path
    pub index: usize,
    /// Whether the path is drawn end to start
    pub reversed: bool,
}

impl Visit {
    pub fn new(index: usize, reversed: bool) -> Self {
        Self { index, reversed }
    }

    /// The original order, every path in its natural direction
    pub fn identity(count: usize) -> Vec<Visit> {
        (0..count).map(|index| Visit::new(index, false)).collect()
    }
}

/// Compute a visiting order that keeps pen travel short
///
/// The search starts at the first path's feature and repeatedly moves to the
/// nearest unvisited path, ties going to the smaller index. Under
/// [`Strategy::StartEnd`] a path may be entered from its end, in which case
/// it is visited reversed; on equal distance the natural direction wins.
///
/// Under [`Strategy::StartEnd`] the result never travels further than the
/// original order: when the greedy tour is longer, the identity order is
/// returned instead. [`Strategy::Centroid`] always returns the greedy tour.
pub fn order(features: &[Features], strategy: Strategy) -> Vec<Visit> {
    if features.len() <= 1 {
        return Visit::identity(features.len());
    }

    let greedy = nearest_neighbour(features, strategy);
    if !strategy.allows_reversal() {
        return greedy;
    }

    let identity = Visit::identity(features.len());
    let greedy_travel = travel(features, &greedy, strategy);
    let identity_travel = travel(features, &identity, strategy);
    if greedy_travel > identity_travel {
        log::debug!(
            "greedy {} order travels {:.3} > original {:.3}, keeping original",
            strategy,
            greedy_travel,
            identity_travel
        );
        return identity;
    }
    greedy
}

fn nearest_neighbour(features: &[Features], strategy: Strategy) -> Vec<Visit> {
    let mut visited = vec![false; features.len()];
    let mut visits = Vec::with_capacity(features.len());
    let mut current = strategy.entry(&features[0], false);

    while visits.len() < features.len() {
        let Some(next) = nearest(features, &visited, current, strategy) else {
            break;
        };
        visited[next.index] = true;
        current = strategy.exit(&features[next.index], next.reversed);
        visits.push(next);
    }
    visits
}

fn nearest(
    features: &[Features],
    visited: &[bool],
    current: Point,
    strategy: Strategy,
) -> Option<Visit> {
    let mut best: Option<(f64, Visit)> = None;

    for (index, f) in features.iter().enumerate() {
        if visited[index] {
            continue;
        }
        let mut candidate = (
            current.distance_squared(strategy.entry(f, false)),
            Visit::new(index, false),
        );
        if strategy.allows_reversal() {
            let reversed = current.distance_squared(strategy.entry(f, true));
            if reversed < candidate.0 {
                candidate = (reversed, Visit::new(index, true));
            }
        }
        // Strict comparison in index order keeps the smaller index on ties
        if best.map_or(true, |(distance, _)| candidate.0 < distance) {
            best = Some(candidate);
        }
    }
    best.map(|(_, visit)| visit)
}

/// Total idle distance between consecutive paths of an order
pub fn travel(features: &[Features], visits: &[Visit], strategy: Strategy) -> f64 {
    visits
        .windows(2)
        .map(|pair| {
            let from = strategy.exit(&features[pair[0].index], pair[0].reversed);
            let to = strategy.entry(&features[pair[1].index], pair[1].reversed);
            from.distance(to)
        })
        .sum()
}
