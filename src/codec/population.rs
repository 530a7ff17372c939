//! Candidates and the shared population.

/// A key vector with its cached path cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Random keys in `[0, 1]`, one per interior waypoint.
    pub keys: Vec<f64>,
    /// Total path distance of the decoded tour. `f64::INFINITY` until evaluated.
    pub cost: f64,
}

impl Candidate {
    pub fn new(keys: Vec<f64>, cost: f64) -> Self {
        Self { keys, cost }
    }

    /// A candidate that has not been evaluated yet.
    pub fn unevaluated(keys: Vec<f64>) -> Self {
        Self {
            keys,
            cost: f64::INFINITY,
        }
    }
}

/// The working population shared by the exploration and exploitation phases.
///
/// Besides its members, the population tracks the best-ever candidate
/// (the elite). The elite only ever improves; replacing or dropping
/// members never loses it.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Candidate>,
    elite: Candidate,
}

impl Population {
    /// Builds a population from evaluated members.
    ///
    /// An empty population gets an unevaluated placeholder elite.
    pub fn new(members: Vec<Candidate>) -> Self {
        let elite = members
            .iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
            .cloned()
            .unwrap_or_else(|| Candidate::unevaluated(Vec::new()));
        Self { members, elite }
    }

    /// The best candidate ever offered to this population.
    pub fn elite(&self) -> &Candidate {
        &self.elite
    }

    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Candidate] {
        &mut self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Replaces the elite if `candidate` is strictly better.
    ///
    /// Returns `true` when the elite changed.
    pub fn offer(&mut self, candidate: &Candidate) -> bool {
        if candidate.cost < self.elite.cost {
            self.elite = candidate.clone();
            true
        } else {
            false
        }
    }

    /// Sorts members by cost ascending (stable, so ties keep their order).
    pub fn sort_by_cost(&mut self) {
        self.members.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    }

    /// Keeps the `n` cheapest members.
    pub fn retain_best(&mut self, n: usize) {
        self.sort_by_cost();
        self.members.truncate(n);
    }

    /// Rewrites the keys of every member and of the elite.
    ///
    /// `f` must preserve the decoded tour, so cached costs stay valid.
    pub fn map_keys(&mut self, f: impl Fn(&[f64]) -> Vec<f64>) {
        for member in &mut self.members {
            member.keys = f(&member.keys);
        }
        self.elite.keys = f(&self.elite.keys);
    }

    /// Appends a member, offering it as elite.
    pub fn push(&mut self, candidate: Candidate) {
        self.offer(&candidate);
        self.members.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Population {
        Population::new(vec![
            Candidate::new(vec![0.1], 5.0),
            Candidate::new(vec![0.2], 3.0),
            Candidate::new(vec![0.3], 4.0),
        ])
    }

    #[test]
    fn test_elite_is_min() {
        let pop = sample();
        assert_eq!(pop.elite().cost, 3.0);
        assert_eq!(pop.len(), 3);
    }

    #[test]
    fn test_empty_placeholder_elite() {
        let mut pop = Population::new(vec![]);
        assert!(pop.is_empty());
        assert_eq!(pop.elite().cost, f64::INFINITY);
        pop.push(Candidate::new(vec![0.5], 2.0));
        assert_eq!(pop.elite().cost, 2.0);
    }

    #[test]
    fn test_offer_only_improves() {
        let mut pop = sample();
        assert!(!pop.offer(&Candidate::new(vec![0.9], 3.0)));
        assert!(pop.offer(&Candidate::new(vec![0.9], 1.0)));
        assert_eq!(pop.elite().keys, vec![0.9]);
    }

    #[test]
    fn test_elite_survives_turnover() {
        let mut pop = sample();
        pop.retain_best(1);
        assert_eq!(pop.len(), 1);
        pop.members_mut()[0] = Candidate::new(vec![0.5], 10.0);
        assert_eq!(pop.elite().cost, 3.0);
    }

    #[test]
    fn test_map_keys_touches_elite() {
        let mut pop = sample();
        pop.map_keys(|k| k.iter().map(|x| x * 2.0).collect());
        assert_eq!(pop.elite().keys, vec![0.4]);
        assert_eq!(pop.members()[0].keys, vec![0.2]);
    }

    #[test]
    fn test_retain_best_order() {
        let mut pop = sample();
        pop.push(Candidate::new(vec![0.4], 0.5));
        pop.retain_best(2);
        let costs: Vec<f64> = pop.members().iter().map(|c| c.cost).collect();
        assert_eq!(costs, vec![0.5, 3.0]);
        assert_eq!(pop.elite().cost, 0.5);
    }
}
