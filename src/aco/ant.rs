use rand::{seq::IteratorRandom, Rng};

use super::{
    pheromone::PheromoneModel,
    problem::{Matrix, Problem},
};

/// A tour builder with its own random source.
///
/// Ants are pooled: every call to [`Ant::construct_tour`] starts from a clean
/// slate, so the same instance is reused across iterations.
#[derive(Debug, Clone)]
pub struct Ant<R> {
    path_taken: Vec<usize>,
    path_cost: f64,
    candidates: Vec<bool>,
    rng: R,
}

impl<R: Rng> Ant<R> {
    pub fn new(num_nodes: usize, rng: R) -> Self {
        Self {
            path_taken: Vec::with_capacity(num_nodes),
            path_cost: 0.0,
            candidates: vec![false; num_nodes],
            rng,
        }
    }

    fn reset(&mut self) {
        self.path_taken.clear();
        self.path_taken.push(0);
        self.path_cost = 0.0;
        self.candidates.fill(true);
        self.candidates[0] = false;
    }

    /// Builds a closed tour starting and ending at node 0.
    ///
    /// Each move but the last is chosen by roulette over `desirability` with
    /// chance `selection_probability`, otherwise (or when the roulette has
    /// nothing to offer) uniformly among the unvisited nodes.
    pub fn construct_tour(
        &mut self,
        desirability: &Matrix,
        problem: &Problem,
        selection_probability: f64,
    ) {
        let n = problem.num_nodes();
        self.reset();

        for _ in 0..n.saturating_sub(2) {
            let cur_node = self.cur_node();
            let next_node = match self.find_next_node(desirability, selection_probability) {
                Some(node) => node,
                None => break,
            };
            self.path_cost += problem.distance(cur_node, next_node);
            self.visit(next_node);
        }

        // Only one node is left, no choice to make
        let last = self.remaining().next();
        if let Some(last) = last {
            self.path_cost += problem.distance(self.cur_node(), last);
            self.path_cost += problem.distance(last, 0);
            self.visit(last);
        }
    }

    fn find_next_node(&mut self, desirability: &Matrix, selection_probability: f64) -> Option<usize> {
        let r: f64 = self.rng.gen();
        let weights = &desirability[self.cur_node()];
        let denominator: f64 = self.remaining().map(|j| weights[j]).sum();

        let by_pheromone = if denominator != 0.0 && r <= selection_probability {
            self.spin_roulette(weights, denominator, r)
        } else {
            None
        };

        by_pheromone.or_else(|| self.random_candidate())
    }

    /// Walks the candidates in ascending order, taking the first whose share
    /// of `denominator` covers what is left of `r`.
    fn spin_roulette(&self, weights: &[f64], denominator: f64, mut r: f64) -> Option<usize> {
        for j in self.remaining() {
            let prob = weights[j] / denominator;
            if r <= prob {
                return Some(j);
            }
            r -= prob;
        }

        // Rounding left the wheel without a winner
        None
    }

    fn random_candidate(&mut self) -> Option<usize> {
        let candidates = &self.candidates;
        (0..candidates.len())
            .filter(|&j| candidates[j])
            .choose(&mut self.rng)
    }

    fn remaining(&self) -> impl Iterator<Item = usize> + '_ {
        self.candidates
            .iter()
            .enumerate()
            .filter_map(|(j, &unvisited)| unvisited.then(|| j))
    }

    fn visit(&mut self, idx: usize) {
        self.path_taken.push(idx);
        self.candidates[idx] = false;
    }

    pub fn cur_node(&self) -> usize {
        self.path_taken.last().copied().unwrap_or(0)
    }

    /// Spreads `deposit / path_cost` over every edge of the tour, including
    /// the closing edge back to node 0.
    pub fn deposit_pheromone(&self, pheromones: &mut PheromoneModel, deposit: f64) {
        let amount = deposit / self.path_cost;

        for edge in self.path_taken.windows(2) {
            pheromones.reinforce(edge[0], edge[1], amount);
        }

        if let Some(&last) = self.path_taken.last() {
            pheromones.reinforce(0, last, amount);
        }
    }

    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }

    pub fn path_taken(&self) -> &[usize] {
        &self.path_taken
    }
}
