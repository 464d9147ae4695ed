use super::problem::Matrix;

/// Pheromone laid on the edges of the graph.
///
/// Edge `{a, b}` is stored at `[min(a, b)][max(a, b)]` only; every cell on or
/// below the diagonal stays zero for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneModel {
    trails: Matrix,
}

impl PheromoneModel {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            trails: Matrix::new(num_nodes),
        }
    }

    pub fn evaporate(&mut self, rate: f64) {
        let retained = 1.0 - rate;
        self.trails.update_all(|v| v * retained);
    }

    pub fn reinforce(&mut self, a: usize, b: usize, amount: f64) {
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        self.trails.update(i, j, |v| v + amount);
    }

    /// Raw cell, without folding `(i, j)` onto the stored half.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.trails[i][j]
    }

    /// Pheromone on the undirected edge `{a, b}`.
    pub fn edge(&self, a: usize, b: usize) -> f64 {
        self.trails[a.min(b)][a.max(b)]
    }

    pub fn matrix(&self) -> &Matrix {
        &self.trails
    }
}
