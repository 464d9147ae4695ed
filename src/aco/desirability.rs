use super::{
    params::DesirabilityMode,
    pheromone::PheromoneModel,
    problem::{Matrix, Problem},
};

/// Per-iteration snapshot of `tau^Lp * (1/d)^Lh` for every ordered pair.
///
/// The snapshot is rebuilt before the ants move and only read while they
/// construct their tours.
#[derive(Debug, Clone)]
pub struct Desirability {
    numerator: Matrix,
    mode: DesirabilityMode,
    pheromone_weight: f64,
    heuristic_weight: f64,
}

impl Desirability {
    pub fn new(
        num_nodes: usize,
        mode: DesirabilityMode,
        pheromone_weight: f64,
        heuristic_weight: f64,
    ) -> Self {
        Self {
            numerator: Matrix::new(num_nodes),
            mode,
            pheromone_weight,
            heuristic_weight,
        }
    }

    pub fn recompute(&mut self, pheromones: &PheromoneModel, problem: &Problem) {
        let n = problem.num_nodes();
        for i in 0..n {
            for j in (0..n).filter(|&j| j != i) {
                let pheromone = match self.mode {
                    DesirabilityMode::AsStored => pheromones.get(i, j),
                    DesirabilityMode::Symmetric => pheromones.edge(i, j),
                };
                let visibility = 1.0 / problem.distance(i, j);
                self.numerator[i][j] = pheromone.powf(self.pheromone_weight)
                    * visibility.powf(self.heuristic_weight);
            }
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.numerator
    }
}

#[cfg(test)]
mod tests {
    use super::Desirability;
    use crate::aco::{params::DesirabilityMode, pheromone::PheromoneModel, problem::Problem};

    fn reinforced_sample() -> (Problem, PheromoneModel) {
        let problem = Problem::sample().unwrap();
        let mut pheromones = PheromoneModel::new(problem.num_nodes());
        pheromones.reinforce(0, 1, 3.0);
        pheromones.reinforce(5, 2, 2.0);
        (problem, pheromones)
    }

    #[test]
    fn zero_pheromone_gives_zero_desirability() {
        let problem = Problem::sample().unwrap();
        let pheromones = PheromoneModel::new(problem.num_nodes());
        let mut desirability = Desirability::new(8, DesirabilityMode::AsStored, 1.0, 1.0);
        desirability.recompute(&pheromones, &problem);

        assert!(desirability.matrix().values().all(|v| v == 0.0));
    }

    #[test]
    fn as_stored_only_scores_ascending_moves() {
        let (problem, pheromones) = reinforced_sample();
        let mut desirability = Desirability::new(8, DesirabilityMode::AsStored, 1.0, 1.0);
        desirability.recompute(&pheromones, &problem);
        let m = desirability.matrix();

        assert!((m[0][1] - 1.0).abs() < 1e-12);
        assert_eq!(m[1][0], 0.0);
        assert!((m[2][5] - 2.0 / problem.distance(2, 5)).abs() < 1e-12);
        assert_eq!(m[5][2], 0.0);
        for i in 0..8 {
            for j in 0..=i {
                assert_eq!(m[i][j], 0.0);
            }
        }
    }

    #[test]
    fn symmetric_scores_both_directions() {
        let (problem, pheromones) = reinforced_sample();
        let mut desirability = Desirability::new(8, DesirabilityMode::Symmetric, 1.0, 1.0);
        desirability.recompute(&pheromones, &problem);
        let m = desirability.matrix();

        assert_eq!(m[1][0], m[0][1]);
        assert_eq!(m[5][2], m[2][5]);
        assert!(m.is_symmetric());
    }

    #[test]
    fn exponents_weight_each_term() {
        let (problem, pheromones) = reinforced_sample();
        let mut desirability = Desirability::new(8, DesirabilityMode::AsStored, 2.0, 3.0);
        desirability.recompute(&pheromones, &problem);

        let expected = 3.0f64.powi(2) * (1.0 / 3.0f64).powi(3);
        assert!((desirability.matrix()[0][1] - expected).abs() < 1e-12);
    }
}
