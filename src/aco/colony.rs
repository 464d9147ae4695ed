use std::time::{Duration, Instant};

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::{
    ant::Ant,
    desirability::Desirability,
    params::Params,
    pheromone::PheromoneModel,
    problem::{Matrix, Problem},
    utils::format_tour,
};

/// Shortest tour seen so far and the iteration that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct BestTour {
    pub tour: Vec<usize>,
    pub length: f64,
    pub iteration: usize,
}

/// What a finished run hands back to its caller.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub pheromones: PheromoneModel,
    pub best: Option<BestTour>,
    pub iterations: usize,
    pub elapsed: Duration,
}

pub struct Colony {
    // Problem description
    problem: Problem,
    params: Params,

    // Ant tracking
    ants: Vec<Ant<ChaCha8Rng>>,
    pheromones: PheromoneModel,
    desirability: Desirability,

    cur_iteration: usize,
    best: Option<BestTour>,
}

impl Colony {
    pub fn on(problem: Problem, params: Params) -> Result<Self> {
        params.validate()?;

        let num_nodes = problem.num_nodes();
        Ok(Self {
            ants: Self::init_ants(num_nodes, params.ants, params.seed),
            pheromones: PheromoneModel::new(num_nodes),
            desirability: Desirability::new(
                num_nodes,
                params.desirability,
                params.pheromone_weight,
                params.heuristic_weight,
            ),
            problem,
            params,
            cur_iteration: 0,
            best: None,
        })
    }

    /// Every ant draws from its own stream, all derived from `seed`.
    fn init_ants(num_nodes: usize, num_ants: usize, seed: u64) -> Vec<Ant<ChaCha8Rng>> {
        let mut seeder = ChaCha8Rng::seed_from_u64(seed);
        (0..num_ants)
            .map(|_| Ant::new(num_nodes, ChaCha8Rng::seed_from_u64(seeder.gen())))
            .collect()
    }

    pub fn run(&mut self) -> Outcome {
        let now = Instant::now();
        info!(
            nodes = self.problem.num_nodes(),
            ants = self.ants.len(),
            iterations = self.params.iterations,
            mode = %self.params.desirability,
            "Starting colony"
        );

        while self.cur_iteration < self.params.iterations {
            self.step();
        }

        let elapsed = now.elapsed();
        match &self.best {
            Some(best) => info!(
                length = best.length,
                iteration = best.iteration,
                ?elapsed,
                "Finished, best tour {}",
                format_tour(&best.tour)
            ),
            None => info!(?elapsed, "Finished without running any iteration"),
        }

        Outcome {
            pheromones: self.pheromones.clone(),
            best: self.best.clone(),
            iterations: self.cur_iteration,
            elapsed,
        }
    }

    /// One iteration: refresh desirability, let every ant build a tour,
    /// evaporate, then let every ant deposit.
    pub fn step(&mut self) {
        self.cur_iteration += 1;

        self.desirability.recompute(&self.pheromones, &self.problem);
        self.update_ants();
        self.try_find_best_tour();
        self.pheromones.evaporate(self.params.evaporation_rate);
        self.update_pheromones();

        trace!(iteration = self.cur_iteration, "Iteration done");
    }

    fn update_ants(&mut self) {
        let desirability = self.desirability.matrix();
        for ant in &mut self.ants {
            ant.construct_tour(desirability, &self.problem, self.params.selection_probability);
        }
    }

    fn try_find_best_tour(&mut self) {
        let best_length = self.best.as_ref().map_or(f64::MAX, |b| b.length);

        let shortest = self
            .ants
            .iter()
            .filter(|ant| ant.path_cost() < best_length)
            .min_by(|a, b| a.path_cost().total_cmp(&b.path_cost()));

        if let Some(ant) = shortest {
            let best = BestTour {
                tour: ant.path_taken().to_vec(),
                length: ant.path_cost(),
                iteration: self.cur_iteration,
            };
            debug!(
                iteration = self.cur_iteration,
                length = best.length,
                "New best tour {}",
                format_tour(&best.tour)
            );
            self.best = Some(best);
        }
    }

    fn update_pheromones(&mut self) {
        for ant in &self.ants {
            ant.deposit_pheromone(&mut self.pheromones, self.params.deposit);
        }
    }

    pub fn pheromones(&self) -> &PheromoneModel {
        &self.pheromones
    }

    /// Snapshot the ants read during the latest iteration.
    pub fn desirability(&self) -> &Matrix {
        self.desirability.matrix()
    }

    pub fn ants(&self) -> &[Ant<ChaCha8Rng>] {
        &self.ants
    }

    pub fn best_tour(&self) -> Option<&BestTour> {
        self.best.as_ref()
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn cur_iteration(&self) -> usize {
        self.cur_iteration
    }
}
