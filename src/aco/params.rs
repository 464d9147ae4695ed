use anyhow::{ensure, Result};
use strum::{Display, EnumString};

pub const DEFAULT_ANTS: usize = 100;
pub const DEFAULT_ITERATIONS: usize = 1000;
pub const DEFAULT_EVAPORATION_RATE: f64 = 0.05;
pub const DEFAULT_DEPOSIT: f64 = 10.0;
pub const DEFAULT_SELECTION_PROBABILITY: f64 = 0.95;

/// Which pheromone cell feeds the desirability of the ordered pair `(i, j)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum DesirabilityMode {
    /// Reads `pheromone[i][j]` as stored. Deposits only ever land above the
    /// diagonal, so moves towards a lower index always score zero.
    #[default]
    #[strum(ascii_case_insensitive)]
    AsStored,
    /// Reads `pheromone[min(i, j)][max(i, j)]`, scoring both directions of an
    /// edge alike.
    #[strum(ascii_case_insensitive)]
    Symmetric,
}

/// Tunables of one optimisation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub ants: usize,
    pub iterations: usize,
    pub evaporation_rate: f64,
    /// Pheromone each ant spreads over its tour, divided by the tour length.
    pub deposit: f64,
    /// Chance of choosing by roulette instead of uniformly at random.
    pub selection_probability: f64,
    pub pheromone_weight: f64,
    pub heuristic_weight: f64,
    pub seed: u64,
    pub desirability: DesirabilityMode,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            ants: DEFAULT_ANTS,
            iterations: DEFAULT_ITERATIONS,
            evaporation_rate: DEFAULT_EVAPORATION_RATE,
            deposit: DEFAULT_DEPOSIT,
            selection_probability: DEFAULT_SELECTION_PROBABILITY,
            pheromone_weight: 1.0,
            heuristic_weight: 1.0,
            seed: 0,
            desirability: DesirabilityMode::default(),
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.ants > 0, "the colony needs at least one ant");
        ensure!(
            (0.0..1.0).contains(&self.evaporation_rate),
            "evaporation rate must lie in [0, 1), got {}",
            self.evaporation_rate
        );
        ensure!(
            (0.0..=1.0).contains(&self.selection_probability),
            "selection probability must lie in [0, 1], got {}",
            self.selection_probability
        );
        for (name, value) in [
            ("deposit", self.deposit),
            ("pheromone weight", self.pheromone_weight),
            ("heuristic weight", self.heuristic_weight),
        ] {
            ensure!(
                value.is_finite() && value > 0.0,
                "{} must be positive, got {}",
                name,
                value
            );
        }
        Ok(())
    }
}
