pub use colony::{BestTour, Colony, Outcome};
pub use params::{DesirabilityMode, Params};
pub use pheromone::PheromoneModel;
pub use problem::{Coordinate, Matrix, Problem};

pub mod ant;
pub mod colony;
pub mod desirability;
pub mod params;
pub mod pheromone;
pub mod problem;
pub mod utils;
