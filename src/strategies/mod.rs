mod central;
mod random;
mod uniform;

pub use central::CentralStrategy;
pub use random::RandomStrategy;
pub use uniform::UniformStrategy;

use crate::build::BuildParams;
use crate::grid::Grid;

/// Per-cell build policy driven by [`crate::planner::CityPlanner::build_city`].
pub trait BuildStrategy {
    fn name(&self) -> &str;
    fn decide(&mut self, grid: &Grid, row: usize, col: usize) -> BuildParams;
}
