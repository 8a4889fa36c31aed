use crate::build::BuildParams;
use crate::grid::Grid;

use super::BuildStrategy;

/// Same structure on every square.
pub struct UniformStrategy {
    params: BuildParams,
}

impl UniformStrategy {
    pub fn new(params: BuildParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> BuildParams {
        self.params
    }
}

impl BuildStrategy for UniformStrategy {
    fn name(&self) -> &str {
        "Uniform"
    }

    fn decide(&mut self, _grid: &Grid, _row: usize, _col: usize) -> BuildParams {
        self.params
    }
}
