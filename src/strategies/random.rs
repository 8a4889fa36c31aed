use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::build::{BuildParams, Foundation, Material};
use crate::grid::Grid;

use super::BuildStrategy;

pub const MAX_RANDOM_FLOORS: u32 = 5;

/// Draws material, floors and foundation independently for every call.
pub struct RandomStrategy {
    rng: Box<dyn RngCore>,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn from_rng(rng: impl RngCore + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildStrategy for RandomStrategy {
    fn name(&self) -> &str {
        "Random"
    }

    fn decide(&mut self, _grid: &Grid, _row: usize, _col: usize) -> BuildParams {
        let material = Material::ALL[self.rng.gen_range(0..Material::ALL.len())];
        let floors = self.rng.gen_range(1..=MAX_RANDOM_FLOORS);
        let foundation = Foundation::ALL[self.rng.gen_range(0..Foundation::ALL.len())];
        BuildParams::new(floors, foundation, material)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::grid::{GridSquare, Terrain};

    #[test]
    fn decisions_stay_within_the_fixed_sets() {
        let grid = Grid::filled(10, 10, GridSquare::new(Terrain::Flat)).unwrap();
        let mut strategy = RandomStrategy::new();
        let mut materials = HashSet::new();
        let mut floors = HashSet::new();
        let mut foundations = HashSet::new();
        for _ in 0..20 {
            for (row, col, _) in grid.cells() {
                let params = strategy.decide(&grid, row, col);
                assert!((1..=MAX_RANDOM_FLOORS).contains(&params.floors));
                materials.insert(params.material);
                floors.insert(params.floors);
                foundations.insert(params.foundation);
            }
        }
        // 2000 draws make a missing value practically impossible.
        assert_eq!(materials.len(), Material::ALL.len());
        assert_eq!(floors.len(), MAX_RANDOM_FLOORS as usize);
        assert_eq!(foundations.len(), Foundation::ALL.len());
    }
}
