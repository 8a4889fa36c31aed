use crate::build::{BuildParams, Foundation, Material};
use crate::grid::Grid;

use super::BuildStrategy;

/// Taller, heavier structures near the middle of the grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct CentralStrategy;

impl CentralStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Euclidean distance from `(row, col)` to the centre cell. The centre
    /// index truncates, so even-sized grids lean towards the top left.
    pub fn distance_to_centre(grid: &Grid, row: usize, col: usize) -> f64 {
        let centre_row = ((grid.height() - 1) / 2) as f64;
        let centre_col = ((grid.width() - 1) / 2) as f64;
        let dr = row as f64 - centre_row;
        let dc = col as f64 - centre_col;
        (dr * dr + dc * dc).sqrt()
    }

    pub fn floors_for(distance: f64) -> u32 {
        (1.0 + 20.0 / (distance + 1.0)).round() as u32
    }

    pub fn material_for(distance: f64) -> Material {
        if distance <= 2.0 {
            Material::Concrete
        } else if distance <= 4.0 {
            Material::Brick
        } else if distance <= 6.0 {
            Material::Stone
        } else {
            Material::Wood
        }
    }
}

impl BuildStrategy for CentralStrategy {
    fn name(&self) -> &str {
        "Central"
    }

    fn decide(&mut self, grid: &Grid, row: usize, col: usize) -> BuildParams {
        let distance = Self::distance_to_centre(grid, row, col);
        BuildParams::new(
            Self::floors_for(distance),
            Foundation::Slab,
            Self::material_for(distance),
        )
    }
}
