use log::{info, warn};

use crate::build::{attempt_build, BuildOutcome, BuildParams, BuildRequest};
use crate::grid::{Grid, GridSquare};
use crate::strategies::BuildStrategy;

pub const NO_STRATEGY: &str = "none";

/// Totals and built mask for the most recent city build.
#[derive(Debug, Clone, PartialEq)]
pub struct CityBuildState {
    height: usize,
    width: usize,
    total_built: usize,
    total_cost: f64,
    built: Vec<bool>,
}

impl CityBuildState {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            total_built: 0,
            total_cost: 0.0,
            built: vec![false; height * width],
        }
    }

    pub fn reset(&mut self) {
        self.total_built = 0;
        self.total_cost = 0.0;
        self.built.iter_mut().for_each(|cell| *cell = false);
    }

    fn record(&mut self, row: usize, col: usize, cost: f64) {
        if let Some(cell) = self.built.get_mut(row * self.width + col) {
            *cell = true;
            self.total_built += 1;
            self.total_cost += cost;
        }
    }

    pub fn total_built(&self) -> usize {
        self.total_built
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_built(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.built[row * self.width + col]
    }

    pub fn built_mask(&self) -> Vec<Vec<bool>> {
        self.built.chunks(self.width).map(<[bool]>::to_vec).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityBuildReport {
    pub strategy: String,
    pub total_built: usize,
    pub total_cost: f64,
    pub built_mask: Vec<Vec<bool>>,
}

/// Per-cell result handed to the hook of [`CityPlanner::build_city_with_hook`].
pub struct CellBuild<'a> {
    pub row: usize,
    pub col: usize,
    pub square: &'a GridSquare,
    pub params: BuildParams,
    pub outcome: &'a BuildOutcome,
}

/// Owns the loaded grid, the active strategy and the city build totals.
pub struct CityPlanner {
    grid: Grid,
    strategy: Option<Box<dyn BuildStrategy>>,
    state: CityBuildState,
}

impl CityPlanner {
    pub fn new(grid: Grid) -> Self {
        let state = CityBuildState::new(grid.height(), grid.width());
        Self {
            grid,
            strategy: None,
            state,
        }
    }

    pub fn with_strategy(mut self, strategy: impl BuildStrategy + 'static) -> Self {
        self.select_strategy(strategy);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &CityBuildState {
        &self.state
    }

    pub fn select_strategy(&mut self, strategy: impl BuildStrategy + 'static) {
        self.set_strategy(Some(Box::new(strategy)));
    }

    pub fn set_strategy(&mut self, strategy: Option<Box<dyn BuildStrategy>>) {
        self.strategy = strategy;
        info!("strategy set to {}", self.current_strategy_name());
    }

    pub fn current_strategy_name(&self) -> &str {
        self.strategy
            .as_ref()
            .map(|strategy| strategy.name())
            .unwrap_or(NO_STRATEGY)
    }

    /// Prices a single structure. City totals are left untouched.
    pub fn attempt_build(&self, request: &BuildRequest) -> BuildOutcome {
        attempt_build(&self.grid, request)
    }

    pub fn build_city(&mut self) -> Option<CityBuildReport> {
        self.build_city_with_hook(|_| {})
    }

    /// Runs the active strategy over every cell in row-major order. Returns
    /// `None` without touching the previous totals when no strategy is set.
    pub fn build_city_with_hook<F>(&mut self, mut hook: F) -> Option<CityBuildReport>
    where
        F: FnMut(&CellBuild<'_>),
    {
        let Some(strategy) = self.strategy.as_mut() else {
            warn!("city build requested with no strategy configured");
            return None;
        };

        info!(
            "building {}x{} city with {} strategy",
            self.grid.height(),
            self.grid.width(),
            strategy.name()
        );
        self.state.reset();

        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                let params = strategy.decide(&self.grid, row, col);
                let outcome = attempt_build(&self.grid, &BuildRequest::new(row, col, params));
                if let BuildOutcome::Accepted { cost } = outcome {
                    self.state.record(row, col, cost);
                }
                if let Some(square) = self.grid.square(row, col) {
                    hook(&CellBuild {
                        row,
                        col,
                        square,
                        params,
                        outcome: &outcome,
                    });
                }
            }
        }

        let report = CityBuildReport {
            strategy: strategy.name().to_string(),
            total_built: self.state.total_built(),
            total_cost: self.state.total_cost(),
            built_mask: self.state.built_mask(),
        };
        info!(
            "city build finished: {} structures, total cost {:.2}",
            report.total_built, report.total_cost
        );
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{Foundation, Material};
    use crate::grid::Terrain;
    use crate::strategies::{CentralStrategy, UniformStrategy};

    fn mixed_grid() -> Grid {
        let squares = vec![
            GridSquare::new(Terrain::Flat),
            GridSquare::new(Terrain::Flat).contaminated(),
            GridSquare::new(Terrain::Swampy),
            GridSquare::new(Terrain::Rocky),
        ];
        Grid::from_squares(2, 2, squares).unwrap()
    }

    #[test]
    fn no_strategy_is_a_no_op() {
        let mut planner = CityPlanner::new(mixed_grid());
        assert_eq!(planner.current_strategy_name(), NO_STRATEGY);
        assert!(planner.build_city().is_none());
        assert_eq!(planner.state().total_built(), 0);
        assert_eq!(planner.state().built_mask(), vec![vec![false; 2]; 2]);
    }

    #[test]
    fn rejected_cells_stay_unbuilt() {
        let mut planner = CityPlanner::new(mixed_grid()).with_strategy(UniformStrategy::new(
            BuildParams::new(2, Foundation::Slab, Material::Brick),
        ));
        let report = planner.build_city().unwrap();
        assert_eq!(report.strategy, "Uniform");
        assert_eq!(report.total_built, 2);
        assert_eq!(report.total_cost, 60_000.0 + 110_000.0);
        assert_eq!(report.built_mask, vec![vec![true, false], vec![false, true]]);
        assert!(planner.state().is_built(1, 1));
        assert!(!planner.state().is_built(0, 1));
    }

    #[test]
    fn hook_sees_every_cell_in_row_major_order() {
        let mut planner = CityPlanner::new(mixed_grid()).with_strategy(CentralStrategy::new());
        let mut visited = Vec::new();
        planner.build_city_with_hook(|cell| {
            visited.push((cell.row, cell.col, cell.outcome.is_accepted()));
        });
        assert_eq!(
            visited,
            vec![(0, 0, true), (0, 1, false), (1, 0, false), (1, 1, true)]
        );
    }

    #[test]
    fn totals_reset_between_builds() {
        let mut planner = CityPlanner::new(mixed_grid()).with_strategy(UniformStrategy::new(
            BuildParams::new(1, Foundation::Stilts, Material::Concrete),
        ));
        let first = planner.build_city().unwrap();
        let second = planner.build_city().unwrap();
        assert_eq!(first, second);
        assert_eq!(planner.state().total_built(), 3);
    }

    #[test]
    fn single_builds_do_not_touch_totals() {
        let planner = CityPlanner::new(mixed_grid());
        let outcome = planner.attempt_build(&BuildRequest::new(
            0,
            0,
            BuildParams::new(1, Foundation::Slab, Material::Wood),
        ));
        assert_eq!(outcome.cost(), Some(10_000.0));
        assert_eq!(planner.state().total_built(), 0);
        assert_eq!(planner.state().total_cost(), 0.0);
    }
}
