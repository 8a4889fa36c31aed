pub mod build;
pub mod config;
pub mod cost;
pub mod display;
pub mod grid;
pub mod loader;
pub mod menu;
pub mod planner;
pub mod strategies;
pub mod validation;

pub use build::{attempt_build, BuildOutcome, BuildParams, BuildRequest, Foundation, Material};
pub use grid::{Grid, GridSquare, Terrain};
pub use loader::{GridLoader, LoadError};
pub use planner::{CityBuildReport, CityPlanner};
pub use validation::{validate, Rejection};
