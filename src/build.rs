use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::cost::CostPipeline;
use crate::grid::Grid;
use crate::validation::{validate, Rejection};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid terrain type '{0}'")]
    Terrain(String),
    #[error("invalid material '{0}', expected wood, stone, brick or concrete")]
    Material(String),
    #[error("invalid foundation '{0}', expected slab or stilts")]
    Foundation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Wood,
    Stone,
    Brick,
    Concrete,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Wood,
        Material::Stone,
        Material::Brick,
        Material::Concrete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Material::Wood => "wood",
            Material::Stone => "stone",
            Material::Brick => "brick",
            Material::Concrete => "concrete",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wood" => Ok(Material::Wood),
            "stone" => Ok(Material::Stone),
            "brick" => Ok(Material::Brick),
            "concrete" => Ok(Material::Concrete),
            _ => Err(ParseError::Material(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Foundation {
    Slab,
    Stilts,
}

impl Foundation {
    pub const ALL: [Foundation; 2] = [Foundation::Slab, Foundation::Stilts];

    pub fn as_str(self) -> &'static str {
        match self {
            Foundation::Slab => "slab",
            Foundation::Stilts => "stilts",
        }
    }
}

impl fmt::Display for Foundation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Foundation {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "slab" => Ok(Foundation::Slab),
            "stilts" => Ok(Foundation::Stilts),
            _ => Err(ParseError::Foundation(value.trim().to_string())),
        }
    }
}

/// What to build on a square, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildParams {
    pub floors: u32,
    pub foundation: Foundation,
    pub material: Material,
}

impl BuildParams {
    pub fn new(floors: u32, foundation: Foundation, material: Material) -> Self {
        Self {
            floors,
            foundation,
            material,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRequest {
    pub row: usize,
    pub col: usize,
    pub params: BuildParams,
}

impl BuildRequest {
    pub fn new(row: usize, col: usize, params: BuildParams) -> Self {
        Self { row, col, params }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Accepted { cost: f64 },
    Rejected(Rejection),
}

impl BuildOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BuildOutcome::Accepted { .. })
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            BuildOutcome::Accepted { cost } => Some(*cost),
            BuildOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            BuildOutcome::Accepted { .. } => None,
            BuildOutcome::Rejected(rejection) => Some(rejection),
        }
    }
}

/// Validates and prices a single structure. Never mutates any city state;
/// aggregation belongs to [`crate::planner::CityPlanner`].
pub fn attempt_build(grid: &Grid, request: &BuildRequest) -> BuildOutcome {
    let BuildRequest { row, col, params } = *request;
    let Some(square) = grid.square(row, col) else {
        info!("rejected build at ({row}, {col}): outside {}x{} grid", grid.height(), grid.width());
        return BuildOutcome::Rejected(Rejection::OutOfBounds { row, col });
    };

    if params.floors == 0 {
        info!("rejected build at ({row}, {col}): zero floors requested");
        return BuildOutcome::Rejected(Rejection::NoFloors);
    }

    debug!(
        "attempting {} floor {} structure on {} at ({row}, {col})",
        params.floors, params.material, params.foundation
    );

    if let Err(rejection) = validate(square, &params) {
        info!("rejected build at ({row}, {col}): {rejection}");
        return BuildOutcome::Rejected(rejection);
    }

    let cost = CostPipeline::for_square(square).price(&params);
    debug!("accepted build at ({row}, {col}) costing {cost}");
    BuildOutcome::Accepted { cost }
}
