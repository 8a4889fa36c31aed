use log::trace;

use crate::build::{BuildParams, Material};
use crate::grid::{GridSquare, Terrain};

const CONTAMINATION_MULTIPLIER: f64 = 1.5;
const FLOOD_RISK_DIVISOR: f64 = 50.0;
const HERITAGE_SURCHARGE: f64 = 20_000.0;
const SWAMP_SURCHARGE_PER_FLOOR: f64 = 20_000.0;
const ROCKY_SURCHARGE: f64 = 50_000.0;

pub fn base_rate(material: Material) -> f64 {
    match material {
        Material::Wood => 10_000.0,
        Material::Stone => 50_000.0,
        Material::Brick => 30_000.0,
        Material::Concrete => 20_000.0,
    }
}

pub fn base_cost(params: &BuildParams) -> f64 {
    base_rate(params.material) * f64::from(params.floors)
}

/// One adjustment applied on top of the running cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostStage {
    Contamination,
    FloodRisk { percent: f64 },
    Heritage,
    Terrain(Terrain),
}

impl CostStage {
    pub fn name(&self) -> &'static str {
        match self {
            CostStage::Contamination => "contamination",
            CostStage::FloodRisk { .. } => "flood-risk",
            CostStage::Heritage => "heritage",
            CostStage::Terrain(_) => "terrain",
        }
    }

    pub fn apply(&self, cost: f64, params: &BuildParams) -> f64 {
        match *self {
            CostStage::Contamination => cost * CONTAMINATION_MULTIPLIER,
            CostStage::FloodRisk { percent } => cost * (1.0 + percent / FLOOD_RISK_DIVISOR),
            CostStage::Heritage => cost + HERITAGE_SURCHARGE,
            CostStage::Terrain(Terrain::Swampy) => {
                cost + SWAMP_SURCHARGE_PER_FLOOR * f64::from(params.floors)
            }
            CostStage::Terrain(Terrain::Rocky) => cost + ROCKY_SURCHARGE,
            CostStage::Terrain(Terrain::Flat) => cost,
        }
    }
}

/// Ordered list of adjustments for a square, applied left to right to the base cost.
#[derive(Debug, Clone, PartialEq)]
pub struct CostPipeline {
    stages: Vec<CostStage>,
}

impl CostPipeline {
    /// Contamination, flood risk, heritage, then terrain.
    pub fn for_square(square: &GridSquare) -> Self {
        let mut stages = Vec::with_capacity(4);
        if square.contaminated {
            stages.push(CostStage::Contamination);
        }
        if let Some(percent) = square.flood_risk {
            stages.push(CostStage::FloodRisk { percent });
        }
        if square.heritage.is_some() {
            stages.push(CostStage::Heritage);
        }
        stages.push(CostStage::Terrain(square.terrain));
        Self { stages }
    }

    pub fn from_stages(stages: Vec<CostStage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[CostStage] {
        &self.stages
    }

    pub fn price(&self, params: &BuildParams) -> f64 {
        self.breakdown(params)
            .last()
            .map(|(_, cost)| *cost)
            .unwrap_or_else(|| base_cost(params))
    }

    /// Running cost after each stage, starting from the base cost.
    pub fn breakdown(&self, params: &BuildParams) -> Vec<(&'static str, f64)> {
        let mut cost = base_cost(params);
        let mut steps = Vec::with_capacity(self.stages.len() + 1);
        trace!("base cost {cost} for {} floors of {}", params.floors, params.material);
        steps.push(("base", cost));
        for stage in &self.stages {
            cost = stage.apply(cost, params);
            trace!("{} adjustment -> {cost}", stage.name());
            steps.push((stage.name(), cost));
        }
        steps
    }
}
