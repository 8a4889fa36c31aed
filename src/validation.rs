use thiserror::Error;

use crate::build::{BuildParams, Foundation, Material};
use crate::grid::{GridSquare, Terrain};

/// Why a structure was declined. The display text is the operator-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Invalid grid coordinates ({row}, {col}).")]
    OutOfBounds { row: usize, col: usize },
    #[error("Number of floors must be a positive integer.")]
    NoFloors,
    #[error("Cannot build on contaminated land.")]
    Contaminated,
    #[error("Cannot build slab foundation on swampy terrain.")]
    SlabInSwamp,
    #[error("Cannot build a wooden structure in a swamp.")]
    WoodInSwamp,
    #[error(
        "Cannot build a structure with material {material} due to heritage zoning requiring {required}."
    )]
    Heritage {
        material: Material,
        required: Material,
    },
    #[error("Cannot build structure with {floors} floors. Height limit is {limit}.")]
    HeightLimit { floors: u32, limit: u32 },
    #[error("A structure in a flood-risk zone must have at least two floors.")]
    FloodRiskFloors,
}

/// Checks zoning rules in a fixed order; the first failing rule decides the reason.
pub fn validate(square: &GridSquare, params: &BuildParams) -> Result<(), Rejection> {
    if square.contaminated {
        return Err(Rejection::Contaminated);
    }

    if square.terrain == Terrain::Swampy {
        if params.foundation == Foundation::Slab {
            return Err(Rejection::SlabInSwamp);
        }
        if params.material == Material::Wood {
            return Err(Rejection::WoodInSwamp);
        }
    }

    if let Some(required) = square.heritage {
        if params.material != required {
            return Err(Rejection::Heritage {
                material: params.material,
                required,
            });
        }
    }

    if let Some(limit) = square.height_limit {
        if params.floors > limit {
            return Err(Rejection::HeightLimit {
                floors: params.floors,
                limit,
            });
        }
    }

    if square.flood_risk.is_some() && params.floors < 2 {
        return Err(Rejection::FloodRiskFloors);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(floors: u32, foundation: Foundation, material: Material) -> BuildParams {
        BuildParams::new(floors, foundation, material)
    }

    #[test]
    fn contamination_rejects_everything() {
        let squares = [
            GridSquare::new(Terrain::Flat).contaminated(),
            GridSquare::new(Terrain::Swampy).contaminated(),
            GridSquare::new(Terrain::Rocky)
                .contaminated()
                .with_heritage(Material::Brick)
                .with_flood_risk(10.0),
        ];
        for square in &squares {
            for material in Material::ALL {
                for foundation in Foundation::ALL {
                    for floors in 1..=6 {
                        assert_eq!(
                            validate(square, &params(floors, foundation, material)),
                            Err(Rejection::Contaminated)
                        );
                    }
                }
            }
        }
        assert_eq!(
            Rejection::Contaminated.to_string(),
            "Cannot build on contaminated land."
        );
    }

    #[test]
    fn swamp_rules() {
        let swamp = GridSquare::new(Terrain::Swampy);
        for material in Material::ALL {
            assert_eq!(
                validate(&swamp, &params(3, Foundation::Slab, material)),
                Err(Rejection::SlabInSwamp)
            );
        }
        assert_eq!(
            validate(&swamp, &params(3, Foundation::Stilts, Material::Wood)),
            Err(Rejection::WoodInSwamp)
        );
        assert_eq!(
            validate(&swamp, &params(3, Foundation::Stilts, Material::Brick)),
            Ok(())
        );
        assert_eq!(
            Rejection::SlabInSwamp.to_string(),
            "Cannot build slab foundation on swampy terrain."
        );
        assert_eq!(
            Rejection::WoodInSwamp.to_string(),
            "Cannot build a wooden structure in a swamp."
        );
    }

    #[test]
    fn wood_in_swamp_wins_over_matching_heritage() {
        let square = GridSquare::new(Terrain::Swampy).with_heritage(Material::Wood);
        assert_eq!(
            validate(&square, &params(2, Foundation::Stilts, Material::Wood)),
            Err(Rejection::WoodInSwamp)
        );
    }

    #[test]
    fn heritage_message_names_both_materials() {
        let square = GridSquare::new(Terrain::Flat).with_heritage(Material::Stone);
        let err = validate(&square, &params(2, Foundation::Slab, Material::Concrete)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot build a structure with material concrete due to heritage zoning requiring stone."
        );
        assert_eq!(
            validate(&square, &params(2, Foundation::Slab, Material::Stone)),
            Ok(())
        );
    }

    #[test]
    fn height_limit_is_inclusive() {
        let square = GridSquare::new(Terrain::Rocky).with_height_limit(4);
        assert_eq!(
            validate(&square, &params(4, Foundation::Slab, Material::Brick)),
            Ok(())
        );
        let err = validate(&square, &params(5, Foundation::Slab, Material::Brick)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot build structure with 5 floors. Height limit is 4."
        );
    }

    #[test]
    fn flood_risk_needs_two_floors() {
        let square = GridSquare::new(Terrain::Flat).with_flood_risk(0.0);
        assert_eq!(
            validate(&square, &params(1, Foundation::Slab, Material::Wood)),
            Err(Rejection::FloodRiskFloors)
        );
        assert_eq!(
            validate(&square, &params(2, Foundation::Slab, Material::Wood)),
            Ok(())
        );
    }

    #[test]
    fn heritage_checked_before_height_limit_and_flood() {
        let square = GridSquare::new(Terrain::Flat)
            .with_heritage(Material::Brick)
            .with_height_limit(1)
            .with_flood_risk(50.0);
        assert!(matches!(
            validate(&square, &params(3, Foundation::Slab, Material::Wood)),
            Err(Rejection::Heritage { .. })
        ));
        assert!(matches!(
            validate(&square, &params(3, Foundation::Slab, Material::Brick)),
            Err(Rejection::HeightLimit { floors: 3, limit: 1 })
        ));
        assert_eq!(
            validate(&square, &params(1, Foundation::Slab, Material::Brick)),
            Err(Rejection::FloodRiskFloors)
        );
    }
}
