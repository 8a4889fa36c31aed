//! Grid file parsing.
//!
//! The first line holds `height,width`. It is followed by `height * width`
//! cell records in row-major order, one per line:
//!
//! ```text
//! 2,2
//! FLAT
//! SWAMPY,flood-risk=40
//! ROCKY,heritage=stone,height-limit=3
//! flat,contamination
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::build::Material;
use crate::grid::{Grid, GridSquare, Terrain};

const RULE_HERITAGE: &str = "heritage";
const RULE_FLOOD_RISK: &str = "flood-risk";
const RULE_CONTAMINATION: &str = "contamination";
const RULE_HEIGHT_LIMIT: &str = "height-limit";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read grid file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Grid dimensions must not be empty.")]
    EmptyDimensions,
    #[error("Invalid grid dimensions format, expected format 'height,width' (with comma ',').")]
    DimensionFormat,
    #[error("Grid dimensions must be integers eg.(3,4), got '{0}'")]
    DimensionNotInteger(String),
    #[error("Grid {axis} must be a positive integer, got {value}")]
    DimensionNotPositive { axis: &'static str, value: i64 },
    #[error("Grid dimensions {height}x{width} are too large.")]
    DimensionsTooLarge { height: usize, width: usize },
    #[error("Insufficient grid data for expected dimensions: expected {expected} records, found {found}.")]
    InsufficientData { expected: usize, found: usize },
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
}

/// Problems with a single cell record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Terrain type cannot be empty.")]
    EmptyTerrain,
    #[error("Invalid terrain type: '{0}'. Terrain type must be one of FLAT, SWAMPY, ROCKY")]
    UnknownTerrain(String),
    #[error("Invalid zoning rule: '{0}'")]
    MalformedRule(String),
    #[error("Unknown zoning rule: '{0}'. Valid rules: heritage, flood-risk, contamination, height-limit")]
    UnknownRule(String),
    #[error("Invalid heritage value: '{0}'. Heritage must be one of stone, brick, wood")]
    Heritage(String),
    #[error("Flood risk must be a numeric value, got '{0}'")]
    FloodRiskNotNumeric(String),
    #[error("Flood risk must be between 0 and 100, got {0}")]
    FloodRiskRange(f64),
    #[error("Contamination value must be 'true' or 'false', got '{0}'")]
    Contamination(String),
    #[error("Height limit must be an integer, got '{0}'")]
    HeightLimitNotInteger(String),
    #[error("Height limit must be a positive integer, got {0}")]
    HeightLimitNotPositive(i64),
}

pub struct GridLoader {
    base_dir: PathBuf,
}

impl GridLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Grid, LoadError> {
        let path = self.base_dir.join(file);
        if !path.is_file() {
            return Err(LoadError::NotFound(path));
        }
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let grid = parse_grid(&text)?;
        info!(
            "loaded {}x{} grid from {}",
            grid.height(),
            grid.width(),
            path.display()
        );
        Ok(grid)
    }
}

pub fn parse_grid(text: &str) -> Result<Grid, LoadError> {
    let mut lines = text.lines();
    let (height, width) = parse_dimensions(lines.next().unwrap_or(""))?;
    let expected = height
        .checked_mul(width)
        .ok_or(LoadError::DimensionsTooLarge { height, width })?;

    // Sized from the lines actually present, never from the declared header.
    let mut squares = Vec::with_capacity(expected.min(text.lines().count()));
    for index in 0..expected {
        let line = lines.next().ok_or(LoadError::InsufficientData {
            expected,
            found: index,
        })?;
        let square = parse_record(line).map_err(|source| {
            warn!("rejecting grid record '{line}': {source}");
            LoadError::Record {
                line: index + 2,
                source,
            }
        })?;
        squares.push(square);
    }

    let extra = lines.filter(|line| !line.trim().is_empty()).count();
    if extra > 0 {
        warn!("ignoring {extra} records beyond the declared {height}x{width} grid");
    }

    Grid::from_squares(height, width, squares).ok_or(LoadError::InsufficientData {
        expected,
        found: 0,
    })
}

fn parse_dimensions(line: &str) -> Result<(usize, usize), LoadError> {
    if line.trim().is_empty() {
        return Err(LoadError::EmptyDimensions);
    }
    let fields: Vec<&str> = line.trim().trim_end_matches(',').split(',').collect();
    let [height, width] = fields.as_slice() else {
        return Err(LoadError::DimensionFormat);
    };
    Ok((
        parse_dimension(height, "height")?,
        parse_dimension(width, "width")?,
    ))
}

fn parse_dimension(token: &str, axis: &'static str) -> Result<usize, LoadError> {
    let token = token.trim();
    let value = token
        .parse::<i64>()
        .map_err(|_| LoadError::DimensionNotInteger(token.to_string()))?;
    if value <= 0 {
        return Err(LoadError::DimensionNotPositive { axis, value });
    }
    usize::try_from(value).map_err(|_| LoadError::DimensionNotInteger(token.to_string()))
}

fn parse_record(line: &str) -> Result<GridSquare, RecordError> {
    let mut fields = line.trim().trim_end_matches(',').split(',');
    let terrain_token = fields.next().unwrap_or("").trim();
    if terrain_token.is_empty() {
        return Err(RecordError::EmptyTerrain);
    }
    let terrain = terrain_token
        .parse::<Terrain>()
        .map_err(|_| RecordError::UnknownTerrain(terrain_token.to_string()))?;

    let mut square = GridSquare::new(terrain);
    for field in fields {
        let field = field.trim();
        match field.split_once('=') {
            Some((key, value)) if !value.contains('=') => {
                apply_rule(&mut square, key.trim(), value.trim())?;
            }
            None if field == RULE_CONTAMINATION => {
                debug!("contamination shorthand on record '{line}'");
                square.contaminated = true;
            }
            _ => return Err(RecordError::MalformedRule(field.to_string())),
        }
    }
    Ok(square)
}

fn apply_rule(square: &mut GridSquare, key: &str, value: &str) -> Result<(), RecordError> {
    match key {
        RULE_HERITAGE => {
            square.heritage = Some(parse_heritage(value)?);
        }
        RULE_FLOOD_RISK => {
            let percent = value
                .parse::<f64>()
                .map_err(|_| RecordError::FloodRiskNotNumeric(value.to_string()))?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(RecordError::FloodRiskRange(percent));
            }
            square.flood_risk = Some(percent);
        }
        RULE_CONTAMINATION => {
            square.contaminated = match value {
                "true" => true,
                "false" => false,
                _ => return Err(RecordError::Contamination(value.to_string())),
            };
        }
        RULE_HEIGHT_LIMIT => {
            let limit = value
                .parse::<i64>()
                .map_err(|_| RecordError::HeightLimitNotInteger(value.to_string()))?;
            if limit <= 0 {
                return Err(RecordError::HeightLimitNotPositive(limit));
            }
            let limit = u32::try_from(limit)
                .map_err(|_| RecordError::HeightLimitNotInteger(value.to_string()))?;
            square.height_limit = Some(limit);
        }
        _ => return Err(RecordError::UnknownRule(key.to_string())),
    }
    Ok(())
}

fn parse_heritage(value: &str) -> Result<Material, RecordError> {
    match value {
        "stone" => Ok(Material::Stone),
        "brick" => Ok(Material::Brick),
        "wood" => Ok(Material::Wood),
        _ => Err(RecordError::Heritage(value.to_string())),
    }
}
