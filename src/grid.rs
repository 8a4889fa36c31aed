use std::fmt;
use std::str::FromStr;

use crate::build::{Material, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Flat,
    Swampy,
    Rocky,
}

impl Terrain {
    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Flat => "FLAT",
            Terrain::Swampy => "SWAMPY",
            Terrain::Rocky => "ROCKY",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terrain {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FLAT" => Ok(Terrain::Flat),
            "SWAMPY" => Ok(Terrain::Swampy),
            "ROCKY" => Ok(Terrain::Rocky),
            _ => Err(ParseError::Terrain(value.trim().to_string())),
        }
    }
}

/// Terrain and zoning facts for a single cell. Built once by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSquare {
    pub terrain: Terrain,
    pub heritage: Option<Material>,
    pub height_limit: Option<u32>,
    pub flood_risk: Option<f64>,
    pub contaminated: bool,
}

impl GridSquare {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            heritage: None,
            height_limit: None,
            flood_risk: None,
            contaminated: false,
        }
    }

    pub fn with_heritage(mut self, material: Material) -> Self {
        self.heritage = Some(material);
        self
    }

    pub fn with_height_limit(mut self, limit: u32) -> Self {
        self.height_limit = Some(limit);
        self
    }

    pub fn with_flood_risk(mut self, percent: f64) -> Self {
        self.flood_risk = Some(percent);
        self
    }

    pub fn contaminated(mut self) -> Self {
        self.contaminated = true;
        self
    }
}

/// Row-major grid of squares. Every row has the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    squares: Vec<GridSquare>,
}

impl Grid {
    /// Builds a grid from row-major squares. Returns `None` when the
    /// dimensions are zero or do not match the number of squares.
    pub fn from_squares(height: usize, width: usize, squares: Vec<GridSquare>) -> Option<Self> {
        if height == 0 || width == 0 || height.checked_mul(width) != Some(squares.len()) {
            return None;
        }
        Some(Self {
            height,
            width,
            squares,
        })
    }

    pub fn filled(height: usize, width: usize, square: GridSquare) -> Option<Self> {
        let count = height.checked_mul(width)?;
        Self::from_squares(height, width, vec![square; count])
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.squares.len()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    pub fn square(&self, row: usize, col: usize) -> Option<&GridSquare> {
        if self.contains(row, col) {
            self.squares.get(row * self.width + col)
        } else {
            None
        }
    }

    /// Row-major iteration yielding `(row, col, square)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &GridSquare)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .map(move |(index, square)| (index / self.width, index % self.width, square))
    }
}
