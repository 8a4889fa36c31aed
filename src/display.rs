use std::fmt::Write;

use crate::grid::GridSquare;
use crate::planner::{CellBuild, CityBuildState};

/// `$1,234,567.89`. Display only; costs stay unrounded everywhere else.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

pub fn square_details(row: usize, col: usize, square: &GridSquare) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Location: ({row}, {col})");
    let _ = writeln!(out, "Terrain: {}", square.terrain);
    if let Some(heritage) = square.heritage {
        let _ = writeln!(out, "Heritage: {heritage}");
    }
    if let Some(limit) = square.height_limit {
        let _ = writeln!(out, "Height Limit: {limit}");
    }
    if let Some(percent) = square.flood_risk {
        let _ = writeln!(out, "Flood Risk: {percent}%");
    }
    let _ = writeln!(out, "Contamination: {}", yes_no(square.contaminated));
    out
}

/// One block per structure built during a city build. Rejected cells yield `None`.
pub fn cell_summary(cell: &CellBuild<'_>) -> Option<String> {
    let cost = cell.outcome.cost()?;
    let flood = cell
        .square
        .flood_risk
        .map(|percent| format!("{percent}%"))
        .unwrap_or_else(|| "None".to_string());
    let mut out = String::new();
    let _ = writeln!(out, "Built at Grid Location ({}, {}):", cell.row, cell.col);
    let _ = writeln!(out, " - Material: {}", cell.params.material);
    let _ = writeln!(out, " - Floors: {}", cell.params.floors);
    let _ = writeln!(out, " - Flood Risk: {flood}");
    let _ = writeln!(out, " - Contamination: {}", yes_no(cell.square.contaminated));
    let _ = writeln!(out, " - Terrain: {}", cell.square.terrain);
    let _ = writeln!(out, " - Total Cost: {}", format_currency(cost));
    Some(out)
}

/// `X` for built cells, `.` for empty ones, with row and column indices.
pub fn built_map(state: &CityBuildState) -> String {
    let mut out = String::new();
    let border = "---".repeat(state.width());
    out.push_str("     ");
    for col in 0..state.width() {
        let _ = write!(out, "{col}  ");
    }
    out.push('\n');
    let _ = writeln!(out, "    {border}");
    for (row, cells) in state.built_mask().iter().enumerate() {
        let _ = write!(out, "{row:2} | ");
        for built in cells {
            out.push(if *built { 'X' } else { '.' });
            out.push_str("  ");
        }
        out.push_str("|\n");
    }
    let _ = writeln!(out, "    {border}");
    out.push_str("\nLegend:\nX  = Built Structure\n.  = Empty Grid\n");
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::Material;
    use crate::grid::Terrain;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(60_000.0), "$60,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-1500.0), "-$1,500.00");
    }

    #[test]
    fn details_list_only_present_rules() {
        let square = GridSquare::new(Terrain::Swampy)
            .with_heritage(Material::Wood)
            .with_flood_risk(40.0);
        let text = square_details(1, 2, &square);
        assert!(text.contains("Location: (1, 2)"));
        assert!(text.contains("Terrain: SWAMPY"));
        assert!(text.contains("Heritage: wood"));
        assert!(text.contains("Flood Risk: 40%"));
        assert!(text.contains("Contamination: No"));
        assert!(!text.contains("Height Limit"));
    }

    #[test]
    fn empty_map_has_no_marks() {
        let state = CityBuildState::new(2, 3);
        let map = built_map(&state);
        assert!(map.contains(" 0 | .  .  .  |"));
        assert!(map.contains(" 1 | .  .  .  |"));
        assert_eq!(map.matches('X').count(), 1, "only the legend mentions X");
    }
}
