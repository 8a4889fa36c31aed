use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::debug;

use crate::build::{BuildOutcome, BuildParams, BuildRequest, Foundation, Material};
use crate::display::{built_map, cell_summary, format_currency, square_details};
use crate::planner::CityPlanner;
use crate::strategies::{CentralStrategy, RandomStrategy, UniformStrategy};

/// Text menu driving a [`CityPlanner`] over any line-based input.
pub struct Menu<R, W> {
    input: R,
    output: W,
    planner: CityPlanner,
    show_build_details: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(planner: CityPlanner, input: R, output: W) -> Self {
        Self {
            input,
            output,
            planner,
            show_build_details: true,
        }
    }

    pub fn show_build_details(mut self, show: bool) -> Self {
        self.show_build_details = show;
        self
    }

    pub fn planner(&self) -> &CityPlanner {
        &self.planner
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Loops until the operator quits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_integer()? else {
                break;
            };
            debug!("menu choice {choice}");
            match choice {
                1 => self.build_structure()?,
                2 => self.build_city()?,
                3 => self.configure_strategy()?,
                4 => self.display_built_structures()?,
                5 => {
                    writeln!(self.output, "\nExiting the program... Goodbye!")?;
                    break;
                }
                _ => writeln!(self.output, "\nInvalid option. Please try again.\n")?,
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n==============================")?;
        writeln!(self.output, "      City Planning Menu")?;
        writeln!(self.output, "==============================\n")?;
        writeln!(self.output, "1. Build Structure (Validation Check)")?;
        writeln!(self.output, "2. Build City")?;
        writeln!(self.output, "3. Configure Strategy")?;
        writeln!(self.output, "4. Display Previously Built Structures")?;
        writeln!(self.output, "5. Quit\n")?;
        write!(self.output, "Select an option: ")?;
        self.output.flush()
    }

    fn build_structure(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Build Structure (Validation Check) ---")?;
        let Some(row) = self.prompt_integer("Enter the grid row index: ")? else {
            return Ok(());
        };
        let Some(col) = self.prompt_integer("Enter the grid column index: ")? else {
            return Ok(());
        };
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            writeln!(self.output, "\nInvalid grid coordinates. Please try again.\n")?;
            return Ok(());
        };
        let Some(square) = self.planner.grid().square(row, col) else {
            writeln!(self.output, "\nInvalid grid coordinates. Please try again.\n")?;
            return Ok(());
        };
        let details = square_details(row, col, square);
        writeln!(self.output, "\n==============================")?;
        writeln!(self.output, " Current Grid Square Details")?;
        writeln!(self.output, "==============================")?;
        writeln!(self.output, "{details}")?;

        let Some(params) = self.prompt_params()? else {
            return Ok(());
        };
        match self.planner.attempt_build(&BuildRequest::new(row, col, params)) {
            BuildOutcome::Accepted { cost } => {
                writeln!(self.output, "\nStructure successfully built at ({row}, {col}).")?;
                writeln!(self.output, "Total cost: {}", format_currency(cost))?;
            }
            BuildOutcome::Rejected(reason) => {
                writeln!(self.output, "\nValidation failed: {reason}")?;
                writeln!(self.output, "Failed to build structure at ({row}, {col})")?;
            }
        }
        Ok(())
    }

    fn build_city(&mut self) -> Result<()> {
        let strategy_name = self.planner.current_strategy_name().to_string();
        writeln!(self.output, "\n--- Current Strategy: {strategy_name} ---")?;

        let show = self.show_build_details;
        let output = &mut self.output;
        let mut written: io::Result<()> = Ok(());
        let report = self.planner.build_city_with_hook(|cell| {
            if !show || written.is_err() {
                return;
            }
            if let Some(text) = cell_summary(cell) {
                written = output.write_all(text.as_bytes());
            }
        });
        written?;

        let Some(report) = report else {
            writeln!(
                self.output,
                "\nNo strategy selected. Please configure the city-building approach first.\n"
            )?;
            return Ok(());
        };

        writeln!(self.output, "\n--- City Building Summary ---")?;
        writeln!(self.output, "Strategy Used: '{}'", report.strategy)?;
        writeln!(self.output, "Total Structures Built: {}", report.total_built)?;
        writeln!(self.output, "Final Total Cost: {}", format_currency(report.total_cost))?;
        writeln!(self.output, "-----------------------------\n")?;
        Ok(())
    }

    fn configure_strategy(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Configure City-Building Strategy ---")?;
        writeln!(self.output, "1. Uniform")?;
        writeln!(self.output, "2. Random")?;
        writeln!(self.output, "3. Central")?;
        let Some(choice) = self.prompt_integer("Select a strategy (1-3): ")? else {
            return Ok(());
        };
        match choice {
            1 => {
                let Some(params) = self.prompt_params()? else {
                    return Ok(());
                };
                self.planner.select_strategy(UniformStrategy::new(params));
            }
            2 => self.planner.select_strategy(RandomStrategy::new()),
            3 => self.planner.select_strategy(CentralStrategy::new()),
            _ => {
                writeln!(self.output, "\nInvalid option. Returning to menu.\n")?;
                return Ok(());
            }
        }
        writeln!(
            self.output,
            "\nStrategy set to: '{}'\n",
            self.planner.current_strategy_name()
        )?;
        Ok(())
    }

    fn display_built_structures(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Display Built Structures in Grid ---\n")?;
        let map = built_map(self.planner.state());
        write!(self.output, "{map}")?;
        Ok(())
    }

    /// Floors, foundation and material. `None` when the input ends or a value is invalid.
    fn prompt_params(&mut self) -> Result<Option<BuildParams>> {
        let Some(floors) = self.prompt_integer("Enter the number of floors to be built: ")? else {
            return Ok(None);
        };
        let Ok(floors) = u32::try_from(floors) else {
            writeln!(self.output, "\nNumber of floors must be a positive integer.\n")?;
            return Ok(None);
        };
        if floors == 0 {
            writeln!(self.output, "\nNumber of floors must be a positive integer.\n")?;
            return Ok(None);
        }

        let Some(foundation) = self.prompt_line("Enter the foundation type (slab/stilts): ")? else {
            return Ok(None);
        };
        let foundation = match foundation.parse::<Foundation>() {
            Ok(foundation) => foundation,
            Err(err) => {
                writeln!(self.output, "\nInvalid foundation type: {err}\n")?;
                return Ok(None);
            }
        };

        let Some(material) =
            self.prompt_line("Enter the construction material (wood/stone/brick/concrete): ")?
        else {
            return Ok(None);
        };
        let material = match material.parse::<Material>() {
            Ok(material) => material,
            Err(err) => {
                writeln!(self.output, "\nInvalid material type: {err}\n")?;
                return Ok(None);
            }
        };

        Ok(Some(BuildParams::new(floors, foundation, material)))
    }

    fn prompt_integer(&mut self, prompt: &str) -> Result<Option<i64>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_integer()
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(self.read_line()?)
    }

    /// Re-prompts until an integer is entered.
    fn read_integer(&mut self) -> Result<Option<i64>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    writeln!(self.output, "\nInvalid input. Please enter a valid integer.\n")?
                }
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::loader::parse_grid;

    fn run_menu(grid: &str, script: &str) -> (String, CityPlanner) {
        let planner = CityPlanner::new(parse_grid(grid).unwrap());
        let mut menu = Menu::new(planner, Cursor::new(script.to_string()), Vec::new());
        menu.run().unwrap();
        let Menu {
            output, planner, ..
        } = menu;
        (String::from_utf8(output).unwrap(), planner)
    }

    #[test]
    fn build_structure_reports_cost() {
        let (out, planner) = run_menu("1,1\nROCKY\n", "1\n0\n0\n2\nslab\nbrick\n5\n");
        assert!(out.contains("Terrain: ROCKY"));
        assert!(out.contains("Structure successfully built at (0, 0)."));
        assert!(out.contains("Total cost: $110,000.00"));
        assert_eq!(planner.state().total_built(), 0);
    }

    #[test]
    fn build_structure_reports_rejection() {
        let (out, _) = run_menu("1,1\nSWAMPY\n", "1\n0\n0\n2\nstilts\nwood\n5\n");
        assert!(out.contains("Validation failed: Cannot build a wooden structure in a swamp."));
    }

    #[test]
    fn out_of_range_coordinates_return_to_menu() {
        let (out, _) = run_menu("1,1\nFLAT\n", "1\n3\n0\n1\n-1\n0\n5\n");
        assert_eq!(out.matches("Invalid grid coordinates").count(), 2);
        assert!(out.contains("Goodbye"));
    }

    #[test]
    fn non_integer_input_reprompts() {
        let (out, _) = run_menu("1,1\nFLAT\n", "abc\n5\n");
        assert!(out.contains("Please enter a valid integer"));
        assert!(out.contains("Goodbye"));
    }

    #[test]
    fn build_city_without_strategy() {
        let (out, _) = run_menu("1,1\nFLAT\n", "2\n5\n");
        assert!(out.contains("--- Current Strategy: none ---"));
        assert!(out.contains("No strategy selected"));
    }

    #[test]
    fn configure_uniform_then_build_and_display() {
        let script = "3\n1\n3\nslab\nconcrete\n2\n4\n5\n";
        let (out, planner) = run_menu("2,2\nFLAT\nFLAT\nFLAT,contamination\nFLAT\n", script);
        assert!(out.contains("Strategy set to: 'Uniform'"));
        assert!(out.contains("Total Structures Built: 3"));
        assert!(out.contains("Final Total Cost: $180,000.00"));
        assert!(out.contains(" 0 | X  X  |"));
        assert!(out.contains(" 1 | .  X  |"));
        assert_eq!(planner.current_strategy_name(), "Uniform");
    }

    #[test]
    fn invalid_material_is_rejected_at_input() {
        let (out, planner) = run_menu("1,1\nFLAT\n", "3\n1\n2\nslab\nsteel\n5\n");
        assert!(out.contains("Invalid material type"));
        assert_eq!(planner.current_strategy_name(), "none");
    }

    #[test]
    fn ends_cleanly_when_input_runs_out() {
        let (out, _) = run_menu("1,1\nFLAT\n", "1\n0\n");
        assert!(!out.contains("Goodbye"));
    }
}
