//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::solve::problem::{ComparisonReport, SolveReport};
use crate::solve::solution::{SearchStats, Solution};
use anyhow::{Context, Result};
use std::path::Path;

/// Formats solve reports for console output.
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format one strategy run for console output.
    pub fn format_report(report: &SolveReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("Strategy: {}\n", report.strategy));
        output.push_str(&format!(
            "Satisfiable: {}\n",
            if report.outcome.satisfiable { "yes" } else { "no" }
        ));
        output.push_str(&format!(
            "Elapsed: {:.4}s\n",
            report.outcome.elapsed.as_secs_f64()
        ));
        if let Some(diagnostic) = &report.outcome.diagnostic {
            output.push_str(&format!("Detail: {}\n", diagnostic));
        }
        output.push_str(&format!("Work: {}\n", Self::work_summary(&report.outcome.stats)));

        if let Some(solution) = &report.solution {
            output.push('\n');
            output.push_str(&solution.render());
        }

        output
    }

    /// Strategy comparison table with per-strategy wall times.
    pub fn format_comparison(comparison: &ComparisonReport) -> String {
        let mut output = String::new();

        output.push_str("Strategy     | Result | Time(ms)  | Work\n");
        output.push_str("-------------|--------|-----------|----------------\n");

        for report in &comparison.reports {
            output.push_str(&format!(
                "{:12} | {:6} | {:9.3} | {}\n",
                report.strategy.to_string(),
                if report.outcome.satisfiable { "SAT" } else { "UNSAT" },
                report.outcome.elapsed.as_secs_f64() * 1000.0,
                Self::work_summary(&report.outcome.stats),
            ));
        }

        if comparison.skipped_brute_force {
            output.push_str("brute_force  | skipped: too many unknowns for enumeration\n");
        }

        output.push('\n');
        output.push_str(if comparison.agreed {
            "All strategies agree on satisfiability.\n"
        } else {
            "Strategies DISAGREE on satisfiability!\n"
        });

        output
    }

    /// One-line summary of whichever work counter the strategy used.
    fn work_summary(stats: &SearchStats) -> String {
        if stats.nodes_visited > 0 {
            format!("{} nodes", stats.nodes_visited)
        } else if stats.assignments_tested > 0 {
            format!("{} assignments", stats.assignments_tested)
        } else if stats.clauses_submitted > 0 {
            format!("{} clauses", stats.clauses_submitted)
        } else {
            "none".to_string()
        }
    }

    /// Save a solution to the output directory in the requested format.
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                let path = output_dir.join("solution.txt");
                std::fs::write(&path, solution.render())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            OutputFormat::Json => {
                solution.save_to_file(output_dir.join("solution.json"))?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if the terminal supports it).
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::config::Strategy;
    use crate::puzzle::io::parse_grid_from_string;
    use crate::solve::HuntProblem;
    use tempfile::tempdir;

    fn sample_problem() -> HuntProblem {
        let grid = parse_grid_from_string("1 _\n_ _\n").unwrap();
        HuntProblem::with_grid(Settings::default(), grid)
    }

    #[test]
    fn test_format_report_includes_rendered_grid() {
        let report = sample_problem().solve_with(Strategy::Backtracking).unwrap();
        let formatted = SolutionFormatter::format_report(&report);

        assert!(formatted.contains("Strategy: backtracking"));
        assert!(formatted.contains("Satisfiable: yes"));
        assert!(formatted.contains("1 T"));
    }

    #[test]
    fn test_format_comparison_lists_all_strategies() {
        let comparison = sample_problem().compare().unwrap();
        let formatted = SolutionFormatter::format_comparison(&comparison);

        assert!(formatted.contains("backtracking"));
        assert!(formatted.contains("sat"));
        assert!(formatted.contains("brute_force"));
        assert!(formatted.contains("All strategies agree"));
    }

    #[test]
    fn test_save_solution_text_and_json() {
        let report = sample_problem().solve_with(Strategy::Backtracking).unwrap();
        let solution = report.solution.unwrap();
        let temp_dir = tempdir().unwrap();

        SolutionFormatter::save_solution(&solution, temp_dir.path(), &OutputFormat::Text).unwrap();
        assert!(temp_dir.path().join("solution.txt").exists());

        SolutionFormatter::save_solution(&solution, temp_dir.path(), &OutputFormat::Json).unwrap();
        assert!(temp_dir.path().join("solution.json").exists());
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
