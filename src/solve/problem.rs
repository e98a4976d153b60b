//! Puzzle problem driver and strategy orchestration

use super::context::PuzzleContext;
use super::solution::{Solution, SolveOutcome};
use super::validator::SolutionValidator;
use super::{backtracking, brute_force, sat_strategy};
use crate::config::{Settings, Strategy};
use crate::puzzle::grid::Grid;
use crate::puzzle::io::load_grid_from_file;
use crate::sat::oracle::CadicalOracle;
use anyhow::{Context, Result};

/// A loaded puzzle plus its solving configuration.
pub struct HuntProblem {
    settings: Settings,
    context: PuzzleContext,
}

/// Outcome of a single strategy run, with the validated solution when one
/// exists.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub strategy: Strategy,
    pub outcome: SolveOutcome,
    pub solution: Option<Solution>,
}

/// Result of running every applicable strategy over the same context.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub reports: Vec<SolveReport>,
    /// True when all strategies returned the same satisfiability verdict.
    pub agreed: bool,
    /// Brute force is skipped above its variable ceiling.
    pub skipped_brute_force: bool,
}

impl HuntProblem {
    /// Load the configured puzzle file and build the solving context.
    pub fn new(settings: Settings) -> Result<Self> {
        let grid = load_grid_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;
        Ok(Self::with_grid(settings, grid))
    }

    /// Create a problem over an explicit grid (useful for testing).
    pub fn with_grid(settings: Settings, grid: Grid) -> Self {
        let context = PuzzleContext::new(grid);
        Self { settings, context }
    }

    pub fn grid(&self) -> &Grid {
        self.context.grid()
    }

    pub fn context(&self) -> &PuzzleContext {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the configured strategy.
    pub fn solve(&self) -> Result<SolveReport> {
        self.solve_with(self.settings.solver.strategy)
    }

    /// Run one strategy and validate any solution it produces.
    pub fn solve_with(&self, strategy: Strategy) -> Result<SolveReport> {
        let outcome = match strategy {
            Strategy::Backtracking => backtracking::solve(&self.context),
            Strategy::BruteForce => {
                brute_force::solve(&self.context, self.settings.solver.brute_force_ceiling)?
            }
            Strategy::Sat => {
                let mut oracle = CadicalOracle::new();
                sat_strategy::solve(&self.context, &mut oracle)?
            }
        };

        let solution = match &outcome.assignment {
            Some(assignment) => {
                let validation = SolutionValidator::validate(self.context.grid(), assignment);
                if !validation.is_valid {
                    anyhow::bail!(
                        "strategy {} produced an invalid solution: {}",
                        strategy,
                        validation
                    );
                }
                Some(Solution::new(
                    self.context.grid().clone(),
                    assignment.clone(),
                    outcome.elapsed,
                ))
            }
            None => None,
        };

        Ok(SolveReport {
            strategy,
            outcome,
            solution,
        })
    }

    /// Run every applicable strategy and check that they agree on
    /// satisfiability. Brute force joins only within its variable ceiling.
    pub fn compare(&self) -> Result<ComparisonReport> {
        let mut reports = vec![
            self.solve_with(Strategy::Backtracking)?,
            self.solve_with(Strategy::Sat)?,
        ];

        let skipped_brute_force =
            self.context.variable_count() > self.settings.solver.brute_force_ceiling;
        if !skipped_brute_force {
            reports.push(self.solve_with(Strategy::BruteForce)?);
        }

        let agreed = reports
            .windows(2)
            .all(|pair| pair[0].outcome.satisfiable == pair[1].outcome.satisfiable);

        Ok(ComparisonReport {
            reports,
            agreed,
            skipped_brute_force,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::io::parse_grid_from_string;

    fn problem(content: &str) -> HuntProblem {
        let grid = parse_grid_from_string(content).unwrap();
        HuntProblem::with_grid(Settings::default(), grid)
    }

    /// Board with eleven unknowns, small enough for all three strategies.
    const EXAMPLE_5X5: &str = "2 _ _ 1 _\n\
                               _ 5 4 2 _\n\
                               3 _ _ 2 1\n\
                               3 _ 6 _ 1\n\
                               2 _ _ 2 1\n";

    #[test]
    fn test_strategies_agree_on_satisfiable_board() {
        let problem = problem(EXAMPLE_5X5);
        let comparison = problem.compare().unwrap();

        assert!(!comparison.skipped_brute_force);
        assert_eq!(comparison.reports.len(), 3);
        assert!(comparison.agreed);
        for report in &comparison.reports {
            assert!(report.outcome.satisfiable, "{} disagreed", report.strategy);
            assert!(report.solution.is_some());
        }
    }

    #[test]
    fn test_strategies_agree_on_unsatisfiable_board() {
        // 0 _
        // _ 2
        let problem = problem("0 _\n_ 2\n");
        let comparison = problem.compare().unwrap();

        assert!(comparison.agreed);
        for report in &comparison.reports {
            assert!(!report.outcome.satisfiable);
            assert!(report.solution.is_none());
        }
    }

    #[test]
    fn test_every_strategy_rejects_overflowing_clue_without_work() {
        // 2 _
        let problem = problem("2 _\n");

        for strategy in [Strategy::Backtracking, Strategy::BruteForce, Strategy::Sat] {
            let report = problem.solve_with(strategy).unwrap();
            assert!(!report.outcome.satisfiable);
            assert_eq!(report.outcome.stats, Default::default());
            assert_eq!(report.outcome.elapsed, std::time::Duration::ZERO);
            assert!(report.outcome.diagnostic.is_some());
        }
    }

    #[test]
    fn test_all_clue_grid_yields_trivial_solution() {
        let all_clues = problem("0 0\n0 0\n");

        for strategy in [Strategy::Backtracking, Strategy::BruteForce, Strategy::Sat] {
            let report = all_clues.solve_with(strategy).unwrap();
            assert!(report.outcome.satisfiable);
            let solution = report.solution.unwrap();
            assert!(solution.assignment.is_empty());
            assert_eq!(solution.render(), "0 0\n0 0\n");
        }
    }

    #[test]
    fn test_all_clue_grid_with_unreachable_clue_is_infeasible() {
        // A clue of 1 with no unknown neighbor can never be satisfied.
        let report = problem("0 1\n1 0\n")
            .solve_with(Strategy::Backtracking)
            .unwrap();
        assert!(!report.outcome.satisfiable);
        assert!(report.outcome.diagnostic.is_some());
    }

    #[test]
    fn test_solutions_satisfy_every_clue() {
        let problem = problem(EXAMPLE_5X5);

        for strategy in [Strategy::Backtracking, Strategy::BruteForce, Strategy::Sat] {
            let report = problem.solve_with(strategy).unwrap();
            let solution = report.solution.expect("board is satisfiable");
            let validation =
                SolutionValidator::validate(&solution.grid, &solution.assignment);
            assert!(validation.is_valid, "{}: {}", strategy, validation);
        }
    }

    #[test]
    fn test_backtracking_is_deterministic_across_runs() {
        let problem = problem(EXAMPLE_5X5);

        let first = problem.solve_with(Strategy::Backtracking).unwrap();
        let second = problem.solve_with(Strategy::Backtracking).unwrap();
        assert_eq!(first.outcome.assignment, second.outcome.assignment);
        assert_eq!(
            first.outcome.stats.nodes_visited,
            second.outcome.stats.nodes_visited
        );
    }

    #[test]
    fn test_compare_skips_brute_force_above_ceiling() {
        let mut settings = Settings::default();
        settings.solver.brute_force_ceiling = 2;
        let grid = parse_grid_from_string("1 _\n_ _\n").unwrap();
        let problem = HuntProblem::with_grid(settings, grid);

        let comparison = problem.compare().unwrap();
        assert!(comparison.skipped_brute_force);
        assert_eq!(comparison.reports.len(), 2);
        assert!(comparison.agreed);
    }
}
