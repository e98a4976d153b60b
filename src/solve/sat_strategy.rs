//! Oracle-backed strategy: encode, submit, decode

use super::context::PuzzleContext;
use super::solution::{Assignment, Mark, SearchStats, SolveOutcome};
use crate::puzzle::grid::VarId;
use crate::sat::encoder::{BinomialEncoding, ExactCountEncoding};
use crate::sat::oracle::{Oracle, Verdict};
use anyhow::Result;
use std::collections::HashMap;
use std::time::Instant;

/// Solve through an external SAT oracle using the default encoding.
pub fn solve(context: &PuzzleContext, oracle: &mut dyn Oracle) -> Result<SolveOutcome> {
    solve_with_encoding(context, oracle, &BinomialEncoding)
}

/// Solve through an external SAT oracle with an explicit encoding.
pub fn solve_with_encoding(
    context: &PuzzleContext,
    oracle: &mut dyn Oracle,
    encoding: &dyn ExactCountEncoding,
) -> Result<SolveOutcome> {
    let started = Instant::now();
    let mut stats = SearchStats::default();

    if let Some(clue) = context.constraints().infeasible() {
        return Ok(SolveOutcome::infeasible(clue));
    }

    let clauses = encoding.encode_all(context.constraints().constraints());
    stats.clauses_submitted = clauses.len();

    // Every feasible constraint over zero variables is already satisfied, so
    // an empty clause set needs no oracle round trip.
    if clauses.is_empty() {
        let assignment = decode_model(&HashMap::new(), context.variable_count());
        return Ok(SolveOutcome::satisfiable(
            assignment,
            started.elapsed(),
            stats,
        ));
    }

    match oracle.submit(&clauses)? {
        Verdict::Sat(model) => {
            let assignment = decode_model(&model, context.variable_count());
            Ok(SolveOutcome::satisfiable(
                assignment,
                started.elapsed(),
                stats,
            ))
        }
        Verdict::Unsat => Ok(SolveOutcome::unsatisfiable(started.elapsed(), stats)),
    }
}

/// Translate an oracle model into per-cell marks.
///
/// Variables the model does not mention decode as gems: absence of a
/// positive literal means false.
fn decode_model(model: &HashMap<VarId, bool>, variable_count: usize) -> Assignment {
    let mut assignment = Assignment::new(variable_count);
    for i in 0..variable_count {
        let var = i as VarId + 1;
        let trap = model.get(&var).copied().unwrap_or(false);
        assignment.set(var, if trap { Mark::Trap } else { Mark::Gem });
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::grid::Grid;
    use crate::sat::encoder::Clause;
    use crate::sat::oracle::CadicalOracle;
    use crate::solve::validator::SolutionValidator;

    fn context(rows: Vec<Vec<Option<u8>>>) -> PuzzleContext {
        PuzzleContext::new(Grid::from_rows(rows).unwrap())
    }

    #[test]
    fn test_clue_over_three_unknowns() {
        // 1 _
        // _ _
        let ctx = context(vec![vec![Some(1), None], vec![None, None]]);
        let mut oracle = CadicalOracle::new();
        let outcome = solve(&ctx, &mut oracle).unwrap();

        assert!(outcome.satisfiable);
        assert!(outcome.stats.clauses_submitted > 0);
        let assignment = outcome.assignment.unwrap();
        assert!(assignment.is_complete());
        assert!(SolutionValidator::validate(ctx.grid(), &assignment).is_valid);
    }

    #[test]
    fn test_jointly_unsatisfiable_grid() {
        // 0 _
        // _ 2
        let ctx = context(vec![vec![Some(0), None], vec![None, Some(2)]]);
        let mut oracle = CadicalOracle::new();
        let outcome = solve(&ctx, &mut oracle).unwrap();

        assert!(!outcome.satisfiable);
        assert!(outcome.assignment.is_none());
    }

    #[test]
    fn test_overflowing_clue_skips_the_oracle() {
        // 2 _
        let ctx = context(vec![vec![Some(2), None]]);
        let mut oracle = CadicalOracle::new();
        let outcome = solve(&ctx, &mut oracle).unwrap();

        assert!(!outcome.satisfiable);
        assert_eq!(outcome.stats.clauses_submitted, 0);
        assert_eq!(oracle.clause_count(), 0);
    }

    #[test]
    fn test_all_clue_grid_needs_no_oracle() {
        let ctx = context(vec![vec![Some(0), Some(0)]]);
        let mut oracle = CadicalOracle::new();
        let outcome = solve(&ctx, &mut oracle).unwrap();

        assert!(outcome.satisfiable);
        assert!(outcome.assignment.unwrap().is_empty());
        assert_eq!(oracle.clause_count(), 0);
    }

    /// Oracle stub that reports satisfiability with an empty model.
    struct EmptyModelOracle;

    impl Oracle for EmptyModelOracle {
        fn submit(&mut self, _clauses: &[Clause]) -> Result<Verdict> {
            Ok(Verdict::Sat(HashMap::new()))
        }
    }

    #[test]
    fn test_absent_model_variables_decode_as_gems() {
        // 0 _
        // _ _
        let ctx = context(vec![vec![Some(0), None], vec![None, None]]);
        let mut oracle = EmptyModelOracle;
        let outcome = solve(&ctx, &mut oracle).unwrap();

        let assignment = outcome.assignment.unwrap();
        assert!(assignment.is_complete());
        assert_eq!(assignment.trap_count(), 0);
    }
}
