//! Exhaustive enumeration used as a correctness oracle

use super::context::PuzzleContext;
use super::solution::{Assignment, Mark, SearchStats, SolveOutcome};
use crate::error::PuzzleError;
use crate::puzzle::constraints::Constraint;
use crate::puzzle::grid::VarId;
use std::time::Instant;

/// Default refusal threshold: at most 2^20 masks are scanned.
pub const DEFAULT_CEILING: usize = 20;

/// Enumerate every assignment of the unknown cells, lowest mask first.
///
/// Exponential by construction. Grids with more unknown variables than
/// `ceiling` are refused with `ResourceExceeded` before any enumeration,
/// never silently truncated.
pub fn solve(context: &PuzzleContext, ceiling: usize) -> Result<SolveOutcome, PuzzleError> {
    // A u64 mask caps enumeration at 63 variables regardless of the
    // configured ceiling.
    let ceiling = ceiling.min(63);
    let variables = context.variable_count();
    if variables > ceiling {
        return Err(PuzzleError::ResourceExceeded { variables, ceiling });
    }

    let started = Instant::now();
    let mut stats = SearchStats::default();

    if let Some(clue) = context.constraints().infeasible() {
        return Ok(SolveOutcome::infeasible(clue));
    }

    let constraints = context.constraints().constraints();

    for mask in 0u64..(1u64 << variables) {
        stats.assignments_tested += 1;
        if constraints
            .iter()
            .all(|constraint| constraint_holds(constraint, mask))
        {
            let assignment = assignment_from_mask(mask, variables);
            return Ok(SolveOutcome::satisfiable(
                assignment,
                started.elapsed(),
                stats,
            ));
        }
    }

    Ok(SolveOutcome::unsatisfiable(started.elapsed(), stats))
}

/// Bit `i` of the mask decides variable `i + 1`; a set bit is a trap.
fn assignment_from_mask(mask: u64, variables: usize) -> Assignment {
    let mut assignment = Assignment::new(variables);
    for i in 0..variables {
        let mark = if mask >> i & 1 == 1 {
            Mark::Trap
        } else {
            Mark::Gem
        };
        assignment.set(i as VarId + 1, mark);
    }
    assignment
}

fn constraint_holds(constraint: &Constraint, mask: u64) -> bool {
    let traps = constraint
        .variables
        .iter()
        .filter(|&&var| mask >> (var as u32 - 1) & 1 == 1)
        .count();
    traps == constraint.clue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::grid::Grid;
    use crate::solve::validator::SolutionValidator;

    fn context(rows: Vec<Vec<Option<u8>>>) -> PuzzleContext {
        PuzzleContext::new(Grid::from_rows(rows).unwrap())
    }

    #[test]
    fn test_clue_over_three_unknowns() {
        // 1 _
        // _ _
        let ctx = context(vec![vec![Some(1), None], vec![None, None]]);
        let outcome = solve(&ctx, DEFAULT_CEILING).unwrap();

        assert!(outcome.satisfiable);
        let assignment = outcome.assignment.unwrap();
        assert_eq!(assignment.trap_count(), 1);
        assert!(SolutionValidator::validate(ctx.grid(), &assignment).is_valid);
        // Mask 0 (no traps) fails, mask 1 (variable 1 trapped) succeeds.
        assert_eq!(outcome.stats.assignments_tested, 2);
    }

    #[test]
    fn test_unsatisfiable_exhausts_every_mask() {
        // 0 _
        // _ 2
        let ctx = context(vec![vec![Some(0), None], vec![None, Some(2)]]);
        let outcome = solve(&ctx, DEFAULT_CEILING).unwrap();

        assert!(!outcome.satisfiable);
        assert_eq!(outcome.stats.assignments_tested, 4);
    }

    #[test]
    fn test_ceiling_refusal_before_any_work() {
        // Five unknowns against a ceiling of four.
        let ctx = context(vec![vec![None, None, None, None, None]]);
        let err = solve(&ctx, 4).unwrap_err();

        assert!(matches!(
            err,
            PuzzleError::ResourceExceeded {
                variables: 5,
                ceiling: 4
            }
        ));
    }

    #[test]
    fn test_overflowing_clue_rejected_without_enumeration() {
        // 2 _
        let ctx = context(vec![vec![Some(2), None]]);
        let outcome = solve(&ctx, DEFAULT_CEILING).unwrap();

        assert!(!outcome.satisfiable);
        assert_eq!(outcome.stats.assignments_tested, 0);
    }

    #[test]
    fn test_all_clue_grid_trivially_satisfiable() {
        let ctx = context(vec![vec![Some(0), Some(0)]]);
        let outcome = solve(&ctx, DEFAULT_CEILING).unwrap();

        assert!(outcome.satisfiable);
        assert!(outcome.assignment.unwrap().is_empty());
        assert_eq!(outcome.stats.assignments_tested, 1);
    }
}
