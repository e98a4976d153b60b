//! Depth-first search with incremental constraint propagation

use super::context::PuzzleContext;
use super::solution::{Assignment, Mark, SearchStats, SolveOutcome};
use crate::puzzle::grid::VarId;
use std::time::Instant;

/// Fixed tie-break: traps before gems at every depth.
const VALUE_ORDER: [Mark; 2] = [Mark::Trap, Mark::Gem];

/// Solve by depth-first assignment in variable-id order.
///
/// The variable at depth `d` is id `d + 1`, following the row-major order
/// fixed at grid construction, so repeated runs over the same grid produce
/// the identical assignment. An explicit frame stack replaces call
/// recursion: depth is bounded by the variable count, not the thread stack.
pub fn solve(context: &PuzzleContext) -> SolveOutcome {
    let started = Instant::now();
    let mut stats = SearchStats::default();

    if let Some(clue) = context.constraints().infeasible() {
        return SolveOutcome::infeasible(clue);
    }

    let variable_count = context.variable_count();
    let mut assignment = Assignment::new(variable_count);
    // choices[d] holds the VALUE_ORDER index taken at depth d; its length is
    // the current depth.
    let mut choices: Vec<usize> = Vec::with_capacity(variable_count);
    let mut candidate = 0usize;

    loop {
        let depth = choices.len();
        if depth == variable_count {
            // Propagation held at every depth along this path, so the
            // complete assignment satisfies every constraint.
            return SolveOutcome::satisfiable(assignment, started.elapsed(), stats);
        }

        let var = depth as VarId + 1;
        let mut descended = false;

        while candidate < VALUE_ORDER.len() {
            let mark = VALUE_ORDER[candidate];
            stats.nodes_visited += 1;
            assignment.set(var, mark);

            if propagation_holds(context, &assignment, var) {
                choices.push(candidate);
                candidate = 0;
                descended = true;
                break;
            }

            assignment.clear(var);
            candidate += 1;
        }

        if descended {
            continue;
        }

        // Dead end: undo the previous decision and resume with its next
        // candidate value, or give up at depth zero.
        match choices.pop() {
            Some(taken) => {
                let prev_var = choices.len() as VarId + 1;
                assignment.clear(prev_var);
                candidate = taken + 1;
            }
            None => return SolveOutcome::unsatisfiable(started.elapsed(), stats),
        }
    }
}

/// Check every constraint touching `var` against the partial assignment.
///
/// A constraint fails when its trap count already exceeds the clue, or when
/// the clue is out of reach even if every unassigned variable became a trap.
fn propagation_holds(context: &PuzzleContext, assignment: &Assignment, var: VarId) -> bool {
    let constraints = context.constraints();

    for &index in constraints.touching(var) {
        let constraint = &constraints.constraints()[index];
        let mut traps = 0;
        let mut unassigned = 0;

        for &v in &constraint.variables {
            match assignment.get(v) {
                Some(Mark::Trap) => traps += 1,
                Some(Mark::Gem) => {}
                None => unassigned += 1,
            }
        }

        if traps > constraint.clue || traps + unassigned < constraint.clue {
            return false;
        }
    }

    true
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
        let outcome = solve(&ctx);

        assert!(outcome.satisfiable);
        let assignment = outcome.assignment.unwrap();
        assert!(assignment.is_complete());
        assert_eq!(assignment.trap_count(), 1);
        assert!(SolutionValidator::validate(ctx.grid(), &assignment).is_valid);
    }

    #[test]
    fn test_traps_tried_first() {
        // A single unconstrained unknown: the tie-break labels it a trap.
        let ctx = context(vec![vec![None]]);
        let outcome = solve(&ctx);

        assert!(outcome.satisfiable);
        assert_eq!(outcome.assignment.unwrap().get(1), Some(Mark::Trap));
        assert_eq!(outcome.stats.nodes_visited, 1);
    }

    #[test]
    fn test_deterministic_assignment() {
        let rows = vec![
            vec![Some(1), None, Some(1)],
            vec![None, None, None],
            vec![Some(1), None, Some(1)],
        ];
        let ctx = context(rows);

        let first = solve(&ctx).assignment.unwrap();
        let second = solve(&ctx).assignment.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflowing_clue_rejected_without_search() {
        // 2 _
        let ctx = context(vec![vec![Some(2), None]]);
        let outcome = solve(&ctx);

        assert!(!outcome.satisfiable);
        assert_eq!(outcome.stats.nodes_visited, 0);
        assert!(outcome.diagnostic.is_some());
    }

    #[test]
    fn test_jointly_unsatisfiable_grid() {
        // 0 _   -- the zero forces all gems, the two demands both traps
        // _ 2
        let ctx = context(vec![vec![Some(0), None], vec![None, Some(2)]]);
        let outcome = solve(&ctx);

        assert!(!outcome.satisfiable);
        assert!(outcome.assignment.is_none());
        assert!(outcome.stats.nodes_visited > 0);
    }

    #[test]
    fn test_all_clue_grid_trivially_satisfiable() {
        let ctx = context(vec![vec![Some(0), Some(0)]]);
        let outcome = solve(&ctx);

        assert!(outcome.satisfiable);
        let assignment = outcome.assignment.unwrap();
        assert!(assignment.is_empty());
        assert_eq!(outcome.stats.nodes_visited, 0);
    }

    #[test]
    fn test_corridor_pins_middle_cell() {
        // 1 _ 1
        let ctx = context(vec![vec![Some(1), None, Some(1)]]);
        let outcome = solve(&ctx);

        assert!(outcome.satisfiable);
        assert_eq!(outcome.assignment.unwrap().get(1), Some(Mark::Trap));
    }
}
