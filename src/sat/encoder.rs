//! CNF lowering for exact-count constraints

use crate::puzzle::constraints::Constraint;
use itertools::Itertools;

/// A SAT clause: disjunction of literals. A positive literal asserts that
/// the variable is a trap, a negative one that it is a gem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>,
}

impl Clause {
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Single-literal clause.
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// An empty clause is unsatisfiable.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// Lowers one exact-count constraint into CNF clauses.
///
/// Implementations must be deterministic: encoding the same constraint twice
/// yields the same clause sequence. The trait isolates the lowering scheme
/// so a sequential-counter encoding could replace the combinatorial one
/// without touching the constraint builder or the strategies.
pub trait ExactCountEncoding {
    fn encode(&self, constraint: &Constraint) -> Vec<Clause>;

    /// Encode a whole constraint set in order.
    fn encode_all(&self, constraints: &[Constraint]) -> Vec<Clause> {
        constraints
            .iter()
            .flat_map(|constraint| self.encode(constraint))
            .collect()
    }
}

/// Naive combinatorial ("binomial") encoding of exactly-k.
///
/// For `k` traps among `n` variables:
/// - at-least-k: every subset of `n - k + 1` variables must contain a trap,
///   so each such subset becomes a positive clause (skipped when `k = 0`);
/// - at-most-k: no `k + 1` variables may all be traps, so each such subset
///   becomes a clause of negations (skipped when `k = n`).
///
/// Clause count grows combinatorially in `n`; tractable here only because
/// neighbor sets are capped at 8 variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialEncoding;

impl ExactCountEncoding for BinomialEncoding {
    fn encode(&self, constraint: &Constraint) -> Vec<Clause> {
        let n = constraint.variables.len();
        let k = constraint.clue;
        debug_assert!(k <= n, "infeasible constraints must be rejected upstream");

        let vars = &constraint.variables;
        let mut clauses = Vec::new();

        if k > 0 {
            for subset in vars.iter().combinations(n - k + 1) {
                clauses.push(Clause::new(subset.into_iter().map(|&v| v).collect()));
            }
        }

        if k < n {
            for subset in vars.iter().combinations(k + 1) {
                clauses.push(Clause::new(subset.into_iter().map(|&v| -v).collect()));
            }
        }

        clauses
    }
}
