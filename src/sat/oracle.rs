//! External SAT oracle boundary

use super::encoder::Clause;
use crate::puzzle::grid::VarId;
use anyhow::Result;
use cadical::Solver;
use std::collections::HashMap;

/// Verdict returned by the oracle for a submitted clause set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Satisfiable; the model covers every variable the solver decided.
    /// Variables absent from the model are false by convention.
    Sat(HashMap<VarId, bool>),
    Unsat,
}

/// Boundary to an external boolean-satisfiability solver.
///
/// The solving algorithm behind this trait is a collaborator, not part of
/// this crate; only the clause-in, verdict-out contract is ours.
pub trait Oracle {
    fn submit(&mut self, clauses: &[Clause]) -> Result<Verdict>;
}

/// CaDiCaL-backed oracle.
pub struct CadicalOracle {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
}

impl CadicalOracle {
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
        }
    }

    /// Highest variable id seen across submitted clauses.
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Number of clauses submitted so far.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            anyhow::bail!("cannot add empty clause (unsatisfiable)");
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        Ok(())
    }

    fn extract_model(&self) -> HashMap<VarId, bool> {
        let mut model = HashMap::new();
        for var in 1..=self.variable_count as VarId {
            if let Some(value) = self.solver.value(var) {
                model.insert(var, value);
            }
        }
        model
    }
}

impl Default for CadicalOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for CadicalOracle {
    fn submit(&mut self, clauses: &[Clause]) -> Result<Verdict> {
        for clause in clauses {
            self.add_clause(clause)?;
        }

        match self.solver.solve() {
            Some(true) => Ok(Verdict::Sat(self.extract_model())),
            Some(false) => Ok(Verdict::Unsat),
            None => anyhow::bail!("SAT solver returned no verdict"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_satisfiable() {
        let mut oracle = CadicalOracle::new();

        // (x1 ∨ x2) ∧ (¬x1 ∨ x2) forces x2.
        let clauses = vec![Clause::new(vec![1, 2]), Clause::new(vec![-1, 2])];

        match oracle.submit(&clauses).unwrap() {
            Verdict::Sat(model) => assert_eq!(model.get(&2), Some(&true)),
            Verdict::Unsat => panic!("formula is satisfiable"),
        }
    }

    #[test]
    fn test_unsatisfiable() {
        let mut oracle = CadicalOracle::new();

        let clauses = vec![Clause::unit(1), Clause::unit(-1)];
        assert_eq!(oracle.submit(&clauses).unwrap(), Verdict::Unsat);
    }

    #[test]
    fn test_counts_track_submissions() {
        let mut oracle = CadicalOracle::new();

        let clauses = vec![Clause::new(vec![1, -5, 3]), Clause::new(vec![2, -7])];
        oracle.submit(&clauses).unwrap();

        assert_eq!(oracle.clause_count(), 2);
        assert_eq!(oracle.variable_count(), 7);
    }

    #[test]
    fn test_empty_clause_rejected() {
        let mut oracle = CadicalOracle::new();
        assert!(oracle.submit(&[Clause::new(Vec::new())]).is_err());
    }

    #[test]
    fn test_empty_submission_is_trivially_sat() {
        let mut oracle = CadicalOracle::new();
        match oracle.submit(&[]).unwrap() {
            Verdict::Sat(model) => assert!(model.is_empty()),
            Verdict::Unsat => panic!("empty formula is satisfiable"),
        }
    }
}
