//! # In-Memory CNF

use std::io;

use crate::types::{Assignment, Clause, TernaryVal};

use super::ClauseSink;

/// Simple type representing a CNF formula
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    /// Creates a new [`Cnf`]
    #[must_use]
    pub fn new() -> Cnf {
        Cnf::default()
    }

    /// Adds a clause to the CNF
    #[inline]
    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Checks if the CNF is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the number of clauses in the instance
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns an iterator over references to the clauses
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Evaluates the CNF under an assignment
    #[must_use]
    pub fn evaluate(&self, assign: &Assignment) -> TernaryVal {
        let mut undetermined = false;
        for clause in &self.clauses {
            match clause.evaluate(assign) {
                TernaryVal::False => return TernaryVal::False,
                TernaryVal::DontCare => undetermined = true,
                TernaryVal::True => (),
            }
        }
        if undetermined {
            TernaryVal::DontCare
        } else {
            TernaryVal::True
        }
    }
}

impl ClauseSink for Cnf {
    fn add_clause(&mut self, clause: Clause) -> io::Result<()> {
        self.clauses.push(clause);
        Ok(())
    }

    fn n_clauses(&self) -> usize {
        self.clauses.len()
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;

    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl IntoIterator for Cnf {
    type Item = Clause;

    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}
