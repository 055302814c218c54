//! # Clauses
//!
//! The only constraint type the generated formula contains is the [`Clause`].

use std::fmt;

use itertools::Itertools;

use super::{Assignment, Lit, TernaryVal};

/// A disjunction of literals
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Default, Hash)]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    /// Creates a new empty clause
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal to the clause
    pub fn add(&mut self, lit: Lit) {
        self.lits.push(lit);
    }

    /// Gets the length of the clause
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    /// Checks if the clause is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// Gets an iterator over the clause
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Lit> {
        self.lits.iter()
    }

    /// Evaluates the clause under an assignment
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> TernaryVal {
        let mut undetermined = false;
        for &lit in &self.lits {
            match assignment.lit_value(lit) {
                TernaryVal::True => return TernaryVal::True,
                TernaryVal::DontCare => undetermined = true,
                TernaryVal::False => (),
            }
        }
        if undetermined {
            TernaryVal::DontCare
        } else {
            TernaryVal::False
        }
    }
}

impl From<Vec<Lit>> for Clause {
    fn from(lits: Vec<Lit>) -> Self {
        Self { lits }
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self {
            lits: Vec::from_iter(iter),
        }
    }
}

impl IntoIterator for Clause {
    type Item = Lit;

    type IntoIter = std::vec::IntoIter<Lit>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.lits.into_iter()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;

    type IntoIter = std::slice::Iter<'a, Lit>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.lits.iter().format("|"))
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.lits.iter().format("|"))
    }
}

/// Creates a clause from a list of literals
///
/// # Examples
///
/// ```
/// use fzncnf::{clause, lit};
///
/// let cl = clause![lit![0], !lit![1]];
/// assert_eq!(cl.len(), 2);
/// ```
#[macro_export]
macro_rules! clause {
    () => {
        $crate::types::Clause::new()
    };
    ( $($l:expr),* ) => {
        {
            let mut tmp_clause = $crate::types::Clause::new();
            $(
                tmp_clause.add($l);
            )*
            tmp_clause
        }
    };
}
