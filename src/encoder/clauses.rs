//! # Clause Building
//!
//! Encoders phrase clauses over [`Bound`]s, i.e., literals that may already be
//! decided by the static domains. [`ClauseSet::add`] folds decided literals
//! away and reports an empty clause as [`Infeasible`].

use std::{fmt, ops};

use thiserror::Error;

use super::literal::FzLit;

/// Marker for a clause set that is statically contradictory
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("statically infeasible")]
pub struct Infeasible;

/// The result of encoding a constraint body
pub type Body = Result<ClauseSet, Infeasible>;

/// A literal that might be fixed by the static domains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bound {
    /// A known truth value
    Const(bool),
    /// An undecided literal
    Lit(FzLit),
}

impl Bound {
    /// True if the bound is the constant `true`
    #[must_use]
    pub fn is_true(self) -> bool {
        self == Bound::Const(true)
    }

    /// True if the bound is the constant `false`
    #[must_use]
    pub fn is_false(self) -> bool {
        self == Bound::Const(false)
    }
}

impl ops::Not for Bound {
    type Output = Bound;

    fn not(self) -> Bound {
        match self {
            Bound::Const(val) => Bound::Const(!val),
            Bound::Lit(lit) => Bound::Lit(!lit),
        }
    }
}

impl From<bool> for Bound {
    fn from(value: bool) -> Self {
        Bound::Const(value)
    }
}

impl From<FzLit> for Bound {
    fn from(value: FzLit) -> Self {
        Bound::Lit(value)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Const(val) => write!(f, "{val}"),
            Bound::Lit(lit) => write!(f, "{lit}"),
        }
    }
}

/// A conjunction of model-level clauses
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClauseSet {
    clauses: Vec<Vec<FzLit>>,
}

impl ClauseSet {
    /// Creates an empty (trivially true) clause set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the disjunction of `bounds`
    ///
    /// Clauses containing a `true` constant are dropped, `false` constants are
    /// removed from the clause.
    ///
    /// # Errors
    ///
    /// [`Infeasible`] if no literal remains.
    pub fn add<I>(&mut self, bounds: I) -> Result<(), Infeasible>
    where
        I: IntoIterator<Item = Bound>,
    {
        let mut clause = Vec::new();
        for bound in bounds {
            match bound {
                Bound::Const(true) => return Ok(()),
                Bound::Const(false) => (),
                Bound::Lit(lit) => {
                    if clause.contains(&!lit) {
                        return Ok(());
                    }
                    if !clause.contains(&lit) {
                        clause.push(lit);
                    }
                }
            }
        }
        if clause.is_empty() {
            return Err(Infeasible);
        }
        self.clauses.push(clause);
        Ok(())
    }

    /// Adds a raw clause without folding
    pub fn add_raw(&mut self, clause: Vec<FzLit>) {
        self.clauses.push(clause);
    }

    /// Appends all clauses of another set
    pub fn extend(&mut self, other: ClauseSet) {
        self.clauses.extend(other.clauses);
    }

    /// Gets the number of clauses
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Checks whether the set is empty, i.e., trivially true
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterates over the clauses
    pub fn iter(&self) -> std::slice::Iter<'_, Vec<FzLit>> {
        self.clauses.iter()
    }
}

impl IntoIterator for ClauseSet {
    type Item = Vec<FzLit>;

    type IntoIter = std::vec::IntoIter<Vec<FzLit>>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

/// Conjoins two bodies
pub fn conjoin(first: Body, second: Body) -> Body {
    let mut first = first?;
    first.extend(second?);
    Ok(first)
}

#[cfg(test)]
mod tests {
    use crate::encoder::literal::{Atom, LitKind};

    use super::{Bound, ClauseSet, Infeasible};

    fn lit(id: u32) -> Bound {
        Bound::Lit(Atom::new(LitKind::Bool, id, 0).pos())
    }

    #[test]
    fn constants_fold() {
        let mut set = ClauseSet::new();
        set.add([lit(0), Bound::Const(true)]).unwrap();
        assert!(set.is_empty());
        set.add([lit(0), Bound::Const(false), lit(1)]).unwrap();
        assert_eq!(set.iter().next().map(Vec::len), Some(2));
        assert_eq!(set.add([Bound::Const(false)]), Err(Infeasible));
        assert_eq!(set.add(std::iter::empty()), Err(Infeasible));
    }

    #[test]
    fn tautologies_and_duplicates() {
        let mut set = ClauseSet::new();
        set.add([lit(0), !lit(0)]).unwrap();
        assert!(set.is_empty());
        set.add([lit(2), lit(2)]).unwrap();
        assert_eq!(set.iter().next().map(Vec::len), Some(1));
    }
}
