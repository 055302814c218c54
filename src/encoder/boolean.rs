//! # Boolean Constraints

use crate::instances::ClauseSink;

use super::{
    clauses::{Body, Bound, ClauseSet},
    domain::IntVar,
    linear::Rel,
    Encoder,
};

/// `a <-> b`
pub fn bool_eq(a: Bound, b: Bound) -> Body {
    let mut clauses = ClauseSet::new();
    clauses.add([!a, b])?;
    clauses.add([a, !b])?;
    Ok(clauses)
}

/// `a -> b`
pub fn bool_le(a: Bound, b: Bound) -> Body {
    let mut clauses = ClauseSet::new();
    clauses.add([!a, b])?;
    Ok(clauses)
}

/// `~a & b`
pub fn bool_lt(a: Bound, b: Bound) -> Body {
    let mut clauses = ClauseSet::new();
    clauses.add([!a])?;
    clauses.add([b])?;
    Ok(clauses)
}

/// `a xor b`
pub fn bool_ne(a: Bound, b: Bound) -> Body {
    bool_eq(a, !b)
}

/// `pos_1 | ... | pos_n | ~neg_1 | ... | ~neg_m`
pub fn bool_clause(pos: &[Bound], neg: &[Bound]) -> Body {
    let mut clauses = ClauseSet::new();
    clauses.add(pos.iter().copied().chain(neg.iter().map(|&lit| !lit)))?;
    Ok(clauses)
}

/// The conjunction of `lits`
pub fn array_bool_and(lits: &[Bound]) -> Body {
    let mut clauses = ClauseSet::new();
    for &lit in lits {
        clauses.add([lit])?;
    }
    Ok(clauses)
}

/// The disjunction of `lits`
pub fn array_bool_or(lits: &[Bound]) -> Body {
    bool_clause(lits, &[])
}

/// `i = 1` if `b` and `i = 0` otherwise
pub fn bool2int(b: Bound, i: &IntVar) -> Body {
    let mut clauses = ClauseSet::new();
    clauses.add([i.ge(0)])?;
    clauses.add([i.le(1)])?;
    clauses.add([!b, i.ge(1)])?;
    clauses.add([b, i.le(0)])?;
    Ok(clauses)
}

impl<S: ClauseSink> Encoder<S> {
    /// An odd number of `lits` is true
    pub(super) fn array_bool_xor(&mut self, lits: &[Bound]) -> Body {
        let parity = lits
            .iter()
            .fold(Bound::Const(false), |acc, &lit| self.xor_gate(acc, lit));
        let mut clauses = ClauseSet::new();
        clauses.add([parity])?;
        Ok(clauses)
    }

    /// `Σ coef·lit rel rhs` with booleans counted as 0/1
    pub(super) fn bool_lin(
        &mut self,
        rel: Rel,
        coefs: &[i64],
        lits: &[Bound],
        rhs: &IntVar,
    ) -> Body {
        debug_assert_eq!(coefs.len(), lits.len());
        let mut terms: Vec<(i64, IntVar)> = coefs
            .iter()
            .zip(lits)
            .map(|(&coef, &lit)| (coef, IntVar::view(lit)))
            .collect();
        terms.push((-1, rhs.clone()));
        self.linear(rel, &terms, 0)
    }
}
