//! # Set Constraints
//!
//! Set constraints work element-wise on the membership literals. Operands
//! are paired up by merging their sorted ground sets, elements outside a
//! ground set are constantly absent.

use itertools::Itertools;
use tracing::trace;

use crate::instances::ClauseSink;

use super::{
    clauses::{Body, Bound, ClauseSet, Infeasible},
    domain::{IntVar, SetVal},
    linear::Rel,
    Encoder,
};

/// The sorted union of sorted element lists
fn universe(sets: &[&SetVal]) -> Vec<i64> {
    sets.iter()
        .map(|set| set.elems().iter().copied())
        .kmerge()
        .dedup()
        .collect()
}

/// `x = y`
pub fn set_eq(x: &SetVal, y: &SetVal) -> Body {
    let mut clauses = ClauseSet::new();
    for elem in universe(&[x, y]) {
        let (in_x, in_y) = (x.member(elem), y.member(elem));
        clauses.add([!in_x, in_y])?;
        clauses.add([in_x, !in_y])?;
    }
    Ok(clauses)
}

/// `x ⊆ y`
pub fn set_subset(x: &SetVal, y: &SetVal) -> Body {
    let mut clauses = ClauseSet::new();
    for &elem in x.elems() {
        clauses.add([!x.member(elem), y.member(elem)])?;
    }
    Ok(clauses)
}

/// `v ∈ s`
pub fn set_in(v: &IntVar, s: &SetVal) -> Body {
    let mut clauses = ClauseSet::new();
    for val in v.values() {
        clauses.add(v.ne(val).into_iter().chain([s.member(val)]))?;
    }
    Ok(clauses)
}

/// Binary set operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOp {
    /// `x ∪ y`
    Union,
    /// `x ∩ y`
    Intersect,
    /// `x \ y`
    Diff,
    /// `(x \ y) ∪ (y \ x)`
    SymDiff,
}

/// `op(x, y) = z`
pub fn set_op(op: SetOp, x: &SetVal, y: &SetVal, z: &SetVal) -> Body {
    let mut clauses = ClauseSet::new();
    for elem in universe(&[x, y, z]) {
        let (a, b, r) = (x.member(elem), y.member(elem), z.member(elem));
        match op {
            SetOp::Union => {
                clauses.add([!a, r])?;
                clauses.add([!b, r])?;
                clauses.add([!r, a, b])?;
            }
            SetOp::Intersect => {
                clauses.add([!r, a])?;
                clauses.add([!r, b])?;
                clauses.add([r, !a, !b])?;
            }
            SetOp::Diff => {
                clauses.add([!r, a])?;
                clauses.add([!r, !b])?;
                clauses.add([r, !a, b])?;
            }
            SetOp::SymDiff => {
                clauses.add([!r, a, b])?;
                clauses.add([!r, !a, !b])?;
                clauses.add([r, !a, b])?;
                clauses.add([r, a, !b])?;
            }
        }
    }
    Ok(clauses)
}

impl<S: ClauseSink> Encoder<S> {
    /// `x != y`
    pub(super) fn set_ne(&mut self, x: &SetVal, y: &SetVal) -> Body {
        let diffs: Vec<Bound> = universe(&[x, y])
            .into_iter()
            .map(|elem| self.xor_gate(x.member(elem), y.member(elem)))
            .collect();
        let mut clauses = ClauseSet::new();
        clauses.add(diffs)?;
        Ok(clauses)
    }

    /// `|s| = k`
    pub(super) fn set_card(&mut self, s: &SetVal, k: &IntVar) -> Body {
        let mut terms: Vec<(i64, IntVar)> = s
            .elems()
            .iter()
            .map(|&elem| (1, IntVar::view(s.member(elem))))
            .collect();
        terms.push((-1, k.clone()));
        self.linear(Rel::Eq, &terms, 0)
    }

    /// A helper equal to the largest element of `s`, or `empty` if `s` is
    /// empty
    ///
    /// `empty` must be smaller than every element of the ground set.
    pub(super) fn set_max(&mut self, s: &SetVal, empty: i64) -> IntVar {
        let ground = match s {
            SetVal::Const(elems) => {
                return IntVar::constant(elems.last().copied().unwrap_or(empty))
            }
            SetVal::Var { ground, .. } if ground.is_empty() => return IntVar::constant(empty),
            SetVal::Var { ground, .. } => ground.clone(),
        };
        debug_assert!(empty < ground[0]);
        let domain: Vec<i64> = std::iter::once(empty).chain(ground.iter().copied()).collect();
        let max = self.new_int_set(domain.into());
        self.stats.n_helpers += 1;
        trace!(id = max.id(), "set maximum");
        for &elem in ground.iter() {
            let member = s.member(elem);
            // no present element above the maximum
            self.define(clause([!member, max.ge(elem)]));
            let [below, above] = max.ne(elem);
            self.define(clause([below, above, member]));
        }
        let fallback = ground.iter().map(|&elem| s.member(elem)).chain([max.le(empty)]);
        self.define(clause(fallback));
        max
    }

    /// `x < y` or, if not `strict`, `x <= y` in the lexicographic order of
    /// the sorted element lists
    pub(super) fn set_lex(&mut self, x: &SetVal, y: &SetVal, strict: bool) -> Body {
        let elems = universe(&[x, y]);
        let mut clauses = ClauseSet::new();
        let Some(&first) = elems.first() else {
            // both sets are empty
            if strict {
                return Err(Infeasible);
            }
            return Ok(clauses);
        };
        let max_x = self.set_max(x, first - 1);
        let max_y = self.set_max(y, first - 1);
        let mut prefix_eq = Bound::Const(true);
        let mut smaller = Vec::with_capacity(2 * elems.len() + 1);
        for elem in elems {
            let (in_x, in_y) = (x.member(elem), y.member(elem));
            // x continues with elem, y with something larger
            smaller.push(self.and_gate(&[prefix_eq, in_x, !in_y, max_y.ge(elem + 1)]));
            // y continues with elem, x ends
            smaller.push(self.and_gate(&[prefix_eq, !in_x, in_y, max_x.le(elem)]));
            let same = self.eq_gate(in_x, in_y);
            prefix_eq = self.and_gate(&[prefix_eq, same]);
        }
        if !strict {
            smaller.push(prefix_eq);
        }
        clauses.add(smaller)?;
        Ok(clauses)
    }
}

fn clause<I: IntoIterator<Item = Bound>>(bounds: I) -> Body {
    let mut clauses = ClauseSet::new();
    clauses.add(bounds)?;
    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use crate::{
        encoder::{
            clauses::{Bound, Infeasible},
            domain::{IntVar, SetVal},
            Encoder, EncoderConfig,
        },
        instances::Cnf,
    };

    use super::{set_eq, set_in, set_op, set_subset, universe, SetOp};

    fn constant(elems: &[i64]) -> SetVal {
        SetVal::Const(elems.into())
    }

    #[test]
    fn merged_universe() {
        let x = constant(&[1, 4, 6]);
        let y = SetVal::Var {
            id: 0,
            ground: vec![2, 4, 9].into(),
        };
        assert_eq!(universe(&[&x, &y]), vec![1, 2, 4, 6, 9]);
    }

    #[test]
    fn constant_operations() {
        let (x, y) = (constant(&[1, 2]), constant(&[2, 3]));
        assert!(set_op(SetOp::Union, &x, &y, &constant(&[1, 2, 3]))
            .unwrap()
            .is_empty());
        assert!(set_op(SetOp::SymDiff, &x, &y, &constant(&[1, 3]))
            .unwrap()
            .is_empty());
        assert_eq!(
            set_op(SetOp::Intersect, &x, &y, &constant(&[1, 2])),
            Err(Infeasible)
        );
        assert!(set_op(SetOp::Diff, &x, &y, &constant(&[1])).unwrap().is_empty());
        assert_eq!(set_eq(&x, &y), Err(Infeasible));
        assert_eq!(set_subset(&x, &y), Err(Infeasible));
        assert!(set_subset(&constant(&[2]), &y).unwrap().is_empty());
        assert_eq!(set_in(&IntVar::constant(5), &x), Err(Infeasible));
    }

    #[test]
    fn constant_lex_order() {
        let mut enc = Encoder::new(EncoderConfig::default(), Cnf::new());
        // {1, 3} < {2} since [1, 3] < [2]
        assert!(enc
            .set_lex(&constant(&[1, 3]), &constant(&[2]), true)
            .unwrap()
            .is_empty());
        // {1} < {1, 2} since [1] is a prefix of [1, 2]
        assert!(enc
            .set_lex(&constant(&[1]), &constant(&[1, 2]), true)
            .unwrap()
            .is_empty());
        assert_eq!(
            enc.set_lex(&constant(&[1, 2]), &constant(&[1]), true),
            Err(Infeasible)
        );
        assert_eq!(
            enc.set_lex(&constant(&[2]), &constant(&[2]), true),
            Err(Infeasible)
        );
        assert!(enc
            .set_lex(&constant(&[2]), &constant(&[2]), false)
            .unwrap()
            .is_empty());
        assert_eq!(enc.set_lex(&constant(&[]), &constant(&[]), true), Err(Infeasible));
        assert_eq!(enc.stats.n_helpers, 0);
    }

    #[test]
    fn set_max_of_variable() {
        let mut enc = Encoder::new(EncoderConfig::default(), Cnf::new());
        let s = enc.new_set_var(vec![2, 5].into());
        let max = enc.set_max(&s, 1);
        assert_eq!((max.lo(), max.hi()), (1, 5));
        assert!(!max.contains(3));
        assert_eq!(enc.set_max(&constant(&[]), 0).fixed(), Some(0));
        assert!(matches!(s.member(5), Bound::Lit(_)));
    }
}
