//! # Domains and Helper Variables
//!
//! Integer variables are order encoded, set variables get one membership
//! literal per ground element. This module also mints helper variables and
//! direct literals.

use std::rc::Rc;

use itertools::Either;
use tracing::trace;

use crate::{instances::ClauseSink, utils::sorted_contains};

use super::{
    clauses::{Body, Bound, ClauseSet},
    literal::{Atom, FzLit, LitKind},
    Encoder,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum IntRepr {
    Const,
    Order {
        id: u32,
        elems: Option<Rc<[i64]>>,
    },
    /// A 0/1 view of a boolean literal
    View(FzLit),
}

/// An integer variable, constant or 0/1 view of a literal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntVar {
    lo: i64,
    hi: i64,
    repr: IntRepr,
}

impl IntVar {
    /// Creates a constant
    #[must_use]
    pub fn constant(val: i64) -> Self {
        IntVar {
            lo: val,
            hi: val,
            repr: IntRepr::Const,
        }
    }

    /// Creates the 0/1 integer that is 1 exactly if `bound` holds
    #[must_use]
    pub fn view(bound: Bound) -> Self {
        match bound {
            Bound::Const(val) => IntVar::constant(i64::from(val)),
            Bound::Lit(lit) => IntVar {
                lo: 0,
                hi: 1,
                repr: IntRepr::View(lit),
            },
        }
    }

    fn order(id: u32, lo: i64, hi: i64) -> Self {
        IntVar {
            lo,
            hi,
            repr: IntRepr::Order { id, elems: None },
        }
    }

    fn sparse(id: u32, elems: Rc<[i64]>) -> Self {
        IntVar {
            lo: elems[0],
            hi: elems[elems.len() - 1],
            repr: IntRepr::Order {
                id,
                elems: Some(elems),
            },
        }
    }

    /// The smallest value
    #[must_use]
    pub fn lo(&self) -> i64 {
        self.lo
    }

    /// The largest value
    #[must_use]
    pub fn hi(&self) -> i64 {
        self.hi
    }

    /// The id of the order-encoded variable, if any
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        match self.repr {
            IntRepr::Order { id, .. } => Some(id),
            _ => None,
        }
    }

    /// The literal a 0/1 view is built on
    #[must_use]
    pub fn viewed(&self) -> Option<FzLit> {
        match self.repr {
            IntRepr::View(lit) => Some(lit),
            _ => None,
        }
    }

    /// The value, if the variable is fixed
    #[must_use]
    pub fn fixed(&self) -> Option<i64> {
        if self.lo == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }

    /// The number of values in the domain
    #[must_use]
    pub fn size(&self) -> usize {
        match &self.repr {
            IntRepr::Order {
                elems: Some(elems), ..
            } => elems.len(),
            _ => usize::try_from(self.hi - self.lo + 1).unwrap_or(usize::MAX),
        }
    }

    /// Iterates over the domain in increasing order
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        match &self.repr {
            IntRepr::Order {
                elems: Some(elems), ..
            } => Either::Left(elems.iter().copied()),
            _ => Either::Right(self.lo..=self.hi),
        }
    }

    /// Checks whether a value is in the domain
    #[must_use]
    pub fn contains(&self, val: i64) -> bool {
        match &self.repr {
            IntRepr::Order {
                elems: Some(elems), ..
            } => sorted_contains(elems, val),
            _ => self.lo <= val && val <= self.hi,
        }
    }

    /// The raw order literal `x <= val`, without domain folding
    pub(super) fn order_lit(&self, val: i64) -> Option<FzLit> {
        self.id()
            .map(|id| Atom::new(LitKind::Order, id, val).pos())
    }

    /// `x <= val`
    #[must_use]
    pub fn le(&self, val: i64) -> Bound {
        if val < self.lo {
            return Bound::Const(false);
        }
        if val >= self.hi {
            return Bound::Const(true);
        }
        match self.repr {
            IntRepr::Order { id, .. } => Bound::Lit(Atom::new(LitKind::Order, id, val).pos()),
            IntRepr::View(lit) => Bound::Lit(!lit),
            IntRepr::Const => unreachable!("constant with lo < hi"),
        }
    }

    /// `x >= val`
    #[must_use]
    pub fn ge(&self, val: i64) -> Bound {
        !self.le(val - 1)
    }

    /// The disjunction expressing `x != val`
    #[must_use]
    pub fn ne(&self, val: i64) -> [Bound; 2] {
        if self.contains(val) {
            [self.le(val - 1), self.ge(val + 1)]
        } else {
            [Bound::Const(true), Bound::Const(true)]
        }
    }
}

/// A set variable or constant
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetVal {
    /// A variable ranging over the subsets of a sorted ground set
    Var {
        /// Id of the variable
        id: u32,
        /// Ground set, sorted
        ground: Rc<[i64]>,
    },
    /// A constant set, sorted
    Const(Rc<[i64]>),
}

impl SetVal {
    /// The elements that may be members, sorted
    #[must_use]
    pub fn elems(&self) -> &[i64] {
        match self {
            SetVal::Var { ground, .. } => ground,
            SetVal::Const(elems) => elems,
        }
    }

    /// `elem ∈ self`
    #[must_use]
    pub fn member(&self, elem: i64) -> Bound {
        match self {
            SetVal::Var { id, ground } => {
                if sorted_contains(ground, elem) {
                    Bound::Lit(Atom::new(LitKind::SetElem, *id, elem).pos())
                } else {
                    Bound::Const(false)
                }
            }
            SetVal::Const(elems) => Bound::Const(sorted_contains(elems, elem)),
        }
    }

    /// The id of the variable, if not constant
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        match self {
            SetVal::Var { id, .. } => Some(*id),
            SetVal::Const(_) => None,
        }
    }
}

/// A value or variable of any type
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// Integer
    Int(IntVar),
    /// Boolean
    Bool(Bound),
    /// Set of integers
    Set(SetVal),
}

impl<S: ClauseSink> Encoder<S> {
    fn fresh_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Mints an order-encoded variable over `lo..=hi`
    pub(super) fn new_int_range(&mut self, lo: i64, hi: i64) -> IntVar {
        debug_assert!(lo <= hi);
        let var = IntVar::order(self.fresh_id(), lo, hi);
        self.encode_order_chain(&var, lo, hi);
        var
    }

    /// Mints an order-encoded variable over a sparse sorted domain
    pub(super) fn new_int_set(&mut self, elems: Rc<[i64]>) -> IntVar {
        debug_assert!(!elems.is_empty());
        let var = IntVar::sparse(self.fresh_id(), elems.clone());
        self.encode_order_chain(&var, var.lo, var.hi);
        for (&prev, &next) in elems.iter().zip(elems.iter().skip(1)) {
            if next > prev + 1 {
                // x <= next-1 implies x <= prev
                let gap_top = raw_order(&var, next - 1);
                let below = raw_order(&var, prev);
                self.defs.add_raw(vec![!gap_top, below]);
            }
        }
        var
    }

    fn encode_order_chain(&mut self, var: &IntVar, lo: i64, hi: i64) {
        self.defs.add_raw(vec![!raw_order(var, lo - 1)]);
        self.defs.add_raw(vec![raw_order(var, hi)]);
        for val in lo..=hi {
            self.defs.add_raw(vec![
                !raw_order(var, val - 1),
                raw_order(var, val),
            ]);
        }
    }

    /// Mints a declared boolean variable
    pub(super) fn new_bool_var(&mut self) -> FzLit {
        let lit = Atom::new(LitKind::Bool, self.fresh_id(), 0).pos();
        if self.config.trivial_bool_clauses {
            self.defs.add_raw(vec![lit, !lit]);
        }
        lit
    }

    /// Mints a set variable, which adds no clauses
    pub(super) fn new_set_var(&mut self, ground: Rc<[i64]>) -> SetVal {
        SetVal::Var {
            id: self.fresh_id(),
            ground,
        }
    }

    /// Mints a helper integer covering `lo..=hi`
    pub(super) fn new_helper_int(&mut self, lo: i64, hi: i64) -> IntVar {
        if lo == hi {
            return IntVar::constant(lo);
        }
        let var = self.new_int_range(lo, hi);
        self.stats.n_helpers += 1;
        trace!(id = var.id(), lo, hi, "helper integer");
        var
    }

    /// Mints a helper boolean
    pub(super) fn new_helper_bool(&mut self) -> FzLit {
        let lit = Atom::new(LitKind::Helper, self.next_helper, 0).pos();
        self.next_helper += 1;
        self.stats.n_helpers += 1;
        trace!(id = lit.atom().id, "helper boolean");
        lit
    }

    /// `x = val` as a single literal
    ///
    /// For order-encoded variables this is a direct literal, tied to the
    /// order literals by three clauses the first time it is used.
    pub(super) fn direct(&mut self, var: &IntVar, val: i64) -> Bound {
        if !var.contains(val) {
            return Bound::Const(false);
        }
        if var.fixed().is_some() {
            return Bound::Const(true);
        }
        match var.repr {
            IntRepr::View(lit) => {
                if val == 1 {
                    Bound::Lit(lit)
                } else {
                    Bound::Lit(!lit)
                }
            }
            IntRepr::Order { id, .. } => {
                let direct = Atom::new(LitKind::Direct, id, val).pos();
                if self.directs.insert((id, val)) {
                    let gadget = direct_gadget(Bound::Lit(direct), var.le(val), var.ge(val));
                    self.define(gadget);
                }
                Bound::Lit(direct)
            }
            IntRepr::Const => unreachable!("constant that is not fixed"),
        }
    }
}

/// `direct <-> le & ge`
fn direct_gadget(direct: Bound, le: Bound, ge: Bound) -> Body {
    let mut clauses = ClauseSet::new();
    clauses.add([!direct, le])?;
    clauses.add([!direct, ge])?;
    clauses.add([direct, !le, !ge])?;
    Ok(clauses)
}

/// The raw order literal of an order-encoded variable
fn raw_order(var: &IntVar, val: i64) -> FzLit {
    crate::utils::unreachable_none!(var.order_lit(val))
}
