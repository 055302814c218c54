//! # Literal Model
//!
//! Literals of the model level. An [`Atom`] names a proposition by family,
//! owner id and value; [`LitIndex`] numbers atoms with DIMACS variables on
//! first sight.

use std::{fmt, ops};

use crate::types::{Lit, RsHashMap, Var};

/// The family of a proposition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LitKind {
    /// `x <= value` for an integer variable `x`
    Order,
    /// `x = value` for an integer variable `x`
    Direct,
    /// A declared boolean variable, `value` is always 0
    Bool,
    /// An anonymous boolean introduced by the encoder
    Helper,
    /// `value ∈ s` for a set variable `s`
    SetElem,
}

/// Identity of a proposition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom {
    /// Family
    pub kind: LitKind,
    /// Id of the owning variable
    pub id: u32,
    /// Threshold, value or element
    pub value: i64,
}

impl Atom {
    /// Creates an atom
    #[must_use]
    pub fn new(kind: LitKind, id: u32, value: i64) -> Self {
        Atom { kind, id, value }
    }

    /// The positive literal of the atom
    #[must_use]
    pub fn pos(self) -> FzLit {
        FzLit {
            atom: self,
            negated: false,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LitKind::Order => write!(f, "v{}<={}", self.id, self.value),
            LitKind::Direct => write!(f, "v{}={}", self.id, self.value),
            LitKind::Bool => write!(f, "b{}", self.id),
            LitKind::Helper => write!(f, "h{}", self.id),
            LitKind::SetElem => write!(f, "{}∈s{}", self.value, self.id),
        }
    }
}

/// A possibly negated model-level literal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FzLit {
    atom: Atom,
    negated: bool,
}

impl FzLit {
    /// Gets the atom of the literal
    #[must_use]
    pub fn atom(self) -> Atom {
        self.atom
    }

    /// True if the literal is negated
    #[must_use]
    pub fn is_neg(self) -> bool {
        self.negated
    }
}

impl ops::Not for FzLit {
    type Output = FzLit;

    fn not(self) -> FzLit {
        FzLit {
            atom: self.atom,
            negated: !self.negated,
        }
    }
}

impl fmt::Display for FzLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "~")?;
        }
        write!(f, "{}", self.atom)
    }
}

/// Bijection between atoms and DIMACS variables
///
/// Variables are handed out in the order atoms are first seen and stay fixed
/// for the lifetime of the index.
#[derive(Debug, Default, Clone)]
pub struct LitIndex {
    vars: RsHashMap<Atom, Var>,
    atoms: Vec<Atom>,
}

impl LitIndex {
    /// Gets the variable of an atom, numbering the atom if it is new
    pub fn var(&mut self, atom: Atom) -> Var {
        if let Some(&var) = self.vars.get(&atom) {
            return var;
        }
        let idx = u32::try_from(self.atoms.len()).expect("more than u32::MAX atoms");
        let var = Var::new(idx);
        self.vars.insert(atom, var);
        self.atoms.push(atom);
        var
    }

    /// Gets the solver literal for a model literal, numbering its atom if needed
    pub fn lit(&mut self, lit: FzLit) -> Lit {
        let var = self.var(lit.atom);
        if lit.negated {
            var.neg_lit()
        } else {
            var.pos_lit()
        }
    }

    /// Looks up the variable of an atom without numbering it
    #[must_use]
    pub fn get(&self, atom: Atom) -> Option<Var> {
        self.vars.get(&atom).copied()
    }

    /// Looks up the solver literal of a model literal without numbering it
    #[must_use]
    pub fn get_lit(&self, lit: FzLit) -> Option<Lit> {
        self.get(lit.atom)
            .map(|var| if lit.negated { var.neg_lit() } else { var.pos_lit() })
    }

    /// Gets the atom a variable stands for
    #[must_use]
    pub fn atom(&self, var: Var) -> Option<Atom> {
        self.atoms.get(var.idx()).copied()
    }

    /// The number of variables handed out
    #[must_use]
    pub fn n_vars(&self) -> u32 {
        u32::try_from(self.atoms.len()).expect("more than u32::MAX atoms")
    }
}

#[cfg(test)]
mod tests {
    use crate::var;

    use super::{Atom, LitIndex, LitKind};

    #[test]
    fn first_come_numbering() {
        let mut index = LitIndex::default();
        let a = Atom::new(LitKind::Order, 3, 5);
        let b = Atom::new(LitKind::Direct, 3, 5);
        assert_eq!(index.var(b), var![0]);
        assert_eq!(index.var(a), var![1]);
        assert_eq!(index.var(b), var![0]);
        assert_eq!(index.n_vars(), 2);
        assert_eq!(index.atom(var![1]), Some(a));
    }

    #[test]
    fn polarity_maps_to_sign() {
        let mut index = LitIndex::default();
        let atom = Atom::new(LitKind::Bool, 0, 0);
        let pos = index.lit(atom.pos());
        let neg = index.lit(!atom.pos());
        assert_eq!(pos, !neg);
        assert_eq!(neg.to_dimacs(), -1);
        assert_eq!(index.get_lit(!atom.pos()), Some(neg));
    }
}
