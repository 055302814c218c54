//! # Reification and Gates
//!
//! Turns constraint bodies into (half-)reified clause sets and defines
//! helper booleans as Tseitin gates. Gate definitions go to the definition
//! buffer of the current item, so they hold regardless of the control
//! literal.

use crate::instances::ClauseSink;

use super::{
    clauses::{Body, Bound, ClauseSet},
    literal::FzLit,
    Encoder,
};

/// Clauses for `guard_1 | ... | guard_n | body`, i.e., the body is only
/// required if all guards are false
pub fn guarded(guard: &[Bound], body: Body) -> Body {
    let mut clauses = ClauseSet::new();
    match body {
        Err(_) => clauses.add(guard.iter().copied())?,
        Ok(body) => {
            for clause in body {
                clauses.add(
                    guard
                        .iter()
                        .copied()
                        .chain(clause.into_iter().map(Bound::Lit)),
                )?;
            }
        }
    }
    Ok(clauses)
}

/// Clauses for `ctrl -> body`
pub fn impify(body: Body, ctrl: Bound) -> Body {
    guarded(&[!ctrl], body)
}

impl<S: ClauseSink> Encoder<S> {
    /// Clauses for `ctrl <-> body`
    ///
    /// Every clause of the body with more than one literal gets a helper
    /// that is equivalent to it; the converse direction is a single clause
    /// over these witnesses.
    pub(super) fn reify(&mut self, body: Body, ctrl: Bound) -> Body {
        if ctrl.is_true() {
            return body;
        }
        let mut clauses = ClauseSet::new();
        let body = match body {
            Err(_) => {
                clauses.add([!ctrl])?;
                return Ok(clauses);
            }
            Ok(body) => body,
        };
        if body.is_empty() {
            clauses.add([ctrl])?;
            return Ok(clauses);
        }
        let mut witnesses = Vec::with_capacity(body.len());
        for clause in body {
            clauses.add(std::iter::once(!ctrl).chain(clause.iter().map(|&lit| Bound::Lit(lit))))?;
            let witness = if clause.len() == 1 {
                Bound::Lit(clause[0])
            } else {
                let inputs: Vec<Bound> = clause.into_iter().map(Bound::Lit).collect();
                self.or_gate(&inputs)
            };
            witnesses.push(!witness);
        }
        clauses.add(std::iter::once(ctrl).chain(witnesses))?;
        Ok(clauses)
    }

    /// A literal equivalent to the conjunction of `inputs`
    pub(super) fn and_gate(&mut self, inputs: &[Bound]) -> Bound {
        let mut lits: Vec<FzLit> = Vec::with_capacity(inputs.len());
        for input in inputs {
            match input {
                Bound::Const(false) => return Bound::Const(false),
                Bound::Const(true) => (),
                Bound::Lit(lit) => {
                    if lits.contains(&!*lit) {
                        return Bound::Const(false);
                    }
                    if !lits.contains(lit) {
                        lits.push(*lit);
                    }
                }
            }
        }
        match lits.len() {
            0 => Bound::Const(true),
            1 => Bound::Lit(lits[0]),
            _ => {
                let gate = self.new_helper_bool();
                let mut back = Vec::with_capacity(lits.len() + 1);
                back.push(gate);
                for lit in lits {
                    self.defs.add_raw(vec![!gate, lit]);
                    back.push(!lit);
                }
                self.defs.add_raw(back);
                Bound::Lit(gate)
            }
        }
    }

    /// A literal equivalent to the disjunction of `inputs`
    pub(super) fn or_gate(&mut self, inputs: &[Bound]) -> Bound {
        let negated: Vec<Bound> = inputs.iter().map(|&input| !input).collect();
        !self.and_gate(&negated)
    }

    /// A literal equivalent to `a xor b`
    pub(super) fn xor_gate(&mut self, a: Bound, b: Bound) -> Bound {
        match (a, b) {
            (Bound::Const(a), other) | (other, Bound::Const(a)) => {
                if a {
                    !other
                } else {
                    other
                }
            }
            (Bound::Lit(a), Bound::Lit(b)) => {
                if a == b {
                    return Bound::Const(false);
                }
                if a == !b {
                    return Bound::Const(true);
                }
                let gate = self.new_helper_bool();
                self.defs.add_raw(vec![!gate, a, b]);
                self.defs.add_raw(vec![!gate, !a, !b]);
                self.defs.add_raw(vec![gate, !a, b]);
                self.defs.add_raw(vec![gate, a, !b]);
                Bound::Lit(gate)
            }
        }
    }

    /// A literal equivalent to `a <-> b`
    pub(super) fn eq_gate(&mut self, a: Bound, b: Bound) -> Bound {
        !self.xor_gate(a, b)
    }
}
