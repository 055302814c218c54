//! # Linear Constraints
//!
//! Sums with more than two terms are folded left to right into helper
//! integers, each defined by a binary substitution `s = c1·x1 + c2·x2`. The
//! relation itself is then a primitive comparison over the last two terms.

use crate::{instances::ClauseSink, utils::scaled_bounds};

use super::{
    clauses::{conjoin, Body, ClauseSet, Infeasible},
    compare::{compare_minus, compare_plus, sum_le},
    domain::IntVar,
    Encoder,
};

/// The relation of a linear constraint to its right hand side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rel {
    /// `=`
    Eq,
    /// `<=`
    Le,
    /// `!=`
    Ne,
}

impl<S: ClauseSink> Encoder<S> {
    /// Clauses for `Σ coef·var rel rhs`
    pub(super) fn linear(&mut self, rel: Rel, terms: &[(i64, IntVar)], rhs: i64) -> Body {
        let mut rhs = rhs;
        let mut vars: Vec<(i64, IntVar)> = Vec::with_capacity(terms.len());
        for (coef, var) in terms {
            if *coef == 0 {
                continue;
            }
            match var.fixed() {
                Some(val) => rhs -= coef * val,
                None => vars.push((*coef, var.clone())),
            }
        }
        match vars.len() {
            0 => {
                let holds = match rel {
                    Rel::Eq => rhs == 0,
                    Rel::Le => rhs >= 0,
                    Rel::Ne => rhs != 0,
                };
                if holds {
                    Ok(ClauseSet::new())
                } else {
                    Err(Infeasible)
                }
            }
            1 => single_term(rel, vars[0].0, &vars[0].1, rhs),
            _ => match rel {
                Rel::Ne => {
                    let sum = self.fold(&vars);
                    let mut clauses = ClauseSet::new();
                    clauses.add(sum.ne(rhs))?;
                    Ok(clauses)
                }
                Rel::Le | Rel::Eq => {
                    let (last, init) = crate::utils::unreachable_none!(vars.split_last());
                    let partial = if init.len() == 1 {
                        init[0].clone()
                    } else {
                        (1, self.fold(init))
                    };
                    let upper = pair_le((partial.0, &partial.1), (last.0, &last.1), rhs);
                    if rel == Rel::Le {
                        return upper;
                    }
                    let lower = pair_le((-partial.0, &partial.1), (-last.0, &last.1), -rhs);
                    conjoin(upper, lower)
                }
            },
        }
    }

    /// Folds at least two terms into a helper equal to their sum
    fn fold(&mut self, terms: &[(i64, IntVar)]) -> IntVar {
        debug_assert!(terms.len() >= 2);
        let mut sum = self.substitute((terms[0].0, &terms[0].1), (terms[1].0, &terms[1].1));
        for (coef, var) in &terms[2..] {
            sum = self.substitute((1, &sum), (*coef, var));
        }
        sum
    }

    /// Mints a helper `s` with `s = c1·x1 + c2·x2`
    pub(super) fn substitute(&mut self, first: (i64, &IntVar), second: (i64, &IntVar)) -> IntVar {
        let (lo1, hi1) = scaled_bounds(first.0, first.1.lo(), first.1.hi());
        let (lo2, hi2) = scaled_bounds(second.0, second.1.lo(), second.1.hi());
        let sum = self.new_helper_int(lo1 + lo2, hi1 + hi2);
        let upper = sum_le(&[first, second, (-1, &sum)], 0);
        let lower = sum_le(&[(-first.0, first.1), (-second.0, second.1), (1, &sum)], 0);
        self.define(conjoin(upper, lower));
        sum
    }

    /// Adds a helper definition to the definitions of the current item
    pub(super) fn define(&mut self, body: Body) {
        match body {
            Ok(clauses) => self.defs.extend(clauses),
            // a contradictory definition makes the whole formula unsat
            Err(Infeasible) => self.defs.add_raw(Vec::new()),
        }
    }
}

/// `c1·x1 + c2·x2 <= rhs`, unit coefficients go through the binary kernels
fn pair_le(first: (i64, &IntVar), second: (i64, &IntVar), rhs: i64) -> Body {
    match (first.0, second.0) {
        (1, 1) => compare_plus(first.1, second.1, rhs),
        (1, -1) => compare_minus(first.1, second.1, rhs),
        (-1, 1) => compare_minus(second.1, first.1, rhs),
        _ => sum_le(&[first, second], rhs),
    }
}

/// `coef·var rel rhs` by division
fn single_term(rel: Rel, coef: i64, var: &IntVar, rhs: i64) -> Body {
    let mut clauses = ClauseSet::new();
    match rel {
        Rel::Le => return sum_le(&[(coef, var)], rhs),
        Rel::Eq => {
            if rhs % coef != 0 {
                return Err(Infeasible);
            }
            let val = rhs / coef;
            clauses.add([var.le(val)])?;
            clauses.add([var.ge(val)])?;
        }
        Rel::Ne => {
            if rhs % coef == 0 {
                clauses.add(var.ne(rhs / coef))?;
            }
        }
    }
    Ok(clauses)
}
