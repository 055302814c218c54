//! # Integer Constraints
//!
//! Comparisons are single primitive comparisons. Arithmetic on two operands
//! is encoded as a table over the direct literals of the operands, bounding
//! the result from both sides for every pair of values.

use crate::instances::ClauseSink;

use super::{
    clauses::{conjoin, Body, ClauseSet, Infeasible},
    compare::{compare_minus, sum_le},
    domain::IntVar,
    Encoder,
};

/// `x = y`
pub fn int_eq(x: &IntVar, y: &IntVar) -> Body {
    conjoin(compare_minus(x, y, 0), compare_minus(y, x, 0))
}

/// `x <= y`
pub fn int_le(x: &IntVar, y: &IntVar) -> Body {
    compare_minus(x, y, 0)
}

/// `x < y`
pub fn int_lt(x: &IntVar, y: &IntVar) -> Body {
    compare_minus(x, y, -1)
}

/// `x != y`
pub fn int_ne(x: &IntVar, y: &IntVar) -> Body {
    let mut clauses = ClauseSet::new();
    for val in x.values().filter(|val| y.contains(*val)) {
        clauses.add(x.ne(val).into_iter().chain(y.ne(val)))?;
    }
    Ok(clauses)
}

/// `x + y = z`
pub fn int_plus(x: &IntVar, y: &IntVar, z: &IntVar) -> Body {
    conjoin(
        sum_le(&[(1, x), (1, y), (-1, z)], 0),
        sum_le(&[(-1, x), (-1, y), (1, z)], 0),
    )
}

/// `|x| = z`
pub fn int_abs(x: &IntVar, z: &IntVar) -> Body {
    let mut clauses = ClauseSet::new();
    for val in x.values() {
        let abs = val.abs();
        let [below, above] = x.ne(val);
        clauses.add([below, above, z.le(abs)])?;
        clauses.add([below, above, z.ge(abs)])?;
    }
    Ok(clauses)
}

/// Integer power where negative exponents are only defined for bases `1` and
/// `-1`
fn checked_pow(base: i64, exp: i64) -> Option<i64> {
    if exp < 0 {
        return match base {
            1 => Some(1),
            -1 => Some(if exp % 2 == 0 { 1 } else { -1 }),
            _ => None,
        };
    }
    base.checked_pow(u32::try_from(exp).ok()?)
}

/// The arithmetic operations encoded as tables
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arith {
    /// `x * y`
    Times,
    /// `x / y`, truncating towards zero
    Div,
    /// `x mod y`, with the sign of `x`
    Mod,
    /// `x ^ y`
    Pow,
}

impl Arith {
    /// Applies the operation, `None` if it is undefined or overflows
    #[must_use]
    pub fn apply(self, x: i64, y: i64) -> Option<i64> {
        match self {
            Arith::Times => x.checked_mul(y),
            Arith::Div => x.checked_div(y),
            Arith::Mod => x.checked_rem(y),
            Arith::Pow => checked_pow(x, y),
        }
    }
}

impl<S: ClauseSink> Encoder<S> {
    /// `op(x, y) = z`, pairs of values for which `op` is undefined are
    /// forbidden
    pub(super) fn int_arith(&mut self, op: Arith, x: &IntVar, y: &IntVar, z: &IntVar) -> Body {
        let mut clauses = ClauseSet::new();
        let ys: Vec<i64> = y.values().collect();
        for a in x.values() {
            let is_a = self.direct(x, a);
            for &b in &ys {
                let is_b = self.direct(y, b);
                match op.apply(a, b) {
                    Some(val) => {
                        clauses.add([!is_a, !is_b, z.le(val)])?;
                        clauses.add([!is_a, !is_b, z.ge(val)])?;
                    }
                    None => clauses.add([!is_a, !is_b])?,
                }
            }
        }
        Ok(clauses)
    }
}

/// `m = max(xs)`
pub fn array_int_maximum(m: &IntVar, xs: &[IntVar]) -> Body {
    let Some(max_lo) = xs.iter().map(IntVar::lo).max() else {
        return Err(Infeasible);
    };
    let mut clauses = ClauseSet::new();
    for x in xs {
        clauses.extend(compare_minus(x, m, 0)?);
    }
    // all of xs at most i means m at most i
    for i in (m.lo() - 1).max(max_lo)..m.hi() {
        clauses.add(xs.iter().map(|x| x.ge(i + 1)).chain([m.le(i)]))?;
    }
    Ok(clauses)
}

/// `m = min(xs)`
pub fn array_int_minimum(m: &IntVar, xs: &[IntVar]) -> Body {
    let Some(min_hi) = xs.iter().map(IntVar::hi).min() else {
        return Err(Infeasible);
    };
    let mut clauses = ClauseSet::new();
    for x in xs {
        clauses.extend(compare_minus(m, x, 0)?);
    }
    // all of xs at least i means m at least i
    for i in (m.lo() + 1)..=(m.hi() + 1).min(min_hi) {
        clauses.add(xs.iter().map(|x| x.le(i - 1)).chain([m.ge(i)]))?;
    }
    Ok(clauses)
}
