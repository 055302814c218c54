//! # Primitive Comparisons
//!
//! The clause generator for `Σ c_t·x_t <= c` over order literals, from which
//! all integer encodings are built. For every combination of values `a_t` of
//! all but the last term, one clause states that either some term is below
//! the case `c_t·x_t >= c_t·a_t` or the last term is small enough.

use crate::utils::{div_ceil, div_floor};

use super::{
    clauses::{Body, Bound, ClauseSet},
    domain::IntVar,
};

/// Clauses for `Σ coef·var <= rhs`
///
/// # Errors
///
/// [`Infeasible`](super::Infeasible) if the static bounds already violate
/// the inequality.
pub fn sum_le(terms: &[(i64, &IntVar)], rhs: i64) -> Body {
    let mut rhs = rhs;
    let mut vars: Vec<(i64, &IntVar)> = Vec::with_capacity(terms.len());
    for &(coef, var) in terms {
        if coef == 0 {
            continue;
        }
        match var.fixed() {
            Some(val) => rhs -= coef * val,
            None => vars.push((coef, var)),
        }
    }
    let mut clauses = ClauseSet::new();
    if vars.is_empty() {
        if rhs < 0 {
            clauses.add(std::iter::empty())?;
        }
        return Ok(clauses);
    }
    // cheapest enumeration first, the largest domain is handled by division
    vars.sort_by_key(|(_, var)| var.size());
    let mut prefix = Vec::with_capacity(vars.len());
    enumerate(&vars, &mut prefix, rhs, &mut clauses)?;
    Ok(clauses)
}

fn enumerate(
    terms: &[(i64, &IntVar)],
    prefix: &mut Vec<Bound>,
    rest: i64,
    clauses: &mut ClauseSet,
) -> Result<(), super::Infeasible> {
    let ((coef, var), others) = crate::utils::unreachable_none!(terms.split_first());
    if others.is_empty() {
        let last = if *coef > 0 {
            var.le(div_floor(rest, *coef))
        } else {
            var.ge(div_ceil(rest, *coef))
        };
        if last.is_true() {
            return Ok(());
        }
        return clauses.add(prefix.iter().copied().chain(std::iter::once(last)));
    }
    for val in var.values() {
        let guard = if *coef > 0 {
            var.le(val - 1)
        } else {
            var.ge(val + 1)
        };
        if guard.is_true() {
            continue;
        }
        prefix.push(guard);
        let res = enumerate(others, prefix, rest - coef * val, clauses);
        prefix.pop();
        res?;
    }
    Ok(())
}

/// Clauses for `a - b <= c`
pub fn compare_minus(a: &IntVar, b: &IntVar, c: i64) -> Body {
    sum_le(&[(1, a), (-1, b)], c)
}

/// Clauses for `a + b <= c`
pub fn compare_plus(a: &IntVar, b: &IntVar, c: i64) -> Body {
    sum_le(&[(1, a), (1, b)], c)
}

#[cfg(test)]
mod tests {
    use crate::encoder::{clauses::Infeasible, domain::IntVar};

    use super::{compare_minus, compare_plus, sum_le};

    #[test]
    fn constants_only() {
        let two = IntVar::constant(2);
        assert!(compare_plus(&two, &two, 4).unwrap().is_empty());
        assert_eq!(compare_plus(&two, &two, 3), Err(Infeasible));
    }

    #[test]
    fn statically_violated() {
        let x = IntVar::view(crate::encoder::Bound::Lit(
            crate::encoder::Atom::new(crate::encoder::LitKind::Bool, 0, 0).pos(),
        ));
        // x - 5 <= -6 needs x <= -1
        assert_eq!(compare_minus(&x, &IntVar::constant(5), -6), Err(Infeasible));
        // x <= 0 is a single unit
        assert_eq!(sum_le(&[(1, &x)], 0).unwrap().len(), 1);
        // 3x <= 5 is trivially true
        assert!(sum_le(&[(3, &x)], 5).unwrap().is_empty());
    }
}
