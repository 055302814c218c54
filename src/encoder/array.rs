//! # Element Constraints
//!
//! `array[idx] = z` is encoded as one guarded equality per admissible index
//! value. The guard is the direct literal `idx = i`.

use crate::instances::ClauseSink;

use super::{
    boolean::bool_eq,
    clauses::{Body, Bound, ClauseSet},
    domain::{IntVar, SetVal},
    int::int_eq,
    set::set_eq,
    transform::guarded,
    Encoder,
};

impl<S: ClauseSink> Encoder<S> {
    /// Restricts `idx` to `1..=len` and requires `entry(i)` whenever
    /// `idx = i + 1`
    fn element<F>(&mut self, idx: &IntVar, len: usize, entry: F) -> Body
    where
        F: Fn(usize) -> Body,
    {
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let mut clauses = ClauseSet::new();
        clauses.add([idx.ge(1)])?;
        clauses.add([idx.le(len)])?;
        let values: Vec<i64> = idx.values().filter(|i| (1..=len).contains(i)).collect();
        for i in values {
            let is_i = self.direct(idx, i);
            // i is in 1..=len, so the conversion cannot fail
            let pos = usize::try_from(i - 1).unwrap_or_default();
            clauses.extend(guarded(&[!is_i], entry(pos))?);
        }
        Ok(clauses)
    }

    /// `array[idx] = z` over integers
    pub(super) fn int_element(&mut self, idx: &IntVar, array: &[IntVar], z: &IntVar) -> Body {
        self.element(idx, array.len(), |i| int_eq(&array[i], z))
    }

    /// `array[idx] = z` over booleans
    pub(super) fn bool_element(&mut self, idx: &IntVar, array: &[Bound], z: Bound) -> Body {
        self.element(idx, array.len(), |i| bool_eq(array[i], z))
    }

    /// `array[idx] = z` over sets
    pub(super) fn set_element(&mut self, idx: &IntVar, array: &[SetVal], z: &SetVal) -> Body {
        self.element(idx, array.len(), |i| set_eq(&array[i], z))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        encoder::{
            clauses::{Bound, Infeasible},
            domain::IntVar,
            Encoder, EncoderConfig,
        },
        instances::Cnf,
    };

    #[test]
    fn constant_index() {
        let mut enc = Encoder::new(EncoderConfig::default(), Cnf::new());
        let array = [IntVar::constant(4), IntVar::constant(7)];
        let z = enc.new_int_range(0, 9);
        // idx = 2 forces z = 7
        assert_eq!(
            enc.int_element(&IntVar::constant(2), &array, &z).unwrap().len(),
            2
        );
        assert_eq!(
            enc.int_element(&IntVar::constant(3), &array, &z),
            Err(Infeasible)
        );
        assert_eq!(
            enc.bool_element(&IntVar::constant(1), &[Bound::Const(false)], Bound::Const(true)),
            Err(Infeasible)
        );
    }

    #[test]
    fn variable_index_guards() {
        let mut enc = Encoder::new(EncoderConfig::default(), Cnf::new());
        let idx = enc.new_int_range(0, 3);
        let array = [Bound::Const(true), Bound::Const(false), Bound::Const(true)];
        let clauses = enc.bool_element(&idx, &array, Bound::Const(true)).unwrap();
        // idx >= 1, and idx = 2 is excluded
        assert_eq!(clauses.len(), 2);
        assert!(enc.directs.contains(&(idx.id().unwrap(), 2)));
    }
}
