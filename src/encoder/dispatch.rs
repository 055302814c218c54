//! # Constraint Dispatch
//!
//! Maps predicate names to encodings. A `_reif` suffix makes the constraint
//! equivalent to its last argument, an `_imp` suffix makes it implied by it.
//! The gate predicates (`bool_and(a, b, r)` etc.) are reified by default.

use crate::{fzn::Expr, instances::ClauseSink};

use super::{
    boolean,
    clauses::{Body, Bound},
    domain::{Entity, IntVar, SetVal},
    int::{self, Arith},
    linear::Rel,
    set::{self, SetOp},
    transform::impify,
    Encoder, Error, Symbol,
};

/// How a constraint relates to its control literal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Plain,
    Reif,
    Imp,
}

/// Predicates with `_reif` and `_imp` forms
const REIFIABLE: &[&str] = &[
    "int_eq",
    "int_le",
    "int_lt",
    "int_ne",
    "int_lin_eq",
    "int_lin_le",
    "int_lin_ne",
    "bool_eq",
    "bool_le",
    "bool_lt",
    "bool_ne",
    "bool_xor",
    "bool_and",
    "bool_or",
    "bool_clause",
    "array_bool_and",
    "array_bool_or",
    "set_eq",
    "set_ne",
    "set_le",
    "set_lt",
    "set_subset",
    "set_superset",
    "set_in",
];

/// Gate predicates and the number of their inputs
const GATES: &[(&str, usize)] = &[
    ("bool_and", 2),
    ("bool_or", 2),
    ("bool_xor", 2),
    ("array_bool_and", 1),
    ("array_bool_or", 1),
];

fn split_mode(name: &str) -> (&str, Mode) {
    if let Some(base) = name.strip_suffix("_reif") {
        (base, Mode::Reif)
    } else if let Some(base) = name.strip_suffix("_imp") {
        (base, Mode::Imp)
    } else {
        (name, Mode::Plain)
    }
}

/// Typed access to the resolved arguments of a constraint
struct Args<'a> {
    predicate: &'a str,
    args: Vec<Symbol>,
    /// Number of trailing arguments consumed as control literal
    extra: usize,
}

macro_rules! scalar_accessor {
    ($name:ident, $variant:ident, $ty:ty, $expected:literal) => {
        fn $name(&self, pos: usize) -> Result<$ty, Error> {
            match self.args.get(pos) {
                Some(Symbol::Scalar(Entity::$variant(val))) => Ok(val.clone()),
                _ => Err(self.type_error(pos, $expected)),
            }
        }
    };
}

macro_rules! array_accessor {
    ($name:ident, $variant:ident, $ty:ty, $expected:literal) => {
        fn $name(&self, pos: usize) -> Result<Vec<$ty>, Error> {
            match self.args.get(pos) {
                Some(Symbol::Array(elems)) => elems
                    .iter()
                    .map(|elem| match elem {
                        Entity::$variant(val) => Ok(val.clone()),
                        _ => Err(self.type_error(pos, $expected)),
                    })
                    .collect(),
                _ => Err(self.type_error(pos, $expected)),
            }
        }
    };
}

impl Args<'_> {
    fn expect(&self, count: usize) -> Result<(), Error> {
        if self.args.len() == count {
            return Ok(());
        }
        Err(Error::ArgCount {
            predicate: self.predicate.to_string(),
            expected: count + self.extra,
            actual: self.args.len() + self.extra,
        })
    }

    fn type_error(&self, position: usize, expected: &'static str) -> Error {
        Error::ArgType {
            predicate: self.predicate.to_string(),
            position,
            expected,
        }
    }

    scalar_accessor!(int, Int, IntVar, "an integer");
    scalar_accessor!(bool, Bool, Bound, "a boolean");
    scalar_accessor!(set, Set, SetVal, "a set");
    array_accessor!(ints, Int, IntVar, "an array of integers");
    array_accessor!(bools, Bool, Bound, "an array of booleans");
    array_accessor!(sets, Set, SetVal, "an array of sets");

    fn par_int(&self, pos: usize) -> Result<i64, Error> {
        self.int(pos)?
            .fixed()
            .ok_or_else(|| self.type_error(pos, "an integer constant"))
    }

    fn par_ints(&self, pos: usize) -> Result<Vec<i64>, Error> {
        self.ints(pos)?
            .iter()
            .map(|var| {
                var.fixed()
                    .ok_or_else(|| self.type_error(pos, "an array of integer constants"))
            })
            .collect()
    }

    /// Coefficients at `pos` and terms at `pos + 1` of equal length
    fn weighted<T>(&self, pos: usize, terms: Vec<T>) -> Result<Vec<(i64, T)>, Error> {
        let coefs = self.par_ints(pos)?;
        if coefs.len() != terms.len() {
            return Err(self.type_error(pos + 1, "as long as the coefficients"));
        }
        Ok(coefs.into_iter().zip(terms).collect())
    }
}

impl<S: ClauseSink> Encoder<S> {
    /// Encodes a constraint item
    pub(super) fn post(&mut self, name: &str, args: &[Expr]) -> Result<(), Error> {
        let (base, mut mode) = split_mode(name);
        let mut args = Args {
            predicate: name,
            args: args
                .iter()
                .map(|arg| self.resolve(arg))
                .collect::<Result<_, _>>()?,
            extra: 0,
        };
        if mode == Mode::Plain {
            if let Some((_, inputs)) = GATES.iter().find(|(gate, _)| *gate == base) {
                if args.args.len() == inputs + 1 {
                    mode = Mode::Reif;
                }
            }
        } else if !REIFIABLE.contains(&base) {
            return Err(Error::UnknownPredicate(name.to_string()));
        }
        let ctrl = if mode == Mode::Plain {
            None
        } else {
            let pos = args.args.len().checked_sub(1).ok_or_else(|| Error::ArgCount {
                predicate: name.to_string(),
                expected: 1,
                actual: 0,
            })?;
            let ctrl = args.bool(pos)?;
            args.args.pop();
            args.extra = 1;
            Some(ctrl)
        };
        let body = self.encode(base, &args)?;
        let body = match (mode, ctrl) {
            (Mode::Reif, Some(ctrl)) => self.reify(body, ctrl),
            (Mode::Imp, Some(ctrl)) => impify(body, ctrl),
            _ => body,
        };
        self.commit(body)
    }

    /// The clauses of the plain constraint `base`
    fn encode(&mut self, base: &str, args: &Args<'_>) -> Result<Body, Error> {
        let body = match base {
            // integer comparisons
            "int_eq" | "int_le" | "int_lt" | "int_ne" => {
                args.expect(2)?;
                let (x, y) = (args.int(0)?, args.int(1)?);
                match base {
                    "int_eq" => int::int_eq(&x, &y),
                    "int_le" => int::int_le(&x, &y),
                    "int_lt" => int::int_lt(&x, &y),
                    _ => int::int_ne(&x, &y),
                }
            }
            // integer arithmetic
            "int_abs" => {
                args.expect(2)?;
                int::int_abs(&args.int(0)?, &args.int(1)?)
            }
            "int_plus" => {
                args.expect(3)?;
                int::int_plus(&args.int(0)?, &args.int(1)?, &args.int(2)?)
            }
            "int_times" | "int_div" | "int_mod" | "int_pow" => {
                args.expect(3)?;
                let op = match base {
                    "int_times" => Arith::Times,
                    "int_div" => Arith::Div,
                    "int_mod" => Arith::Mod,
                    _ => Arith::Pow,
                };
                self.int_arith(op, &args.int(0)?, &args.int(1)?, &args.int(2)?)
            }
            "int_max" | "int_min" => {
                args.expect(3)?;
                let xs = [args.int(0)?, args.int(1)?];
                let z = args.int(2)?;
                if base == "int_max" {
                    int::array_int_maximum(&z, &xs)
                } else {
                    int::array_int_minimum(&z, &xs)
                }
            }
            "array_int_maximum" => {
                args.expect(2)?;
                int::array_int_maximum(&args.int(0)?, &args.ints(1)?)
            }
            "array_int_minimum" => {
                args.expect(2)?;
                int::array_int_minimum(&args.int(0)?, &args.ints(1)?)
            }
            // linear
            "int_lin_eq" | "int_lin_le" | "int_lin_ne" => {
                args.expect(3)?;
                let rel = match base {
                    "int_lin_eq" => Rel::Eq,
                    "int_lin_le" => Rel::Le,
                    _ => Rel::Ne,
                };
                let terms = args.weighted(0, args.ints(1)?)?;
                self.linear(rel, &terms, args.par_int(2)?)
            }
            // element
            "array_int_element" | "array_var_int_element" => {
                args.expect(3)?;
                self.int_element(&args.int(0)?, &args.ints(1)?, &args.int(2)?)
            }
            "array_bool_element" | "array_var_bool_element" => {
                args.expect(3)?;
                self.bool_element(&args.int(0)?, &args.bools(1)?, args.bool(2)?)
            }
            "array_set_element" | "array_var_set_element" => {
                args.expect(3)?;
                self.set_element(&args.int(0)?, &args.sets(1)?, &args.set(2)?)
            }
            // booleans
            "bool2int" => {
                args.expect(2)?;
                boolean::bool2int(args.bool(0)?, &args.int(1)?)
            }
            "bool_eq" | "bool_le" | "bool_lt" | "bool_ne" | "bool_not" | "bool_xor" => {
                args.expect(2)?;
                let (a, b) = (args.bool(0)?, args.bool(1)?);
                match base {
                    "bool_eq" => boolean::bool_eq(a, b),
                    "bool_le" => boolean::bool_le(a, b),
                    "bool_lt" => boolean::bool_lt(a, b),
                    _ => boolean::bool_ne(a, b),
                }
            }
            "bool_and" => {
                args.expect(2)?;
                boolean::array_bool_and(&[args.bool(0)?, args.bool(1)?])
            }
            "bool_or" => {
                args.expect(2)?;
                boolean::array_bool_or(&[args.bool(0)?, args.bool(1)?])
            }
            "array_bool_and" => {
                args.expect(1)?;
                boolean::array_bool_and(&args.bools(0)?)
            }
            "array_bool_or" => {
                args.expect(1)?;
                boolean::array_bool_or(&args.bools(0)?)
            }
            "array_bool_xor" => {
                args.expect(1)?;
                self.array_bool_xor(&args.bools(0)?)
            }
            "bool_clause" => {
                args.expect(2)?;
                boolean::bool_clause(&args.bools(0)?, &args.bools(1)?)
            }
            "bool_lin_eq" | "bool_lin_le" => {
                args.expect(3)?;
                let (coefs, lits): (Vec<i64>, Vec<Bound>) =
                    args.weighted(0, args.bools(1)?)?.into_iter().unzip();
                if base == "bool_lin_eq" {
                    self.bool_lin(Rel::Eq, &coefs, &lits, &args.int(2)?)
                } else {
                    let rhs = IntVar::constant(args.par_int(2)?);
                    self.bool_lin(Rel::Le, &coefs, &lits, &rhs)
                }
            }
            // sets
            "set_eq" | "set_ne" | "set_le" | "set_lt" | "set_subset" | "set_superset" => {
                args.expect(2)?;
                let (x, y) = (args.set(0)?, args.set(1)?);
                match base {
                    "set_eq" => set::set_eq(&x, &y),
                    "set_ne" => self.set_ne(&x, &y),
                    "set_le" => self.set_lex(&x, &y, false),
                    "set_lt" => self.set_lex(&x, &y, true),
                    "set_subset" => set::set_subset(&x, &y),
                    _ => set::set_subset(&y, &x),
                }
            }
            "set_in" => {
                args.expect(2)?;
                set::set_in(&args.int(0)?, &args.set(1)?)
            }
            "set_card" => {
                args.expect(2)?;
                self.set_card(&args.set(0)?, &args.int(1)?)
            }
            "set_union" | "set_intersect" | "set_diff" | "set_symdiff" => {
                args.expect(3)?;
                let op = match base {
                    "set_union" => SetOp::Union,
                    "set_intersect" => SetOp::Intersect,
                    "set_diff" => SetOp::Diff,
                    _ => SetOp::SymDiff,
                };
                set::set_op(op, &args.set(0)?, &args.set(1)?, &args.set(2)?)
            }
            _ => return Err(Error::UnknownPredicate(args.predicate.to_string())),
        };
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        encoder::{compile, EncoderConfig, Error},
        fzn,
        instances::Cnf,
    };

    use super::{split_mode, Mode};

    fn compile_str(src: &str) -> Result<crate::encoder::Compilation, Error> {
        compile(&fzn::parse(src).unwrap(), EncoderConfig::default(), Cnf::new())
    }

    #[test]
    fn suffixes() {
        assert_eq!(split_mode("int_le_reif"), ("int_le", Mode::Reif));
        assert_eq!(split_mode("set_in_imp"), ("set_in", Mode::Imp));
        assert_eq!(split_mode("int_plus"), ("int_plus", Mode::Plain));
    }

    #[test]
    fn reification_of_non_reifiable() {
        assert!(matches!(
            compile_str("var 1..3: x;\nvar bool: b;\nconstraint int_abs_reif(x, x, b);"),
            Err(Error::UnknownPredicate(name)) if name == "int_abs_reif"
        ));
    }

    #[test]
    fn argument_errors() {
        assert!(matches!(
            compile_str("var 1..3: x;\nconstraint int_le_reif(x, 2);"),
            Err(Error::ArgType { position: 1, .. })
        ));
        assert!(matches!(
            compile_str("var 1..3: x;\nvar bool: b;\nconstraint int_le_reif(x, b);"),
            Err(Error::ArgCount {
                expected: 3,
                actual: 2,
                ..
            })
        ));
        assert!(matches!(
            compile_str("var 1..3: x;\nconstraint int_lin_le([1, 2], [x], 3);"),
            Err(Error::ArgType { position: 1, .. })
        ));
        assert!(matches!(
            compile_str("var 1..3: x;\nconstraint int_lin_le([1], [x], x);"),
            Err(Error::ArgType { position: 2, .. })
        ));
        assert!(matches!(
            compile_str("var 1..3: x;\nvar bool: b;\nconstraint bool_eq(x, b);"),
            Err(Error::ArgType { position: 0, .. })
        ));
    }

    #[test]
    fn reified_infeasibility_forces_control() {
        let comp = compile_str(
            "var 1..3: x;\nvar bool: b;\nconstraint int_le_reif(x, 0, b);",
        )
        .unwrap();
        assert!(!comp.is_unsat());
        let comp = compile_str("var 1..3: x;\nconstraint int_le_reif(x, 0, true);").unwrap();
        assert!(comp.is_unsat());
    }

    #[test]
    fn gates_take_control_last() {
        let comp = compile_str(
            "var bool: a;\nvar bool: b;\nvar bool: r;\nconstraint bool_and(a, b, r);",
        )
        .unwrap();
        // three tautologies and the and gate
        assert_eq!(comp.sink().len(), 6);
        let comp = compile_str("var bool: a;\nvar bool: b;\nconstraint bool_xor(a, b);").unwrap();
        assert_eq!(comp.sink().len(), 4);
    }
}
