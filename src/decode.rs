//! # Decoding Solver Models
//!
//! Maps a solver assignment back through the literal index of a
//! [`Compilation`] and prints it in the FlatZinc output convention.

use std::fmt;

use itertools::Itertools;

use crate::{
    encoder::{Bound, Compilation, Entity, LitKind, Output, Symbol},
    instances::fio::SolverOutput,
    types::{Assignment, RsHashMap, TernaryVal},
};

/// The value of a decoded variable
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// An integer
    Int(i64),
    /// A boolean
    Bool(bool),
    /// A set, sorted
    Set(Vec<i64>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(val) => write!(f, "{val}"),
            Value::Bool(val) => write!(f, "{val}"),
            Value::Set(elems) => write!(f, "{{{}}}", elems.iter().format(",")),
        }
    }
}

/// A line of the printed solution
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Printed {
    Scalar(Value),
    Array {
        dims: Vec<(i64, i64)>,
        elems: Vec<Value>,
    },
}

/// The values of all declared names under one model
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    values: RsHashMap<String, Value>,
    printed: Vec<(String, Printed)>,
}

impl Solution {
    /// Gets the value of a scalar
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Gets the value of an integer
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(Value::Int(val)) => Some(*val),
            _ => None,
        }
    }

    /// Gets the value of a boolean
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(Value::Bool(val)) => Some(*val),
            _ => None,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, printed) in &self.printed {
            match printed {
                Printed::Scalar(val) => writeln!(f, "{name} = {val};")?,
                Printed::Array { dims, elems } => {
                    let ranges = dims.iter().map(|(lo, hi)| format!("{lo}..{hi}"));
                    writeln!(
                        f,
                        "{name} = array{}d({}, [{}]);",
                        dims.len(),
                        ranges.format(", "),
                        elems.iter().format(", ")
                    )?;
                }
            }
        }
        writeln!(f, "----------")
    }
}

/// The overall result for a model
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A solution was found
    Satisfied(Solution),
    /// The model has no solution
    Unsatisfiable,
    /// The solver gave up
    Unknown,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Satisfied(sol) => write!(f, "{sol}"),
            Outcome::Unsatisfiable => writeln!(f, "=====UNSATISFIABLE====="),
            Outcome::Unknown => writeln!(f, "=====UNKNOWN====="),
        }
    }
}

/// Decodes solver models of one compilation
pub struct Decoder<'comp, S> {
    comp: &'comp Compilation<S>,
}

impl<'comp, S> Decoder<'comp, S> {
    /// Creates a decoder
    #[must_use]
    pub fn new(comp: &'comp Compilation<S>) -> Self {
        Decoder { comp }
    }

    /// Interprets the output of a solver
    ///
    /// A compilation that is already known to be unsat is reported as such
    /// whatever the output.
    #[must_use]
    pub fn decode(&self, output: &SolverOutput) -> Outcome {
        if self.comp.is_unsat() {
            return Outcome::Unsatisfiable;
        }
        match output {
            SolverOutput::Sat(assignment) => Outcome::Satisfied(self.solution(assignment)),
            SolverOutput::Unsat => Outcome::Unsatisfiable,
            SolverOutput::Unknown => Outcome::Unknown,
        }
    }

    /// Decodes all declared names
    #[must_use]
    pub fn solution(&self, assignment: &Assignment) -> Solution {
        let bounds = self.order_bounds(assignment);
        let mut values = RsHashMap::default();
        for (name, symbol) in self.comp.symbols() {
            if let Symbol::Scalar(entity) = symbol {
                values.insert(name.to_string(), self.value(entity, &bounds, assignment));
            }
        }
        let mut printed = Vec::with_capacity(self.comp.outputs().len());
        for output in self.comp.outputs() {
            match output {
                Output::Var(name) => {
                    if let Some(val) = values.get(name) {
                        printed.push((name.clone(), Printed::Scalar(val.clone())));
                    }
                }
                Output::Array { name, dims } => {
                    if let Some(Symbol::Array(elems)) = self.comp.symbol(name) {
                        let elems = elems
                            .iter()
                            .map(|entity| self.value(entity, &bounds, assignment))
                            .collect();
                        printed.push((
                            name.clone(),
                            Printed::Array {
                                dims: dims.clone(),
                                elems,
                            },
                        ));
                    }
                }
            }
        }
        Solution { values, printed }
    }

    /// Bounds of every order-encoded variable implied by its order literals
    fn order_bounds(&self, assignment: &Assignment) -> RsHashMap<u32, (i64, i64)> {
        let mut bounds: RsHashMap<u32, (i64, i64)> = RsHashMap::default();
        for lit in assignment.iter() {
            let Some(atom) = self.comp.index().atom(lit.var()) else {
                continue;
            };
            if atom.kind != LitKind::Order {
                continue;
            }
            let (lo, hi) = bounds.entry(atom.id).or_insert((i64::MIN, i64::MAX));
            if lit.is_pos() {
                *hi = (*hi).min(atom.value);
            } else {
                *lo = (*lo).max(atom.value + 1);
            }
        }
        bounds
    }

    fn value(
        &self,
        entity: &Entity,
        bounds: &RsHashMap<u32, (i64, i64)>,
        assignment: &Assignment,
    ) -> Value {
        let holds = |bound: Bound| match bound {
            Bound::Const(val) => val,
            Bound::Lit(lit) => self
                .comp
                .index()
                .get_lit(lit)
                .is_some_and(|lit| assignment.lit_value(lit) == TernaryVal::True),
        };
        match entity {
            Entity::Bool(bound) => Value::Bool(holds(*bound)),
            Entity::Int(var) => {
                if let Some(lit) = var.viewed() {
                    return Value::Int(i64::from(holds(Bound::Lit(lit))));
                }
                let lo = var
                    .id()
                    .and_then(|id| bounds.get(&id))
                    .map_or(var.lo(), |(lo, _)| (*lo).max(var.lo()));
                Value::Int(lo.min(var.hi()))
            }
            Entity::Set(set) => Value::Set(
                set.elems()
                    .iter()
                    .copied()
                    .filter(|&elem| holds(set.member(elem)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        encoder::{compile, EncoderConfig},
        fzn,
        instances::{fio::SolverOutput, Cnf},
        types::Assignment,
    };

    use super::{Decoder, Outcome, Value};

    #[test]
    fn value_display() {
        assert_eq!(Value::Set(vec![1, 3]).to_string(), "{1,3}");
        assert_eq!(Value::Set(vec![]).to_string(), "{}");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Outcome::Unknown.to_string(), "=====UNKNOWN=====\n");
    }

    #[test]
    fn unsat_compilation_ignores_model() {
        let comp = compile(
            &fzn::parse("var 1..3: x;\nconstraint int_le(x, 0);").unwrap(),
            EncoderConfig::default(),
            Cnf::new(),
        )
        .unwrap();
        let decoder = Decoder::new(&comp);
        let output = SolverOutput::Sat(Assignment::default());
        assert_eq!(decoder.decode(&output), Outcome::Unsatisfiable);
    }

    #[test]
    fn decode_and_print() {
        let src = "var 1..3: x :: output_var;\nvar bool: b :: output_var;\n\
                   var set of 1..3: s :: output_var;\n\
                   array [1..2] of var int: a :: output_array([1..2]) = [x, 7];\n";
        let mut comp = compile(&fzn::parse(src).unwrap(), EncoderConfig::default(), Cnf::new())
            .unwrap();
        let mut lits = comp.fix_int("x", 2).unwrap().unwrap();
        lits.extend(comp.fix_bool("b", false).unwrap().unwrap());
        lits.extend(comp.fix_set("s", &[1, 3]).unwrap().unwrap());
        let assignment: Assignment = lits.into_iter().collect();
        let outcome = Decoder::new(&comp).decode(&SolverOutput::Sat(assignment));
        let Outcome::Satisfied(sol) = &outcome else {
            panic!("expected a solution, got {outcome:?}");
        };
        assert_eq!(sol.int("x"), Some(2));
        assert_eq!(sol.bool("b"), Some(false));
        assert_eq!(
            outcome.to_string(),
            "x = 2;\nb = false;\ns = {1,3};\na = array1d(1..2, [2, 7]);\n----------\n"
        );
    }
}
