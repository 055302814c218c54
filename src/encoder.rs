//! # FlatZinc to CNF Encoder
//!
//! The encoder walks a list of [`Item`]s once, in order. Parameters and
//! variables are indexed by name and their domains encoded, every constraint
//! item is dispatched by predicate name to an encoding routine. Clauses are
//! handed to a [`ClauseSink`] after each item.
//!
//! ## Representation
//!
//! - Integer variables use the _order encoding_: one proposition `x <= i` per
//!   threshold `i`, chained so that `x <= i` implies `x <= i+1`. Sparse
//!   domains additionally forbid the gaps between their elements.
//! - _Direct_ propositions `x = i` are introduced on demand and tied to the
//!   order encoding by three clauses.
//! - Set variables have one free membership proposition per element of their
//!   ground set.
//! - Helpers, i.e., anonymous integer and boolean variables, are minted for
//!   linear sums, Tseitin gates and reification. They are defined
//!   functionally by clauses that are emitted unconditionally, so that the
//!   body of a constraint can safely be reified.
//!
//! ## Infeasibility
//!
//! A constraint whose clauses are contradicted by the static domains alone
//! puts the encoder into its terminal unsat state. From then on every further
//! constraint is skipped and [`Compilation::is_unsat`] reports the result.
//! Reified and half-reified constraints instead force their control literal.

use std::{
    io::{self, Write},
    rc::Rc,
    time::Duration,
};

use cpu_time::ProcessTime;
use thiserror::Error;
use tracing::{debug, debug_span, warn};

use crate::{
    fzn::{Expr, Item, SetLit, SolveGoal, VarType},
    instances::{fio, ClauseSink, Cnf, DimacsSink},
    types::{Clause, Lit, RsHashMap, RsHashSet},
};

mod array;
mod boolean;
mod clauses;
mod compare;
mod dispatch;
mod domain;
mod int;
mod linear;
mod literal;
mod set;
mod transform;

pub use clauses::{Body, Bound, ClauseSet, Infeasible};
pub use domain::{Entity, IntVar, SetVal};
pub use literal::{Atom, FzLit, LitIndex, LitKind};

/// Configuration of the encoder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// The domain of `var int` declarations without bounds
    pub unbounded_int: (i64, i64),
    /// Whether to emit the tautology `b | ~b` for every declared boolean
    pub trivial_bool_clauses: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            unbounded_int: (-128, 128),
            trivial_bool_clauses: true,
        }
    }
}

impl EncoderConfig {
    /// Sets the domain used for unbounded integer variables
    #[must_use]
    pub fn with_unbounded_int(mut self, lo: i64, hi: i64) -> Self {
        self.unbounded_int = (lo, hi);
        self
    }

    /// Sets whether tautological clauses are emitted for declared booleans
    #[must_use]
    pub fn with_trivial_bool_clauses(mut self, emit: bool) -> Self {
        self.trivial_bool_clauses = emit;
        self
    }
}

/// Errors from a malformed model
#[derive(Error, Debug)]
pub enum Error {
    /// A name is used but never declared
    #[error("undeclared identifier `{0}`")]
    Undeclared(String),
    /// A name is declared twice
    #[error("`{0}` is declared more than once")]
    Duplicate(String),
    /// A constraint uses a predicate without encoding
    #[error("unknown predicate `{0}`")]
    UnknownPredicate(String),
    /// A constraint has the wrong number of arguments
    #[error("`{predicate}` expects {expected} arguments but got {actual}")]
    ArgCount {
        /// The predicate
        predicate: String,
        /// The number of arguments it takes
        expected: usize,
        /// The number of arguments given
        actual: usize,
    },
    /// A constraint argument has the wrong type
    #[error("argument {position} of `{predicate}` is not {expected}")]
    ArgType {
        /// The predicate
        predicate: String,
        /// Zero-based position of the argument
        position: usize,
        /// What the argument should be
        expected: &'static str,
    },
    /// An assignment does not match the declared type
    #[error("the value of `{0}` is not {1}")]
    TypeMismatch(String, &'static str),
    /// An array access is out of bounds
    #[error("index {index} is out of bounds for `{array}`")]
    IndexOutOfBounds {
        /// The array accessed
        array: String,
        /// The one-based index
        index: i64,
    },
    /// An expression that does not denote a value
    #[error("`{0}` cannot be used as a value")]
    InvalidExpr(String),
    /// A declaration the encoder cannot represent
    #[error("unsupported declaration of `{name}`: {reason}")]
    Unsupported {
        /// The declared name
        name: String,
        /// Why it is not supported
        reason: &'static str,
    },
    /// Writing to the clause sink failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What a name refers to
#[derive(Clone, Debug)]
pub enum Symbol {
    /// A single value or variable
    Scalar(Entity),
    /// An array of values or variables
    Array(Rc<[Entity]>),
}

/// An item of the model's output specification
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// A variable annotated with `output_var`
    Var(String),
    /// An array annotated with `output_array`
    Array {
        /// Name of the array
        name: String,
        /// Index ranges of the dimensions
        dims: Vec<(i64, i64)>,
    },
}

/// Statistics of an encoding pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncoderStats {
    /// The number of clauses written
    pub n_clauses: usize,
    /// The number of DIMACS variables used
    pub n_vars: u32,
    /// The number of constraint items encoded
    pub n_constraints: usize,
    /// The number of helper variables minted
    pub n_helpers: usize,
    /// The CPU time spent encoding
    pub cpu_time: Duration,
}

/// Trait for encodings that track statistics.
pub trait EncodeStats {
    /// Gets the number of clauses in the encoding
    fn n_clauses(&self) -> usize;

    /// Gets the number of variables in the encoding
    fn n_vars(&self) -> u32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Active,
    Unsat,
}

/// Encodes FlatZinc items into a clause sink
pub struct Encoder<S: ClauseSink = Cnf> {
    config: EncoderConfig,
    sink: S,
    index: LitIndex,
    symbols: RsHashMap<String, Symbol>,
    outputs: Vec<Output>,
    /// Definitions of helpers minted for the current item
    defs: ClauseSet,
    /// Integer variables whose direct literal for a value has been defined
    directs: RsHashSet<(u32, i64)>,
    next_id: u32,
    next_helper: u32,
    state: State,
    stats: EncoderStats,
    start: ProcessTime,
}

/// Compiles a list of items
///
/// # Errors
///
/// If the model is malformed or the sink fails.
pub fn compile<S: ClauseSink>(
    items: &[Item],
    config: EncoderConfig,
    sink: S,
) -> Result<Compilation<S>, Error> {
    let mut encoder = Encoder::new(config, sink);
    for item in items {
        encoder.encode_item(item)?;
    }
    Ok(encoder.finish())
}

impl<S: ClauseSink> Encoder<S> {
    /// Creates an encoder writing to `sink`
    pub fn new(config: EncoderConfig, sink: S) -> Self {
        Encoder {
            config,
            sink,
            index: LitIndex::default(),
            symbols: RsHashMap::default(),
            outputs: Vec::new(),
            defs: ClauseSet::new(),
            directs: RsHashSet::default(),
            next_id: 0,
            next_helper: 0,
            state: State::Active,
            stats: EncoderStats::default(),
            start: ProcessTime::now(),
        }
    }

    /// Checks whether the encoder reached the unsat state
    pub fn is_unsat(&self) -> bool {
        self.state == State::Unsat
    }

    /// Encodes a single item
    ///
    /// # Errors
    ///
    /// If the item is malformed or the sink fails.
    pub fn encode_item(&mut self, item: &Item) -> Result<(), Error> {
        match item {
            Item::Predicate(_) => Ok(()),
            Item::Parameter { name, value, .. } => {
                let symbol = self.resolve(value)?;
                self.declare(name, symbol)
            }
            Item::Variable {
                name,
                ty,
                annotations,
                value,
            } => {
                let entity = self.declare_var(name, ty)?;
                self.declare(name, Symbol::Scalar(entity.clone()))?;
                if annotations.iter().any(|ann| ann.name == "output_var") {
                    self.outputs.push(Output::Var(name.clone()));
                }
                let body = match value {
                    Some(expr) => {
                        let value = self.resolve(expr)?;
                        self.equate(name, &entity, value)?
                    }
                    None => Ok(ClauseSet::new()),
                };
                self.commit(body)
            }
            Item::Array {
                name,
                annotations,
                value,
                ..
            } => {
                let symbol = self.resolve(value)?;
                if !matches!(symbol, Symbol::Array(_)) {
                    return Err(Error::TypeMismatch(name.clone(), "an array"));
                }
                self.declare(name, symbol)?;
                for ann in annotations {
                    match (ann.name.as_str(), ann.args.first()) {
                        ("output_array", Some(Expr::Array(ranges))) => {
                            let dims = ranges
                                .iter()
                                .map(|range| match range {
                                    Expr::Set(SetLit::Range(lo, hi)) => Ok((*lo, *hi)),
                                    _ => Err(Error::InvalidExpr(format!("{range:?}"))),
                                })
                                .collect::<Result<_, _>>()?;
                            self.outputs.push(Output::Array {
                                name: name.clone(),
                                dims,
                            });
                        }
                        ("output_array", _) => {
                            warn!(array = name.as_str(), "malformed output_array annotation");
                        }
                        _ => (),
                    }
                }
                Ok(())
            }
            Item::Constraint { name, args, .. } => {
                if self.state == State::Unsat {
                    return Ok(());
                }
                let span = debug_span!("constraint", predicate = name.as_str());
                let _enter = span.enter();
                self.stats.n_constraints += 1;
                self.post(name, args)
            }
            Item::Solve { goal, .. } => {
                if !matches!(goal, SolveGoal::Satisfy) {
                    warn!("optimisation objective ignored, solving for satisfaction only");
                }
                Ok(())
            }
        }
    }

    /// Finishes the pass
    pub fn finish(mut self) -> Compilation<S> {
        self.stats.n_vars = self.index.n_vars();
        self.stats.n_clauses = self.sink.n_clauses();
        self.stats.cpu_time = self.start.elapsed();
        debug!(
            unsat = self.state == State::Unsat,
            clauses = self.stats.n_clauses,
            vars = self.stats.n_vars,
            constraints = self.stats.n_constraints,
            helpers = self.stats.n_helpers,
            "encoding finished"
        );
        Compilation {
            sink: self.sink,
            index: self.index,
            symbols: self.symbols,
            outputs: self.outputs,
            unsat: self.state == State::Unsat,
            stats: self.stats,
        }
    }

    fn declare(&mut self, name: &str, symbol: Symbol) -> Result<(), Error> {
        if self.symbols.contains_key(name) {
            return Err(Error::Duplicate(name.to_string()));
        }
        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    fn declare_var(&mut self, name: &str, ty: &VarType) -> Result<Entity, Error> {
        let entity = match ty {
            VarType::Bool => Entity::Bool(Bound::Lit(self.new_bool_var())),
            VarType::Int => {
                let (lo, hi) = self.config.unbounded_int;
                debug!(var = name, lo, hi, "unbounded integer variable");
                if hi < lo {
                    self.mark_unsat();
                    Entity::Int(IntVar::constant(lo))
                } else {
                    Entity::Int(self.new_int_range(lo, hi))
                }
            }
            VarType::IntRange(lo, hi) => {
                if hi < lo {
                    self.mark_unsat();
                    Entity::Int(IntVar::constant(*lo))
                } else {
                    Entity::Int(self.new_int_range(*lo, *hi))
                }
            }
            VarType::IntSet(elems) => {
                if elems.is_empty() {
                    self.mark_unsat();
                    Entity::Int(IntVar::constant(0))
                } else {
                    Entity::Int(self.new_int_set(elems.as_slice().into()))
                }
            }
            VarType::SetOf(ground) => Entity::Set(self.new_set_var(ground.as_slice().into())),
            VarType::SetOfInt => {
                return Err(Error::Unsupported {
                    name: name.to_string(),
                    reason: "set variables need a finite ground set",
                })
            }
        };
        Ok(entity)
    }

    fn equate(&mut self, name: &str, var: &Entity, value: Symbol) -> Result<Body, Error> {
        let body = match (var, value) {
            (Entity::Int(x), Symbol::Scalar(Entity::Int(y))) => int::int_eq(x, &y),
            (Entity::Bool(a), Symbol::Scalar(Entity::Bool(b))) => boolean::bool_eq(*a, b),
            (Entity::Set(x), Symbol::Scalar(Entity::Set(y))) => set::set_eq(x, &y),
            (Entity::Int(_), _) => return Err(Error::TypeMismatch(name.to_string(), "an integer")),
            (Entity::Bool(_), _) => return Err(Error::TypeMismatch(name.to_string(), "a boolean")),
            (Entity::Set(_), _) => return Err(Error::TypeMismatch(name.to_string(), "a set")),
        };
        Ok(body)
    }

    /// Evaluates an expression against the symbol table
    fn resolve(&self, expr: &Expr) -> Result<Symbol, Error> {
        let symbol = match expr {
            Expr::Bool(val) => Symbol::Scalar(Entity::Bool(Bound::Const(*val))),
            Expr::Int(val) => Symbol::Scalar(Entity::Int(IntVar::constant(*val))),
            Expr::Set(set) => Symbol::Scalar(Entity::Set(SetVal::Const(set.elems().into()))),
            Expr::Ident(name) => self
                .symbols
                .get(name)
                .cloned()
                .ok_or_else(|| Error::Undeclared(name.clone()))?,
            Expr::Access(name, idx) => match self.symbols.get(name) {
                Some(Symbol::Array(elems)) => idx
                    .checked_sub(1)
                    .and_then(|idx| usize::try_from(idx).ok())
                    .and_then(|idx| elems.get(idx))
                    .map(|entity| Symbol::Scalar(entity.clone()))
                    .ok_or_else(|| Error::IndexOutOfBounds {
                        array: name.clone(),
                        index: *idx,
                    })?,
                Some(Symbol::Scalar(_)) => {
                    return Err(Error::TypeMismatch(name.clone(), "an array"))
                }
                None => return Err(Error::Undeclared(name.clone())),
            },
            Expr::Array(elems) => Symbol::Array(
                elems
                    .iter()
                    .map(|elem| match self.resolve(elem)? {
                        Symbol::Scalar(entity) => Ok(entity),
                        Symbol::Array(_) => Err(Error::InvalidExpr(format!("{elem:?}"))),
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Expr::Str(_) | Expr::Call(..) => return Err(Error::InvalidExpr(format!("{expr:?}"))),
        };
        Ok(symbol)
    }

    fn mark_unsat(&mut self) {
        if self.state == State::Active {
            debug!("statically infeasible, the model is unsat");
        }
        self.state = State::Unsat;
    }

    /// Hands the definitions and the body of the current item to the sink
    fn commit(&mut self, body: Body) -> Result<(), Error> {
        let defs = std::mem::take(&mut self.defs);
        if self.state == State::Unsat {
            return Ok(());
        }
        let Ok(body) = body else {
            self.mark_unsat();
            return Ok(());
        };
        for clause in defs.into_iter().chain(body) {
            let clause: Clause = clause.into_iter().map(|lit| self.index.lit(lit)).collect();
            self.sink.add_clause(clause)?;
        }
        Ok(())
    }
}

/// The result of compiling a model
#[derive(Debug)]
pub struct Compilation<S = Cnf> {
    sink: S,
    index: LitIndex,
    symbols: RsHashMap<String, Symbol>,
    outputs: Vec<Output>,
    unsat: bool,
    stats: EncoderStats,
}

impl<S> Compilation<S> {
    /// Checks whether the model was found statically infeasible
    #[must_use]
    pub fn is_unsat(&self) -> bool {
        self.unsat
    }

    /// Gets the clause sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the compilation, returning the clause sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Gets the literal index
    #[must_use]
    pub fn index(&self) -> &LitIndex {
        &self.index
    }

    /// Looks up a declared name
    #[must_use]
    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Iterates over all declared names
    pub fn symbols(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }

    /// Gets the output specification
    #[must_use]
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Gets the statistics of the encoding pass
    #[must_use]
    pub fn stats(&self) -> EncoderStats {
        self.stats
    }

    /// Gets the literals pinning an integer variable to a value, usable as
    /// assumptions. Returns `None` if the value is outside the domain.
    ///
    /// # Errors
    ///
    /// If `name` is not an integer variable.
    pub fn fix_int(&mut self, name: &str, val: i64) -> Result<Option<Vec<Lit>>, Error> {
        let var = match self.symbols.get(name) {
            Some(Symbol::Scalar(Entity::Int(var))) => var.clone(),
            Some(_) => return Err(Error::TypeMismatch(name.to_string(), "an integer")),
            None => return Err(Error::Undeclared(name.to_string())),
        };
        if !var.contains(val) {
            return Ok(None);
        }
        Ok(self.fix_bounds([var.le(val), var.ge(val)]))
    }

    /// Gets the literal pinning a boolean variable to a value
    ///
    /// # Errors
    ///
    /// If `name` is not a boolean variable.
    pub fn fix_bool(&mut self, name: &str, val: bool) -> Result<Option<Vec<Lit>>, Error> {
        match self.symbols.get(name) {
            Some(Symbol::Scalar(Entity::Bool(bound))) => {
                let bound = if val { *bound } else { !*bound };
                Ok(self.fix_bounds([bound]))
            }
            Some(_) => Err(Error::TypeMismatch(name.to_string(), "a boolean")),
            None => Err(Error::Undeclared(name.to_string())),
        }
    }

    /// Gets the literals pinning a set variable to a value
    ///
    /// # Errors
    ///
    /// If `name` is not a set variable.
    pub fn fix_set(&mut self, name: &str, elems: &[i64]) -> Result<Option<Vec<Lit>>, Error> {
        let set = match self.symbols.get(name) {
            Some(Symbol::Scalar(Entity::Set(set))) => set.clone(),
            Some(_) => return Err(Error::TypeMismatch(name.to_string(), "a set")),
            None => return Err(Error::Undeclared(name.to_string())),
        };
        if elems.iter().any(|elem| set.member(*elem).is_false()) {
            return Ok(None);
        }
        let bounds: Vec<Bound> = set
            .elems()
            .iter()
            .map(|elem| {
                let member = set.member(*elem);
                if elems.contains(elem) {
                    member
                } else {
                    !member
                }
            })
            .collect();
        Ok(self.fix_bounds(bounds))
    }

    fn fix_bounds<I: IntoIterator<Item = Bound>>(&mut self, bounds: I) -> Option<Vec<Lit>> {
        let mut lits = Vec::new();
        for bound in bounds {
            match bound {
                Bound::Const(true) => (),
                Bound::Const(false) => return None,
                Bound::Lit(lit) => lits.push(self.index.lit(lit)),
            }
        }
        Some(lits)
    }
}

impl<S> EncodeStats for Compilation<S> {
    fn n_clauses(&self) -> usize {
        self.stats.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.index.n_vars()
    }
}

impl Compilation<Cnf> {
    /// Writes the formula in DIMACS CNF format
    ///
    /// # Errors
    ///
    /// If writing fails.
    pub fn write_dimacs<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        fio::dimacs::write_cnf_annotated(writer, &self.sink, self.index.n_vars())
    }
}

impl Compilation<DimacsSink> {
    /// Writes the formula in DIMACS CNF format
    ///
    /// # Errors
    ///
    /// If writing fails.
    pub fn write_dimacs<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        let n_vars = self.index.n_vars();
        self.sink.write_dimacs(writer, n_vars)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        fzn,
        instances::{Cnf, DimacsSink},
    };

    use super::{compile, EncodeStats, EncoderConfig, Error};

    fn compile_str(src: &str) -> Result<super::Compilation, Error> {
        compile(&fzn::parse(src).unwrap(), EncoderConfig::default(), Cnf::new())
    }

    #[test]
    fn order_chain_of_range() {
        let comp = compile_str("var 1..3: x;").unwrap();
        // two boundary units and a chain clause per value
        assert_eq!(comp.sink().len(), 5);
        assert_eq!(comp.n_vars(), 4);
    }

    #[test]
    fn trivial_bool_clause() {
        let items = fzn::parse("var bool: b;").unwrap();
        let comp = compile(&items, EncoderConfig::default(), Cnf::new()).unwrap();
        assert_eq!(comp.sink().len(), 1);
        let config = EncoderConfig::default().with_trivial_bool_clauses(false);
        let comp = compile(&items, config, Cnf::new()).unwrap();
        assert!(comp.sink().is_empty());
    }

    #[test]
    fn malformed_models() {
        assert!(matches!(
            compile_str("constraint int_le(x, 1);"),
            Err(Error::Undeclared(name)) if name == "x"
        ));
        assert!(matches!(
            compile_str("var 1..3: x;\nconstraint int_frobnicate(x, 1);"),
            Err(Error::UnknownPredicate(_))
        ));
        assert!(matches!(
            compile_str("var 1..3: x;\nconstraint int_le(x);"),
            Err(Error::ArgCount {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert!(matches!(
            compile_str("var 1..3: x;\nvar bool: x;"),
            Err(Error::Duplicate(_))
        ));
        assert!(matches!(
            compile_str("var set of int: s;"),
            Err(Error::Unsupported { .. })
        ));
        assert!(matches!(
            compile_str("array [1..1] of int: a = [1];\nvar 1..3: x;\nconstraint int_le(x, a[2]);"),
            Err(Error::IndexOutOfBounds { index: 2, .. })
        ));
        assert!(matches!(
            compile_str(
                "array [1..1] of int: a = [1];\nvar 1..3: x;\n\
                 constraint int_le(x, a[-9223372036854775808]);"
            ),
            Err(Error::IndexOutOfBounds { index: i64::MIN, .. })
        ));
    }

    #[test]
    fn empty_domain_is_unsat() {
        let comp = compile_str("var 5..3: x;\nvar 1..2: y;").unwrap();
        assert!(comp.is_unsat());
        assert!(comp.sink().is_empty());
    }

    #[test]
    fn inverted_unbounded_domain_is_unsat() {
        let items = fzn::parse("var int: x;").unwrap();
        let config = EncoderConfig::default().with_unbounded_int(5, -5);
        let comp = compile(&items, config, Cnf::new()).unwrap();
        assert!(comp.is_unsat());
        let config = EncoderConfig::default().with_unbounded_int(-2, 2);
        let comp = compile(&items, config, Cnf::new()).unwrap();
        assert!(!comp.is_unsat());
        // order literals for `x <= -3` up to `x <= 2`
        assert_eq!(comp.n_vars(), 6);
    }

    #[test]
    fn stats_and_dimacs_sink() {
        let items = fzn::parse(
            "var 1..3: x;\nvar 1..3: y;\nconstraint int_lt(x, y);\nsolve satisfy;",
        )
        .unwrap();
        let in_memory = compile(&items, EncoderConfig::default(), Cnf::new()).unwrap();
        let mut streamed =
            compile(&items, EncoderConfig::default(), DimacsSink::new().unwrap()).unwrap();
        assert_eq!(in_memory.stats().n_constraints, 1);
        assert_eq!(in_memory.n_clauses(), streamed.n_clauses());
        let mut expected = Vec::new();
        in_memory.write_dimacs(&mut expected).unwrap();
        let mut actual = Vec::new();
        streamed.write_dimacs(&mut actual).unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn fix_literals() {
        let mut comp = compile_str("var 1..3: x;\nvar bool: b;\nvar set of 1..2: s;").unwrap();
        assert_eq!(comp.fix_int("x", 2).unwrap().map(|lits| lits.len()), Some(2));
        assert_eq!(comp.fix_int("x", 1).unwrap().map(|lits| lits.len()), Some(1));
        assert_eq!(comp.fix_int("x", 7).unwrap(), None);
        assert_eq!(comp.fix_bool("b", true).unwrap().map(|lits| lits.len()), Some(1));
        assert_eq!(comp.fix_set("s", &[2]).unwrap().map(|lits| lits.len()), Some(2));
        assert_eq!(comp.fix_set("s", &[5]).unwrap(), None);
        assert!(comp.fix_int("b", 1).is_err());
    }
}
