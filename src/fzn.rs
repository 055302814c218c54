//! # FlatZinc Models
//!
//! The typed item list the [`crate::encoder`] consumes, and a parser producing
//! it from FlatZinc text.
//!
//! ```
//! use fzncnf::fzn::{self, Item};
//!
//! let items = fzn::parse("var 1..3: x :: output_var;\nsolve satisfy;\n").unwrap();
//! assert!(matches!(items[0], Item::Variable { .. }));
//! ```

use std::{fmt, io::Read, path::Path};

use thiserror::Error;

use crate::instances::fio;

mod parser;

/// A set literal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetLit {
    /// The integers `l..u`, empty if `u < l`
    Range(i64, i64),
    /// Explicitly listed elements, sorted and without duplicates
    Elems(Vec<i64>),
}

impl SetLit {
    /// The elements of the set in increasing order
    #[must_use]
    pub fn elems(&self) -> Vec<i64> {
        match self {
            SetLit::Range(lo, hi) => (*lo..=*hi).collect(),
            SetLit::Elems(elems) => elems.clone(),
        }
    }
}

/// An expression as it appears in arguments, assignments and annotations
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Set literal
    Set(SetLit),
    /// Reference to a declared name
    Ident(String),
    /// Element access `name[index]` with a one-based index
    Access(String, i64),
    /// Array literal
    Array(Vec<Expr>),
    /// String literal
    Str(String),
    /// Call, only occurring inside annotations
    Call(String, Vec<Expr>),
}

/// An annotation `:: name(args)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation name
    pub name: String,
    /// Arguments, empty if the annotation has none
    pub args: Vec<Expr>,
}

/// Type of a parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParType {
    /// `bool`
    Bool,
    /// `int` or a constrained integer type
    Int,
    /// `set of int`
    SetOfInt,
}

/// Type and domain of a decision variable
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VarType {
    /// `var bool`
    Bool,
    /// `var int` without bounds
    Int,
    /// `var l..u`
    IntRange(i64, i64),
    /// `var {a, b, ...}`, sorted
    IntSet(Vec<i64>),
    /// `var set of int` without a ground set
    SetOfInt,
    /// `var set of l..u` or `var set of {...}`, ground set sorted
    SetOf(Vec<i64>),
}

/// The goal of a solve item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveGoal {
    /// Find any solution
    Satisfy,
    /// Minimise an expression
    Minimize(Expr),
    /// Maximise an expression
    Maximize(Expr),
}

/// A top-level FlatZinc item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    /// A predicate declaration
    Predicate(String),
    /// A parameter, scalar or array
    Parameter {
        /// Declared name
        name: String,
        /// Element type
        ty: ParType,
        /// Index set `1..n` if an array
        array: Option<(i64, i64)>,
        /// Assigned value
        value: Expr,
    },
    /// A scalar decision variable
    Variable {
        /// Declared name
        name: String,
        /// Type and domain
        ty: VarType,
        /// Annotations
        annotations: Vec<Annotation>,
        /// Optional assigned value
        value: Option<Expr>,
    },
    /// An array of decision variables
    Array {
        /// Declared name
        name: String,
        /// Index set `1..n`
        index: (i64, i64),
        /// Element type
        ty: VarType,
        /// Annotations
        annotations: Vec<Annotation>,
        /// Element list
        value: Expr,
    },
    /// A constraint item
    Constraint {
        /// Predicate name
        name: String,
        /// Arguments
        args: Vec<Expr>,
        /// Annotations
        annotations: Vec<Annotation>,
    },
    /// The solve item
    Solve {
        /// What to solve for
        goal: SolveGoal,
        /// Search annotations
        annotations: Vec<Annotation>,
    },
}

impl Item {
    /// Gets the annotations of the item
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Item::Predicate(_) | Item::Parameter { .. } => &[],
            Item::Variable { annotations, .. }
            | Item::Array { annotations, .. }
            | Item::Constraint { annotations, .. }
            | Item::Solve { annotations, .. } => annotations,
        }
    }
}

/// Malformed FlatZinc text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    /// One-based line of the error
    pub line: usize,
    /// One-based column of the error
    pub column: usize,
    /// What went wrong
    pub message: String,
}

impl ParseError {
    fn at(src: &str, rest: &str, message: impl fmt::Display) -> Self {
        let offset = src.len() - rest.len();
        let before = &src[..offset];
        let line = before.matches('\n').count() + 1;
        let column = offset - before.rfind('\n').map_or(0, |pos| pos + 1) + 1;
        ParseError {
            line,
            column,
            message: message.to_string(),
        }
    }
}

/// Parses a FlatZinc model
///
/// # Errors
///
/// If the text is not valid FlatZinc.
pub fn parse(src: &str) -> Result<Vec<Item>, ParseError> {
    parser::items(src)
}

/// Parses a FlatZinc model from a file. With feature `compression`, files
/// ending in `.gz`, `.bz2` or `.xz` are decompressed.
///
/// # Errors
///
/// If the file cannot be read or is not valid FlatZinc.
pub fn parse_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Item>> {
    let mut reader = fio::open_compressed_uncompressed_read(path)?;
    let mut src = String::new();
    reader.read_to_string(&mut src)?;
    Ok(parse(&src)?)
}
