//! # fzncnf - Compiling FlatZinc Models to CNF
//!
//! `fzncnf` translates a FlatZinc constraint model into a single CNF formula
//! for an off-the-shelf SAT solver and maps the solver's model back into
//! concrete variable assignments.
//!
//! Integer variables are represented with the _order encoding_ (one boolean
//! per domain threshold `x <= i`), set variables with one membership boolean
//! per ground element. Constraints are compiled by the [`encoder`] module,
//! clauses end up in a [`instances::ClauseSink`], solving happens through
//! [`solvers::external`] and [`decode`] prints the result.
//!
//! ## Features
//!
//! | Feature name | Description |
//! | --- | --- |
//! | `fxhash` | Use the faster firefox hash function from `rustc-hash` in `fzncnf`. |
//! | `compression` | Enable reading compressed FlatZinc and writing compressed CNF files. |
//! | `serde` | Derive `serde` traits for decoded solutions. |
//!
//! ## Example
//!
//! ```
//! use fzncnf::{encoder::{self, EncoderConfig}, fzn, instances::Cnf};
//!
//! let items = fzn::parse("var 1..3: x; var 1..3: y; constraint int_lt(x, y); solve satisfy;")
//!     .unwrap();
//! let comp = encoder::compile(&items, EncoderConfig::default(), Cnf::new()).unwrap();
//! assert!(!comp.is_unsat());
//! assert!(!comp.sink().is_empty());
//! ```

#![warn(missing_docs)]

pub mod decode;
pub mod encoder;
pub mod fzn;
pub mod instances;
pub mod solvers;
pub mod types;

mod utils;
