//! # Solver Interface
//!
//! The formula is always solved by an external SAT solver executable that
//! reads DIMACS CNF and reports in the SAT competition or the minisat output
//! format.

pub mod external;

pub use external::Solver as ExternalSolver;
