//! # CNF Formula Representations
//!
//! Destinations for the clauses produced by the [`crate::encoder`]. Every
//! destination implements [`ClauseSink`]: [`Cnf`] keeps the formula in memory,
//! [`DimacsSink`] streams it to disk and writes the DIMACS header once the
//! final variable and clause counts are known.

use std::io;

use crate::types::Clause;

pub mod fio;

mod sat;
pub use sat::Cnf;

mod sink;
pub use sink::DimacsSink;

/// A destination for clauses
///
/// Clauses are append-only: once added they are never revisited.
pub trait ClauseSink {
    /// Appends a clause
    ///
    /// # Errors
    ///
    /// If the sink writes to disk, the IO error encountered while doing so.
    fn add_clause(&mut self, clause: Clause) -> io::Result<()>;

    /// Gets the number of clauses added so far
    fn n_clauses(&self) -> usize;
}

impl<S: ClauseSink + ?Sized> ClauseSink for &mut S {
    fn add_clause(&mut self, clause: Clause) -> io::Result<()> {
        (**self).add_clause(clause)
    }

    fn n_clauses(&self) -> usize {
        (**self).n_clauses()
    }
}
