//! # DIMACS CNF Writing
//!
//! Clauses are written one per line as space separated signed integers
//! terminated by `0`. The header `p cnf <n_vars> <n_clauses>` precedes them.

use std::io::{self, Write};

use crate::{instances::Cnf, types::Clause};

/// Writes the comment and problem lines of a DIMACS CNF file
///
/// # Errors
///
/// If writing fails.
pub fn write_header<W: Write + ?Sized>(
    writer: &mut W,
    n_vars: u32,
    n_clauses: usize,
) -> Result<(), io::Error> {
    writeln!(writer, "c CNF file written by fzncnf")?;
    writeln!(writer, "p cnf {n_vars} {n_clauses}")
}

/// Writes a single clause line
///
/// # Errors
///
/// If writing fails.
pub fn write_clause<W: Write + ?Sized>(writer: &mut W, clause: &Clause) -> Result<(), io::Error> {
    for lit in clause {
        write!(writer, "{} ", lit.to_dimacs())?;
    }
    writeln!(writer, "0")
}

/// Writes a CNF to a DIMACS CNF file
///
/// # Errors
///
/// If writing fails.
pub fn write_cnf_annotated<W: Write + ?Sized>(
    writer: &mut W,
    cnf: &Cnf,
    n_vars: u32,
) -> Result<(), io::Error> {
    write_header(writer, n_vars, cnf.len())?;
    cnf.iter().try_for_each(|cl| write_clause(writer, cl))?;
    writer.flush()
}
