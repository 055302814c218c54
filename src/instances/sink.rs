//! # Streaming DIMACS Output
//!
//! The DIMACS header has to state the final number of variables and clauses,
//! neither of which is known before the last constraint has been encoded.
//! [`DimacsSink`] therefore buffers the clause lines in a temporary file and
//! only writes header and body once [`DimacsSink::write_dimacs`] is called.

use std::{
    fs::File,
    io::{self, BufWriter, Seek, Write},
};

use crate::types::Clause;

use super::{fio, ClauseSink};

/// Clause sink streaming the formula body to a temporary file
#[derive(Debug)]
pub struct DimacsSink {
    body: BufWriter<File>,
    n_clauses: usize,
}

impl DimacsSink {
    /// Creates a new sink backed by an anonymous temporary file
    ///
    /// # Errors
    ///
    /// If the temporary file could not be created.
    pub fn new() -> io::Result<Self> {
        Ok(DimacsSink {
            body: BufWriter::new(tempfile::tempfile()?),
            n_clauses: 0,
        })
    }

    /// Writes the complete DIMACS CNF, header first, to a writer
    ///
    /// Can be called multiple times; clauses added afterwards are appended to
    /// the body as usual.
    ///
    /// # Errors
    ///
    /// If reading the buffered body or writing the output fails.
    pub fn write_dimacs<W: Write>(&mut self, writer: &mut W, n_vars: u32) -> io::Result<()> {
        fio::dimacs::write_header(writer, n_vars, self.n_clauses)?;
        self.body.flush()?;
        let file = self.body.get_mut();
        file.rewind()?;
        io::copy(file, writer)?;
        file.seek(io::SeekFrom::End(0))?;
        writer.flush()
    }
}

impl ClauseSink for DimacsSink {
    fn add_clause(&mut self, clause: Clause) -> io::Result<()> {
        fio::dimacs::write_clause(&mut self.body, &clause)?;
        self.n_clauses += 1;
        Ok(())
    }

    fn n_clauses(&self) -> usize {
        self.n_clauses
    }
}
