//! # Module for File IO (Writing and Parsing)
//!
//! Opening possibly compressed files, writing DIMACS CNF and reading the
//! output of SAT solvers.

use std::{
    fs::File,
    io::{self, BufRead},
    path::Path,
};

use thiserror::Error;

use crate::types::{Assignment, InvalidVLine};

pub mod dimacs;

/// Opens a reader for the file at Path.
/// With feature `compression` supports bzip2, gzip and xz compression.
pub(crate) fn open_compressed_uncompressed_read<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn io::Read>, io::Error> {
    let path = path.as_ref();
    let raw_reader = File::open(path)?;
    #[cfg(feature = "compression")]
    if let Some(ext) = path.extension() {
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("bz2")) {
            return Ok(Box::new(bzip2::read::BzDecoder::new(raw_reader)));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("gz")) {
            return Ok(Box::new(flate2::read::GzDecoder::new(raw_reader)));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("xz")) {
            return Ok(Box::new(xz2::read::XzDecoder::new(raw_reader)));
        }
    }
    Ok(Box::new(raw_reader))
}

/// Opens a writer for the file at Path.
/// With feature `compression` supports bzip2, gzip and xz compression.
pub fn open_compressed_uncompressed_write<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn io::Write>, io::Error> {
    let path = path.as_ref();
    let raw_writer = File::create(path)?;
    #[cfg(feature = "compression")]
    if let Some(ext) = path.extension() {
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("bz2")) {
            return Ok(Box::new(io::BufWriter::new(bzip2::write::BzEncoder::new(
                raw_writer,
                bzip2::Compression::fast(),
            ))));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("gz")) {
            return Ok(Box::new(io::BufWriter::new(flate2::write::GzEncoder::new(
                raw_writer,
                flate2::Compression::fast(),
            ))));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("xz")) {
            return Ok(Box::new(io::BufWriter::new(xz2::write::XzEncoder::new(
                raw_writer, 1,
            ))));
        }
    }
    Ok(Box::new(io::BufWriter::new(raw_writer)))
}

/// The result reported by a SAT solver
#[derive(Debug, PartialEq, Eq)]
pub enum SolverOutput {
    /// The formula is satisfiable, with the model found
    Sat(Assignment),
    /// The formula is unsatisfiable
    Unsat,
    /// The solver gave up
    Unknown,
}

/// Errors in the output of a SAT solver
#[derive(Error, Debug)]
pub enum SatSolverOutputError {
    /// The output contained no status line
    #[error("no solution line found in the output")]
    NoSline,
    /// The solver reported satisfiable but printed no model
    #[error("no value line found in the output")]
    NoVline,
    /// The status line could not be interpreted
    #[error("invalid solution line `{0}` found in the output")]
    InvalidSLine(String),
    /// A model line could not be interpreted
    #[error(transparent)]
    InvalidVLine(#[from] InvalidVLine),
}

/// Parses the output of a SAT solver
///
/// Two formats are understood:
/// - the SAT competition format, with a status line `s SATISFIABLE`,
///   `s UNSATISFIABLE` or `s UNKNOWN` and value lines starting with `v`
/// - the MiniSat result file format, with a first line `SAT`, `UNSAT` or
///   `INDET` and, if satisfiable, a model line of signed integers
///
/// # Errors
///
/// If the output is malformed, see [`SatSolverOutputError`], or reading
/// fails.
pub fn parse_sat_solver_output<R: BufRead>(reader: R) -> anyhow::Result<SolverOutput> {
    let mut is_sat = false;
    let mut bare_model = false;
    let mut solution: Option<Assignment> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();

        // solution line
        if let Some(status) = line.strip_prefix("s ") {
            match status.trim_start() {
                status if status.starts_with("UNSATISFIABLE") => return Ok(SolverOutput::Unsat),
                status if status.starts_with("UNKNOWN") || status.starts_with("INDETERMINATE") => {
                    return Ok(SolverOutput::Unknown)
                }
                status if status.starts_with("SATISFIABLE") => is_sat = true,
                _ => anyhow::bail!(SatSolverOutputError::InvalidSLine(line.to_string())),
            }
            continue;
        }
        match line {
            "UNSAT" => return Ok(SolverOutput::Unsat),
            "INDET" => return Ok(SolverOutput::Unknown),
            "SAT" => {
                is_sat = true;
                bare_model = true;
                continue;
            }
            _ => (),
        }

        // value line
        if line.starts_with("v ") || line == "v" || (bare_model && !line.is_empty()) {
            match &mut solution {
                Some(assign) => assign
                    .extend_from_vline(line)
                    .map_err(SatSolverOutputError::from)?,
                None => {
                    solution =
                        Some(Assignment::from_vline(line).map_err(SatSolverOutputError::from)?);
                }
            }
        }
    }

    // there is no solution line so we can not trust the output
    if !is_sat {
        anyhow::bail!(SatSolverOutputError::NoSline);
    }

    if let Some(solution) = solution {
        return Ok(SolverOutput::Sat(solution));
    }

    anyhow::bail!(SatSolverOutputError::NoVline);
}
