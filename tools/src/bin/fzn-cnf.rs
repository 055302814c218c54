//! # fzn-cnf
//!
//! Compiles a FlatZinc model to DIMACS CNF, solves it with an external SAT
//! solver and prints the solution in the FlatZinc output format.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use fzncnf::{
    decode::{Decoder, Outcome},
    encoder::{self, Compilation, EncodeStats, EncoderConfig},
    fzn,
    instances::{fio, DimacsSink},
    solvers::{external::OutputVia, ExternalSolver},
    types::Clause,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the FlatZinc model. May be compressed with `.gz`, `.bz2` or `.xz`.
    in_path: PathBuf,
    /// The solver command line, e.g., `"cadical -q"`. The CNF path is appended as last argument.
    #[arg(long)]
    solver: Option<String>,
    /// Keep the CNF at this path instead of a temporary file
    #[arg(long)]
    cnf: Option<PathBuf>,
    /// Pass this path to the solver after the CNF and read the result from it (minisat style)
    #[arg(long)]
    solver_output_arg: Option<PathBuf>,
    /// Only write the CNF, to `--cnf` or `stdout`, without solving
    #[arg(long)]
    dimacs_only: bool,
    /// The bound `N` for integer variables declared without a domain, which range over `-N..N`
    #[arg(long, default_value_t = 128, value_parser = clap::value_parser!(i64).range(0..))]
    int_bound: i64,
    /// Do not emit the tautology `b | ~b` for declared booleans
    #[arg(long)]
    no_trivial_bool_clauses: bool,
    /// Print encoding statistics as `%%%mzn-stat` lines
    #[arg(long)]
    stats: bool,
    /// Increase the log verbosity, may be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_cnf<W: Write>(comp: &mut Compilation<DimacsSink>, writer: &mut W) -> anyhow::Result<()> {
    if comp.is_unsat() {
        // the clauses written so far might be satisfiable
        fio::dimacs::write_header(writer, 0, 1)?;
        fio::dimacs::write_clause(writer, &Clause::new())?;
    } else {
        comp.write_dimacs(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_cnf_path(comp: &mut Compilation<DimacsSink>, path: &Path) -> anyhow::Result<()> {
    let mut writer = fio::open_compressed_uncompressed_write(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    write_cnf(comp, &mut writer)
}

fn print_stats<S>(comp: &Compilation<S>) {
    let stats = comp.stats();
    println!("%%%mzn-stat: variables={}", comp.n_vars());
    println!("%%%mzn-stat: clauses={}", comp.n_clauses());
    println!("%%%mzn-stat: constraints={}", stats.n_constraints);
    println!("%%%mzn-stat: helpers={}", stats.n_helpers);
    println!(
        "%%%mzn-stat: encodeTime={:.3}",
        stats.cpu_time.as_secs_f64()
    );
    println!("%%%mzn-stat-end");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let items = fzn::parse_path(&args.in_path)
        .with_context(|| format!("failed to parse {}", args.in_path.display()))?;
    debug!(items = items.len(), "parsed model");

    let config = EncoderConfig::default()
        .with_unbounded_int(-args.int_bound, args.int_bound)
        .with_trivial_bool_clauses(!args.no_trivial_bool_clauses);
    let mut comp = encoder::compile(&items, config, DimacsSink::new()?)?;
    info!(
        vars = comp.n_vars(),
        clauses = comp.n_clauses(),
        unsat = comp.is_unsat(),
        "compiled model"
    );
    if args.stats {
        print_stats(&comp);
    }

    if args.dimacs_only {
        return match &args.cnf {
            Some(path) => write_cnf_path(&mut comp, path),
            None => write_cnf(&mut comp, &mut io::stdout().lock()),
        };
    }

    if comp.is_unsat() {
        if let Some(path) = &args.cnf {
            write_cnf_path(&mut comp, path)?;
        }
        print!("{}", Outcome::Unsatisfiable);
        return Ok(());
    }

    let Some(cmdline) = &args.solver else {
        anyhow::bail!("no solver given, pass `--solver` or `--dimacs-only`");
    };
    let output_via = match &args.solver_output_arg {
        Some(path) => OutputVia::arg(path),
        None => OutputVia::pipe(),
    };
    let solver = ExternalSolver::from_cmdline(cmdline, output_via)?;

    let output = match &args.cnf {
        Some(path) => {
            write_cnf_path(&mut comp, path)?;
            solver.solve(path)?
        }
        None => {
            let mut file = tempfile::Builder::new().suffix(".cnf").tempfile()?;
            write_cnf(&mut comp, &mut io::BufWriter::new(file.as_file_mut()))?;
            let path = file.into_temp_path();
            let output = solver.solve(&path)?;
            path.close()?;
            output
        }
    };

    print!("{}", Decoder::new(&comp).decode(&output));
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn int_bound_is_non_negative() {
        let args = Args::try_parse_from(["fzn-cnf", "model.fzn", "--int-bound", "7"]).unwrap();
        assert_eq!(args.int_bound, 7);
        assert!(Args::try_parse_from(["fzn-cnf", "model.fzn", "--int-bound=-5"]).is_err());
        assert_eq!(Args::try_parse_from(["fzn-cnf", "model.fzn"]).unwrap().int_bound, 128);
    }
}
