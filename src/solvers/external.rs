//! # Solver Interface for External Executables

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{self, Command},
};

use tracing::debug;

use crate::instances::fio::{self, SolverOutput};

/// Options for how the output of the solver is read
#[derive(Debug, Clone, Default)]
pub struct OutputVia(OutputViaInt);

#[derive(Debug, Clone, Default)]
enum OutputViaInt {
    /// The solver output is written to a file at the given path that is not automatically deleted
    File(PathBuf),
    /// The solver writes its result to the path given as argument after the instance
    Arg(PathBuf),
    /// The solver output is read directly through a pipe
    #[default]
    Pipe,
}

impl OutputVia {
    /// Process the solver output via a persistent file at `path` that `stdout` is redirected to
    #[must_use]
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        OutputVia(OutputViaInt::File(path.as_ref().to_path_buf()))
    }

    /// Pass `path` to the solver as argument after the instance and read the result from there,
    /// as done by minisat
    #[must_use]
    pub fn arg<P: AsRef<Path>>(path: P) -> Self {
        OutputVia(OutputViaInt::Arg(path.as_ref().to_path_buf()))
    }

    /// Process the solver output via a pipe from `<stdout>`
    #[must_use]
    pub fn pipe() -> Self {
        OutputVia(OutputViaInt::Pipe)
    }
}

macro_rules! check_exit_code {
    ($status:expr) => {
        match $status.code() {
            // these are the expected return codes for SAT solvers
            // we don't check them against the ouput though
            Some(0 | 10 | 20) => (),
            Some(x) => anyhow::bail!("solver returned unexpected code {x}"),
            None => anyhow::bail!("solver process terminated by signal"),
        };
    };
}

/// A solver called via an external executable
///
/// This solver will perform a call to the solver executable via [`Command`] and parse the solver
/// output via [`fio::parse_sat_solver_output`]
#[derive(Debug)]
pub struct Solver {
    cmd: Command,
    output: OutputVia,
}

impl Solver {
    /// Initializes a solver with a [`Command`] that is fully set up, except for the input instance
    ///
    /// # Example
    ///
    /// ```
    /// use std::process::Command;
    /// use fzncnf::solvers::{external, ExternalSolver};
    /// let solver = ExternalSolver::new(
    ///     Command::new("<path to solver binary>"),
    ///     external::OutputVia::pipe(),
    /// );
    /// ```
    #[must_use]
    pub fn new(cmd: Command, output: OutputVia) -> Self {
        Solver { cmd, output }
    }

    /// Initializes a solver from a command line, i.e., the executable followed by whitespace
    /// separated arguments
    ///
    /// # Errors
    ///
    /// If the command line is empty.
    pub fn from_cmdline(line: &str, output: OutputVia) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(program) = words.next() else {
            anyhow::bail!("empty solver command line");
        };
        let mut cmd = Command::new(program);
        cmd.args(words);
        Ok(Solver::new(cmd, output))
    }

    /// Runs the solver on the DIMACS CNF file at `cnf`
    ///
    /// # Errors
    ///
    /// If the solver can not be run, exits with a code other than 0, 10 or 20, or its output can
    /// not be parsed.
    pub fn solve<P: AsRef<Path>>(self, cnf: P) -> anyhow::Result<SolverOutput> {
        let mut cmd = self.cmd;
        cmd.arg(cnf.as_ref());
        debug!(command = ?cmd, "calling external solver");
        let output = match self.output.0 {
            OutputViaInt::File(path) => {
                // pipe output into file
                // NOTE: this currently does not support compression
                cmd.stdout(fs::File::create(&path)?);
                let exit = cmd.status()?;
                let output =
                    fio::parse_sat_solver_output(io::BufReader::new(fs::File::open(&path)?))?;
                check_exit_code!(exit);
                output
            }
            OutputViaInt::Arg(path) => {
                cmd.arg(&path);
                let exit = cmd.stdout(process::Stdio::null()).status()?;
                check_exit_code!(exit);
                fio::parse_sat_solver_output(io::BufReader::new(fs::File::open(&path)?))?
            }
            OutputViaInt::Pipe => {
                let mut child = cmd.stdout(process::Stdio::piped()).spawn()?;
                let Some(stdout) = child.stdout.take() else {
                    anyhow::bail!("solver stdout was not captured");
                };
                let mut stdout = io::BufReader::new(stdout);
                let output = fio::parse_sat_solver_output(&mut stdout)?;
                check_exit_code!(child.wait()?);
                // keep pipe open till after child has terminated
                drop(stdout);
                output
            }
        };
        Ok(output)
    }
}
