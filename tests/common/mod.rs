#![allow(dead_code)]

use batsat::{lbool, SolverInterface};
use fzncnf::{
    decode::{Decoder, Outcome, Solution},
    encoder::{compile, Bound, Compilation, EncoderConfig, Entity, IntVar, SetVal, Symbol},
    fzn,
    instances::{fio::SolverOutput, Cnf},
    types::{Assignment, Lit, TernaryVal},
};

/// Compiles a FlatZinc model into an in-memory formula
pub fn compile_str(src: &str) -> Compilation {
    let items = fzn::parse(src).expect("model should parse");
    compile(&items, EncoderConfig::default(), Cnf::new()).expect("model should compile")
}

pub fn int_var(comp: &Compilation, name: &str) -> IntVar {
    match comp.symbol(name) {
        Some(Symbol::Scalar(Entity::Int(var))) => var.clone(),
        other => panic!("{name} is not an integer variable: {other:?}"),
    }
}

pub fn set_var(comp: &Compilation, name: &str) -> SetVal {
    match comp.symbol(name) {
        Some(Symbol::Scalar(Entity::Set(set))) => set.clone(),
        other => panic!("{name} is not a set variable: {other:?}"),
    }
}

/// Turns bounds into assumptions, `None` if one of them is constantly false
pub fn assume(comp: &Compilation, bounds: &[Bound]) -> Option<Vec<Lit>> {
    let mut lits = Vec::with_capacity(bounds.len());
    for bound in bounds {
        match *bound {
            Bound::Const(true) => (),
            Bound::Const(false) => return None,
            Bound::Lit(lit) => lits.push(
                comp.index()
                    .get_lit(lit)
                    .expect("literal should be part of the formula"),
            ),
        }
    }
    Some(lits)
}

/// Assumptions pinning integer variables, `None` if a value is outside a
/// domain
pub fn pin_ints(comp: &mut Compilation, vals: &[(&str, i64)]) -> Option<Vec<Lit>> {
    let mut lits = Vec::new();
    for (name, val) in vals {
        lits.extend(comp.fix_int(name, *val).expect("should be an integer")?);
    }
    Some(lits)
}

pub fn pin_bools(comp: &mut Compilation, vals: &[(&str, bool)]) -> Vec<Lit> {
    let mut lits = Vec::new();
    for (name, val) in vals {
        lits.extend(
            comp.fix_bool(name, *val)
                .expect("should be a boolean")
                .expect("boolean should not be fixed"),
        );
    }
    lits
}

pub fn pin_set(comp: &mut Compilation, name: &str, elems: &[i64]) -> Vec<Lit> {
    comp.fix_set(name, elems)
        .expect("should be a set")
        .expect("elements should be in the ground set")
}

/// All subsets of a sorted ground set
pub fn subsets(ground: &[i64]) -> Vec<Vec<i64>> {
    (0..1u32 << ground.len())
        .map(|mask| {
            ground
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, elem)| *elem)
                .collect()
        })
        .collect()
}

/// A reference SAT solver loaded with a compiled formula
pub struct Oracle {
    solver: batsat::BasicSolver,
    n_vars: u32,
}

impl Oracle {
    pub fn new(comp: &Compilation) -> Self {
        let mut solver = batsat::BasicSolver::default();
        for clause in comp.sink() {
            let mut lits: Vec<batsat::Lit> =
                clause.iter().map(|lit| to_batsat(&mut solver, *lit)).collect();
            solver.add_clause_reuse(&mut lits);
        }
        Oracle {
            solver,
            n_vars: comp.index().n_vars(),
        }
    }

    pub fn add_clause(&mut self, clause: &[Lit]) {
        let mut lits: Vec<batsat::Lit> = clause
            .iter()
            .map(|lit| to_batsat(&mut self.solver, *lit))
            .collect();
        self.solver.add_clause_reuse(&mut lits);
    }

    pub fn solve(&mut self, assumps: &[Lit]) -> bool {
        let assumps: Vec<batsat::Lit> = assumps
            .iter()
            .map(|lit| to_batsat(&mut self.solver, *lit))
            .collect();
        self.solver.solve_limited(&assumps) == lbool::TRUE
    }

    /// Solves under assumptions and returns the model over all formula
    /// variables
    pub fn model(&mut self, assumps: &[Lit]) -> Option<Assignment> {
        if !self.solve(assumps) {
            return None;
        }
        let vals: Vec<TernaryVal> = (0..self.n_vars)
            .map(|idx| {
                let lit = batsat::Lit::new(self.solver.var_of_int(idx + 1), true);
                let val = self.solver.value_lit(lit);
                if val == lbool::TRUE {
                    TernaryVal::True
                } else if val == lbool::FALSE {
                    TernaryVal::False
                } else {
                    TernaryVal::DontCare
                }
            })
            .collect();
        Some(vals.into())
    }

    /// Solves under assumptions and decodes the model
    pub fn solution(&mut self, comp: &Compilation, assumps: &[Lit]) -> Option<Solution> {
        let model = self.model(assumps)?;
        assert_eq!(comp.sink().evaluate(&model), TernaryVal::True);
        match Decoder::new(comp).decode(&SolverOutput::Sat(model)) {
            Outcome::Satisfied(sol) => Some(sol),
            other => panic!("expected a solution, got {other:?}"),
        }
    }
}

fn to_batsat(solver: &mut batsat::BasicSolver, lit: Lit) -> batsat::Lit {
    batsat::Lit::new(solver.var_of_int(lit.var().idx32() + 1), lit.is_pos())
}
