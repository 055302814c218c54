//! # Common Types for the CNF Side
//!
//! Propositional variables, literals and assignments as they appear in the
//! generated DIMACS formula. The encoder's richer literal families (order,
//! direct, boolean, helper and set-element literals) are mapped onto these
//! types by [`crate::encoder::LitIndex`].

use std::{fmt, ops};

use thiserror::Error;

pub mod constraints;
pub use constraints::Clause;

/// The hash map to use throughout the library
#[cfg(feature = "fxhash")]
pub type RsHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fxhash"))]
pub type RsHashMap<K, V> = std::collections::HashMap<K, V>;

/// The hash set to use throughout the library
#[cfg(feature = "fxhash")]
pub type RsHashSet<V> = rustc_hash::FxHashSet<V>;
#[cfg(not(feature = "fxhash"))]
pub type RsHashSet<V> = std::collections::HashSet<V>;

/// Type representing boolean variables of the generated formula. Variable
/// indexing starts from 0, the DIMACS number of a variable is its index plus
/// one. The maximum index is `(u32::MAX - 1) / 2` since literals are
/// represented as a single `u32`.
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
#[repr(transparent)]
pub struct Var {
    idx: u32,
}

impl Var {
    /// The maximum index that can be represented.
    pub const MAX_IDX: u32 = (u32::MAX - 1) / 2;

    /// Creates a new variable with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32) -> Var {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Var { idx }
    }

    /// Creates a new variable with a given index, returning an error if the
    /// index is too high.
    ///
    /// # Errors
    ///
    /// `TypeError::IdxTooHigh(idx, Var::MAX_IDX)` if `idx > Var::MAX_IDX`.
    pub fn new_with_error(idx: u32) -> Result<Var, TypeError> {
        if idx > Var::MAX_IDX {
            return Err(TypeError::IdxTooHigh(idx, Var::MAX_IDX));
        }
        Ok(Var { idx })
    }

    /// Creates a literal that is not negated.
    #[inline]
    #[must_use]
    pub fn pos_lit(self) -> Lit {
        Lit::new_unchecked(self.idx, false)
    }

    /// Creates a negated literal.
    #[inline]
    #[must_use]
    pub fn neg_lit(self) -> Lit {
        Lit::new_unchecked(self.idx, true)
    }

    /// Returns the index of the variable as a `usize` for indexing
    #[inline]
    #[must_use]
    pub fn idx(&self) -> usize {
        self.idx as usize
    }

    /// Returns the 32 bit index of the variable.
    #[inline]
    #[must_use]
    pub fn idx32(&self) -> u32 {
        self.idx
    }

    /// The DIMACS number of the variable (index plus one)
    ///
    /// # Panics
    ///
    /// If the number does not fit in an `i32`.
    #[must_use]
    pub fn to_dimacs(self) -> i32 {
        (self.idx + 1)
            .try_into()
            .expect("variable index too high to fit in i32")
    }
}

/// Variables can be printed with the [`Display`](std::fmt::Display) trait
impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.idx)
    }
}

/// More easily creates variables. Mainly used in tests.
///
/// # Examples
///
/// ```
/// use fzncnf::{var, types::Var};
///
/// assert_eq!(var![42], Var::new(42));
/// ```
#[macro_export]
macro_rules! var {
    ($v:expr) => {
        $crate::types::Var::new($v)
    };
}

/// Type representing literals, possibly negated boolean variables.
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
#[repr(transparent)]
pub struct Lit {
    /// Literal representation is `idx << 1` with the last bit representing
    /// whether the literal is negated or not.
    lidx: u32,
}

impl Lit {
    #[inline]
    fn represent(idx: u32, negated: bool) -> u32 {
        (idx << 1) + u32::from(negated)
    }

    /// Creates a new (negated or not) literal with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32, negated: bool) -> Lit {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Lit {
            lidx: Lit::represent(idx, negated),
        }
    }

    #[inline]
    fn new_unchecked(idx: u32, negated: bool) -> Lit {
        Lit {
            lidx: Lit::represent(idx, negated),
        }
    }

    /// Creates a new positive literal with a given index.
    #[inline]
    #[must_use]
    pub fn positive(idx: u32) -> Lit {
        Lit::new(idx, false)
    }

    /// Creates a new negated literal with a given index.
    #[inline]
    #[must_use]
    pub fn negative(idx: u32) -> Lit {
        Lit::new(idx, true)
    }

    /// Creates a literal from a signed DIMACS number.
    ///
    /// # Errors
    ///
    /// If the value is zero or the index is too high.
    pub fn from_dimacs(val: i32) -> Result<Lit, TypeError> {
        if val == 0 {
            return Err(TypeError::DimacsZero);
        }
        let negated = val < 0;
        let var = Var::new_with_error(val.unsigned_abs() - 1)?;
        Ok(Lit::new_unchecked(var.idx32(), negated))
    }

    /// Gets the variable index of the literal
    #[inline]
    #[must_use]
    pub fn vidx(&self) -> usize {
        (self.lidx >> 1) as usize
    }

    /// Gets the variable that the literal corresponds to.
    #[inline]
    #[must_use]
    pub fn var(&self) -> Var {
        Var {
            idx: self.lidx >> 1,
        }
    }

    /// True if the literal is positive.
    #[inline]
    #[must_use]
    pub fn is_pos(&self) -> bool {
        (self.lidx & 1u32) == 0
    }

    /// True if the literal is negated.
    #[inline]
    #[must_use]
    pub fn is_neg(&self) -> bool {
        (self.lidx & 1u32) == 1
    }

    /// Converts the literal to a signed DIMACS number: the variable index
    /// plus one, negative if the literal is negated.
    ///
    /// # Panics
    ///
    /// If the number does not fit in an `i32`.
    #[must_use]
    pub fn to_dimacs(self) -> i32 {
        let idx = self.var().to_dimacs();
        if self.is_neg() {
            -idx
        } else {
            idx
        }
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            lidx: self.lidx ^ 1u32,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_neg() {
            write!(f, "~x{}", self.vidx())
        } else {
            write!(f, "x{}", self.vidx())
        }
    }
}

/// More easily creates literals. Mainly used in tests.
///
/// # Examples
///
/// ```
/// use fzncnf::{lit, types::Lit};
///
/// assert_eq!(lit![42], Lit::positive(42));
/// assert_eq!(!lit![42], Lit::negative(42));
/// ```
#[macro_export]
macro_rules! lit {
    ($l:expr) => {
        $crate::types::Lit::positive($l)
    };
}

/// More easily creates literals from signed DIMACS numbers. Mainly used in
/// tests.
///
/// # Examples
///
/// ```
/// use fzncnf::{lit, dimacs_lit};
///
/// assert_eq!(dimacs_lit![42], lit![41]);
/// assert_eq!(dimacs_lit![-42], !lit![41]);
/// ```
#[macro_export]
macro_rules! dimacs_lit {
    ($l:expr) => {
        $crate::types::Lit::from_dimacs($l).unwrap()
    };
}

/// Ternary value assigned to a literal or variable, including possible "don't care"
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TernaryVal {
    /// Positive assignment.
    True,
    /// Negative assignment.
    False,
    /// Not assigned by the solver.
    DontCare,
}

impl fmt::Display for TernaryVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TernaryVal::True => write!(f, "1"),
            TernaryVal::False => write!(f, "0"),
            TernaryVal::DontCare => write!(f, "_"),
        }
    }
}

impl fmt::Debug for TernaryVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<bool> for TernaryVal {
    fn from(value: bool) -> Self {
        if value {
            return TernaryVal::True;
        }
        TernaryVal::False
    }
}

/// Type representing an assignment of variables, as returned by a solver.
#[derive(Clone, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Assignment {
    assignment: Vec<TernaryVal>,
}

impl Assignment {
    /// Get the value that the assignment gives to a variable.
    /// If the variable is not included, will return `TernaryVal::DontCare`.
    #[must_use]
    pub fn var_value(&self, var: Var) -> TernaryVal {
        if var.idx() >= self.assignment.len() {
            TernaryVal::DontCare
        } else {
            self.assignment[var.idx()]
        }
    }

    /// Same as [`Assignment::var_value`], but for literals.
    #[must_use]
    pub fn lit_value(&self, lit: Lit) -> TernaryVal {
        if lit.is_neg() {
            match self.var_value(lit.var()) {
                TernaryVal::DontCare => TernaryVal::DontCare,
                TernaryVal::True => TernaryVal::False,
                TernaryVal::False => TernaryVal::True,
            }
        } else {
            self.var_value(lit.var())
        }
    }

    /// Assigns a variable in the assignment
    pub fn assign_var(&mut self, var: Var, val: TernaryVal) {
        if self.assignment.len() < var.idx() + 1 {
            self.assignment.resize(var.idx() + 1, TernaryVal::DontCare);
        }
        self.assignment[var.idx()] = val;
    }

    /// Assigns a literal to true
    pub fn assign_lit(&mut self, lit: Lit) {
        self.assign_var(lit.var(), TernaryVal::from(lit.is_pos()));
    }

    /// Gets the number of variables the assignment covers
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Checks whether the assignment covers no variable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Iterates over all assigned literals
    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(idx, tv)| {
                let var = Var::new(u32::try_from(idx).ok()?);
                match tv {
                    TernaryVal::True => Some(var.pos_lit()),
                    TernaryVal::False => Some(var.neg_lit()),
                    TernaryVal::DontCare => None,
                }
            })
    }

    /// Parses an assignment from a line of signed DIMACS numbers. The line may
    /// start with the competition prefix `v` and may end with a terminating
    /// zero.
    ///
    /// # Errors
    ///
    /// If the line contains a token that is not an integer, or assigns a
    /// variable both values.
    pub fn from_vline(line: &str) -> Result<Self, InvalidVLine> {
        let mut assignment = Assignment::default();
        assignment.extend_from_vline(line)?;
        Ok(assignment)
    }

    /// Parses a further value line into an existing assignment.
    ///
    /// # Errors
    ///
    /// See [`Assignment::from_vline`].
    pub fn extend_from_vline(&mut self, line: &str) -> Result<(), InvalidVLine> {
        let body = line.trim();
        let body = body.strip_prefix('v').unwrap_or(body);
        for token in body.split_whitespace() {
            let val: i32 = token
                .parse()
                .map_err(|_| InvalidVLine::InvalidToken(token.to_string()))?;
            if val == 0 {
                break;
            }
            let lit = Lit::from_dimacs(val).map_err(InvalidVLine::Type)?;
            let new = TernaryVal::from(lit.is_pos());
            match self.var_value(lit.var()) {
                TernaryVal::DontCare => self.assign_var(lit.var(), new),
                old if old != new => return Err(InvalidVLine::ConflictingAssignment(lit.var())),
                _ => (),
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.assignment
            .iter()
            .try_for_each(|tv| write!(f, "{tv}"))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromIterator<Lit> for Assignment {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        let mut assignment = Assignment::default();
        iter.into_iter().for_each(|l| assignment.assign_lit(l));
        assignment
    }
}

impl From<Vec<TernaryVal>> for Assignment {
    fn from(assignment: Vec<TernaryVal>) -> Self {
        Self { assignment }
    }
}

/// Errors related to types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TypeError {
    /// The requested index is too high.
    /// Contains the requested and the maximum index.
    #[error("index {0} is too high (maximum {1})")]
    IdxTooHigh(u32, u32),
    /// DIMACS literal is zero
    #[error("zero is an invalid DIMACS literal")]
    DimacsZero,
}

/// Errors when reading a value line of a solver model
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidVLine {
    /// A token on the line is not a number
    #[error("invalid token `{0}` in value line")]
    InvalidToken(String),
    /// The same variable was assigned both values
    #[error("the solver assigned variable {0} both values")]
    ConflictingAssignment(Var),
    /// A number is not a valid literal
    #[error(transparent)]
    Type(TypeError),
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::{Assignment, InvalidVLine, Lit, TernaryVal, Var};

    #[test]
    fn var_index() {
        let var = Var::new(5);
        assert_eq!(var.idx(), 5);
        assert_eq!(var.idx32(), 5);
    }

    #[test]
    fn var_lits() {
        let var = Var::new(5);
        assert_eq!(var.pos_lit(), Lit::positive(5));
        assert_eq!(var.neg_lit(), Lit::negative(5));
        assert_eq!(Lit::negative(5).var(), var);
    }

    #[test]
    fn lit_representation() {
        assert_eq!(Lit::represent(5, true), 0b1011);
    }

    #[test]
    fn lit_negation() {
        let lit1 = Lit::positive(0);
        let lit2 = !lit1;
        assert!(lit2.is_neg());
        assert_eq!(lit1.var(), lit2.var());
        assert_eq!(-lit2, lit1);
    }

    #[test]
    fn dimacs_lit_idx_plus_one() {
        let lit = Lit::positive(5);
        assert_eq!(lit.to_dimacs(), 6);
        assert_eq!((!lit).to_dimacs(), -6);
        assert_eq!(Lit::from_dimacs(-6).unwrap(), !lit);
        assert!(Lit::from_dimacs(0).is_err());
    }

    #[test]
    fn assignment_lit_value() {
        let sol = Assignment::from(vec![
            TernaryVal::True,
            TernaryVal::False,
            TernaryVal::DontCare,
        ]);
        assert_eq!(sol.lit_value(Lit::negative(0)), TernaryVal::False);
        assert_eq!(sol.lit_value(Lit::negative(1)), TernaryVal::True);
        assert_eq!(sol.lit_value(Lit::positive(2)), TernaryVal::DontCare);
        assert_eq!(sol.lit_value(Lit::positive(7)), TernaryVal::DontCare);
    }

    #[test]
    fn assignment_from_vline() {
        let sol = Assignment::from_vline("v 1 -2 4 0").unwrap();
        assert_eq!(
            sol,
            Assignment::from(vec![
                TernaryVal::True,
                TernaryVal::False,
                TernaryVal::DontCare,
                TernaryVal::True,
            ])
        );
        let sol = Assignment::from_vline("1 -2 4 0").unwrap();
        assert_eq!(sol.iter().count(), 3);
    }

    #[test]
    fn assignment_conflicting_vline() {
        assert_eq!(
            Assignment::from_vline("v 1 -1 0"),
            Err(InvalidVLine::ConflictingAssignment(Var::new(0)))
        );
        assert!(matches!(
            Assignment::from_vline("v 1 x 0"),
            Err(InvalidVLine::InvalidToken(_))
        ));
    }

    #[test]
    fn lit_mem_size() {
        assert_eq!(size_of::<Lit>(), size_of::<u32>());
        assert_eq!(size_of::<TernaryVal>(), 1);
    }
}
