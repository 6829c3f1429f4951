use crate::error::Error;
use crate::parsers;
use crate::symbol::Symbol;
use std::fmt;
use std::slice;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A production `LHS -> RHS1 RHS2 ... RHSn`.
///
/// The right hand side is never empty: an empty string production holds the
/// single symbol [`Symbol::epsilon`].
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(from = "RuleParts"))]
pub struct Rule {
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

/// Deserialized fields of a [`Rule`], before the right hand side is checked
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RuleParts {
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

#[cfg(feature = "serde")]
impl From<RuleParts> for Rule {
    fn from(parts: RuleParts) -> Self {
        Rule::new(parts.lhs, parts.rhs)
    }
}

impl Rule {
    /// Construct a `Rule`, turning an empty right hand side into `epsilon`
    #[must_use]
    pub fn new(lhs: Symbol, mut rhs: Vec<Symbol>) -> Rule {
        if rhs.is_empty() {
            rhs.push(Symbol::epsilon());
        }
        Rule { lhs, rhs }
    }

    /// The rule `main -> start`, used to accept input derived from `start`
    #[must_use]
    pub fn augmenting(start: &Symbol) -> Rule {
        Rule::new(Symbol::main(), vec![start.clone()])
    }

    #[must_use]
    pub const fn lhs(&self) -> &Symbol {
        &self.lhs
    }

    /// Get iterator of the `Rule`'s right hand side `Symbol`s
    pub fn rhs_iter(&self) -> slice::Iter<'_, Symbol> {
        self.rhs.iter()
    }

    /// Get the right hand side `Symbol` at `idx`, if any
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Symbol> {
        self.rhs.get(idx)
    }

    /// Get number of right hand side `Symbol`s. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for Rule {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parsers::rule_complete(s) {
            Result::Ok((_, o)) => Ok(o),
            Result::Err(e) => Err(Error::from(e)),
        }
    }
}
