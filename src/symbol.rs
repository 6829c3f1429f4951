use crate::error::Error;
use crate::parsers;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the terminal standing for the empty string
pub const EMPTY_STRING_TERMINAL: &str = "epsilon";

/// Name of the nonterminal heading the augmenting rule
pub const MAIN_NONTERMINAL: &str = "main";

/// A grammar symbol, identified by its name.
///
/// Whether a name is a terminal or a nonterminal is decided by convention:
/// names starting with a lowercase letter (and the reserved `epsilon`) are
/// terminals, everything else is a nonterminal. The reserved `main` is always
/// a nonterminal. Because the variant follows from the name, two symbols are
/// equal exactly when their names are.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Symbol {
    /// Literal input content, or the empty string
    Terminal(String),
    /// Expanded by rules
    Nonterminal(String),
}

impl Symbol {
    /// Classify `name` and build the matching `Symbol`
    ///
    /// # Panics
    ///
    /// If `name` is empty. Use [`str::parse`] to validate untrusted names.
    #[must_use]
    pub fn new(name: &str) -> Symbol {
        assert!(!name.is_empty(), "symbol name must not be empty");

        let is_terminal = name == EMPTY_STRING_TERMINAL
            || (name != MAIN_NONTERMINAL && name.chars().next().is_some_and(char::is_lowercase));

        if is_terminal {
            Symbol::Terminal(name.to_owned())
        } else {
            Symbol::Nonterminal(name.to_owned())
        }
    }

    /// The empty string terminal, `epsilon`
    #[must_use]
    pub fn epsilon() -> Symbol {
        Symbol::Terminal(String::from(EMPTY_STRING_TERMINAL))
    }

    /// The augmenting start nonterminal, `main`
    #[must_use]
    pub fn main() -> Symbol {
        Symbol::Nonterminal(String::from(MAIN_NONTERMINAL))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => name,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    #[must_use]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Terminal(name) if name == EMPTY_STRING_TERMINAL)
    }

    /// True if this is a non-empty terminal spelled exactly like `token`
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Symbol::Terminal(name) => name != EMPTY_STRING_TERMINAL && name == token,
            Symbol::Nonterminal(_) => false,
        }
    }
}

impl FromStr for Symbol {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::symbol_complete(s)
            .map(|(_, symbol)| symbol)
            .map_err(|err| {
                Error::MalformedGrammar(format!("invalid symbol {s:?}: {}", Error::from(err)))
            })
    }
}

impl TryFrom<String> for Symbol {
    type Error = Error;
    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => name,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
