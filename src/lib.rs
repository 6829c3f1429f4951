#![doc = include_str!("../README.md")]

mod append_vec;
mod earley;
mod error;
mod grammar;
mod parsers;
mod rule;
mod symbol;
mod tracing;
pub use crate::earley::{Chart, Column, Recognizer, State};
pub use crate::error::Error;
pub use crate::grammar::Grammar;
pub use crate::rule::Rule;
pub use crate::symbol::{EMPTY_STRING_TERMINAL, MAIN_NONTERMINAL, Symbol};

pub(crate) use hashbrown::{HashMap, HashSet};
