//! Grammar module for building context-free grammars out of rule lines.
//!
//! Each line holds one rule, written as space separated symbols with the left
//! hand side first:
//!
//! ```rust
//! use earley_recognizer::Grammar;
//!
//! // S -> a S b S | epsilon
//! let grammar: Grammar = "S a S b S
//! S".parse().unwrap();
//!
//! assert!(grammar.recognize("aabb"));
//! assert!(!grammar.recognize("abba"));
//! ```

use crate::HashMap;
use crate::append_vec::{AppendOnlyVec, append_only_vec_id};
use crate::earley::Recognizer;
use crate::error::Error;
use crate::rule::Rule;
use crate::symbol::Symbol;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str;

append_only_vec_id!(pub(crate) RuleId);

/// An ordered list of [`Rule`]s, plus the augmenting rule `main -> S` where
/// `S` is the left hand side of the first rule.
///
/// A `Grammar` is never mutated after construction, so one grammar can be
/// shared by any number of concurrent recognitions.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Rule>", into = "Vec<Rule>"))]
pub struct Grammar {
    /// caller rules in declaration order, followed by the augmenting rule
    rules: AppendOnlyVec<Rule, RuleId>,
    augmenting: RuleId,
    rules_by_lhs: HashMap<Symbol, Vec<RuleId>>,
}

impl Grammar {
    /// Build a `Grammar` by parsing one rule per line.
    ///
    /// # Errors
    ///
    /// `Error::MalformedGrammar` if there are no lines, or if a line has no
    /// left hand side.
    pub fn from_rules<I, S>(lines: I) -> Result<Grammar, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| {
                line.as_ref().parse::<Rule>().map_err(|err| {
                    Error::MalformedGrammar(format!("rule on line {}: {err}", idx + 1))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Grammar::from_parts(rules)
    }

    /// Build a `Grammar` from already constructed `Rule`s.
    ///
    /// # Errors
    ///
    /// `Error::MalformedGrammar` if `rules` is empty.
    pub fn from_parts(rules: Vec<Rule>) -> Result<Grammar, Error> {
        let augmenting_rule = match rules.first() {
            Some(first) => Rule::augmenting(first.lhs()),
            None => {
                return Err(Error::MalformedGrammar(String::from(
                    "grammar must have at least one rule",
                )));
            }
        };

        let mut arena = AppendOnlyVec::<Rule, RuleId>::with_capacity(rules.len() + 1);
        let mut rules_by_lhs = HashMap::<Symbol, Vec<RuleId>>::new();

        for rule in rules.into_iter().chain(std::iter::once(augmenting_rule)) {
            let lhs = rule.lhs().clone();
            let id = arena.push(rule);
            rules_by_lhs.entry(lhs).or_default().push(id);
        }

        let augmenting = RuleId::from(arena.len() - 1);

        Ok(Grammar {
            rules: arena,
            augmenting,
            rules_by_lhs,
        })
    }

    /// The rule `main -> S`, built once when the grammar was constructed
    #[must_use]
    pub fn augmenting_rule(&self) -> &Rule {
        self.rules
            .get(self.augmenting)
            .expect("augmenting rule is always present")
    }

    /// Left hand side of the first rule, wrapped by the augmenting rule
    #[must_use]
    pub fn starting_symbol(&self) -> &Symbol {
        self.augmenting_rule()
            .get(0)
            .expect("augmenting rule has exactly one right hand side symbol")
    }

    /// Every rule whose left hand side is `lhs`, in declaration order.
    /// Asking for `main` includes the augmenting rule.
    pub fn rules_with_lhs<'a>(&'a self, lhs: &Symbol) -> impl Iterator<Item = &'a Rule> + use<'a> {
        self.rules_by_lhs
            .get(lhs)
            .into_iter()
            .flatten()
            .filter_map(|id| self.rules.get(*id))
    }

    /// Get iterator of the caller's rules, without the augmenting rule
    pub fn rules_iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().take(usize::from(self.augmenting))
    }

    /// Number of caller rules. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.augmenting)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recognize `word`, one terminal per character.
    ///
    /// Builds a fresh chart, so `&Grammar` can be used from several threads at once.
    #[must_use]
    pub fn recognize(&self, word: &str) -> bool {
        Recognizer::new(self).recognize(word)
    }

    /// Recognize a sequence of pre-split tokens, one terminal per token
    #[must_use]
    pub fn recognize_tokens<T: AsRef<str>>(&self, tokens: &[T]) -> bool {
        Recognizer::new(self).recognize_tokens(tokens)
    }
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.rules_iter().eq(other.rules_iter())
    }
}

impl Eq for Grammar {}

impl TryFrom<Vec<Rule>> for Grammar {
    type Error = Error;
    fn try_from(rules: Vec<Rule>) -> Result<Self, Self::Error> {
        Grammar::from_parts(rules)
    }
}

impl From<Grammar> for Vec<Rule> {
    fn from(grammar: Grammar) -> Self {
        let caller_rules = grammar.len();
        grammar.rules.into_iter().take(caller_rules).collect()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in self.rules_iter() {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl str::FromStr for Grammar {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammar::from_rules(s.lines())
    }
}
