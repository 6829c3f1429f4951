use crate::rule::Rule;
use crate::symbol::Symbol;
use std::fmt;

/// A dotted rule: how much of a [`Rule`]'s right hand side has been matched
/// (`dot`), and the input position where matching began (`origin`).
///
/// States compare structurally, so two states built from equal rules are
/// equal even if the rules live at different addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State<'gram> {
    rule: &'gram Rule,
    dot: usize,
    origin: usize,
}

impl<'gram> State<'gram> {
    /// # Panics
    ///
    /// If `dot` is past the end of the rule's right hand side.
    #[must_use]
    pub fn new(rule: &'gram Rule, dot: usize, origin: usize) -> Self {
        assert!(
            dot <= rule.len(),
            "dot position {dot} is out of range for rule `{rule}`"
        );
        Self { rule, dot, origin }
    }

    /// A state which has matched nothing yet
    #[must_use]
    pub fn start(rule: &'gram Rule, origin: usize) -> Self {
        Self::new(rule, 0, origin)
    }

    #[must_use]
    pub const fn rule(&self) -> &'gram Rule {
        self.rule
    }

    #[must_use]
    pub const fn dot(&self) -> usize {
        self.dot
    }

    #[must_use]
    pub const fn origin(&self) -> usize {
        self.origin
    }

    /// The symbol right after the dot, or `None` when complete
    #[must_use]
    pub fn next_symbol(&self) -> Option<&'gram Symbol> {
        self.rule.get(self.dot)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dot == self.rule.len()
    }

    /// The same state with the dot moved over the next symbol
    ///
    /// # Panics
    ///
    /// If the state is already complete.
    #[must_use]
    pub fn advance(&self) -> Self {
        Self::new(self.rule, self.dot + 1, self.origin)
    }
}

/// Formats as `LHS -> RHS (origin)`, with `*` marking the dot, e.g. `S -> a * S b S (0)`
impl fmt::Display for State<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.rule.lhs())?;
        for (idx, symbol) in self.rule.rhs_iter().enumerate() {
            if idx == self.dot {
                write!(f, " *")?;
            }
            write!(f, " {symbol}")?;
        }
        if self.is_complete() {
            write!(f, " *")?;
        }
        write!(f, " ({})", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rule(line: &str) -> Rule {
        line.parse().unwrap()
    }

    #[test]
    fn display_marks_dot() {
        let rule = rule("S a S b S");
        assert_eq!(State::new(&rule, 0, 0).to_string(), "S -> * a S b S (0)");
        assert_eq!(State::new(&rule, 2, 1).to_string(), "S -> a S * b S (1)");
        assert_eq!(State::new(&rule, 4, 3).to_string(), "S -> a S b S * (3)");
    }

    #[test]
    fn display_epsilon_rule() {
        let rule = rule("S");
        assert_eq!(State::start(&rule, 2).to_string(), "S -> * epsilon (2)");
        assert_eq!(State::new(&rule, 1, 2).to_string(), "S -> epsilon * (2)");
    }

    #[test]
    fn next_symbol_and_complete() {
        let rule = rule("T a");
        let start = State::start(&rule, 0);
        assert_eq!(start.next_symbol(), Some(&Symbol::new("a")));
        assert!(!start.is_complete());

        let done = start.advance();
        assert_eq!(done.next_symbol(), None);
        assert!(done.is_complete());
        assert_eq!(done.dot(), 1);
        assert_eq!(done.origin(), 0);
    }

    #[test]
    fn advance_keeps_original() {
        let rule = rule("M M m T");
        let state = State::start(&rule, 4);
        let advanced = state.advance();
        assert_eq!(state.dot(), 0);
        assert_eq!(advanced.dot(), 1);
        assert_eq!(advanced.origin(), 4);
    }

    #[test]
    fn equality_is_structural() {
        let left = rule("S a S b S");
        let right = rule("S a S b S");
        assert!(!std::ptr::eq(&left, &right));
        assert_eq!(State::new(&left, 1, 0), State::new(&right, 1, 0));
        assert_ne!(State::new(&left, 1, 0), State::new(&right, 1, 1));
        assert_ne!(State::new(&left, 1, 0), State::new(&right, 2, 0));

        let set: HashSet<_> = [State::new(&left, 1, 0), State::new(&right, 1, 0)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn dot_past_end_panics() {
        let rule = rule("T a");
        let _state = State::new(&rule, 2, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn advance_complete_panics() {
        let rule = rule("T a");
        let _state = State::new(&rule, 1, 0).advance();
    }
}
