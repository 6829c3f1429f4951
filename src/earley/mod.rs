mod chart;
mod input;
mod state;

pub use chart::{Chart, Column};
pub use state::State;

use crate::{Grammar, Symbol, tracing};
use input::Input;

/// Recognizes words against one [`Grammar`], keeping the chart of the last word for inspection.
///
/// # Example
///
/// ```rust
/// use earley_recognizer::{Grammar, Recognizer};
///
/// let grammar = Grammar::from_rules(["S S p M", "S M", "M M m T", "M T", "T a", "T b"])?;
/// let mut recognizer = Recognizer::new(&grammar);
///
/// assert!(recognizer.recognize("apbma"));
/// assert!(!recognizer.recognize("apmb"));
///
/// // the chart of the last word, one column per input position
/// assert_eq!(recognizer.chart().len(), 5);
/// assert!(std::ptr::eq(recognizer.grammar(), &grammar));
/// # Ok::<(), earley_recognizer::Error>(())
/// ```
#[derive(Debug)]
pub struct Recognizer<'gram> {
    grammar: &'gram Grammar,
    chart: Chart<'gram>,
}

impl<'gram> Recognizer<'gram> {
    #[must_use]
    pub fn new(grammar: &'gram Grammar) -> Self {
        Self {
            grammar,
            chart: Chart::default(),
        }
    }

    /// Recognize `word`, one terminal per character. An empty `word` is the empty string.
    pub fn recognize(&mut self, word: &str) -> bool {
        self.run(&Input::from_chars(word))
    }

    /// Recognize a sequence of pre-split tokens, one terminal per token
    pub fn recognize_tokens<T: AsRef<str>>(&mut self, tokens: &[T]) -> bool {
        self.run(&Input::from_tokens(tokens))
    }

    /// The chart built by the last recognition. Empty before the first one.
    #[must_use]
    pub const fn chart(&self) -> &Chart<'gram> {
        &self.chart
    }

    /// The grammar every word is recognized against
    #[must_use]
    pub const fn grammar(&self) -> &'gram Grammar {
        self.grammar
    }

    fn run(&mut self, input: &Input<'_>) -> bool {
        let _span = tracing::span!(tracing::Level::DEBUG, "Recognizer::run").entered();
        self.chart = earley(self.grammar, input);
        let accepted = is_accepted(self.grammar, &self.chart, input);
        tracing::event!(tracing::Level::DEBUG, "{input:?} accepted: {accepted}");
        accepted
    }
}

/// Fill a chart for `input`, column by column, following the core
/// [Earley parsing](https://en.wikipedia.org/wiki/Earley_parser) algorithm.
///
/// Each column is drained to a fixed point before moving on: only scanning
/// adds states to a later column, so later work can never add to an earlier one.
fn earley<'gram>(grammar: &'gram Grammar, input: &Input<'_>) -> Chart<'gram> {
    let _span = tracing::span!(tracing::Level::DEBUG, "earley").entered();
    let mut chart = Chart::new(input.len());
    chart.insert(0, State::start(grammar.augmenting_rule(), 0));

    for idx in 0..chart.len() {
        let _span = tracing::span!(tracing::Level::DEBUG, "column", idx).entered();

        while let Some(state) = chart.take_unprocessed(idx) {
            tracing::event!(tracing::Level::TRACE, "column {idx} pop: {state}");

            match state.next_symbol() {
                Some(terminal @ Symbol::Terminal(_)) => {
                    scan(&mut chart, state, terminal, idx, input);
                }
                Some(nonterminal @ Symbol::Nonterminal(_)) => {
                    predict(&mut chart, grammar, state, nonterminal, idx);
                }
                None => complete(&mut chart, state, idx),
            }
        }
    }

    chart
}

/// Accept if the augmenting rule spans the whole input, starting at position 0
fn is_accepted(grammar: &Grammar, chart: &Chart<'_>, input: &Input<'_>) -> bool {
    let accepting = State::new(grammar.augmenting_rule(), 1, 0);
    chart
        .column(input.len())
        .is_some_and(|column| column.contains(&accepting))
}

fn scan<'gram>(
    chart: &mut Chart<'gram>,
    state: State<'gram>,
    terminal: &Symbol,
    idx: usize,
    input: &Input<'_>,
) {
    let _span = tracing::span!(tracing::Level::TRACE, "Scan").entered();

    if terminal.is_epsilon() {
        let scanned = state.advance();
        tracing::event!(tracing::Level::TRACE, "scanned epsilon: {scanned}");
        chart.insert(idx, scanned);
    } else if input.get(idx).is_some_and(|token| terminal.matches(token)) {
        let scanned = state.advance();
        tracing::event!(tracing::Level::TRACE, "scanned: {scanned}");
        chart.insert(idx + 1, scanned);
    }
}

fn predict<'gram>(
    chart: &mut Chart<'gram>,
    grammar: &'gram Grammar,
    state: State<'gram>,
    nonterminal: &Symbol,
    idx: usize,
) {
    let _span = tracing::span!(tracing::Level::TRACE, "Predict").entered();

    for rule in grammar.rules_with_lhs(nonterminal) {
        let predicted = State::start(rule, idx);
        tracing::event!(tracing::Level::TRACE, "predicted: {predicted}");
        chart.insert(idx, predicted);
    }

    // a nullable nonterminal may have completed in this column before `state` was added
    let completed_empty = chart.column(idx).is_some_and(|column| {
        column.iter().any(|done| {
            done.is_complete() && done.origin() == idx && done.rule().lhs() == nonterminal
        })
    });

    if completed_empty {
        let prior_completed = state.advance();
        tracing::event!(tracing::Level::TRACE, "prior_completed: {prior_completed}");
        chart.insert(idx, prior_completed);
    }
}

fn complete<'gram>(chart: &mut Chart<'gram>, state: State<'gram>, idx: usize) {
    let _span = tracing::span!(tracing::Level::TRACE, "Complete").entered();
    let lhs = state.rule().lhs();

    let completed: Vec<_> = chart
        .column(state.origin())
        .into_iter()
        .flat_map(Column::iter)
        .filter(|waiting| waiting.next_symbol() == Some(lhs))
        .map(State::advance)
        .collect();

    for completed in completed {
        tracing::event!(tracing::Level::TRACE, "completed: {completed}");
        chart.insert(idx, completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

    fn grammar(rules: &[&str]) -> Grammar {
        Grammar::from_rules(rules).unwrap()
    }

    #[test]
    fn seeds_augmenting_state() {
        let grammar = grammar(&["T a"]);
        let mut recognizer = Recognizer::new(&grammar);
        recognizer.recognize("");

        let first = recognizer.chart().column(0).and_then(|c| c.iter().next());
        assert_eq!(
            first.map(ToString::to_string),
            Some(String::from("main -> * T (0)"))
        );
    }

    #[test]
    fn chart_is_replaced_per_word() {
        let grammar = grammar(&["S a S b S", "S"]);
        let mut recognizer = Recognizer::new(&grammar);
        assert!(recognizer.chart().is_empty());

        assert!(recognizer.recognize("aabb"));
        assert_eq!(recognizer.chart().len(), 5);

        assert!(recognizer.recognize(""));
        assert_eq!(recognizer.chart().len(), 1);
    }

    #[test]
    fn epsilon_rule_stays_in_column() {
        let grammar = grammar(&["S"]);
        let mut recognizer = Recognizer::new(&grammar);
        assert!(recognizer.recognize(""));
        assert!(!recognizer.recognize("epsilon"));
        assert!(!recognizer.recognize("e"));
    }

    #[test]
    fn explicit_epsilon_symbol() {
        let grammar = grammar(&["S a epsilon b"]);
        assert!(grammar.recognize("ab"));
        assert!(!grammar.recognize("a"));
    }

    #[test]
    fn nullable_completed_before_waiting_state() {
        // `A` completes empty in column 0 before `S -> A * A` waits for the second `A`
        let grammar = grammar(&["S A A x", "A"]);
        assert!(grammar.recognize("x"));
        assert!(!grammar.recognize(""));
    }

    #[test]
    fn nested_nullables() {
        let grammar = grammar(&["S A B C", "A B", "B C", "C", "C c"]);
        assert!(grammar.recognize(""));
        assert!(grammar.recognize("c"));
        assert!(grammar.recognize("ccc"));
        assert!(!grammar.recognize("cccc"));
    }

    #[test]
    fn left_recursion_terminates() {
        let grammar = grammar(&["S S a", "S a"]);
        assert!(grammar.recognize("aaaa"));
        assert!(!grammar.recognize(""));
    }

    #[test]
    fn unit_cycle_terminates() {
        let grammar = grammar(&["A B", "B A", "A z"]);
        assert!(grammar.recognize("z"));
        assert!(!grammar.recognize("zz"));
    }

    #[test]
    fn undefined_nonterminal_never_matches() {
        let grammar = grammar(&["S a Q", "S b"]);
        assert!(grammar.recognize("b"));
        assert!(!grammar.recognize("a"));
    }

    #[test]
    fn start_symbol_is_first_lhs() {
        let grammar = grammar(&["T a", "S b"]);
        assert!(grammar.recognize("a"));
        assert!(!grammar.recognize("b"));
    }

    #[test]
    fn tokens_match_whole_terminal_names() {
        let grammar = grammar(&["E E plus N", "E N", "N num"]);
        assert!(grammar.recognize_tokens(&["num", "plus", "num"]));
        assert!(!grammar.recognize_tokens(&["num", "plus"]));
        assert!(!grammar.recognize("numplusnum"));
    }

    #[test]
    fn acceptance_needs_whole_input() {
        let grammar = grammar(&["S a"]);
        let mut recognizer = Recognizer::new(&grammar);
        assert!(!recognizer.recognize("aa"));

        let accepting = State::new(grammar.augmenting_rule(), 1, 0);
        let chart = recognizer.chart();
        assert!(chart.column(1).is_some_and(|c| c.contains(&accepting)));
        assert!(!chart.column(2).is_some_and(|c| c.contains(&accepting)));
    }

    #[test]
    fn duplicate_rules_collapse() {
        let single = grammar(&["S a S", "S b"]);
        let doubled = grammar(&["S a S", "S a S", "S b"]);
        let mut single_recognizer = Recognizer::new(&single);
        let mut doubled_recognizer = Recognizer::new(&doubled);

        assert!(single_recognizer.recognize("aab"));
        assert!(doubled_recognizer.recognize("aab"));
        assert_eq!(
            single_recognizer.chart().state_count(),
            doubled_recognizer.chart().state_count()
        );
    }

    #[test]
    fn dump_for_balanced_grammar() {
        let grammar = grammar(&["S a S b S", "S"]);
        let mut recognizer = Recognizer::new(&grammar);
        assert!(recognizer.recognize("ab"));
        insta::assert_snapshot!(recognizer.chart().to_string().trim_end(), @r"
        0 :
        main -> * S (0)
        S -> * a S b S (0)
        S -> * epsilon (0)
        S -> epsilon * (0)
        main -> S * (0)


        1 :
        S -> a * S b S (0)
        S -> * a S b S (1)
        S -> * epsilon (1)
        S -> epsilon * (1)
        S -> a S * b S (0)


        2 :
        S -> a S b * S (0)
        S -> * a S b S (2)
        S -> * epsilon (2)
        S -> epsilon * (2)
        S -> a S b S * (0)
        main -> S * (0)
        ");
    }

    /// Grammar over rules drawn from a small fixed pool, so words over `a`/`b` have a chance to match
    #[derive(Debug, Clone)]
    struct PoolGrammar(Vec<&'static str>);

    impl Arbitrary for PoolGrammar {
        fn arbitrary(g: &mut Gen) -> Self {
            let pool = [
                "S A B", "S a", "S", "A a A", "A", "A S b", "B b", "B B B", "B", "S S S",
            ];
            let count = 1 + usize::arbitrary(g) % 6;
            let rules = (0..count).map(|_| *g.choose(&pool).unwrap()).collect();
            PoolGrammar(rules)
        }
    }

    #[derive(Debug, Clone)]
    struct Word(String);

    impl Arbitrary for Word {
        fn arbitrary(g: &mut Gen) -> Self {
            let len = usize::arbitrary(g) % 8;
            Word((0..len).map(|_| *g.choose(&['a', 'b']).unwrap()).collect())
        }
    }

    fn prop_deterministic(grammar: PoolGrammar, word: Word) -> TestResult {
        let grammar = Grammar::from_rules(&grammar.0).unwrap();
        let mut recognizer = Recognizer::new(&grammar);
        let first = recognizer.recognize(&word.0);
        let first_dump = recognizer.chart().to_string();
        let second = recognizer.recognize(&word.0);
        let second_dump = recognizer.chart().to_string();
        TestResult::from_bool(
            first == second && first == grammar.recognize(&word.0) && first_dump == second_dump,
        )
    }

    #[test]
    fn deterministic() {
        QuickCheck::new()
            .tests(300)
            .quickcheck(prop_deterministic as fn(PoolGrammar, Word) -> TestResult)
    }

    fn prop_state_count_bounded(grammar: PoolGrammar, word: Word) -> TestResult {
        let grammar = Grammar::from_rules(&grammar.0).unwrap();
        let mut recognizer = Recognizer::new(&grammar);
        recognizer.recognize(&word.0);

        // every rule, including the augmenting one, at every dot position and origin
        let rules = grammar.len() + 1;
        let max_len = grammar.rules_iter().map(crate::Rule::len).max().unwrap_or(1);
        let columns = word.0.len() + 1;
        let bound = rules * (max_len + 1) * columns * columns;

        TestResult::from_bool(recognizer.chart().state_count() <= bound)
    }

    #[test]
    fn state_count_bounded() {
        QuickCheck::new()
            .tests(300)
            .quickcheck(prop_state_count_bounded as fn(PoolGrammar, Word) -> TestResult)
    }

    fn prop_reinsert_is_noop(grammar: PoolGrammar, word: Word) -> TestResult {
        let grammar = Grammar::from_rules(&grammar.0).unwrap();
        let input = Input::from_chars(&word.0);
        let mut chart = earley(&grammar, &input);
        let before = chart.to_string();

        let states: Vec<(usize, State<'_>)> = chart
            .columns_iter()
            .enumerate()
            .flat_map(|(idx, column)| column.iter().map(move |state| (idx, *state)))
            .collect();
        let any_new = states
            .into_iter()
            .any(|(idx, state)| chart.insert(idx, state));

        TestResult::from_bool(!any_new && chart.to_string() == before)
    }

    #[test]
    fn reinsert_is_noop() {
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop_reinsert_is_noop as fn(PoolGrammar, Word) -> TestResult)
    }
}
