use super::state::State;
use crate::HashSet;
use std::collections::VecDeque;
use std::fmt;

/// The states valid at one input position.
///
/// A state is inserted at most once ever: re-inserting a state that was
/// already seen, even one already taken out for processing, is a no-op.
#[derive(Debug, Default)]
pub struct Column<'gram> {
    seen: HashSet<State<'gram>>,
    /// every state ever inserted, in insertion order
    states: Vec<State<'gram>>,
    pending: VecDeque<State<'gram>>,
}

impl<'gram> Column<'gram> {
    /// Add `state` unless it was ever inserted before. Returns whether it was new.
    pub fn insert(&mut self, state: State<'gram>) -> bool {
        let is_new = self.seen.insert(state);
        if is_new {
            self.states.push(state);
            self.pending.push_back(state);
        }
        is_new
    }

    /// Take the next state which has not been processed yet
    pub fn take_unprocessed(&mut self) -> Option<State<'gram>> {
        self.pending.pop_front()
    }

    /// Was `state` ever inserted, processed or not
    #[must_use]
    pub fn contains(&self, state: &State<'gram>) -> bool {
        self.seen.contains(state)
    }

    /// Every state ever inserted, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &State<'gram>> {
        self.states.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// One [`Column`] per input position, from before the first token to after the last
#[derive(Debug, Default)]
pub struct Chart<'gram> {
    columns: Vec<Column<'gram>>,
}

impl<'gram> Chart<'gram> {
    /// Chart for an input of `input_len` tokens, which has `input_len + 1` columns
    pub(crate) fn new(input_len: usize) -> Self {
        let columns = (0..=input_len).map(|_| Column::default()).collect();
        Self { columns }
    }

    /// Insert into the column at `idx`. Returns whether the state was new.
    pub(crate) fn insert(&mut self, idx: usize, state: State<'gram>) -> bool {
        self.columns
            .get_mut(idx)
            .is_some_and(|column| column.insert(state))
    }

    pub(crate) fn take_unprocessed(&mut self, idx: usize) -> Option<State<'gram>> {
        self.columns
            .get_mut(idx)
            .and_then(Column::take_unprocessed)
    }

    #[must_use]
    pub fn column(&self, idx: usize) -> Option<&Column<'gram>> {
        self.columns.get(idx)
    }

    pub fn columns_iter(&self) -> impl Iterator<Item = &Column<'gram>> {
        self.columns.iter()
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Total number of distinct states across all columns
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }
}

/// Lists every column as `"<idx> :"` followed by its states, one per line,
/// and two blank lines before the next column
impl fmt::Display for Chart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, column) in self.columns.iter().enumerate() {
            writeln!(f, "{idx} :")?;
            for state in column.iter() {
                writeln!(f, "{state}")?;
            }
            writeln!(f, "\n")?;
        }
        Ok(())
    }
}
