/// The input being recognized, already split into the tokens terminals are compared with.
#[derive(Clone)]
pub(crate) struct Input<'input> {
    tokens: Vec<&'input str>,
}

impl<'input> Input<'input> {
    /// Every character of `word` is one token
    pub fn from_chars(word: &'input str) -> Self {
        let tokens = word
            .char_indices()
            .filter_map(|(idx, c)| word.get(idx..idx + c.len_utf8()))
            .collect();
        Self { tokens }
    }

    pub fn from_tokens<T: AsRef<str>>(tokens: &'input [T]) -> Self {
        let tokens = tokens.iter().map(|token| token.as_ref()).collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Token at input position `idx`
    pub fn get(&self, idx: usize) -> Option<&'input str> {
        self.tokens.get(idx).copied()
    }
}

/// A clear view of [`Input`], in the format `Input("a|p|b")`
impl std::fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Input(\"{}\")", self.tokens.join("|"))
    }
}
