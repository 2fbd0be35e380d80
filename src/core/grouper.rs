use crate::core::key::canonical_key;
use crate::domain::model::Grouping;
use crate::domain::ports::LineSource;
use crate::utils::error::Result;

/// Accumulates words from a single source into anagram classes.
#[derive(Debug, Default)]
pub struct Grouper {
    grouping: Grouping,
    words: usize,
}

impl Grouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `word`, casing untouched, to the class of its canonical key.
    pub fn handle_word(&mut self, word: impl Into<String>) {
        let word = word.into();
        let key = canonical_key(&word);
        self.grouping.class_mut(key).push(word);
        self.words += 1;
    }

    pub fn words_handled(&self) -> usize {
        self.words
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    pub fn into_grouping(self) -> Grouping {
        self.grouping
    }
}

/// Reads `source` to exhaustion and groups every line.
///
/// The first read error stops the pass and is returned as is; nothing is retried.
pub fn group_source<S: LineSource + ?Sized>(source: &S) -> Result<Grouping> {
    let mut grouper = Grouper::new();
    for line in source.open()? {
        grouper.handle_word(line?);
    }

    tracing::debug!(
        "📖 {}: {} words in {} classes",
        source.name(),
        grouper.words_handled(),
        grouper.grouping().len()
    );
    Ok(grouper.into_grouping())
}
