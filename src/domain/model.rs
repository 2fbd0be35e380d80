use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Lowercased word with its characters sorted; equal for anagrams and only for anagrams.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub(crate) fn from_sorted(sorted: String) -> Self {
        Self(sorted)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Words sharing one key, in the order they were seen. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnagramClass {
    words: Vec<String>,
}

impl AnagramClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, word: String) {
        self.words.push(word);
    }

    pub fn extend(&mut self, other: AnagramClass) {
        self.words.extend(other.words);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// 以單一空白串接，保留插入順序
    pub fn to_line(&self) -> String {
        self.words.join(" ")
    }
}

impl From<Vec<String>> for AnagramClass {
    fn from(words: Vec<String>) -> Self {
        Self { words }
    }
}

/// Canonical key → class. Iteration follows key order, which keeps reducer output reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping {
    classes: BTreeMap<CanonicalKey, AnagramClass>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn class_mut(&mut self, key: CanonicalKey) -> &mut AnagramClass {
        self.classes.entry(key).or_default()
    }

    /// Moves every class of `other` into `self`, appending after existing words on key collision.
    pub fn absorb(&mut self, other: Grouping) {
        for (key, class) in other.classes {
            match self.classes.entry(key) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(class);
                }
                btree_map::Entry::Occupied(mut slot) => slot.get_mut().extend(class),
            }
        }
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<&AnagramClass> {
        self.classes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalKey, &AnagramClass)> {
        self.classes.iter()
    }

    pub fn classes(&self) -> impl Iterator<Item = &AnagramClass> {
        self.classes.values()
    }

    /// Number of classes, singletons included.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.classes.values().map(AnagramClass::len).sum()
    }

    pub fn multi_member_classes(&self) -> usize {
        self.classes.values().filter(|c| c.len() > 1).count()
    }
}

impl IntoIterator for Grouping {
    type Item = (CanonicalKey, AnagramClass);
    type IntoIter = btree_map::IntoIter<CanonicalKey, AnagramClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.into_iter()
    }
}

/// Outcome of the extract phase, handed to the reducer.
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    pub grouping: Grouping,
    pub sources_read: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReduceResult {
    pub lines: Vec<String>,
    pub classes_seen: usize,
    pub words_seen: usize,
}
