#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Candidate words.
//!
//! Words are interned in a `Dictionary` and referred to by `WordId` everywhere else
//! in the solver, so domains and assignments stay plain vectors of integers and word
//! equality is integer equality.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// Index of a word inside a `Dictionary`.
pub type WordId = usize;

/// A candidate word and its letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    letters: SmallVec<[char; 16]>,
}

impl Word {
    /// Creates a word from its text. No normalisation is applied.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let letters = text.chars().collect();
        Self { text, letters }
    }

    /// Number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether the word has no letters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The letter at `offset`, if the word is long enough.
    #[must_use]
    pub fn letter(&self, offset: usize) -> Option<char> {
        self.letters.get(offset).copied()
    }

    /// The word's letters.
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// The word's text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// An insertion-ordered set of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<Word>,
    index: FxHashMap<String, WordId>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word, returning its id. Inserting a word that is already present
    /// returns the existing id.
    pub fn insert(&mut self, text: impl Into<String>) -> WordId {
        let text = text.into();
        if let Some(&id) = self.index.get(&text) {
            return id;
        }
        let id = self.words.len();
        self.index.insert(text.clone(), id);
        self.words.push(Word::new(text));
        id
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word with the given id, if any.
    #[must_use]
    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.get(id)
    }

    /// The id of `text`, if it is in the dictionary.
    #[must_use]
    pub fn id_of(&self, text: &str) -> Option<WordId> {
        self.index.get(text).copied()
    }

    /// The letter of word `id` at `offset`.
    #[must_use]
    pub fn letter(&self, id: WordId, offset: usize) -> Option<char> {
        self.words[id].letter(offset)
    }

    /// All word ids, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = WordId> + use<> {
        0..self.words.len()
    }

    /// All words, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}

impl Index<WordId> for Dictionary {
    type Output = Word;

    fn index(&self, index: WordId) -> &Self::Output {
        &self.words[index]
    }
}

impl<S: Into<String>> FromIterator<S> for Dictionary {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut dictionary = Self::new();
        for word in iter {
            dictionary.insert(word);
        }
        dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_letters() {
        let word = Word::new("CAT");
        assert_eq!(word.len(), 3);
        assert_eq!(word.letter(0), Some('C'));
        assert_eq!(word.letter(2), Some('T'));
        assert_eq!(word.letter(3), None);
        assert_eq!(word.letters(), &['C', 'A', 'T']);
    }

    #[test]
    fn test_word_length_counts_chars() {
        let word = Word::new("ÉTÉ");
        assert_eq!(word.len(), 3);
        assert_eq!(word.letter(0), Some('É'));
    }

    #[test]
    fn test_insert_dedups() {
        let mut dictionary = Dictionary::new();
        let cat = dictionary.insert("CAT");
        let dog = dictionary.insert("DOG");
        assert_eq!(dictionary.insert("CAT"), cat);
        assert_ne!(cat, dog);
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.id_of("DOG"), Some(dog));
        assert_eq!(dictionary.id_of("COW"), None);
    }

    #[test]
    fn test_from_iter_keeps_insertion_order() {
        let dictionary: Dictionary = ["TEA", "ATE", "TEA", "EAT"].into_iter().collect();
        let words: Vec<_> = dictionary.iter().map(Word::as_str).collect();
        assert_eq!(words, vec!["TEA", "ATE", "EAT"]);
        assert_eq!(dictionary.ids().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(dictionary[1].as_str(), "ATE");
        assert_eq!(dictionary.letter(2, 1), Some('A'));
    }
}
