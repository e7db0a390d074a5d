#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reader for word lists: one word per line, trimmed and upper-cased. Blank lines
//! are skipped and repeated words are kept once, at their first position.

use crate::crossword::error::CrosswordError;
use crate::csp::dictionary::Dictionary;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses a word list from `reader`.
///
/// # Errors
///
/// `CrosswordError::Io` if reading fails, `CrosswordError::EmptyWordList` if no
/// line holds a word.
pub fn parse_words<R: BufRead>(reader: R) -> Result<Dictionary, CrosswordError> {
    let mut dictionary = Dictionary::new();
    let mut lines = 0;

    for line in reader.lines() {
        let line = line?;
        lines += 1;
        let word = line.trim();
        if !word.is_empty() {
            dictionary.insert(word.to_uppercase());
        }
    }

    if dictionary.is_empty() {
        return Err(CrosswordError::EmptyWordList);
    }

    debug!("read {} distinct words from {lines} lines", dictionary.len());
    Ok(dictionary)
}

/// Parses the word list at `path`.
///
/// # Errors
///
/// See `parse_words`; also fails if the file cannot be opened.
pub fn parse_words_file(path: impl AsRef<Path>) -> Result<Dictionary, CrosswordError> {
    let file = File::open(path)?;
    parse_words(BufReader::new(file))
}
