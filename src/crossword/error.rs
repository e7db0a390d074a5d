#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use std::io;
use std::path::PathBuf;

/// Errors raised while loading, solving in batch or saving crosswords.
#[derive(thiserror::Error, Debug)]
pub enum CrosswordError {
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The structure file has no rows.
    #[error("structure has no rows")]
    EmptyStructure,
    /// The word list has no words.
    #[error("word list has no words")]
    EmptyWordList,
    /// A batch was pointed at something that is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// A returned assignment was incomplete or inconsistent.
    #[error("solution failed verification: {0}")]
    VerificationFailed(String),
}
