#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Text rendering of a filled (or partly filled) grid.

use crate::crossword::error::CrosswordError;
use crate::csp::assignment::{Assignment, LetterGrid};
use crate::csp::dictionary::Dictionary;
use crate::csp::puzzle::Puzzle;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Drawn in place of blocked cells.
pub const BLOCKED_CELL: char = '█';

/// A grid ready to be printed: one line per row, letters in open cells (a space if
/// no word covers the cell yet) and `█` in blocked ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView<'a> {
    puzzle: &'a Puzzle,
    letters: LetterGrid,
}

impl<'a> GridView<'a> {
    /// Lays out `assignment` on `puzzle`.
    #[must_use]
    pub fn new(puzzle: &'a Puzzle, dictionary: &Dictionary, assignment: &Assignment) -> Self {
        Self {
            puzzle,
            letters: assignment.letter_grid(puzzle, dictionary),
        }
    }

    /// The letters behind the view.
    #[must_use]
    pub fn letters(&self) -> &LetterGrid {
        &self.letters
    }
}

impl Display for GridView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (row, letters) in self.letters.iter().enumerate() {
            for (col, letter) in letters.iter().enumerate() {
                let cell = if self.puzzle.is_open(row, col) {
                    letter.unwrap_or(' ')
                } else {
                    BLOCKED_CELL
                };
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Writes the rendering of `view` to `path`.
///
/// # Errors
///
/// `CrosswordError::Io` if the file cannot be written.
pub fn save_grid(path: impl AsRef<Path>, view: &GridView<'_>) -> Result<(), CrosswordError> {
    std::fs::write(path, view.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossing() -> (Puzzle, Dictionary) {
        let puzzle = Puzzle::from_rows(&[
            vec![true, true, true],
            vec![false, false, true],
            vec![false, false, true],
        ]);
        let dictionary = ["CAT", "TEA"].into_iter().collect();
        (puzzle, dictionary)
    }

    #[test]
    fn test_render_complete() {
        let (puzzle, dictionary) = crossing();
        let mut assignment = Assignment::new(2);
        assignment.bind(0, 0);
        assignment.bind(1, 1);

        let view = GridView::new(&puzzle, &dictionary, &assignment);
        assert_eq!(view.to_string(), "CAT\n██E\n██A\n");
    }

    #[test]
    fn test_render_partial() {
        let (puzzle, dictionary) = crossing();
        let mut assignment = Assignment::new(2);
        assignment.bind(0, 0);

        let view = GridView::new(&puzzle, &dictionary, &assignment);
        assert_eq!(view.to_string(), "CAT\n██ \n██ \n");
        assert_eq!(view.letters()[1][2], None);
    }

    #[test]
    fn test_save_grid() {
        let (puzzle, dictionary) = crossing();
        let mut assignment = Assignment::new(2);
        assignment.bind(0, 0);
        assignment.bind(1, 1);
        let view = GridView::new(&puzzle, &dictionary, &assignment);

        let path = std::env::temp_dir().join(format!("crossword-grid-{}.txt", std::process::id()));
        save_grid(&path, &view).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, view.to_string());
    }
}
