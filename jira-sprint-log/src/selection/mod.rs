//! Interactive numbered-menu selection.
//!
//! A [`Selector`] prints a 1-indexed menu to its output stream, reads one line
//! from its input stream and resolves the typed numbers back to items.

mod error;

pub use error::SelectionError;

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::vec;
use tracing::debug;

/// Separator between numbers in a multi-selection answer.
pub const MULTI_SELECT_DELIMITER: char = ',';

/// Prompts for selections over a line-oriented text stream.
pub struct Selector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Selector<R, W> {
    /// Creates a selector reading answers from `input` and writing menus to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Prompts for exactly one of `items`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidSelection`] if the answer is not a
    /// number in `1..=items.len()`, or [`SelectionError::Io`] if the prompt
    /// could not be written or the answer read.
    pub fn select_one<'a, T: Display>(
        &mut self,
        items: &'a [T],
        name: &str,
    ) -> Result<&'a T, SelectionError> {
        let line = self.prompt(items, name)?;
        resolve(items, &line, name)
    }

    /// Prompts for any number of `items`, given as comma separated numbers.
    ///
    /// The answer is read immediately, but tokens are only resolved as the
    /// returned [`MultiSelection`] is iterated. Items are yielded in the order
    /// they were typed; repeated numbers yield the item again.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidSelection`] if the input ended before
    /// an answer was given, or [`SelectionError::Io`] if the prompt could not
    /// be written or the answer read. Invalid numbers surface from the iterator.
    pub fn select_many<'a, T: Display>(
        &mut self,
        items: &'a [T],
        name: &str,
    ) -> Result<MultiSelection<'a, T>, SelectionError> {
        let line = self.prompt(items, name)?;
        // An empty read is end of input; a blank line still reads "\n"
        if line.is_empty() {
            return Err(SelectionError::InvalidSelection {
                name: name.to_string(),
                input: line,
            });
        }

        let tokens: Vec<String> = if line.trim().is_empty() {
            Vec::new()
        } else {
            line.split(MULTI_SELECT_DELIMITER)
                .map(str::to_string)
                .collect()
        };

        Ok(MultiSelection {
            items,
            name: name.to_string(),
            tokens: Some(tokens.into_iter()),
        })
    }

    /// Writes the menu for `items` and reads one line of input.
    fn prompt<T: Display>(&mut self, items: &[T], name: &str) -> Result<String, SelectionError> {
        debug!(name, count = items.len(), "Prompting for selection");
        let io_error = |source: std::io::Error| SelectionError::Io {
            name: name.to_string(),
            source,
        };

        writeln!(self.output, "Available {name}s:").map_err(io_error)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}: {}", i + 1, item).map_err(io_error)?;
        }
        writeln!(self.output, "Choose {name} (insert number and hit return):").map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(io_error)?;
        Ok(line)
    }
}

/// Lazily resolved result of [`Selector::select_many`].
///
/// Yields one item per typed number. The first invalid number is yielded as
/// an error and ends the sequence; items yielded before it stay yielded.
pub struct MultiSelection<'a, T> {
    items: &'a [T],
    name: String,
    tokens: Option<vec::IntoIter<String>>,
}

impl<'a, T> Iterator for MultiSelection<'a, T> {
    type Item = Result<&'a T, SelectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.as_mut()?.next()?;
        let resolved = resolve(self.items, &token, &self.name);
        if resolved.is_err() {
            self.tokens = None;
        }
        Some(resolved)
    }
}

/// Maps a 1-based number typed by the user to the corresponding item.
fn resolve<'a, T>(items: &'a [T], token: &str, name: &str) -> Result<&'a T, SelectionError> {
    let token = token.trim();
    token
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| items.get(index))
        .ok_or_else(|| SelectionError::InvalidSelection {
            name: name.to_string(),
            input: token.to_string(),
        })
}
