//! Line-oriented prompts over any reader/writer pair.

use crate::error::{ClassFinderError, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for tables and status messages.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Reads one line; `None` once the input is closed.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks a free-text question. Fails if the input is closed.
    pub fn input(&mut self, message: &str) -> Result<String> {
        write!(self.output, "? {} ", message)?;
        self.read_line()?.ok_or_else(input_closed)
    }

    /// Shows numbered choices and returns the index of the one picked.
    ///
    /// Anything that isn't a listed number is rejected and asked again.
    pub fn select<T: Display>(&mut self, message: &str, choices: &[T]) -> Result<usize> {
        loop {
            writeln!(self.output, "? {}", message)?;
            for (i, choice) in choices.iter().enumerate() {
                writeln!(self.output, "  {}) {}", i + 1, choice)?;
            }
            write!(self.output, "> ")?;

            let answer = self.read_line()?.ok_or_else(input_closed)?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "Not a valid choice")?,
            }
        }
    }

    /// Asks for a 0-based index into a list of `len` items.
    ///
    /// A blank answer (or closed input) returns `None`. An index outside
    /// `0..len` is rejected with "Not a valid index" and asked again.
    pub fn select_index(&mut self, message: &str, len: usize) -> Result<Option<usize>> {
        loop {
            write!(self.output, "? {} ", message)?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(index) if index < len => return Ok(Some(index)),
                _ => writeln!(self.output, "Not a valid index")?,
            }
        }
    }
}

fn input_closed() -> ClassFinderError {
    ClassFinderError::Io {
        message: "input closed".to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{output, scripted};

    #[test]
    fn test_select_reprompts_until_valid() {
        let mut p = scripted(&["0", "abc", "4", "2"]);
        let picked = p.select("Pick one", &["a", "b", "c"]).unwrap();
        assert_eq!(picked, 1);
        assert_eq!(output(&mut p).matches("Not a valid choice").count(), 3);
    }

    #[test]
    fn test_select_index_blank_returns_none() {
        let mut p = scripted(&[""]);
        assert_eq!(p.select_index("Index", 3).unwrap(), None);
    }

    #[test]
    fn test_select_index_rejects_out_of_range() {
        let mut p = scripted(&["3", "-1", "2"]);
        assert_eq!(p.select_index("Index", 3).unwrap(), Some(2));
        assert_eq!(output(&mut p).matches("Not a valid index").count(), 2);
    }

    #[test]
    fn test_closed_input() {
        let mut p = super::Prompter::new(std::io::Cursor::new(Vec::new()), Vec::new());
        assert_eq!(p.select_index("Index", 3).unwrap(), None);
        assert!(p.input("Name").is_err());
        assert!(p.select("Pick", &["a"]).is_err());
    }
}
