//! Line-based interactive prompts.
//!
//! A [`Prompter`] reads answers from any [`BufRead`] and writes questions to
//! any [`Write`], so prompts can be driven from tests. [`Prompter::stdio`]
//! binds it to stdin and stderr.

use std::io::{self, BufRead, Write};

/// Option text that renders as a non-selectable divider in [`Prompter::select`].
pub const SEPARATOR: &str = "----------";

/// Asks questions and reads the answers.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// A prompter on the process's stdin and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Present a numbered list and return the index of the chosen option.
    ///
    /// [`SEPARATOR`] entries are shown but not numbered. Invalid answers
    /// repeat the question.
    pub fn select<S: AsRef<str>>(&mut self, message: &str, options: &[S]) -> io::Result<usize> {
        // Display number -> index into `options`.
        let mut choices = Vec::with_capacity(options.len());

        writeln!(self.writer, "{message}")?;
        for (index, option) in options.iter().enumerate() {
            let option = option.as_ref();
            if option == SEPARATOR {
                writeln!(self.writer, "    {option}")?;
            } else {
                choices.push(index);
                writeln!(self.writer, "{:>3}) {option}", choices.len())?;
            }
        }
        if choices.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "nothing to select"));
        }

        loop {
            write!(self.writer, "Choose 1-{}: ", choices.len())?;
            self.writer.flush()?;
            let answer = self.read_line()?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(choices[n - 1]),
                _ => writeln!(self.writer, "Invalid choice {answer:?}")?,
            }
        }
    }

    /// Ask for free text, repeating until `validate` accepts the answer.
    pub fn input<F>(&mut self, message: &str, validate: F) -> io::Result<String>
    where
        F: Fn(&str) -> Result<(), String>,
    {
        loop {
            write!(self.writer, "{message} ")?;
            self.writer.flush()?;
            let answer = self.read_line()?;
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(reason) => writeln!(self.writer, "{reason}")?,
            }
        }
    }

    /// Read one trimmed line. End of input is an error so callers never loop forever.
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }
}
