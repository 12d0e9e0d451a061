//! Single-question interactive input.

use std::cell::RefCell;
use std::io::{stdin, stdout, BufRead, StdinLock, Stdout, Write};

use thiserror::Error;

/// One question put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub message: String,
    pub required: bool,
}

/// Failure of the input channel itself, as opposed to an invalid answer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("input stream closed")]
    Closed,

    #[error("prompt cancelled")]
    Interrupted,

    #[error("{}", .0)]
    Io(String),
}

impl From<std::io::Error> for PromptError {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::Closed,
            std::io::ErrorKind::Interrupted => Self::Interrupted,
            _ => Self::Io(value.to_string()),
        }
    }
}

pub trait Prompter {
    /// Asks one question. A required question only returns a non-empty answer.
    fn ask(&self, question: &Question) -> Result<String, PromptError>;
}

/// Line-oriented prompter over any reader and writer
pub struct LinePrompter<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

pub type TerminalPrompter = LinePrompter<StdinLock<'static>, Stdout>;

impl TerminalPrompter {
    pub fn stdio() -> Self {
        LinePrompter::new(stdin().lock(), stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn read_answer(&self, message: &str) -> Result<String, PromptError> {
        let mut output = self.output.borrow_mut();
        write!(output, "? {message}: ")?;
        output.flush()?;

        let mut line = String::new();
        if self.input.borrow_mut().read_line(&mut line)? == 0 {
            // Leave the cursor on a fresh line after EOF
            writeln!(output)?;
            return Err(PromptError::Closed);
        }

        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&self, question: &Question) -> Result<String, PromptError> {
        loop {
            let answer = self.read_answer(&question.message)?;

            if !answer.is_empty() || !question.required {
                return Ok(answer);
            }

            let mut output = self.output.borrow_mut();
            writeln!(output, "X Sorry, your reply was invalid: Value is required")?;
        }
    }
}
