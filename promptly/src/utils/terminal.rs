//! # Terminal Prompts
//!
//! Utilities for asking the user for input and looping until the answer
//! passes validation or the user types the safe word.
//!
//! A [`Prompt`] owns three things:
//! - a message, printed before every read
//! - a [`LineSource`] (standard input, or any [`BufRead`] in tests)
//! - an output sink for the message and rejection notices
//!
//! ## Example
//! ```rust,no_run
//! use promptly::utils::{OneOf, Prompt};
//!
//! let mut prompt = Prompt::stdin("Barbie or Oppenheimer?").with_safe_word("q");
//! let result = prompt.ask(&OneOf::case_insensitive(["Barbie", "Oppenheimer"]))?;
//!
//! if result.safe_exit {
//!     println!("Bye!");
//! } else if let Some(film) = result.value {
//!     println!("Enjoy {film}");
//! }
//! # Ok::<(), promptly::PromptError>(())
//! ```
use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crate::error::PromptError;
use crate::utils::types::TypedValue;
use crate::utils::validate::{Anything, Between, IsType, OneOf, Pattern, PromptResult, Validate, check};

/// Supplies one line of text per call.
///
/// Implementations strip the trailing line terminator (`\n` or `\r\n`) and
/// return `Ok(None)` once the input is exhausted.
pub trait LineSource {
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Configuration of a [`Prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PromptOptions {
    /// Input that ends the prompt without a valid answer (case-insensitive).
    pub safe_word: Option<String>,
    /// Trim surrounding whitespace before validation.
    pub trim: bool,
    /// Print a notice for every rejected line.
    pub show_rejections: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            safe_word: None,
            trim: false,
            show_rejections: true,
        }
    }
}

/// An interactive question bound to a line source and an output sink.
#[derive(Debug)]
pub struct Prompt<S, W> {
    message: String,
    source: S,
    out: W,
    options: PromptOptions,
}

impl Prompt<StdinLock<'static>, Stdout> {
    /// A prompt reading from standard input and writing to standard output.
    pub fn stdin(message: impl Into<String>) -> Self {
        Prompt::new(message, io::stdin().lock(), io::stdout())
    }
}

impl<S: LineSource, W: Write> Prompt<S, W> {
    pub fn new(message: impl Into<String>, source: S, out: W) -> Self {
        Self {
            message: message.into(),
            source,
            out,
            options: PromptOptions::default(),
        }
    }

    /// Sets custom configuration of the [`Prompt`].
    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_safe_word(mut self, safe_word: impl Into<String>) -> Self {
        self.options.safe_word = Some(safe_word.into());
        self
    }

    pub fn options(&self) -> &PromptOptions {
        &self.options
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prints the message and reads one line, without any validation.
    ///
    /// # Errors
    /// [`PromptError::InputClosed`] at end of input, [`PromptError::Io`] if
    /// writing the message or reading the line fails.
    pub fn ask_text(&mut self) -> Result<String, PromptError> {
        writeln!(self.out, "{}", self.message)?;
        self.out.flush()?;

        let mut line = self.source.next_line()?.ok_or(PromptError::InputClosed)?;
        if self.options.trim {
            line = line.trim().to_string();
        }
        tracing::trace!(line = %line, "line read");
        Ok(line)
    }

    /// Reads a single line and validates it once.
    ///
    /// # Errors
    /// See [`Prompt::ask_text`].
    pub fn ask_once<V>(&mut self, validator: &V) -> Result<PromptResult<V::Output>, PromptError>
    where
        V: Validate + ?Sized,
    {
        let line = self.ask_text()?;
        Ok(check(&line, self.options.safe_word.as_deref(), validator))
    }

    /// Asks until the answer is valid or the safe word is typed.
    ///
    /// Every rejected line produces a notice naming the input, then the
    /// message is printed again. There is no retry limit.
    ///
    /// # Errors
    /// See [`Prompt::ask_text`].
    pub fn ask<V>(&mut self, validator: &V) -> Result<PromptResult<V::Output>, PromptError>
    where
        V: Validate + ?Sized,
    {
        loop {
            let result = self.ask_once(validator)?;

            if result.safe_exit {
                tracing::info!(input = %result.raw_input, "safe word received");
                return Ok(result);
            }
            if result.accepted {
                return Ok(result);
            }

            if self.options.show_rejections {
                match &result.rejection {
                    Some(reason) => writeln!(
                        self.out,
                        "Input '{}' is invalid ({}). Try again",
                        result.raw_input, reason
                    )?,
                    None => writeln!(self.out, "Input '{}' is invalid. Try again", result.raw_input)?,
                }
            }
        }
    }

    /// Loops over [`Prompt::ask_text`] with no validation beyond the safe word.
    pub fn ask_any(&mut self) -> Result<PromptResult<String>, PromptError> {
        self.ask(&Anything)
    }

    /// Loops until the answer is one of `values`.
    pub fn ask_one_of<I, T>(
        &mut self,
        values: I,
        case_sensitive: bool,
    ) -> Result<PromptResult<String>, PromptError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.ask(&OneOf::new(values).with_case_sensitive(case_sensitive))
    }

    /// Loops until the answer matches `pattern`.
    ///
    /// # Errors
    /// [`PromptError::InvalidRegex`] before anything is read if the pattern
    /// does not compile; retrying could never succeed.
    pub fn ask_matching(&mut self, pattern: &str) -> Result<PromptResult<String>, PromptError> {
        let pattern = Pattern::new(pattern)?;
        self.ask(&pattern)
    }

    /// Loops until the answer parses as `T` inside the bounds.
    pub fn ask_between<T>(
        &mut self,
        min: T,
        max: T,
        inclusive: bool,
    ) -> Result<PromptResult<T>, PromptError>
    where
        Between<T>: Validate<Output = T>,
        T: PartialOrd,
    {
        self.ask(&Between::new(min, max, inclusive))
    }

    /// Loops until the answer converts to the type named by `type_name`.
    ///
    /// # Errors
    /// Type-name errors ([`PromptError::BitOutOfRange`],
    /// [`PromptError::BitNotPowerOfTwo`]) are returned before anything is read.
    pub fn ask_typed(&mut self, type_name: &str) -> Result<PromptResult<TypedValue>, PromptError> {
        let is_type = IsType::named(type_name)?;
        self.ask(&is_type)
    }
}
