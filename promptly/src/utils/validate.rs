//! # Input Validation
//!
//! Validation strategies for a single line of user input. Each strategy
//! implements [`Validate`], turning the raw line into a typed output or a
//! [`Rejection`] describing what went wrong.
//!
//! ## Strategies
//! - [`OneOf`]: the input must be one of a fixed set of strings, optionally
//!   ignoring case.
//! - [`Pattern`]: the input must match a regular expression (substring
//!   search; anchor the pattern for whole-line matching).
//! - [`Between`]: the input must parse as a number inside a range, with
//!   inclusive or exclusive bounds.
//! - [`IsType`]: the input must convert to the type named by a
//!   [`TypeDescriptor`].
//!
//! ## Safe word
//! [`check`] runs a strategy behind the safe-word test: when the input equals
//! the safe word (ignoring case) the strategy is never consulted and the
//! result is a safe exit.
//!
//! ## Example
//! ```rust
//! use promptly::utils::{check, Between, OneOf};
//!
//! let films = OneOf::case_insensitive(["Barbie", "Oppenheimer"]);
//! assert!(check("barbie", Some("q"), &films).accepted);
//! assert!(check("Q", Some("q"), &films).safe_exit);
//!
//! let scale = Between::exclusive(1, 10);
//! assert!(!check("10", None, &scale).accepted);
//! ```
use std::{collections::HashSet, error::Error, fmt::Display, str::FromStr};

use regex::Regex;

use crate::error::PromptError;
use crate::utils::types::{TypeDescriptor, TypedValue};

/// Trait for input validation.
///
/// Any type that implements this can validate a string input and return
/// either the accepted value or a [`Rejection`].
pub trait Validate {
    type Output;

    fn validate(&self, input: &str) -> Result<Self::Output, Rejection>;
}

/// Why a line of input was refused.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    NotOneOf {
        options: Vec<String>,
    },
    NoMatch {
        pattern: String,
    },
    OutOfRange {
        value: String,
        min: String,
        max: String,
        inclusive: bool,
    },
    NotConvertible {
        target: String,
        reason: String,
    },
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOneOf { options } => write!(f, "not one of: {}", options.join(", ")),
            Self::NoMatch { pattern } => write!(f, "does not match {}", pattern),
            Self::OutOfRange {
                value,
                min,
                max,
                inclusive,
            } => {
                let bounds = if *inclusive { "inclusive" } else { "exclusive" };
                write!(f, "{} is not between {} and {} ({})", value, min, max, bounds)
            }
            Self::NotConvertible { target, reason } => {
                write!(f, "not a valid {}: {}", target, reason)
            }
        }
    }
}

impl Error for Rejection {}

/// The outcome of validating one line of input.
///
/// Exactly one of these holds:
/// - `accepted` with `value` set,
/// - `safe_exit` (never `accepted`),
/// - neither, with `rejection` set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromptResult<T> {
    pub accepted: bool,
    pub safe_exit: bool,
    pub raw_input: String,
    pub value: Option<T>,
    pub rejection: Option<Rejection>,
}

impl<T> PromptResult<T> {
    pub fn accepted(raw_input: impl Into<String>, value: T) -> Self {
        Self {
            accepted: true,
            safe_exit: false,
            raw_input: raw_input.into(),
            value: Some(value),
            rejection: None,
        }
    }

    pub fn safe_exit(raw_input: impl Into<String>) -> Self {
        Self {
            accepted: false,
            safe_exit: true,
            raw_input: raw_input.into(),
            value: None,
            rejection: None,
        }
    }

    pub fn rejected(raw_input: impl Into<String>, rejection: Rejection) -> Self {
        Self {
            accepted: false,
            safe_exit: false,
            raw_input: raw_input.into(),
            value: None,
            rejection: Some(rejection),
        }
    }
}

/// Returns `true` if `input` is the safe word, ignoring case.
pub fn is_safe_word(input: &str, safe_word: &str) -> bool {
    input == safe_word || input.to_lowercase() == safe_word.to_lowercase()
}

/// Validates `input` with `validator`, short-circuiting on the safe word.
pub fn check<V>(input: &str, safe_word: Option<&str>, validator: &V) -> PromptResult<V::Output>
where
    V: Validate + ?Sized,
{
    if safe_word.is_some_and(|w| is_safe_word(input, w)) {
        return PromptResult::safe_exit(input);
    }

    match validator.validate(input) {
        Ok(value) => PromptResult::accepted(input, value),
        Err(rejection) => {
            tracing::debug!(input, %rejection, "input rejected");
            PromptResult::rejected(input, rejection)
        }
    }
}

/// Accepts any input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anything;

impl Validate for Anything {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        Ok(input.to_string())
    }
}

/// Membership in a fixed set of strings.
///
/// In case-insensitive mode the accepted value is the lowercased input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOf {
    values: Vec<String>,
    case_sensitive: bool,
}

impl OneOf {
    /// Case-sensitive set.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            case_sensitive: true,
        }
    }

    /// Set that ignores case on both sides of the comparison.
    pub fn case_insensitive<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(values).with_case_sensitive(false)
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

impl Validate for OneOf {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        let found = if self.case_sensitive {
            self.values.iter().any(|v| v == input).then(|| input.to_string())
        } else {
            let lowered = input.to_lowercase();
            let normalized: HashSet<String> =
                self.values.iter().map(|v| v.to_lowercase()).collect();
            normalized.contains(&lowered).then_some(lowered)
        };

        found.ok_or_else(|| Rejection::NotOneOf {
            options: self.values.clone(),
        })
    }
}

/// A compiled regular expression.
///
/// Matching uses substring search: `\d+` accepts `"abc 12"`. Anchor the
/// pattern (`^\d+$`) to require the whole line to match.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    /// [`PromptError::InvalidRegex`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, PromptError> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|source| PromptError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl FromStr for Pattern {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

impl Validate for Pattern {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        if self.regex.is_match(input) {
            Ok(input.to_string())
        } else {
            Err(Rejection::NoMatch {
                pattern: self.regex.as_str().to_string(),
            })
        }
    }
}

/// Numeric range membership.
///
/// The input is parsed as `T` first; any `FromStr + PartialOrd` type works,
/// so `Between<i8>` also rejects values that do not fit in 8 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Between<T> {
    min: T,
    max: T,
    inclusive: bool,
}

impl<T: PartialOrd> Between<T> {
    /// `min <= v <= max`
    pub fn inclusive(min: T, max: T) -> Self {
        Self {
            min,
            max,
            inclusive: true,
        }
    }

    /// `min < v < max`
    pub fn exclusive(min: T, max: T) -> Self {
        Self {
            min,
            max,
            inclusive: false,
        }
    }

    pub fn new(min: T, max: T, inclusive: bool) -> Self {
        Self {
            min,
            max,
            inclusive,
        }
    }

    /// Checks an already converted value against the bounds.
    pub fn contains(&self, value: &T) -> bool {
        if self.inclusive {
            *value >= self.min && *value <= self.max
        } else {
            *value > self.min && *value < self.max
        }
    }
}

impl<T> Validate for Between<T>
where
    T: FromStr + PartialOrd + Display,
    T::Err: Display,
{
    type Output = T;

    fn validate(&self, input: &str) -> Result<T, Rejection> {
        let value = input
            .parse::<T>()
            .map_err(|e| Rejection::NotConvertible {
                target: "number".to_string(),
                reason: e.to_string(),
            })?;

        if self.contains(&value) {
            Ok(value)
        } else {
            Err(Rejection::OutOfRange {
                value: value.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
                inclusive: self.inclusive,
            })
        }
    }
}

/// Conversion to the type named by a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsType(pub TypeDescriptor);

impl IsType {
    /// Parses the type name first.
    ///
    /// # Errors
    /// Any error from [`TypeDescriptor::parse`].
    pub fn named(type_name: &str) -> Result<Self, PromptError> {
        TypeDescriptor::parse(type_name).map(Self)
    }
}

impl Validate for IsType {
    type Output = TypedValue;

    fn validate(&self, input: &str) -> Result<TypedValue, Rejection> {
        self.0.convert(input).map_err(|e| match e {
            PromptError::Conversion { target, reason, .. } => Rejection::NotConvertible {
                target: target.to_string(),
                reason,
            },
            other => Rejection::NotConvertible {
                target: self.0.to_string(),
                reason: other.to_string(),
            },
        })
    }
}
