#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Promptly
//!
//! A small Rust library for building interactive CLI prompts: read a line,
//! validate it, and ask again until the answer is valid or the user takes
//! the safe exit.
//!
//! ## Features
//!
//! - **Fixed-set validation** - accept one of a list of answers, with or without case
//! - **Pattern validation** - accept answers matching a regular expression
//! - **Range validation** - numeric bounds, inclusive or exclusive
//! - **Typed conversion** - convert answers using type names like `int8`, `uint32`, `float64`
//! - **Safe word** - a sentinel answer that leaves any prompt without valid data
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! promptly = "0.1"
//! promptly = { version = "0.1", features = ["serde"] }
//! ```
//!
//! ## Usage Examples
//!
//! ### Pick from a list
//!
//! ```rust,no_run
//! use promptly::utils::Prompt;
//!
//! let answer = Prompt::stdin("Barbie or Oppenheimer?")
//!     .with_safe_word("q")
//!     .ask_one_of(["Barbie", "Oppenheimer"], false)?;
//!
//! if answer.safe_exit {
//!     return Ok(());
//! }
//! println!("You picked: {}", answer.raw_input);
//! # Ok::<(), promptly::PromptError>(())
//! ```
//!
//! ### Range validation
//!
//! ```rust,no_run
//! use promptly::utils::Prompt;
//!
//! let threads = Prompt::stdin("Worker threads (1-16):").ask_between(1u8, 16u8, true)?;
//! println!("Threads: {:?}", threads.value);
//! # Ok::<(), promptly::PromptError>(())
//! ```
//!
//! ### Typed conversion
//!
//! ```rust,no_run
//! use promptly::utils::{Prompt, TypedValue};
//!
//! let port = Prompt::stdin("Port:").ask_typed("uint16")?;
//! if let Some(TypedValue::U16(p)) = port.value {
//!     println!("Listening on {p}");
//! }
//! # Ok::<(), promptly::PromptError>(())
//! ```
//!
//! ### Validating without a terminal
//!
//! Every strategy can be used directly on a string:
//!
//! ```rust
//! use promptly::utils::{check, Pattern};
//!
//! let digits = Pattern::new(r"^\d{1,3}$").unwrap();
//! assert!(check("28", Some("q"), &digits).accepted);
//! assert!(check("Q", Some("q"), &digits).safe_exit);
//! ```
//!
//! ## Architecture
//!
//! - **`utils::types`** - type-name parsing and typed conversion
//! - **`utils::validate`** - validation strategies and the safe-word check
//! - **`utils::terminal`** - line sources and the retry loop
//! - **`error`** - [`PromptError`]
//!
//! ## Error Handling
//!
//! Invalid answers are not errors; the loop reports them and asks again.
//! [`PromptError`] covers setup defects (bad type names, bad regexes), a
//! closed input stream and I/O failures:
//!
//! ```rust,no_run
//! use promptly::{PromptError, utils::Prompt};
//!
//! match Prompt::stdin("Name:").ask_matching("[a-z") {
//!     Ok(res) => println!("{}", res.raw_input),
//!     Err(PromptError::InvalidRegex { pattern, .. }) => eprintln!("fix your regex: {pattern}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Feature flags
//!
//! - `serde` - `Serialize`/`Deserialize` for [`utils::PromptOptions`],
//!   [`utils::PromptResult`] and [`utils::TypedValue`]

pub mod error;
pub use error::PromptError;

pub mod utils;
