pub mod types;
pub use types::{TypeDescriptor, TypeKind, TypedValue};

pub mod validate;
pub use validate::{
    Anything, Between, IsType, OneOf, Pattern, PromptResult, Rejection, Validate, check,
    is_safe_word,
};

pub mod terminal;
pub use terminal::{LineSource, Prompt, PromptOptions};
