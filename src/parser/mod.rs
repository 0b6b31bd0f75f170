//! Meal question parser
//!
//! Template-driven phrase matching used by the "get meal by description"
//! intent. Templates are plain data; the matcher, the trimmer and the grammar
//! selector are pure functions over them.

pub mod grammar;
pub mod matcher;
pub mod template;
pub mod trimmer;
pub mod utils;

pub use grammar::{classify, Classification, Direction, Grammar};
pub use matcher::{match_prefix, MatchResult};
pub use template::{Template, TemplateError, TemplateSlot};
pub use trimmer::trim_suffixes;
