//! Rule substitution ("polishing") of translated Tamil.
//!
//! Machine-translated Tamil tends toward the formal written register.
//! [`PolishRules`] rewrites it toward everyday speech with an ordered table
//! of literal `(from, to)` replacements: the built-in table first, then any
//! user rules persisted as JSON.

pub mod rules;

pub use rules::{builtin_rules, PolishRules, RewriteRule};
