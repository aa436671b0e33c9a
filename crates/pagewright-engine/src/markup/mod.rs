//! # Markup Scanning
//!
//! Cursor-based tokenizer shared by the forward and reverse transforms.
//!
//! ## Architecture
//!
//! The transforms are ordered rewrite passes over strings. Rather than
//! matching tags with regular expressions, each pass scans the current string
//! into [`Token`]s and records span edits in a [`Rewriter`]. Text that no
//! pass touches survives byte-for-byte.
//!
//! ## Modules
//!
//! - **`span`**: `Span` byte ranges
//! - **`cursor`**: `Cursor` for byte-wise scanning with lookahead
//! - **`kinds`**: delimiter-owning types (comments, expressions, opaque runs, elements)
//! - **`types`**: `Token`, `Tag`, `Attr`, `AttrValue`
//! - **`scanner`**: `scan()` main entry point with `try_parse_*` helpers
//! - **`rewrite`**: `Rewriter` span-edit application
//!
//! ## Raw Zones
//!
//! A `{...}` expression is a raw zone: tags, comments and attributes inside it
//! are not tokenized, so `{show && <Testimonials />}` is one expression token.

pub mod cursor;
pub mod kinds;
pub mod rewrite;
pub mod scanner;
pub mod span;
pub mod types;

pub use rewrite::Rewriter;
pub use scanner::{scan, tags};
pub use span::Span;
pub use types::{Attr, AttrValue, CommentSyntax, Tag, TagKind, Token};
