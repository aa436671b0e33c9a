//! # Markup Kinds
//!
//! Types that own the delimiters of each construct the scanner recognizes.
//!
//! ## Types
//!
//! - **`Comment`**: `<!--` / `-->` and the embedded `{/*` / `*/}` forms
//! - **`Expression`**: `{` / `}` with brace nesting
//! - **`OpaqueRun`**: `«` / `»`, the visual-surface form of a kept expression
//! - **`Element`**: tag delimiters and the HTML void element table
//!
//! The scanner and the transform passes refer to these constants; they never
//! hardcode `{/*` or `«` themselves.

pub mod comment;
pub mod element;
pub mod expression;

pub use comment::Comment;
pub use element::Element;
pub use expression::{Expression, OpaqueRun};
