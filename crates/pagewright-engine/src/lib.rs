pub mod dialect;
pub mod io;
pub mod markup;
pub mod session;
pub mod transform;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use dialect::{ComponentRegistry, ComponentSpec, Dialect, ExpressionKind};
pub use io::*;
pub use session::{EditorSession, SaveRequest, ViewMode};
pub use transform::{ReverseOutcome, canonicalize, equivalent, strip_preamble, to_source, to_visual};
