//! # Content Transforms
//!
//! The forward transform (dialect → editable HTML), the reverse transform
//! (editable HTML → dialect) and the preamble stripper.
//!
//! ## Ordered Passes
//!
//! Each direction is a [`Pipeline`] of [`Pass`]es run in a fixed order; later
//! passes see the text earlier passes produced. Every pass is total: input it
//! does not recognize passes through unchanged.
//!
//! ## Safety Valve
//!
//! One policy for all transforms: a result that is blank while its input was
//! not is discarded and the input returned instead. Content is never emptied
//! by a transform.
//!
//! ## Modules
//!
//! - **`forward`**: `to_visual()` and its passes
//! - **`reverse`**: `to_source()`, its passes and component reinsertion
//! - **`attributes`**: the attribute rename pass shared by both directions
//! - **`elements`**: open-element stack used to restore closing tags
//! - **`preamble`**: `strip_preamble()` recovery heuristic
//! - **`equivalence`**: markup comparison modulo attribute order and whitespace

pub mod attributes;
pub mod elements;
pub mod equivalence;
pub mod forward;
pub mod preamble;
pub mod reverse;

pub use equivalence::{canonicalize, equivalent};
pub use forward::to_visual;
pub use preamble::strip_preamble;
pub use reverse::{ReverseOutcome, to_source};

/// One ordered rewrite step.
pub trait Pass {
    fn name(&self) -> &'static str;
    fn apply(&self, input: &str) -> String;
}

/// An ordered list of passes.
pub struct Pipeline<'a> {
    label: &'static str,
    passes: Vec<Box<dyn Pass + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            passes: vec![],
        }
    }

    pub fn with(mut self, pass: impl Pass + 'a) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Runs every pass in order without the safety valve.
    pub fn apply_passes(&self, input: &str) -> String {
        let mut current = input.to_string();
        for pass in &self.passes {
            let next = pass.apply(&current);
            if next != current {
                log::trace!(
                    "{}: pass `{}` rewrote {} -> {} bytes",
                    self.label,
                    pass.name(),
                    current.len(),
                    next.len()
                );
            }
            current = next;
        }
        current
    }

    /// Runs every pass in order, then applies the safety valve.
    pub fn run(&self, input: &str) -> String {
        preserve_nonblank(self.label, input, self.apply_passes(input))
    }
}

/// Returns `output`, unless it is blank while `input` was not.
pub(crate) fn preserve_nonblank(label: &str, input: &str, output: String) -> String {
    if output.trim().is_empty() && !input.trim().is_empty() {
        log::warn!("{label}: transform produced blank output; keeping the input unchanged");
        return input.to_string();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Pass for Upper {
        fn name(&self) -> &'static str {
            "upper"
        }

        fn apply(&self, input: &str) -> String {
            input.to_uppercase()
        }
    }

    struct Erase;

    impl Pass for Erase {
        fn name(&self) -> &'static str {
            "erase"
        }

        fn apply(&self, _input: &str) -> String {
            String::new()
        }
    }

    #[test]
    fn passes_run_in_order() {
        let pipeline = Pipeline::new("test").with(Upper).with(Erase);
        assert_eq!(pipeline.pass_names(), vec!["upper", "erase"]);
        assert_eq!(pipeline.apply_passes("abc"), "");
    }

    #[test]
    fn blank_result_falls_back_to_input() {
        let pipeline = Pipeline::new("test").with(Erase);
        assert_eq!(pipeline.run("<p>keep</p>"), "<p>keep</p>");
    }

    #[test]
    fn blank_input_may_stay_blank() {
        let pipeline = Pipeline::new("test").with(Erase);
        assert_eq!(pipeline.run("   "), "");
    }
}
