use super::span::Span;

/// Collects span replacements against one source string and applies them in
/// a single left-to-right pass.
///
/// Bytes outside every edit are copied verbatim. Edits are applied in start
/// order; an edit that overlaps one already applied is skipped. Empty spans
/// insert, and edits at the same offset keep the order they were added in.
pub struct Rewriter<'a> {
    source: &'a str,
    edits: Vec<(Span, String)>,
}

impl<'a> Rewriter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            edits: vec![],
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn replace(&mut self, span: Span, text: impl Into<String>) {
        self.edits.push((span, text.into()));
    }

    pub fn remove(&mut self, span: Span) {
        self.replace(span, String::new());
    }

    pub fn finish(mut self) -> String {
        if self.edits.is_empty() {
            return self.source.to_string();
        }

        self.edits.sort_by_key(|(span, _)| span.start);
        let mut out = String::with_capacity(self.source.len());
        let mut copied_to = 0;
        for (span, text) in &self.edits {
            if span.start < copied_to {
                log::trace!("skipping overlapping edit at {}..{}", span.start, span.end);
                continue;
            }
            out.push_str(&self.source[copied_to..span.start]);
            out.push_str(text);
            copied_to = span.end;
        }
        out.push_str(&self.source[copied_to..]);
        out
    }
}
