/// How an embedded `{...}` expression is carried onto the visual surface.
///
/// This is the single decision point for "can this expression be inlined as
/// text"; swapping the heuristic for a real expression parser only touches
/// [`ExpressionKind::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionKind {
    /// Inlined as its text value. The expression itself is lost.
    Literal(String),
    /// Preserved verbatim inside an opaque run for later restoration.
    Opaque,
}

impl ExpressionKind {
    /// Substrings that mark an expression as more than a plain value:
    /// calls, arrow functions, object literals and ternaries.
    pub const OPAQUE_MARKERS: &'static [&'static str] = &["(", "=>", ":"];

    pub fn classify(body: &str) -> Self {
        if Self::OPAQUE_MARKERS.iter().any(|m| body.contains(m)) {
            ExpressionKind::Opaque
        } else {
            ExpressionKind::Literal(literal_text(body))
        }
    }
}

/// The text a simple expression is inlined as. String literals lose their
/// quotes; anything else is inlined as written.
fn literal_text(body: &str) -> String {
    let trimmed = body.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            if quote == '`' && inner.contains("${") {
                break;
            }
            return inner.to_string();
        }
    }
    trimmed.to_string()
}
