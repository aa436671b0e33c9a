use crate::markup::{Rewriter, TagKind, tags};

use super::Pass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Dialect names to HTML names (`className` → `class`).
    ToHtml,
    /// HTML names back to dialect names (`class` → `className`).
    ToDialect,
}

/// Renames attributes on markup-level tags. Attributes inside expressions
/// are never touched.
pub struct RenameAttributes<'d> {
    renames: &'d [(String, String)],
    direction: Direction,
}

impl<'d> RenameAttributes<'d> {
    pub fn new(renames: &'d [(String, String)], direction: Direction) -> Self {
        Self { renames, direction }
    }

    fn target(&self, name: &str) -> Option<&'d str> {
        self.renames.iter().find_map(|(dialect, html)| match self.direction {
            Direction::ToHtml if dialect == name => Some(html.as_str()),
            Direction::ToDialect if html == name => Some(dialect.as_str()),
            _ => None,
        })
    }
}

impl Pass for RenameAttributes<'_> {
    fn name(&self) -> &'static str {
        match self.direction {
            Direction::ToHtml => "rename-attributes-to-html",
            Direction::ToDialect => "rename-attributes-to-dialect",
        }
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for tag in tags(input).filter(|t| t.kind != TagKind::Close) {
            for attr in &tag.attrs {
                if let Some(target) = self.target(attr.name.slice(input)) {
                    rw.replace(attr.name, target);
                }
            }
        }
        rw.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use pretty_assertions::assert_eq;

    #[test]
    fn renames_in_both_directions() {
        let dialect = Dialect::default();
        let to_html = RenameAttributes::new(&dialect.attribute_renames, Direction::ToHtml);
        let to_dialect = RenameAttributes::new(&dialect.attribute_renames, Direction::ToDialect);

        let source = r#"<label htmlFor="email" className="field">Email</label>"#;
        let html = to_html.apply(source);
        assert_eq!(html, r#"<label for="email" class="field">Email</label>"#);
        assert_eq!(to_dialect.apply(&html), source);
    }

    #[test]
    fn rename_is_idempotent() {
        let dialect = Dialect::default();
        let to_html = RenameAttributes::new(&dialect.attribute_renames, Direction::ToHtml);
        let once = to_html.apply(r#"<h1 className="x">Hi</h1>"#);
        assert_eq!(to_html.apply(&once), once);
    }

    #[test]
    fn text_and_expressions_are_untouched() {
        let dialect = Dialect::default();
        let to_html = RenameAttributes::new(&dialect.attribute_renames, Direction::ToHtml);
        let source = r#"<p>className="x"</p>{items.map(i => <li className="i">{i}</li>)}"#;
        assert_eq!(to_html.apply(source), source);
    }
}
