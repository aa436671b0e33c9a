use crate::dialect::{
    ComponentRegistry, Dialect, ExpressionKind, LinkElement, markers,
};
use crate::markup::{
    AttrValue, CommentSyntax, Rewriter, TagKind, Token,
    kinds::{Comment, OpaqueRun},
    scan, tags,
};

use super::{
    Pass, Pipeline,
    attributes::{Direction, RenameAttributes},
};

/// Converts dialect markup into HTML a contenteditable surface can host.
///
/// Passes, in order:
/// 1. embedded comments become HTML comments
/// 2. opaque components become labeled placeholder blocks (lossy)
/// 3. wrapper elements become plain elements marked with their namespace
/// 4. typed links become anchors marked as links
/// 5. dialect attribute names become HTML names
/// 6. expressions become opaque runs or are inlined as text (lossy)
pub fn to_visual(source: &str, dialect: &Dialect) -> String {
    forward_pipeline(dialect).run(source)
}

pub fn forward_pipeline(dialect: &Dialect) -> Pipeline<'_> {
    Pipeline::new("to-visual")
        .with(CommentsToHtml)
        .with(ComponentsToPlaceholders {
            components: &dialect.components,
        })
        .with(UnwrapWrappers { dialect })
        .with(LinksToAnchors {
            link: &dialect.link,
        })
        .with(RenameAttributes::new(
            &dialect.attribute_renames,
            Direction::ToHtml,
        ))
        .with(ExpressionsToVisual)
}

pub struct CommentsToHtml;

impl Pass for CommentsToHtml {
    fn name(&self) -> &'static str {
        "comments-to-html"
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for token in scan(input) {
            if let Token::Comment {
                full,
                inner,
                syntax: CommentSyntax::Embedded,
            } = token
            {
                rw.replace(full, Comment::html(inner.slice(input)));
            }
        }
        rw.finish()
    }
}

pub struct ComponentsToPlaceholders<'d> {
    pub components: &'d ComponentRegistry,
}

impl Pass for ComponentsToPlaceholders<'_> {
    fn name(&self) -> &'static str {
        "components-to-placeholders"
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for tag in tags(input).filter(|t| t.kind == TagKind::SelfClosing) {
            if let Some(spec) = self.components.get(tag.name(input)) {
                rw.replace(tag.full, spec.placeholder_html());
            }
        }
        rw.finish()
    }
}

pub struct UnwrapWrappers<'d> {
    pub dialect: &'d Dialect,
}

impl Pass for UnwrapWrappers<'_> {
    fn name(&self) -> &'static str {
        "unwrap-wrappers"
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for tag in tags(input) {
            let Some((namespace, base)) = self.dialect.wrapper_parts(tag.name(input)) else {
                continue;
            };
            let replacement = match tag.kind {
                TagKind::Close => base.to_string(),
                TagKind::Open | TagKind::SelfClosing => {
                    format!(r#"{base} {}="{namespace}""#, markers::WRAPPER)
                }
            };
            rw.replace(tag.name, replacement);
        }
        rw.finish()
    }
}

pub struct LinksToAnchors<'d> {
    pub link: &'d LinkElement,
}

impl Pass for LinksToAnchors<'_> {
    fn name(&self) -> &'static str {
        "links-to-anchors"
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for tag in tags(input).filter(|t| t.name(input) == self.link.tag) {
            if tag.kind == TagKind::Close {
                rw.replace(tag.name, "a");
                continue;
            }
            rw.replace(
                tag.name,
                format!(r#"a {}="{}""#, markers::LINK, self.link.tag),
            );
            if let Some((_, dest)) = tag.attr(input, &self.link.destination) {
                rw.replace(dest.name, "href");
            }
        }
        rw.finish()
    }
}

/// Replaces `{...}` expressions according to [`ExpressionKind::classify`].
///
/// In text position an opaque expression becomes `«body»`; as an attribute
/// value it becomes `"«body»"`. Literal expressions are inlined as text or a
/// quoted attribute value. Bodies are escaped for their position.
pub struct ExpressionsToVisual;

impl Pass for ExpressionsToVisual {
    fn name(&self) -> &'static str {
        "expressions-to-visual"
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for token in scan(input) {
            match token {
                Token::Expression { full, inner } => {
                    let body = inner.slice(input);
                    let text = match ExpressionKind::classify(body) {
                        ExpressionKind::Opaque => {
                            OpaqueRun::wrap(&html_escape::encode_text(body))
                        }
                        ExpressionKind::Literal(text) => {
                            encode_braces(&html_escape::encode_text(&text))
                        }
                    };
                    rw.replace(full, text);
                }
                Token::Tag(tag) => {
                    for attr in &tag.attrs {
                        let Some(AttrValue::Expression { full, inner }) = attr.value else {
                            continue;
                        };
                        let body = inner.slice(input);
                        let value = match ExpressionKind::classify(body) {
                            ExpressionKind::Opaque => OpaqueRun::wrap(
                                &html_escape::encode_double_quoted_attribute(body),
                            ),
                            ExpressionKind::Literal(text) => encode_braces(
                                &html_escape::encode_double_quoted_attribute(&text),
                            ),
                        };
                        rw.replace(full, format!("\"{value}\""));
                    }
                }
                _ => {}
            }
        }
        rw.finish()
    }
}

/// Inlined text must not read as an expression when the forward transform
/// runs again.
fn encode_braces(text: &str) -> String {
    text.replace('{', "&#123;").replace('}', "&#125;")
}
