use crate::dialect::{ComponentSpec, Dialect, LinkElement, markers};
use crate::markup::{
    AttrValue, CommentSyntax, Rewriter, Span, Tag, TagKind, Token,
    kinds::{Comment, Element, Expression, OpaqueRun},
    scan, tags,
};

use super::{
    Pass, Pipeline,
    attributes::{Direction, RenameAttributes},
    elements::restore_elements,
    preserve_nonblank,
};

/// The dialect produced by [`to_source`], plus the components that were in
/// the original markup but could not be put back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseOutcome {
    pub source: String,
    /// Names of components whose placeholder was edited or deleted.
    pub dropped: Vec<String>,
}

impl ReverseOutcome {
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Converts edited HTML back into dialect markup.
///
/// `original` is the last known good dialect markup. It is only read, to
/// learn which components the page had before editing.
pub fn to_source(html: &str, original: &str, dialect: &Dialect) -> ReverseOutcome {
    let restored = reverse_pipeline(dialect).apply_passes(html);
    let (restored, dropped) = reinsert_components(&restored, original, dialect);
    ReverseOutcome {
        source: preserve_nonblank("to-source", html, restored),
        dropped,
    }
}

pub fn reverse_pipeline(dialect: &Dialect) -> Pipeline<'_> {
    Pipeline::new("to-source")
        .with(RenameAttributes::new(
            &dialect.attribute_renames,
            Direction::ToDialect,
        ))
        .with(CloseVoidElements)
        .with(RestoreWrappers { dialect })
        .with(RestoreLinks {
            link: &dialect.link,
        })
        .with(CommentsToEmbedded)
        .with(OpaqueToExpressions)
}

pub struct RestoreWrappers<'d> {
    pub dialect: &'d Dialect,
}

impl Pass for RestoreWrappers<'_> {
    fn name(&self) -> &'static str {
        "restore-wrappers"
    }

    fn apply(&self, input: &str) -> String {
        restore_elements(input, |tag, rw| {
            let source = rw.source();
            let (index, attr) = tag.attr(source, markers::WRAPPER)?;
            let namespace = attr.value.as_ref()?.inner().slice(source);
            if !self.dialect.is_wrapper_namespace(namespace) {
                return None;
            }
            let restored = format!("{namespace}.{}", tag.name(source));
            rw.replace(tag.name, restored.clone());
            rw.remove(tag.attr_removal_span(index));
            Some(restored)
        })
    }
}

pub struct RestoreLinks<'d> {
    pub link: &'d LinkElement,
}

impl Pass for RestoreLinks<'_> {
    fn name(&self) -> &'static str {
        "restore-links"
    }

    fn apply(&self, input: &str) -> String {
        restore_elements(input, |tag, rw| {
            let source = rw.source();
            if !tag.name(source).eq_ignore_ascii_case("a") {
                return None;
            }
            let (index, _) = tag.attr(source, markers::LINK)?;
            rw.replace(tag.name, self.link.tag.clone());
            rw.remove(tag.attr_removal_span(index));
            if let Some((_, href)) = tag.attr(source, "href") {
                rw.replace(href.name, self.link.destination.clone());
            }
            Some(self.link.tag.clone())
        })
    }
}

/// `<br>` and `<img src="x">` as a browser serializes them become
/// `<br />` and `<img src="x" />`.
pub struct CloseVoidElements;

impl Pass for CloseVoidElements {
    fn name(&self) -> &'static str {
        "close-void-elements"
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for tag in tags(input) {
            if tag.kind != TagKind::Open || !Element::is_void(tag.name(input)) {
                continue;
            }
            let last = tag.attrs.last().map_or(tag.name.end, |a| a.full.end);
            rw.replace(Span::new(last, tag.full.end), " />");
        }
        rw.finish()
    }
}

pub struct CommentsToEmbedded;

impl Pass for CommentsToEmbedded {
    fn name(&self) -> &'static str {
        "comments-to-embedded"
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for token in scan(input) {
            if let Token::Comment {
                full,
                inner,
                syntax: CommentSyntax::Html,
            } = token
            {
                rw.replace(full, Comment::embedded(inner.slice(input)));
            }
        }
        rw.finish()
    }
}

/// `«body»` in text and `"«body»"` as an attribute value become `{body}`,
/// with entities the surface introduced decoded.
pub struct OpaqueToExpressions;

impl Pass for OpaqueToExpressions {
    fn name(&self) -> &'static str {
        "opaque-to-expressions"
    }

    fn apply(&self, input: &str) -> String {
        let mut rw = Rewriter::new(input);
        for token in scan(input) {
            match token {
                Token::Opaque { full, inner } => {
                    let body = html_escape::decode_html_entities(inner.slice(input));
                    rw.replace(full, Expression::wrap(&body));
                }
                Token::Tag(tag) => {
                    for attr in &tag.attrs {
                        let Some(AttrValue::Quoted { full, inner }) = attr.value else {
                            continue;
                        };
                        if let Some(body) = OpaqueRun::unwrap(inner.slice(input)) {
                            let body = html_escape::decode_html_entities(body);
                            rw.replace(full, Expression::wrap(&body));
                        }
                    }
                }
                _ => {}
            }
        }
        rw.finish()
    }
}

/// Puts back components the original markup had and the restored markup
/// lacks. Returns the patched markup and the names that could not be put
/// back.
fn reinsert_components(
    restored: &str,
    original: &str,
    dialect: &Dialect,
) -> (String, Vec<String>) {
    let mut current = restored.to_string();
    let mut dropped = vec![];

    for spec in dialect.components.iter() {
        if !spec.occurs_in(original) || spec.occurs_in(&current) {
            continue;
        }

        let blocks = placeholder_blocks(&current, spec);
        if !blocks.is_empty() {
            let mut rw = Rewriter::new(&current);
            for block in blocks {
                rw.replace(block, spec.fresh_tag());
            }
            current = rw.finish();
            continue;
        }

        let label = spec.placeholder_text();
        if current.contains(&label) {
            current = current.replace(&label, &spec.fresh_tag());
            continue;
        }

        log::warn!(
            "component <{}> was in the original page but its placeholder is gone; it will be dropped",
            spec.name()
        );
        dropped.push(spec.name().to_string());
    }

    (current, dropped)
}

/// Spans of intact placeholder blocks for `spec`: the marked element, its
/// unedited label and the matching close tag. Styling is not compared, since
/// a browser may re-serialize it.
fn placeholder_blocks(html: &str, spec: &ComponentSpec) -> Vec<Span> {
    let label = spec.placeholder_text();
    let is_block = |open: &Tag, text: Span, close: &Tag| {
        open.kind == TagKind::Open
            && open.attr_value(html, markers::PLACEHOLDER) == Some(spec.name())
            && html_escape::decode_html_entities(text.slice(html)).trim() == label
            && close.kind == TagKind::Close
            && close.name(html).eq_ignore_ascii_case(open.name(html))
    };

    scan(html)
        .windows(3)
        .filter_map(|window| match window {
            [Token::Tag(open), Token::Text(text), Token::Tag(close)]
                if is_block(open, *text, close) =>
            {
                Some(Span::new(open.full.start, close.full.end))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{equivalent, to_visual};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn source(html: &str, original: &str) -> ReverseOutcome {
        to_source(html, original, &Dialect::default())
    }

    fn round_trip(original: &str) -> ReverseOutcome {
        let dialect = Dialect::default();
        to_source(&to_visual(original, &dialect), original, &dialect)
    }

    #[test]
    fn pipeline_order() {
        let dialect = Dialect::default();
        assert_eq!(
            reverse_pipeline(&dialect).pass_names(),
            vec![
                "rename-attributes-to-dialect",
                "close-void-elements",
                "restore-wrappers",
                "restore-links",
                "comments-to-embedded",
                "opaque-to-expressions",
            ]
        );
    }

    #[test]
    fn scenario_placeholder_and_class_restored() {
        let original = r#"<!-- note --><WhyChooseUs /><h1 className="x">Hi</h1>"#;
        let outcome = round_trip(original);
        assert_eq!(
            outcome.source,
            r#"{/* note */}<WhyChooseUs /><h1 className="x">Hi</h1>"#
        );
        assert!(outcome.is_lossless());
    }

    #[test]
    fn untouched_placeholder_restores_component() {
        let original = "<section>\n  <Testimonials />\n</section>";
        let outcome = round_trip(original);
        assert!(outcome.source.contains("<Testimonials />"));
        assert!(equivalent(&outcome.source, original));
    }

    #[test]
    fn placeholder_with_reserialized_style_still_matches() {
        let html = r#"<div data-placeholder="ServicesGrid" style="border: 2px dashed" contenteditable="false">
            [Services Grid Component]
        </div>"#;
        let outcome = source(html, "<ServicesGrid />");
        assert_eq!(outcome.source, "<ServicesGrid />");
    }

    #[test]
    fn bare_label_text_restores_component() {
        let outcome = source("<p>[Call To Action Component]</p>", "<CallToAction />");
        assert_eq!(outcome.source, "<p><CallToAction /></p>");
    }

    #[test]
    fn edited_placeholder_is_reported_as_dropped() {
        let html = r#"<div data-placeholder="Testimonials">[Reviews]</div><p>kept</p>"#;
        let outcome = source(html, "<Testimonials /><p>kept</p>");
        assert_eq!(outcome.dropped, vec!["Testimonials".to_string()]);
        assert!(!outcome.source.contains("<Testimonials"));
    }

    #[test]
    fn components_absent_from_original_are_not_inserted() {
        let outcome = source("<p>[Testimonials Component]</p>", "<p>x</p>");
        assert_eq!(outcome.source, "<p>[Testimonials Component]</p>");
        assert!(outcome.is_lossless());
    }

    #[test]
    fn each_component_is_checked_independently() {
        let original = "<WhyChooseUs /><Testimonials />";
        let html = format!(
            "<WhyChooseUs />{}",
            Dialect::default()
                .components
                .get("Testimonials")
                .map(|c| c.placeholder_html())
                .unwrap_or_default()
        );
        assert_eq!(source(&html, original).source, original);
    }

    #[test]
    fn wrapper_round_trip() {
        let original = r#"<motion.section className="hero" initial={{ opacity: 0 }}><motion.h2>T</motion.h2></motion.section>"#;
        assert_eq!(round_trip(original).source, original);
    }

    #[test]
    fn link_round_trip() {
        let original = r#"<p>Call <Link to="/contact" className="btn">us</Link> today</p>"#;
        assert_eq!(round_trip(original).source, original);
    }

    #[test]
    fn components_named_like_void_elements_keep_their_close_tags() {
        let html = r#"<Source href="x">a</Source><Input name="q"></Input><Link to="/">b</Link>"#;
        assert_eq!(source(html, "").source, html);
    }

    #[test]
    fn wrapped_void_element_is_closed_before_restore() {
        let original = r#"<motion.img src="hero.png" animate={{ scale: 1 }} />"#;
        let html = to_visual(original, &Dialect::default()).replace(" />", ">");
        assert_eq!(source(&html, original).source, original);
    }

    #[test]
    fn unknown_wrapper_namespace_is_left_alone() {
        let html = r#"<div data-wrapper="spring">x</div>"#;
        assert_eq!(source(html, "").source, html);
    }

    #[test]
    fn complex_expressions_survive() {
        let original = r#"<ul>{items.map(x => x)}</ul><button onClick={() => go(a > b)}>Go</button>"#;
        assert_eq!(round_trip(original).source, original);
    }

    #[test]
    fn simple_expression_is_inlined_for_good() {
        assert_eq!(round_trip("<h1>{title}</h1>").source, "<h1>title</h1>");
    }

    #[test]
    fn browser_serialized_void_elements_are_closed() {
        assert_snapshot!(
            source(r#"<p>a<br>b<img src="i.png" alt="x"></p><hr/>"#, "").source,
            @r#"<p>a<br />b<img src="i.png" alt="x" /></p><hr/>"#
        );
    }

    #[test]
    fn entities_in_opaque_runs_are_decoded() {
        assert_eq!(
            source("<p>«a &amp;&amp; b»</p>", "").source,
            "<p>{a && b}</p>"
        );
    }

    #[test]
    fn page_that_is_only_a_placeholder() {
        let html = "<div data-placeholder=\"WhyChooseUs\">[Why Choose Us Component]</div>";
        let outcome = source(html, "<WhyChooseUs />");
        assert_eq!(outcome.source, "<WhyChooseUs />");
        assert_eq!(source("", "").source, "");
    }
}
