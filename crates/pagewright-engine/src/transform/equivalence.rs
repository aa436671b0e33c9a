use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup::{Attr, AttrValue, Tag, TagKind, Token, scan};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normal form for comparing markup modulo attribute order and whitespace.
///
/// Tags are rewritten with their attributes sorted and double-quoted, runs of
/// whitespace collapse to one space, and whitespace around tokens is dropped.
/// Inline spacing is therefore ignored too: `Call <b>` and `Call<b>` are
/// equivalent, so this is not a byte-exact comparison.
pub fn canonicalize(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for token in scan(markup) {
        match token {
            Token::Tag(tag) => out.push_str(&canonical_tag(markup, &tag)),
            other => {
                let text = other.span().slice(markup).trim();
                out.push_str(&WHITESPACE.replace_all(text, " "));
            }
        }
    }
    out
}

/// True if both inputs have the same [`canonicalize`]d form.
pub fn equivalent(a: &str, b: &str) -> bool {
    canonicalize(a) == canonicalize(b)
}

fn canonical_tag(source: &str, tag: &Tag) -> String {
    let name = tag.name(source);
    if tag.kind == TagKind::Close {
        return format!("</{name}>");
    }

    let mut attrs: Vec<String> = tag.attrs.iter().map(|a| canonical_attr(source, a)).collect();
    attrs.sort();

    let mut out = format!("<{name}");
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr);
    }
    out.push_str(if tag.kind == TagKind::SelfClosing { " />" } else { ">" });
    out
}

fn canonical_attr(source: &str, attr: &Attr) -> String {
    let name = attr.name.slice(source);
    match &attr.value {
        None => name.to_string(),
        Some(AttrValue::Expression { full, .. }) => {
            format!("{name}={}", WHITESPACE.replace_all(full.slice(source), " "))
        }
        Some(value @ (AttrValue::Quoted { .. } | AttrValue::Bare(_))) => {
            format!("{name}=\"{}\"", value.inner().slice(source))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(r#"<h1 id="a" className="x">Hi</h1>"#, r#"<h1 className='x' id="a">Hi</h1>"#)]
    #[case("<section>\n  <p>Body   text</p>\n</section>", "<section><p>Body text</p></section>")]
    #[case("<br/>", "<br />")]
    #[case("<div hidden>x</div>", "<div  hidden >x</div>")]
    #[case("<p>Call <b>us</b></p>", "<p>Call<b>us</b></p>")]
    fn equivalent_markup(#[case] a: &str, #[case] b: &str) {
        assert!(equivalent(a, b), "{} != {}", canonicalize(a), canonicalize(b));
    }

    #[rstest]
    #[case("<p>one</p>", "<p>two</p>")]
    #[case(r#"<p class="a">x</p>"#, r#"<p className="a">x</p>"#)]
    #[case("<p>a b</p>", "<p>ab</p>")]
    #[case("<Testimonials />", "<p>[Testimonials Component]</p>")]
    fn different_markup(#[case] a: &str, #[case] b: &str) {
        assert!(!equivalent(a, b));
    }

    #[test]
    fn canonical_form() {
        assert_eq!(
            canonicalize("<motion.div  z={1}\n a='b'>\n  {items.map(i => i)}\n</motion.div>"),
            r#"<motion.div a="b" z={1}>{items.map(i => i)}</motion.div>"#
        );
    }
}
