use once_cell::sync::Lazy;
use regex::Regex;

use crate::dialect::Dialect;
use crate::markup::{Tag, TagKind, Token, scan};

/// Tag fragments that leak ahead of the markup: `<>`, `</>`, a dangling
/// `/>` or `>`, and stray closing tags.
static LEAKED_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:<>|</>|/>|>|</[A-Za-z][\w.]*\s*>)").unwrap());

/// Elements that can open a page body.
const LAYOUT_ELEMENTS: &[&str] = &[
    "div", "section", "main", "article", "header", "footer", "nav", "aside", "p",
];

/// Recovers the markup from content prefixed with leaked UI text.
///
/// Known literal prefixes and tag fragments are removed from the front, then
/// everything before the first construct that can open a page body is cut.
/// When no such construct exists the input is returned unchanged.
pub fn strip_preamble(input: &str, dialect: &Dialect) -> String {
    let rest = strip_leaked_prefixes(input, &dialect.leaked_prefixes);
    match first_opening_construct(rest, dialect) {
        Some(at) => {
            let stripped = &rest[at..];
            if stripped.len() != input.len() {
                log::debug!("stripped {} bytes of preamble", input.len() - stripped.len());
            }
            stripped.to_string()
        }
        None => {
            if !input.trim().is_empty() {
                log::debug!("no opening construct found; keeping content as is");
            }
            input.to_string()
        }
    }
}

fn strip_leaked_prefixes<'s>(mut s: &'s str, prefixes: &[String]) -> &'s str {
    loop {
        s = s.trim_start();
        let literal = prefixes
            .iter()
            .filter(|p| !p.is_empty())
            .find_map(|p| s.strip_prefix(p.as_str()));
        if let Some(rest) = literal {
            s = rest;
        } else if let Some(m) = LEAKED_FRAGMENT.find(s) {
            s = &s[m.end()..];
        } else {
            return s;
        }
    }
}

/// Byte offset of the first comment or body-opening tag.
fn first_opening_construct(s: &str, dialect: &Dialect) -> Option<usize> {
    scan(s).into_iter().find_map(|token| match token {
        Token::Comment { full, .. } => Some(full.start),
        Token::Tag(tag) if opens_body(s, &tag, dialect) => Some(tag.full.start),
        _ => None,
    })
}

fn opens_body(s: &str, tag: &Tag, dialect: &Dialect) -> bool {
    if tag.kind == TagKind::Close {
        return false;
    }
    let name = tag.name(s);
    LAYOUT_ELEMENTS.contains(&name)
        || is_heading(name)
        || dialect.wrapper_parts(name).is_some()
        || dialect.components.get(name).is_some()
}

fn is_heading(name: &str) -> bool {
    matches!(name.as_bytes(), [b'h', b'1'..=b'6'])
}
