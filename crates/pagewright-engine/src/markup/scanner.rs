use super::{
    cursor::Cursor,
    kinds::{Comment, Element, Expression, OpaqueRun},
    span::Span,
    types::{Attr, AttrValue, CommentSyntax, Tag, TagKind, Token},
};

/// Splits markup into [`Token`]s.
///
/// Works on both sides of the transform: dialect source and the HTML a
/// contenteditable host serializes. Constructs are tried in precedence order
/// (comments, expressions, opaque runs, tags); anything that does not close
/// falls back to text, so scanning is total.
pub fn scan(s: &str) -> Vec<Token> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<Token>, start: usize, end: usize) {
        if end > start {
            out.push(Token::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        let start = cur.pos();
        let token = if let Some(t) = try_parse_comment(&mut cur) {
            Some(t)
        } else if let Some(t) = try_parse_expression(&mut cur) {
            Some(t)
        } else if let Some(t) = try_parse_opaque(&mut cur) {
            Some(t)
        } else {
            try_parse_tag(&mut cur).map(Token::Tag)
        };

        match token {
            Some(t) => {
                flush_text(&mut out, text_start, start);
                text_start = cur.pos();
                out.push(t);
            }
            None => {
                cur.bump();
            }
        }
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

/// Convenience: only the tags of a scan.
pub fn tags(s: &str) -> impl Iterator<Item = Tag> {
    scan(s).into_iter().filter_map(|t| match t {
        Token::Tag(tag) => Some(tag),
        _ => None,
    })
}

fn try_parse_comment(cur: &mut Cursor<'_>) -> Option<Token> {
    let (open, close, syntax): (&[u8], &[u8], _) = if cur.starts_with(Comment::HTML_OPEN) {
        (Comment::HTML_OPEN, Comment::HTML_CLOSE, CommentSyntax::Html)
    } else if cur.starts_with(Comment::EMBEDDED_OPEN) {
        (
            Comment::EMBEDDED_OPEN,
            Comment::EMBEDDED_CLOSE,
            CommentSyntax::Embedded,
        )
    } else {
        return None;
    };

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(open.len());
    let inner_start = cur.pos();
    if !cur.seek(close) {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump_n(close.len());

    Some(Token::Comment {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
        syntax,
    })
}

fn try_parse_expression(cur: &mut Cursor<'_>) -> Option<Token> {
    let (full, inner) = balanced_braces(cur)?;
    Some(Token::Expression { full, inner })
}

/// Consumes a brace-balanced `{...}` group. Restores the cursor and returns
/// `None` when the group never closes.
fn balanced_braces(cur: &mut Cursor<'_>) -> Option<(Span, Span)> {
    if cur.peek() != Some(Expression::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    let mut depth = 0usize;
    while let Some(b) = cur.bump() {
        match b {
            Expression::OPEN => depth += 1,
            Expression::CLOSE => {
                depth -= 1;
                if depth == 0 {
                    let end = cur.pos();
                    return Some((Span::new(start, end), Span::new(start + 1, end - 1)));
                }
            }
            _ => {}
        }
    }

    *cur = saved;
    None
}

fn try_parse_opaque(cur: &mut Cursor<'_>) -> Option<Token> {
    let open = OpaqueRun::OPEN.as_bytes();
    let close = OpaqueRun::CLOSE.as_bytes();
    if !cur.starts_with(open) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(open.len());
    let inner_start = cur.pos();
    if !cur.seek(close) {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump_n(close.len());

    Some(Token::Opaque {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
    })
}

/// Attempts to parse an opening, closing or self-closing tag.
///
/// On failure the cursor is restored and the `<` is left to be text.
fn try_parse_tag(cur: &mut Cursor<'_>) -> Option<Tag> {
    if cur.peek() != Some(Element::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let tag = match cur.peek_at(1) {
        Some(Element::SLASH) if cur.peek_at(2).is_some_and(Element::is_name_start) => {
            parse_close_tag(cur)
        }
        Some(b) if Element::is_name_start(b) => parse_open_tag(cur),
        _ => None,
    };

    if tag.is_none() {
        *cur = saved;
    }
    tag
}

fn parse_close_tag(cur: &mut Cursor<'_>) -> Option<Tag> {
    let start = cur.pos();
    cur.bump_n(2); // </
    let name = parse_name(cur);
    cur.skip_whitespace();
    if cur.bump() != Some(Element::CLOSE) {
        return None;
    }

    Some(Tag {
        full: Span::new(start, cur.pos()),
        name,
        kind: TagKind::Close,
        attrs: vec![],
    })
}

fn parse_open_tag(cur: &mut Cursor<'_>) -> Option<Tag> {
    let start = cur.pos();
    cur.bump(); // <
    let name = parse_name(cur);
    let mut attrs = vec![];

    let kind = loop {
        cur.skip_whitespace();
        match cur.peek()? {
            Element::CLOSE => {
                cur.bump();
                break TagKind::Open;
            }
            Element::SLASH if cur.peek_at(1) == Some(Element::CLOSE) => {
                cur.bump_n(2);
                break TagKind::SelfClosing;
            }
            Expression::OPEN => {
                let (full, _) = balanced_braces(cur)?;
                attrs.push(Attr {
                    full,
                    name: full,
                    value: None,
                });
            }
            _ => attrs.push(parse_attr(cur)?),
        }
    };

    Some(Tag {
        full: Span::new(start, cur.pos()),
        name,
        kind,
        attrs,
    })
}

fn parse_name(cur: &mut Cursor<'_>) -> Span {
    let start = cur.pos();
    cur.eat_while(Element::is_name_byte);
    Span::new(start, cur.pos())
}

fn parse_attr(cur: &mut Cursor<'_>) -> Option<Attr> {
    let start = cur.pos();
    cur.eat_while(|b| {
        !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/' | b'<' | b'"' | b'\'' | b'{')
    });
    let name = Span::new(start, cur.pos());
    if name.is_empty() {
        return None;
    }

    let name_end = cur.pos();
    cur.skip_whitespace();
    if cur.peek() != Some(b'=') {
        // Boolean attribute; leave the whitespace for the tag loop.
        cur.i = name_end;
        return Some(Attr {
            full: name,
            name,
            value: None,
        });
    }
    cur.bump(); // =
    cur.skip_whitespace();

    let value = match cur.peek()? {
        quote @ (b'"' | b'\'') => {
            let value_start = cur.pos();
            cur.bump();
            let inner_start = cur.pos();
            if !cur.seek(&[quote]) {
                return None;
            }
            let inner_end = cur.pos();
            cur.bump();
            AttrValue::Quoted {
                full: Span::new(value_start, cur.pos()),
                inner: Span::new(inner_start, inner_end),
            }
        }
        Expression::OPEN => {
            let (full, inner) = balanced_braces(cur)?;
            AttrValue::Expression { full, inner }
        }
        _ => {
            let value_start = cur.pos();
            cur.eat_while(|b| !b.is_ascii_whitespace() && b != Element::CLOSE);
            AttrValue::Bare(Span::new(value_start, cur.pos()))
        }
    };

    Some(Attr {
        full: Span::new(start, value.full().end),
        name,
        value: Some(value),
    })
}
