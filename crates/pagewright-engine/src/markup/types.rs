use super::span::Span;

/// Which comment syntax a [`Token::Comment`] was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `<!-- body -->`
    Html,
    /// `{/* body */}`
    Embedded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `</name>`
    Close,
    /// `<name ... />`
    SelfClosing,
}

/// An attribute value together with its delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `"..."` or `'...'`
    Quoted { full: Span, inner: Span },
    /// `{...}`
    Expression { full: Span, inner: Span },
    /// Unquoted value, runs to whitespace or `>`.
    Bare(Span),
}

impl AttrValue {
    pub fn full(&self) -> Span {
        match self {
            AttrValue::Quoted { full, .. } | AttrValue::Expression { full, .. } => *full,
            AttrValue::Bare(sp) => *sp,
        }
    }

    /// The value without its delimiters.
    pub fn inner(&self) -> Span {
        match self {
            AttrValue::Quoted { inner, .. } | AttrValue::Expression { inner, .. } => *inner,
            AttrValue::Bare(sp) => *sp,
        }
    }
}

/// One attribute of a tag. A spread (`{...props}`) has `name == full` and no
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub full: Span,
    pub name: Span,
    pub value: Option<AttrValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// From `<` through `>`.
    pub full: Span,
    pub name: Span,
    pub kind: TagKind,
    pub attrs: Vec<Attr>,
}

impl Tag {
    pub fn name<'s>(&self, source: &'s str) -> &'s str {
        self.name.slice(source)
    }

    /// Finds an attribute by exact name, returning its index too.
    pub fn attr(&self, source: &str, name: &str) -> Option<(usize, &Attr)> {
        self.attrs
            .iter()
            .enumerate()
            .find(|(_, a)| a.name.slice(source) == name)
    }

    /// The undelimited value of an attribute, if present and valued.
    pub fn attr_value<'s>(&self, source: &'s str, name: &str) -> Option<&'s str> {
        self.attr(source, name)
            .and_then(|(_, a)| a.value.as_ref())
            .map(|v| v.inner().slice(source))
    }

    /// The span that removes attribute `index` together with the whitespace
    /// separating it from whatever precedes it.
    pub fn attr_removal_span(&self, index: usize) -> Span {
        let start = match index {
            0 => self.name.end,
            i => self.attrs[i - 1].full.end,
        };
        Span::new(start, self.attrs[index].full.end)
    }
}

/// A lexical token. Concatenating the spans of a scan reproduces its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(Span),
    Tag(Tag),
    Comment {
        full: Span,
        inner: Span,
        syntax: CommentSyntax,
    },
    /// A markup-level `{...}` expression (not inside a tag).
    Expression { full: Span, inner: Span },
    /// A `«...»` run.
    Opaque { full: Span, inner: Span },
}

impl Token {
    pub fn span(&self) -> Span {
        match self {
            Token::Text(sp) => *sp,
            Token::Tag(tag) => tag.full,
            Token::Comment { full, .. }
            | Token::Expression { full, .. }
            | Token::Opaque { full, .. } => *full,
        }
    }
}
