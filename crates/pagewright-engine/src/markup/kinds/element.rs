/// Tag delimiters and element classification.
pub struct Element;

impl Element {
    pub const OPEN: u8 = b'<';
    pub const CLOSE: u8 = b'>';
    pub const SLASH: u8 = b'/';

    /// HTML elements that never have content or a closing tag. Browsers
    /// serialize these in lowercase; capitalized names are components.
    pub const VOID: &'static [&'static str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ];

    pub fn is_void(name: &str) -> bool {
        Self::VOID.contains(&name)
    }

    /// First byte of a tag name.
    pub fn is_name_start(b: u8) -> bool {
        b.is_ascii_alphabetic()
    }

    /// Tag names may be dotted (`motion.div`) or namespaced (`svg:rect`).
    pub fn is_name_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_' | b':')
    }
}
