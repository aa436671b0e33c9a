/// Embedded expression delimiters. Braces nest.
pub struct Expression;

impl Expression {
    pub const OPEN: u8 = b'{';
    pub const CLOSE: u8 = b'}';

    pub fn wrap(body: &str) -> String {
        format!("{{{body}}}")
    }
}

/// Delimiters of an opaque run: an expression carried through the visual
/// surface untouched. Chosen because they never appear in page markup.
pub struct OpaqueRun;

impl OpaqueRun {
    pub const OPEN: &'static str = "«";
    pub const CLOSE: &'static str = "»";

    pub fn wrap(body: &str) -> String {
        format!("{}{body}{}", Self::OPEN, Self::CLOSE)
    }

    /// Returns the body if `s` is exactly one opaque run.
    pub fn unwrap(s: &str) -> Option<&str> {
        s.strip_prefix(Self::OPEN)?.strip_suffix(Self::CLOSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_wrap_and_unwrap() {
        let run = OpaqueRun::wrap("items.map(x)");
        assert_eq!(run, "«items.map(x)»");
        assert_eq!(OpaqueRun::unwrap(&run), Some("items.map(x)"));
        assert_eq!(OpaqueRun::unwrap("items"), None);
    }

    #[test]
    fn expression_wrap() {
        assert_eq!(Expression::wrap("{ opacity: 0 }"), "{{ opacity: 0 }}");
    }
}
