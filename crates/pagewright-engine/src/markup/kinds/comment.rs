/// Comment delimiters for both sides of the transform.
pub struct Comment;

impl Comment {
    pub const HTML_OPEN: &'static [u8; 4] = b"<!--";
    pub const HTML_CLOSE: &'static [u8; 3] = b"-->";
    pub const EMBEDDED_OPEN: &'static [u8; 3] = b"{/*";
    pub const EMBEDDED_CLOSE: &'static [u8; 3] = b"*/}";

    pub fn html(body: &str) -> String {
        format!("<!--{body}-->")
    }

    pub fn embedded(body: &str) -> String {
        format!("{{/*{body}*/}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_verbatim() {
        assert_eq!(Comment::html(" note "), "<!-- note -->");
        assert_eq!(Comment::embedded(" note "), "{/* note */}");
    }
}
