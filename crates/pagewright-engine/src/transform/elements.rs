use crate::markup::{Rewriter, Tag, TagKind, kinds::Element, tags};

/// Walks the tags of `html` with an open-element stack so that a restored
/// opening tag also gets its matching closing tag renamed.
///
/// `restore` is called for every opening and self-closing tag. It records
/// whatever edits it wants on the opening tag and returns the name the
/// matching closing tag should get, if any. A closing tag pops back to the
/// nearest open element with the same name, which tolerates the unclosed
/// elements browsers sometimes serialize.
pub fn restore_elements(
    html: &str,
    mut restore: impl FnMut(&Tag, &mut Rewriter<'_>) -> Option<String>,
) -> String {
    let mut rw = Rewriter::new(html);
    let mut stack: Vec<(String, Option<String>)> = vec![];

    for tag in tags(html) {
        let name = tag.name(html);
        match tag.kind {
            TagKind::SelfClosing => {
                restore(&tag, &mut rw);
            }
            TagKind::Open => {
                let restored = restore(&tag, &mut rw);
                if !Element::is_void(name) {
                    stack.push((name.to_ascii_lowercase(), restored));
                }
            }
            TagKind::Close => {
                let Some(index) = stack
                    .iter()
                    .rposition(|(open, _)| open.eq_ignore_ascii_case(name))
                else {
                    continue;
                };
                let (_, restored) = stack.swap_remove(index);
                stack.truncate(index);
                if let Some(restored) = restored {
                    rw.replace(tag.name, restored);
                }
            }
        }
    }

    rw.finish()
}
