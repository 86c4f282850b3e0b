//! Rendering hunks as markup.
use crate::types::{ChangeTag, Hunk};

/// Renders hunks as XML-ish markup.
///
/// Inserted runs are wrapped in `<ins>`, removed runs in `<del>`, unchanged
/// runs are written as they are.  `&`, `<`, `>` and `"` are escaped.
///
/// ```rust
/// use canondiff::render::to_xml;
/// use canondiff::text::diff_words;
///
/// let hunks = diff_words("a <b>", "a <i>");
/// assert_eq!(to_xml(&hunks), "a &lt;<del>b</del><ins>i</ins>&gt;");
/// ```
pub fn to_xml<V: AsRef<str>>(hunks: &[Hunk<V>]) -> String {
    let mut rv = String::new();
    for hunk in hunks {
        let tag = match hunk.tag() {
            ChangeTag::Insert => Some("ins"),
            ChangeTag::Delete => Some("del"),
            ChangeTag::Equal => None,
        };
        if let Some(tag) = tag {
            rv.push('<');
            rv.push_str(tag);
            rv.push('>');
        }
        escape_into(&mut rv, hunk.value().as_ref());
        if let Some(tag) = tag {
            rv.push_str("</");
            rv.push_str(tag);
            rv.push('>');
        }
    }
    rv
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

#[test]
fn test_to_xml() {
    let hunks = vec![
        Hunk::new(ChangeTag::Equal, 1, "a & b ".to_string()),
        Hunk::new(ChangeTag::Delete, 1, "\"c\"".to_string()),
        Hunk::new(ChangeTag::Insert, 1, "d".to_string()),
    ];
    assert_eq!(
        to_xml(&hunks),
        "a &amp; b <del>&quot;c&quot;</del><ins>d</ins>"
    );
}

#[test]
fn test_to_xml_closes_every_run() {
    let hunks = vec![
        Hunk::new(ChangeTag::Insert, 1, "<".to_string()),
        Hunk::new(ChangeTag::Delete, 1, "".to_string()),
        Hunk::new(ChangeTag::Equal, 1, "z".to_string()),
    ];
    assert_eq!(to_xml(&hunks), "<ins>&lt;</ins><del></del>z");
}
