//! HTML views.
//!
//! Pages are rendered with plain `format!` templates; every value that comes
//! from a request or the database goes through [`escape`] or [`path_segment`].

mod persons;

pub use persons::{add_form, edit_form, person_list, procedures};

/// Wrap page content in the shared layout.
pub fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/persons">Persons</a> | <a href="/persons/add">Add</a> | <a href="/persons/procedures">Procedures</a></nav>
<h1>{title}</h1>
{content}
</body>
</html>
"#,
        title = escape(title),
        content = content,
    )
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a value for use as a single URL path segment.
pub fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralises_markup() {
        assert_eq!(
            escape(r#"<b title="x">Tom & 'Jerry'</b>"#),
            "&lt;b title=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn path_segment_encodes_separators() {
        assert_eq!(path_segment("a/b c"), "a%2Fb%20c");
    }
}
