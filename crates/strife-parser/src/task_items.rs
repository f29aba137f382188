//! Recognises task annotations in single-line comments.

/// Splits a line comment into its task tag and text.
///
/// `comment` is the text after `//`. One leading punctuation character is
/// skipped so that `// @todo: text` and `//! HACK text` are recognised. The
/// tag is matched against `tags` ignoring case and returned as written.
pub(crate) fn extract<'c, S: AsRef<str>>(comment: &'c str, tags: &[S]) -> Option<(&'c str, &'c str)> {
    let comment = strip_marker(comment.trim());
    let end = comment
        .find(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .unwrap_or(comment.len());
    let tag = &comment[..end];
    if tag.is_empty() || !tags.iter().any(|t| t.as_ref().eq_ignore_ascii_case(tag)) {
        return None;
    }

    let text = strip_marker(comment[end..].trim());
    Some((tag, text))
}

fn strip_marker(text: &str) -> &str {
    match text.chars().next() {
        Some(c) if c.is_ascii_punctuation() => text[c.len_utf8()..].trim_start(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAGS: [&str; 4] = ["task", "todo", "hack", "undone"];

    #[test]
    fn test_plain_tag() {
        assert_eq!(
            extract(" TODO: spawn the boss", &TAGS),
            Some(("TODO", "spawn the boss"))
        );
    }

    #[test]
    fn test_marker_before_tag() {
        assert_eq!(extract(" @hack - remove later", &TAGS), Some(("hack", "remove later")));
        assert_eq!(extract("/ Undone", &TAGS), Some(("Undone", "")));
    }

    #[test]
    fn test_unknown_or_partial_word() {
        assert_eq!(extract(" todos are fine", &TAGS), None);
        assert_eq!(extract(" note: nothing", &TAGS), None);
        assert_eq!(extract("", &TAGS), None);
    }
}
