//! Documentation comments of the form `/** ... */`.
//!
//! Untagged text is the summary. A line starting with `@tag` switches the
//! section that following text belongs to:
//!
//! | Tag                        | Section                               |
//! |----------------------------|---------------------------------------|
//! | `@summary`, `@description` | summary                               |
//! | `@param name text`         | one parameter, first word is the name |
//! | `@return`, `@returns`      | return value                          |
//! | `@hidden`                  | marks the feature hidden, text ignored |

use strife_core::doc::{DocComment, DocParam};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Param,
    Return,
    Hidden,
}

impl Section {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "summary" | "description" => Some(Section::Summary),
            "param" => Some(Section::Param),
            "return" | "returns" => Some(Section::Return),
            "hidden" => Some(Section::Hidden),
            _ => None,
        }
    }
}

/// Returns `true` for block comment text that is a documentation comment.
///
/// `text` is the comment body without the `/*` and `*/` markers.
pub(crate) fn is_doc_comment(text: &str) -> bool {
    text.starts_with('*')
}

/// Parses the body of a documentation comment.
///
/// `span` is the location of the whole comment and is only used for errors.
///
/// # Errors
///
/// Returns an `E105` diagnostic for an unknown `@tag`.
pub(crate) fn parse_doc_comment(text: &str, span: Span) -> Result<DocComment> {
    let body = text.strip_prefix('*').unwrap_or(text);
    let mut doc = DocComment::default();
    let mut section = Section::Summary;
    let mut buffer = String::new();

    for line in body.lines() {
        let mut line = line.trim_start_matches(|c: char| c.is_whitespace() || c == '*');
        line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(tagged) = line.strip_prefix('@') {
            let end = tagged
                .find(|c: char| !c.is_alphanumeric())
                .unwrap_or(tagged.len());
            let tag = &tagged[..end];
            let next = Section::from_tag(tag).ok_or_else(|| {
                Diagnostic::error(format!("unknown documentation tag `@{tag}`"))
                    .with_code(ErrorCode::E105)
                    .with_label(span, "in this comment")
                    .with_help("known tags are @summary, @description, @param, @return, @returns and @hidden")
            })?;
            save(&mut doc, section, &buffer);
            buffer.clear();
            section = next;
            line = tagged[end..].trim_start();
        }

        if !line.is_empty() {
            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(line);
        }
    }
    save(&mut doc, section, &buffer);

    Ok(doc)
}

fn save(doc: &mut DocComment, section: Section, text: &str) {
    let text = text.trim();
    match section {
        Section::Hidden => doc.hidden = true,
        _ if text.is_empty() => {}
        Section::Summary => doc.summary = Some(text.to_string()),
        Section::Return => doc.returns = Some(text.to_string()),
        Section::Param => {
            let (name, description) = match text.split_once(char::is_whitespace) {
                Some((name, rest)) => (name, Some(rest.trim().to_string())),
                None => (text, None),
            };
            doc.params.push(DocParam {
                name: name.to_string(),
                description,
            });
        }
    }
}
