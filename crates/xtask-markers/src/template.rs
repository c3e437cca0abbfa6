//! Payload template expansion.
//!
//! The syntax is a small brace language:
//!
//! | Template     | Expands to        |
//! |--------------|-------------------|
//! | `{version}`  | the new version   |
//! | `{\n}`       | a line break      |
//! | `{{`         | `{`               |
//! | `}}`         | `}`               |
//!
//! Any other placeholder, and any unpaired brace, is rejected.

/// Why a payload could not be expanded. Positions are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{name}}}' at offset {position}")]
    UnknownPlaceholder { name: String, position: usize },

    #[error("unclosed '{{' at offset {position}")]
    Unclosed { position: usize },

    #[error("unexpected '{{' inside placeholder at offset {position}")]
    NestedOpen { position: usize },

    #[error("single '}}' at offset {position}")]
    LoneClose { position: usize },
}

/// Expand `payload` for `version`.
///
/// # Example
/// ```
/// use xtask_markers::expand;
///
/// let line = expand("mod arrow_{version} {{{\\n}}}", "54").unwrap();
/// assert_eq!(line, "mod arrow_54 {\n}");
/// ```
pub fn expand(payload: &str, version: &str) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(payload.len() + version.len());
    let mut chars = payload.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((nested, '{')) => {
                            return Err(TemplateError::NestedOpen { position: nested });
                        }
                        Some((_, ch)) => name.push(ch),
                        None => return Err(TemplateError::Unclosed { position }),
                    }
                }

                match name.as_str() {
                    "version" => out.push_str(version),
                    "\\n" => out.push('\n'),
                    _ => return Err(TemplateError::UnknownPlaceholder { name, position }),
                }
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(TemplateError::LoneClose { position });
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
