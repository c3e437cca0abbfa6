//! The line-scanning rewrite engine.
//!
//! Each file is walked once with a single piece of state, `include_next`.
//! A directive line is always kept and followed by its expanded payload; a
//! `replace` directive clears `include_next`, which drops the next ordinary
//! line. Every ordinary line sets it back.

use similar::TextDiff;
use xtask_fs::{NormalizedPath, io};

use crate::directive::MarkerFamily;
use crate::error::{Error, Result};
use crate::template::{self, TemplateError};

/// Counters collected while rewriting one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Directives found (and payload lines emitted).
    pub directives: usize,
    /// Ordinary lines dropped by `replace` directives.
    pub replaced: usize,
}

/// The result of rewriting a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub stats: RewriteStats,
}

/// Rewrite `content` for `version`.
///
/// Lines are joined with `\n`; a trailing line break in the input is kept.
/// Unlike [`rewrite_file`] this does not check whether the tag is mentioned
/// at all, so it also normalizes `\r\n` line endings of marker-free text.
///
/// # Errors
/// Returns `Error::Template` naming `<content>` and the 1-based line of the
/// directive whose payload could not be expanded.
pub fn rewrite_content(family: &MarkerFamily, content: &str, version: &str) -> Result<Rewrite> {
    rewrite_lines(family, content, version).map_err(|(line, source)| Error::Template {
        location: "<content>".to_string(),
        line,
        source,
    })
}

fn rewrite_lines(
    family: &MarkerFamily,
    content: &str,
    version: &str,
) -> std::result::Result<Rewrite, (usize, TemplateError)> {
    let mut emitted: Vec<String> = Vec::new();
    let mut stats = RewriteStats::default();
    let mut include_next = true;

    for (index, line) in content.lines().enumerate() {
        match family.parse_line(line) {
            Some(directive) => {
                emitted.push(line.to_string());
                let payload = template::expand(directive.payload, version)
                    .map_err(|source| (index + 1, source))?;
                emitted.push(payload);
                stats.directives += 1;
                include_next = !directive.kind.consumes_next();
            }
            None => {
                if include_next {
                    emitted.push(line.to_string());
                } else {
                    stats.replaced += 1;
                }
                include_next = true;
            }
        }
    }

    let mut rewritten = emitted.join("\n");
    if content.ends_with('\n') {
        rewritten.push('\n');
    }

    Ok(Rewrite {
        content: rewritten,
        stats,
    })
}

/// A planned rewrite of a file on disk.
#[derive(Debug, Clone)]
pub struct FileRewrite {
    pub path: NormalizedPath,
    pub original: String,
    pub rewrite: Rewrite,
}

impl FileRewrite {
    /// Whether writing would leave the file as it is.
    pub fn is_noop(&self) -> bool {
        self.original == self.rewrite.content
    }

    /// Unified diff between the current and the rewritten content.
    pub fn diff(&self, label: &str) -> String {
        TextDiff::from_lines(&self.original, &self.rewrite.content)
            .unified_diff()
            .context_radius(2)
            .header(&format!("a/{label}"), &format!("b/{label}"))
            .to_string()
    }

    /// Write the rewritten content.
    pub fn write(&self) -> Result<()> {
        io::write_text(&self.path, &self.rewrite.content)?;
        Ok(())
    }
}

/// Read `path` and compute its rewrite without writing.
///
/// Returns `None` when the file does not mention the family tag; such files
/// are never touched.
pub fn plan_file(
    family: &MarkerFamily,
    path: &NormalizedPath,
    version: &str,
) -> Result<Option<FileRewrite>> {
    let original = io::read_text(path)?;
    if !family.mentioned_in(&original) {
        return Ok(None);
    }

    let rewrite =
        rewrite_lines(family, &original, version).map_err(|(line, source)| Error::Template {
            location: path.to_string(),
            line,
            source,
        })?;

    Ok(Some(FileRewrite {
        path: path.clone(),
        original,
        rewrite,
    }))
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// No marker tag, or rewriting produced identical content.
    Unchanged,
    /// The file was overwritten.
    Rewritten(RewriteStats),
}

/// Rewrite a single file in place.
pub fn rewrite_file(
    family: &MarkerFamily,
    path: &NormalizedPath,
    version: &str,
) -> Result<FileOutcome> {
    let Some(plan) = plan_file(family, path, version)? else {
        return Ok(FileOutcome::Unchanged);
    };

    tracing::info!("process {}", path);
    if plan.is_noop() {
        return Ok(FileOutcome::Unchanged);
    }

    plan.write()?;
    Ok(FileOutcome::Rewritten(plan.rewrite.stats))
}

/// Rewrite every file in `paths`, one after another.
///
/// Stops at the first error; files processed before it stay rewritten.
pub fn rewrite_files(
    family: &MarkerFamily,
    paths: &[NormalizedPath],
    version: &str,
) -> Result<Vec<(NormalizedPath, FileOutcome)>> {
    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = rewrite_file(family, path, version)?;
        outcomes.push((path.clone(), outcome));
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DEFAULT_TAG;

    fn family() -> MarkerFamily {
        MarkerFamily::arrow_version().unwrap()
    }

    fn insert(payload: &str) -> String {
        format!("// {DEFAULT_TAG}:insert: {payload}")
    }

    fn replace(payload: &str) -> String {
        format!("// {DEFAULT_TAG}:replace: {payload}")
    }

    #[test]
    fn test_insert_keeps_following_line() {
        let content = [insert("\"{version}\","), "\"53\",".to_string()].join("\n");
        let rewrite = rewrite_content(&family(), &content, "54").unwrap();
        assert_eq!(
            rewrite.content,
            [insert("\"{version}\","), "\"54\",".into(), "\"53\",".into()].join("\n")
        );
        assert_eq!(
            rewrite.stats,
            RewriteStats {
                directives: 1,
                replaced: 0
            }
        );
    }

    #[test]
    fn test_replace_drops_following_line() {
        let content = [replace("arrow-{version},"), "old-entry,".to_string()].join("\n");
        let rewrite = rewrite_content(&family(), &content, "60").unwrap();
        assert_eq!(
            rewrite.content,
            [replace("arrow-{version},"), "arrow-60,".to_string()].join("\n")
        );
        assert_eq!(rewrite.stats.replaced, 1);
    }

    #[test]
    fn test_replace_as_last_line() {
        let content = format!("a\n{}", replace("x{version}"));
        let rewrite = rewrite_content(&family(), &content, "60").unwrap();
        assert_eq!(rewrite.content, format!("a\n{}\nx60", replace("x{version}")));
        assert_eq!(rewrite.stats.replaced, 0);
    }

    #[test]
    fn test_replace_does_not_consume_a_directive() {
        let content = [replace("a{version}"), insert("b{version}"), "tail".into()].join("\n");
        let rewrite = rewrite_content(&family(), &content, "7").unwrap();
        assert_eq!(
            rewrite.content,
            [
                replace("a{version}"),
                "a7".into(),
                insert("b{version}"),
                "b7".into(),
                "tail".into()
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_trailing_newline_is_preserved() {
        let content = format!("{}\nold\n", replace("new{version}"));
        let rewrite = rewrite_content(&family(), &content, "1").unwrap();
        assert!(rewrite.content.ends_with("new1\n"));
    }

    #[test]
    fn test_template_error_reports_line() {
        let content = format!("first\n{}", insert("{oops}"));
        let err = rewrite_content(&family(), &content, "1").unwrap_err();
        assert!(matches!(err, Error::Template { line: 2, .. }));
    }
}
