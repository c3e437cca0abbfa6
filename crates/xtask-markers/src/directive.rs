//! Marker directive recognition.
//!
//! A directive is a trailing comment of the form
//! `<leader> <tag>:<kind>: <payload>` where the leader is `//` or `#`, the
//! kind is `insert` or `replace`, and exactly one space separates the pieces.
//! Anything may precede the comment. When a line holds several markers the
//! last one wins.

use regex::Regex;

use crate::Result;

/// The marker tag used by the version-bump operation.
pub const DEFAULT_TAG: &str = "arrow-version";

/// What a directive does with the line that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Add the payload and keep the following line.
    Insert,
    /// Add the payload and drop the following line.
    Replace,
}

impl DirectiveKind {
    /// Whether the line following the directive is dropped.
    pub fn consumes_next(&self) -> bool {
        matches!(self, Self::Replace)
    }
}

/// A directive parsed from a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub kind: DirectiveKind,
    /// Unexpanded payload template, everything after `<kind>: `.
    pub payload: &'a str,
}

/// Recognizes the directives of one marker tag.
#[derive(Debug, Clone)]
pub struct MarkerFamily {
    tag: String,
    pattern: Regex,
}

impl MarkerFamily {
    /// Build the matcher for `tag`.
    ///
    /// The tag is matched literally; regex metacharacters are escaped.
    pub fn new(tag: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"^.*(?://|#) {}:(insert|replace): (.*)$",
            regex::escape(tag)
        ))?;
        Ok(Self {
            tag: tag.to_string(),
            pattern,
        })
    }

    /// The family used for arrow version bumps.
    pub fn arrow_version() -> Result<Self> {
        Self::new(DEFAULT_TAG)
    }

    /// Cheap pre-check: content without the tag cannot hold a directive.
    pub fn mentioned_in(&self, content: &str) -> bool {
        content.contains(&self.tag)
    }

    /// Parse the directive carried by `line`, if any.
    pub fn parse_line<'a>(&self, line: &'a str) -> Option<Directive<'a>> {
        let caps = self.pattern.captures(line)?;
        let kind = match caps.get(1)?.as_str() {
            "replace" => DirectiveKind::Replace,
            _ => DirectiveKind::Insert,
        };
        Some(Directive {
            kind,
            payload: caps.get(2)?.as_str(),
        })
    }
}
