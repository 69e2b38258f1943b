//! Requirement lines and version comparison results.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::installed::InstalledVersion;

/// Splits `name<op>version`, where `<op>` is one or more of `><=` followed by `=`.
static REQUIREMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)[><=]+=(.*)$").expect("valid requirement regex"));

/// A `#` at the start of a line or after whitespace begins a comment.
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)#.*$").expect("valid comment regex"));

/// A `name==version` line from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequirement {
    pub name: String,
    pub version: String,
}

impl PackageRequirement {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        PackageRequirement {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse a single, already trimmed manifest line.
    ///
    /// Returns `None` when the line has no comparison operator or either
    /// side of it is empty.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = REQUIREMENT_RE.captures(line)?;
        let name = caps.get(1)?.as_str().trim();
        let version = caps.get(2)?.as_str().trim();
        if name.is_empty() || version.is_empty() {
            return None;
        }
        Some(PackageRequirement::new(name, version))
    }
}

impl fmt::Display for PackageRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.name, self.version)
    }
}

/// Lines of a manifest that carry requirements: trimmed, with `#` comments
/// (whole-line or trailing) and blank lines removed.
pub fn requirement_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| match COMMENT_RE.find(line) {
            Some(comment) => &line[..comment.start()],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// How the installed version relates to the required one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Same,
    /// Installed is older than required.
    Older,
    /// Installed is newer than required.
    Newer,
    NotInstalled,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Same => "Same",
            Status::Older => "Older",
            Status::Newer => "Newer",
            Status::NotInstalled => "Not installed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a manifest check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub package: String,
    pub required: String,
    pub installed: InstalledVersion,
    pub status: Status,
}
