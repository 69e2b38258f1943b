//! Ordering of Python version strings.
//!
//! Python distributions publish PEP 440 versions (`2.31.0`, `1.0rc1`,
//! `2.8.2.post1`, `1!2.0`, `1.26.4+cpu`). Each is parsed into a
//! [`PythonVersion`] whose derived ordering is the PEP 440 one:
//!
//! - epoch first, then the release with trailing zeros ignored
//!   (`1.0 == 1.0.0`, `1.0.0.post1 < 1.0.0.1`)
//! - a dev release with no pre or post part sorts before any pre-release
//! - pre-releases (`a` < `b` < `rc`) sort before the final release
//! - post releases sort after it, dev releases before their parent
//! - a local version sorts after the same public version

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static PEP440_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
        v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_l>alpha|a|beta|b|preview|pre|rc|c)[-_.]?(?P<pre_n>[0-9]+)?)?
        (?:-(?P<post_n1>[0-9]+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?)?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        $",
    )
    .expect("valid version regex")
});

/// A version string that cannot be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot compare version `{version}` of `{package}`")]
pub struct VersionError {
    pub package: String,
    pub version: String,
}

/// Pre-release phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreLabel {
    Alpha,
    Beta,
    Rc,
}

/// Where a version sits relative to its final release.
///
/// Variant order is sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrePhase {
    /// `1.0.dev1`: a dev release of the final, before every pre-release.
    DevOfFinal,
    Pre(PreLabel, u64),
    /// No pre-release part.
    Final,
}

/// Dev release part; absence sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DevPhase {
    Dev(u64),
    None,
}

/// One dot-separated segment of a local version. Words sort before numbers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LocalSegment {
    Word(String),
    Number(u64),
}

/// A parsed PEP 440 version. Fields are in comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    pub epoch: u64,
    /// Release components without trailing zeros (`0.0` is empty).
    pub release: Vec<u64>,
    pub pre: PrePhase,
    /// Post release number; `None` sorts first.
    pub post: Option<u64>,
    pub dev: DevPhase,
    /// Local version segments; `None` sorts first.
    pub local: Option<Vec<LocalSegment>>,
}

/// Parse a Python version string.
pub fn parse_version(s: &str) -> Option<PythonVersion> {
    let caps = PEP440_RE.captures(s.trim())?;

    let epoch = match caps.name("epoch") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let mut release = caps
        .name("release")?
        .as_str()
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    while release.last() == Some(&0) {
        release.pop();
    }

    let post = if let Some(n) = caps.name("post_n1") {
        Some(number(Some(n))?)
    } else if caps.name("post_l").is_some() {
        Some(number(caps.name("post_n2"))?)
    } else {
        None
    };

    let dev = if caps.name("dev_l").is_some() {
        DevPhase::Dev(number(caps.name("dev_n"))?)
    } else {
        DevPhase::None
    };

    let pre = match caps.name("pre_l") {
        Some(label) => PrePhase::Pre(pre_label(label.as_str()), number(caps.name("pre_n"))?),
        None if post.is_none() && dev != DevPhase::None => PrePhase::DevOfFinal,
        None => PrePhase::Final,
    };

    let local = caps.name("local").map(|local| {
        local
            .as_str()
            .split(['-', '_', '.'])
            .map(|seg| match seg.parse::<u64>() {
                Ok(n) => LocalSegment::Number(n),
                Err(_) => LocalSegment::Word(seg.to_ascii_lowercase()),
            })
            .collect()
    });

    Some(PythonVersion {
        epoch,
        release,
        pre,
        post,
        dev,
        local,
    })
}

/// Compare an installed version against a required one.
///
/// Returns how `installed` orders relative to `required`.
pub fn compare(package: &str, installed: &str, required: &str) -> Result<Ordering, VersionError> {
    let parse = |v: &str| {
        parse_version(v).ok_or_else(|| VersionError {
            package: package.to_string(),
            version: v.to_string(),
        })
    };
    let installed = parse(installed)?;
    let required = parse(required)?;
    Ok(installed.cmp(&required))
}

fn pre_label(label: &str) -> PreLabel {
    match label.to_ascii_lowercase().as_str() {
        "a" | "alpha" => PreLabel::Alpha,
        "b" | "beta" => PreLabel::Beta,
        _ => PreLabel::Rc,
    }
}

/// An optional numeric part; a missing number is 0.
fn number(m: Option<regex::Match<'_>>) -> Option<u64> {
    match m {
        Some(m) => m.as_str().parse().ok(),
        None => Some(0),
    }
}
