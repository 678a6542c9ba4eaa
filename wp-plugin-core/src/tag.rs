//! # Semver Tags
//!
//! Derive container image tags from the git ref a pipeline runs for. A tag ref
//! such as `refs/tags/v1.2.3` expands into `1`, `1.2` and `1.2.3`; any other
//! ref maps to `latest`.

use std::sync::LazyLock;

use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use thiserror::Error;

const TAG_REF_PREFIX: &str = "refs/tags/";
const HEAD_REF_PREFIX: &str = "refs/heads/";
const LATEST: &str = "latest";

// Accepts partial versions ("1", "1.2") and leading zeros ("22.04").
static LOOSE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z\-]+(?:\.[0-9A-Za-z\-]+)*))?(?:\+([0-9A-Za-z\-]+(?:\.[0-9A-Za-z\-]+)*))?$",
  )
  .expect("Failed to compile loose semver regex")
});

/// Errors raised while deriving tags from a ref.
#[derive(Debug, Error)]
pub enum TagError {
  #[error("invalid semantic version '{version}': {source}")]
  InvalidStrict {
    version: String,
    #[source]
    source: semver::Error,
  },
  #[error("invalid semantic version '{0}'")]
  InvalidVersion(String),
}

/// Remove the `refs/heads/` prefix from a ref.
pub fn strip_head_prefix(git_ref: &str) -> &str {
  git_ref.strip_prefix(HEAD_REF_PREFIX).unwrap_or(git_ref)
}

/// Remove the `refs/tags/` prefix and a leading `v` from a ref.
pub fn strip_tag_prefix(git_ref: &str) -> &str {
  let git_ref = git_ref.strip_prefix(TAG_REF_PREFIX).unwrap_or(git_ref);
  git_ref.strip_prefix('v').unwrap_or(git_ref)
}

/// Whether tags should be published for `git_ref`: true for tag refs and for
/// the repository's default branch.
pub fn is_taggable(git_ref: &str, default_branch: &str) -> bool {
  git_ref.starts_with(TAG_REF_PREFIX) || strip_head_prefix(git_ref) == default_branch
}

/// Suggested tags for `git_ref`.
///
/// Refs that are not tags produce `["latest"]`. Pre-release versions produce
/// only the full version, `0.x` versions omit the bare major tag.
///
/// ```
/// use wp_plugin_core::semver_tags;
///
/// assert_eq!(semver_tags("refs/heads/main", true).unwrap(), ["latest"]);
/// assert_eq!(semver_tags("refs/tags/v1.2.3", true).unwrap(), ["1", "1.2", "1.2.3"]);
/// assert_eq!(semver_tags("refs/tags/0.9.0", true).unwrap(), ["0.9", "0.9.0"]);
/// ```
pub fn semver_tags(git_ref: &str, strict: bool) -> Result<Vec<String>, TagError> {
  if !git_ref.starts_with(TAG_REF_PREFIX) {
    return Ok(vec![LATEST.to_string()]);
  }

  let raw_version = strip_tag_prefix(git_ref);
  let version = if strict {
    parse_strict(raw_version)?
  } else {
    parse_loose(raw_version)?
  };

  if !version.pre.is_empty() {
    return Ok(vec![version.to_string()]);
  }

  let Version {
    major, minor, patch, ..
  } = version;

  if major == 0 {
    return Ok(vec![format!("{major}.{minor}"), format!("{major}.{minor}.{patch}")]);
  }

  Ok(vec![
    major.to_string(),
    format!("{major}.{minor}"),
    format!("{major}.{minor}.{patch}"),
  ])
}

/// [`semver_tags`] with `suffix` attached to every tag.
///
/// `latest` becomes the bare suffix, every other tag becomes `TAG-SUFFIX`.
pub fn semver_tag_suffix(git_ref: &str, suffix: &str, strict: bool) -> Result<Vec<String>, TagError> {
  let tags = semver_tags(git_ref, strict)?;
  if suffix.is_empty() {
    return Ok(tags);
  }

  Ok(
    tags
      .into_iter()
      .map(|tag| {
        if tag == LATEST {
          suffix.to_string()
        } else {
          format!("{tag}-{suffix}")
        }
      })
      .collect(),
  )
}

fn parse_strict(raw: &str) -> Result<Version, TagError> {
  Version::parse(raw).map_err(|source| TagError::InvalidStrict {
    version: raw.to_string(),
    source,
  })
}

fn parse_loose(raw: &str) -> Result<Version, TagError> {
  let invalid = || TagError::InvalidVersion(raw.to_string());
  let captures = LOOSE_VERSION.captures(raw).ok_or_else(invalid)?;

  let number = |index: usize| -> Result<u64, TagError> {
    match captures.get(index) {
      Some(value) => value.as_str().parse().map_err(|_| invalid()),
      None => Ok(0),
    }
  };

  let pre = match captures.get(4) {
    Some(value) => Prerelease::new(value.as_str()).map_err(|_| invalid())?,
    None => Prerelease::EMPTY,
  };
  let build = match captures.get(5) {
    Some(value) => BuildMetadata::new(value.as_str()).map_err(|_| invalid())?,
    None => BuildMetadata::EMPTY,
  };

  Ok(Version {
    major: number(1)?,
    minor: number(2)?,
    patch: number(3)?,
    pre,
    build,
  })
}
