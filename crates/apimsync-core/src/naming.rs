//! Stable group keys and version-qualified names for platform APIs
//!
//! All versions of one logical API share a group key (`orders-v2` and
//! `orders-v3` both stage under `orders`). Within a group each version gets a
//! qualified name that always carries its version tag exactly once, so a
//! re-export lands on the same file instead of a double-suffixed copy.

use regex::Regex;
use std::sync::LazyLock;

/// Substring marking a non-primary revision of another API
pub const REVISION_MARKER: &str = ";rev=";

static VERSION_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-v\d+$").expect("version suffix regex is valid"));

/// Normalized identity of one platform API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// Version-stripped staging directory name
    pub group_key: String,
    /// Raw name qualified with the version tag
    pub name: String,
    /// Display name qualified with the version tag
    pub display_name: String,
}

/// Derive group key and qualified names from raw metadata
pub fn normalize(raw_name: &str, display_name: &str, version_tag: &str) -> NormalizedName {
    NormalizedName {
        group_key: group_key(raw_name),
        name: qualify(raw_name, version_tag),
        display_name: qualify_display(display_name, version_tag),
    }
}

/// Strip a trailing `-v<digits>` suffix
pub fn group_key(raw_name: &str) -> String {
    VERSION_SUFFIX_RE.replace(raw_name, "").into_owned()
}

/// Append `-<version>` unless the name already ends with it
pub fn qualify(name: &str, version_tag: &str) -> String {
    append_version(name, version_tag, "-")
}

/// Append ` <version>` unless the display name already ends with it
pub fn qualify_display(display_name: &str, version_tag: &str) -> String {
    append_version(display_name, version_tag, " ")
}

fn append_version(name: &str, version_tag: &str, separator: &str) -> String {
    if version_tag.is_empty() || name.ends_with(version_tag) {
        name.to_string()
    } else {
        format!("{name}{separator}{version_tag}")
    }
}

/// Whether the raw name denotes a non-primary revision
pub fn is_revision(raw_name: &str) -> bool {
    raw_name.contains(REVISION_MARKER)
}
