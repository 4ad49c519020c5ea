use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VERSION_REGEX: Regex =
        Regex::new(r"^[v]?(?P<version>(\d+\.)?(\d+\.)?(\*|\d+))$").unwrap();
    static ref TAG_REGEX: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_\-]*$").unwrap();
    static ref TAG_CHAR_REGEX: Regex = Regex::new(r"[^a-zA-Z0-9_\-]").unwrap();
}

/// Strips the optional `v` prefix of a version label: `v1.2.3` becomes `1.2.3`.
pub fn standardize_version<S: AsRef<str>>(version: S) -> Result<String> {
    let version = version.as_ref().trim();

    VERSION_REGEX
        .captures(version)
        .map(|captures| captures["version"].to_string())
        .ok_or_else(|| Error::InvalidTagOrVersionLabel(format!("Version [{}] is invalid", version)))
}

/// Replaces characters which are not allowed in a tag by `_` and checks the result.
pub fn standardize_tag_label<S: AsRef<str>>(tag: S) -> Result<String> {
    let tag = TAG_CHAR_REGEX.replace_all(tag.as_ref(), "_");

    if TAG_REGEX.is_match(&tag) {
        Ok(tag.into_owned())
    } else {
        Err(Error::InvalidTagOrVersionLabel(format!(
            "Tag label [{}] is invalid",
            tag
        )))
    }
}
