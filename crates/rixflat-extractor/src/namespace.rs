//! Namespace resolution for documents with and without a schema namespace

use crate::xml::Element;

/// Namespace used by the root tag, if any
///
/// Reads the brace-delimited prefix of the root tag (`{uri}Research`).
/// A missing namespace is normal for older schema revisions and is reported
/// as `None`, never as an error.
pub fn resolve(root: &Element) -> Option<String> {
    let rest = root.tag.strip_prefix('{')?;
    let (uri, _) = rest.split_once('}')?;
    if uri.is_empty() {
        None
    } else {
        Some(uri.to_string())
    }
}
