//! Trailing filler removal

use super::utils::normalize;
use log::debug;

/// Remove trailing filler strings from `phrase`.
///
/// The trim list is walked once in the given order and each entry is removed
/// at most once, so the order of the list decides which chained fillers go.
pub fn trim_suffixes<S: AsRef<str>>(phrase: &str, trims: &[S]) -> String {
    let mut current = normalize(phrase);

    for trim in trims {
        let trim = normalize(trim.as_ref());
        if trim.is_empty() {
            continue;
        }
        if let Some(stripped) = current.strip_suffix(trim.as_str()) {
            debug!("Trimmed '{}' from '{}'", trim, current);
            current = stripped.trim().to_string();
        }
    }

    current
}
