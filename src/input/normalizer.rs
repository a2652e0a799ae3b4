// Target Normalizer - Reduce a raw input line to a bare host
//
// Operators paste URLs, hostnames and IPs interchangeably; everything but the
// authority part is dropped here before a target reaches the queue.

use crate::constants::STRIPPED_SCHEMES;

/// Normalize a raw line or argument into a bare target
///
/// Trims whitespace, removes a leading `https://` or `http://` (any case) and
/// cuts at the first `/`, `?` or `#`. Returns `None` when nothing is left.
///
/// # Examples
/// ```ignore
/// assert_eq!(normalize_target("https://example.com/foo"), Some("example.com".into()));
/// assert_eq!(normalize_target("   "), None);
/// ```
pub fn normalize_target(raw: &str) -> Option<String> {
    let mut s = raw.trim();

    for scheme in STRIPPED_SCHEMES {
        if s.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        {
            s = &s[scheme.len()..];
            break;
        }
    }

    let end = s.find(['/', '?', '#']).unwrap_or(s.len());
    let host = s[..end].trim();

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
