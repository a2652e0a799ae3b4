// Domain Classifier - Validate certificate names and split wildcard from plain
//
// Certificates carry odd content (display names in the CN, internal labels,
// garbage in SANs). The check is a plausibility filter, not RFC 1035.

use crate::constants::WILDCARD_PREFIX;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Letters, digits, `*`, `.` and `-`, ending in an alphabetic label of two or more letters
    static ref DOMAIN_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9*.\-]+\.[a-zA-Z]{2,}$").expect("static domain pattern");
}

/// Classification of a valid certificate name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// Ordinary name such as `www.example.com`
    Plain,
    /// Name starting with `*.`
    Wildcard,
}

/// A normalized, validated certificate name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassifiedDomain {
    pub name: String,
    pub kind: DomainKind,
}

/// Lower-case and trim a raw certificate name
pub fn normalize_domain(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check an already-normalized string against the domain pattern
pub fn is_domain_valid(s: &str) -> bool {
    s.contains('.') && DOMAIN_PATTERN.is_match(s)
}

/// Normalize, validate and classify a raw certificate name
///
/// Returns `None` for names that fail validation; they are simply left out
/// of the harvest.
pub fn classify(raw: &str) -> Option<ClassifiedDomain> {
    let name = normalize_domain(raw);
    if !is_domain_valid(&name) {
        return None;
    }

    let kind = if name.starts_with(WILDCARD_PREFIX) {
        DomainKind::Wildcard
    } else {
        DomainKind::Plain
    };

    Some(ClassifiedDomain { name, kind })
}
