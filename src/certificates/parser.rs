// Certificate Parser - Extract candidate domain names from a leaf certificate

use crate::certificates::classifier::{DomainKind, classify, normalize_domain};
use crate::error::FetchError;
use x509_parser::prelude::*;

/// Domains harvested from one host's leaf certificate
///
/// Built once by the fetcher and only read afterwards. Every name has passed
/// the classifier; a name sits in exactly one of the two lists, each list in
/// certificate field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateResult {
    host: String,
    domains: Vec<String>,
    wildcards: Vec<String>,
}

impl CertificateResult {
    /// Classify candidate names and partition them, keeping encounter order
    pub fn from_names<I, S>(host: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domains = Vec::new();
        let mut wildcards = Vec::new();

        for classified in names.into_iter().filter_map(|n| classify(n.as_ref())) {
            match classified.kind {
                DomainKind::Plain => domains.push(classified.name),
                DomainKind::Wildcard => wildcards.push(classified.name),
            }
        }

        Self {
            host: host.into(),
            domains,
            wildcards,
        }
    }

    /// Parse a DER leaf certificate and harvest its names
    pub fn from_der(host: impl Into<String>, der: &[u8]) -> Result<Self, FetchError> {
        let names = leaf_names(der)?;
        Ok(Self::from_names(host, names))
    }

    /// Target that produced this result
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Non-wildcard domains
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Wildcard domains (`*.` prefix)
    pub fn wildcards(&self) -> &[String] {
        &self.wildcards
    }

    /// Total number of harvested names
    pub fn len(&self) -> usize {
        self.domains.len() + self.wildcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Candidate names of a leaf certificate: DNS SANs in order, then the subject CN
///
/// The CN is skipped when the SAN list already carries it, unlike a plain
/// SAN-then-CN concatenation that would list it twice. Other SAN types (IP,
/// email, URI) are ignored.
pub fn leaf_names(der: &[u8]) -> Result<Vec<String>, FetchError> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| FetchError::CertificateParse {
        details: format!("{:?}", e),
    })?;

    let mut names = Vec::new();

    if let Ok(Some(ext)) = cert.get_extension_unique(&oid_registry::OID_X509_EXT_SUBJECT_ALT_NAME)
    {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for name in &san.general_names {
                if let GeneralName::DNSName(dns) = name {
                    names.push(dns.to_string());
                }
            }
        }
    }

    // Later CN attributes override earlier ones, as most TLS clients read them
    let common_name = cert
        .subject()
        .iter_common_name()
        .filter_map(|attr| attr.as_str().ok())
        .last();

    if let Some(cn) = common_name {
        let normalized = normalize_domain(cn);
        if !names.iter().any(|n| normalize_domain(n) == normalized) {
            names.push(cn.to_string());
        }
    }

    Ok(names)
}
