// Certificates module - Fetch leaf certificates and harvest their names

pub mod classifier;
pub mod fetcher;
pub mod parser;
pub mod verifier;

pub use classifier::{ClassifiedDomain, DomainKind, classify};
pub use fetcher::{CertificateFetcher, CertificateSource};
pub use parser::CertificateResult;
