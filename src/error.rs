// Error types for CertSift
//
// Per-host failures are typed so the worker pool can log them by kind; they
// never escape the pool. The application edge (main, CLI, input) uses anyhow.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failure while fetching the certificate of a single host
#[derive(Debug, Error)]
pub enum FetchError {
    /// TCP connect plus TLS handshake did not finish in time
    #[error("Connection timeout after {duration:?} to {addr}")]
    ConnectionTimeout { duration: Duration, addr: String },

    /// Connection was refused by the remote host
    #[error("Connection refused by {addr}")]
    ConnectionRefused { addr: String },

    /// Connect failed for any other reason, including name resolution
    #[error("Failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Host cannot be expressed as a TLS server name
    #[error("Invalid server name: {host}")]
    InvalidServerName { host: String },

    /// TLS handshake failed
    #[error("TLS handshake with {addr} failed: {source}")]
    HandshakeFailed {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Server completed the handshake without presenting a certificate
    #[error("No certificates received from {addr}")]
    EmptyCertificateChain { addr: String },

    /// Leaf certificate could not be decoded
    #[error("Certificate parsing error: {details}")]
    CertificateParse { details: String },

    /// TLS client configuration could not be built
    #[error("TLS configuration error: {0}")]
    TlsConfig(#[from] rustls::Error),
}

impl FetchError {
    /// Short label used in logs and statistics
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::ConnectionTimeout { .. } => "timeout",
            FetchError::ConnectionRefused { .. } => "refused",
            FetchError::ConnectFailed { .. } => "connect",
            FetchError::InvalidServerName { .. } => "server-name",
            FetchError::HandshakeFailed { .. } => "handshake",
            FetchError::EmptyCertificateChain { .. } => "empty-chain",
            FetchError::CertificateParse { .. } => "parse",
            FetchError::TlsConfig(_) => "tls-config",
        }
    }

    /// Map a connect error onto the taxonomy
    ///
    /// `timeout` is the configured bound, reported when the OS gives up first.
    pub(crate) fn from_connect(addr: &str, err: io::Error, timeout: Duration) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => FetchError::ConnectionRefused {
                addr: addr.to_string(),
            },
            io::ErrorKind::TimedOut => FetchError::ConnectionTimeout {
                duration: timeout,
                addr: addr.to_string(),
            },
            _ => FetchError::ConnectFailed {
                addr: addr.to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_timeout_error() {
        let err = FetchError::ConnectionTimeout {
            duration: Duration::from_secs(4),
            addr: "127.0.0.1:443".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("timeout"));
        assert!(msg.contains("127.0.0.1:443"));
        assert_eq!(err.kind(), "timeout");
    }

    #[test]
    fn test_refused_is_classified() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err = FetchError::from_connect("example.com:443", io_err, Duration::from_secs(4));

        assert!(matches!(err, FetchError::ConnectionRefused { .. }));
        assert!(err.to_string().contains("example.com:443"));
    }

    #[test]
    fn test_resolution_failure_keeps_source() {
        use std::error::Error;

        let io_err = io::Error::other("failed to lookup address information");
        let err = FetchError::from_connect("nonexistent.invalid:443", io_err, Duration::from_secs(4));

        assert!(matches!(err, FetchError::ConnectFailed { .. }));
        assert!(err.source().is_some());
        assert_eq!(err.kind(), "connect");
    }

    #[test]
    fn test_os_timeout_reports_configured_bound() {
        let io_err = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        let err = FetchError::from_connect("10.0.0.1:443", io_err, Duration::from_millis(750));

        match err {
            FetchError::ConnectionTimeout { duration, addr } => {
                assert_eq!(duration, Duration::from_millis(750));
                assert_eq!(addr, "10.0.0.1:443");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tls_config_conversion() {
        let err: FetchError = rustls::Error::General("bad config".to_string()).into();

        assert!(matches!(err, FetchError::TlsConfig(_)));
        assert_eq!(err.kind(), "tls-config");
    }
}
