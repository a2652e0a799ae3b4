// Certificate Fetcher - Dial a host over TLS and harvest its leaf certificate

use crate::certificates::parser::CertificateResult;
use crate::certificates::verifier::AcceptAnyCertificate;
use crate::constants::DEFAULT_TLS_PORT;
use crate::error::FetchError;
use crate::scanner::config::PipelineConfig;
use async_trait::async_trait;
use rustls::ClientConfig;
use rustls_pki_types::ServerName;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use tracing::{debug, trace};

/// Anything that can turn a target into a harvested certificate
///
/// The worker pool only knows this trait, so tests can swap the network out.
#[async_trait]
pub trait CertificateSource: Send + Sync {
    async fn fetch(&self, target: &str) -> Result<CertificateResult, FetchError>;
}

/// TLS certificate fetcher
///
/// One call opens exactly one connection and drops it before returning. The
/// timeout covers TCP connect and the TLS handshake together. Peer
/// certificates are never verified (see `AcceptAnyCertificate`).
#[derive(Clone)]
pub struct CertificateFetcher {
    connector: TlsConnector,
    timeout: Duration,
    default_port: u16,
}

impl CertificateFetcher {
    /// Create a fetcher with the given connection timeout
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let config = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate::new()))
        .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            timeout,
            default_port: DEFAULT_TLS_PORT,
        })
    }

    /// Create a fetcher from the pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Result<Self, FetchError> {
        Ok(Self::new(config.timeout)?.with_default_port(config.port))
    }

    /// Port used for targets that do not carry one
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Connect, handshake and read the leaf certificate of one target
    pub async fn grab(&self, target: &str) -> Result<CertificateResult, FetchError> {
        let (host, port) = split_host_port(target, self.default_port);
        let addr = display_addr(&host, port);

        let server_name = ServerName::try_from(host.clone())
            .map_err(|_| FetchError::InvalidServerName { host: host.clone() })?;

        trace!("Connecting to {}", addr);

        let handshake = async {
            let stream = match host.parse::<IpAddr>() {
                Ok(ip) => TcpStream::connect(SocketAddr::new(ip, port)).await,
                Err(_) => TcpStream::connect((host.as_str(), port)).await,
            }
            .map_err(|e| FetchError::from_connect(&addr, e, self.timeout))?;

            self.connector
                .connect(server_name, stream)
                .await
                .map_err(|e| FetchError::HandshakeFailed {
                    addr: addr.clone(),
                    source: e,
                })
        };

        let tls_stream = timeout(self.timeout, handshake)
            .await
            .map_err(|_| FetchError::ConnectionTimeout {
                duration: self.timeout,
                addr: addr.clone(),
            })??;

        let (_, connection) = tls_stream.get_ref();
        let leaf = connection
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or_else(|| FetchError::EmptyCertificateChain { addr: addr.clone() })?;

        let result = CertificateResult::from_der(target, leaf.as_ref())?;

        debug!(
            "{}: {} domains, {} wildcards",
            addr,
            result.domains().len(),
            result.wildcards().len()
        );

        // tls_stream drops here and closes the socket
        Ok(result)
    }
}

#[async_trait]
impl CertificateSource for CertificateFetcher {
    async fn fetch(&self, target: &str) -> Result<CertificateResult, FetchError> {
        self.grab(target).await
    }
}

/// Split a normalized target into host and port
///
/// Accepts `host`, `host:port`, `[v6]`, `[v6]:port` and bare IP literals
/// (including IPv6 without brackets). Unparseable ports are left in the host
/// so the connect fails instead of silently dialing the default port.
pub fn split_host_port(target: &str, default_port: u16) -> (String, u16) {
    if let Some(rest) = target.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail
                .strip_prefix(':')
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(default_port);
            return (host.to_string(), port);
        }
    }

    if target.parse::<IpAddr>().is_ok() {
        return (target.to_string(), default_port);
    }

    if let Some((host, port)) = target.rsplit_once(':') {
        if !host.contains(':') {
            if let Ok(port) = port.parse::<u16>() {
                return (host.to_string(), port);
            }
        }
    }

    (target.to_string(), default_port)
}

fn display_addr(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
