use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

#[cfg(feature = "native-tls")]
use native_tls::{Certificate, TlsConnector, TlsStream};
#[cfg(feature = "rustls-tls")]
use rustls_connector::{RustlsConnector, TlsStream as RustlsStream};
#[cfg(feature = "native-tls")]
use std::fs;
#[cfg(feature = "native-tls")]
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::transport::{Transport, DEFAULT_MAX_RESPONSE_LINE_LENGTH};

/// A builder for configured [`Transport`]s over the plaintext or TLS
/// transport variants.
///
/// All limits here are strictly per-connection: the timeout is applied to the
/// TCP connect and to every subsequent read and write on this one socket, and
/// the response-line ceiling travels with the produced [`Transport`].
/// Connectors can therefore coexist with different settings without
/// interfering with each other.
///
/// ```no_run
/// # use imap_uidext::Connector;
/// # fn main() -> Result<(), imap_uidext::Error> {
/// use std::time::Duration;
///
/// let transport = Connector::new("imap.example.com", 143)
///     .timeout(Duration::from_secs(30))
///     .connect()?;
/// # Ok(())
/// # }
/// ```
///
/// For the TLS transport variant, use
/// [`connect_tls`](Connector::connect_tls) (or
/// [`connect_rustls`](Connector::connect_rustls) with the `rustls-tls`
/// feature) on port 993 instead.
pub struct Connector<D>
where
    D: AsRef<str>,
{
    domain: D,
    port: u16,
    timeout: Option<Duration>,
    max_response_line_length: usize,
    #[cfg(feature = "native-tls")]
    tls_connector: Option<TlsConnector>,
    #[cfg(feature = "native-tls")]
    root_certificate_pem: Option<PathBuf>,
}

impl<D> Connector<D>
where
    D: AsRef<str>,
{
    /// Make a new `Connector` for the given domain and port.
    pub fn new(domain: D, port: u16) -> Self {
        Connector {
            domain,
            port,
            timeout: None,
            max_response_line_length: DEFAULT_MAX_RESPONSE_LINE_LENGTH,
            #[cfg(feature = "native-tls")]
            tls_connector: None,
            #[cfg(feature = "native-tls")]
            root_certificate_pem: None,
        }
    }

    /// Bound the TCP connect and every read and write on this connection by
    /// `timeout`.
    ///
    /// Operations that exceed it fail with an [`Error::Io`] of kind
    /// `TimedOut` or `WouldBlock`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the default response-line ceiling
    /// ([`DEFAULT_MAX_RESPONSE_LINE_LENGTH`]) for this connection.
    pub fn max_response_line_length(mut self, max_response_line_length: usize) -> Self {
        self.max_response_line_length = max_response_line_length;
        self
    }

    /// Use a pre-built TLS context for [`connect_tls`](Connector::connect_tls).
    ///
    /// Takes precedence over
    /// [`root_certificate_pem`](Connector::root_certificate_pem) if both are
    /// given.
    #[cfg(feature = "native-tls")]
    pub fn tls_connector(mut self, tls_connector: TlsConnector) -> Self {
        self.tls_connector = Some(tls_connector);
        self
    }

    /// Trust the additional root certificate in the given PEM file when
    /// building the TLS context for [`connect_tls`](Connector::connect_tls).
    ///
    /// Ignored when a pre-built [`tls_connector`](Connector::tls_connector)
    /// is set.
    #[cfg(feature = "native-tls")]
    pub fn root_certificate_pem<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.root_certificate_pem = Some(path.into());
        self
    }

    /// Connect over plaintext TCP.
    pub fn connect(&self) -> Result<Transport<TcpStream>> {
        let tcp = self.tcp()?;
        Ok(self.configured(tcp))
    }

    /// Connect and run a TLS handshake using `native-tls`.
    ///
    /// The TLS context is, in order of precedence: the pre-built connector
    /// from [`tls_connector`](Connector::tls_connector), or a default context
    /// extended with the certificate from
    /// [`root_certificate_pem`](Connector::root_certificate_pem) if one was
    /// given.
    #[cfg(feature = "native-tls")]
    pub fn connect_tls(&self) -> Result<Transport<TlsStream<TcpStream>>> {
        let tcp = self.tcp()?;
        let connector = match self.tls_connector {
            Some(ref connector) => connector.clone(),
            None => {
                let mut builder = TlsConnector::builder();
                if let Some(ref path) = self.root_certificate_pem {
                    let pem = fs::read(path)?;
                    builder.add_root_certificate(Certificate::from_pem(&pem)?);
                }
                builder.build()?
            }
        };
        let tls = connector.connect(self.domain.as_ref(), tcp)?;
        Ok(self.configured(tls))
    }

    /// Connect and run a TLS handshake using `rustls` with the platform's
    /// native root certificates.
    #[cfg(feature = "rustls-tls")]
    pub fn connect_rustls(&self) -> Result<Transport<RustlsStream<TcpStream>>> {
        let tcp = self.tcp()?;
        let connector = RustlsConnector::new_with_native_certs()?;
        let tls = connector.connect(self.domain.as_ref(), tcp)?;
        Ok(self.configured(tls))
    }

    /// Connect using a custom TLS initialization, for setups that need
    /// private CAs or other specific TLS parameters.
    ///
    /// The `handshake` closure receives the domain and the connected,
    /// timeout-configured [`TcpStream`], and should return the encrypted
    /// stream, such as a [`native_tls::TlsStream`] or a
    /// [`rustls_connector::TlsStream`].
    pub fn connect_with<F, C>(&self, handshake: F) -> Result<Transport<C>>
    where
        F: FnOnce(&str, TcpStream) -> Result<C>,
        C: Read + Write,
    {
        let tcp = self.tcp()?;
        let stream = handshake(self.domain.as_ref(), tcp)?;
        Ok(self.configured(stream))
    }

    /// Resolve the domain and connect, honoring the configured timeout for
    /// the connect itself and all later I/O on the socket.
    fn tcp(&self) -> Result<TcpStream> {
        let addr = (self.domain.as_ref(), self.port);
        let tcp = match self.timeout {
            // `TcpStream::connect` resolves and tries every address itself,
            // but `connect_timeout` takes a single `SocketAddr`, so the
            // timeout path resolves and walks the candidates by hand.
            Some(timeout) => {
                let mut last_err = None;
                let mut connected = None;
                for addr in addr.to_socket_addrs()? {
                    match TcpStream::connect_timeout(&addr, timeout) {
                        Ok(tcp) => {
                            connected = Some(tcp);
                            break;
                        }
                        Err(e) => last_err = Some(e),
                    }
                }
                match connected {
                    Some(tcp) => tcp,
                    None => {
                        return Err(Error::Io(last_err.unwrap_or_else(|| {
                            io::Error::new(
                                io::ErrorKind::AddrNotAvailable,
                                "host did not resolve to any address",
                            )
                        })))
                    }
                }
            }
            None => TcpStream::connect(addr)?,
        };
        tcp.set_read_timeout(self.timeout)?;
        tcp.set_write_timeout(self.timeout)?;
        Ok(tcp)
    }

    fn configured<S: Read + Write>(&self, stream: S) -> Transport<S> {
        Transport::new(stream, self.max_response_line_length)
    }
}
