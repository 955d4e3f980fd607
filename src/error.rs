//! IMAP error types.

use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;
use std::result;

use bufstream::IntoInnerError as BufError;
#[cfg(feature = "native-tls")]
use native_tls::Error as TlsError;
#[cfg(feature = "native-tls")]
use native_tls::HandshakeError as TlsHandshakeError;
#[cfg(feature = "rustls-tls")]
use rustls_connector::HandshakeError as RustlsHandshakeError;
#[cfg(any(feature = "native-tls", feature = "rustls-tls"))]
use std::net::TcpStream;

/// A convenience wrapper around `Result` for `Error`.
pub type Result<T> = result::Result<T, Error>;

/// A set of errors that can occur at the UID command layer or in the
/// collaborator connection it drives.
///
/// A `NO` or `BAD` status from the server is *not* an error: protocol
/// statuses are carried in [`Response::status`](crate::Response) and must be
/// inspected by the caller.
#[derive(Debug)]
pub enum Error {
    /// An `io::Error` that occurred while trying to read or write to a
    /// network stream. Timeouts configured on the connection surface here
    /// with kind `TimedOut` or `WouldBlock`.
    Io(IoError),
    /// An error from the `native_tls` library during the TLS handshake.
    #[cfg(feature = "native-tls")]
    TlsHandshake(TlsHandshakeError<TcpStream>),
    /// An error from the `native_tls` library while setting up the TLS
    /// context.
    #[cfg(feature = "native-tls")]
    Tls(TlsError),
    /// An error from the `rustls-connector` library during the TLS handshake.
    #[cfg(feature = "rustls-tls")]
    RustlsHandshake(RustlsHandshakeError<TcpStream>),
    /// The connection was terminated unexpectedly.
    ConnectionLost,
    /// A command was issued while the connection was not in a state that
    /// allows it.
    NotConnected,
    /// A response line exceeded the configured maximum line length.
    ///
    /// The payload is the ceiling that was exceeded, in bytes.
    ResponseTooLong(usize),
    /// The collaborator could not make sense of a server response. The
    /// payload holds the raw bytes that failed to parse.
    Parse(Vec<u8>),
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Error {
        Error::Io(err)
    }
}

impl<T> From<BufError<T>> for Error {
    fn from(err: BufError<T>) -> Error {
        Error::Io(err.into())
    }
}

#[cfg(feature = "native-tls")]
impl From<TlsHandshakeError<TcpStream>> for Error {
    fn from(err: TlsHandshakeError<TcpStream>) -> Error {
        Error::TlsHandshake(err)
    }
}

#[cfg(feature = "native-tls")]
impl From<TlsError> for Error {
    fn from(err: TlsError) -> Error {
        Error::Tls(err)
    }
}

#[cfg(feature = "rustls-tls")]
impl From<RustlsHandshakeError<TcpStream>> for Error {
    fn from(err: RustlsHandshakeError<TcpStream>) -> Error {
        Error::RustlsHandshake(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Io(ref e) => fmt::Display::fmt(e, f),
            #[cfg(feature = "native-tls")]
            Error::Tls(ref e) => fmt::Display::fmt(e, f),
            #[cfg(feature = "native-tls")]
            Error::TlsHandshake(ref e) => fmt::Display::fmt(e, f),
            #[cfg(feature = "rustls-tls")]
            Error::RustlsHandshake(ref e) => fmt::Display::fmt(e, f),
            Error::ConnectionLost => f.write_str("Connection lost"),
            Error::NotConnected => f.write_str("Connection not in a valid state"),
            Error::ResponseTooLong(limit) => {
                write!(f, "Response line longer than the {} byte limit", limit)
            }
            Error::Parse(ref data) => {
                write!(f, "Unable to parse response: {:?}", String::from_utf8_lossy(data))
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            #[cfg(feature = "native-tls")]
            Error::Tls(ref e) => Some(e),
            #[cfg(feature = "native-tls")]
            Error::TlsHandshake(ref e) => Some(e),
            #[cfg(feature = "rustls-tls")]
            Error::RustlsHandshake(ref e) => Some(e),
            _ => None,
        }
    }
}
