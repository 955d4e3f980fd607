//! UID-based message addressing for IMAP clients.
//!
//! IMAP sequence numbers are only valid within a single mailbox session: they
//! renumber whenever messages are expunged, so they are unsafe for any client
//! that caches message identity across connections. This crate routes every
//! message-addressing operation — copy, fetch, search, sort, store, and
//! thread — through the `UID`-prefixed command path of [RFC
//! 3501](https://tools.ietf.org/html/rfc3501#section-6.4.8), so that messages
//! are always addressed by their persistent UIDs.
//!
//! The crate deliberately does *not* implement the IMAP state machine
//! (greeting, LOGIN/AUTHENTICATE, tagging, response parsing). That belongs to
//! a collaborator which implements the [`UidConnection`] trait: a
//! capability-bearing connection that can issue one `UID` command and report
//! its protocol [`ConnectionState`]. A [`Session`] composes such a
//! collaborator and adds the argument-normalization and dispatch layer on
//! top, which makes the command layer testable against a scripted stub:
//!
//! ```
//! use imap_uidext::{ConnectionState, Response, Result, Session, Status, UidCommand, UidConnection};
//!
//! // A canned collaborator; a real one drives an actual IMAP connection.
//! struct Replay;
//!
//! impl UidConnection for Replay {
//!     fn uid(&mut self, _command: UidCommand, _args: &[String]) -> Result<Response> {
//!         Ok(Response {
//!             status: Status::Ok,
//!             data: vec![b"SEARCH 4 827 1256".to_vec()],
//!         })
//!     }
//!
//!     fn state(&self) -> ConnectionState {
//!         ConnectionState::Selected
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let mut session = Session::new(Replay);
//! let response = session.search(None, ["FROM", "alice@example.com"])?;
//! assert_eq!(response.status, Status::Ok);
//! # Ok(())
//! # }
//! ```
//!
//! Connection setup — per-connection timeout, response-line ceiling, and the
//! plaintext or TLS transport variant — is handled by [`Connector`], which
//! yields a configured [`Transport`] ready to be handed to the collaborator:
//!
//! ```no_run
//! # fn main() -> Result<(), imap_uidext::Error> {
//! use std::time::Duration;
//!
//! let transport = imap_uidext::Connector::new("imap.example.com", 143)
//!     .timeout(Duration::from_secs(30))
//!     .max_response_line_length(16 * 1024 * 1024)
//!     .connect()?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod error;

mod conn;
mod connector;
mod criteria;
mod session;
mod transport;

pub use crate::conn::{ConnectionState, Response, Status, UidCommand, UidConnection};
pub use crate::connector::Connector;
pub use crate::error::{Error, Result};
pub use crate::session::Session;
pub use crate::transport::{Transport, DEFAULT_MAX_RESPONSE_LINE_LENGTH};

#[cfg(test)]
mod mock_stream;
