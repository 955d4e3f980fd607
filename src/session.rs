use std::fmt;

use crate::conn::{ConnectionState, Response, UidCommand, UidConnection};
use crate::criteria::{charset_or_default, flatten_criteria, parenthesize_sort_criteria};
use crate::error::Result;

/// The UID command layer over a collaborator connection.
///
/// Every operation maps onto exactly one `UID`-prefixed command and is issued
/// at most once per call; nothing is retried or reinterpreted. The server's
/// completion status comes back inside the [`Response`] — a `NO` or `BAD` is
/// a value to inspect, not an `Err`. Errors only surface from the underlying
/// connection (not connected, timeout, malformed response) and propagate
/// unchanged.
///
/// IMAP allows one command in flight per connection, so all operations take
/// `&mut self`; a session shared across threads needs external mutual
/// exclusion, exactly as the underlying connection does.
#[derive(Debug)]
pub struct Session<C: UidConnection> {
    conn: C,
}

impl<C: UidConnection> Session<C> {
    /// Create a session over an established collaborator connection.
    pub fn new(conn: C) -> Session<C> {
        Session { conn }
    }

    /// The protocol state of the underlying connection.
    ///
    /// This layer never drives state transitions; it only observes them.
    pub fn state(&self) -> ConnectionState {
        self.conn.state()
    }

    /// Copy the messages in `message_set` to the end of `mailbox_name`,
    /// addressing them by UID.
    ///
    /// Both arguments are passed verbatim; `message_set` may be a single UID,
    /// a comma-separated list, or a `a:b` range, and is validated by the
    /// server, not here.
    pub fn copy(&mut self, message_set: &str, mailbox_name: &str) -> Result<Response> {
        self.conn.uid(
            UidCommand::Copy,
            &[message_set.to_string(), mailbox_name.to_string()],
        )
    }

    /// Fetch (parts of) the messages in `message_set`, addressing them by
    /// UID.
    ///
    /// `message_parts` should be a parenthesized part specifier such as
    /// `"(UID BODY[TEXT])"`, passed verbatim; `None` requests the whole
    /// message as `"(RFC822)"`.
    pub fn fetch<S: fmt::Display>(
        &mut self,
        message_set: S,
        message_parts: Option<&str>,
    ) -> Result<Response> {
        self.conn.uid(
            UidCommand::Fetch,
            &[
                message_set.to_string(),
                message_parts.unwrap_or("(RFC822)").to_string(),
            ],
        )
    }

    /// Search the selected mailbox; matches are reported as UIDs.
    ///
    /// An absent or empty `charset` becomes `UTF-8`. Criteria may each hold
    /// several space-separated terms (`"FROM alice"`) or one term per
    /// element; they are flattened into atomic tokens either way.
    pub fn search<I>(&mut self, charset: Option<&str>, criteria: I) -> Result<Response>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut args = vec![charset_or_default(charset)];
        args.extend(flatten_criteria(criteria));
        self.conn.uid(UidCommand::Search, &args)
    }

    /// Search the selected mailbox and sort the matching UIDs ([RFC
    /// 5256](https://tools.ietf.org/html/rfc5256)).
    ///
    /// `sort_criteria` is a list of sort keys such as `"REVERSE DATE"`; the
    /// parentheses the protocol requires around it are synthesized if
    /// missing. Charset and search criteria behave as in
    /// [`search`](Session::search).
    pub fn sort<I>(
        &mut self,
        sort_criteria: &str,
        charset: Option<&str>,
        search_criteria: I,
    ) -> Result<Response>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut args = vec![
            parenthesize_sort_criteria(sort_criteria),
            charset_or_default(charset),
        ];
        args.extend(flatten_criteria(search_criteria));
        self.conn.uid(UidCommand::Sort, &args)
    }

    /// Alter flag dispositions for the messages in `message_set`, addressing
    /// them by UID.
    ///
    /// `store_command` is e.g. `+FLAGS`, `-FLAGS`, or `FLAGS.SILENT`; `flags`
    /// is the parenthesized flag list, e.g. `"(\\Seen)"`. All three arguments
    /// are passed verbatim — in particular `flags` is never token-split.
    pub fn store(
        &mut self,
        message_set: &str,
        store_command: &str,
        flags: &str,
    ) -> Result<Response> {
        self.conn.uid(
            UidCommand::Store,
            &[
                message_set.to_string(),
                store_command.to_string(),
                flags.to_string(),
            ],
        )
    }

    /// Search the selected mailbox and thread the matching UIDs ([RFC
    /// 5256](https://tools.ietf.org/html/rfc5256)).
    ///
    /// `threading_algorithm` (e.g. `REFERENCES` or `ORDEREDSUBJECT`) is
    /// passed verbatim. Charset and search criteria behave as in
    /// [`search`](Session::search).
    pub fn thread<I>(
        &mut self,
        threading_algorithm: &str,
        charset: Option<&str>,
        search_criteria: I,
    ) -> Result<Response>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut args = vec![
            threading_algorithm.to_string(),
            charset_or_default(charset),
        ];
        args.extend(flatten_criteria(search_criteria));
        self.conn.uid(UidCommand::Thread, &args)
    }

    /// Get a reference to the underlying connection.
    pub fn get_ref(&self) -> &C {
        &self.conn
    }

    /// Get a mutable reference to the underlying connection.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Consume the session, returning the underlying connection.
    pub fn into_inner(self) -> C {
        self.conn
    }
}
