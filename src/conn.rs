use std::fmt;

use crate::error::Result;

pub use imap_proto::Status;

/// The IMAP protocol state of a connection, as defined in [section 3 of RFC
/// 3501](https://tools.ietf.org/html/rfc3501#section-3).
///
/// The UID command layer only ever *observes* this state; all transitions are
/// driven by the collaborator that owns the protocol state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport has been established yet, or it has been torn down.
    NotConnected,
    /// Connected, greeting seen, but not yet authenticated.
    NonAuth,
    /// Authenticated, no mailbox selected.
    Auth,
    /// A mailbox is selected; message-addressing commands are valid.
    Selected,
    /// A `LOGOUT` has been issued; the connection is winding down.
    Logout,
}

/// The six message-addressing commands that have a `UID`-prefixed form.
///
/// `Display` yields the protocol atom, so the collaborator serializes a call
/// as `UID <command> <args>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UidCommand {
    /// `UID COPY`
    Copy,
    /// `UID FETCH`
    Fetch,
    /// `UID SEARCH`
    Search,
    /// `UID SORT` ([RFC 5256](https://tools.ietf.org/html/rfc5256))
    Sort,
    /// `UID STORE`
    Store,
    /// `UID THREAD` ([RFC 5256](https://tools.ietf.org/html/rfc5256))
    Thread,
}

impl fmt::Display for UidCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UidCommand::Copy => "COPY",
            UidCommand::Fetch => "FETCH",
            UidCommand::Search => "SEARCH",
            UidCommand::Sort => "SORT",
            UidCommand::Store => "STORE",
            UidCommand::Thread => "THREAD",
        })
    }
}

/// The raw outcome of one UID command.
///
/// The command layer passes this through unmodified: `status` is the server's
/// completion status (`OK`, `NO`, or `BAD`), and `data` holds the untagged
/// response payload items in the order the server sent them. A `NO` or `BAD`
/// is a normal value here, not an error; callers must inspect `status`.
#[derive(Debug, PartialEq)]
pub struct Response {
    /// The tagged completion status of the command.
    pub status: Status,
    /// The untagged response payload items, verbatim.
    pub data: Vec<Vec<u8>>,
}

/// A capability-bearing IMAP connection that can issue `UID`-prefixed
/// commands.
///
/// This is the seam between the command layer and the protocol state machine.
/// Implementors own tagging, line framing, response collection, and state
/// enforcement; the command layer hands them a [`UidCommand`] plus a
/// pre-normalized argument sequence and expects the wire form
///
/// ```text
/// <tag> UID <command> <args joined by single spaces>
/// ```
///
/// Connection-level faults (not connected, timeout, malformed server
/// response) are returned as [`Error`](crate::Error)s and propagate to the
/// caller unchanged; protocol-level `NO`/`BAD` come back as a [`Response`].
pub trait UidConnection {
    /// Issue one `UID` command with the given argument sequence and return
    /// the server's completion status and response data.
    fn uid(&mut self, command: UidCommand, args: &[String]) -> Result<Response>;

    /// The connection's current protocol state.
    fn state(&self) -> ConnectionState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_command_atoms() {
        assert_eq!("COPY", UidCommand::Copy.to_string());
        assert_eq!("FETCH", UidCommand::Fetch.to_string());
        assert_eq!("SEARCH", UidCommand::Search.to_string());
        assert_eq!("SORT", UidCommand::Sort.to_string());
        assert_eq!("STORE", UidCommand::Store.to_string());
        assert_eq!("THREAD", UidCommand::Thread.to_string());
    }
}
