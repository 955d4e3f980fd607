use std::io::{self, BufRead, Read, Write};

use bufstream::BufStream;

use crate::error::{Error, Result};

const CR: u8 = 0x0d;
const LF: u8 = 0x0a;

/// Default ceiling on the length of a single response line, in bytes.
///
/// Historical client implementations capped lines at 1,000,000 bytes, which
/// is too small for the single-line `FETCH`/`SEARCH` responses some servers
/// produce on large mailboxes.
pub const DEFAULT_MAX_RESPONSE_LINE_LENGTH: usize = 10_000_000;

/// A connected, configured stream ready to be driven by an IMAP protocol
/// engine.
///
/// `Transport` is what a [`Connector`](crate::Connector) produces: a buffered
/// stream carrying the per-connection response-line ceiling, with line-level
/// read and write helpers. It knows nothing about tags, greetings, or
/// response grammar — that is the collaborator's job.
#[derive(Debug)]
pub struct Transport<T: Read + Write> {
    stream: BufStream<T>,
    max_response_line_length: usize,
    /// Echo lines as `C: ...` / `S: ...` on stdout.
    pub debug: bool,
}

impl<T: Read + Write> Transport<T> {
    /// Wrap an established stream, bounding response lines at `max_response_line_length`.
    pub fn new(stream: T, max_response_line_length: usize) -> Transport<T> {
        Transport {
            stream: BufStream::new(stream),
            max_response_line_length,
            debug: false,
        }
    }

    /// The response-line ceiling this transport enforces.
    pub fn max_response_line_length(&self) -> usize {
        self.max_response_line_length
    }

    /// Read one line, including its terminating LF, appending it to `into`.
    ///
    /// Returns the number of bytes read. Fails with
    /// [`Error::ResponseTooLong`] once a line grows past the configured
    /// ceiling and with [`Error::ConnectionLost`] on EOF.
    pub fn read_line(&mut self, into: &mut Vec<u8>) -> Result<usize> {
        let start = into.len();
        loop {
            let (found_lf, used) = {
                let available = match self.stream.fill_buf() {
                    Ok(available) => available,
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(Error::Io(e)),
                };
                match available.iter().position(|&b| b == LF) {
                    Some(i) => {
                        into.extend_from_slice(&available[..=i]);
                        (true, i + 1)
                    }
                    None => {
                        into.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            };
            self.stream.consume(used);

            if into.len() - start > self.max_response_line_length {
                return Err(Error::ResponseTooLong(self.max_response_line_length));
            }
            if found_lf {
                let read = into.len() - start;
                if self.debug {
                    print!("S: {}", String::from_utf8_lossy(&into[start..]));
                }
                return Ok(read);
            }
            if used == 0 {
                // fill_buf returned an empty slice: the peer closed mid-line
                // (or before sending anything).
                return Err(Error::ConnectionLost);
            }
        }
    }

    /// Write `buf` followed by CRLF and flush.
    pub fn write_line(&mut self, buf: &[u8]) -> Result<()> {
        self.stream.write_all(buf)?;
        self.stream.write_all(&[CR, LF])?;
        self.stream.flush()?;
        if self.debug {
            println!("C: {}", String::from_utf8_lossy(buf));
        }
        Ok(())
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &T {
        self.stream.get_ref()
    }

    /// Get a mutable reference to the underlying stream.
    ///
    /// Useful for e.g. adjusting the read timeout on a
    /// [`TcpStream`](std::net::TcpStream) mid-session.
    pub fn get_mut(&mut self) -> &mut T {
        self.stream.get_mut()
    }

    /// Consume the transport, returning the underlying stream.
    pub fn into_inner(self) -> Result<T> {
        Ok(self.stream.into_inner()?)
    }
}

impl<T: Read + Write> Read for Transport<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl<T: Read + Write> Write for Transport<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_stream::MockStream;

    #[test]
    fn read_line_returns_one_line_at_a_time() {
        let stream = MockStream::new(b"* OK Dovecot ready.\r\na1 OK done\r\n".to_vec());
        let mut transport = Transport::new(stream, DEFAULT_MAX_RESPONSE_LINE_LENGTH);
        let mut line = Vec::new();
        let read = transport.read_line(&mut line).unwrap();
        assert_eq!(b"* OK Dovecot ready.\r\n".len(), read);
        assert_eq!(b"* OK Dovecot ready.\r\n".to_vec(), line);

        line.clear();
        transport.read_line(&mut line).unwrap();
        assert_eq!(b"a1 OK done\r\n".to_vec(), line);
    }

    #[test]
    fn read_line_survives_short_reads() {
        let stream = MockStream::new(b"* OK ready\r\n".to_vec()).with_short_reads();
        let mut transport = Transport::new(stream, DEFAULT_MAX_RESPONSE_LINE_LENGTH);
        let mut line = Vec::new();
        transport.read_line(&mut line).unwrap();
        assert_eq!(b"* OK ready\r\n".to_vec(), line);
    }

    #[test]
    fn read_line_enforces_ceiling() {
        let stream = MockStream::new(b"* SEARCH 1 2 3 4 5 6 7 8 9 10\r\n".to_vec());
        let mut transport = Transport::new(stream, 8);
        let mut line = Vec::new();
        match transport.read_line(&mut line) {
            Err(Error::ResponseTooLong(8)) => {}
            other => panic!("expected ResponseTooLong, got {:?}", other),
        }
    }

    #[test]
    fn read_line_at_exact_ceiling_is_allowed() {
        let line_bytes = b"* OK go\r\n";
        let stream = MockStream::new(line_bytes.to_vec());
        let mut transport = Transport::new(stream, line_bytes.len());
        let mut line = Vec::new();
        assert_eq!(line_bytes.len(), transport.read_line(&mut line).unwrap());
    }

    #[test]
    fn read_line_reports_lost_connection_on_eof() {
        let stream = MockStream::new(Vec::new()).with_eof();
        let mut transport = Transport::new(stream, DEFAULT_MAX_RESPONSE_LINE_LENGTH);
        let mut line = Vec::new();
        match transport.read_line(&mut line) {
            Err(Error::ConnectionLost) => {}
            other => panic!("expected ConnectionLost, got {:?}", other),
        }
    }

    #[test]
    fn read_line_propagates_io_errors() {
        let stream = MockStream::new(Vec::new()).with_err();
        let mut transport = Transport::new(stream, DEFAULT_MAX_RESPONSE_LINE_LENGTH);
        let mut line = Vec::new();
        match transport.read_line(&mut line) {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn write_line_appends_crlf() {
        let stream = MockStream::new(Vec::new());
        let mut transport = Transport::new(stream, DEFAULT_MAX_RESPONSE_LINE_LENGTH);
        transport.write_line(b"a1 UID SEARCH UTF-8 ALL").unwrap();
        assert_eq!(
            b"a1 UID SEARCH UTF-8 ALL\r\n".to_vec(),
            transport.get_ref().written()
        );
    }

    #[test]
    fn into_inner_returns_the_stream() {
        let stream = MockStream::new(Vec::new());
        let mut transport = Transport::new(stream, DEFAULT_MAX_RESPONSE_LINE_LENGTH);
        transport.write_line(b"hello").unwrap();
        let stream = transport.into_inner().unwrap();
        assert_eq!(b"hello\r\n".to_vec(), stream.written());
    }
}
