use std::cmp::min;
use std::io::{Error, ErrorKind, Read, Result, Write};

/// A scripted stream for transport tests: serves a canned read buffer and
/// captures everything written to it.
pub struct MockStream {
    script: Vec<u8>,
    served: usize,
    captured: Vec<u8>,
    eof_on_read: bool,
    err_on_read: bool,
    short_reads: bool,
}

impl MockStream {
    pub fn new(script: Vec<u8>) -> MockStream {
        MockStream {
            script,
            served: 0,
            captured: Vec::new(),
            eof_on_read: false,
            err_on_read: false,
            short_reads: false,
        }
    }

    /// Report EOF (a zero-byte read) on every read.
    pub fn with_eof(mut self) -> MockStream {
        self.eof_on_read = true;
        self
    }

    /// Fail every read with an I/O error.
    pub fn with_err(mut self) -> MockStream {
        self.err_on_read = true;
        self
    }

    /// Serve the script one byte per read, to exercise partial-read handling.
    pub fn with_short_reads(mut self) -> MockStream {
        self.short_reads = true;
        self
    }

    /// Everything written to the stream so far.
    pub fn written(&self) -> Vec<u8> {
        self.captured.clone()
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.eof_on_read {
            return Ok(0);
        }
        if self.err_on_read {
            return Err(Error::new(ErrorKind::Other, "MockStream error"));
        }
        if self.served >= self.script.len() {
            return Err(Error::new(ErrorKind::UnexpectedEof, "script exhausted"));
        }
        let mut len = min(buf.len(), self.script.len() - self.served);
        if self.short_reads {
            len = min(len, 1);
        }
        buf[..len].copy_from_slice(&self.script[self.served..self.served + len]);
        self.served += len;
        Ok(len)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.captured.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
