use std::io::{ErrorKind, Read};
use std::thread;
use std::time::Duration;

use super::{Command, DEFAULT_BUFFER_SIZE};

/// How long to wait before retrying a read that signalled `WouldBlock`.
const RETRY_DELAY: Duration = Duration::from_millis(1);

pub struct Parser;

impl Parser {
    /// Lazily parse a source into its command symbols. The source is read in
    /// bounded chunks, driven by consumption of the returned iterator.
    pub fn parse<R: Read>(source: R) -> Commands<R> {
        Self::parse_with_buffer_size(source, DEFAULT_BUFFER_SIZE)
    }

    pub fn parse_with_buffer_size<R: Read>(source: R, buffer_size: usize) -> Commands<R> {
        Commands {
            source,
            buffer: vec![0; buffer_size],
            pos: 0,
            len: 0,
            done: false,
        }
    }
}

/// Lazy, single-pass sequence of [`Command`]s read from a source.
///
/// Unrecognized characters are dropped as comments. A read error terminates
/// the sequence after yielding the error once.
pub struct Commands<R> {
    source: R,
    buffer: Vec<u8>,
    pos: usize,
    len: usize,
    done: bool,
}

impl<R: Read> Commands<R> {
    /// Block waiting for the next chunk of source. A source that is not yet
    /// ready is retried after a short sleep; an interrupted read is retried
    /// immediately. Plain in-memory sources never hit either path and read
    /// synchronously.
    fn refill(&mut self) -> std::io::Result<usize> {
        loop {
            match self.source.read(&mut self.buffer) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(RETRY_DELAY),
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> Iterator for Commands<R> {
    type Item = std::io::Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            while self.pos < self.len {
                let c = self.buffer[self.pos] as char;
                self.pos += 1;
                if let Some(command) = Command::from_char(c) {
                    return Some(Ok(command));
                }
            }

            match self.refill() {
                // end of stream terminates the sequence, it is not an error
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
