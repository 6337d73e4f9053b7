use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;

use tracing::{debug, warn};

use crate::config::RemoteEndpoint;
use crate::data_structures::Inbox;
use crate::types::decision::{Decision, DecisionResponse, Outbound, RequestId};

use super::{drop_stale, take_response, LinkError, RemotePeer};

const READ_CHUNK: usize = 1024;

/// Longest line accepted from the remote participant. Longer lines are discarded.
pub const MAX_LINE_LEN: usize = 4096;

/// Responses buffered between two ticks. The oldest is dropped past this.
const MAX_QUEUED_RESPONSES: usize = 64;

/// Remote participant reached over TCP.
///
/// Messages are JSON, one per line. The socket is non-blocking: [RemotePeer::send] queues whatever
/// the kernel does not accept yet and [RemotePeer::poll_response] drains what has arrived.
#[derive(Debug)]
pub struct TcpPeer {
    stream: TcpStream,
    read_buf: Vec<u8>,
    write_buf: Vec<u8>,
    inbox: Inbox<DecisionResponse>,
    /// Set while skipping the rest of an oversized line.
    skipping_line: bool,
    closed: bool,
}

impl TcpPeer {
    pub fn connect(endpoint: &RemoteEndpoint) -> Result<Self, LinkError> {
        let stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port))?;
        debug!(%endpoint, "connected to remote participant");
        Self::from_stream(stream)
    }

    pub fn from_stream(stream: TcpStream) -> Result<Self, LinkError> {
        stream.set_nonblocking(true)?;
        stream.set_nodelay(true)?;
        Ok(Self {
            stream,
            read_buf: Vec::new(),
            write_buf: Vec::new(),
            inbox: Inbox::new(),
            skipping_line: false,
            closed: false,
        })
    }

    fn flush_pending(&mut self) -> Result<(), LinkError> {
        while !self.write_buf.is_empty() {
            match self.stream.write(&self.write_buf) {
                Ok(0) => {
                    self.closed = true;
                    return Err(LinkError::Disconnected);
                }
                Ok(n) => {
                    self.write_buf.drain(..n);
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    fn fill(&mut self) -> Result<(), LinkError> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    self.closed = true;
                    return Err(LinkError::Disconnected);
                }
                Ok(n) => {
                    self.read_buf.extend_from_slice(&chunk[..n]);
                    self.parse_lines();
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn parse_lines(&mut self) {
        while let Some(pos) = self.read_buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.read_buf.drain(..=pos).collect();
            if std::mem::take(&mut self.skipping_line) || line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<DecisionResponse>(&line) {
                Ok(response) => self.queue(response),
                Err(err) => warn!(%err, "dropping malformed message from remote participant"),
            }
        }
        if self.read_buf.len() > MAX_LINE_LEN {
            warn!(len = self.read_buf.len(), "dropping oversized message from remote participant");
            self.read_buf.clear();
            self.skipping_line = true;
        }
    }

    fn queue(&mut self, response: DecisionResponse) {
        if self.inbox.len() >= MAX_QUEUED_RESPONSES {
            let dropped = self.inbox.remove(0);
            warn!(id = %dropped.id, "response queue full, dropping oldest");
        }
        self.inbox.push(response);
    }

    /// Bytes of an unfinished line held back until its newline arrives.
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.read_buf.len()
    }

    /// Parsed responses not yet collected.
    #[inline]
    pub fn unclaimed(&self) -> usize {
        self.inbox.len()
    }
}

impl RemotePeer for TcpPeer {
    fn send(&mut self, message: &Outbound) -> Result<(), LinkError> {
        if self.closed {
            return Err(LinkError::Disconnected);
        }
        serde_json::to_writer(&mut self.write_buf, message)?;
        self.write_buf.push(b'\n');
        self.flush_pending()
    }

    fn poll_response(&mut self, id: RequestId) -> Result<Option<Decision>, LinkError> {
        let read = if self.closed {
            Err(LinkError::Disconnected)
        } else {
            self.flush_pending().and_then(|_| self.fill())
        };
        self.parse_lines();
        if let Some(decision) = take_response(&mut self.inbox, id) {
            return Ok(Some(decision));
        }
        read.map(|_| None)
    }

    fn retain_pending(&mut self, pending: &[RequestId]) {
        drop_stale(&mut self.inbox, pending);
    }
}
