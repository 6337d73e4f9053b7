use rand::{rngs::SmallRng, SeedableRng};
use tracing::debug;

use crate::config::ControllerConfig;
use crate::data_structures::Inbox;
use crate::types::decision::{Decision, DecisionRequest, DecisionResponse, Outbound, RequestId};

mod fallback;

#[cfg(feature = "link")]
mod tcp;

pub use fallback::*;

#[cfg(feature = "link")]
pub use tcp::{TcpPeer, MAX_LINE_LEN};

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("no remote participant is connected")]
    Offline,
    #[error("remote participant disconnected")]
    Disconnected,
    #[error("link I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "link")]
    #[error("malformed link message: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Capability for exchanging messages with the remote participant.
///
/// Both calls are made from inside a tick and must not block.
pub trait RemotePeer {
    fn send(&mut self, message: &Outbound) -> Result<(), LinkError>;

    /// The decision answering `id`, once it has arrived.
    fn poll_response(&mut self, id: RequestId) -> Result<Option<Decision>, LinkError>;

    /// Drops buffered responses that answer none of the `pending` requests: late answers to
    /// requests that already fell back and answers to ids that were never issued.
    fn retain_pending(&mut self, _pending: &[RequestId]) {}
}

/// Peer for sessions without a link: every exchange fails, so every choice falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflinePeer;

impl RemotePeer for OfflinePeer {
    fn send(&mut self, _message: &Outbound) -> Result<(), LinkError> {
        Err(LinkError::Offline)
    }

    fn poll_response(&mut self, _id: RequestId) -> Result<Option<Decision>, LinkError> {
        Err(LinkError::Offline)
    }
}

/// In-memory peer: keeps what was sent and hands out responses queued with [QueuedPeer::respond].
#[derive(Debug, Clone, Default)]
pub struct QueuedPeer {
    pub sent: Vec<Outbound>,
    /// When set, every call fails with [LinkError::Disconnected].
    pub disconnected: bool,
    responses: Inbox<DecisionResponse>,
}

impl QueuedPeer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&mut self, id: RequestId, decision: Decision) {
        self.responses.push(DecisionResponse { id, decision });
    }

    pub fn requests(&self) -> Vec<DecisionRequest> {
        self.sent
            .iter()
            .filter_map(|m| match m {
                Outbound::Request(r) => Some(*r),
                Outbound::Notice(..) => None,
            })
            .collect()
    }

    pub fn last_request(&self) -> Option<DecisionRequest> {
        self.requests().last().copied()
    }

    /// Responses queued but not yet collected.
    pub fn unclaimed(&self) -> usize {
        self.responses.len()
    }
}

impl RemotePeer for QueuedPeer {
    fn send(&mut self, message: &Outbound) -> Result<(), LinkError> {
        if self.disconnected {
            return Err(LinkError::Disconnected);
        }
        self.sent.push(*message);
        Ok(())
    }

    fn poll_response(&mut self, id: RequestId) -> Result<Option<Decision>, LinkError> {
        if self.disconnected {
            return Err(LinkError::Disconnected);
        }
        Ok(take_response(&mut self.responses, id))
    }

    fn retain_pending(&mut self, pending: &[RequestId]) {
        drop_stale(&mut self.responses, pending);
    }
}

/// Removes and returns the first queued response answering `id`.
pub(crate) fn take_response(inbox: &mut Inbox<DecisionResponse>, id: RequestId) -> Option<Decision> {
    let pos = inbox.iter().position(|r| r.id == id)?;
    Some(inbox.remove(pos).decision)
}

/// Removes every queued response whose id is not in `pending`.
pub(crate) fn drop_stale(inbox: &mut Inbox<DecisionResponse>, pending: &[RequestId]) {
    let before = inbox.len();
    inbox.retain(|r| pending.contains(&r.id));
    if inbox.len() < before {
        debug!(dropped = before - inbox.len(), "discarded stale responses");
    }
}

/// Session-side state of the link: request numbering, timeout and the fallback RNG.
#[derive(Debug, Clone)]
pub struct RemoteLink {
    pub response_timeout_ticks: u32,
    pub forward_notices: bool,
    next_id: u32,
    pub(crate) rng: SmallRng,
}

impl RemoteLink {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            response_timeout_ticks: config.response_timeout_ticks,
            forward_notices: config.forward_notices,
            next_id: 0,
            rng: SmallRng::seed_from_u64(config.fallback_seed),
        }
    }

    pub fn next_request_id(&mut self) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}
