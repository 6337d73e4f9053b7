use crate::types::{
    battler::BattlerId,
    decision::{DecisionKind, RequestId},
    host::Settle,
    logging::WaitSummary,
    opcode::Opcode,
};

/// Scheduler misuse reported by [crate::prelude::BattleSession::emit].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerError {
    #[error("battler {0} has no controller installed")]
    NoController(BattlerId),
    #[error("battler {0} still has a command outstanding")]
    Busy(BattlerId),
    #[error("empty command for battler {0}")]
    EmptyCommand(BattlerId),
    #[error("command of {len} bytes does not fit the buffer of battler {battler}")]
    BufferOverflow { battler: BattlerId, len: usize },
}

/// Remote decision a battler is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingDecision {
    pub id: RequestId,
    pub kind: DecisionKind,
}

/// Completion criterion of an asynchronous handler, polled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wait {
    Settle(Settle),
    Remote(PendingDecision),
}

impl Wait {
    pub fn summary(&self) -> WaitSummary {
        match self {
            Wait::Settle(s) => WaitSummary::Settle(*s),
            Wait::Remote(p) => WaitSummary::Remote(p.id),
        }
    }
}

/// Outcome of running a handler or polling its continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// The command is done; the battler's execution flag is cleared.
    Complete,
    Wait(Wait),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlerState {
    #[default]
    Idle,
    /// `ticks` counts continuation polls since the handler first ran.
    Awaiting { opcode: Opcode, wait: Wait, ticks: u32 },
    /// Last command finished. `None` when its opcode was out of range.
    Complete(Option<Opcode>),
}

impl BattlerState {
    #[inline]
    pub fn is_awaiting(&self) -> bool {
        matches!(self, BattlerState::Awaiting { .. })
    }
}
