#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![doc = include_str!("../README.md")]

#[macro_export]
#[doc(hidden)]
macro_rules! impl_display_from_debug {
    (@single $Type: ident) => {
        impl std::fmt::Display for $Type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:?}", self)
            }
        }
    };
    ($($Type: ident)+) => {
        $(impl_display_from_debug!(@single $Type);)+
    };
}

/// Module containing collection datatypes used by this crate.
pub mod data_structures;

/// Controller configuration: remote endpoint, timeouts and logging.
pub mod config;

pub(crate) mod dispatcher;
pub(crate) mod dispatcher_ops;

/// Remote decision link: the peer capability, fallback policy and transports.
pub mod remote;

pub(crate) mod types;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `heapless` crate
pub use heapless;

/// Re-exports the `enum_map` crate
pub use enum_map;

/// Re-exports the `enumset` crate
pub use enumset;

/// Re-exports the `thiserror` crate
pub use thiserror;

pub mod prelude {
    pub use crate::config::{ControllerConfig, RemoteEndpoint};
    pub use crate::dispatcher::{BattleSession, BattlerSlot, ControllerKind};
    pub use crate::dispatcher_ops::{
        BattlerState, CommandTable, ControllerError, ControllerScratch, Handler, HandlerContext, PendingDecision, Step,
        Wait, MULTIPLAYER_COMMANDS,
    };
    pub use crate::remote::{fallback_decision, is_valid_decision, LinkError, OfflinePeer, QueuedPeer, RemotePeer};
    #[cfg(feature = "link")]
    pub use crate::remote::TcpPeer;
    pub use crate::types::battler::{BattlerId, ByBattler};
    pub use crate::types::buffer::{CommandBuffer, COMMAND_BUFFER_SIZE};
    pub use crate::types::decision::{
        ActionChoice, BattleNotice, Decision, DecisionKind, DecisionRequest, DecisionResponse, MoveMenu, Outbound,
        RequestId, ACTION_EXEC_SCRIPT,
    };
    pub use crate::types::exec_flags::ExecFlags;
    pub use crate::types::host::{BattleHost, Cue, HeadlessHost, Settle, PARTY_CANCEL, PARTY_SIZE};
    pub use crate::types::logging::{ControllerEvent, ControllerLog, WaitSummary};
    pub use crate::types::opcode::Opcode;
    pub use crate::types::reply::Reply;

    // Modules
    pub use crate::types::logging;
}

#[cfg(test)]
mod tests;
