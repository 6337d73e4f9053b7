use std::fmt::Display;

use super::battler::BattlerId;
use super::decision::{Decision, RequestId};
use super::host::Settle;
use super::opcode::Opcode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaitSummary {
    Settle(Settle),
    Remote(RequestId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerEvent {
    Dispatched(BattlerId, Opcode),
    OutOfRange(BattlerId, u8),
    Deferred(BattlerId, Opcode, WaitSummary),
    /// `ticks` counts the ticks spent waiting after the handler first ran.
    Completed {
        battler: BattlerId,
        opcode: Option<Opcode>,
        ticks: u32,
    },
    Requested(BattlerId, RequestId),
    Answered(BattlerId, RequestId, Decision),
    Rejected(BattlerId, RequestId, Decision),
    TimedOut(BattlerId, RequestId),
    LinkFailed(BattlerId, Option<RequestId>),
    Fallback(BattlerId, RequestId, Decision),
    NoticeDropped(BattlerId),
    BattleEnded(u8),
}

impl ControllerEvent {
    pub fn battler(&self) -> Option<BattlerId> {
        match *self {
            ControllerEvent::Dispatched(b, ..)
            | ControllerEvent::OutOfRange(b, ..)
            | ControllerEvent::Deferred(b, ..)
            | ControllerEvent::Completed { battler: b, .. }
            | ControllerEvent::Requested(b, ..)
            | ControllerEvent::Answered(b, ..)
            | ControllerEvent::Rejected(b, ..)
            | ControllerEvent::TimedOut(b, ..)
            | ControllerEvent::LinkFailed(b, ..)
            | ControllerEvent::Fallback(b, ..)
            | ControllerEvent::NoticeDropped(b) => Some(b),
            ControllerEvent::BattleEnded(..) => None,
        }
    }

    pub fn indent_level(&self) -> u8 {
        match self {
            ControllerEvent::Dispatched(..) => 0,
            ControllerEvent::OutOfRange(..) => 0,
            ControllerEvent::BattleEnded(..) => 0,
            ControllerEvent::Deferred(..) => 1,
            ControllerEvent::Completed { .. } => 1,
            ControllerEvent::Requested(..) => 2,
            ControllerEvent::Answered(..) => 2,
            ControllerEvent::Rejected(..) => 2,
            ControllerEvent::TimedOut(..) => 2,
            ControllerEvent::LinkFailed(..) => 2,
            ControllerEvent::Fallback(..) => 2,
            ControllerEvent::NoticeDropped(..) => 2,
        }
    }
}

impl Display for ControllerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerEvent::Dispatched(b, op) => write!(f, "{b}: {op}"),
            ControllerEvent::OutOfRange(b, raw) => write!(f, "{b}: opcode {raw} out of range, completed"),
            ControllerEvent::Deferred(b, op, WaitSummary::Settle(s)) => write!(f, "{b}: {op} waiting on {s}"),
            ControllerEvent::Deferred(b, op, WaitSummary::Remote(id)) => {
                write!(f, "{b}: {op} waiting on remote decision {id}")
            }
            ControllerEvent::Completed { battler, opcode, ticks } => match opcode {
                Some(op) => write!(f, "{battler}: {op} completed after {ticks} ticks"),
                None => write!(f, "{battler}: completed"),
            },
            ControllerEvent::Requested(b, id) => write!(f, "{b}: sent decision request {id}"),
            ControllerEvent::Answered(b, id, d) => write!(f, "{b}: remote answered {id} with {d:?}"),
            ControllerEvent::Rejected(b, id, d) => write!(f, "{b}: rejected answer {d:?} to {id}"),
            ControllerEvent::TimedOut(b, id) => write!(f, "{b}: request {id} timed out"),
            ControllerEvent::LinkFailed(b, Some(id)) => write!(f, "{b}: link failed during {id}"),
            ControllerEvent::LinkFailed(b, None) => write!(f, "{b}: link failed"),
            ControllerEvent::Fallback(b, id, d) => write!(f, "{b}: fallback for {id}: {d:?}"),
            ControllerEvent::NoticeDropped(b) => write!(f, "{b}: battle notice dropped"),
            ControllerEvent::BattleEnded(outcome) => write!(f, "Battle ended with outcome {outcome}"),
        }
    }
}

/// In-memory record of what the controller did, kept only while `enabled`.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerLog {
    pub enabled: bool,
    pub events: Vec<ControllerEvent>,
}

impl std::fmt::Debug for ControllerLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerLog")
            .field("enabled", &self.enabled)
            .field("events", &self.events.len())
            .finish()
    }
}

impl ControllerLog {
    pub fn new(enabled: bool) -> ControllerLog {
        ControllerLog {
            enabled,
            events: vec![],
        }
    }

    #[inline]
    pub fn log(&mut self, event: ControllerEvent) {
        if self.enabled {
            self.events.push(event)
        }
    }

    pub fn print(&self) {
        for event in &self.events {
            let prefix = " ".repeat(2 * Into::<usize>::into(event.indent_level()));
            println!("{prefix}{event}");
        }
    }

    pub fn filter<T, F: Fn(&ControllerEvent) -> Option<T>>(&self, f: F) -> Vec<T> {
        self.events.iter().filter_map(f).collect()
    }

    pub fn for_battler(&self, battler: BattlerId) -> Vec<ControllerEvent> {
        self.filter(|e| (e.battler() == Some(battler)).then_some(*e))
    }

    pub fn clear(&mut self) {
        self.events.clear()
    }
}
