use enumset::EnumSet;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    config::ControllerConfig,
    dispatcher_ops::{
        handlers::complete_immediately, BattlerState, CommandTable, ControllerError, ControllerScratch,
        HandlerContext, Step, Wait, MULTIPLAYER_COMMANDS,
    },
    remote::{RemoteLink, RemotePeer},
    types::{
        battler::{BattlerId, ByBattler},
        buffer::CommandBuffer,
        decision::RequestId,
        exec_flags::ExecFlags,
        host::BattleHost,
        logging::{ControllerEvent, ControllerLog},
        opcode::Opcode,
        reply::Reply,
    },
};

/// Which controller variant drives a battler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerKind {
    /// Dispatch steps do nothing until a controller is installed.
    #[default]
    Unassigned,
    Multiplayer,
}

impl ControllerKind {
    #[inline]
    pub fn table(&self) -> Option<&'static CommandTable> {
        match self {
            ControllerKind::Unassigned => None,
            ControllerKind::Multiplayer => Some(&*MULTIPLAYER_COMMANDS),
        }
    }
}

/// Per-battler controller state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattlerSlot {
    pub buffer: CommandBuffer,
    /// Answer to the scheduler, written by data and choice handlers.
    pub reply: Option<Reply>,
    pub state: BattlerState,
    pub controller: ControllerKind,
    /// Party slot of the active mon, updated by `SwitchInAnim`.
    pub party_slot: u8,
    /// Set by `SwitchInAnim`, cleared by `ReturnMonToBall`.
    pub on_field: bool,
    pub invisible: bool,
}

/// Controller side of one battle: command buffers, execution flags and per-battler state.
///
/// The scheduler hands a command to a battler with [BattleSession::emit] and then calls
/// [BattleSession::tick] once per frame until the battler's execution flag clears.
#[derive(Debug, Clone)]
pub struct BattleSession {
    config: ControllerConfig,
    exec_flags: ExecFlags,
    slots: ByBattler<BattlerSlot>,
    scratch: ControllerScratch,
    remote: RemoteLink,
    pub log: ControllerLog,
}

impl Default for BattleSession {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl BattleSession {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            exec_flags: ExecFlags::NONE,
            slots: Default::default(),
            scratch: ControllerScratch::default(),
            remote: RemoteLink::new(&config),
            log: ControllerLog::new(config.enable_log),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Installs the multiplayer command table for `battler`.
    pub fn set_controller_to_multiplayer(&mut self, battler: BattlerId) {
        self.slots[battler].controller = ControllerKind::Multiplayer;
    }

    #[inline]
    pub fn controller(&self, battler: BattlerId) -> ControllerKind {
        self.slots[battler].controller
    }

    /// Writes a command into the battler's buffer and sets its execution flag. Fails if the battler
    /// has no controller installed or is still running a command.
    pub fn emit(&mut self, battler: BattlerId, opcode: Opcode, payload: &[u8]) -> Result<(), ControllerError> {
        self.ensure_ready(battler)?;
        let buffer = CommandBuffer::with_opcode(opcode, payload).ok_or(ControllerError::BufferOverflow {
            battler,
            len: payload.len() + 1,
        })?;
        self.hand_over(battler, buffer);
        Ok(())
    }

    /// Like [BattleSession::emit] but takes the whole command, opcode byte included. The opcode byte
    /// may be out of range.
    pub fn emit_raw(&mut self, battler: BattlerId, bytes: &[u8]) -> Result<(), ControllerError> {
        self.ensure_ready(battler)?;
        if bytes.is_empty() {
            return Err(ControllerError::EmptyCommand(battler));
        }
        let buffer = CommandBuffer::from_slice(bytes).ok_or(ControllerError::BufferOverflow {
            battler,
            len: bytes.len(),
        })?;
        self.hand_over(battler, buffer);
        Ok(())
    }

    fn ensure_ready(&self, battler: BattlerId) -> Result<(), ControllerError> {
        if self.slots[battler].controller == ControllerKind::Unassigned {
            Err(ControllerError::NoController(battler))
        } else if self.exec_flags.is_set(battler) {
            Err(ControllerError::Busy(battler))
        } else {
            Ok(())
        }
    }

    fn hand_over(&mut self, battler: BattlerId, buffer: CommandBuffer) {
        let slot = &mut self.slots[battler];
        slot.buffer = buffer;
        slot.reply = None;
        slot.state = BattlerState::Idle;
        self.exec_flags.set(battler);
    }

    /// Runs one dispatch step for `battler`. Returns `true` if its command completed in this step.
    ///
    /// Does nothing when the battler's flag is clear or no controller is installed. Otherwise either
    /// polls the continuation left by an earlier step or runs the handler for the buffer's opcode.
    /// Opcodes past the end of the catalogue complete immediately.
    pub fn dispatch_step(&mut self, battler: BattlerId, host: &mut dyn BattleHost, peer: &mut dyn RemotePeer) -> bool {
        if !self.exec_flags.is_set(battler) {
            return false;
        }
        let Some(table) = self.slots[battler].controller.table() else {
            return false;
        };
        let partner = &self.slots[battler.partner()];
        let partner_slot = partner.on_field.then_some(partner.party_slot);

        let Self {
            exec_flags,
            slots,
            scratch,
            remote,
            log,
            ..
        } = self;
        let slot = &mut slots[battler];
        let previous = slot.state;
        let raw = slot.buffer.raw_opcode();
        let mut ctx = HandlerContext {
            battler,
            buffer: &slot.buffer,
            reply: &mut slot.reply,
            party_slot: &mut slot.party_slot,
            on_field: &mut slot.on_field,
            partner_slot,
            invisible: &mut slot.invisible,
            scratch: &mut *scratch,
            log: &mut *log,
            remote: &mut *remote,
            host,
            peer,
        };

        let (opcode, step, ticks) = match previous {
            BattlerState::Awaiting { opcode, wait, ticks } => {
                let ticks = ticks.saturating_add(1);
                (Some(opcode), ctx.poll_wait(wait, ticks), ticks)
            }
            BattlerState::Idle | BattlerState::Complete(..) => match table.lookup(raw) {
                Some((opcode, handler)) => {
                    debug!(%battler, %opcode, "dispatching command");
                    ctx.log.log(ControllerEvent::Dispatched(battler, opcode));
                    (Some(opcode), handler(&mut ctx), 0)
                }
                None => {
                    warn!(%battler, raw, "opcode out of range");
                    ctx.log.log(ControllerEvent::OutOfRange(battler, raw));
                    (None, complete_immediately(&mut ctx), 0)
                }
            },
        };

        match (step, opcode) {
            (Step::Wait(wait), Some(opcode)) => {
                if !previous.is_awaiting() {
                    log.log(ControllerEvent::Deferred(battler, opcode, wait.summary()));
                }
                slot.state = BattlerState::Awaiting { opcode, wait, ticks };
                false
            }
            _ => {
                exec_flags.clear(battler);
                slot.state = BattlerState::Complete(opcode);
                if opcode.is_some() {
                    debug!(%battler, ticks, "command completed");
                    log.log(ControllerEvent::Completed {
                        battler,
                        opcode,
                        ticks,
                    });
                }
                true
            }
        }
    }

    /// Runs the dispatch step of every battler in index order. Returns the battlers whose command
    /// completed during this tick.
    ///
    /// Afterwards the peer drops any buffered response that no battler is still waiting for.
    pub fn tick(&mut self, host: &mut dyn BattleHost, peer: &mut dyn RemotePeer) -> EnumSet<BattlerId> {
        let mut completed = EnumSet::new();
        for battler in BattlerId::all() {
            if self.dispatch_step(battler, host, peer) {
                completed.insert(battler);
            }
        }
        peer.retain_pending(&self.pending_requests());
        completed
    }

    /// Ids of the remote decisions battlers are currently waiting for.
    pub fn pending_requests(&self) -> SmallVec<[RequestId; 4]> {
        self.slots
            .values()
            .filter_map(|slot| match slot.state {
                BattlerState::Awaiting {
                    wait: Wait::Remote(pending),
                    ..
                } => Some(pending.id),
                _ => None,
            })
            .collect()
    }

    #[inline]
    pub fn is_pending(&self, battler: BattlerId) -> bool {
        self.exec_flags.is_set(battler)
    }

    #[inline]
    pub fn exec_flags(&self) -> ExecFlags {
        self.exec_flags
    }

    #[inline]
    pub fn state(&self, battler: BattlerId) -> BattlerState {
        self.slots[battler].state
    }

    #[inline]
    pub fn slot(&self, battler: BattlerId) -> &BattlerSlot {
        &self.slots[battler]
    }

    #[inline]
    pub fn buffer(&self, battler: BattlerId) -> &CommandBuffer {
        &self.slots[battler].buffer
    }

    #[inline]
    pub fn reply(&self, battler: BattlerId) -> Option<&Reply> {
        self.slots[battler].reply.as_ref()
    }

    pub fn take_reply(&mut self, battler: BattlerId) -> Option<Reply> {
        self.slots[battler].reply.take()
    }

    #[inline]
    pub fn scratch(&self) -> ControllerScratch {
        self.scratch
    }

    /// Outcome recorded by `EndLinkBattle`.
    #[inline]
    pub fn outcome(&self) -> Option<u8> {
        self.scratch.outcome
    }

    /// Clears buffers, flags and per-battle state at the end of a battle. Installed controllers stay.
    /// Request ids keep counting, so responses left over from the battle are discarded on the next
    /// tick.
    pub fn reset(&mut self) {
        for slot in self.slots.values_mut() {
            *slot = BattlerSlot {
                controller: slot.controller,
                ..Default::default()
            };
        }
        self.exec_flags = ExecFlags::NONE;
        self.scratch = ControllerScratch::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::QueuedPeer;
    use crate::types::host::{HeadlessHost, Settle};

    #[test]
    fn test_poll_count_saturates() {
        let battler = BattlerId::OpponentLeft;
        let mut session = BattleSession::default();
        session.set_controller_to_multiplayer(battler);
        let mut host = HeadlessHost::new().with_latency(Settle::Sprite, 10);
        let mut peer = QueuedPeer::new();
        session.emit(battler, Opcode::SwitchInAnim, &[0]).unwrap();
        assert!(!session.dispatch_step(battler, &mut host, &mut peer));

        let BattlerState::Awaiting { opcode, wait, .. } = session.state(battler) else {
            panic!("expected an installed wait");
        };
        session.slots[battler].state = BattlerState::Awaiting {
            opcode,
            wait,
            ticks: u32::MAX,
        };
        assert!(!session.dispatch_step(battler, &mut host, &mut peer));
        assert_eq!(
            BattlerState::Awaiting {
                opcode,
                wait,
                ticks: u32::MAX
            },
            session.state(battler)
        );
    }
}
