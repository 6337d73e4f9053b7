use tracing::warn;

use crate::remote::{RemoteLink, RemotePeer};
use crate::types::{
    battler::BattlerId,
    buffer::CommandBuffer,
    decision::{BattleNotice, Outbound},
    host::{BattleHost, Cue},
    logging::{ControllerEvent, ControllerLog},
    reply::Reply,
};

use super::types::{Step, Wait};

/// Controller state shared by every battler of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerScratch {
    /// Written by `ClearUnkVar`/`SetUnkVar`.
    pub var: u8,
    /// Written by `ClearUnkFlag`/`ToggleUnkFlag`.
    pub flag: bool,
    /// Set by `EndLinkBattle`.
    pub outcome: Option<u8>,
}

/// Everything a handler may read or change while running for one battler.
pub struct HandlerContext<'a> {
    pub battler: BattlerId,
    pub buffer: &'a CommandBuffer,
    pub reply: &'a mut Option<Reply>,
    /// Party slot of the battler's active mon.
    pub party_slot: &'a mut u8,
    pub on_field: &'a mut bool,
    /// Party slot of the partner's mon while it is on the field.
    pub partner_slot: Option<u8>,
    pub invisible: &'a mut bool,
    pub scratch: &'a mut ControllerScratch,
    pub log: &'a mut ControllerLog,
    pub remote: &'a mut RemoteLink,
    pub host: &'a mut dyn BattleHost,
    pub peer: &'a mut dyn RemotePeer,
}

impl<'a> HandlerContext<'a> {
    #[inline]
    pub fn present(&mut self, cue: Cue) {
        self.host.present(self.battler, cue)
    }

    /// Starts `cue` and waits for it to settle if it plays out over several frames.
    pub fn present_and_wait(&mut self, cue: Cue) -> Step {
        self.present(cue);
        match cue.settles_on() {
            Some(settle) => Step::Wait(Wait::Settle(settle)),
            None => Step::Complete,
        }
    }

    #[inline]
    pub fn reply_with(&mut self, reply: Reply) {
        *self.reply = Some(reply);
    }

    /// Sends a battle summary to the remote participant. Failures are logged and otherwise ignored.
    pub fn notify(&mut self, notice: BattleNotice) {
        if !self.remote.forward_notices {
            return;
        }
        if let Err(err) = self.peer.send(&Outbound::Notice(notice)) {
            warn!(battler = %self.battler, %err, ?notice, "battle notice dropped");
            self.log.log(ControllerEvent::NoticeDropped(self.battler));
        }
    }
}
