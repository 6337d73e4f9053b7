use enumset::EnumSet;

use crate::prelude::*;



pub mod remote;

pub mod prop_tests;



pub const FOE: BattlerId = BattlerId::OpponentLeft;

/// Upper bound on ticks for commands that are expected to finish.
pub const MAX_TICKS: u32 = 10_000;

/// Session with a multiplayer controller on every battler and logging enabled.
pub fn multiplayer_session(config: ControllerConfig) -> BattleSession {
    let mut session = BattleSession::new(config.with_enable_log(true));
    for battler in BattlerId::all() {
        session.set_controller_to_multiplayer(battler);
    }
    session
}

pub fn default_session() -> BattleSession {
    multiplayer_session(ControllerConfig::default())
}

impl BattleSession {
    /// Emits a command and ticks until it completes. Returns the number of ticks taken.
    ///
    /// Panics: If `emit` fails or the command does not complete within [MAX_TICKS].
    fn run_command(
        &mut self,
        battler: BattlerId,
        opcode: Opcode,
        payload: &[u8],
        host: &mut dyn BattleHost,
        peer: &mut dyn RemotePeer,
    ) -> u32 {
        self.emit(battler, opcode, payload).unwrap();
        self.run_until_complete(battler, host, peer)
    }

    /// Panics: If the battler's command does not complete within [MAX_TICKS].
    fn run_until_complete(&mut self, battler: BattlerId, host: &mut dyn BattleHost, peer: &mut dyn RemotePeer) -> u32 {
        for t in 1..=MAX_TICKS {
            self.tick(host, peer);
            if !self.is_pending(battler) {
                return t;
            }
        }
        panic!("{battler}: command did not complete");
    }

    fn count_events<F: Fn(&ControllerEvent) -> bool>(&self, f: F) -> usize {
        self.log.events.iter().filter(|e| f(e)).count()
    }
}
