use rand::{rngs::SmallRng, seq::IteratorRandom};

use crate::types::battler::BattlerId;
use crate::types::decision::{ActionChoice, Decision, DecisionKind};
use crate::types::host::{BattleHost, PARTY_CANCEL, PARTY_SIZE};

/// Whether a remote answer is legal for the battler that was asked.
pub fn is_valid_decision(battler: BattlerId, kind: &DecisionKind, decision: &Decision, host: &dyn BattleHost) -> bool {
    if !kind.accepts(decision) {
        return false;
    }
    match (*kind, *decision) {
        (DecisionKind::Move(menu), Decision::Move { slot, target }) => {
            let slot_ok = if menu.must_struggle() {
                slot == 0
            } else {
                menu.is_usable(slot)
            };
            slot_ok && (menu.is_double || target == battler.foe())
        }
        (DecisionKind::Party { .. }, Decision::Party(party_slot)) => {
            party_slot == PARTY_CANCEL || is_switch_target(battler, kind, party_slot, host)
        }
        _ => true,
    }
}

/// Decision taken on the remote participant's behalf after a timeout, a link failure or an
/// invalid answer.
pub fn fallback_decision(
    battler: BattlerId,
    kind: &DecisionKind,
    host: &dyn BattleHost,
    rng: &mut SmallRng,
) -> Decision {
    match *kind {
        DecisionKind::Action { .. } => Decision::Action(ActionChoice::Fight),
        DecisionKind::Move(menu) => Decision::Move {
            slot: menu.usable_slots().choose(rng).unwrap_or(0),
            target: battler.foe(),
        },
        DecisionKind::Item => Decision::Item(0),
        DecisionKind::Party { .. } => Decision::Party(
            (0..PARTY_SIZE as u8)
                .find(|&s| is_switch_target(battler, kind, s, host))
                .unwrap_or(PARTY_CANCEL),
        ),
    }
}

/// A party slot that is not on the field for either battler of the side and can battle.
fn is_switch_target(battler: BattlerId, kind: &DecisionKind, party_slot: u8, host: &dyn BattleHost) -> bool {
    let DecisionKind::Party {
        current_slot,
        partner_slot,
        ..
    } = *kind
    else {
        return false;
    };
    party_slot != current_slot && partner_slot != Some(party_slot) && host.can_switch_to(battler, party_slot)
}
