use super::battler::BattlerId;
use super::buffer::CommandBuffer;
use super::reply::Reply;

/// Correlates a [DecisionResponse] with the [DecisionRequest] that asked for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestId(pub u32);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub const MAX_MON_MOVES: usize = 4;

/// Move menu of the battler being asked, as sent by the scheduler with `ChooseMove`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveMenu {
    pub is_double: bool,
    pub moves: [u16; MAX_MON_MOVES],
    pub pp: [u8; MAX_MON_MOVES],
}

impl MoveMenu {
    /// Layout: `[op, is_double, no_pp, unused, moves 4 x u16, pp 4 x u8]`.
    pub fn from_buffer(buffer: &CommandBuffer) -> Self {
        let mut moves = [0; MAX_MON_MOVES];
        let mut pp = [0; MAX_MON_MOVES];
        for i in 0..MAX_MON_MOVES {
            moves[i] = buffer.u16_le(4 + 2 * i);
            pp[i] = buffer.byte(12 + i);
        }
        Self {
            is_double: buffer.flag(1),
            moves,
            pp,
        }
    }

    #[inline]
    pub fn is_usable(&self, slot: u8) -> bool {
        let slot = slot as usize;
        slot < MAX_MON_MOVES && self.moves[slot] != 0 && self.pp[slot] > 0
    }

    pub fn usable_slots(&self) -> impl Iterator<Item = u8> + '_ {
        (0..MAX_MON_MOVES as u8).filter(|&s| self.is_usable(s))
    }

    /// With nothing usable the battler struggles, which is encoded as slot 0.
    #[inline]
    pub fn must_struggle(&self) -> bool {
        self.usable_slots().next().is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionKind {
    Action { previous: u8 },
    Move(MoveMenu),
    Item,
    /// `partner_slot` is the party slot of the partner's mon when it is on the field.
    Party {
        current_slot: u8,
        partner_slot: Option<u8>,
        case: u8,
    },
}

impl DecisionKind {
    #[inline]
    pub fn accepts(&self, decision: &Decision) -> bool {
        matches!(
            (self, decision),
            (DecisionKind::Action { .. }, Decision::Action(..))
                | (DecisionKind::Move(..), Decision::Move { .. })
                | (DecisionKind::Item, Decision::Item(..))
                | (DecisionKind::Party { .. }, Decision::Party(..))
        )
    }
}

/// Top-level choice made at the start of a turn. The discriminant is the action code sent back
/// to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ActionChoice {
    Fight = 0,
    Bag = 1,
    Switch = 2,
    Run = 3,
}

crate::impl_display_from_debug!(ActionChoice);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    Action(ActionChoice),
    Move { slot: u8, target: BattlerId },
    Item(u16),
    Party(u8),
}

/// Action code telling the scheduler that a move was picked from the move menu.
pub const ACTION_EXEC_SCRIPT: u8 = 10;

impl Decision {
    /// The reply the scheduler expects for this decision.
    pub fn to_reply(&self) -> Reply {
        match *self {
            Decision::Action(choice) => Reply::TwoReturnValues {
                ret8: choice as u8,
                ret16: 0,
            },
            Decision::Move { slot, target } => Reply::TwoReturnValues {
                ret8: ACTION_EXEC_SCRIPT,
                ret16: u16::from(slot) | (u16::from(target.index()) << 8),
            },
            Decision::Item(item) => Reply::OneReturnValue(item),
            Decision::Party(party_slot) => Reply::ChosenMonReturnValue {
                party_slot,
                order: [0; 3],
            },
        }
    }
}

/// Request sent to the remote participant when this battler must choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionRequest {
    pub id: RequestId,
    pub battler: BattlerId,
    pub kind: DecisionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionResponse {
    pub id: RequestId,
    pub decision: Decision,
}

/// Battle-state summary forwarded to the remote participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleNotice {
    SwitchedIn { battler: BattlerId, party_slot: u8 },
    Fainted { battler: BattlerId },
    HealthChanged { battler: BattlerId, delta: i16 },
    BattleEnded { outcome: u8 },
}

/// Everything this controller sends to the remote participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outbound {
    Request(DecisionRequest),
    Notice(BattleNotice),
}
