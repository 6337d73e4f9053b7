use std::fmt::Display;

use enum_map::{Enum, EnumMap};
use enumset::{EnumSet, EnumSetType};

/// Battler slot in the active battle.
///
/// Declaration order is the battler index order; dispatch steps run in this order every tick.
#[derive(Debug, Hash, PartialOrd, Ord, EnumSetType, Enum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[enumset(repr = "u8")]
pub enum BattlerId {
    PlayerLeft,
    OpponentLeft,
    PlayerRight,
    OpponentRight,
}

/// Per-battler storage indexed by [BattlerId].
pub type ByBattler<T> = EnumMap<BattlerId, T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlerSide {
    Player,
    Opponent,
}

impl Display for BattlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattlerId::PlayerLeft => f.write_str("P1"),
            BattlerId::OpponentLeft => f.write_str("O1"),
            BattlerId::PlayerRight => f.write_str("P2"),
            BattlerId::OpponentRight => f.write_str("O2"),
        }
    }
}

impl BattlerId {
    pub const COUNT: usize = 4;

    #[inline]
    pub fn all() -> EnumSet<BattlerId> {
        EnumSet::all()
    }

    #[inline]
    pub fn index(self) -> u8 {
        self.into_usize() as u8
    }

    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        let index = index as usize;
        if index < Self::LENGTH {
            Some(Self::from_usize(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn side(self) -> BattlerSide {
        match self {
            BattlerId::PlayerLeft | BattlerId::PlayerRight => BattlerSide::Player,
            BattlerId::OpponentLeft | BattlerId::OpponentRight => BattlerSide::Opponent,
        }
    }

    /// The battler facing this one across the field.
    #[inline]
    pub fn foe(self) -> Self {
        match self {
            BattlerId::PlayerLeft => BattlerId::OpponentLeft,
            BattlerId::OpponentLeft => BattlerId::PlayerLeft,
            BattlerId::PlayerRight => BattlerId::OpponentRight,
            BattlerId::OpponentRight => BattlerId::PlayerRight,
        }
    }

    /// The other battler on the same side.
    #[inline]
    pub fn partner(self) -> Self {
        match self {
            BattlerId::PlayerLeft => BattlerId::PlayerRight,
            BattlerId::OpponentLeft => BattlerId::OpponentRight,
            BattlerId::PlayerRight => BattlerId::PlayerLeft,
            BattlerId::OpponentRight => BattlerId::OpponentLeft,
        }
    }
}
