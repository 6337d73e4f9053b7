use enumset::EnumSet;

use super::battler::BattlerId;

/// One bit per battler: set while that battler has a command it has not acknowledged yet.
///
/// The scheduler sets a bit when it hands over a command; only the matching handler clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecFlags(pub EnumSet<BattlerId>);

impl ExecFlags {
    pub const NONE: ExecFlags = ExecFlags(EnumSet::EMPTY);

    #[inline]
    pub fn is_set(&self, battler: BattlerId) -> bool {
        self.0.contains(battler)
    }

    #[inline]
    pub fn set(&mut self, battler: BattlerId) {
        self.0.insert(battler);
    }

    /// Returns `true` if the flag was set.
    #[inline]
    pub fn clear(&mut self, battler: BattlerId) -> bool {
        self.0.remove(battler)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn pending(&self) -> EnumSet<BattlerId> {
        self.0
    }

    /// Raw bit pattern, bit `n` for battler index `n`.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.0.as_repr()
    }
}
