use enum_map::{Enum, EnumMap};

use crate::data_structures::MonData;

use super::battler::{BattlerId, ByBattler};

pub const PARTY_SIZE: usize = 6;

/// Party slot value meaning "no switch" in a party choice.
pub const PARTY_CANCEL: u8 = PARTY_SIZE as u8;

/// `GetMonData`/`SetMonData` request addressing the whole battle record.
pub const REQUEST_ALL_BATTLE: u8 = 0;

/// Host-owned asynchronous effect a handler can wait on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Settle {
    /// The battler's sprite callback is back to its idle state.
    Sprite,
    Animation,
    Text,
    HealthBar,
    StatusAnimation,
}

crate::impl_display_from_debug!(Settle);

/// Side effect a handler asks the host to perform for a battler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cue {
    LoadMonSprite { party_slot: u8 },
    SendOut { party_slot: u8 },
    ReturnToBall,
    FreeSprite,
    DrawTrainerPic,
    TrainerSlideBack,
    Faint,
    MoveAnimation { move_id: u16, turn: u8 },
    PrintString { string_id: u16 },
    HealthBar { delta: i16 },
    StatusIcon { status1: u32, status2: u32 },
    StatusAnimation { is_status2: bool, status: u32 },
    StatusXor { mask: u8 },
    HitBlink,
    SoundEffect { song: u16 },
    Fanfare { song: u16 },
    Bgm { song: u16 },
    FaintingCry,
    IntroSlide { terrain: u8 },
    TrainerBallThrow,
    PartyStatusSummary { visible: bool },
    EndBounce,
    SpriteVisibility { invisible: bool },
    BattleAnimation { animation: u8, argument: u16 },
    FadeOutMusic,
    PaletteFadeOut,
}

impl Cue {
    /// What the host reports as finished once this cue has played out, if it runs over several frames.
    pub fn settles_on(&self) -> Option<Settle> {
        match self {
            Cue::LoadMonSprite { .. }
            | Cue::SendOut { .. }
            | Cue::DrawTrainerPic
            | Cue::TrainerSlideBack
            | Cue::Faint
            | Cue::HitBlink
            | Cue::TrainerBallThrow => Some(Settle::Sprite),
            Cue::ReturnToBall | Cue::MoveAnimation { .. } | Cue::BattleAnimation { .. } => Some(Settle::Animation),
            Cue::PrintString { .. } => Some(Settle::Text),
            Cue::HealthBar { .. } => Some(Settle::HealthBar),
            Cue::StatusIcon { .. } | Cue::StatusAnimation { .. } => Some(Settle::StatusAnimation),
            Cue::FreeSprite
            | Cue::StatusXor { .. }
            | Cue::SoundEffect { .. }
            | Cue::Fanfare { .. }
            | Cue::Bgm { .. }
            | Cue::FaintingCry
            | Cue::IntroSlide { .. }
            | Cue::PartyStatusSummary { .. }
            | Cue::EndBounce
            | Cue::SpriteVisibility { .. }
            | Cue::FadeOutMusic
            | Cue::PaletteFadeOut => None,
        }
    }
}

/// Engine-side collaborator: graphics, audio and party data.
///
/// Handlers only ever talk to the engine through this trait. Multi-frame effects are started with
/// [BattleHost::present] and observed with [BattleHost::poll_settled] on later ticks.
pub trait BattleHost {
    fn present(&mut self, battler: BattlerId, cue: Cue);

    /// Called at most once per tick per waiting battler.
    fn poll_settled(&mut self, battler: BattlerId, settle: Settle) -> bool;

    #[allow(unused_variables)]
    fn mon_data(&self, battler: BattlerId, party_slot: u8, request: u8) -> MonData {
        MonData::new()
    }

    #[allow(unused_variables)]
    fn set_mon_data(&mut self, battler: BattlerId, party_slot: u8, request: u8, data: &[u8]) {}

    #[allow(unused_variables)]
    fn raw_mon_data(&self, battler: BattlerId, party_slot: u8, offset: u8, size: u8) -> MonData {
        MonData::new()
    }

    #[allow(unused_variables)]
    fn set_raw_mon_data(&mut self, battler: BattlerId, party_slot: u8, offset: u8, data: &[u8]) {}

    #[allow(unused_variables)]
    fn can_switch_to(&self, battler: BattlerId, party_slot: u8) -> bool {
        false
    }
}

/// Host without graphics or audio: records every cue and reports an effect as settled after a
/// configurable number of polls.
///
/// Party records are plain byte vectors. Request [REQUEST_ALL_BATTLE] addresses the whole record,
/// request `n > 0` addresses byte `n`.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    pub latency: EnumMap<Settle, u16>,
    pub cues: Vec<(BattlerId, Cue)>,
    pub party: ByBattler<[Vec<u8>; PARTY_SIZE]>,
    pub fainted: ByBattler<[bool; PARTY_SIZE]>,
    remaining: ByBattler<EnumMap<Settle, Option<u16>>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, settle: Settle, polls: u16) -> Self {
        self.latency[settle] = polls;
        self
    }

    pub fn with_party_member(mut self, battler: BattlerId, party_slot: u8, record: &[u8]) -> Self {
        if let Some(slot) = self.party[battler].get_mut(party_slot as usize) {
            *slot = record.to_vec();
        }
        self
    }

    pub fn cues_for(&self, battler: BattlerId) -> Vec<Cue> {
        self.cues
            .iter()
            .filter(|(b, _)| *b == battler)
            .map(|(_, c)| *c)
            .collect()
    }

    #[inline]
    pub fn is_waiting(&self, battler: BattlerId, settle: Settle) -> bool {
        self.remaining[battler][settle].is_some()
    }

    fn record(&self, battler: BattlerId, party_slot: u8) -> &[u8] {
        self.party[battler]
            .get(party_slot as usize)
            .map(|r| r.as_slice())
            .unwrap_or(&[])
    }

    fn record_mut(&mut self, battler: BattlerId, party_slot: u8) -> Option<&mut Vec<u8>> {
        self.party[battler].get_mut(party_slot as usize)
    }
}

impl BattleHost for HeadlessHost {
    fn present(&mut self, battler: BattlerId, cue: Cue) {
        self.cues.push((battler, cue));
        if let Some(settle) = cue.settles_on() {
            self.remaining[battler][settle] = Some(self.latency[settle]);
        }
    }

    fn poll_settled(&mut self, battler: BattlerId, settle: Settle) -> bool {
        let remaining = &mut self.remaining[battler][settle];
        match *remaining {
            None | Some(0) => {
                *remaining = None;
                true
            }
            Some(n) => {
                *remaining = Some(n - 1);
                false
            }
        }
    }

    fn mon_data(&self, battler: BattlerId, party_slot: u8, request: u8) -> MonData {
        let record = self.record(battler, party_slot);
        if request == REQUEST_ALL_BATTLE {
            record.iter().copied().collect()
        } else {
            record.get(request as usize).copied().into_iter().collect()
        }
    }

    fn set_mon_data(&mut self, battler: BattlerId, party_slot: u8, request: u8, data: &[u8]) {
        let Some(record) = self.record_mut(battler, party_slot) else {
            return;
        };
        if request == REQUEST_ALL_BATTLE {
            *record = data.to_vec();
        } else if let Some(&value) = data.first() {
            let idx = request as usize;
            if record.len() <= idx {
                record.resize(idx + 1, 0);
            }
            record[idx] = value;
        }
    }

    fn raw_mon_data(&self, battler: BattlerId, party_slot: u8, offset: u8, size: u8) -> MonData {
        let record = self.record(battler, party_slot);
        let start = (offset as usize).min(record.len());
        let end = (offset as usize + size as usize).min(record.len());
        record[start..end].iter().copied().collect()
    }

    fn set_raw_mon_data(&mut self, battler: BattlerId, party_slot: u8, offset: u8, data: &[u8]) {
        let Some(record) = self.record_mut(battler, party_slot) else {
            return;
        };
        let start = offset as usize;
        if record.len() < start + data.len() {
            record.resize(start + data.len(), 0);
        }
        record[start..start + data.len()].copy_from_slice(data);
    }

    fn can_switch_to(&self, battler: BattlerId, party_slot: u8) -> bool {
        let idx = party_slot as usize;
        idx < PARTY_SIZE && !self.party[battler][idx].is_empty() && !self.fainted[battler][idx]
    }
}
