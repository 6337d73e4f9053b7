use enum_map::EnumMap;
use lazy_static::lazy_static;

use crate::types::opcode::Opcode;

use super::handler_context::HandlerContext;
use super::handlers::*;
use super::types::Step;

pub type Handler = fn(&mut HandlerContext<'_>) -> Step;

/// Opcode to handler mapping of one controller variant. Every slot holds a handler.
#[derive(Clone)]
pub struct CommandTable {
    handlers: EnumMap<Opcode, Handler>,
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable").field("len", &Opcode::COUNT).finish()
    }
}

impl CommandTable {
    pub fn from_fn<F: FnMut(Opcode) -> Handler>(f: F) -> Self {
        Self {
            handlers: EnumMap::from_fn(f),
        }
    }

    #[inline]
    pub fn get(&self, opcode: Opcode) -> Handler {
        self.handlers[opcode]
    }

    /// Handler for a raw command byte, `None` when the byte is past the end of the catalogue.
    #[inline]
    pub fn lookup(&self, raw: u8) -> Option<(Opcode, Handler)> {
        let opcode = Opcode::from_u8(raw)?;
        Some((opcode, self.handlers[opcode]))
    }

    #[inline]
    pub fn len(&self) -> usize {
        Opcode::COUNT
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

lazy_static! {
    /// Command table of the multiplayer controller. Built on first use.
    pub static ref MULTIPLAYER_COMMANDS: CommandTable = CommandTable::from_fn(multiplayer_handler);
}

fn multiplayer_handler(opcode: Opcode) -> Handler {
    match opcode {
        Opcode::GetMonData => get_mon_data,
        Opcode::GetRawMonData => get_raw_mon_data,
        Opcode::SetMonData => set_mon_data,
        Opcode::SetRawMonData => set_raw_mon_data,
        Opcode::LoadMonSprite => load_mon_sprite,
        Opcode::SwitchInAnim => switch_in_anim,
        Opcode::ReturnMonToBall => return_mon_to_ball,
        Opcode::DrawTrainerPic => draw_trainer_pic,
        Opcode::TrainerSlide => complete_immediately,
        Opcode::TrainerSlideBack => trainer_slide_back,
        Opcode::FaintAnimation => faint_animation,
        Opcode::PaletteFade => complete_immediately,
        Opcode::SuccessBallThrowAnim => complete_immediately,
        Opcode::BallThrowAnim => complete_immediately,
        Opcode::Pause => complete_immediately,
        Opcode::MoveAnimation => move_animation,
        Opcode::PrintString => print_string,
        Opcode::PrintSelectionString => complete_immediately,
        Opcode::ChooseAction => choose_action,
        Opcode::UnknownYesNoBox => complete_immediately,
        Opcode::ChooseMove => choose_move,
        Opcode::ChooseItem => choose_item,
        Opcode::ChoosePokemon => choose_pokemon,
        Opcode::Cmd23 => complete_immediately,
        Opcode::HealthBarUpdate => health_bar_update,
        Opcode::ExpUpdate => complete_immediately,
        Opcode::StatusIconUpdate => status_icon_update,
        Opcode::StatusAnimation => status_animation,
        Opcode::StatusXor => status_xor,
        Opcode::DataTransfer => complete_immediately,
        Opcode::Dma3Transfer => complete_immediately,
        Opcode::PlayBgm => play_bgm,
        Opcode::Cmd32 => complete_immediately,
        Opcode::TwoReturnValues => complete_immediately,
        Opcode::ChosenMonReturnValue => complete_immediately,
        Opcode::OneReturnValue => complete_immediately,
        Opcode::OneReturnValueDuplicate => complete_immediately,
        Opcode::ClearUnkVar => clear_unk_var,
        Opcode::SetUnkVar => set_unk_var,
        Opcode::ClearUnkFlag => clear_unk_flag,
        Opcode::ToggleUnkFlag => toggle_unk_flag,
        Opcode::HitAnimation => hit_animation,
        Opcode::CantSwitch => complete_immediately,
        Opcode::PlaySe => play_se,
        Opcode::PlayFanfare => play_fanfare,
        Opcode::FaintingCry => fainting_cry,
        Opcode::IntroSlide => intro_slide,
        Opcode::IntroTrainerBallThrow => intro_trainer_ball_throw,
        Opcode::DrawPartyStatusSummary => draw_party_status_summary,
        Opcode::HidePartyStatusSummary => hide_party_status_summary,
        Opcode::EndBounceEffect => end_bounce_effect,
        Opcode::SpriteInvisibility => sprite_invisibility,
        Opcode::BattleAnimation => battle_animation,
        Opcode::LinkStandbyMsg => complete_immediately,
        Opcode::ResetActionMoveSelection => complete_immediately,
        Opcode::EndLinkBattle => end_link_battle,
        Opcode::TerminatorNop => complete_immediately,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_bounds() {
        let table = &*MULTIPLAYER_COMMANDS;
        assert_eq!(Opcode::COUNT, table.len());
        assert_eq!(Some(Opcode::PlaySe), table.lookup(43).map(|(op, _)| op));
        assert_eq!(Some(Opcode::TerminatorNop), table.lookup(56).map(|(op, _)| op));
        assert!(table.lookup(57).is_none());
        assert!(table.lookup(255).is_none());
    }
}
