//! Handlers of the multiplayer controller, one per opcode.
//!
//! Payload offsets count from byte 0 of the command buffer, which holds the opcode.

use crate::data_structures::slots_from_mask;
use crate::mon_data;
use crate::types::{
    decision::{BattleNotice, DecisionKind, MoveMenu},
    host::Cue,
    logging::ControllerEvent,
    reply::Reply,
};

use super::handler_context::HandlerContext;
use super::types::Step;

/// Default handler: signals completion without touching anything.
pub fn complete_immediately(_ctx: &mut HandlerContext<'_>) -> Step {
    Step::Complete
}

pub fn get_mon_data(ctx: &mut HandlerContext<'_>) -> Step {
    let request = ctx.buffer.byte(1);
    let mut data = mon_data![];
    for slot in slots_from_mask(ctx.buffer.byte(2), *ctx.party_slot) {
        data.extend(ctx.host.mon_data(ctx.battler, slot, request));
    }
    ctx.reply_with(Reply::data_transfer(&data));
    Step::Complete
}

pub fn get_raw_mon_data(ctx: &mut HandlerContext<'_>) -> Step {
    let data = ctx
        .host
        .raw_mon_data(ctx.battler, *ctx.party_slot, ctx.buffer.byte(1), ctx.buffer.byte(2));
    ctx.reply_with(Reply::data_transfer(&data));
    Step::Complete
}

pub fn set_mon_data(ctx: &mut HandlerContext<'_>) -> Step {
    let request = ctx.buffer.byte(1);
    let data = ctx.buffer.tail(3);
    for slot in slots_from_mask(ctx.buffer.byte(2), *ctx.party_slot) {
        ctx.host.set_mon_data(ctx.battler, slot, request, data);
    }
    Step::Complete
}

pub fn set_raw_mon_data(ctx: &mut HandlerContext<'_>) -> Step {
    let offset = ctx.buffer.byte(1);
    let data = ctx.buffer.bytes_at(3, ctx.buffer.byte(2) as usize);
    ctx.host.set_raw_mon_data(ctx.battler, *ctx.party_slot, offset, data);
    Step::Complete
}

pub fn load_mon_sprite(ctx: &mut HandlerContext<'_>) -> Step {
    let party_slot = *ctx.party_slot;
    ctx.present_and_wait(Cue::LoadMonSprite { party_slot })
}

pub fn switch_in_anim(ctx: &mut HandlerContext<'_>) -> Step {
    let party_slot = ctx.buffer.byte(1);
    *ctx.party_slot = party_slot;
    *ctx.on_field = true;
    ctx.notify(BattleNotice::SwitchedIn {
        battler: ctx.battler,
        party_slot,
    });
    ctx.present_and_wait(Cue::SendOut { party_slot })
}

pub fn return_mon_to_ball(ctx: &mut HandlerContext<'_>) -> Step {
    *ctx.on_field = false;
    if ctx.buffer.flag(1) {
        ctx.present(Cue::FreeSprite);
        Step::Complete
    } else {
        ctx.present_and_wait(Cue::ReturnToBall)
    }
}

pub fn draw_trainer_pic(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.present_and_wait(Cue::DrawTrainerPic)
}

pub fn trainer_slide_back(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.present_and_wait(Cue::TrainerSlideBack)
}

pub fn faint_animation(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.notify(BattleNotice::Fainted { battler: ctx.battler });
    ctx.present_and_wait(Cue::Faint)
}

pub fn move_animation(ctx: &mut HandlerContext<'_>) -> Step {
    let move_id = ctx.buffer.u16_le(1);
    let turn = ctx.buffer.byte(3);
    ctx.present_and_wait(Cue::MoveAnimation { move_id, turn })
}

pub fn print_string(ctx: &mut HandlerContext<'_>) -> Step {
    let string_id = ctx.buffer.u16_le(1);
    ctx.present_and_wait(Cue::PrintString { string_id })
}

pub fn choose_action(ctx: &mut HandlerContext<'_>) -> Step {
    let previous = ctx.buffer.byte(1);
    ctx.request_decision(DecisionKind::Action { previous })
}

pub fn choose_move(ctx: &mut HandlerContext<'_>) -> Step {
    let menu = MoveMenu::from_buffer(ctx.buffer);
    ctx.request_decision(DecisionKind::Move(menu))
}

pub fn choose_item(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.request_decision(DecisionKind::Item)
}

pub fn choose_pokemon(ctx: &mut HandlerContext<'_>) -> Step {
    let case = ctx.buffer.byte(1);
    let current_slot = ctx.buffer.byte(2);
    ctx.request_decision(DecisionKind::Party {
        current_slot,
        partner_slot: ctx.partner_slot,
        case,
    })
}

pub fn health_bar_update(ctx: &mut HandlerContext<'_>) -> Step {
    let delta = ctx.buffer.i16_le(2);
    ctx.notify(BattleNotice::HealthChanged {
        battler: ctx.battler,
        delta,
    });
    ctx.present_and_wait(Cue::HealthBar { delta })
}

pub fn status_icon_update(ctx: &mut HandlerContext<'_>) -> Step {
    let status1 = ctx.buffer.u32_le(1);
    let status2 = ctx.buffer.u32_le(5);
    ctx.present_and_wait(Cue::StatusIcon { status1, status2 })
}

pub fn status_animation(ctx: &mut HandlerContext<'_>) -> Step {
    let is_status2 = ctx.buffer.flag(1);
    let status = ctx.buffer.u32_le(2);
    ctx.present_and_wait(Cue::StatusAnimation { is_status2, status })
}

pub fn status_xor(ctx: &mut HandlerContext<'_>) -> Step {
    let mask = ctx.buffer.byte(1);
    ctx.present_and_wait(Cue::StatusXor { mask })
}

pub fn play_bgm(ctx: &mut HandlerContext<'_>) -> Step {
    let song = ctx.buffer.u16_le(1);
    ctx.present_and_wait(Cue::Bgm { song })
}

pub fn clear_unk_var(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.scratch.var = 0;
    Step::Complete
}

pub fn set_unk_var(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.scratch.var = ctx.buffer.byte(1);
    Step::Complete
}

pub fn clear_unk_flag(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.scratch.flag = false;
    Step::Complete
}

pub fn toggle_unk_flag(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.scratch.flag = !ctx.scratch.flag;
    Step::Complete
}

/// Blinks the sprite unless it is hidden.
pub fn hit_animation(ctx: &mut HandlerContext<'_>) -> Step {
    if *ctx.invisible {
        Step::Complete
    } else {
        ctx.present_and_wait(Cue::HitBlink)
    }
}

pub fn play_se(ctx: &mut HandlerContext<'_>) -> Step {
    let song = ctx.buffer.u16_le(1);
    ctx.present_and_wait(Cue::SoundEffect { song })
}

pub fn play_fanfare(ctx: &mut HandlerContext<'_>) -> Step {
    let song = ctx.buffer.u16_le(1);
    ctx.present_and_wait(Cue::Fanfare { song })
}

pub fn fainting_cry(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.present_and_wait(Cue::FaintingCry)
}

pub fn intro_slide(ctx: &mut HandlerContext<'_>) -> Step {
    let terrain = ctx.buffer.byte(1);
    ctx.present_and_wait(Cue::IntroSlide { terrain })
}

pub fn intro_trainer_ball_throw(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.present_and_wait(Cue::TrainerBallThrow)
}

pub fn draw_party_status_summary(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.present_and_wait(Cue::PartyStatusSummary { visible: true })
}

pub fn hide_party_status_summary(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.present_and_wait(Cue::PartyStatusSummary { visible: false })
}

pub fn end_bounce_effect(ctx: &mut HandlerContext<'_>) -> Step {
    ctx.present_and_wait(Cue::EndBounce)
}

pub fn sprite_invisibility(ctx: &mut HandlerContext<'_>) -> Step {
    let invisible = ctx.buffer.flag(1);
    *ctx.invisible = invisible;
    ctx.present_and_wait(Cue::SpriteVisibility { invisible })
}

pub fn battle_animation(ctx: &mut HandlerContext<'_>) -> Step {
    let animation = ctx.buffer.byte(1);
    let argument = ctx.buffer.u16_le(2);
    ctx.present_and_wait(Cue::BattleAnimation { animation, argument })
}

pub fn end_link_battle(ctx: &mut HandlerContext<'_>) -> Step {
    let outcome = ctx.buffer.byte(1);
    ctx.scratch.outcome = Some(outcome);
    ctx.present(Cue::FadeOutMusic);
    ctx.present(Cue::PaletteFadeOut);
    ctx.notify(BattleNotice::BattleEnded { outcome });
    ctx.log.log(ControllerEvent::BattleEnded(outcome));
    Step::Complete
}
