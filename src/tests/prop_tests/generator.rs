use enum_map::Enum;

use proptest::prelude::*;

use crate::prelude::*;

pub fn arb_enum<E: std::fmt::Debug + Enum>() -> impl Strategy<Value = E> {
    (0..E::LENGTH).prop_map(E::from_usize)
}

pub fn arb_battler() -> impl Strategy<Value = BattlerId> {
    arb_enum()
}

pub fn arb_opcode() -> impl Strategy<Value = Opcode> {
    arb_enum()
}

/// Raw opcode bytes past the end of the catalogue.
pub fn arb_out_of_range() -> impl Strategy<Value = u8> {
    (Opcode::COUNT as u8)..=u8::MAX
}

pub fn arb_payload() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..24)
}

prop_compose! {
    pub fn arb_host()(
        sprite in 0..4u16,
        animation in 0..4u16,
        text in 0..4u16,
        health_bar in 0..4u16,
        status in 0..4u16,
        party in proptest::collection::vec(any::<bool>(), PARTY_SIZE),
    ) -> HeadlessHost {
        let mut host = HeadlessHost::new()
            .with_latency(Settle::Sprite, sprite)
            .with_latency(Settle::Animation, animation)
            .with_latency(Settle::Text, text)
            .with_latency(Settle::HealthBar, health_bar)
            .with_latency(Settle::StatusAnimation, status);
        for battler in BattlerId::all() {
            for (slot, present) in party.iter().enumerate() {
                if *present {
                    host = host.with_party_member(battler, slot as u8, &[slot as u8, 1, 2, 3]);
                }
            }
        }
        host
    }
}
