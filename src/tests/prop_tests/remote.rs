use super::*;
use crate::tests::multiplayer_session;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    #[test]
    fn silent_peer_falls_back_exactly_after_timeout(
        battler in arb_battler(),
        timeout in 0..40u32,
        choice in prop_oneof![
            Just(Opcode::ChooseAction),
            Just(Opcode::ChooseMove),
            Just(Opcode::ChooseItem),
            Just(Opcode::ChoosePokemon),
        ],
        payload in arb_payload(),
        mut host in arb_host(),
    ) {
        let mut session = multiplayer_session(ControllerConfig::default().with_response_timeout(timeout));
        let mut peer = QueuedPeer::new();
        session.emit(battler, choice, &payload).unwrap();
        let mut ticks = 0;
        while session.is_pending(battler) {
            session.tick(&mut host, &mut peer);
            ticks += 1;
        }
        prop_assert_eq!(timeout + 2, ticks);
        prop_assert_eq!(1, peer.requests().len());
        prop_assert!(session.reply(battler).is_some());
    }

    #[test]
    fn fallback_answers_are_always_valid(
        battler in arb_battler(),
        payload in arb_payload(),
        seed in any::<u64>(),
        host in arb_host(),
    ) {
        let mut rng = <rand::rngs::SmallRng as rand::SeedableRng>::seed_from_u64(seed);
        let buffer = CommandBuffer::with_opcode(Opcode::ChooseMove, &payload).unwrap();
        let kinds = [
            DecisionKind::Action { previous: buffer.byte(1) },
            DecisionKind::Move(MoveMenu::from_buffer(&buffer)),
            DecisionKind::Item,
            DecisionKind::Party {
                current_slot: buffer.byte(2) % PARTY_SIZE as u8,
                partner_slot: Some(buffer.byte(3) % PARTY_SIZE as u8),
                case: 0,
            },
        ];
        for kind in kinds {
            let decision = fallback_decision(battler, &kind, &host, &mut rng);
            prop_assert!(is_valid_decision(battler, &kind, &decision, &host), "{:?} for {:?}", decision, kind);
        }
    }
}
