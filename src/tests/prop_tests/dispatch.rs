use super::*;
use crate::tests::multiplayer_session;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: CASES,
        ..ProptestConfig::default()
    })]

    #[test]
    fn out_of_range_opcode_completes_same_tick(
        battler in arb_battler(),
        raw in arb_out_of_range(),
        payload in arb_payload(),
    ) {
        let mut session = multiplayer_session(ControllerConfig::default());
        let mut host = HeadlessHost::new();
        let mut peer = QueuedPeer::new();
        let mut bytes = vec![raw];
        bytes.extend_from_slice(&payload);
        session.emit_raw(battler, &bytes).unwrap();
        let completed = session.tick(&mut host, &mut peer);
        prop_assert_eq!(enumset::EnumSet::only(battler), completed);
        prop_assert!(session.exec_flags().is_idle());
        prop_assert!(host.cues.is_empty());
        prop_assert!(peer.sent.is_empty());
    }

    #[test]
    fn every_opcode_completes_with_one_handler_call(
        battler in arb_battler(),
        opcode in arb_opcode(),
        payload in arb_payload(),
        mut host in arb_host(),
    ) {
        let mut session = multiplayer_session(ControllerConfig::default());
        let mut peer = OfflinePeer;
        session.emit(battler, opcode, &payload).unwrap();
        let mut ticks = 0;
        while session.is_pending(battler) {
            prop_assert!(ticks < SETTLE_BOUND, "{} still pending after {} ticks", opcode, ticks);
            session.tick(&mut host, &mut peer);
            ticks += 1;
        }
        prop_assert_eq!(BattlerState::Complete(Some(opcode)), session.state(battler));
        let dispatched = session.log.filter(|e| match e {
            ControllerEvent::Dispatched(b, op) => Some((*b, *op)),
            _ => None,
        });
        prop_assert_eq!(vec![(battler, opcode)], dispatched);
        if opcode.is_choice() {
            prop_assert!(session.reply(battler).is_some());
            prop_assert_eq!(1, ticks);
        }
    }

    #[test]
    fn unset_flag_is_a_no_op(
        battler in arb_battler(),
        opcode in arb_opcode(),
        payload in arb_payload(),
        extra_ticks in 1..8usize,
    ) {
        let mut session = multiplayer_session(ControllerConfig::default());
        let mut host = HeadlessHost::new();
        let mut peer = OfflinePeer;
        session.emit(battler, opcode, &payload).unwrap();
        while session.is_pending(battler) {
            session.tick(&mut host, &mut peer);
        }
        let slot = session.slot(battler).clone();
        let cues = host.cues.len();
        let events = session.log.events.len();
        for _ in 0..extra_ticks {
            prop_assert!(session.tick(&mut host, &mut peer).is_empty());
        }
        prop_assert_eq!(&slot, session.slot(battler));
        prop_assert_eq!(cues, host.cues.len());
        prop_assert_eq!(events, session.log.events.len());
    }
}
