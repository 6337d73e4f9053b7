use super::*;

fn session_with_timeout(ticks: u32) -> BattleSession {
    multiplayer_session(ControllerConfig::default().with_response_timeout(ticks))
}

fn party_host() -> HeadlessHost {
    HeadlessHost::new()
        .with_party_member(FOE, 0, &[1])
        .with_party_member(FOE, 1, &[1])
        .with_party_member(FOE, 2, &[1])
}

#[test]
fn answered_action_becomes_reply() {
    let mut session = session_with_timeout(5);
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    session.emit(FOE, Opcode::ChooseAction, &[1]).unwrap();
    assert!(session.tick(&mut host, &mut peer).is_empty());
    let request = peer.last_request().unwrap();
    assert_eq!(FOE, request.battler);
    assert_eq!(DecisionKind::Action { previous: 1 }, request.kind);

    assert!(session.tick(&mut host, &mut peer).is_empty());
    peer.respond(request.id, Decision::Action(ActionChoice::Run));
    assert!(session.tick(&mut host, &mut peer).contains(FOE));
    assert_eq!(
        Some(Reply::TwoReturnValues { ret8: 3, ret16: 0 }),
        session.take_reply(FOE)
    );
    assert_eq!(
        1,
        session.count_events(|e| *e == ControllerEvent::Answered(FOE, request.id, Decision::Action(ActionChoice::Run)))
    );
    assert_eq!(0, peer.unclaimed());
}

#[test]
fn answer_for_another_request_is_ignored() {
    let mut session = session_with_timeout(5);
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    session.emit(FOE, Opcode::ChooseItem, &[]).unwrap();
    session.tick(&mut host, &mut peer);
    let id = peer.last_request().unwrap().id;
    peer.respond(RequestId(id.0 + 100), Decision::Item(4));
    session.tick(&mut host, &mut peer);
    assert!(session.is_pending(FOE));
    peer.respond(id, Decision::Item(13));
    session.tick(&mut host, &mut peer);
    assert_eq!(Some(Reply::OneReturnValue(13)), session.take_reply(FOE));
    assert_eq!(0, peer.unclaimed());
}

#[test]
fn late_answer_after_fallback_is_discarded() {
    let mut session = session_with_timeout(1);
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    assert_eq!(3, session.run_command(FOE, Opcode::ChooseItem, &[], &mut host, &mut peer));
    assert_eq!(Some(Reply::OneReturnValue(0)), session.take_reply(FOE));
    let id = peer.last_request().unwrap().id;

    peer.respond(id, Decision::Item(7));
    assert!(session.tick(&mut host, &mut peer).is_empty());
    assert_eq!(0, peer.unclaimed());

    session.emit(FOE, Opcode::ChooseItem, &[]).unwrap();
    session.tick(&mut host, &mut peer);
    let next = peer.last_request().unwrap().id;
    assert_ne!(id, next);
    assert_eq!(vec![next], session.pending_requests().to_vec());
    peer.respond(id, Decision::Item(7));
    peer.respond(next, Decision::Item(8));
    assert!(session.tick(&mut host, &mut peer).contains(FOE));
    assert_eq!(Some(Reply::OneReturnValue(8)), session.take_reply(FOE));
    assert_eq!(0, peer.unclaimed());
}

#[test]
fn responses_left_over_at_reset_are_discarded() {
    let mut session = session_with_timeout(5);
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    session.emit(FOE, Opcode::ChooseItem, &[]).unwrap();
    session.tick(&mut host, &mut peer);
    let id = peer.last_request().unwrap().id;
    session.reset();
    assert!(session.pending_requests().is_empty());

    peer.respond(id, Decision::Item(2));
    session.tick(&mut host, &mut peer);
    assert_eq!(0, peer.unclaimed());
}

#[test]
fn silence_falls_back_after_timeout() {
    for timeout in [0, 1, 3, 12] {
        let mut session = session_with_timeout(timeout);
        let mut host = HeadlessHost::new();
        let mut peer = QueuedPeer::new();
        session.emit(FOE, Opcode::ChooseItem, &[]).unwrap();
        assert!(session.tick(&mut host, &mut peer).is_empty());
        for _ in 0..timeout {
            assert!(session.tick(&mut host, &mut peer).is_empty());
        }
        assert!(session.tick(&mut host, &mut peer).contains(FOE));
        assert_eq!(Some(Reply::OneReturnValue(0)), session.take_reply(FOE));
        let id = peer.last_request().unwrap().id;
        assert_eq!(
            vec![
                ControllerEvent::TimedOut(FOE, id),
                ControllerEvent::Fallback(FOE, id, Decision::Item(0)),
            ],
            session.log.filter(|e| match e {
                ControllerEvent::TimedOut(..) | ControllerEvent::Fallback(..) => Some(*e),
                _ => None,
            })
        );
    }
}

#[test]
fn answer_on_the_last_poll_still_counts() {
    let mut session = session_with_timeout(2);
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    session.emit(FOE, Opcode::ChooseAction, &[0]).unwrap();
    session.tick(&mut host, &mut peer);
    session.tick(&mut host, &mut peer);
    session.tick(&mut host, &mut peer);
    let id = peer.last_request().unwrap().id;
    peer.respond(id, Decision::Action(ActionChoice::Bag));
    assert!(session.tick(&mut host, &mut peer).contains(FOE));
    assert_eq!(
        Some(Reply::TwoReturnValues { ret8: 1, ret16: 0 }),
        session.take_reply(FOE)
    );
    assert_eq!(0, session.count_events(|e| matches!(e, ControllerEvent::TimedOut(..))));
}

#[test]
fn invalid_move_is_replaced_by_fallback() {
    let mut session = session_with_timeout(5);
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    let payload = [0, 0, 0, 0x01, 0x00, 0x00, 0x00, 0x55, 0x00, 0x00, 0x00, 0, 0, 5, 0];
    session.emit(FOE, Opcode::ChooseMove, &payload).unwrap();
    session.tick(&mut host, &mut peer);
    let request = peer.last_request().unwrap();
    let DecisionKind::Move(menu) = request.kind else {
        panic!("expected a move request");
    };
    assert_eq!(vec![2], menu.usable_slots().collect::<Vec<_>>());

    let answer = Decision::Move {
        slot: 0,
        target: BattlerId::PlayerLeft,
    };
    peer.respond(request.id, answer);
    assert!(session.tick(&mut host, &mut peer).contains(FOE));
    assert_eq!(
        Some(Reply::TwoReturnValues {
            ret8: ACTION_EXEC_SCRIPT,
            ret16: 2
        }),
        session.take_reply(FOE)
    );
    assert_eq!(
        1,
        session.count_events(|e| *e == ControllerEvent::Rejected(FOE, request.id, answer))
    );
}

#[test]
fn double_battle_move_may_target_any_battler() {
    let mut session = session_with_timeout(5);
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    let payload = [1, 0, 0, 0x21, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 10, 0, 0, 0];
    session.emit(FOE, Opcode::ChooseMove, &payload).unwrap();
    session.tick(&mut host, &mut peer);
    let id = peer.last_request().unwrap().id;
    peer.respond(
        id,
        Decision::Move {
            slot: 0,
            target: BattlerId::PlayerRight,
        },
    );
    session.tick(&mut host, &mut peer);
    assert_eq!(
        Some(Reply::TwoReturnValues {
            ret8: ACTION_EXEC_SCRIPT,
            ret16: 0x0200
        }),
        session.take_reply(FOE)
    );
}

#[test]
fn party_choice_is_validated_against_host() {
    let mut session = session_with_timeout(5);
    let mut host = party_host();
    let mut peer = QueuedPeer::new();
    session.emit(FOE, Opcode::ChoosePokemon, &[0, 0, 0]).unwrap();
    session.tick(&mut host, &mut peer);
    let request = peer.last_request().unwrap();
    assert_eq!(
        DecisionKind::Party {
            current_slot: 0,
            partner_slot: None,
            case: 0
        },
        request.kind
    );
    peer.respond(request.id, Decision::Party(2));
    session.tick(&mut host, &mut peer);
    assert_eq!(
        Some(Reply::ChosenMonReturnValue {
            party_slot: 2,
            order: [0; 3]
        }),
        session.take_reply(FOE)
    );

    host.fainted[FOE][1] = true;
    session.emit(FOE, Opcode::ChoosePokemon, &[0, 0, 0]).unwrap();
    session.tick(&mut host, &mut peer);
    let id = peer.last_request().unwrap().id;
    peer.respond(id, Decision::Party(1));
    session.tick(&mut host, &mut peer);
    assert_eq!(
        Some(Reply::ChosenMonReturnValue {
            party_slot: 2,
            order: [0; 3]
        }),
        session.take_reply(FOE)
    );
}

#[test]
fn double_battle_party_choice_skips_partner() {
    let partner = FOE.partner();
    let mut session = session_with_timeout(5);
    let mut host = party_host().with_party_member(partner, 1, &[1]);
    let mut peer = OfflinePeer;
    session.run_command(partner, Opcode::SwitchInAnim, &[1], &mut host, &mut peer);
    assert!(session.slot(partner).on_field);

    session.run_command(FOE, Opcode::ChoosePokemon, &[0, 0, 0], &mut host, &mut peer);
    assert_eq!(
        Some(Reply::ChosenMonReturnValue {
            party_slot: 2,
            order: [0; 3]
        }),
        session.take_reply(FOE)
    );

    let mut peer = QueuedPeer::new();
    session.emit(FOE, Opcode::ChoosePokemon, &[0, 0, 0]).unwrap();
    session.tick(&mut host, &mut peer);
    let request = peer.last_request().unwrap();
    assert_eq!(
        DecisionKind::Party {
            current_slot: 0,
            partner_slot: Some(1),
            case: 0
        },
        request.kind
    );
    peer.respond(request.id, Decision::Party(1));
    assert!(session.tick(&mut host, &mut peer).contains(FOE));
    assert_eq!(
        Some(Reply::ChosenMonReturnValue {
            party_slot: 2,
            order: [0; 3]
        }),
        session.take_reply(FOE)
    );
    assert_eq!(
        1,
        session.count_events(|e| *e == ControllerEvent::Rejected(FOE, request.id, Decision::Party(1)))
    );

    session.run_command(partner, Opcode::ReturnMonToBall, &[1], &mut host, &mut peer);
    assert!(!session.slot(partner).on_field);
    session.emit(FOE, Opcode::ChoosePokemon, &[0, 0, 0]).unwrap();
    session.tick(&mut host, &mut peer);
    let id = peer.last_request().unwrap().id;
    peer.respond(id, Decision::Party(1));
    session.tick(&mut host, &mut peer);
    assert_eq!(
        Some(Reply::ChosenMonReturnValue {
            party_slot: 1,
            order: [0; 3]
        }),
        session.take_reply(FOE)
    );
}

#[test]
fn answer_of_the_wrong_kind_is_rejected() {
    let mut session = session_with_timeout(5);
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    session.emit(FOE, Opcode::ChooseAction, &[0]).unwrap();
    session.tick(&mut host, &mut peer);
    let id = peer.last_request().unwrap().id;
    peer.respond(id, Decision::Item(3));
    session.tick(&mut host, &mut peer);
    assert_eq!(
        Some(Reply::TwoReturnValues { ret8: 0, ret16: 0 }),
        session.take_reply(FOE)
    );
}

#[test]
fn offline_peer_falls_back_immediately() {
    let mut session = default_session();
    let mut host = HeadlessHost::new();
    let mut peer = OfflinePeer;
    assert_eq!(1, session.run_command(FOE, Opcode::ChooseAction, &[0], &mut host, &mut peer));
    assert_eq!(
        Some(Reply::TwoReturnValues { ret8: 0, ret16: 0 }),
        session.take_reply(FOE)
    );
    assert_eq!(
        1,
        session.count_events(|e| matches!(e, ControllerEvent::LinkFailed(_, Some(..))))
    );
}

#[test]
fn disconnect_while_waiting_falls_back() {
    let mut session = default_session();
    let mut host = party_host();
    let mut peer = QueuedPeer::new();
    session.emit(FOE, Opcode::ChoosePokemon, &[1, 1, 0]).unwrap();
    session.tick(&mut host, &mut peer);
    session.tick(&mut host, &mut peer);
    assert!(session.is_pending(FOE));

    peer.disconnected = true;
    assert!(session.tick(&mut host, &mut peer).contains(FOE));
    assert_eq!(
        Some(Reply::ChosenMonReturnValue {
            party_slot: 0,
            order: [0; 3]
        }),
        session.take_reply(FOE)
    );
}

#[test]
fn request_ids_are_unique_across_battlers() {
    let mut session = default_session();
    let mut host = HeadlessHost::new();
    let mut peer = QueuedPeer::new();
    session.emit(BattlerId::OpponentLeft, Opcode::ChooseItem, &[]).unwrap();
    session.emit(BattlerId::OpponentRight, Opcode::ChooseItem, &[]).unwrap();
    session.tick(&mut host, &mut peer);
    let requests = peer.requests();
    assert_eq!(2, requests.len());
    assert_eq!(BattlerId::OpponentLeft, requests[0].battler);
    assert_eq!(BattlerId::OpponentRight, requests[1].battler);
    assert_ne!(requests[0].id, requests[1].id);

    peer.respond(requests[1].id, Decision::Item(2));
    assert_eq!(
        EnumSet::only(BattlerId::OpponentRight),
        session.tick(&mut host, &mut peer)
    );
    assert!(session.is_pending(BattlerId::OpponentLeft));
}

#[test]
fn fallback_moves_are_reproducible_per_seed() {
    let payload = [0, 0, 0, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04, 0x00, 9, 9, 9, 9];
    let run = |seed: u64| {
        let mut session = multiplayer_session(ControllerConfig::default().with_fallback_seed(seed));
        let mut host = HeadlessHost::new();
        let mut peer = OfflinePeer;
        (0..8)
            .map(|_| {
                session.run_command(FOE, Opcode::ChooseMove, &payload, &mut host, &mut peer);
                session.take_reply(FOE)
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(11), run(11));
}
