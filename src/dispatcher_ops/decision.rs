use tracing::{debug, warn};

use crate::remote::{fallback_decision, is_valid_decision};
use crate::types::{
    decision::{Decision, DecisionKind, DecisionRequest, Outbound, RequestId},
    logging::ControllerEvent,
};

use super::handler_context::HandlerContext;
use super::types::{PendingDecision, Step, Wait};

impl HandlerContext<'_> {
    /// Asks the remote participant to choose. Waits for the answer unless the request cannot be sent.
    pub(crate) fn request_decision(&mut self, kind: DecisionKind) -> Step {
        let id = self.remote.next_request_id();
        let request = DecisionRequest {
            id,
            battler: self.battler,
            kind,
        };
        match self.peer.send(&Outbound::Request(request)) {
            Ok(()) => {
                debug!(battler = %self.battler, %id, "decision requested");
                self.log.log(ControllerEvent::Requested(self.battler, id));
                Step::Wait(Wait::Remote(PendingDecision { id, kind }))
            }
            Err(err) => {
                warn!(battler = %self.battler, %id, %err, "could not send decision request");
                self.log.log(ControllerEvent::LinkFailed(self.battler, Some(id)));
                self.fall_back(id, &kind)
            }
        }
    }

    /// `polls` counts this poll: the first poll after the request is 1.
    pub(crate) fn poll_decision(&mut self, pending: PendingDecision, polls: u32) -> Step {
        let PendingDecision { id, kind } = pending;
        match self.peer.poll_response(id) {
            Ok(Some(decision)) if is_valid_decision(self.battler, &kind, &decision, &*self.host) => {
                self.log.log(ControllerEvent::Answered(self.battler, id, decision));
                self.answer(decision)
            }
            Ok(Some(decision)) => {
                warn!(battler = %self.battler, %id, ?decision, "rejected invalid remote decision");
                self.log.log(ControllerEvent::Rejected(self.battler, id, decision));
                self.fall_back(id, &kind)
            }
            Ok(None) if polls > self.remote.response_timeout_ticks => {
                warn!(battler = %self.battler, %id, polls, "remote decision timed out");
                self.log.log(ControllerEvent::TimedOut(self.battler, id));
                self.fall_back(id, &kind)
            }
            Ok(None) => Step::Wait(Wait::Remote(pending)),
            Err(err) => {
                warn!(battler = %self.battler, %id, %err, "link failed while waiting for a decision");
                self.log.log(ControllerEvent::LinkFailed(self.battler, Some(id)));
                self.fall_back(id, &kind)
            }
        }
    }

    fn fall_back(&mut self, id: RequestId, kind: &DecisionKind) -> Step {
        let decision = fallback_decision(self.battler, kind, &*self.host, &mut self.remote.rng);
        self.log.log(ControllerEvent::Fallback(self.battler, id, decision));
        self.answer(decision)
    }

    fn answer(&mut self, decision: Decision) -> Step {
        self.reply_with(decision.to_reply());
        Step::Complete
    }
}
