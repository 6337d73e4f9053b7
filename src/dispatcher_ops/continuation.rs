use super::handler_context::HandlerContext;
use super::types::{Step, Wait};

impl HandlerContext<'_> {
    /// Checks the completion criterion installed by an asynchronous handler.
    ///
    /// `polls` counts the polls since the handler ran, this one included.
    pub(crate) fn poll_wait(&mut self, wait: Wait, polls: u32) -> Step {
        match wait {
            Wait::Settle(settle) => {
                if self.host.poll_settled(self.battler, settle) {
                    Step::Complete
                } else {
                    Step::Wait(wait)
                }
            }
            Wait::Remote(pending) => self.poll_decision(pending, polls),
        }
    }
}
