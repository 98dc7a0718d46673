use std::time::Duration;

use instant::Instant;


pub const END_GAME_DELAY: Duration = Duration::from_millis(1400);

// Single-shot deadline for the IN_GAME -> END_GAME transition. The session
// owns it: a second trigger while armed does not reschedule (an END and a
// transport error racing arm it once), and starting a new game disarms it.
// Time is passed in by the caller, so the component is deterministic under
// test.
#[derive(Clone, Copy, Debug)]
pub struct EndDelay {
    deadline: Option<Instant>,
}

impl EndDelay {
    pub fn new() -> Self { EndDelay { deadline: None } }

    pub fn is_scheduled(&self) -> bool { self.deadline.is_some() }

    pub fn schedule(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + END_GAME_DELAY);
        }
    }

    pub fn cancel(&mut self) { self.deadline = None; }

    // True exactly once per armed deadline, when it comes due.
    #[must_use]
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
