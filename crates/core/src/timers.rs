use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    TurnCountdown,
    RouletteSpin,
}

/// Proof of a scheduled callback. Only the most recent token per purpose is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    pub purpose: TimerPurpose,
    pub generation: u64,
    pub duration_ms: u64,
}

/// The host schedules the real wait; the session only tracks which token is
/// allowed to fire. Starting a slot cancels whatever was there.
#[derive(Debug, Default, Clone)]
pub struct TimerSlots {
    generation: u64,
    live: HashMap<TimerPurpose, TimerToken>,
}

impl TimerSlots {
    pub fn start(&mut self, purpose: TimerPurpose, duration_ms: u64) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TimerToken {
            purpose,
            generation: self.generation,
            duration_ms,
        };
        self.live.insert(purpose, token);
        token
    }

    pub fn cancel(&mut self, purpose: TimerPurpose) -> Option<TimerToken> {
        self.live.remove(&purpose)
    }

    pub fn cancel_all(&mut self) {
        self.live.clear();
    }

    pub fn live(&self, purpose: TimerPurpose) -> Option<TimerToken> {
        self.live.get(&purpose).copied()
    }

    pub fn is_live(&self, token: TimerToken) -> bool {
        self.live.get(&token.purpose) == Some(&token)
    }

    /// Consumes the slot if `token` is still the live one.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if !self.is_live(token) {
            return false;
        }
        self.live.remove(&token.purpose);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_invalidates_previous_token() {
        let mut slots = TimerSlots::default();
        let first = slots.start(TimerPurpose::RouletteSpin, 3000);
        let second = slots.start(TimerPurpose::RouletteSpin, 3000);
        assert!(!slots.fire(first));
        assert!(slots.fire(second));
        assert!(!slots.fire(second));
    }

    #[test]
    fn purposes_are_independent() {
        let mut slots = TimerSlots::default();
        let turn = slots.start(TimerPurpose::TurnCountdown, 30_000);
        let spin = slots.start(TimerPurpose::RouletteSpin, 3000);
        slots.cancel(TimerPurpose::RouletteSpin);
        assert!(!slots.is_live(spin));
        assert!(slots.is_live(turn));
        slots.cancel_all();
        assert!(slots.live(TimerPurpose::TurnCountdown).is_none());
    }
}
