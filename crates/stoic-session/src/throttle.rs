use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Cooldown after every accepted message
    pub short_cooldown_secs: u32,
    /// Cooldown after every `messages_per_long_cooldown` accepted messages
    pub long_cooldown_secs: u32,
    pub messages_per_long_cooldown: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            short_cooldown_secs: 5,
            long_cooldown_secs: 60,
            messages_per_long_cooldown: 10,
        }
    }
}

/// Two-tier send throttle, decremented once per second while nonzero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleState {
    pub short_cooldown: u32,
    pub long_cooldown: u32,
    /// Always below `messages_per_long_cooldown`
    pub messages_since_long_cooldown: u32,
}

impl ThrottleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// No cooldown is running
    pub fn is_clear(&self) -> bool {
        self.short_cooldown == 0 && self.long_cooldown == 0
    }

    /// Record an accepted message. Returns true when it started the long cooldown.
    pub fn accept(&mut self, config: &ThrottleConfig) -> bool {
        self.short_cooldown = config.short_cooldown_secs;
        self.messages_since_long_cooldown += 1;

        if self.messages_since_long_cooldown >= config.messages_per_long_cooldown.max(1) {
            self.long_cooldown = config.long_cooldown_secs;
            self.messages_since_long_cooldown = 0;
            return true;
        }
        false
    }

    /// One second elapsed. Returns true if any counter changed.
    pub fn tick(&mut self) -> bool {
        let before = (self.short_cooldown, self.long_cooldown);
        self.short_cooldown = self.short_cooldown.saturating_sub(1);
        self.long_cooldown = self.long_cooldown.saturating_sub(1);
        before != (self.short_cooldown, self.long_cooldown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_sets_short_cooldown() {
        let mut state = ThrottleState::new();
        assert!(!state.accept(&ThrottleConfig::default()));
        assert_eq!(state.short_cooldown, 5);
        assert_eq!(state.long_cooldown, 0);
        assert_eq!(state.messages_since_long_cooldown, 1);
        assert!(!state.is_clear());
    }

    #[test]
    fn test_long_cooldown_on_every_tenth_message() {
        let config = ThrottleConfig::default();
        let mut state = ThrottleState::new();

        for n in 1..=35u32 {
            let triggered = state.accept(&config);
            assert_eq!(triggered, n % 10 == 0, "message {}", n);
            assert!(state.messages_since_long_cooldown <= 9);
            if triggered {
                assert_eq!(state.long_cooldown, 60);
                assert_eq!(state.messages_since_long_cooldown, 0);
            }
            state.long_cooldown = 0;
        }
    }

    #[test]
    fn test_tick_decrements_to_zero() {
        let mut state = ThrottleState {
            short_cooldown: 2,
            long_cooldown: 1,
            messages_since_long_cooldown: 0,
        };

        assert!(state.tick());
        assert_eq!((state.short_cooldown, state.long_cooldown), (1, 0));
        assert!(state.tick());
        assert!(state.is_clear());
        assert!(!state.tick());
    }
}
