use chrono::Utc;

/// Issues time-derived session ids of the form `chat-<unix millis>`.
///
/// Ids are strictly increasing within one generator even when several are
/// requested in the same millisecond.
#[derive(Debug, Default)]
pub struct SessionIdGenerator {
    last_millis: i64,
}

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, now_millis: i64) -> String {
        let millis = now_millis.max(self.last_millis + 1);
        self.last_millis = millis;
        format!("chat-{}", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_millisecond_yields_distinct_ids() {
        let mut ids = SessionIdGenerator::new();
        assert_eq!(ids.next_at(1_700_000_000_000), "chat-1700000000000");
        assert_eq!(ids.next_at(1_700_000_000_000), "chat-1700000000001");
        assert_eq!(ids.next_at(1_699_999_999_999), "chat-1700000000002");
    }

    #[test]
    fn test_uses_wall_clock() {
        let mut ids = SessionIdGenerator::new();
        let id = ids.next_id();
        let millis: i64 = id.strip_prefix("chat-").unwrap().parse().unwrap();
        assert!(millis > 1_600_000_000_000);
    }
}
