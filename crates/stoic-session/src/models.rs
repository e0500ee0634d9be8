use serde::{Deserialize, Serialize};

/// Title used when the first message carries no text
pub const DEFAULT_TITLE: &str = "Obrolan Baru";

/// Characters of the first message kept as the session title
pub const TITLE_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One transcript entry; never mutated after it is appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Attached image as a data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Message {
    pub fn user(text: Option<String>, image: Option<String>) -> Self {
        Self {
            role: Role::User,
            text,
            image,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: Some(text.into()),
            image: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
}

impl ChatSession {
    pub fn new(id: impl Into<String>, messages: Vec<Message>) -> Self {
        let title = derive_title(&messages);
        Self {
            id: id.into(),
            title,
            messages,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.title = derive_title(&self.messages);
    }
}

/// Leading text of the first message, or [`DEFAULT_TITLE`]
pub fn derive_title(messages: &[Message]) -> String {
    messages
        .first()
        .and_then(|m| m.text.as_deref())
        .filter(|t| !t.is_empty())
        .map(|t| t.chars().take(TITLE_MAX_CHARS).collect())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Saved sessions, most recently used first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistory(Vec<ChatSession>);

impl ChatHistory {
    pub fn new(sessions: Vec<ChatSession>) -> Self {
        Self(sessions)
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&ChatSession> {
        self.0.first()
    }

    pub fn get(&self, id: &str) -> Option<&ChatSession> {
        self.0.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ChatSession> {
        self.0.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replace or insert `session` and move it to the front
    pub fn upsert_front(&mut self, session: ChatSession) {
        self.0.retain(|s| s.id != session.id);
        self.0.insert(0, session);
    }

    /// Move an existing session to the front; false if it is not stored
    pub fn touch(&mut self, id: &str) -> bool {
        match self.0.iter().position(|s| s.id == id) {
            Some(idx) => {
                let session = self.0.remove(idx);
                self.0.insert(0, session);
                true
            }
            None => false,
        }
    }

    /// Remove a session by id, returning it if it was stored
    pub fn remove(&mut self, id: &str) -> Option<ChatSession> {
        let idx = self.0.iter().position(|s| s.id == id)?;
        Some(self.0.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatSession> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, text: &str) -> ChatSession {
        ChatSession::new(id, vec![Message::user(Some(text.to_string()), None)])
    }

    #[test]
    fn test_title_truncates_to_30_chars() {
        let s = session("a", "Bagaimana cara menerapkan dikotomi kendali dalam pekerjaan?");
        assert_eq!(s.title, "Bagaimana cara menerapkan diko");
        assert_eq!(s.title.chars().count(), 30);
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        let s = session("a", &"é".repeat(40));
        assert_eq!(s.title, "é".repeat(30));
    }

    #[test]
    fn test_image_only_title_falls_back() {
        let s = ChatSession::new(
            "a",
            vec![Message::user(None, Some("data:image/png;base64,AAAA".to_string()))],
        );
        assert_eq!(s.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_whitespace_title_is_kept() {
        let s = session("a", "   ");
        assert_eq!(s.title, "   ");

        let empty = session("b", "");
        assert_eq!(empty.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_upsert_front_replaces_and_reorders() {
        let mut history = ChatHistory::new(vec![session("a", "1"), session("b", "2")]);
        history.upsert_front(session("b", "2 updated"));

        let ids: Vec<_> = history.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(history.get("b").unwrap().title, "2 updated");
    }

    #[test]
    fn test_touch_and_remove() {
        let mut history = ChatHistory::new(vec![session("a", "1"), session("b", "2")]);
        assert!(history.touch("b"));
        assert!(!history.touch("missing"));
        assert_eq!(history.first().unwrap().id, "b");

        assert!(history.remove("a").is_some());
        assert!(history.remove("a").is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_message_wire_shape() {
        let json = serde_json::to_string(&Message::model("Halo")).unwrap();
        assert_eq!(json, r#"{"role":"model","text":"Halo"}"#);
    }
}
