use crate::message::{Message, MessageId, Role};

pub const GREETING_TEXT: &str = "Привет! Я GPT-ассистент. Чем могу помочь?";

/// In-memory conversation for the chat section.
///
/// The sequence only grows, except for [`ConversationStore::reset_conversation`], which swaps
/// it for a fresh greeting. Ids keep increasing across resets so a late reply can never collide
/// with a message of the new conversation.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
    next_message_id: u64,
}

impl ConversationStore {
    /// Creates a store already holding the assistant greeting.
    pub fn new() -> Self {
        let mut store = Self {
            messages: Vec::new(),
            next_message_id: 1,
        };
        store.reset_conversation();
        store
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Appends a user message unless `text` is blank.
    ///
    /// Returns a copy of the appended message so the caller can key the deferred reply on its id.
    /// The stored content is the text as typed; trimming only decides whether to send.
    pub fn send_user_message(&mut self, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }

        let message = Message::user(self.alloc_message_id(), text);
        tracing::debug!(message_id = message.id.0, "appended user message");
        self.messages.push(message.clone());
        Some(message)
    }

    /// Appends the assistant reply for `trigger` to whatever conversation exists now.
    pub fn append_reply(&mut self, trigger: MessageId, content: impl Into<String>) -> Message {
        let message = Message::assistant(self.alloc_message_id(), content);
        tracing::debug!(
            trigger = trigger.0,
            message_id = message.id.0,
            "appended assistant reply"
        );
        self.messages.push(message.clone());
        message
    }

    /// Replaces the conversation with a single fresh greeting.
    pub fn reset_conversation(&mut self) -> Message {
        let greeting = Message::assistant(self.alloc_message_id(), GREETING_TEXT);
        self.messages = vec![greeting.clone()];
        greeting
    }

    /// Role/content pairs in order, for handing the transcript to a reply backend.
    pub fn history(&self) -> impl Iterator<Item = (Role, &str)> {
        self.messages
            .iter()
            .map(|message| (message.role, message.content.as_str()))
    }

    fn alloc_message_id(&mut self) -> MessageId {
        let id = MessageId::new(self.next_message_id);
        self.next_message_id = self.next_message_id.saturating_add(1);
        id
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_greeting() {
        let store = ConversationStore::new();

        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].role, Role::Assistant);
        assert_eq!(store.messages()[0].content, GREETING_TEXT);
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut store = ConversationStore::new();
        let before = store.messages().to_vec();

        assert!(store.send_user_message("").is_none());
        assert!(store.send_user_message("   ").is_none());
        assert!(store.send_user_message("\n\t ").is_none());
        assert_eq!(store.messages(), before.as_slice());
    }

    #[test]
    fn send_appends_exactly_one_user_message() {
        let mut store = ConversationStore::new();

        let sent = store.send_user_message("Hello").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(sent.role, Role::User);
        assert_eq!(sent.content, "Hello");
        assert_eq!(store.last(), Some(&sent));
    }

    #[test]
    fn content_is_kept_as_typed() {
        let mut store = ConversationStore::new();

        let sent = store.send_user_message("  padded  ").unwrap();

        assert_eq!(sent.content, "  padded  ");
    }

    #[test]
    fn reset_leaves_single_assistant_greeting() {
        let mut store = ConversationStore::new();
        store.send_user_message("one").unwrap();
        store.send_user_message("two").unwrap();

        let greeting = store.reset_conversation();

        assert_eq!(store.messages(), &[greeting.clone()]);
        assert_eq!(greeting.role, Role::Assistant);
        assert_eq!(greeting.content, GREETING_TEXT);
    }

    #[test]
    fn ids_increase_across_sends_replies_and_resets() {
        let mut store = ConversationStore::new();
        let mut ids = vec![store.messages()[0].id];

        let sent = store.send_user_message("a").unwrap();
        ids.push(sent.id);
        ids.push(store.append_reply(sent.id, "reply").id);
        ids.push(store.reset_conversation().id);
        ids.push(store.send_user_message("b").unwrap().id);

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn late_reply_lands_on_reset_conversation() {
        let mut store = ConversationStore::new();
        let sent = store.send_user_message("before reset").unwrap();
        store.reset_conversation();

        store.append_reply(sent.id, "late");

        assert_eq!(store.len(), 2);
        assert_eq!(store.messages()[0].content, GREETING_TEXT);
        assert_eq!(store.messages()[1].content, "late");
    }

    #[test]
    fn history_preserves_order_and_roles() {
        let mut store = ConversationStore::new();
        let sent = store.send_user_message("Hello").unwrap();
        store.append_reply(sent.id, "Hi");

        let history = store.history().collect::<Vec<_>>();

        assert_eq!(
            history,
            vec![
                (Role::Assistant, GREETING_TEXT),
                (Role::User, "Hello"),
                (Role::Assistant, "Hi"),
            ]
        );
    }
}
