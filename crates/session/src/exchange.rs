use gptchat_reply::{
    HistoryMessage, ReplyEvent, ReplyEventPayload, ReplyRequest, ReplyTrigger, Role as ReplyRole,
};

use crate::message::{Message, MessageId, Role};
use crate::store::ConversationStore;

/// Appends a user message and builds the reply request for it.
///
/// Returns `None` for blank text, in which case nothing is appended and no reply is due.
pub fn send_for_reply(
    store: &mut ConversationStore,
    text: &str,
) -> Option<(Message, ReplyRequest)> {
    let sent = store.send_user_message(text)?;
    let request = ReplyRequest::new(trigger_for(sent.id), reply_history(store));
    Some((sent, request))
}

/// Lands a delivered reply on whatever conversation the store holds now.
pub fn apply_reply_event(store: &mut ConversationStore, event: ReplyEvent) -> Message {
    let ReplyEventPayload::Done(content) = event.payload;
    store.append_reply(message_for(event.trigger), content)
}

pub fn trigger_for(id: MessageId) -> ReplyTrigger {
    ReplyTrigger::new(id.0)
}

pub fn message_for(trigger: ReplyTrigger) -> MessageId {
    MessageId::new(trigger.0)
}

fn reply_history(store: &ConversationStore) -> Vec<HistoryMessage> {
    store
        .history()
        .map(|(role, content)| HistoryMessage::new(reply_role(role), content))
        .collect()
}

fn reply_role(role: Role) -> ReplyRole {
    match role {
        Role::User => ReplyRole::User,
        Role::Assistant => ReplyRole::Assistant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GREETING_TEXT;

    #[test]
    fn request_carries_full_transcript() {
        let mut store = ConversationStore::new();

        let (sent, request) = send_for_reply(&mut store, "Hello").unwrap();

        assert_eq!(request.trigger, trigger_for(sent.id));
        assert_eq!(
            request.history,
            vec![
                HistoryMessage::new(ReplyRole::Assistant, GREETING_TEXT),
                HistoryMessage::new(ReplyRole::User, "Hello"),
            ]
        );
    }

    #[test]
    fn blank_text_builds_no_request() {
        let mut store = ConversationStore::new();

        assert!(send_for_reply(&mut store, " \n\t").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reply_event_appends_assistant_message() {
        let mut store = ConversationStore::new();
        let (sent, _) = send_for_reply(&mut store, "Hi").unwrap();

        let reply = apply_reply_event(
            &mut store,
            ReplyEvent {
                trigger: trigger_for(sent.id),
                payload: ReplyEventPayload::Done("answer".to_string()),
            },
        );

        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(store.last(), Some(&reply));
        assert_eq!(message_for(trigger_for(sent.id)), sent.id);
    }
}
