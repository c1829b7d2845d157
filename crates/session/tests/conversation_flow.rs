use std::time::Duration;

use gptchat_reply::{
    DEMO_REPLY_TEXT, DemoReplyGenerator, ReplyEventStream, ReplyGenerator, ReplyHandle,
};
use gptchat_session::{
    ConversationStore, GREETING_TEXT, MessageId, PendingReplies, Role, apply_reply_event,
    send_for_reply,
};

/// Store, generator and pending registry driven through the same helpers as the chat view;
/// tokio stands in for the GPUI executor.
struct Harness {
    store: ConversationStore,
    generator: DemoReplyGenerator,
    pending: PendingReplies<ReplyEventStream>,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: ConversationStore::new(),
            generator: DemoReplyGenerator::default(),
            pending: PendingReplies::new(),
        }
    }

    fn send(&mut self, text: &str) -> Option<MessageId> {
        let (sent, request) = send_for_reply(&mut self.store, text)?;
        let ReplyHandle { events, worker } = self.generator.generate(request).unwrap();
        tokio::spawn(worker);
        self.pending.insert(sent.id, events);
        Some(sent.id)
    }

    /// Waits for every pending reply and applies them in arrival order.
    async fn drain(&mut self) -> Vec<MessageId> {
        let mut delivered = Vec::new();
        for trigger in self.pending.triggers().collect::<Vec<_>>() {
            let Some(mut events) = self.pending.complete(trigger) else {
                continue;
            };
            while let Some(event) = events.recv().await {
                apply_reply_event(&mut self.store, event);
                delivered.push(trigger);
            }
        }
        delivered
    }
}

fn transcript(store: &ConversationStore) -> Vec<(Role, String)> {
    store
        .messages()
        .iter()
        .map(|message| (message.role, message.content.clone()))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn hello_then_reply_after_delay() {
    let mut harness = Harness::new();

    harness.send("Hello").unwrap();
    assert_eq!(
        transcript(&harness.store),
        vec![
            (Role::Assistant, GREETING_TEXT.to_string()),
            (Role::User, "Hello".to_string()),
        ]
    );

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(harness.store.len(), 2);

    harness.drain().await;
    assert_eq!(
        transcript(&harness.store),
        vec![
            (Role::Assistant, GREETING_TEXT.to_string()),
            (Role::User, "Hello".to_string()),
            (Role::Assistant, DEMO_REPLY_TEXT.to_string()),
        ]
    );
    assert!(harness.pending.is_empty());
}

#[tokio::test(start_paused = true)]
async fn blank_send_schedules_nothing() {
    let mut harness = Harness::new();

    assert!(harness.send("").is_none());
    assert!(harness.send("   ").is_none());

    assert!(harness.pending.is_empty());
    assert_eq!(harness.store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn overlapping_sends_each_get_a_reply() {
    let mut harness = Harness::new();
    let initial_len = harness.store.len();

    let first = harness.send("a").unwrap();
    let second = harness.send("b").unwrap();
    assert_eq!(harness.pending.len(), 2);

    let mut delivered = harness.drain().await;

    // Two sends and two replies; reply order between overlapping sends is whichever timer
    // fires first, so only membership is checked.
    assert_eq!(harness.store.len(), initial_len + 4);
    let replies = harness
        .store
        .messages()
        .iter()
        .filter(|message| message.role == Role::Assistant && message.content == DEMO_REPLY_TEXT)
        .count();
    assert_eq!(replies, 2);
    delivered.sort();
    assert_eq!(delivered, vec![first, second]);
}

#[tokio::test(start_paused = true)]
async fn reset_does_not_cancel_pending_reply() {
    let mut harness = Harness::new();

    harness.send("before reset").unwrap();
    harness.store.reset_conversation();
    assert_eq!(harness.pending.len(), 1);

    harness.drain().await;

    assert_eq!(
        transcript(&harness.store),
        vec![
            (Role::Assistant, GREETING_TEXT.to_string()),
            (Role::Assistant, DEMO_REPLY_TEXT.to_string()),
        ]
    );
}
