use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use snafu::Snafu;
use tokio::sync::{mpsc, oneshot};

/// Routing key for one deferred reply: the raw id of the user message that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplyTrigger(pub u64);

impl ReplyTrigger {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Speaker role as seen by a reply backend, decoupled from the session crate's enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMessage {
    pub role: Role,
    pub content: String,
}

impl HistoryMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Conversation history handed to a generator, newest turn last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    pub trigger: ReplyTrigger,
    pub history: Vec<HistoryMessage>,
}

impl ReplyRequest {
    pub fn new(trigger: ReplyTrigger, history: Vec<HistoryMessage>) -> Self {
        Self { trigger, history }
    }

    pub fn has_user_turn(&self) -> bool {
        self.history
            .iter()
            .any(|message| message.role == Role::User)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyEventPayload {
    Done(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyEvent {
    pub trigger: ReplyTrigger,
    pub payload: ReplyEventPayload,
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type ReplyWorker = BoxFuture<'static, ()>;
pub type ReplyResult<T> = Result<T, ReplyError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReplyError {
    #[snafu(display("reply request for {trigger:?} has no user turn on `{stage}`"))]
    EmptyHistory {
        stage: &'static str,
        trigger: ReplyTrigger,
    },
    #[snafu(display("reply delay must be positive, got {delay:?} on `{stage}`"))]
    InvalidDelay {
        stage: &'static str,
        delay: Duration,
    },
}

/// Receiving half of one reply; dropping it tells the worker to stop.
pub struct ReplyEventStream {
    trigger: ReplyTrigger,
    events: mpsc::UnboundedReceiver<ReplyEvent>,
    cancel_tx: Option<oneshot::Sender<()>>,
}

pub struct ReplyHandle {
    pub events: ReplyEventStream,
    pub worker: ReplyWorker,
}

impl ReplyEventStream {
    pub(crate) fn new(
        trigger: ReplyTrigger,
        events: mpsc::UnboundedReceiver<ReplyEvent>,
        cancel_tx: oneshot::Sender<()>,
    ) -> Self {
        Self {
            trigger,
            events,
            cancel_tx: Some(cancel_tx),
        }
    }

    pub fn trigger(&self) -> ReplyTrigger {
        self.trigger
    }

    pub async fn recv(&mut self) -> Option<ReplyEvent> {
        self.events.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ReplyEvent> {
        self.events.try_recv().ok()
    }

    pub fn cancel(&mut self) -> bool {
        self.cancel_tx
            .take()
            .map(|tx| tx.send(()).is_ok())
            .unwrap_or(false)
    }
}

impl Drop for ReplyEventStream {
    fn drop(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
        }
    }
}

/// Seam for whatever produces assistant replies.
///
/// The shipped implementation is [`crate::DemoReplyGenerator`]; a chat-completion backend
/// would implement this trait with the same one-event-per-request contract.
pub trait ReplyGenerator: Send + Sync {
    fn id(&self) -> &str;
    fn delay(&self) -> Duration;
    fn generate(&self, request: ReplyRequest) -> ReplyResult<ReplyHandle>;
}

pub(crate) fn make_event_stream(
    trigger: ReplyTrigger,
) -> (
    mpsc::UnboundedSender<ReplyEvent>,
    ReplyEventStream,
    oneshot::Receiver<()>,
) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (cancel_tx, cancel_rx) = oneshot::channel();
    (
        event_tx,
        ReplyEventStream::new(trigger, event_rx, cancel_tx),
        cancel_rx,
    )
}
