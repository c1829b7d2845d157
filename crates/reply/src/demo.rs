use std::time::Duration;

use snafu::ensure;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use super::generator::{
    EmptyHistorySnafu, InvalidDelaySnafu, ReplyEvent, ReplyEventPayload, ReplyGenerator,
    ReplyHandle, ReplyRequest, ReplyResult, ReplyTrigger, ReplyWorker, make_event_stream,
};

pub const DEMO_GENERATOR_ID: &str = "demo";
pub const DEMO_REPLY_TEXT: &str = "Это демо-ответ. Подключите API для реального GPT!";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Placeholder backend: answers every request with the same text after a fixed delay.
#[derive(Debug, Clone)]
pub struct DemoReplyGenerator {
    delay: Duration,
    content: String,
}

impl DemoReplyGenerator {
    pub fn new(delay: Duration) -> ReplyResult<Self> {
        ensure!(
            !delay.is_zero(),
            InvalidDelaySnafu {
                stage: "demo-generator-new",
                delay,
            }
        );

        Ok(Self {
            delay,
            content: DEMO_REPLY_TEXT.to_string(),
        })
    }

    async fn run_reply_worker(
        trigger: ReplyTrigger,
        deadline: Instant,
        content: String,
        event_tx: mpsc::UnboundedSender<ReplyEvent>,
        mut cancel_rx: oneshot::Receiver<()>,
    ) {
        tokio::select! {
            _ = &mut cancel_rx => {
                tracing::debug!(trigger = ?trigger, "demo reply cancelled before delivery");
            }
            _ = tokio::time::sleep_until(deadline) => {
                if event_tx
                    .send(ReplyEvent {
                        trigger,
                        payload: ReplyEventPayload::Done(content),
                    })
                    .is_err()
                {
                    tracing::debug!(trigger = ?trigger, "reply reader dropped before delivery");
                }
            }
        }
    }
}

impl Default for DemoReplyGenerator {
    fn default() -> Self {
        Self {
            delay: DEFAULT_REPLY_DELAY,
            content: DEMO_REPLY_TEXT.to_string(),
        }
    }
}

impl ReplyGenerator for DemoReplyGenerator {
    fn id(&self) -> &str {
        DEMO_GENERATOR_ID
    }

    fn delay(&self) -> Duration {
        self.delay
    }

    fn generate(&self, request: ReplyRequest) -> ReplyResult<ReplyHandle> {
        ensure!(
            request.has_user_turn(),
            EmptyHistorySnafu {
                stage: "demo-generate",
                trigger: request.trigger,
            }
        );

        // The delay counts from the send, not from whenever the caller gets around to polling.
        let deadline = Instant::now() + self.delay;
        let (event_tx, events, cancel_rx) = make_event_stream(request.trigger);
        let worker: ReplyWorker = Box::pin(Self::run_reply_worker(
            request.trigger,
            deadline,
            self.content.clone(),
            event_tx,
            cancel_rx,
        ));

        tracing::debug!(
            trigger = ?request.trigger,
            history_len = request.history.len(),
            delay_ms = self.delay.as_millis() as u64,
            "scheduled demo reply"
        );

        Ok(ReplyHandle { events, worker })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{HistoryMessage, ReplyError, Role};

    fn request(trigger: u64) -> ReplyRequest {
        ReplyRequest::new(
            ReplyTrigger::new(trigger),
            vec![
                HistoryMessage::new(Role::Assistant, "greeting"),
                HistoryMessage::new(Role::User, "Hello"),
            ],
        )
    }

    #[test]
    fn zero_delay_is_rejected() {
        let error = DemoReplyGenerator::new(Duration::ZERO).unwrap_err();
        assert!(matches!(error, ReplyError::InvalidDelay { .. }));
    }

    #[test]
    fn history_without_user_turn_is_rejected() {
        let generator = DemoReplyGenerator::default();
        let request = ReplyRequest::new(
            ReplyTrigger::new(1),
            vec![HistoryMessage::new(Role::Assistant, "greeting")],
        );

        let result = generator.generate(request);
        assert!(matches!(result, Err(ReplyError::EmptyHistory { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_only_after_delay() {
        let generator = DemoReplyGenerator::default();
        let ReplyHandle { mut events, worker } = generator.generate(request(7)).unwrap();
        let worker = tokio::spawn(worker);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(events.try_recv(), None);

        tokio::time::sleep(Duration::from_millis(1)).await;
        let event = events.recv().await.unwrap();
        assert_eq!(event.trigger, ReplyTrigger::new(7));
        assert_eq!(
            event.payload,
            ReplyEventPayload::Done(DEMO_REPLY_TEXT.to_string())
        );
        worker.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_measured_from_generate_not_spawn() {
        let generator = DemoReplyGenerator::default();
        let ReplyHandle { mut events, worker } = generator.generate(request(1)).unwrap();

        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::spawn(worker);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(events.recv().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_stream_never_delivers() {
        let generator = DemoReplyGenerator::default();
        let ReplyHandle { mut events, worker } = generator.generate(request(3)).unwrap();
        let worker = tokio::spawn(worker);

        assert!(events.cancel());
        worker.await.unwrap();
        assert_eq!(events.recv().await, None);
    }
}
