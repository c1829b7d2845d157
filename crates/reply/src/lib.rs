//! Deferred assistant replies for the chat demo.
//!
//! A [`ReplyGenerator`] turns a conversation transcript into exactly one reply event,
//! delivered through a [`ReplyEventStream`] once the caller spawns the returned worker.
use std::sync::Arc;
use std::time::Duration;

mod demo;
mod generator;

pub use demo::{DEFAULT_REPLY_DELAY, DEMO_GENERATOR_ID, DEMO_REPLY_TEXT, DemoReplyGenerator};
pub use generator::{
    BoxFuture, HistoryMessage, ReplyError, ReplyEvent, ReplyEventPayload, ReplyEventStream,
    ReplyGenerator, ReplyHandle, ReplyRequest, ReplyResult, ReplyTrigger, ReplyWorker, Role,
};

/// Builds the generator used by the app for the configured delay.
pub fn create_generator(delay: Duration) -> ReplyResult<Arc<dyn ReplyGenerator>> {
    Ok(Arc::new(DemoReplyGenerator::new(delay)?))
}
