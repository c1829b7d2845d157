#![deny(unsafe_code)]

//! UI-independent state for the chat demo: the conversation, the shell's view state, the
//! registry of in-flight replies, the glue that feeds the conversation to a reply generator,
//! and the static content of the marketing sections.

/// Static marketing content.
pub mod catalog;
pub mod contact;
pub mod exchange;
/// Chat message entities.
pub mod message;
pub mod pending;
pub mod store;
pub mod view_state;

pub use catalog::{ChatSummary, ContactChannel, Feature, Glyph, PricingPlan, SectionHeading};
pub use contact::{
    ContactError, ContactForm, ContactResult, ContactSink, ContactSubmission, LogContactSink,
};
pub use exchange::{apply_reply_event, send_for_reply};
pub use message::{Message, MessageId, Role};
pub use pending::PendingReplies;
pub use store::{ConversationStore, GREETING_TEXT};
pub use view_state::{Section, ViewState};
