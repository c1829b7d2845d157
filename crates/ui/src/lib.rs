#![deny(unsafe_code)]

/// Application shell, navigation and global actions.
///
/// The binary wires these views into a single GPUI window; the domain state they render lives
/// in `gptchat-session` and replies come from `gptchat-reply`.
pub mod app;
/// Chat section components.
pub mod chat;
pub mod sections;
/// Settings persistence.
pub mod settings;
