/// Emitted when the user submits a non-blank prompt from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub content: String,
}

impl Submit {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Emitted by the sidebar's "new chat" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewChatRequested;

/// Emitted by the chat header's sidebar button; the shell owns the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarToggleClicked;
