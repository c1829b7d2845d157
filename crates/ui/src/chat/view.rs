use std::sync::Arc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};
use gpui_tokio_bridge::Tokio;
use gptchat_reply::{ReplyEvent, ReplyEventStream, ReplyGenerator, ReplyHandle, ReplyWorker};
use gptchat_session::catalog::BRAND_NAME;
use gptchat_session::{
    ConversationStore, MessageId, PendingReplies, apply_reply_event, send_for_reply,
};

use crate::chat::events::{NewChatRequested, SidebarToggleClicked, Submit};
use crate::chat::sidebar::SIDEBAR_WIDTH;
use crate::chat::{ChatSidebar, MessageInput, MessageList};

pub const ONLINE_BADGE_LABEL: &str = "Онлайн";

/// Tasks that keep one deferred reply alive; dropping them cancels the reply.
struct PendingReply {
    _worker_task: Task<Result<(), gpui_tokio_bridge::JoinError>>,
    _reader_task: Task<()>,
}

/// Chat section coordinator: owns the conversation and routes replies back into it.
pub struct ChatView {
    sidebar: Entity<ChatSidebar>,
    message_list: Entity<MessageList>,
    message_input: Entity<MessageInput>,
    store: ConversationStore,
    generator: Arc<dyn ReplyGenerator>,
    pending: PendingReplies<PendingReply>,
    sidebar_open: bool,
}

impl EventEmitter<SidebarToggleClicked> for ChatView {}

impl ChatView {
    pub fn new(
        generator: Arc<dyn ReplyGenerator>,
        sidebar_open: bool,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let sidebar = cx.new(ChatSidebar::new);
        let message_list = cx.new(MessageList::new);
        let message_input = cx.new(|cx| MessageInput::new(window, cx));

        cx.subscribe(&sidebar, |this, _, _event: &NewChatRequested, cx| {
            this.reset_conversation(cx);
        })
        .detach();

        cx.subscribe(&message_input, |this, _, event: &Submit, cx| {
            this.handle_submit(event.clone(), cx);
        })
        .detach();

        cx.on_release(|this, _cx| {
            let cancelled = this.pending.cancel_all();
            if !cancelled.is_empty() {
                tracing::debug!("dropping {} pending replies on teardown", cancelled.len());
            }
        })
        .detach();

        tracing::info!(generator = generator.id(), delay = ?generator.delay(), "chat view ready");

        let mut this = Self {
            sidebar,
            message_list,
            message_input,
            store: ConversationStore::new(),
            generator,
            pending: PendingReplies::new(),
            sidebar_open,
        };
        this.sync_messages(true, cx);
        this
    }

    pub fn set_sidebar_open(&mut self, open: bool, cx: &mut Context<Self>) {
        if self.sidebar_open != open {
            self.sidebar_open = open;
            cx.notify();
        }
    }

    /// Starts over with a lone greeting. Replies already in flight still land afterwards.
    pub fn reset_conversation(&mut self, cx: &mut Context<Self>) {
        self.store.reset_conversation();
        tracing::info!(
            pending = self.pending.len(),
            "conversation reset to greeting"
        );
        self.sync_messages(true, cx);
    }

    fn handle_submit(&mut self, event: Submit, cx: &mut Context<Self>) {
        let Some((sent, request)) = send_for_reply(&mut self.store, &event.content) else {
            return;
        };
        tracing::debug!(message_id = sent.id.0, "user message sent");
        self.sync_messages(false, cx);

        match self.generator.generate(request) {
            Ok(ReplyHandle { events, worker }) => {
                let worker_task = self.spawn_reply_worker(worker, cx);
                let reader_task = self.spawn_reply_reader(sent.id, events, cx);
                self.pending.insert(
                    sent.id,
                    PendingReply {
                        _worker_task: worker_task,
                        _reader_task: reader_task,
                    },
                );
            }
            Err(error) => {
                tracing::error!("failed to schedule reply for {:?}: {}", sent.id, error);
            }
        }
    }

    fn spawn_reply_worker(
        &mut self,
        worker: ReplyWorker,
        cx: &mut Context<Self>,
    ) -> Task<Result<(), gpui_tokio_bridge::JoinError>> {
        Tokio::spawn(cx, worker)
    }

    fn spawn_reply_reader(
        &mut self,
        trigger: MessageId,
        mut events: ReplyEventStream,
        cx: &mut Context<Self>,
    ) -> Task<()> {
        cx.spawn(async move |this, cx| {
            while let Some(event) = events.recv().await {
                let _ = this.update(cx, |this, cx| {
                    this.handle_reply_event(trigger, event, cx);
                });
            }

            let _ = this.update(cx, |this, _cx| {
                this.handle_reply_closed(trigger);
            });
        })
    }

    fn handle_reply_event(&mut self, trigger: MessageId, event: ReplyEvent, cx: &mut Context<Self>) {
        let reply = apply_reply_event(&mut self.store, event);
        tracing::debug!(
            trigger = trigger.0,
            message_id = reply.id.0,
            "assistant reply appended"
        );
        self.sync_messages(false, cx);
    }

    fn handle_reply_closed(&mut self, trigger: MessageId) {
        if self.pending.complete(trigger).is_none() {
            tracing::warn!("reply stream closed for untracked trigger {:?}", trigger);
        }
    }

    fn sync_messages(&mut self, reset_scroll: bool, cx: &mut Context<Self>) {
        let messages = self.store.messages();
        self.message_list.update(cx, |list, cx| {
            list.set_messages(messages, reset_scroll, cx);
        });
        cx.notify();
    }

    fn render_header(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let toggle_icon = if self.sidebar_open {
            IconName::PanelLeftClose
        } else {
            IconName::PanelLeftOpen
        };

        h_flex()
            .w_full()
            .flex_shrink_0()
            .items_center()
            .gap_3()
            .px_4()
            .py_3()
            .border_b_1()
            .border_color(theme.border)
            .child(
                Button::new("chat-sidebar-toggle")
                    .ghost()
                    .small()
                    .icon(toggle_icon)
                    .on_click(cx.listener(|_, _, _, cx| {
                        cx.emit(SidebarToggleClicked);
                    })),
            )
            .child(Label::new(BRAND_NAME).font_semibold())
            .child(
                h_flex()
                    .items_center()
                    .gap_1()
                    .px_2()
                    .py_0p5()
                    .rounded_full()
                    .bg(theme.success.opacity(0.15))
                    .child(div().size(px(6.)).rounded_full().bg(theme.success))
                    .child(
                        Label::new(ONLINE_BADGE_LABEL)
                            .text_xs()
                            .text_color(theme.success),
                    ),
            )
    }
}

impl Render for ChatView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let sidebar_open = self.sidebar_open;

        h_flex()
            .id("chat-view")
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(theme.background)
            .child(
                div()
                    .id("chat-view-sidebar")
                    .h_full()
                    .flex_shrink_0()
                    .overflow_hidden()
                    .map(|panel| {
                        if sidebar_open {
                            panel.w(SIDEBAR_WIDTH)
                        } else {
                            panel.w(px(0.))
                        }
                    })
                    .when(sidebar_open, |panel| panel.child(self.sidebar.clone())),
            )
            .child(
                v_flex()
                    .flex_1()
                    .min_w_0()
                    .h_full()
                    .child(self.render_header(cx))
                    .child(
                        div()
                            .id("chat-view-message-list")
                            .flex_1()
                            .min_h_0()
                            .child(self.message_list.clone()),
                    )
                    .child(
                        div()
                            .id("chat-view-message-input")
                            .flex_shrink_0()
                            .w_full()
                            .border_t_1()
                            .border_color(cx.theme().border)
                            .child(self.message_input.clone()),
                    ),
            )
    }
}
