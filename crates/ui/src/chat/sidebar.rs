use std::rc::Rc;

use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable, VirtualListScrollHandle,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    list::ListItem,
    v_flex, v_virtual_list,
};
use gptchat_session::ChatSummary;
use gptchat_session::catalog::CHAT_HISTORY;

use crate::chat::events::NewChatRequested;

pub const SIDEBAR_WIDTH: Pixels = px(260.);
pub const NEW_CHAT_LABEL: &str = "Новый чат";
pub const USER_NAME: &str = "Пользователь";
pub const USER_PLAN: &str = "Free Plan";

const HISTORY_ROW_HEIGHT: f32 = 56.0;

/// Left column of the chat section: new-chat button, demo history and the user footer.
pub struct ChatSidebar {
    history: &'static [ChatSummary],
    item_sizes: Rc<Vec<Size<Pixels>>>,
    scroll_handle: VirtualListScrollHandle,
}

impl EventEmitter<NewChatRequested> for ChatSidebar {}

impl ChatSidebar {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self::with_history(CHAT_HISTORY)
    }

    fn with_history(history: &'static [ChatSummary]) -> Self {
        let item_sizes = history
            .iter()
            .map(|_| size(px(0.), px(HISTORY_ROW_HEIGHT)))
            .collect();

        Self {
            history,
            item_sizes: Rc::new(item_sizes),
            scroll_handle: VirtualListScrollHandle::new(),
        }
    }

    pub fn history(&self) -> &[ChatSummary] {
        self.history
    }

    fn render_toolbar(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        h_flex().w_full().px_3().pt_3().pb_2().child(
            Button::new("sidebar-new-chat")
                .w_full()
                .outline()
                .icon(IconName::Plus)
                .child(NEW_CHAT_LABEL)
                .on_click(cx.listener(|_, _, _, cx| {
                    tracing::debug!("new chat requested from sidebar");
                    cx.emit(NewChatRequested);
                })),
        )
    }

    fn render_history_list(&mut self, cx: &mut Context<Self>) -> AnyElement {
        let history = self.history;

        v_flex()
            .flex_1()
            .min_h_0()
            .child(
                v_virtual_list(
                    cx.entity().clone(),
                    "chat-history-list",
                    self.item_sizes.clone(),
                    move |_this, visible_range, _window, cx| {
                        let theme = cx.theme();

                        visible_range
                            .filter_map(|index| history.get(index).map(|chat| (index, chat)))
                            .map(|(index, chat)| {
                                div()
                                    .w_full()
                                    .h(px(HISTORY_ROW_HEIGHT))
                                    .px_2()
                                    .child(
                                        ListItem::new(("chat-history", index))
                                            .w_full()
                                            .h_full()
                                            .px_3()
                                            .py_2()
                                            .rounded_md()
                                            .child(
                                                v_flex()
                                                    .w_full()
                                                    .min_w_0()
                                                    .gap_0p5()
                                                    .child(
                                                        div()
                                                            .truncate()
                                                            .child(Label::new(chat.title).text_sm()),
                                                    )
                                                    .child(
                                                        div().truncate().child(
                                                            Label::new(chat.last_message)
                                                                .text_xs()
                                                                .text_color(theme.muted_foreground),
                                                        ),
                                                    ),
                                            ),
                                    )
                                    .into_any_element()
                            })
                            .collect()
                    },
                )
                .w_full()
                .flex_1()
                .track_scroll(&self.scroll_handle),
            )
            .into_any_element()
    }

    fn render_footer(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .w_full()
            .min_w_0()
            .items_center()
            .justify_between()
            .px_3()
            .py_3()
            .border_t_1()
            .border_color(theme.border)
            .child(
                h_flex()
                    .min_w_0()
                    .gap_2()
                    .items_center()
                    .child(
                        div()
                            .size(px(32.))
                            .rounded_full()
                            .bg(theme.primary)
                            .text_color(theme.primary_foreground)
                            .flex()
                            .items_center()
                            .justify_center()
                            .child(Label::new("U").text_sm()),
                    )
                    .child(
                        v_flex()
                            .min_w_0()
                            .child(Label::new(USER_NAME).text_sm())
                            .child(
                                Label::new(USER_PLAN)
                                    .text_xs()
                                    .text_color(theme.muted_foreground),
                            ),
                    ),
            )
            .child(
                Button::new("sidebar-settings")
                    .ghost()
                    .small()
                    .icon(IconName::Settings),
            )
    }
}

impl Render for ChatSidebar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .size_full()
            .min_w_0()
            .overflow_hidden()
            .bg(theme.background)
            .border_r_1()
            .border_color(theme.border)
            .child(self.render_toolbar(cx))
            .child(self.render_history_list(cx))
            .child(self.render_footer(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[::core::prelude::v1::test]
    fn one_fixed_row_per_history_entry() {
        let sidebar = ChatSidebar::with_history(CHAT_HISTORY);

        assert_eq!(sidebar.history().len(), CHAT_HISTORY.len());
        assert_eq!(sidebar.item_sizes.len(), CHAT_HISTORY.len());
        assert!(
            sidebar
                .item_sizes
                .iter()
                .all(|row| row.height == px(HISTORY_ROW_HEIGHT))
        );
    }
}
