use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::rc::Rc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{ActiveTheme, h_flex, label::Label, v_flex, v_virtual_list};
use gptchat_session::{Message, MessageId, Role};

use crate::chat::scroll_manager::ScrollManager;

const DEFAULT_CONTENT_WIDTH: Pixels = px(720.);
const LIST_HORIZONTAL_PADDING: Pixels = px(16.);
const BUBBLE_MAX_WIDTH: Pixels = px(560.);
const BUBBLE_PADDING_X: Pixels = px(14.);
const BUBBLE_PADDING_Y: Pixels = px(10.);
const AVATAR_SIZE: Pixels = px(28.);
const AVATAR_GAP: Pixels = px(10.);
const TIME_LABEL_HEIGHT: Pixels = px(14.);
const TIME_LABEL_GAP: Pixels = px(4.);
const ESTIMATED_TEXT_LINE_HEIGHT: Pixels = px(20.);
const ESTIMATED_CHAR_WIDTH: f32 = 7.5;

struct RowHeight {
    height: Pixels,
    measured: bool,
}

/// Virtualized transcript; rows are append-only so heights are cached per message id.
pub struct MessageList {
    messages: Vec<Message>,
    item_sizes: Rc<Vec<Size<Pixels>>>,
    row_heights: HashMap<MessageId, RowHeight>,
    scroll_manager: ScrollManager,
    content_width: Option<Pixels>,
}

impl MessageList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            messages: Vec::new(),
            item_sizes: Rc::new(Vec::new()),
            row_heights: HashMap::new(),
            scroll_manager: ScrollManager::new(),
            content_width: None,
        }
    }

    /// Replaces the rendered transcript. `reset` is set when the conversation was restarted.
    pub fn set_messages(&mut self, messages: &[Message], reset: bool, cx: &mut Context<Self>) {
        let grew = messages.len() > self.messages.len();
        self.messages = messages.to_vec();
        self.rebuild_item_sizes();

        if reset {
            self.scroll_manager.reset();
        } else if grew {
            self.scroll_manager.on_rows_appended();
        }

        cx.notify();
    }

    fn update_content_width(&mut self, cx: &mut Context<Self>) {
        let list_width = self.scroll_manager.handle().bounds().size.width;
        if list_width <= Pixels::ZERO {
            return;
        }

        let next_width = max_pixels(px(1.), list_width - LIST_HORIZONTAL_PADDING * 2);
        let changed = self
            .content_width
            .is_none_or(|current| (f32::from(current) - f32::from(next_width)).abs() > 1.0);

        if changed {
            self.content_width = Some(next_width);
            for row in self.row_heights.values_mut() {
                row.measured = false;
            }
            self.rebuild_item_sizes();
            cx.notify();
        }
    }

    fn rebuild_item_sizes(&mut self) {
        let content_width = self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH);
        let mut sizes = Vec::with_capacity(self.messages.len());

        for message in &self.messages {
            let estimate = estimate_row_height(message, content_width);
            let row = self.row_heights.entry(message.id).or_insert(RowHeight {
                height: estimate,
                measured: false,
            });
            if !row.measured {
                row.height = estimate;
            }
            sizes.push(size(px(0.), row.height));
        }

        let live: HashSet<MessageId> = self.messages.iter().map(|message| message.id).collect();
        self.row_heights.retain(|id, _| live.contains(id));
        self.item_sizes = Rc::new(sizes);
    }

    fn measure_visible_rows(
        &mut self,
        visible_range: Range<usize>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let content_width = self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH);
        let available_space = size(
            AvailableSpace::Definite(content_width),
            AvailableSpace::MinContent,
        );
        let mut updated = false;

        for index in visible_range {
            let Some(message) = self.messages.get(index).cloned() else {
                continue;
            };
            if self
                .row_heights
                .get(&message.id)
                .is_some_and(|row| row.measured)
            {
                continue;
            }

            let mut row = self.render_row(&message, cx);
            let measured = row.layout_as_root(available_space, window, cx).height;
            let entry = self.row_heights.entry(message.id).or_insert(RowHeight {
                height: measured,
                measured: true,
            });
            if (f32::from(entry.height) - f32::from(measured)).abs() > 0.5 {
                updated = true;
            }
            entry.height = measured;
            entry.measured = true;
        }

        if updated {
            self.rebuild_item_sizes();
            cx.notify();
        }
    }

    fn render_row(&self, message: &Message, cx: &mut Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let is_user = message.role == Role::User;

        let (bubble_bg, bubble_fg, avatar_bg, avatar_fg, avatar_text) = if is_user {
            (
                theme.primary,
                theme.primary_foreground,
                theme.secondary,
                theme.secondary_foreground,
                "U",
            )
        } else {
            (
                theme.secondary,
                theme.secondary_foreground,
                theme.primary,
                theme.primary_foreground,
                "AI",
            )
        };

        let avatar = div()
            .flex_shrink_0()
            .size(AVATAR_SIZE)
            .rounded_full()
            .bg(avatar_bg)
            .text_color(avatar_fg)
            .flex()
            .items_center()
            .justify_center()
            .child(Label::new(avatar_text).text_xs());

        let bubble = v_flex()
            .max_w(BUBBLE_MAX_WIDTH)
            .gap(TIME_LABEL_GAP)
            .when(is_user, |column| column.items_end())
            .child(
                div()
                    .px(BUBBLE_PADDING_X)
                    .py(BUBBLE_PADDING_Y)
                    .rounded_lg()
                    .bg(bubble_bg)
                    .text_color(bubble_fg)
                    .child(Label::new(display_content(message)).text_sm()),
            )
            .child(
                Label::new(message.time_label())
                    .text_xs()
                    .text_color(theme.muted_foreground),
            );

        let row = h_flex().w_full().gap(AVATAR_GAP).items_start();
        if is_user {
            row.flex_row_reverse()
                .child(avatar)
                .child(bubble)
                .into_any_element()
        } else {
            row.child(avatar).child(bubble).into_any_element()
        }
    }
}

impl Render for MessageList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.update_content_width(cx);
        self.scroll_manager.sync();

        v_flex().size_full().min_h_0().child(
            v_virtual_list(
                cx.entity().clone(),
                "message-list",
                self.item_sizes.clone(),
                |this, visible_range, window, cx| {
                    this.update_content_width(cx);
                    this.measure_visible_rows(visible_range.clone(), window, cx);
                    visible_range
                        .filter_map(|index| {
                            this.messages
                                .get(index)
                                .cloned()
                                .map(|message| this.render_row(&message, cx))
                        })
                        .collect::<Vec<_>>()
                },
            )
            .size_full()
            .px_4()
            .py_4()
            .gap_4()
            .track_scroll(self.scroll_manager.handle()),
        )
    }
}

fn display_content(message: &Message) -> String {
    // Whitespace-only text still needs a line box.
    if message.content.trim().is_empty() {
        " ".to_string()
    } else {
        message.content.clone()
    }
}

fn estimate_row_height(message: &Message, content_width: Pixels) -> Pixels {
    let row_width = max_pixels(px(1.), content_width - AVATAR_SIZE - AVATAR_GAP);
    let bubble_width = min_pixels(row_width, BUBBLE_MAX_WIDTH);
    let text_width = max_pixels(px(1.), bubble_width - BUBBLE_PADDING_X * 2);
    let bubble_height = estimate_text_height(&message.content, text_width) + BUBBLE_PADDING_Y * 2;

    max_pixels(AVATAR_SIZE, bubble_height + TIME_LABEL_GAP + TIME_LABEL_HEIGHT)
}

fn estimate_text_height(content: &str, width: Pixels) -> Pixels {
    let chars_per_line = (f32::from(width) / ESTIMATED_CHAR_WIDTH).floor().max(1.0) as usize;

    let line_count: usize = content
        .lines()
        .map(|line| line.chars().count().max(1).div_ceil(chars_per_line))
        .sum();

    ESTIMATED_TEXT_LINE_HEIGHT * line_count.max(1)
}

fn max_pixels(a: Pixels, b: Pixels) -> Pixels {
    if f32::from(a) >= f32::from(b) { a } else { b }
}

fn min_pixels(a: Pixels, b: Pixels) -> Pixels {
    if f32::from(a) <= f32::from(b) { a } else { b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: u64, role: Role, content: &str) -> Message {
        Message::new(MessageId::new(id), role, content)
    }

    #[::core::prelude::v1::test]
    fn long_messages_estimate_taller_rows() {
        let width = px(720.);
        let short = estimate_row_height(&message(1, Role::User, "Hello"), width);
        let long = estimate_row_height(&message(2, Role::User, &"слово ".repeat(200)), width);

        assert!(short > Pixels::ZERO);
        assert!(long > short);
    }

    #[::core::prelude::v1::test]
    fn empty_and_blank_messages_keep_one_line() {
        let width = px(720.);
        let empty = estimate_row_height(&message(1, Role::Assistant, ""), width);
        let one_word = estimate_row_height(&message(2, Role::Assistant, "ok"), width);

        assert_eq!(empty, one_word);
        assert_eq!(display_content(&message(3, Role::User, "   ")), " ");
    }

    #[::core::prelude::v1::test]
    fn narrow_width_wraps_into_more_lines() {
        let text = message(1, Role::Assistant, &"a".repeat(300));

        assert!(estimate_row_height(&text, px(200.)) > estimate_row_height(&text, px(900.)));
    }
}
