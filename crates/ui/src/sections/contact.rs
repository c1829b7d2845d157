use std::sync::Arc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputState},
    label::Label,
    v_flex,
};
use gptchat_session::catalog::{CONTACT_CHANNELS, CONTACT_HEADING};
use gptchat_session::{ContactChannel, ContactForm, ContactSink, ContactSubmission};

use crate::sections::{render_glyph_badge, render_heading};

pub const NAME_LABEL: &str = "Имя";
pub const NAME_PLACEHOLDER: &str = "Ваше имя";
pub const EMAIL_LABEL: &str = "Email";
pub const EMAIL_PLACEHOLDER: &str = "your@email.com";
pub const MESSAGE_LABEL: &str = "Сообщение";
pub const MESSAGE_PLACEHOLDER: &str = "Расскажите, чем мы можем помочь...";
pub const SUBMIT_LABEL: &str = "Отправить сообщение";
pub const SENT_CONFIRMATION: &str = "Спасибо! Мы свяжемся с вами в ближайшее время.";

const CONTACT_MAX_WIDTH: Pixels = px(672.);

/// Outcome line shown under the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormStatus {
    Sent,
    Invalid(String),
}

/// Emitted after a submission passed validation and was handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmitted {
    pub submission: ContactSubmission,
}

pub struct ContactView {
    name_input: Entity<InputState>,
    email_input: Entity<InputState>,
    message_input: Entity<InputState>,
    sink: Arc<dyn ContactSink>,
    status: Option<FormStatus>,
}

impl EventEmitter<ContactSubmitted> for ContactView {}

impl ContactView {
    pub fn new(sink: Arc<dyn ContactSink>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let name_input = cx.new(|cx| InputState::new(window, cx).placeholder(NAME_PLACEHOLDER));
        let email_input = cx.new(|cx| InputState::new(window, cx).placeholder(EMAIL_PLACEHOLDER));
        let message_input = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder(MESSAGE_PLACEHOLDER)
                .auto_grow(5, 10)
        });

        Self {
            name_input,
            email_input,
            message_input,
            sink,
            status: None,
        }
    }

    fn current_form(&self, cx: &App) -> ContactForm {
        ContactForm::new(
            self.name_input.read(cx).value().to_string(),
            self.email_input.read(cx).value().to_string(),
            self.message_input.read(cx).value().to_string(),
        )
    }

    fn handle_submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        match self.current_form(cx).submit() {
            Ok(submission) => {
                self.sink.deliver(&submission);
                self.status = Some(FormStatus::Sent);
                for input in [&self.name_input, &self.email_input, &self.message_input] {
                    input.update(cx, |state, cx| state.set_value("", window, cx));
                }
                cx.emit(ContactSubmitted { submission });
            }
            Err(error) => {
                tracing::warn!("contact form rejected: {}", error);
                self.status = Some(FormStatus::Invalid(error.to_string()));
            }
        }
        cx.notify();
    }

    fn render_field(
        &self,
        label: &'static str,
        input: &Entity<InputState>,
    ) -> impl IntoElement {
        v_flex()
            .w_full()
            .gap_2()
            .child(Label::new(label).text_sm())
            .child(Input::new(input).w_full())
    }

    fn render_status(&self, cx: &App) -> Option<AnyElement> {
        let theme = cx.theme();
        let status = self.status.as_ref()?;

        let (text, color) = match status {
            FormStatus::Sent => (SENT_CONFIRMATION.to_string(), theme.success),
            FormStatus::Invalid(message) => (message.clone(), theme.danger),
        };

        Some(
            Label::new(text)
                .text_sm()
                .text_color(color)
                .into_any_element(),
        )
    }
}

fn render_channel_card(channel: &ContactChannel, cx: &App) -> impl IntoElement {
    let theme = cx.theme();

    v_flex()
        .flex_1()
        .min_w(px(180.))
        .p_6()
        .gap_2()
        .items_center()
        .rounded_xl()
        .border_1()
        .border_color(theme.border)
        .bg(theme.background)
        .child(render_glyph_badge(channel.glyph, px(48.), cx))
        .child(div().font_weight(FontWeight::SEMIBOLD).child(channel.title))
        .child(
            Label::new(channel.value)
                .text_sm()
                .text_color(theme.muted_foreground),
        )
}

impl Render for ContactView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let status = self.render_status(cx);

        div()
            .id("contact-section")
            .size_full()
            .overflow_y_scroll()
            .child(
                v_flex()
                    .w_full()
                    .max_w(CONTACT_MAX_WIDTH)
                    .mx_auto()
                    .p_8()
                    .child(render_heading(CONTACT_HEADING, cx))
                    .child(
                        v_flex()
                            .w_full()
                            .p_8()
                            .gap_6()
                            .rounded_xl()
                            .border_1()
                            .border_color(theme.border)
                            .bg(theme.background)
                            .child(self.render_field(NAME_LABEL, &self.name_input))
                            .child(self.render_field(EMAIL_LABEL, &self.email_input))
                            .child(self.render_field(MESSAGE_LABEL, &self.message_input))
                            .child(
                                Button::new("contact-submit")
                                    .w_full()
                                    .primary()
                                    .child(SUBMIT_LABEL)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.handle_submit(window, cx);
                                    })),
                            )
                            .when_some(status, |form, status| form.child(status)),
                    )
                    .child(
                        h_flex()
                            .w_full()
                            .mt_8()
                            .gap_6()
                            .flex_wrap()
                            .children(
                                CONTACT_CHANNELS
                                    .iter()
                                    .map(|channel| render_channel_card(channel, cx)),
                            ),
                    ),
            )
    }
}
