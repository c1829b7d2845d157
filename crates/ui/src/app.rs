use std::path::PathBuf;
use std::sync::Arc;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::notification::{Notification, NotificationList};
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};
use gptchat_reply::{DemoReplyGenerator, ReplyGenerator, create_generator};
use gptchat_session::catalog::BRAND_NAME;
use gptchat_session::{LogContactSink, Section, ViewState};

use crate::chat::{ChatView, SidebarToggleClicked};
use crate::sections::{ContactSubmitted, ContactView, render_features, render_pricing};
use crate::settings::{SettingsChanged, SettingsState};

pub const SIGN_IN_LABEL: &str = "Войти";
pub const CONTACT_SENT_NOTIFICATION: &str = "Сообщение отправлено";

/// Returns the default themes directory path.
pub fn default_themes_path() -> PathBuf {
    PathBuf::from("./themes")
}

#[cfg(target_os = "macos")]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 78.0;
#[cfg(not(target_os = "macos"))]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 16.0;
#[cfg(target_os = "windows")]
const WINDOW_TOOLBAR_RIGHT_SAFE_PADDING: f32 = 120.0;
#[cfg(not(target_os = "windows"))]
const WINDOW_TOOLBAR_RIGHT_SAFE_PADDING: f32 = 16.0;

/// Navigation bar height; scales with the user's rem size.
fn window_toolbar_height(window: &Window) -> Pixels {
    (2.5 * window.rem_size()).max(px(44.0))
}

gpui::actions!(
    shell,
    [
        NewChat,
        ToggleSidebar,
        ToggleTheme,
        Quit,
        ShowChat,
        ShowFeatures,
        ShowPricing,
        ShowContact,
    ]
);

/// Root view: navigation bar over the active section.
///
/// Owns the [`ViewState`]; the chat view only mirrors the sidebar flag for rendering.
pub struct ChatAppShell {
    view_state: ViewState,
    notification_list: Entity<NotificationList>,
    settings_state: Entity<SettingsState>,
    chat_view: Entity<ChatView>,
    contact_view: Entity<ContactView>,
    title_bar_should_move: bool,
}

impl ChatAppShell {
    pub fn new(
        settings_state: Entity<SettingsState>,
        notification_list: Entity<NotificationList>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let settings = settings_state.read(cx).settings();
        let view_state = ViewState::new(settings.sidebar_open_on_start);
        let generator = Self::build_generator(settings.reply_delay());

        let sidebar_open = view_state.sidebar_open();
        let chat_view = cx.new(|cx| ChatView::new(generator, sidebar_open, window, cx));
        let contact_view = cx.new(|cx| ContactView::new(Arc::new(LogContactSink), window, cx));

        cx.subscribe(&chat_view, |this, _, _event: &SidebarToggleClicked, cx| {
            this.toggle_sidebar(cx);
        })
        .detach();

        cx.subscribe_in(
            &contact_view,
            window,
            |this, _, _event: &ContactSubmitted, window, cx| {
                this.notification_list.update(cx, |list, cx| {
                    list.push(Notification::success(CONTACT_SENT_NOTIFICATION), window, cx);
                });
            },
        )
        .detach();

        cx.subscribe(&settings_state, |_, _, event: &SettingsChanged, cx| {
            event.settings.apply_theme(None, cx);
            cx.refresh_windows();
        })
        .detach();

        Self {
            view_state,
            notification_list,
            settings_state,
            chat_view,
            contact_view,
            title_bar_should_move: false,
        }
    }

    fn build_generator(delay: std::time::Duration) -> Arc<dyn ReplyGenerator> {
        match create_generator(delay) {
            Ok(generator) => generator,
            Err(error) => {
                tracing::warn!("invalid reply generator configuration, using defaults: {error}");
                Arc::new(DemoReplyGenerator::default())
            }
        }
    }

    pub fn select_section(&mut self, section: Section, cx: &mut Context<Self>) {
        if self.view_state.set_active_section(section) {
            cx.notify();
        }
    }

    pub fn toggle_sidebar(&mut self, cx: &mut Context<Self>) {
        let open = self.view_state.toggle_sidebar();
        tracing::debug!(open, "sidebar toggled");
        self.chat_view
            .update(cx, |chat_view, cx| chat_view.set_sidebar_open(open, cx));
        cx.notify();
    }

    /// Restarts the conversation and brings the chat section forward.
    pub fn new_chat(&mut self, cx: &mut Context<Self>) {
        self.chat_view
            .update(cx, |chat_view, cx| chat_view.reset_conversation(cx));
        self.select_section(Section::Chat, cx);
    }

    pub fn toggle_theme(&mut self, cx: &mut Context<Self>) {
        let mut settings = (*self.settings_state.read(cx).settings()).clone();
        settings.theme_mode = settings.theme_mode.toggled();
        // A preset name would override the mode; the toggle always wins.
        settings.theme_name.clear();

        let result = self
            .settings_state
            .update(cx, |state, cx| state.update_settings(settings.clone(), cx));
        if let Err(error) = result {
            tracing::error!("failed to persist theme mode: {error}");
            settings.apply_theme(None, cx);
            cx.refresh_windows();
        }
    }

    /// Routes app-level actions to the shell without requiring focus inside it.
    pub fn register_global_actions(shell: &Entity<Self>, cx: &mut App) {
        let weak = shell.downgrade();

        fn on_shell<A: Action>(
            weak: WeakEntity<ChatAppShell>,
            cx: &mut App,
            handler: impl Fn(&mut ChatAppShell, &mut Context<ChatAppShell>) + 'static,
        ) {
            cx.on_action(move |_: &A, cx| {
                let _ = weak.update(cx, |shell, cx| handler(shell, cx));
            });
        }

        on_shell::<NewChat>(weak.clone(), cx, |shell, cx| shell.new_chat(cx));
        on_shell::<ToggleSidebar>(weak.clone(), cx, |shell, cx| shell.toggle_sidebar(cx));
        on_shell::<ToggleTheme>(weak.clone(), cx, |shell, cx| shell.toggle_theme(cx));
        on_shell::<ShowChat>(weak.clone(), cx, |shell, cx| {
            shell.select_section(Section::Chat, cx)
        });
        on_shell::<ShowFeatures>(weak.clone(), cx, |shell, cx| {
            shell.select_section(Section::Features, cx)
        });
        on_shell::<ShowPricing>(weak.clone(), cx, |shell, cx| {
            shell.select_section(Section::Pricing, cx)
        });
        on_shell::<ShowContact>(weak, cx, |shell, cx| {
            shell.select_section(Section::Contact, cx)
        });
    }
}

impl Render for ChatAppShell {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let toolbar_height = window_toolbar_height(window);

        let body = match self.view_state.active_section() {
            Section::Chat => self.chat_view.clone().into_any_element(),
            Section::Features => render_features(cx).into_any_element(),
            Section::Pricing => render_pricing(cx).into_any_element(),
            Section::Contact => self.contact_view.clone().into_any_element(),
        };

        div()
            .size_full()
            .relative()
            .bg(theme.background)
            .text_color(theme.foreground)
            .child(
                v_flex()
                    .size_full()
                    .child(self.render_nav_bar(window, toolbar_height, cx))
                    .child(
                        div()
                            .id("app-shell-body")
                            .flex_1()
                            .min_w_0()
                            .min_h_0()
                            .overflow_hidden()
                            .child(body),
                    ),
            )
            .child(self.notification_list.clone())
    }
}

impl ChatAppShell {
    fn render_nav_bar(
        &self,
        window: &Window,
        toolbar_height: Pixels,
        cx: &Context<Self>,
    ) -> impl IntoElement {
        let theme = cx.theme();
        let active = self.view_state.active_section();
        let theme_icon = if theme.is_dark() {
            IconName::Sun
        } else {
            IconName::Moon
        };

        h_flex()
            .id("app-nav-bar")
            .window_control_area(WindowControlArea::Drag)
            .on_mouse_down_out(cx.listener(|this, _, _window, _cx| {
                this.title_bar_should_move = false;
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = false;
                }),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = true;
                }),
            )
            .on_mouse_move(cx.listener(|this, _, window, _cx| {
                if this.title_bar_should_move {
                    this.title_bar_should_move = false;
                    window.start_window_move();
                }
            }))
            .w_full()
            .h(toolbar_height)
            .flex_shrink_0()
            .pl(px(WINDOW_TOOLBAR_LEFT_SAFE_PADDING))
            .pr(px(WINDOW_TOOLBAR_RIGHT_SAFE_PADDING))
            .gap_4()
            .items_center()
            .justify_between()
            .bg(theme.background)
            .border_b_1()
            .border_color(theme.border)
            .child(
                div()
                    .text_lg()
                    .font_weight(FontWeight::BOLD)
                    .text_color(theme.primary)
                    .child(BRAND_NAME),
            )
            .child(
                h_flex()
                    .id("app-nav-sections")
                    .gap_1()
                    .items_center()
                    .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
                    .children(Section::ALL.into_iter().map(|section| {
                        let button = Button::new(SharedString::from(format!(
                            "nav-{}",
                            section.key()
                        )))
                        .small()
                        .child(section.label())
                        .on_click(cx.listener(move |this, _, _window, cx| {
                            this.select_section(section, cx);
                        }));

                        if section == active {
                            button.primary()
                        } else {
                            button.ghost()
                        }
                    })),
            )
            .child(
                h_flex()
                    .gap_2()
                    .items_center()
                    .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
                    .child(
                        Button::new("nav-theme-toggle")
                            .ghost()
                            .small()
                            .icon(theme_icon)
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.toggle_theme(cx);
                            })),
                    )
                    .child(
                        Button::new("nav-sign-in")
                            .outline()
                            .small()
                            .child(SIGN_IN_LABEL),
                    )
                    .child(self.render_linux_window_controls(window, cx)),
            )
            .when(
                cfg!(target_os = "linux") && window.window_controls().window_menu,
                |title_bar| {
                    title_bar.on_mouse_down(MouseButton::Right, |event, window, _| {
                        window.show_window_menu(event.position);
                    })
                },
            )
    }

    fn render_linux_window_controls(&self, window: &Window, cx: &Context<Self>) -> AnyElement {
        #[cfg(target_os = "linux")]
        {
            let maximize_icon = if window.is_maximized() {
                IconName::WindowRestore
            } else {
                IconName::WindowMaximize
            };

            h_flex()
                .id("linux-window-controls")
                .items_center()
                .on_mouse_down(MouseButton::Right, |_, _, cx| cx.stop_propagation())
                .gap_2()
                .ml_2()
                .child(
                    Button::new("linux-window-minimize")
                        .ghost()
                        .small()
                        .icon(IconName::WindowMinimize)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.minimize_window();
                        })),
                )
                .child(
                    Button::new("linux-window-maximize")
                        .ghost()
                        .small()
                        .icon(maximize_icon)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.zoom_window();
                        })),
                )
                .child(
                    Button::new("linux-window-close")
                        .ghost()
                        .small()
                        .icon(IconName::WindowClose)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.remove_window();
                        })),
                )
                .into_any_element()
        }

        #[cfg(not(target_os = "linux"))]
        {
            let _ = (window, cx);
            div().into_any_element()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[::core::prelude::v1::test]
    fn themes_directory_is_relative_to_working_dir() {
        assert_eq!(default_themes_path(), PathBuf::from("./themes"));
    }
}
