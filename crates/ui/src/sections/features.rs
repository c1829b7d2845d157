use gpui::*;
use gpui_component::{ActiveTheme, h_flex, label::Label, v_flex};
use gptchat_session::Feature;
use gptchat_session::catalog::{FEATURE_HIGHLIGHT, FEATURES, FEATURES_HEADING};

use crate::sections::{SECTION_MAX_WIDTH, render_glyph_badge, render_heading};

const FEATURE_CARD_WIDTH: Pixels = px(320.);

pub fn render_features(cx: &App) -> impl IntoElement {
    div()
        .id("features-section")
        .size_full()
        .overflow_y_scroll()
        .child(
            v_flex()
                .w_full()
                .max_w(SECTION_MAX_WIDTH)
                .mx_auto()
                .p_8()
                .child(render_heading(FEATURES_HEADING, cx))
                .child(
                    h_flex()
                        .w_full()
                        .flex_wrap()
                        .justify_center()
                        .gap_6()
                        .children(FEATURES.iter().map(|feature| render_feature_card(feature, cx))),
                )
                .child(render_highlight(&FEATURE_HIGHLIGHT, cx)),
        )
}

fn render_feature_card(feature: &Feature, cx: &App) -> impl IntoElement {
    let theme = cx.theme();

    v_flex()
        .w(FEATURE_CARD_WIDTH)
        .p_6()
        .gap_3()
        .rounded_xl()
        .border_1()
        .border_color(theme.border)
        .bg(theme.background)
        .child(render_glyph_badge(feature.glyph, px(48.), cx))
        .child(
            div()
                .text_xl()
                .font_weight(FontWeight::SEMIBOLD)
                .child(feature.title),
        )
        .child(
            Label::new(feature.description)
                .text_sm()
                .text_color(theme.muted_foreground),
        )
}

fn render_highlight(feature: &Feature, cx: &App) -> impl IntoElement {
    let theme = cx.theme();

    h_flex()
        .w_full()
        .mt_12()
        .p_8()
        .gap_6()
        .items_center()
        .rounded_xl()
        .border_1()
        .border_color(theme.border)
        .bg(theme.background)
        .child(render_glyph_badge(feature.glyph, px(64.), cx))
        .child(
            v_flex()
                .min_w_0()
                .gap_2()
                .child(
                    div()
                        .text_2xl()
                        .font_weight(FontWeight::BOLD)
                        .child(feature.title),
                )
                .child(Label::new(feature.description).text_color(theme.muted_foreground)),
        )
}
