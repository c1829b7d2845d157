use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};
use gptchat_session::PricingPlan;
use gptchat_session::catalog::{PRICING_HEADING, PRICING_PLANS};

use crate::sections::{SECTION_MAX_WIDTH, render_heading};

pub const POPULAR_BADGE_LABEL: &str = "Популярный";
pub const CHOOSE_PLAN_LABEL: &str = "Выбрать план";

const PLAN_CARD_WIDTH: Pixels = px(320.);

pub fn render_pricing(cx: &App) -> impl IntoElement {
    div()
        .id("pricing-section")
        .size_full()
        .overflow_y_scroll()
        .child(
            v_flex()
                .w_full()
                .max_w(SECTION_MAX_WIDTH)
                .mx_auto()
                .p_8()
                .child(render_heading(PRICING_HEADING, cx))
                .child(
                    h_flex()
                        .w_full()
                        .flex_wrap()
                        .justify_center()
                        .items_start()
                        .gap_6()
                        .children(
                            PRICING_PLANS
                                .iter()
                                .enumerate()
                                .map(|(index, plan)| render_plan_card(index, plan, cx)),
                        ),
                ),
        )
}

fn render_plan_card(index: usize, plan: &PricingPlan, cx: &App) -> impl IntoElement {
    let theme = cx.theme();

    let choose = Button::new(("choose-plan", index))
        .w_full()
        .child(CHOOSE_PLAN_LABEL);
    let choose = if plan.popular {
        choose.primary()
    } else {
        choose.outline()
    };

    v_flex()
        .w(PLAN_CARD_WIDTH)
        .p_6()
        .gap_4()
        .rounded_xl()
        .bg(theme.background)
        .border_color(if plan.popular {
            theme.primary
        } else {
            theme.border
        })
        .map(|card| {
            if plan.popular {
                card.border_2()
            } else {
                card.border_1()
            }
        })
        .when(plan.popular, |card| {
            card.child(
                div()
                    .px_2()
                    .py_0p5()
                    .rounded_full()
                    .bg(theme.primary)
                    .text_color(theme.primary_foreground)
                    .text_xs()
                    .child(POPULAR_BADGE_LABEL),
            )
        })
        .child(
            div()
                .text_2xl()
                .font_weight(FontWeight::BOLD)
                .child(plan.name),
        )
        .child(
            h_flex()
                .items_end()
                .gap_1()
                .child(
                    div()
                        .text_3xl()
                        .font_weight(FontWeight::BOLD)
                        .text_color(theme.primary)
                        .child(plan.price),
                )
                .when_some(plan.period_suffix(), |row, suffix| {
                    row.child(Label::new(suffix).text_color(theme.muted_foreground))
                }),
        )
        .child(
            v_flex().gap_3().children(plan.features.iter().map(|feature| {
                h_flex()
                    .items_start()
                    .gap_2()
                    .child(div().text_color(theme.primary).child("✓"))
                    .child(Label::new(*feature).text_sm())
            })),
        )
        .child(choose)
}
