//! Static marketing sections shown next to the chat.
//!
//! Pricing and features are stateless render functions over the catalog; the contact
//! section owns its form inputs and is an entity.

pub mod contact;
pub mod features;
pub mod pricing;

use gpui::*;
use gpui_component::{ActiveTheme, label::Label, v_flex};
use gptchat_session::{Glyph, SectionHeading};

pub use contact::{ContactSubmitted, ContactView};
pub use features::render_features;
pub use pricing::render_pricing;

/// Page width shared by the static sections.
pub(crate) const SECTION_MAX_WIDTH: Pixels = px(1080.);

/// Centered title and subtitle at the top of a section page.
pub(crate) fn render_heading(heading: SectionHeading, cx: &App) -> impl IntoElement {
    let theme = cx.theme();

    v_flex()
        .w_full()
        .items_center()
        .gap_3()
        .mb_10()
        .child(
            div()
                .text_3xl()
                .font_weight(FontWeight::BOLD)
                .text_color(theme.primary)
                .child(heading.title),
        )
        .child(
            Label::new(heading.subtitle)
                .text_color(theme.muted_foreground),
        )
}

/// Square badge with the glyph of a feature or contact card.
pub(crate) fn render_glyph_badge(glyph: Glyph, badge_size: Pixels, cx: &App) -> impl IntoElement {
    let theme = cx.theme();

    div()
        .flex_shrink_0()
        .size(badge_size)
        .rounded_lg()
        .bg(theme.primary)
        .text_color(theme.primary_foreground)
        .flex()
        .items_center()
        .justify_center()
        .child(glyph_symbol(glyph))
}

/// Text stand-in for the card icons.
pub(crate) fn glyph_symbol(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Chat => "💬",
        Glyph::Code => "</>",
        Glyph::Pen => "✎",
        Glyph::Languages => "文A",
        Glyph::Book => "📖",
        Glyph::Sparkles => "✦",
        Glyph::Bolt => "⚡",
        Glyph::Mail => "✉",
        Glyph::Phone => "☎",
        Glyph::Pin => "⌖",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use gptchat_session::catalog::{CONTACT_CHANNELS, FEATURE_HIGHLIGHT, FEATURES};

    use super::*;

    #[::core::prelude::v1::test]
    fn catalog_glyphs_render_distinct_symbols() {
        let glyphs = FEATURES
            .iter()
            .map(|feature| feature.glyph)
            .chain(std::iter::once(FEATURE_HIGHLIGHT.glyph))
            .chain(CONTACT_CHANNELS.iter().map(|channel| channel.glyph))
            .collect::<Vec<_>>();

        let symbols = glyphs.iter().map(|glyph| glyph_symbol(*glyph)).collect::<BTreeSet<_>>();

        assert_eq!(symbols.len(), glyphs.len());
        assert!(symbols.iter().all(|symbol| !symbol.is_empty()));
    }
}
