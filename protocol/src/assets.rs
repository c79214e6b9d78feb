//! Glyph catalog standing in for the image assets of the screens.
//!
//! The catalog is plain read-only data: screens receive a reference to it and look glyphs up,
//! they never mutate it.

use crate::finance::BenefitIcon;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalog {
    /// Brand mark rendered at the left of the header.
    pub logo: &'static str,
    /// Avatar rendered before the bot name in chat bubbles.
    pub chatbot_avatar: &'static str,
    /// Marker for the "attach image" affordance in the chat composer.
    pub image_upload: &'static str,
    /// Marker for the send affordance in the chat composer.
    pub send: &'static str,
    /// Marker rendered in front of image bubbles and previews.
    pub image: &'static str,
    /// Marker for the search bar on the my-page screen.
    pub search: &'static str,
    /// Marker for the profile avatar.
    pub profile_avatar: &'static str,
    /// Badge for cards picked by the recommender.
    pub ai_pick_badge: &'static str,
    /// Arrow between "current" and "achievable" trend stats.
    pub trend_arrow: &'static str,
    pub legend_actual_spending: &'static str,
    pub legend_target_total: &'static str,
    pub legend_goal_achieved: &'static str,
    pub benefit_bus: &'static str,
    pub benefit_cash_back: &'static str,
    pub benefit_shopping: &'static str,
    pub benefit_cafe: &'static str,
}

impl AssetCatalog {
    pub fn benefit_glyph(&self, icon: BenefitIcon) -> &'static str {
        match icon {
            BenefitIcon::Bus => self.benefit_bus,
            BenefitIcon::CashBack => self.benefit_cash_back,
            BenefitIcon::Shopping => self.benefit_shopping,
            BenefitIcon::Cafe => self.benefit_cafe,
        }
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            logo: "O!ALL",
            chatbot_avatar: "◉",
            image_upload: "⊕",
            send: "➤",
            image: "▣",
            search: "⌕",
            profile_avatar: "☺",
            ai_pick_badge: "★ AI Pick",
            trend_arrow: "←",
            legend_actual_spending: "●",
            legend_target_total: "○",
            legend_goal_achieved: "✓",
            benefit_bus: "⇄",
            benefit_cash_back: "₩",
            benefit_shopping: "◈",
            benefit_cafe: "◔",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_benefit_icon_has_a_distinct_glyph() {
        let catalog = AssetCatalog::default();
        let glyphs = [
            catalog.benefit_glyph(BenefitIcon::Bus),
            catalog.benefit_glyph(BenefitIcon::CashBack),
            catalog.benefit_glyph(BenefitIcon::Shopping),
            catalog.benefit_glyph(BenefitIcon::Cafe),
        ];
        for (idx, glyph) in glyphs.iter().enumerate() {
            assert!(!glyph.is_empty());
            assert!(!glyphs[idx + 1..].contains(glyph), "duplicate glyph {glyph}");
        }
    }
}
