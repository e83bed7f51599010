//! Card composer: one trophy to one SVG fragment.
//!
//! Encoding rules are the same for every theme:
//! - tier color from [`TierStyles`], unknown tiers in the locked color
//! - earned cards at full opacity with an accent border, locked cards dimmed,
//!   desaturated and with a neutral border
//! - progress bar fill clamped to the track
//! - optional stagger delay per card
//! - secret trophies show `?` instead of their rank

use crate::achievements::Achievement;
use crate::layout::CardPosition;
use crate::options::Animation;
use crate::svg::{num, xml_escape, FONT_FAMILY};
use crate::theme::Palette;
use crate::tier::TierStyles;
use crate::variant::{CardArt, VariantProfile};
use std::fmt::Write;

/// Horizontal inset of the progress track on each side
pub const PROGRESS_INSET: f64 = 15.0;

pub const LOCKED_OPACITY: &str = "0.45";

/// Filter id the document must define for locked cards
pub const DESATURATE_FILTER_ID: &str = "desaturate";

/// Rank glyph drawn for secret trophies
pub const SECRET_GLYPH: &str = "?";

/// Everything a card needs besides the trophy itself
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub palette: &'a Palette,
    pub styles: &'a TierStyles,
    pub profile: &'a VariantProfile,
    pub animation: Animation,
}

/// Rendered card markup, tagged with its grid index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFragment {
    pub index: usize,
    pub markup: String,
}

/// Filled width of a progress bar; never wider than the track.
pub fn progress_fill_width(track_width: f64, progress: f64) -> f64 {
    let progress = if progress.is_finite() { progress } else { 0.0 };
    track_width * progress.clamp(0.0, 100.0) / 100.0
}

/// Upper-cased category label, e.g. `PULL REQUESTS`
fn category_label(id: &str) -> String {
    id.replace('_', " ").to_uppercase()
}

fn cup(out: &mut String, color: &str, rank_text: &str, glyph: &str) {
    let _ = writeln!(out, r#"        <g transform="translate(-30, -30) scale(0.85)">"#);
    let _ = writeln!(
        out,
        r#"          <path d="M10 50 Q 10 75 35 80 Q 60 75 60 50" fill="none" stroke="{color}" stroke-width="2.5" opacity="0.4"/>"#
    );
    let _ = writeln!(out, r#"          <path d="M22 68 L48 68 L45 62 L25 62 Z" fill="{color}"/>"#);
    let _ = writeln!(out, r#"          <path d="M32 62 L32 55 L38 55 L38 62 Z" fill="{color}"/>"#);
    let _ = writeln!(out, r#"          <path d="M18 25 Q 18 55 35 55 Q 52 55 52 25 Z" fill="{color}"/>"#);
    let _ = writeln!(
        out,
        r#"          <path d="M18 30 Q 12 30 12 40 Q 12 48 18 45" fill="none" stroke="{color}" stroke-width="3"/>"#
    );
    let _ = writeln!(
        out,
        r#"          <path d="M52 30 Q 58 30 58 40 Q 58 48 52 45" fill="none" stroke="{color}" stroke-width="3"/>"#
    );
    let _ = writeln!(
        out,
        r#"          <text x="35" y="44" text-anchor="middle" font-family="Arial, sans-serif" font-weight="900" font-size="{}" fill="{rank_text}">{glyph}</text>"#,
        if glyph.len() > 2 { 16 } else { 20 }
    );
    let _ = writeln!(out, r#"        </g>"#);
}

fn icon(out: &mut String, icon: &str, color: &str, glyph: &str) {
    let _ = writeln!(
        out,
        r#"        <text x="0" y="8" text-anchor="middle" font-size="42">{}</text>"#,
        xml_escape(icon)
    );
    let _ = writeln!(
        out,
        r#"        <text x="0" y="34" text-anchor="middle" font-family="{FONT_FAMILY}" font-weight="900" font-size="14" fill="{color}">{glyph}</text>"#
    );
}

/// Render one trophy at `position`. `animation_index` drives the stagger delay.
pub fn render_card(
    achievement: &Achievement,
    ctx: &CardContext<'_>,
    position: CardPosition,
    animation_index: usize,
) -> CardFragment {
    let grid = &ctx.profile.grid;
    let width = grid.card_width as f64;
    let height = grid.card_height as f64;
    let center = width / 2.0;
    let style = ctx.styles.style_for(achievement.tier);
    let glyph = if achievement.is_secret() {
        SECRET_GLYPH
    } else {
        achievement.tier.glyph()
    };

    let (opacity, border) = if achievement.unlocked {
        ("1", ctx.palette.accent)
    } else {
        (LOCKED_OPACITY, ctx.palette.stroke)
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"  <g transform="translate({}, {})" opacity="{opacity}">"#,
        position.x, position.y
    );
    if ctx.animation.is_on() {
        let delay = animation_index as u64 * ctx.profile.animation_step_ms as u64;
        let _ = writeln!(
            out,
            r#"    <g class="fade-up" style="animation-delay: {delay}ms">"#
        );
    } else {
        let _ = writeln!(out, "    <g>");
    }

    let _ = writeln!(
        out,
        r#"      <rect width="{}" height="{}" rx="{}" fill="{}" stroke="{border}" stroke-width="1"/>"#,
        grid.card_width, grid.card_height, ctx.profile.corner_radius, ctx.palette.card_background
    );
    let _ = writeln!(
        out,
        r#"      <text x="{}" y="20" text-anchor="middle" font-family="{FONT_FAMILY}" font-weight="700" font-size="11" fill="{}">{}</text>"#,
        num(center),
        style.color,
        xml_escape(&category_label(&achievement.id))
    );

    let filter = if achievement.unlocked {
        String::new()
    } else {
        format!(r#" filter="url(#{DESATURATE_FILTER_ID})""#)
    };
    let _ = writeln!(
        out,
        r#"      <g transform="translate({}, {})"{filter}>"#,
        num(center),
        num(height * 0.4)
    );
    match ctx.profile.art {
        CardArt::Cup => cup(&mut out, &style.trophy, ctx.palette.rank_text, glyph),
        CardArt::Icon => icon(&mut out, &achievement.icon, &style.color, glyph),
    }
    let _ = writeln!(out, "      </g>");

    let _ = writeln!(
        out,
        r#"      <text x="{}" y="{}" text-anchor="middle" font-family="{FONT_FAMILY}" font-weight="600" font-size="10" fill="{}">{}</text>"#,
        num(center),
        num(height - 38.0),
        ctx.palette.text_title,
        xml_escape(&achievement.title)
    );

    let track = (width - 2.0 * PROGRESS_INSET).max(0.0);
    let bar_y = num(height - 18.0);
    let _ = writeln!(
        out,
        r#"      <rect x="{}" y="{bar_y}" width="{}" height="4" rx="2" fill="{}"/>"#,
        num(PROGRESS_INSET),
        num(track),
        ctx.palette.track
    );
    let _ = writeln!(
        out,
        r#"      <rect x="{}" y="{bar_y}" width="{}" height="4" rx="2" fill="{}"/>"#,
        num(PROGRESS_INSET),
        num(progress_fill_width(track, achievement.progress)),
        style.color
    );

    let _ = writeln!(
        out,
        r#"      <text x="{}" y="{}" text-anchor="middle" font-family="{FONT_FAMILY}" font-weight="700" font-size="9" fill="{}">{}</text>"#,
        num(center),
        num(height - 5.0),
        ctx.palette.text_sub,
        xml_escape(&achievement.display_value())
    );

    let _ = writeln!(out, "    </g>");
    let _ = writeln!(out, "  </g>");

    CardFragment {
        index: animation_index,
        markup: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::{build_catalog, TierScheme, Visibility};
    use crate::metrics::Metrics;
    use crate::theme::DARK;
    use crate::tier::Tier;
    use crate::variant::Variant;

    fn sample(unlocked: bool) -> Achievement {
        let metrics = Metrics {
            stars: if unlocked { 120.0 } else { 0.0 },
            ..Default::default()
        };
        build_catalog(&metrics, TierScheme::Letters).remove(0)
    }

    fn at(x: u32, y: u32) -> CardPosition {
        CardPosition { col: 0, row: 0, x, y }
    }

    fn render(a: &Achievement, animation: Animation, index: usize) -> String {
        let styles = TierStyles::default();
        let profile = Variant::Lettered.profile();
        let ctx = CardContext {
            palette: &DARK,
            styles: &styles,
            profile: &profile,
            animation,
        };
        render_card(a, &ctx, at(10, 50), index).markup
    }

    #[test]
    fn test_progress_fill_clamped() {
        assert_eq!(progress_fill_width(80.0, 50.0), 40.0);
        assert_eq!(progress_fill_width(80.0, 250.0), 80.0);
        assert_eq!(progress_fill_width(80.0, -5.0), 0.0);
        assert_eq!(progress_fill_width(80.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_earned_card() {
        let svg = render(&sample(true), Animation::On, 0);
        assert!(svg.contains(r#"translate(10, 50)" opacity="1""#));
        assert!(svg.contains(DARK.accent));
        assert!(!svg.contains("url(#desaturate)"));
        assert!(svg.contains(">S</text>"));
        assert!(svg.contains(">STARS</text>"));
    }

    #[test]
    fn test_locked_card_dimmed() {
        let svg = render(&sample(false), Animation::On, 0);
        assert!(svg.contains(r#"opacity="0.45""#));
        assert!(svg.contains("url(#desaturate)"));
        assert!(svg.contains(&format!(r#"stroke="{}""#, DARK.stroke)));
    }

    #[test]
    fn test_animation_delay() {
        let svg = render(&sample(true), Animation::On, 3);
        assert!(svg.contains("animation-delay: 300ms"));
        let still = render(&sample(true), Animation::Off, 3);
        assert!(!still.contains("animation-delay"));
        assert!(!still.contains("fade-up"));
    }

    #[test]
    fn test_secret_glyph_obscured() {
        let mut secret = sample(true);
        secret.visibility = Visibility::Secret;
        let svg = render(&secret, Animation::Off, 0);
        assert!(svg.contains(">?</text>"));
        assert!(!svg.contains(">S</text>"));
    }

    #[test]
    fn test_unknown_tier_uses_locked_color() {
        let mut odd = sample(true);
        odd.tier = Tier::parse("PLATINUM");
        let svg = render(&odd, Animation::Off, 0);
        assert!(svg.contains(r##"fill="#30363d">STARS</text>"##));
    }

    #[test]
    fn test_overflowing_progress_stays_in_track() {
        let mut over = sample(true);
        over.progress = 400.0;
        let svg = render(&over, Animation::Off, 0);
        // Lettered cards are 110 wide: track 80
        assert_eq!(svg.matches(r#"width="80" height="4""#).count(), 2);
    }

    #[test]
    fn test_title_escaped() {
        let mut a = sample(true);
        a.title = "<script>".into();
        let svg = render(&a, Animation::Off, 0);
        assert!(svg.contains("&lt;script&gt;"));
    }
}
