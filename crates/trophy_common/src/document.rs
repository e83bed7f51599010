//! Document composer.
//!
//! Collects typed fragments and joins them once. Output order is fixed no
//! matter the push order: defs and styles, background, header, cards by grid
//! index, footer.

use crate::achievements::Achievement;
use crate::card::{progress_fill_width, render_card, CardContext, CardFragment, DESATURATE_FILTER_ID};
use crate::layout::layout;
use crate::levels::LevelState;
use crate::options::Animation;
use crate::svg::{num, xml_escape, FONT_FAMILY, XML_DECLARATION};
use crate::theme::Palette;
use crate::tier::TierStyles;
use crate::variant::VariantProfile;
use std::fmt::Write;
use tracing::debug;

/// Fixed canvas for error and notice documents
pub const NOTICE_WIDTH: u32 = 400;
pub const NOTICE_HEIGHT: u32 = 60;

/// Message shown when there is nothing to lay out
pub const EMPTY_MESSAGE: &str = "No achievements to display";

const ERROR_BACKGROUND: &str = "#0d1117";
const ERROR_COLOR: &str = "#ff0055";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// CSS rules, emitted inside `<defs><style>`
    Style(String),
    /// Other `<defs>` content (filters, gradients)
    Def(String),
    Header(String),
    Card(CardFragment),
    Footer(String),
}

/// Accumulates fragments for one SVG document.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    width: u32,
    height: u32,
    background: Option<(String, u32)>,
    styles: Vec<String>,
    defs: Vec<String>,
    header: Vec<String>,
    cards: Vec<CardFragment>,
    footer: Vec<String>,
}

impl DocumentBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            styles: Vec::new(),
            defs: Vec::new(),
            header: Vec::new(),
            cards: Vec::new(),
            footer: Vec::new(),
        }
    }

    /// Full-canvas background rect with the given corner radius.
    pub fn background(mut self, fill: &str, radius: u32) -> Self {
        self.background = Some((fill.to_string(), radius));
        self
    }

    pub fn push(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::Style(css) => self.styles.push(css),
            Fragment::Def(def) => self.defs.push(def),
            Fragment::Header(markup) => self.header.push(markup),
            Fragment::Card(card) => self.cards.push(card),
            Fragment::Footer(markup) => self.footer.push(markup),
        }
    }

    pub fn build(mut self) -> String {
        // Stable: equal indices keep push order
        self.cards.sort_by_key(|card| card.index);

        let mut out = String::new();
        let _ = writeln!(out, "{XML_DECLARATION}");
        let _ = writeln!(
            out,
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" fill="none" xmlns="http://www.w3.org/2000/svg">"#,
            w = self.width,
            h = self.height
        );

        if !self.styles.is_empty() || !self.defs.is_empty() {
            let _ = writeln!(out, "  <defs>");
            if !self.styles.is_empty() {
                let _ = writeln!(out, "    <style>");
                for css in &self.styles {
                    let _ = writeln!(out, "      {css}");
                }
                let _ = writeln!(out, "    </style>");
            }
            for def in &self.defs {
                let _ = writeln!(out, "    {def}");
            }
            let _ = writeln!(out, "  </defs>");
        }

        if let Some((fill, radius)) = &self.background {
            let _ = writeln!(
                out,
                r#"  <rect width="100%" height="100%" rx="{radius}" fill="{fill}"/>"#
            );
        }
        for markup in self.header.iter() {
            out.push_str(markup);
        }
        for card in self.cards.iter() {
            out.push_str(&card.markup);
        }
        for markup in self.footer.iter() {
            out.push_str(markup);
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Header block content
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHeader {
    pub subject: String,
    /// Drawn only by variants with a level header
    pub level: Option<LevelState>,
    /// Earned trophies in the full catalog
    pub earned: usize,
    /// Size of the full catalog
    pub total: usize,
}

/// Rendering parameters for [`compose`]
#[derive(Debug, Clone, Copy)]
pub struct ComposeParams<'a> {
    pub profile: &'a VariantProfile,
    pub styles: &'a TierStyles,
    pub columns: Option<u32>,
    pub animation: Animation,
}

const LEVEL_FONT_PX: f64 = 13.0;
const XP_FONT_PX: f64 = 11.0;
const LABEL_SPACING: f64 = 12.0;

/// Rough rendered width of proportional text.
fn approx_text_width(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * 0.6
}

fn header_markup(header: &DocumentHeader, palette: &Palette, gap: u32, width: u32, height: u32) -> String {
    let mut out = String::new();
    let title_y = (height * 3 / 5).min(35);
    let _ = writeln!(
        out,
        r#"  <text x="{gap}" y="{title_y}" class="header">{}'s Achievements</text>"#,
        xml_escape(&header.subject)
    );

    if let Some(level) = &header.level {
        let bar_width = width.saturating_sub(2 * gap) as f64;
        let level_text = format!("Level {} {}", level.level, level.title());
        let xp_text = format!(
            "{} / {} XP",
            level.current_xp.floor(),
            level.next_level_xp.ceil()
        );
        let _ = writeln!(
            out,
            r#"  <text x="{gap}" y="60" class="level">{}</text>"#,
            xml_escape(&level_text)
        );
        let side_by_side = approx_text_width(&level_text, LEVEL_FONT_PX)
            + LABEL_SPACING
            + approx_text_width(&xp_text, XP_FONT_PX)
            <= bar_width;
        if side_by_side {
            let _ = writeln!(
                out,
                r#"  <text x="{}" y="60" text-anchor="end" class="xp">{xp_text}</text>"#,
                width.saturating_sub(gap)
            );
        } else {
            // Below the bar, above the first card row
            let _ = writeln!(out, r#"  <text x="{gap}" y="90" class="xp">{xp_text}</text>"#);
        }
        let _ = writeln!(
            out,
            r#"  <rect x="{gap}" y="70" width="{}" height="8" rx="4" fill="{}"/>"#,
            num(bar_width),
            palette.track
        );
        let _ = writeln!(
            out,
            r#"  <rect x="{gap}" y="70" width="{}" height="8" rx="4" fill="{}"/>"#,
            num(progress_fill_width(bar_width, level.progress)),
            palette.accent
        );
    }
    out
}

fn stylesheet(palette: &Palette) -> Vec<String> {
    vec![
        format!(".header {{ font: 700 18px {FONT_FAMILY}; fill: {}; }}", palette.text_title),
        format!(".level {{ font: 600 13px {FONT_FAMILY}; fill: {}; }}", palette.accent),
        format!(
            ".xp, .footer {{ font: 400 11px {FONT_FAMILY}; fill: {}; }}",
            palette.text_sub
        ),
    ]
}

const FADE_UP_CSS: [&str; 2] = [
    ".fade-up { opacity: 0; animation: fadeUpAnim 0.6s ease-out forwards; }",
    "@keyframes fadeUpAnim { from { opacity: 0; transform: translateY(10px); } to { opacity: 1; transform: translateY(0); } }",
];

/// Compose the full trophy grid.
///
/// An empty list never reaches the layout engine; it yields the fixed-size
/// notice document instead.
pub fn compose(
    achievements: &[Achievement],
    header: &DocumentHeader,
    palette: &Palette,
    params: &ComposeParams<'_>,
) -> String {
    if achievements.is_empty() {
        debug!("No trophies to compose for {:?}, using notice document", header.subject);
        return compose_notice(EMPTY_MESSAGE, palette);
    }

    let grid = &params.profile.grid;
    let spec = layout(achievements.len(), params.columns, grid);
    debug!(
        "Layout {} cards: {}x{} grid, {}x{} canvas",
        achievements.len(),
        spec.columns,
        spec.rows,
        spec.total_width,
        spec.total_height
    );

    let mut doc = DocumentBuilder::new(spec.total_width, spec.total_height)
        .background(palette.background, params.profile.corner_radius + 3);

    for css in stylesheet(palette) {
        doc.push(Fragment::Style(css));
    }
    if params.animation.is_on() {
        for css in FADE_UP_CSS {
            doc.push(Fragment::Style(css.to_string()));
        }
    }
    doc.push(Fragment::Def(format!(
        r#"<filter id="{DESATURATE_FILTER_ID}"><feColorMatrix type="saturate" values="0"/></filter>"#
    )));

    doc.push(Fragment::Header(header_markup(
        header,
        palette,
        spec.gap,
        spec.total_width,
        spec.header_height,
    )));

    let ctx = CardContext {
        palette,
        styles: params.styles,
        profile: params.profile,
        animation: params.animation,
    };
    for (index, achievement) in achievements.iter().enumerate() {
        doc.push(Fragment::Card(render_card(
            achievement,
            &ctx,
            spec.position(index),
            index,
        )));
    }

    doc.push(Fragment::Footer(format!(
        "  <text x=\"{}\" y=\"{}\" class=\"footer\">{}/{} unlocked</text>\n",
        spec.gap,
        spec.total_height.saturating_sub(10),
        header.earned,
        header.total
    )));

    doc.build()
}

/// Fixed-size informational document in the theme's colors.
pub fn compose_notice(message: &str, palette: &Palette) -> String {
    let mut doc = DocumentBuilder::new(NOTICE_WIDTH, NOTICE_HEIGHT).background(palette.background, 6);
    doc.push(Fragment::Header(format!(
        "  <text x=\"{}\" y=\"35\" text-anchor=\"middle\" font-family=\"{FONT_FAMILY}\" font-size=\"14\" fill=\"{}\">{}</text>\n",
        NOTICE_WIDTH / 2,
        palette.text_sub,
        xml_escape(message)
    )));
    doc.build()
}

/// Fixed-size error document.
///
/// The message is interpolated verbatim. Run subject-supplied text through
/// [`sanitize_message`] first.
pub fn compose_error(message: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{XML_DECLARATION}");
    let _ = writeln!(
        out,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" fill="none" xmlns="http://www.w3.org/2000/svg">"#,
        w = NOTICE_WIDTH,
        h = NOTICE_HEIGHT
    );
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" rx="6" fill="{ERROR_BACKGROUND}" stroke="{ERROR_COLOR}" stroke-width="1"/>"#
    );
    let _ = writeln!(
        out,
        r#"  <text x="{}" y="35" text-anchor="middle" font-family="Segoe UI" fill="{ERROR_COLOR}" font-weight="bold" font-size="14">Error: {message}</text>"#,
        NOTICE_WIDTH / 2
    );
    out.push_str("</svg>\n");
    out
}

/// Make arbitrary text safe to drop into [`compose_error`].
pub fn sanitize_message(message: &str) -> String {
    xml_escape(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::{build_catalog, TierScheme};
    use crate::metrics::Metrics;
    use crate::theme::{DARK, LIGHT};
    use crate::variant::Variant;

    fn header() -> DocumentHeader {
        DocumentHeader {
            subject: "octocat".into(),
            level: None,
            earned: 1,
            total: 8,
        }
    }

    fn cards(n: usize) -> Vec<Achievement> {
        let metrics = Metrics {
            stars: 30.0,
            ..Default::default()
        };
        build_catalog(&metrics, TierScheme::Letters)
            .into_iter()
            .cycle()
            .take(n)
            .collect()
    }

    fn compose_with(variant: Variant, achievements: &[Achievement], h: &DocumentHeader) -> String {
        let profile = variant.profile();
        let styles = TierStyles::default();
        let params = ComposeParams {
            profile: &profile,
            styles: &styles,
            columns: None,
            animation: Animation::On,
        };
        compose(achievements, h, &DARK, &params)
    }

    #[test]
    fn test_builder_orders_fragments() {
        let mut doc = DocumentBuilder::new(10, 10);
        doc.push(Fragment::Footer("<footer/>".into()));
        doc.push(Fragment::Card(CardFragment {
            index: 1,
            markup: "<card1/>".into(),
        }));
        doc.push(Fragment::Card(CardFragment {
            index: 0,
            markup: "<card0/>".into(),
        }));
        doc.push(Fragment::Header("<header/>".into()));
        let svg = doc.build();

        let header = svg.find("<header/>").unwrap();
        let card0 = svg.find("<card0/>").unwrap();
        let card1 = svg.find("<card1/>").unwrap();
        let footer = svg.find("<footer/>").unwrap();
        assert!(header < card0 && card0 < card1 && card1 < footer);
        assert!(svg.starts_with(XML_DECLARATION));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_dimensions_match_layout() {
        let achievements = cards(7);
        let svg = compose_with(Variant::Tiered, &achievements, &header());
        let spec = layout(7, None, &Variant::Tiered.profile().grid);
        assert!(svg.contains(&format!(
            r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}""#,
            w = spec.total_width,
            h = spec.total_height
        )));
        assert_eq!(svg.matches("class=\"fade-up\"").count(), 7);
    }

    #[test]
    fn test_empty_list_gives_notice() {
        let svg = compose_with(Variant::Classic, &[], &header());
        assert!(svg.starts_with(XML_DECLARATION));
        assert!(svg.contains(EMPTY_MESSAGE));
        assert!(svg.contains(r#"width="400" height="60""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_subject_escaped_in_header() {
        let mut h = header();
        h.subject = "<b>".into();
        let svg = compose_with(Variant::Tiered, &cards(1), &h);
        assert!(svg.contains("&lt;b&gt;'s Achievements"));
    }

    #[test]
    fn test_footer_summary() {
        let svg = compose_with(Variant::Lettered, &cards(2), &header());
        assert!(svg.contains("1/8 unlocked"));
    }

    #[test]
    fn test_level_header() {
        let mut h = header();
        h.level = Some(crate::levels::LevelCurve::default().level_for(175.0));
        let svg = compose_with(Variant::Leveled, &cards(1), &h);
        assert!(svg.contains("Level 2 Newcomer"));
        assert!(svg.contains("75 / 150 XP"));
    }

    #[test]
    fn test_level_header_width_fit() {
        let mut h = header();
        h.level = Some(crate::levels::LevelCurve::default().level_for(175.0));
        let wide = header_markup(&h, &DARK, 12, 408, 96);
        assert!(wide.contains(r#"y="60" text-anchor="end" class="xp">75 / 150 XP"#));

        let narrow = header_markup(&h, &DARK, 12, 144, 96);
        assert!(narrow.contains(r#"<text x="12" y="90" class="xp">75 / 150 XP</text>"#));
        assert!(!narrow.contains("text-anchor=\"end\""));
    }

    #[test]
    fn test_error_document() {
        let svg = compose_error("User not found");
        assert!(svg.starts_with(XML_DECLARATION));
        assert!(svg.contains("Error: User not found"));
        assert!(svg.contains(r#"width="400" height="60" viewBox="0 0 400 60""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_error_is_verbatim_sanitize_escapes() {
        assert!(compose_error("<i>x</i>").contains("Error: <i>x</i>"));
        assert!(compose_error(&sanitize_message("<i>x</i>")).contains("Error: &lt;i&gt;x&lt;/i&gt;"));
    }

    #[test]
    fn test_notice_uses_palette() {
        let svg = compose_notice("hi", &LIGHT);
        assert!(svg.contains(LIGHT.background));
        assert!(svg.contains(">hi</text>"));
    }
}
