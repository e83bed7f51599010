//! Small SVG text helpers shared by the card and document composers.

/// XML declaration every document starts with
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Font stack used for all card and header text
pub const FONT_FAMILY: &str = "Segoe UI, Ubuntu, sans-serif";

/// Escape the five XML special characters for element text and attribute values.
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Format a coordinate with at most two decimals and no trailing `.0`.
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}
