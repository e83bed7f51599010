//! Lenient flag values, as accepted in query-string style input.

/// Parse `true/1/yes/on` and `false/0/no/off`, case-insensitive.
pub fn parse_bool_like(raw: &str) -> Result<bool, String> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!("expected true or false, got '{}'", other)),
    }
}

/// Parse a column count. Zero is accepted and clamped later by the layout.
pub fn parse_columns(raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| format!("expected a non-negative column count, got '{}'", raw))
}
