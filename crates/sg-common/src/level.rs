use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Level fields arrive as free text: "Level 3", "level3", "L2", plain "4".
    static ref LEVEL_DIGITS_RE: Regex = Regex::new(r"\d+").unwrap();
}

/// Extract the numeric competency level from a free-text level field.
/// Missing text or text without digits defaults to level 1.
pub fn parse_level(raw: Option<&str>) -> i64 {
    raw.and_then(|text| LEVEL_DIGITS_RE.find(text))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(1)
}
