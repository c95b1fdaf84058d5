//! Context-free text casters: strings, URLs, dates and colors.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use url::Url;

use castkit_core::CastContext;

use super::numeric::parse_int_prefix;
use crate::error::CastResult;
use crate::value::Value;

pub(crate) fn string(_ctx: &CastContext, phrase: &str) -> CastResult {
    Ok((!phrase.is_empty()).then(|| Value::String(phrase.to_owned())))
}

pub(crate) fn lowercase(_ctx: &CastContext, phrase: &str) -> CastResult {
    Ok((!phrase.is_empty()).then(|| Value::String(phrase.to_lowercase())))
}

pub(crate) fn uppercase(_ctx: &CastContext, phrase: &str) -> CastResult {
    Ok((!phrase.is_empty()).then(|| Value::String(phrase.to_uppercase())))
}

pub(crate) fn char_codes(_ctx: &CastContext, phrase: &str) -> CastResult {
    Ok((!phrase.is_empty()).then(|| {
        Value::CharCodes(phrase.chars().map(u32::from).collect())
    }))
}

/// Removes one layer of `<...>` wrapping. `<>` is left alone.
fn strip_angle_brackets(phrase: &str) -> &str {
    match phrase.strip_prefix('<').and_then(|p| p.strip_suffix('>')) {
        Some(inner) if !inner.is_empty() => inner,
        _ => phrase,
    }
}

pub(crate) fn url(_ctx: &CastContext, phrase: &str) -> CastResult {
    if phrase.is_empty() {
        return Ok(None);
    }
    Ok(Url::parse(strip_angle_brackets(phrase)).ok().map(Value::Url))
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%b %d %Y %H:%M:%S",
    "%a %b %d %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

/// Completes the reduced ISO forms `YYYY` and `YYYY-MM` to the first day.
fn expand_reduced_iso(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    match bytes.len() {
        4 if digits(0..4) => Some(format!("{s}-01-01")),
        7 if digits(0..4) && bytes[4] == b'-' && digits(5..7) => Some(format!("{s}-01")),
        _ => None,
    }
}

/// Parses a date or date-time. Inputs without an offset are taken as UTC.
pub(crate) fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    let date = match expand_reduced_iso(s) {
        Some(full) => NaiveDate::parse_from_str(&full, "%Y-%m-%d").ok(),
        None => DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok()),
    };
    date.and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(crate) fn date(_ctx: &CastContext, phrase: &str) -> CastResult {
    if phrase.is_empty() {
        return Ok(None);
    }
    Ok(parse_date(phrase).map(Value::Date))
}

/// Largest valid color.
pub const MAX_COLOR: u32 = 0xFF_FF_FF;

/// Named colors, keyed by their upper snake case name.
pub const NAMED_COLORS: &[(&str, u32)] = &[
    ("DEFAULT", 0x000000),
    ("WHITE", 0xFFFFFF),
    ("AQUA", 0x1ABC9C),
    ("GREEN", 0x2ECC71),
    ("BLUE", 0x3498DB),
    ("YELLOW", 0xFFFF00),
    ("PURPLE", 0x9B59B6),
    ("LUMINOUS_VIVID_PINK", 0xE91E63),
    ("GOLD", 0xF1C40F),
    ("ORANGE", 0xE67E22),
    ("RED", 0xE74C3C),
    ("GREY", 0x95A5A6),
    ("NAVY", 0x34495E),
    ("DARK_AQUA", 0x11806A),
    ("DARK_GREEN", 0x1F8B4C),
    ("DARK_BLUE", 0x206694),
    ("DARK_PURPLE", 0x71368A),
    ("DARK_VIVID_PINK", 0xAD1457),
    ("DARK_GOLD", 0xC27C0E),
    ("DARK_ORANGE", 0xA84300),
    ("DARK_RED", 0x992D22),
    ("DARK_GREY", 0x979C9F),
    ("DARKER_GREY", 0x7F8C8D),
    ("LIGHT_GREY", 0xBCC0C0),
    ("DARK_NAVY", 0x2C3E50),
    ("BLURPLE", 0x7289DA),
    ("GREYPLE", 0x99AAB5),
    ("DARK_BUT_NOT_BLACK", 0x2C2F33),
    ("NOT_QUITE_BLACK", 0x23272A),
];

/// Resolves a color name or hex string.
///
/// `input` is expected to be uppercase already. `RANDOM` yields a fresh
/// random color on each call.
pub fn resolve_color(input: &str) -> Option<u32> {
    if input == "RANDOM" {
        return Some(rand::thread_rng().gen_range(0..=MAX_COLOR));
    }
    if let Some(&(_, value)) = NAMED_COLORS.iter().find(|(name, _)| *name == input) {
        return Some(value);
    }
    let hex = input.replacen('#', "", 1);
    parse_int_prefix(&hex, 16)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n <= MAX_COLOR)
}

pub(crate) fn color(_ctx: &CastContext, phrase: &str) -> CastResult {
    if phrase.is_empty() {
        return Ok(None);
    }
    Ok(resolve_color(&phrase.to_uppercase()).map(Value::Color))
}
