//! Line timestamp prefixes.
//!
//! A format spec is resolved once per session. Empty disables timestamps,
//! `yes`/`true` selects epoch seconds with a microsecond fraction, a
//! well-known layout name selects that layout, a spec containing `%` is a
//! strftime template, and anything else is a reference-time layout written
//! against `Mon Jan 2 15:04:05 MST 2006` (e.g. `15:04:05.000`).

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::{Display, Write};

const EPOCH_MICROS: &str = "%s%.6f";

/// Well-known layout names and their strftime equivalents.
const NAMED_FORMATS: &[(&str, &str)] = &[
    ("ANSIC", "%a %b %e %H:%M:%S %Y"),
    ("UnixDate", "%a %b %e %H:%M:%S %Z %Y"),
    ("RubyDate", "%a %b %d %H:%M:%S %z %Y"),
    ("RFC822", "%d %b %y %H:%M %Z"),
    ("RFC822Z", "%d %b %y %H:%M %z"),
    ("RFC850", "%A, %d-%b-%y %H:%M:%S %Z"),
    ("RFC1123", "%a, %d %b %Y %H:%M:%S %Z"),
    ("RFC1123Z", "%a, %d %b %Y %H:%M:%S %z"),
    ("RFC3339", "%Y-%m-%dT%H:%M:%S%:z"),
    ("RFC3339Nano", "%Y-%m-%dT%H:%M:%S%.9f%:z"),
    ("Kitchen", "%-I:%M%p"),
    ("Stamp", "%b %e %H:%M:%S"),
    ("StampMilli", "%b %e %H:%M:%S%.3f"),
    ("StampMicro", "%b %e %H:%M:%S%.6f"),
    ("StampNano", "%b %e %H:%M:%S%.9f"),
];

/// Reference-time layout tokens and their strftime equivalents, longest first.
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("Z07:00", "%:z"),
    ("-07:00", "%:z"),
    ("Z0700", "%z"),
    ("-0700", "%z"),
    ("2006", "%Y"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("002", "%j"),
    ("_2", "%e"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
];

/// Translate a reference-time layout into a strftime template.
///
/// Text that is not a layout token is copied through unchanged. `Jan` and
/// `Mon` only count when no lowercase letter follows, so `Month` stays a word.
fn layout_to_strftime(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;

    while let Some(c) = rest.chars().next() {
        if let Some((consumed, width)) = fraction_at(rest) {
            out.push(c);
            out.push_str(&format!("%{}f", width));
            rest = &rest[consumed..];
            continue;
        }

        let token = LAYOUT_TOKENS.iter().find(|(token, _)| {
            rest.starts_with(token)
                && !(matches!(*token, "Jan" | "Mon")
                    && rest[token.len()..].starts_with(|c: char| c.is_ascii_lowercase()))
        });

        match token {
            Some((token, strftime)) => {
                out.push_str(strftime);
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

/// Fractional seconds written as `.000` or `,999` (3, 6 or 9 digits):
/// returns the bytes consumed and the digit count.
fn fraction_at(rest: &str) -> Option<(usize, usize)> {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'.' | b',')) {
        return None;
    }

    let digit = *bytes.get(1).filter(|b| matches!(b, b'0' | b'9'))?;
    let width = bytes[1..].iter().take_while(|&&b| b == digit).count();
    let trailing_digit = bytes.get(1 + width).is_some_and(|b| b.is_ascii_digit());

    match width {
        3 | 6 | 9 if !trailing_digit => Some((1 + width, width)),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Strftime(String),
    /// Template chrono cannot parse; rendered as-is.
    Literal(String),
}

/// Renders the `"[<time>] "` prefix put in front of every output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormatter {
    pattern: Option<Pattern>,
}

impl TimestampFormatter {
    pub fn resolve(spec: &str) -> Self {
        if spec.is_empty() {
            return Self::disabled();
        }

        let named = NAMED_FORMATS
            .iter()
            .find(|(name, _)| *name == spec)
            .map(|(_, format)| *format);

        let template = if spec.eq_ignore_ascii_case("yes") || spec.eq_ignore_ascii_case("true") {
            EPOCH_MICROS.to_string()
        } else if let Some(format) = named {
            format.to_string()
        } else if spec.contains('%') {
            spec.to_string()
        } else {
            layout_to_strftime(spec)
        };

        let pattern = if StrftimeItems::new(&template).any(|item| matches!(item, Item::Error)) {
            Pattern::Literal(spec.to_string())
        } else {
            Pattern::Strftime(template)
        };

        Self {
            pattern: Some(pattern),
        }
    }

    pub fn disabled() -> Self {
        Self { pattern: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.pattern.is_some()
    }

    /// Prefix for `now`, or an empty string when disabled.
    pub fn format<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let rendered = match &self.pattern {
            None => return String::new(),
            Some(Pattern::Literal(text)) => text.clone(),
            Some(Pattern::Strftime(template)) => {
                let mut out = String::new();
                match write!(out, "{}", now.format(template)) {
                    Ok(()) => out,
                    Err(_) => template.clone(),
                }
            }
        };

        format!("[{}] ", rendered)
    }

    pub fn format_now(&self) -> String {
        self.format(&Local::now())
    }
}
