#![forbid(unsafe_code)]

//! Locale detection and integer digit grouping.
//!
//! Counters display their value with the locale's thousands separator
//! (`1,000` in English, `1.000` in German, `1 000` in French). Only grouping
//! is needed, so this module carries a small separator table instead of a
//! full CLDR dataset.

use std::env;
use std::fmt;

/// A normalized BCP-47-ish language tag (`en`, `de-CH`, `fr`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Normalize a raw tag: strip encoding/modifier suffixes (`.UTF-8`,
    /// `@euro`), map `_` to `-`, lowercase the language and uppercase the
    /// region. Empty, `C` and `POSIX` become `en`.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let base = raw
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .replace('_', "-");
        if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
            return Self::english();
        }
        let mut parts = base.split('-');
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let tag = match parts.next() {
            Some(region) if !region.is_empty() => {
                format!("{language}-{}", region.to_ascii_uppercase())
            }
            _ => language,
        };
        Self(tag)
    }

    /// The fallback locale.
    #[must_use]
    pub fn english() -> Self {
        Self("en".to_owned())
    }

    /// Full tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Thousands separator for this locale.
    #[must_use]
    pub fn group_separator(&self) -> &'static str {
        match (self.language(), self.0.as_str()) {
            (_, "de-CH" | "it-CH") => "\u{2019}",
            ("de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" | "el" | "ro", _) => ".",
            ("fr" | "ru" | "pl" | "cs" | "sk" | "sv" | "nb" | "no" | "fi" | "uk" | "hu", _) => {
                "\u{202F}"
            }
            _ => ",",
        }
    }

    /// Format `value` with this locale's digit grouping.
    #[must_use]
    pub fn format_integer(&self, value: i64) -> String {
        group_digits(value, self.group_separator())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Format `value` in groups of three digits joined by `separator`.
#[must_use]
pub fn group_digits(value: i64, separator: &str) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len() + 1);
    if value < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Detect the system locale from environment variables.
///
/// Preference order: `LC_ALL`, `LC_NUMERIC`, then `LANG`. Falls back to `en`.
#[must_use]
pub fn detect_system_locale() -> Locale {
    let lc_all = env::var("LC_ALL").ok();
    let lc_numeric = env::var("LC_NUMERIC").ok();
    let lang = env::var("LANG").ok();
    detect_system_locale_from(lc_all.as_deref(), lc_numeric.as_deref(), lang.as_deref())
}

/// Pure form of [`detect_system_locale`], for testing.
#[must_use]
pub fn detect_system_locale_from(
    lc_all: Option<&str>,
    lc_numeric: Option<&str>,
    lang: Option<&str>,
) -> Locale {
    [lc_all, lc_numeric, lang]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(Locale::new)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_digits(0, ","), "0");
        assert_eq!(group_digits(999, ","), "999");
        assert_eq!(group_digits(1000, ","), "1,000");
        assert_eq!(group_digits(12_345, ","), "12,345");
        assert_eq!(group_digits(123_456, ","), "123,456");
        assert_eq!(group_digits(1_234_567, ","), "1,234,567");
    }

    #[test]
    fn groups_negative_and_extreme_values() {
        assert_eq!(group_digits(-1000, ","), "-1,000");
        assert_eq!(group_digits(i64::MIN, ","), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn normalizes_posix_tags() {
        assert_eq!(Locale::new("de_DE.UTF-8").as_str(), "de-DE");
        assert_eq!(Locale::new("fr_FR@euro").as_str(), "fr-FR");
        assert_eq!(Locale::new("C").as_str(), "en");
        assert_eq!(Locale::new("POSIX").as_str(), "en");
        assert_eq!(Locale::new("").as_str(), "en");
        assert_eq!(Locale::new("EN-us").as_str(), "en-US");
    }

    #[test]
    fn separator_table() {
        assert_eq!(Locale::new("en-US").format_integer(1000), "1,000");
        assert_eq!(Locale::new("de-DE").format_integer(1000), "1.000");
        assert_eq!(Locale::new("de-CH").format_integer(1000), "1\u{2019}000");
        assert_eq!(Locale::new("fr").format_integer(25_000), "25\u{202F}000");
        assert_eq!(Locale::new("ja-JP").format_integer(1000), "1,000");
    }

    #[test]
    fn detection_prefers_lc_all() {
        let loc = detect_system_locale_from(Some("de_DE.UTF-8"), Some("fr_FR"), Some("en_US"));
        assert_eq!(loc.as_str(), "de-DE");
    }

    #[test]
    fn detection_skips_blank_values() {
        let loc = detect_system_locale_from(Some("  "), None, Some("fr_FR.UTF-8"));
        assert_eq!(loc.as_str(), "fr-FR");
    }

    #[test]
    fn detection_falls_back_to_english() {
        assert_eq!(detect_system_locale_from(None, None, None), Locale::english());
    }
}
