//! Amount formatting for the finance screens.
//!
//! Amounts are always rendered with Korean digit grouping, independent of the host locale, so
//! the screens read the same on every machine.

use std::sync::OnceLock;

use icu_decimal::DecimalFormatter;
use icu_decimal::input::Decimal;
use icu_decimal::options::DecimalFormatterOptions;
use icu_locale_core::Locale;

const DISPLAY_LOCALE: &str = "ko-KR";

fn make_display_formatter() -> Option<DecimalFormatter> {
    let loc: Locale = DISPLAY_LOCALE.parse().ok()?;
    DecimalFormatter::try_new(loc.into(), DecimalFormatterOptions::default()).ok()
}

fn make_en_us_formatter() -> DecimalFormatter {
    #![allow(clippy::expect_used)]
    let loc: Locale = "en-US".parse().expect("en-US wasn't a valid locale");
    DecimalFormatter::try_new(loc.into(), DecimalFormatterOptions::default())
        .expect("en-US wasn't a valid locale")
}

fn formatter() -> &'static DecimalFormatter {
    static FORMATTER: OnceLock<DecimalFormatter> = OnceLock::new();
    FORMATTER.get_or_init(|| make_display_formatter().unwrap_or_else(make_en_us_formatter))
}

/// Format an i64 with digit separators (e.g. "3000000" -> "3,000,000").
pub fn format_with_separators(n: i64) -> String {
    formatter().format(&Decimal::from(n)).to_string()
}

/// Format an amount in won: `3000000` -> `"3,000,000원"`.
pub fn format_won(n: i64) -> String {
    format!("{}원", format_with_separators(n))
}

/// Format an amount in won using 만/천 units when it is a whole number of thousands:
/// `145000` -> `"14만5천원"`, `60000` -> `"6만원"`.
///
/// Amounts with a remainder below one thousand fall back to [`format_won`].
pub fn format_won_compact(n: i64) -> String {
    if n % 1_000 != 0 {
        return format_won(n);
    }
    if n == 0 {
        return "0원".to_string();
    }

    let sign = if n < 0 { "-" } else { "" };
    let abs = n.unsigned_abs();
    let man = abs / 10_000;
    let cheon = (abs % 10_000) / 1_000;

    let mut out = String::from(sign);
    if man > 0 {
        out.push_str(&format_with_separators(i64::try_from(man).unwrap_or(i64::MAX)));
        out.push('만');
    }
    if cheon > 0 {
        out.push_str(&cheon.to_string());
        out.push('천');
    }
    out.push('원');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_digits_by_thousands() {
        assert_eq!(format_with_separators(3_000_000), "3,000,000");
        assert_eq!(format_with_separators(16), "16");
        assert_eq!(format_won(217_000), "217,000원");
    }

    #[test]
    fn compact_uses_man_and_cheon_units() {
        assert_eq!(format_won_compact(145_000), "14만5천원");
        assert_eq!(format_won_compact(60_000), "6만원");
        assert_eq!(format_won_compact(5_000), "5천원");
        assert_eq!(format_won_compact(-60_000), "-6만원");
        assert_eq!(format_won_compact(0), "0원");
    }

    #[test]
    fn compact_falls_back_when_not_whole_thousands() {
        assert_eq!(format_won_compact(1_234), "1,234원");
    }
}
