//! Currency and date formatting for display, in US English.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

/// The largest amount [format_amount] can display. Larger amounts, including
/// infinity, are shown as this amount.
pub const MAX_DISPLAY_AMOUNT: f64 = 999_999_999_999.99;

/// Format `amount` as US dollars with two decimal places, e.g. "$1,234.50" or "-$5.00".
///
/// The amount is rounded to the nearest cent first, so `0.004` is "$0.00" and
/// `-0.004` is "-$0.00". `NaN` is shown as "$NaN".
pub fn format_amount(amount: f64) -> String {
    static DOLLARS_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    if amount.is_nan() {
        return "$NaN".to_owned();
    }

    let total_cents = (amount.abs().min(MAX_DISPLAY_AMOUNT) * 100.0).round() as u64;
    let (dollars, cents) = (total_cents / 100, total_cents % 100);

    // numfmt uses scientific notation for very small and very large numbers, so
    // it only formats whole dollars up to the maximum and the cents are appended.
    let dollars_fmt = DOLLARS_FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(0)))
    });

    let dollars = match dollars_fmt {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        Some(formatter) if dollars > 0 => formatter.fmt_string(dollars as f64),
        _ if dollars > 0 => format!("${dollars}"),
        _ => "$0".to_owned(),
    };
    let sign = if amount < 0.0 { "-" } else { "" };

    format!("{sign}{dollars}.{cents:02}")
}

const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[weekday repr:short], [month repr:short] [day padding:none], [hour repr:12 padding:none]:[minute] [period]"
);
const DATE_DAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[weekday repr:short], [month]/[day]/[year]");
const DATE_ONLY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");
const TIME_ONLY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[hour repr:12 padding:none]:[minute] [period]");

/// The different ways a timestamp is shown across the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDateTime {
    /// e.g. "Wed, Oct 25, 8:30 PM"
    pub date_time: String,
    /// e.g. "Wed, 10/25/2023"
    pub date_day: String,
    /// e.g. "Oct 25, 2023"
    pub date_only: String,
    /// e.g. "8:30 PM"
    pub time_only: String,
}

/// Format `date_time` for display in tables, cards and detail views.
pub fn format_date_time(date_time: PrimitiveDateTime) -> FormattedDateTime {
    let format = |description: &[BorrowedFormatItem]| {
        date_time
            .format(description)
            .unwrap_or_else(|_| date_time.to_string())
    };

    FormattedDateTime {
        date_time: format(DATE_TIME_FORMAT),
        date_day: format(DATE_DAY_FORMAT),
        date_only: format(DATE_ONLY_FORMAT),
        time_only: format(TIME_ONLY_FORMAT),
    }
}
