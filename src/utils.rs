use chrono::{Locale, NaiveDate};

const LONG_DATE_FORMAT: &str = "%A, %-d de %B de %Y";

pub fn pad_number(number: u32) -> String {
    format!("{:02}", number)
}

/// Renders `DD/MM/YYYY`, `DD/MM/YY`, `DD-MM-YYYY` or `DD-MM-YY` as a long
/// es-AR date such as `miércoles, 25 de diciembre de 2024`. Two-digit years
/// belong to the 2000s. Anything that does not parse comes back unchanged.
pub fn format_date(date_string: &str) -> String {
    match parse_draw_date(date_string) {
        Some(date) => format_long_date(date),
        None => date_string.to_string(),
    }
}

pub fn parse_draw_date(date_string: &str) -> Option<NaiveDate> {
    let separator = if date_string.contains('/') {
        '/'
    } else if date_string.contains('-') {
        '-'
    } else {
        return None;
    };

    let parts: Vec<&str> = date_string.trim().split(separator).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day = parse_digits(day, 1..=2)?;
    let month = parse_digits(month, 1..=2)?;
    let year = match year.len() {
        2 => 2000 + parse_digits(year, 2..=2)?,
        4 => parse_digits(year, 4..=4)?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| {
            midnight
                .and_utc()
                .format_localized(LONG_DATE_FORMAT, Locale::es_AR)
                .to_string()
        })
        .unwrap_or_else(|| date.to_string())
}

fn parse_digits(text: &str, len: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !len.contains(&text.len()) || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
