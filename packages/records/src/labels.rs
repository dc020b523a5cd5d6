//! Display helpers for dose numbers and application dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub use chrono::Locale;

/// Human label for a dose number. Total over `i32`.
pub fn dose_label(dose: i32) -> String {
    match dose {
        1 => "1st Dose".to_string(),
        2 => "2nd Dose".to_string(),
        3 => "3rd Dose".to_string(),
        4 => "1st Booster".to_string(),
        5 => "2nd Booster".to_string(),
        n => format!("Dose {n}"),
    }
}

/// Format an application date in the conventions of `locale`.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.f]` timestamps and
/// plain `YYYY-MM-DD` dates, rendered with the locale's date representation
/// (`05/03/2024` for `pt_BR`, `03/05/2024` for `en_US`). Empty input yields an
/// empty string; anything unparseable is shown verbatim.
pub fn format_date(date: &str, locale: Locale) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }
    parse_date(date)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().format_localized("%x", locale).to_string())
        .unwrap_or_else(|| date.to_string())
}

/// Resolve a system or browser locale tag (`pt-BR`, `pt_BR.UTF-8`,
/// `de_DE@euro`) to a known [`Locale`].
pub fn locale_from_tag(tag: &str) -> Option<Locale> {
    let tag = tag.split(['.', '@']).next().unwrap_or_default().trim();
    if tag.is_empty() {
        return None;
    }
    Locale::try_from(tag.replace('-', "_").as_str()).ok()
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dose_labels() {
        assert_eq!(dose_label(1), "1st Dose");
        assert_eq!(dose_label(2), "2nd Dose");
        assert_eq!(dose_label(3), "3rd Dose");
        assert_eq!(dose_label(4), "1st Booster");
        assert_eq!(dose_label(5), "2nd Booster");
        assert_eq!(dose_label(6), "Dose 6");
        assert_eq!(dose_label(0), "Dose 0");
        assert_eq!(dose_label(-2), "Dose -2");
    }

    #[test]
    fn test_format_date_follows_locale() {
        assert_eq!(format_date("2024-03-05", Locale::pt_BR), "05/03/2024");
        assert_eq!(format_date("2024-03-05", Locale::de_DE), "05.03.2024");
        assert_eq!(format_date("2024-03-05", Locale::en_US), "03/05/2024");
    }

    #[test]
    fn test_format_date_inputs() {
        let locale = Locale::pt_BR;
        assert_eq!(format_date("", locale), "");
        assert_eq!(format_date("   ", locale), "");
        assert_eq!(format_date("2024-03-05T10:30:00", locale), "05/03/2024");
        assert_eq!(format_date("2024-03-05T10:30:00Z", locale), "05/03/2024");
        // same calendar day regardless of the input shape
        assert_eq!(
            format_date("2024-03-05", locale),
            format_date("2024-03-05T23:59:59.123", locale)
        );
        assert_eq!(format_date("not a date", locale), "not a date");
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(locale_from_tag("pt-BR"), Some(Locale::pt_BR));
        assert_eq!(locale_from_tag("pt_BR.UTF-8"), Some(Locale::pt_BR));
        assert_eq!(locale_from_tag("de_DE@euro"), Some(Locale::de_DE));
        assert_eq!(locale_from_tag("en-US"), Some(Locale::en_US));
        assert_eq!(locale_from_tag(""), None);
        assert_eq!(locale_from_tag("xx-YY"), None);
    }
}
