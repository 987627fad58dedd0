use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::menu::Validity;

use super::{normalize::collapse_whitespace, Error};

fn interval_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4})?.*\s(\d{1,2})\.(\d{1,2})\.?(\d{4})?")
            .expect("regex should be valid")
    })
}

/// Parses "Speiseplan vom 08.09. bis 12.09.2014".
///
/// A missing `from` year is taken from `until`; if `until` has none either,
/// both use `current_year`.
pub fn parse_interval(header: &str, current_year: i32) -> Result<Validity, Error> {
    let header = collapse_whitespace(header);
    let caps = interval_regex()
        .captures(&header)
        .ok_or_else(|| Error::Interval(format!("no date range in {header:?}")))?;
    let number = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());
    let year = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<i32>().ok());

    let until_year = year(6).unwrap_or(current_year);
    let until = date(until_year, number(5), number(4))?;
    let from = match year(3) {
        Some(from_year) => date(from_year, number(2), number(1))?,
        None => {
            let from = date(until_year, number(2), number(1))?;
            // "29.12. bis 02.01.2015" starts in the previous year
            if from > until {
                date(until_year - 1, number(2), number(1))?
            } else {
                from
            }
        }
    };
    Validity::new(from, until)
        .ok_or_else(|| Error::Interval(format!("{from} is after {until} in {header:?}")))
}

/// Falls back to the week containing `today` when the header cannot be parsed.
pub fn validity_or_current_week(header: &str, today: NaiveDate) -> Validity {
    parse_interval(header, today.year()).unwrap_or_else(|e| {
        log::warn!("{e}, using the current week");
        Validity::week_of(today)
    })
}

fn date(year: i32, month: Option<u32>, day: Option<u32>) -> Result<NaiveDate, Error> {
    month
        .zip(day)
        .and_then(|(month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| Error::Interval(format!("invalid date {day:?}.{month:?}.{year}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_inherits_year() {
        let validity = parse_interval("Speiseplan vom 08.09. bis 12.09.2014", 2020).unwrap();
        assert_eq!(validity.from(), ymd(2014, 9, 8));
        assert_eq!(validity.until(), ymd(2014, 9, 12));
    }

    #[test]
    fn test_both_years() {
        let validity = parse_interval("vom 08.09.2014 bis 12.09.2014", 2020).unwrap();
        assert_eq!(validity.from(), ymd(2014, 9, 8));
    }

    #[test]
    fn test_no_years_use_current() {
        let validity = parse_interval("Speiseplan vom 08.09. bis 12.09.", 2021).unwrap();
        assert_eq!(validity.from(), ymd(2021, 9, 8));
        assert_eq!(validity.until(), ymd(2021, 9, 12));
    }

    #[test]
    fn test_year_rollover() {
        let validity = parse_interval("Speiseplan vom 29.12. bis 02.01.2015", 2020).unwrap();
        assert_eq!(validity.from(), ymd(2014, 12, 29));
        assert_eq!(validity.until(), ymd(2015, 1, 2));
    }

    #[test]
    fn test_header_spanning_lines() {
        let validity = parse_interval("Speiseplan vom 08.09.\n\n  bis\n 12.09.2014", 2020).unwrap();
        assert_eq!(validity.until(), ymd(2014, 9, 12));
    }

    #[test]
    fn test_from_never_after_until() {
        for header in [
            "vom 01.09. bis 05.09.2014",
            "vom 31.12. bis 04.01.2016",
            "vom 1.2. bis 3.2.2000",
        ] {
            let validity = parse_interval(header, 2020).unwrap();
            assert!(validity.from() <= validity.until(), "{header}");
        }
        assert!(parse_interval("vom 12.09.2014 bis 08.09.2014", 2020).is_err());
    }

    #[test]
    fn test_fallback_to_current_week() {
        let today = ymd(2014, 9, 10);
        assert_eq!(
            validity_or_current_week("Speiseplan folgt", today),
            Validity::week_of(today)
        );
        assert_eq!(
            validity_or_current_week("vom 31.02. bis 04.03.2014", today),
            Validity::week_of(today)
        );
    }
}
