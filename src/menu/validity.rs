use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// The calendar week a menu applies to, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Validity {
    from: NaiveDate,
    until: NaiveDate,
}

impl Validity {
    /// Returns `None` unless `from <= until`.
    #[must_use]
    pub fn new(from: NaiveDate, until: NaiveDate) -> Option<Self> {
        (from <= until).then_some(Self { from, until })
    }

    /// Monday through Sunday of the week containing `today`.
    #[must_use]
    pub fn week_of(today: NaiveDate) -> Self {
        let from = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        Self {
            from,
            until: from + Duration::days(6),
        }
    }

    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub const fn until(&self) -> NaiveDate {
        self.until
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_week_of() {
        // a Wednesday
        let today = NaiveDate::from_ymd_opt(2014, 9, 10).unwrap();
        let week = Validity::week_of(today);
        assert_eq!(week.from(), NaiveDate::from_ymd_opt(2014, 9, 8).unwrap());
        assert_eq!(week.until(), NaiveDate::from_ymd_opt(2014, 9, 14).unwrap());
        assert_eq!(week.from().weekday(), Weekday::Mon);
        assert_eq!(week.until().weekday(), Weekday::Sun);
    }

    #[test]
    fn test_week_of_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2014, 9, 14).unwrap();
        assert_eq!(
            Validity::week_of(sunday).from(),
            NaiveDate::from_ymd_opt(2014, 9, 8).unwrap()
        );
    }

    #[test]
    fn test_rejects_reversed() {
        let a = NaiveDate::from_ymd_opt(2014, 9, 12).unwrap();
        let b = NaiveDate::from_ymd_opt(2014, 9, 8).unwrap();
        assert!(Validity::new(a, b).is_none());
        assert!(Validity::new(b, a).is_some());
    }
}
