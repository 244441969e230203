use chrono::{Duration, NaiveDate};

use super::layout::DATA_START_ROW;
use crate::domain::sheets::row::Row;

/// Maps the consecutive days of the label column to worksheet rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateAxis {
    start: NaiveDate,
    end: NaiveDate,
}

/// Rows missing between the axis and a date outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Before { days: u32 },
    After { days: u32 },
}

impl Extension {
    pub fn days(&self) -> u32 {
        match self {
            Extension::Before { days } | Extension::After { days } => *days,
        }
    }
}

impl DateAxis {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateAxis {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    pub fn row_of(&self, date: NaiveDate) -> Option<Row> {
        self.contains(date)
            .then(|| DATA_START_ROW + days_between(self.start, date))
    }

    /// Date a row stands for, assuming one row per day from the start of the axis.
    pub fn date_of(&self, row: Row) -> NaiveDate {
        let offset = row.index().saturating_sub(DATA_START_ROW.index());
        self.start + Duration::days(offset as i64)
    }

    pub fn last_row(&self) -> Row {
        DATA_START_ROW + days_between(self.start, self.end)
    }

    pub fn extension_to(&self, date: NaiveDate) -> Option<Extension> {
        if date < self.start {
            Some(Extension::Before {
                days: days_between(date, self.start),
            })
        } else if date > self.end {
            Some(Extension::After {
                days: days_between(self.end, date),
            })
        } else {
            None
        }
    }

    pub fn extend_to(&mut self, date: NaiveDate) {
        self.start = self.start.min(date);
        self.end = self.end.max(date);
    }
}

/// Whole days from `from` to `to`, clamped at zero.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> u32 {
    u32::try_from(to.signed_duration_since(from).num_days()).unwrap_or(0)
}

/// `from`, `from + 1`, ... for `count` days.
pub fn consecutive_days(from: NaiveDate, count: u32) -> impl Iterator<Item = NaiveDate> {
    (0..count).map(move |offset| from + Duration::days(offset as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn axis() -> DateAxis {
        DateAxis::new(date(2016, 3, 1), date(2016, 3, 10))
    }

    #[test]
    fn test_row_of() {
        assert_eq!(axis().row_of(date(2016, 3, 1)), Some(Row::from_number(2)));
        assert_eq!(axis().row_of(date(2016, 3, 10)), Some(Row::from_number(11)));
        assert_eq!(axis().row_of(date(2016, 2, 29)), None);
        assert_eq!(axis().row_of(date(2016, 3, 11)), None);
    }

    #[test]
    fn test_date_of() {
        assert_eq!(axis().date_of(Row::from_number(2)), date(2016, 3, 1));
        assert_eq!(axis().date_of(Row::from_number(31)), date(2016, 3, 30));
        assert_eq!(axis().date_of(Row::from_number(1)), date(2016, 3, 1));
    }

    #[test]
    fn test_last_row() {
        assert_eq!(axis().last_row(), Row::from_number(11));
    }

    #[test]
    fn test_extension_to() {
        assert_eq!(axis().extension_to(date(2016, 3, 5)), None);
        assert_eq!(
            axis().extension_to(date(2016, 2, 27)),
            Some(Extension::Before { days: 3 })
        );
        assert_eq!(
            axis().extension_to(date(2016, 3, 12)),
            Some(Extension::After { days: 2 })
        );
    }

    #[test]
    fn test_extend_to() {
        let mut axis = axis();
        axis.extend_to(date(2016, 2, 27));
        axis.extend_to(date(2016, 3, 12));
        assert_eq!(axis.start(), date(2016, 2, 27));
        assert_eq!(axis.end(), date(2016, 3, 12));
    }

    #[test]
    fn test_new_orders_bounds() {
        let axis = DateAxis::new(date(2016, 3, 10), date(2016, 3, 1));
        assert_eq!(axis.start(), date(2016, 3, 1));
    }

    #[test]
    fn test_consecutive_days() {
        let days: Vec<_> = consecutive_days(date(2016, 2, 28), 3).collect();
        assert_eq!(days, vec![date(2016, 2, 28), date(2016, 2, 29), date(2016, 3, 1)]);
    }
}
