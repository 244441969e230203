use chrono::NaiveDate;

/// One day of a stat series. Empty cells carry no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatPoint {
    pub date: NaiveDate,
    pub value: Option<String>,
}

impl StatPoint {
    pub fn new(date: NaiveDate, value: impl Into<String>) -> Self {
        let value = value.into();
        StatPoint {
            date,
            value: (!value.is_empty()).then_some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_is_none() {
        let date = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
        assert_eq!(StatPoint::new(date, "").value, None);
        assert_eq!(StatPoint::new(date, "42").value.as_deref(), Some("42"));
    }
}
