use chrono::NaiveDate;
use thiserror::Error;

/// Format of the dates in the label column, e.g. `Tue, 03/01/16`.
pub const DATE_FORMAT: &str = "%a, %m/%d/%y";

const ISO_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{value:?} is not a date in the {format:?} format")]
pub struct DateLabelError {
    pub value: String,
    pub format: &'static str,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a label cell. The weekday must agree with the date.
pub fn parse_date(label: &str) -> Result<NaiveDate, DateLabelError> {
    NaiveDate::parse_from_str(label.trim(), DATE_FORMAT).map_err(|_| DateLabelError {
        value: label.to_owned(),
        format: DATE_FORMAT,
    })
}

/// Accepts either an ISO date (`2016-03-01`) or a label-formatted one.
pub fn parse_date_input(input: &str) -> Result<NaiveDate, DateLabelError> {
    NaiveDate::parse_from_str(input.trim(), ISO_FORMAT).or_else(|_| parse_date(input))
}
