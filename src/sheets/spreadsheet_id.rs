use std::fmt::Formatter;

const URL_MARKER: &str = "/spreadsheets/d/";

/// The identifier of a spreadsheet: the path segment after `/spreadsheets/d/` in its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    pub fn from_url_or_id(input: &str) -> Self {
        let input = input.trim();
        let id = match input.find(URL_MARKER) {
            Some(index) => {
                let rest = &input[index + URL_MARKER.len()..];
                rest.split(['/', '?', '#']).next().unwrap_or(rest)
            }
            None => input,
        };
        SpreadsheetId(id.to_owned())
    }
}

impl AsRef<str> for SpreadsheetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
