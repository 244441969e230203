#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetConfig {
    /// Path to the service-account JSON key.
    pub credentials_path: Box<str>,
    /// Bare spreadsheet id or the full spreadsheet URL.
    pub spreadsheet_id: Box<str>,
    /// Title of the worksheet to use. Defaults to the first sheet.
    #[serde(default)]
    pub worksheet: Option<Box<str>>,
}

impl SpreadsheetConfig {
    pub fn new(credentials_path: impl Into<Box<str>>, spreadsheet_id: impl Into<Box<str>>) -> Self {
        SpreadsheetConfig {
            credentials_path: credentials_path.into(),
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: None,
        }
    }
}
