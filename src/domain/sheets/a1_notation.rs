use std::fmt::Formatter;

use thiserror::Error;

use super::column::ColumnParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl From<&str> for A1Notation {
    fn from(s: &str) -> Self {
        A1Notation(s.to_owned())
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_title: Option<&str>) -> A1Notation;
}

pub trait FromA1Notation: Sized {
    fn from_a1_notation(a1_notation: &A1Notation) -> Result<Self, A1NotationParseError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum A1NotationParseError {
    #[error("Missing column in {0:?}")]
    MissingColumn(String),
    #[error("Missing row in {0:?}")]
    MissingRow(String),
    #[error("Invalid column: {0}")]
    InvalidColumn(#[from] ColumnParseError),
    #[error("Invalid row in {0:?}")]
    InvalidRow(String),
}

/// Quotes a sheet title for use as an A1 prefix, doubling embedded single quotes.
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Inverse of [`quote_sheet_title`]. Unquoted titles are returned untouched.
pub fn unquote_sheet_title(title: &str) -> String {
    match title
        .strip_prefix('\'')
        .and_then(|title| title.strip_suffix('\''))
    {
        Some(inner) => inner.replace("''", "'"),
        None => title.to_owned(),
    }
}

pub struct A1NotationParts<'a> {
    pub sheet_title: Option<String>,
    pub start: &'a str,
    pub end: &'a str,
}

/// Splits `'Sheet'!B2:C5` into its sheet title and corner cells. A single cell yields the
/// same corner twice.
pub fn split_a1_notation(a1_notation: &A1Notation) -> A1NotationParts<'_> {
    let (sheet_title, local) = match a1_notation.0.rfind('!') {
        Some(index) => (
            Some(unquote_sheet_title(&a1_notation.0[..index])),
            &a1_notation.0[index + 1..],
        ),
        None => (None, a1_notation.0.as_str()),
    };

    let (start, end) = local.split_once(':').unwrap_or((local, local));

    A1NotationParts {
        sheet_title,
        start,
        end,
    }
}
