//! Fixed layout of a Gnosis worksheet: stat names across the first row, one day per row below it.

use crate::domain::sheets::{column::Column, row::Row};

/// Marks the day before a stat series begins.
pub const INITIALIZER: &str = "START";

pub const LABEL_ROW: Row = Row::from_number(1);
pub const LABEL_COLUMN: Column = Column::from_number(1);
pub const DATA_START_ROW: Row = Row::from_number(2);
pub const DATA_START_COLUMN: Column = Column::from_number(2);

/// Upper bound on the rows a single write may add to reach its date.
pub const MAX_NEW_ROWS: u32 = 1000;
