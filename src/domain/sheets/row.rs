use std::{fmt::Formatter, num::ParseIntError, str::FromStr};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub const fn from_index(index: u32) -> Self {
        Row { index }
    }

    /// Builds a row from its 1-based number. Zero saturates to the first row.
    pub const fn from_number(number: u32) -> Self {
        Row {
            index: number.saturating_sub(1),
        }
    }

    /// Zero-based index, as used by the Sheets API grid ranges.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// 1-based number, as used by A1 notation.
    /// # Examples
    /// ```
    /// use gnosis::domain::sheets::row::Row;
    /// assert_eq!(Row::from_index(0).number(), 1);
    /// assert_eq!(Row::from_number(5).index(), 4);
    /// ```
    pub fn number(&self) -> u32 {
        self.index + 1
    }
}

impl std::ops::Add<u32> for Row {
    type Output = Row;

    fn add(self, rhs: u32) -> Self::Output {
        Row::from_index(self.index.saturating_add(rhs))
    }
}

impl std::ops::Sub<u32> for Row {
    type Output = Row;

    fn sub(self, rhs: u32) -> Self::Output {
        Row::from_index(self.index.saturating_sub(rhs))
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row({})", self.number())
    }
}

impl FromStr for Row {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Row::from_number(s.parse()?))
    }
}
