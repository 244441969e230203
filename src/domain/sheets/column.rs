use std::{fmt::Formatter, str::FromStr};

use thiserror::Error;

/// A worksheet column, stored as a zero-based index and rendered as letters (`A`, `B`, ..., `AA`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column {
    index: u32,
}

impl Column {
    pub const A: Column = Column { index: 0 };

    pub const fn from_index(index: u32) -> Self {
        Column { index }
    }

    /// 1-based column number, as shown by the Sheets UI (`A` is 1). Zero saturates to `A`.
    pub const fn from_number(number: u32) -> Self {
        Column {
            index: number.saturating_sub(1),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn number(&self) -> u32 {
        self.index + 1
    }

    pub fn letters(&self) -> String {
        let mut number = self.number();
        let mut letters = Vec::new();
        while number > 0 {
            let remainder = (number - 1) % 26;
            letters.push(b'A' + remainder as u8);
            number = (number - 1) / 26;
        }
        letters.reverse();
        String::from_utf8(letters).unwrap_or_default()
    }

    pub fn next(&self) -> Self {
        Column::from_index(self.index.saturating_add(1))
    }
}

impl std::ops::Add<u32> for Column {
    type Output = Column;

    fn add(self, rhs: u32) -> Self::Output {
        Column::from_index(self.index.saturating_add(rhs))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters())
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column({})", self.letters())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnParseError {
    #[error("Empty column name")]
    Empty,
    #[error("Non-alphabetic character {0:?} in column name")]
    NonAlphabeticCharacter(char),
    #[error("Column name {0:?} is too large")]
    Overflow(String),
}

impl FromStr for Column {
    type Err = ColumnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ColumnParseError::Empty);
        }

        let mut number: u32 = 0;
        for c in s.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(ColumnParseError::NonAlphabeticCharacter(c));
            }
            let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
            number = number
                .checked_mul(26)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| ColumnParseError::Overflow(s.to_owned()))?;
        }

        Ok(Column::from_number(number))
    }
}
