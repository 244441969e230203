use super::{
    a1_notation::{quote_sheet_title, A1Notation, A1NotationParseError, FromA1Notation, ToA1Notation},
    column::Column,
    row::Row,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: Row,
    pub col: Column,
}

impl CellPosition {
    pub fn new(row: Row, col: Column) -> Self {
        CellPosition { row, col }
    }

    pub(crate) fn local_a1(&self) -> String {
        format!("{}{}", self.col, self.row)
    }

    /// Parses a local cell reference such as `B12`, with no sheet prefix.
    pub(crate) fn parse_local(cell: &str) -> Result<Self, A1NotationParseError> {
        let cell = cell.trim();
        let split = cell
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(|| A1NotationParseError::MissingRow(cell.to_owned()))?;
        if split == 0 {
            return Err(A1NotationParseError::MissingColumn(cell.to_owned()));
        }

        let (letters, digits) = cell.split_at(split);
        let col = letters.parse::<Column>()?;
        let row = match digits.parse::<u32>() {
            Ok(number) if number > 0 => Row::from_number(number),
            _ => return Err(A1NotationParseError::InvalidRow(cell.to_owned())),
        };

        Ok(CellPosition { row, col })
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_title: Option<&str>) -> A1Notation {
        match sheet_title {
            Some(title) => A1Notation(format!("{}!{}", quote_sheet_title(title), self.local_a1())),
            None => A1Notation(self.local_a1()),
        }
    }
}

impl FromA1Notation for CellPosition {
    fn from_a1_notation(a1_notation: &A1Notation) -> Result<Self, A1NotationParseError> {
        let parts = super::a1_notation::split_a1_notation(a1_notation);
        CellPosition::parse_local(parts.start)
    }
}
