use super::{
    a1_notation::{
        quote_sheet_title, split_a1_notation, A1Notation, A1NotationParseError, FromA1Notation,
        ToA1Notation,
    },
    cell_position::CellPosition,
    column::Column,
    row::Row,
};

/// A rectangular block of cells, inclusive on both corners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
    pub sheet_title: Option<String>,
}

impl CellRange {
    /// Builds a range from two corners in any order.
    pub fn new(a: CellPosition, b: CellPosition) -> Self {
        CellRange {
            start: CellPosition::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellPosition::new(a.row.max(b.row), a.col.max(b.col)),
            sheet_title: None,
        }
    }

    pub fn single_cell(row: Row, col: Column) -> Self {
        let cell = CellPosition::new(row, col);
        CellRange::new(cell, cell)
    }

    pub fn column_span(col: Column, first: Row, last: Row) -> Self {
        CellRange::new(CellPosition::new(first, col), CellPosition::new(last, col))
    }

    pub fn row_span(row: Row, first: Column, last: Column) -> Self {
        CellRange::new(CellPosition::new(row, first), CellPosition::new(row, last))
    }

    pub fn row_count(&self) -> u32 {
        self.end.row.index() - self.start.row.index() + 1
    }

    pub fn column_count(&self) -> u32 {
        self.end.col.index() - self.start.col.index() + 1
    }

    pub fn with_sheet_title(self, sheet_title: impl Into<String>) -> Self {
        Self {
            sheet_title: Some(sheet_title.into()),
            ..self
        }
    }

    pub fn contains(&self, cell: &CellPosition) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_title: Option<&str>) -> A1Notation {
        let local = format!("{}:{}", self.start.local_a1(), self.end.local_a1());
        match sheet_title.or(self.sheet_title.as_deref()) {
            Some(title) => A1Notation(format!("{}!{}", quote_sheet_title(title), local)),
            None => A1Notation(local),
        }
    }
}

impl FromA1Notation for CellRange {
    fn from_a1_notation(a1_notation: &A1Notation) -> Result<Self, A1NotationParseError> {
        let parts = split_a1_notation(a1_notation);

        let mut range = CellRange::new(
            CellPosition::parse_local(parts.start)?,
            CellPosition::parse_local(parts.end)?,
        );
        range.sheet_title = parts.sheet_title;
        Ok(range)
    }
}
