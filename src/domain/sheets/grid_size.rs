use super::{column::Column, row::Row};

/// Dimensions of a worksheet grid. Sheets never shrinks a grid below one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: u32,
    pub columns: u32,
}

impl GridSize {
    pub fn new(rows: u32, columns: u32) -> Self {
        GridSize {
            rows: rows.max(1),
            columns: columns.max(1),
        }
    }

    pub fn last_row(&self) -> Row {
        Row::from_number(self.rows)
    }

    pub fn last_column(&self) -> Column {
        Column::from_number(self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_below_one_cell() {
        assert_eq!(GridSize::new(0, 0), GridSize { rows: 1, columns: 1 });
    }

    #[test]
    fn test_last_row_and_column() {
        let size = GridSize::new(10, 3);
        assert_eq!(size.last_row(), Row::from_number(10));
        assert_eq!(size.last_column().to_string(), "C");
    }
}
