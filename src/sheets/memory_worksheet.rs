use async_trait::async_trait;
use error_stack::{report, ResultExt};
use tokio::sync::RwLock;

use crate::domain::sheets::{
    a1_notation::ToA1Notation, cell_range::CellRange, grid_size::GridSize, row::Row,
};

use super::worksheet::{fit_grid, CellGrid, ValueInputOption, Worksheet, WorksheetError};

/// A worksheet held in memory. Values are stored as written, whatever the input option.
#[derive(Debug)]
pub struct MemoryWorksheet {
    cells: RwLock<CellGrid>,
}

impl MemoryWorksheet {
    pub fn new(size: GridSize) -> Self {
        MemoryWorksheet {
            cells: RwLock::new(fit_grid(Vec::new(), size.rows, size.columns)),
        }
    }

    /// Builds a sheet from rows of values. The grid is as wide as the widest row.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: CellGrid = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let size = GridSize::new(rows.len() as u32, width);

        MemoryWorksheet {
            cells: RwLock::new(fit_grid(rows, size.rows, size.columns)),
        }
    }

    pub async fn snapshot(&self) -> CellGrid {
        self.cells.read().await.clone()
    }

    fn size_of(cells: &CellGrid) -> GridSize {
        GridSize::new(
            cells.len() as u32,
            cells.first().map(Vec::len).unwrap_or(0) as u32,
        )
    }

    fn check_bounds(cells: &CellGrid, range: &CellRange) -> error_stack::Result<(), WorksheetError> {
        let size = Self::size_of(cells);
        if range.end.row.number() > size.rows || range.end.col.number() > size.columns {
            return Err(report!(WorksheetError::OutOfBounds)).attach_printable_lazy(|| {
                format!(
                    "{} exceeds the {}x{} grid",
                    range.to_a1_notation(None),
                    size.rows,
                    size.columns
                )
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Worksheet for MemoryWorksheet {
    async fn dimensions(&self) -> error_stack::Result<GridSize, WorksheetError> {
        Ok(Self::size_of(&*self.cells.read().await))
    }

    async fn read_range(&self, range: &CellRange) -> error_stack::Result<CellGrid, WorksheetError> {
        let cells = self.cells.read().await;
        Self::check_bounds(&cells, range)?;

        let (first_col, last_col) = (range.start.col.index() as usize, range.end.col.index() as usize);
        Ok(cells[range.start.row.index() as usize..=range.end.row.index() as usize]
            .iter()
            .map(|row| row[first_col..=last_col].to_vec())
            .collect())
    }

    async fn write_range(
        &self,
        range: &CellRange,
        values: CellGrid,
        _input: ValueInputOption,
    ) -> error_stack::Result<(), WorksheetError> {
        let mut cells = self.cells.write().await;
        Self::check_bounds(&cells, range)?;

        if values.len() > range.row_count() as usize
            || values.iter().any(|row| row.len() > range.column_count() as usize)
        {
            return Err(report!(WorksheetError::FailedToWriteRange))
                .attach_printable("Values do not fit the target range");
        }

        let first_row = range.start.row.index() as usize;
        let first_col = range.start.col.index() as usize;
        for (r, row) in values.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                cells[first_row + r][first_col + c] = value;
            }
        }
        Ok(())
    }

    async fn resize(&self, size: GridSize) -> error_stack::Result<(), WorksheetError> {
        let mut cells = self.cells.write().await;
        let resized = fit_grid(std::mem::take(&mut *cells), size.rows, size.columns);
        *cells = resized;
        Ok(())
    }

    async fn append_rows(&self, count: u32) -> error_stack::Result<(), WorksheetError> {
        let mut cells = self.cells.write().await;
        let size = Self::size_of(&cells);
        let resized = fit_grid(std::mem::take(&mut *cells), size.rows + count, size.columns);
        *cells = resized;
        Ok(())
    }

    async fn append_columns(&self, count: u32) -> error_stack::Result<(), WorksheetError> {
        let mut cells = self.cells.write().await;
        let size = Self::size_of(&cells);
        let resized = fit_grid(std::mem::take(&mut *cells), size.rows, size.columns + count);
        *cells = resized;
        Ok(())
    }

    async fn insert_rows(&self, before: Row, count: u32) -> error_stack::Result<(), WorksheetError> {
        let mut cells = self.cells.write().await;
        let size = Self::size_of(&cells);
        let at = before.index() as usize;
        if at > cells.len() {
            return Err(report!(WorksheetError::OutOfBounds))
                .attach_printable_lazy(|| format!("Cannot insert before row {before}"));
        }

        let blank = vec![String::new(); size.columns as usize];
        cells.splice(at..at, std::iter::repeat(blank).take(count as usize));
        Ok(())
    }
}
