use async_trait::async_trait;
use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::domain::sheets::{cell_range::CellRange, column::Column, grid_size::GridSize, row::Row};

/// Cell values in row-major order.
pub type CellGrid = Vec<Vec<String>>;

/// How Sheets interprets written values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored verbatim, never parsed.
    Raw,
    /// Parsed as if typed into the UI (numbers, dates, formulas).
    UserEntered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
    Columns,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorksheetError {
    #[error("Failed to load service account credential")]
    Credential,
    #[error("Authentication failed; is the spreadsheet shared with the service account?")]
    Authentication,
    #[error("Spreadsheet not found")]
    SpreadsheetNotFound,
    #[error("Worksheet not found")]
    WorksheetNotFound,
    #[error("Network failure")]
    Network,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Failed to update worksheet layout")]
    FailedToUpdateLayout,
    #[error("Range lies outside the worksheet grid")]
    OutOfBounds,
}

/// A single worksheet of a spreadsheet, addressed by rows and columns.
#[async_trait]
pub trait Worksheet: Send + Sync {
    async fn dimensions(&self) -> error_stack::Result<GridSize, WorksheetError>;

    /// Returns exactly `range.row_count()` rows of `range.column_count()` values each, with
    /// empty strings for blank cells.
    async fn read_range(&self, range: &CellRange) -> error_stack::Result<CellGrid, WorksheetError>;

    async fn write_range(
        &self,
        range: &CellRange,
        values: CellGrid,
        input: ValueInputOption,
    ) -> error_stack::Result<(), WorksheetError>;

    async fn resize(&self, size: GridSize) -> error_stack::Result<(), WorksheetError>;

    async fn append_rows(&self, count: u32) -> error_stack::Result<(), WorksheetError>;

    async fn append_columns(&self, count: u32) -> error_stack::Result<(), WorksheetError>;

    /// Inserts `count` empty rows so that the first of them sits at `before`, shifting the
    /// rest of the sheet down.
    async fn insert_rows(&self, before: Row, count: u32) -> error_stack::Result<(), WorksheetError>;

    async fn read_cell(&self, row: Row, col: Column) -> error_stack::Result<String, WorksheetError> {
        let grid = self.read_range(&CellRange::single_cell(row, col)).await?;
        Ok(grid.into_iter().flatten().next().unwrap_or_default())
    }

    async fn write_cell(
        &self,
        row: Row,
        col: Column,
        value: String,
        input: ValueInputOption,
    ) -> error_stack::Result<(), WorksheetError> {
        self.write_range(&CellRange::single_cell(row, col), vec![vec![value]], input)
            .await
    }

    /// Values of `row`, from column A to the last column of the grid.
    async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, WorksheetError> {
        let size = self.dimensions().await?;
        let grid = self
            .read_range(&CellRange::row_span(row, Column::A, size.last_column()))
            .await?;
        Ok(grid.into_iter().next().unwrap_or_default())
    }

    /// Values of `col`, from row 1 to the last row of the grid.
    async fn column_values(&self, col: Column) -> error_stack::Result<Vec<String>, WorksheetError> {
        let size = self.dimensions().await?;
        let grid = self
            .read_range(&CellRange::column_span(col, Row::from_number(1), size.last_row()))
            .await?;
        Ok(grid.into_iter().flatten().collect())
    }
}

#[async_trait]
impl<T: Worksheet + ?Sized> Worksheet for std::sync::Arc<T> {
    async fn dimensions(&self) -> error_stack::Result<GridSize, WorksheetError> {
        (**self).dimensions().await
    }

    async fn read_range(&self, range: &CellRange) -> error_stack::Result<CellGrid, WorksheetError> {
        (**self).read_range(range).await
    }

    async fn write_range(
        &self,
        range: &CellRange,
        values: CellGrid,
        input: ValueInputOption,
    ) -> error_stack::Result<(), WorksheetError> {
        (**self).write_range(range, values, input).await
    }

    async fn resize(&self, size: GridSize) -> error_stack::Result<(), WorksheetError> {
        (**self).resize(size).await
    }

    async fn append_rows(&self, count: u32) -> error_stack::Result<(), WorksheetError> {
        (**self).append_rows(count).await
    }

    async fn append_columns(&self, count: u32) -> error_stack::Result<(), WorksheetError> {
        (**self).append_columns(count).await
    }

    async fn insert_rows(&self, before: Row, count: u32) -> error_stack::Result<(), WorksheetError> {
        (**self).insert_rows(before, count).await
    }
}

/// Pads or truncates `values` to `rows` x `columns`.
pub fn fit_grid(mut values: CellGrid, rows: u32, columns: u32) -> CellGrid {
    values.resize_with(rows as usize, Vec::new);
    for row in values.iter_mut() {
        row.resize_with(columns as usize, String::new);
    }
    values
}
